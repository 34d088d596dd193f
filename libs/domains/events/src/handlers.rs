use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{CreateEvent, CreateEventResponse, Event, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(
        schemas(Event, CreateEvent, UpdateEvent, CreateEventResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(shared_service)
}

/// List all events
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 200, description = "Event created successfully", body = CreateEventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<Json<CreateEventResponse>> {
    let event = service.create_event(input).await?;
    Ok(Json(CreateEventResponse {
        result: event.id.to_string(),
    }))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<impl IntoResponse> {
    service.update_event(id, input).await?;
    Ok("Event updated successfully")
}

/// Delete an event.
///
/// Deletion is idempotent: deleting an event that does not exist still
/// succeeds.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<impl IntoResponse> {
    service.delete_event(id).await?;
    Ok("Event deleted successfully")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventError;
    use crate::repository::MockEventRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(mock_repo: MockEventRepository) -> Router {
        router(EventService::new(mock_repo))
    }

    async fn body_bytes(body: Body) -> Vec<u8> {
        body.collect().await.unwrap().to_bytes().to_vec()
    }

    fn sample_event(id: Uuid) -> Event {
        Event {
            id,
            title: "Meetup".to_string(),
            description: "Talk".to_string(),
            date: Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap(),
            location: "HQ".to_string(),
            organizer: "Alice".to_string(),
            event_type: "social".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_event_returns_result_with_id() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Event::new(input).unwrap()));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Meetup",
                    "description": "Talk",
                    "date": "2024-12-25",
                    "location": "HQ",
                    "organizer": "Alice",
                    "eventType": "social"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = json["result"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_create_event_with_invalid_date_returns_400() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().times(0);

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Meetup",
                    "date": "not-a-date"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_event_returns_stored_fields() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |id| Ok(Some(sample_event(id))));

        let request = Request::builder()
            .uri(format!("/{}", id))
            .body(Body::empty())
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["title"], "Meetup");
        assert_eq!(json["organizer"], "Alice");
        assert_eq!(json["eventType"], "social");
    }

    #[tokio::test]
    async fn test_get_missing_event_returns_404_plain_text() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let request = Request::builder()
            .uri(format!("/{}", Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_bytes(response.into_body()).await;
        assert_eq!(body, b"Event not found");
    }

    #[tokio::test]
    async fn test_get_event_with_bad_uuid_returns_400() {
        let mock_repo = MockEventRepository::new();

        let request = Request::builder()
            .uri("/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_events_returns_array() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Ok(vec![sample_event(Uuid::now_v7())]));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_event_returns_plain_text_success() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(()));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::now_v7()))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Meetup",
                    "description": "Updated talk",
                    "date": "2024-12-26",
                    "location": "HQ",
                    "organizer": "Alice",
                    "eventType": "social"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response.into_body()).await;
        assert_eq!(body, b"Event updated successfully");
    }

    #[tokio::test]
    async fn test_update_missing_event_returns_404() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_update()
            .returning(|id, _| Err(EventError::NotFound(id)));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::now_v7()))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Meetup",
                    "date": "2024-12-26"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_bytes(response.into_body()).await;
        assert_eq!(body, b"Event not found");
    }

    #[tokio::test]
    async fn test_delete_event_is_idempotent() {
        let mut mock_repo = MockEventRepository::new();
        // Nothing was deleted, but the handler still reports success
        mock_repo.expect_delete().returning(|_| Ok(false));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response.into_body()).await;
        assert_eq!(body, b"Event deleted successfully");
    }

    #[tokio::test]
    async fn test_repository_failure_returns_500() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(EventError::Database("connection reset".to_string())));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app(mock_repo).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
