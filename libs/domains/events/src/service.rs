//! Event Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::repository::EventRepository;

/// Event service providing business logic operations
///
/// The service layer handles validation and orchestrates repository
/// operations.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new event
    #[instrument(skip(self, input), fields(event_title = %input.title))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get an event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// List all events
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.list().await
    }

    /// Overwrite an existing event's fields
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<()> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete an event.
    ///
    /// Succeeds whether or not the event existed (idempotent delete).
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEventRepository;

    fn create_input() -> CreateEvent {
        CreateEvent {
            title: "Meetup".to_string(),
            description: "Talk".to_string(),
            date: "2024-12-25".to_string(),
            location: "HQ".to_string(),
            organizer: "Alice".to_string(),
            event_type: "social".to_string(),
        }
    }

    fn update_input() -> UpdateEvent {
        UpdateEvent {
            title: "Meetup".to_string(),
            description: "Talk".to_string(),
            date: "2024-12-26".to_string(),
            location: "HQ".to_string(),
            organizer: "Alice".to_string(),
            event_type: "social".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_event_delegates_to_repository() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Event::new(input).unwrap()));

        let service = EventService::new(mock_repo);
        let event = service.create_event(create_input()).await.unwrap();
        assert_eq!(event.title, "Meetup");
    }

    #[tokio::test]
    async fn test_create_event_rejects_invalid_date() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().times(0);

        let service = EventService::new(mock_repo);
        let mut input = create_input();
        input.date = "tomorrow-ish".to_string();

        let err = service.create_event(input).await.unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_event_rejects_empty_title() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().times(0);

        let service = EventService::new(mock_repo);
        let mut input = create_input();
        input.title = String::new();

        let err = service.create_event(input).await.unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_event_maps_missing_to_not_found() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service.get_event(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_event_surfaces_not_found() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_update()
            .returning(|id, _| Err(EventError::NotFound(id)));

        let service = EventService::new(mock_repo);
        let err = service
            .update_event(Uuid::now_v7(), update_input())
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_event_succeeds_when_nothing_deleted() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = EventService::new(mock_repo);
        assert!(service.delete_event(Uuid::now_v7()).await.is_ok());
    }
}
