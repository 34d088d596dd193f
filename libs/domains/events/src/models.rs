use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Event entity - represents an event stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Event title
    pub title: String,
    /// Event description
    pub description: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
    /// Where the event takes place
    pub location: String,
    /// Who organizes the event
    pub organizer: String,
    /// Category label (e.g. "social", "conference")
    #[serde(rename = "eventType")]
    pub event_type: String,
    /// Last write timestamp, always server-assigned
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Event date, either RFC 3339 or a plain `YYYY-MM-DD` calendar date
    #[validate(custom(function = validate_event_date))]
    #[schema(example = "2024-12-25")]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default, rename = "eventType")]
    pub event_type: String,
}

/// DTO for updating an existing event.
///
/// Updates overwrite every listed field on the stored document.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = validate_event_date))]
    #[schema(example = "2024-12-25")]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default, rename = "eventType")]
    pub event_type: String,
}

/// Response returned after a successful create
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEventResponse {
    /// Identifier of the newly created event
    pub result: String,
}

/// Parse a user-supplied event date.
///
/// Accepts either a full RFC 3339 timestamp or a bare `YYYY-MM-DD`
/// calendar date, which resolves to midnight UTC of that day.
pub fn parse_event_date(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ValidationError::new("invalid_date"))
}

fn validate_event_date(input: &str) -> Result<(), ValidationError> {
    parse_event_date(input).map(|_| ())
}

impl Event {
    /// Create a new event from a CreateEvent DTO.
    ///
    /// Fails if the date does not parse; callers should have validated
    /// the input beforehand.
    pub fn new(input: CreateEvent) -> Result<Self, ValidationError> {
        let date = parse_event_date(&input.date)?;
        Ok(Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            date,
            location: input.location,
            organizer: input.organizer,
            event_type: input.event_type,
            // Fixed millisecond precision keeps string-encoded timestamps
            // comparable for the updatedAt sort
            updated_at: Utc::now().trunc_subsecs(3),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_input(date: &str) -> CreateEvent {
        CreateEvent {
            title: "Meetup".to_string(),
            description: "Talk".to_string(),
            date: date.to_string(),
            location: "HQ".to_string(),
            organizer: "Alice".to_string(),
            event_type: "social".to_string(),
        }
    }

    #[test]
    fn test_parse_calendar_date_resolves_to_midnight_utc() {
        let parsed = parse_event_date("2024-12-25").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let parsed = parse_event_date("2024-12-25T18:30:00+02:00").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2024, 12, 25, 16, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_garbage_date_fails() {
        assert!(parse_event_date("not-a-date").is_err());
        assert!(parse_event_date("").is_err());
        assert!(parse_event_date("2024-13-40").is_err());
    }

    #[test]
    fn test_create_event_validation() {
        assert!(create_input("2024-12-25").validate().is_ok());

        let mut empty_title = create_input("2024-12-25");
        empty_title.title = String::new();
        assert!(empty_title.validate().is_err());

        assert!(create_input("bogus").validate().is_err());
    }

    #[test]
    fn test_event_new_assigns_id_and_updated_at() {
        let event = Event::new(create_input("2024-12-25")).unwrap();
        assert!(!event.id.is_nil());
        assert_eq!(event.title, "Meetup");
        assert_eq!(
            event.date,
            Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap()
        );
        assert!(event.updated_at <= Utc::now());
    }

    #[test]
    fn test_updated_at_has_millisecond_precision() {
        let event = Event::new(create_input("2024-12-25")).unwrap();
        assert_eq!(event.updated_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_event_wire_field_names() {
        let event = Event::new(create_input("2024-12-25")).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("eventType").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("event_type").is_none());
    }

    #[test]
    fn test_create_event_accepts_camel_case_event_type() {
        let input: CreateEvent = serde_json::from_value(serde_json::json!({
            "title": "Meetup",
            "date": "2024-12-25",
            "eventType": "social"
        }))
        .unwrap();
        assert_eq!(input.event_type, "social");
        assert_eq!(input.description, "");
    }
}
