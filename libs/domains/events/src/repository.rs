use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{CreateEvent, Event, UpdateEvent};

/// Repository trait for Event persistence
///
/// This trait defines the data access interface for events.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Create a new event
    async fn create(&self, input: CreateEvent) -> EventResult<Event>;

    /// Get an event by ID
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// List all events
    async fn list(&self) -> EventResult<Vec<Event>>;

    /// Overwrite the fields of an existing event.
    ///
    /// Fails with `EventError::NotFound` if no event has the given ID.
    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<()>;

    /// Delete an event by ID.
    ///
    /// Returns whether a document was actually removed.
    async fn delete(&self, id: Uuid) -> EventResult<bool>;
}
