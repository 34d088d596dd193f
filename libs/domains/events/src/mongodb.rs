//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, UpdateEvent, parse_event_date};
use crate::repository::EventRepository;

/// MongoDB implementation of the EventRepository
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    /// Create a new MongoEventRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoEventRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Event>("events");
        Self { collection }
    }

    /// Create a new MongoEventRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Event>(collection_name);
        Self { collection }
    }

    /// Create collection indexes.
    ///
    /// Listing sorts on `updatedAt`, so keep it indexed.
    pub async fn create_indexes(&self) -> EventResult<()> {
        let index = mongodb::IndexModel::builder()
            .keys(doc! { "updatedAt": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, input), fields(event_title = %input.title))]
    async fn create(&self, input: CreateEvent) -> EventResult<Event> {
        let event =
            Event::new(input).map_err(|e| EventError::Validation(e.to_string()))?;

        self.collection.insert_one(&event).await?;

        tracing::info!(event_id = %event.id, "Event created successfully");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let event = self.collection.find_one(filter).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> EventResult<Vec<Event>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "updatedAt": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;

        Ok(events)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<()> {
        let date = parse_event_date(&input.date)
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        // $set overwrites the listed fields; unlisted stored fields are untouched
        let update = doc! {
            "$set": {
                "title": &input.title,
                "description": &input.description,
                "date": to_bson(&date).unwrap_or(Bson::Null),
                "location": &input.location,
                "organizer": &input.organizer,
                "eventType": &input.event_type,
                // Timestamps are stored with fixed millisecond precision so the
                // string-encoded updatedAt sort stays correct
                "updatedAt": to_bson(&Utc::now().trunc_subsecs(3)).unwrap_or(Bson::Null),
            }
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Err(EventError::NotFound(id));
        }

        tracing::info!(event_id = %id, "Event updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        tracing::info!(
            event_id = %id,
            deleted = result.deleted_count > 0,
            "Event delete processed"
        );
        Ok(result.deleted_count > 0)
    }
}
