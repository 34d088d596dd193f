//! MongoDB connectivity for the events API.
//!
//! # Features
//!
//! - `mongodb` (default) - connector, health probe, and driver re-exports
//! - `config` - load [`mongodb::MongoConfig`] via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("events");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
