//! Common utilities shared across database implementations

pub mod retry;

pub use retry::{RetryConfig, retry, retry_with_backoff};
