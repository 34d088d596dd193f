use mongodb::Client;
use std::time::Instant;

/// Outcome of a MongoDB health probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the server answered the probe
    pub healthy: bool,
    /// Error details when the probe failed
    pub message: Option<String>,
    /// Probe round-trip time in milliseconds
    pub response_time_ms: u64,
}

/// Probe MongoDB with a lightweight command and report the outcome.
///
/// Readiness endpoints surface the timing and any error message to the
/// caller, so both are captured here.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match client.list_database_names().await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health_detailed() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health_detailed(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
