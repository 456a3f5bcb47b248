//! Shared outbound HTTP client.

use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client used by every adapter. A timed-out call fails like any other
/// request error.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .user_agent(concat!("autopost/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// `HTTP_TIMEOUT_SECS`, falling back to [`DEFAULT_TIMEOUT`].
pub fn timeout_from_env() -> Duration {
    std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}
