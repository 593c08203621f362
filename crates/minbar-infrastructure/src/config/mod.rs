use std::time::Duration;

/// Centralized timeout and duration configuration
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Per-request timeout on the shared HTTP client (default: 30 seconds)
    pub request: Duration,

    /// Connectivity-probe timeout when validating a server URL
    /// (default: 5 seconds)
    pub connectivity_probe: Duration,

    /// Dashboard polling interval (default: 30 seconds)
    pub poll_interval: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            connectivity_probe: Duration::from_secs(5),
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the per-request timeout
    pub fn with_request(mut self, duration: Duration) -> Self {
        self.request = duration;
        self
    }

    /// Builder pattern: set the connectivity-probe timeout
    pub fn with_connectivity_probe(mut self, duration: Duration) -> Self {
        self.connectivity_probe = duration;
        self
    }

    /// Builder pattern: set the polling interval
    pub fn with_poll_interval(mut self, duration: Duration) -> Self {
        self.poll_interval = duration;
        self
    }
}
