use std::time::Duration;

/// Quiet period before a scheduled remote write fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl SyncConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_defaults_to_thirty_seconds() {
        assert_eq!(SyncConfig::default().debounce, Duration::from_secs(30));
        let config = SyncConfig::default().with_debounce(Duration::from_secs(5));
        assert_eq!(config.debounce, Duration::from_secs(5));
    }
}
