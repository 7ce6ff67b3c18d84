/// Console settings supplied by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Size hint stamped on every message the console emits
    pub message_size: u32,
    /// Whether Tab replaces the input with the closest command name
    pub tab_completion: bool,
    /// Label for messages not sent on behalf of a command
    pub default_label: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            message_size: 32,
            tab_completion: true,
            default_label: "System".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn with_message_size(mut self, size: u32) -> Self {
        self.message_size = size;
        self
    }

    pub fn with_tab_completion(mut self, enabled: bool) -> Self {
        self.tab_completion = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.message_size, 32);
        assert!(config.tab_completion);
        assert_eq!(config.default_label, "System");
    }
}
