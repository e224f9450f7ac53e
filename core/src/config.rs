//! Keeper Configuration

/// Keeper configuration
#[derive(Clone, Debug)]
pub struct KeeperConfig {
    /// Default model to use
    pub model: String,
    /// Maximum facade calls per generation before giving up on duplicates
    pub max_generation_attempts: usize,
    /// Sampling temperature for content generation
    pub temperature: f32,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            model: "gemma3".to_string(),
            max_generation_attempts: 3,
            temperature: 0.9,
        }
    }
}

impl KeeperConfig {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("MENAGERIE_MODEL").unwrap_or(defaults.model),
            max_generation_attempts: std::env::var("MENAGERIE_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_generation_attempts),
            temperature: std::env::var("MENAGERIE_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeeperConfig::default();
        assert_eq!(config.max_generation_attempts, 3);
        assert!(!config.model.is_empty());
    }
}
