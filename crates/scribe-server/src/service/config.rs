use anyhow::{Result as AnyhowResult, anyhow};
#[cfg(feature = "config")]
use clap::Args;
use scribe_core::batch::BatchConfig;
use serde::{Deserialize, Serialize};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Batch limits and enhancement settings.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub batch: BatchConfig,
}

impl ServiceConfig {
    /// Validates all configuration values and returns errors for invalid settings.
    ///
    /// # Errors
    ///
    /// - `max_files` must be at least one
    /// - the contrast factor must be a positive finite number
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.batch.max_files == 0 {
            return Err(anyhow!("Maximum number of files must be at least 1"));
        }

        if !self.batch.enhance.is_valid() {
            return Err(anyhow!(
                "Contrast factor must be a positive number, got {}",
                self.batch.enhance.contrast
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_max_files() {
        let config = ServiceConfig {
            batch: BatchConfig::default().with_max_files(0),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_contrast() {
        let mut config = ServiceConfig::default();
        config.batch.enhance.contrast = -1.0;
        assert!(config.validate().is_err());
    }
}
