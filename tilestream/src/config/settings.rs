//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI file.

use std::time::Duration;

use super::file::ConfigFileError;
use crate::provider::{
    IgnLayer, MapSource, MapSourceConfig, RetryPolicy, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RETRY_STEP_MS,
};

/// Default overall HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default HTTP connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Selected map source
    pub source: SourceSettings,
    /// IGN Géoportail credentials and layer
    pub ign: IgnSettings,
    /// Ordnance Survey credentials
    pub ordnance_survey: OrdnanceSurveySettings,
    /// HTTP and retry behavior
    pub download: DownloadSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Map source used when none is given on the command line
    pub source: MapSource,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source: MapSource::OpenStreetMap,
        }
    }
}

/// `[ign]` section.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IgnSettings {
    pub api_key: Option<String>,
    pub layer: IgnLayer,
}

/// `[ordnance_survey]` section.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OrdnanceSurveySettings {
    pub api_key: Option<String>,
}

// Keys are never printed.
impl std::fmt::Debug for IgnSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgnSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("layer", &self.layer)
            .finish()
    }
}

impl std::fmt::Debug for OrdnanceSurveySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdnanceSurveySettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Overall timeout for one HTTP attempt, in seconds.
    pub timeout: u64,
    /// Connect timeout for one HTTP attempt, in seconds.
    pub connect_timeout: u64,
    /// Attempts per tile, the first one included. 1 disables retries.
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_STEP_MS,
        }
    }
}

impl DownloadSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Retry policy described by these settings.
    ///
    /// A single attempt maps to [`RetryPolicy::None`]; anything more to a
    /// linear backoff.
    pub fn retry_policy(&self) -> RetryPolicy {
        if self.max_attempts <= 1 {
            RetryPolicy::None
        } else {
            RetryPolicy::linear(
                self.max_attempts,
                Duration::from_millis(self.retry_delay_ms),
            )
        }
    }
}

impl ConfigFile {
    /// Provider configuration for the configured source.
    pub fn source_config(&self) -> Result<MapSourceConfig, ConfigFileError> {
        self.source_config_for(self.source.source)
    }

    /// Provider configuration for `source`, using the credentials on file.
    ///
    /// # Errors
    ///
    /// [`ConfigFileError::MissingValue`] when `source` needs an API key and
    /// none is configured.
    pub fn source_config_for(
        &self,
        source: MapSource,
    ) -> Result<MapSourceConfig, ConfigFileError> {
        let config = match source {
            MapSource::Ign => {
                MapSourceConfig::ign(require_key(&self.ign.api_key, "ign")?, self.ign.layer)
            }
            MapSource::IgnSpain => MapSourceConfig::IgnSpain,
            MapSource::Usgs => MapSourceConfig::Usgs,
            MapSource::OpenStreetMap => MapSourceConfig::OpenStreetMap,
            MapSource::SwissTopo => MapSourceConfig::SwissTopo,
            MapSource::OrdnanceSurvey => MapSourceConfig::ordnance_survey(require_key(
                &self.ordnance_survey.api_key,
                "ordnance_survey",
            )?),
        };
        Ok(config)
    }
}

fn require_key(key: &Option<String>, section: &str) -> Result<String, ConfigFileError> {
    key.clone().ok_or_else(|| ConfigFileError::MissingValue {
        section: section.to_string(),
        key: "api_key".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();

        assert_eq!(config.source.source, MapSource::OpenStreetMap);
        assert!(config.ign.api_key.is_none());
        assert_eq!(config.ign.layer, IgnLayer::ScanExpressStandard);
        assert_eq!(config.download.timeout, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.download.connect_timeout, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert_eq!(config.download.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_single_attempt_disables_retries() {
        let download = DownloadSettings {
            max_attempts: 1,
            ..Default::default()
        };
        assert_eq!(download.retry_policy(), RetryPolicy::None);
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let download = DownloadSettings {
            max_attempts: 5,
            retry_delay_ms: 50,
            ..Default::default()
        };
        assert_eq!(
            download.retry_policy(),
            RetryPolicy::linear(5, Duration::from_millis(50))
        );
    }

    #[test]
    fn test_source_config_without_key() {
        let config = ConfigFile::default();
        assert_eq!(
            config.source_config().unwrap(),
            MapSourceConfig::OpenStreetMap
        );

        let err = config.source_config_for(MapSource::Ign).unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::MissingValue { ref section, .. } if section == "ign"
        ));
    }

    #[test]
    fn test_source_config_with_key() {
        let mut config = ConfigFile::default();
        config.source.source = MapSource::OrdnanceSurvey;
        config.ordnance_survey.api_key = Some("os-key".to_string());

        assert_eq!(
            config.source_config().unwrap(),
            MapSourceConfig::ordnance_survey("os-key")
        );
    }

    #[test]
    fn test_debug_redacts_keys() {
        let mut config = ConfigFile::default();
        config.ign.api_key = Some("secret-ign".to_string());
        config.ordnance_survey.api_key = Some("secret-os".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-ign"));
        assert!(!debug.contains("secret-os"));
    }
}
