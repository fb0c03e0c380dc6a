//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = non_empty(section.get("type")) {
            config.source.source = parse_identifier("source", "type", v)?;
        }
    }

    // [ign] section
    if let Some(section) = ini.section(Some("ign")) {
        config.ign.api_key = non_empty(section.get("api_key")).map(str::to_string);
        if let Some(v) = non_empty(section.get("layer")) {
            config.ign.layer = parse_identifier("ign", "layer", v)?;
        }
    }

    // [ordnance_survey] section
    if let Some(section) = ini.section(Some("ordnance_survey")) {
        config.ordnance_survey.api_key = non_empty(section.get("api_key")).map(str::to_string);
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_positive(
                "download",
                "timeout",
                v,
                "must be a positive integer (seconds)",
            )?;
        }
        if let Some(v) = section.get("connect_timeout") {
            config.download.connect_timeout = parse_positive(
                "download",
                "connect_timeout",
                v,
                "must be a positive integer (seconds)",
            )?;
        }
        if let Some(v) = section.get("max_attempts") {
            config.download.max_attempts =
                parse_positive("download", "max_attempts", v, "must be a positive integer")?;
        }
        if let Some(v) = section.get("retry_delay_ms") {
            config.download.retry_delay_ms =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "retry_delay_ms".to_string(),
                    value: v.to_string(),
                    reason: "must be a non-negative integer (milliseconds)".to_string(),
                })?;
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses an identifier such as a source or layer key, reporting the
/// accepted values on failure.
fn parse_identifier<T>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr<Err = crate::provider::UnknownIdentifier>,
{
    value.parse().map_err(|e: crate::provider::UnknownIdentifier| {
        ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be one of: {}", e.expected()),
        }
    })
}

fn parse_positive<T>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }),
    }
}
