//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let ign_api_key = config.ign.api_key.as_deref().unwrap_or("");
    let os_api_key = config.ordnance_survey.api_key.as_deref().unwrap_or("");

    format!(
        r#"[source]
; Map source used by default:
;   ign             - IGN Géoportail, France (requires API key)
;   ign_spain       - Instituto Geográfico Nacional, Spain (free)
;   usgs            - USGS National Map topo, United States (free)
;   osm             - OpenStreetMap, worldwide (free)
;   swiss_topo      - swisstopo national map, Switzerland (free)
;   ordnance_survey - Ordnance Survey Maps API, Great Britain (requires API key)
type = {}

[ign]
; Géoportail API key (only required when type = ign)
api_key = {}
; Layer: scan_express_standard, plan_ign, cartes_ign, satellite
layer = {}

[ordnance_survey]
; OS Data Hub project API key (only required when type = ordnance_survey)
api_key = {}

[download]
; Timeout in seconds for one HTTP request (default: 10)
timeout = {}
; Timeout in seconds for establishing a connection (default: 5)
connect_timeout = {}
; Attempts per tile, the first one included; 1 disables retries (default: 3)
max_attempts = {}
; Backoff step in milliseconds; the n-th retry waits n times this (default: 200)
retry_delay_ms = {}
"#,
        config.source.source.key(),
        ign_api_key,
        config.ign.layer.key(),
        os_api_key,
        config.download.timeout,
        config.download.connect_timeout,
        config.download.max_attempts,
        config.download.retry_delay_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_written() {
        let content = to_config_string(&ConfigFile::default());

        for section in ["[source]", "[ign]", "[ordnance_survey]", "[download]"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("type = osm\n"));
        assert!(content.contains("layer = scan_express_standard\n"));
        assert!(content.contains("retry_delay_ms = 200\n"));
    }

    #[test]
    fn test_keys_written() {
        let mut config = ConfigFile::default();
        config.ign.api_key = Some("ign-key".to_string());

        let content = to_config_string(&config);
        assert!(content.contains("api_key = ign-key\n"));
    }
}
