//! Provider factory.
//!
//! The only place where URL builders, coverage tables and fetchers are
//! wired together. Callers ask for a map source and get back a ready
//! [`TileStreamProvider`] or a configuration error.

use tracing::info;

use super::bounds::BoundsFilter;
use super::http::{HttpTileFetcher, TileFetcher};
use super::ign::{self, IgnUrlBuilder};
use super::ign_spain::{IgnSpainUrlBuilder, IGN_SPAIN_BOUNDS};
use super::ordnance_survey::{OrdnanceSurveyUrlBuilder, ORDNANCE_SURVEY_BOUNDS};
use super::osm::OsmUrlBuilder;
use super::retry::RetryPolicy;
use super::source::{MapSource, MapSourceConfig};
use super::stream::TileStreamProvider;
use super::swiss::{SwissTopoUrlBuilder, SWISS_TOPO_BOUNDS};
use super::types::ProviderError;
use super::url::UrlTileBuilder;
use super::usgs::{UsgsUrlBuilder, USGS_BOUNDS};

/// Creates providers that share one fetcher and one retry policy.
///
/// # Example
///
/// ```
/// use tilestream::provider::{
///     HttpTileFetcher, IgnLayer, MapSource, MapSourceConfig, ProviderFactory, RetryPolicy,
/// };
///
/// let factory = ProviderFactory::new(HttpTileFetcher::new().unwrap(), RetryPolicy::default());
///
/// let provider = factory
///     .create(MapSource::Ign, &MapSourceConfig::ign("YOUR_API_KEY", IgnLayer::PlanIgn))
///     .unwrap();
/// assert_eq!(provider.max_zoom(), 17);
///
/// // Missing credentials are rejected up front
/// assert!(factory
///     .create(MapSource::OrdnanceSurvey, &MapSourceConfig::ordnance_survey(""))
///     .is_err());
/// ```
pub struct ProviderFactory<F = HttpTileFetcher> {
    fetcher: F,
    retry_policy: RetryPolicy,
}

impl ProviderFactory<HttpTileFetcher> {
    /// Creates a factory with the default HTTP client and retry policy.
    pub fn with_defaults() -> Result<Self, ProviderError> {
        Ok(Self::new(HttpTileFetcher::new()?, RetryPolicy::default()))
    }
}

impl<F: TileFetcher + Clone> ProviderFactory<F> {
    /// Creates a factory.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetcher cloned into every provider (cheap for
    ///   [`HttpTileFetcher`], which shares its connection pool)
    /// * `retry_policy` - Policy applied to transient failures
    pub fn new(fetcher: F, retry_policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            retry_policy,
        }
    }

    /// Returns the retry policy given to new providers.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Creates the provider for `source`.
    ///
    /// Performs no network I/O.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::ConfigMismatch`] if `config` is for another source
    /// - [`ProviderError::MissingApiKey`] if a required key is empty or blank
    pub fn create(
        &self,
        source: MapSource,
        config: &MapSourceConfig,
    ) -> Result<TileStreamProvider<F>, ProviderError> {
        if config.source() != source {
            return Err(ProviderError::ConfigMismatch {
                expected: source,
                actual: config.source(),
            });
        }

        let urls = match config {
            MapSourceConfig::Ign { api_key, layer } => {
                UrlTileBuilder::Ign(IgnUrlBuilder::new(require_api_key(source, api_key)?, *layer))
            }
            MapSourceConfig::IgnSpain => UrlTileBuilder::IgnSpain(IgnSpainUrlBuilder),
            MapSourceConfig::Usgs => UrlTileBuilder::Usgs(UsgsUrlBuilder),
            MapSourceConfig::OpenStreetMap => UrlTileBuilder::OpenStreetMap(OsmUrlBuilder),
            MapSourceConfig::SwissTopo => UrlTileBuilder::SwissTopo(SwissTopoUrlBuilder),
            MapSourceConfig::OrdnanceSurvey { api_key } => UrlTileBuilder::OrdnanceSurvey(
                OrdnanceSurveyUrlBuilder::new(require_api_key(source, api_key)?),
            ),
        };
        let bounds = coverage_for(config);

        let provider = TileStreamProvider::new(
            source,
            urls,
            bounds,
            self.fetcher.clone(),
            self.retry_policy.clone(),
        );

        info!(
            source = source.key(),
            max_zoom = provider.max_zoom(),
            bounded = bounds.is_some(),
            max_attempts = self.retry_policy.max_attempts(),
            "Created tile provider"
        );

        Ok(provider)
    }

    /// Creates the provider for whichever source `config` belongs to.
    pub fn create_from_config(
        &self,
        config: &MapSourceConfig,
    ) -> Result<TileStreamProvider<F>, ProviderError> {
        self.create(config.source(), config)
    }
}

/// Returns the coverage table a provider for `config` uses.
///
/// `None` means the source serves every address. Credentials in `config`
/// are not inspected.
pub fn coverage_for(config: &MapSourceConfig) -> Option<BoundsFilter> {
    match config {
        MapSourceConfig::Ign { layer, .. } => Some(ign::bounds_for(*layer)),
        MapSourceConfig::IgnSpain => Some(IGN_SPAIN_BOUNDS),
        MapSourceConfig::Usgs => Some(USGS_BOUNDS),
        MapSourceConfig::OpenStreetMap => None,
        MapSourceConfig::SwissTopo => Some(SWISS_TOPO_BOUNDS),
        MapSourceConfig::OrdnanceSurvey { .. } => Some(ORDNANCE_SURVEY_BOUNDS),
    }
}

fn require_api_key(source: MapSource, api_key: &str) -> Result<&str, ProviderError> {
    let trimmed = api_key.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::MissingApiKey { map_source: source });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileAddress;
    use crate::provider::{IgnLayer, MockTileFetcher};

    fn factory() -> ProviderFactory<MockTileFetcher> {
        ProviderFactory::new(MockTileFetcher::ok(vec![1, 2, 3]), RetryPolicy::None)
    }

    fn config_for(source: MapSource) -> MapSourceConfig {
        match source {
            MapSource::Ign => MapSourceConfig::ign("ign-key", IgnLayer::default()),
            MapSource::IgnSpain => MapSourceConfig::IgnSpain,
            MapSource::Usgs => MapSourceConfig::Usgs,
            MapSource::OpenStreetMap => MapSourceConfig::OpenStreetMap,
            MapSource::SwissTopo => MapSourceConfig::SwissTopo,
            MapSource::OrdnanceSurvey => MapSourceConfig::ordnance_survey("os-key"),
        }
    }

    #[test]
    fn test_creates_every_source() {
        let factory = factory();
        for source in MapSource::ALL {
            let provider = factory.create(source, &config_for(source)).unwrap();
            assert_eq!(provider.source(), source);
            assert_eq!(provider.name(), source.name());
        }
    }

    #[test]
    fn test_max_zoom_per_source() {
        let factory = factory();
        let max_zoom = |source| {
            factory
                .create(source, &config_for(source))
                .unwrap()
                .max_zoom()
        };

        assert_eq!(max_zoom(MapSource::Ign), 17);
        assert_eq!(max_zoom(MapSource::IgnSpain), 17);
        assert_eq!(max_zoom(MapSource::Usgs), 16);
        assert_eq!(max_zoom(MapSource::OpenStreetMap), crate::coord::MAX_ZOOM);
        assert_eq!(max_zoom(MapSource::SwissTopo), 17);
        assert_eq!(max_zoom(MapSource::OrdnanceSurvey), 16);
    }

    #[test]
    fn test_ign_satellite_goes_deeper() {
        let provider = factory()
            .create(
                MapSource::Ign,
                &MapSourceConfig::ign("k", IgnLayer::Satellite),
            )
            .unwrap();
        assert_eq!(provider.max_zoom(), 19);
    }

    #[test]
    fn test_config_mismatch() {
        let result = factory().create(MapSource::Usgs, &MapSourceConfig::SwissTopo);
        assert_eq!(
            result.err(),
            Some(ProviderError::ConfigMismatch {
                expected: MapSource::Usgs,
                actual: MapSource::SwissTopo,
            })
        );
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let factory = factory();

        let result = factory.create(MapSource::Ign, &MapSourceConfig::ign("", IgnLayer::PlanIgn));
        assert_eq!(
            result.err(),
            Some(ProviderError::MissingApiKey {
                map_source: MapSource::Ign
            })
        );

        let result = factory.create(
            MapSource::OrdnanceSurvey,
            &MapSourceConfig::ordnance_survey("   "),
        );
        assert_eq!(
            result.err(),
            Some(ProviderError::MissingApiKey {
                map_source: MapSource::OrdnanceSurvey
            })
        );
    }

    #[test]
    fn test_creation_makes_no_request() {
        let fetcher = MockTileFetcher::ok(vec![]);
        let factory = ProviderFactory::new(fetcher.clone(), RetryPolicy::default());

        for source in MapSource::ALL {
            factory.create(source, &config_for(source)).unwrap();
        }
        assert_eq!(fetcher.call_count(), 0);
    }

    #[test]
    fn test_create_from_config() {
        let provider = factory()
            .create_from_config(&MapSourceConfig::ordnance_survey(" os-key "))
            .unwrap();

        assert_eq!(provider.source(), MapSource::OrdnanceSurvey);
        assert!(provider
            .tile_url(TileAddress::new(7, 40, 62))
            .starts_with("https://api.os.uk/maps/raster/v1/wmts?key=os-key&"));
    }

    #[test]
    fn test_retry_policy_is_passed_through() {
        let policy = RetryPolicy::fixed(5, std::time::Duration::from_millis(10));
        let factory = ProviderFactory::new(MockTileFetcher::ok(vec![]), policy.clone());

        let provider = factory
            .create(MapSource::Usgs, &MapSourceConfig::Usgs)
            .unwrap();
        assert_eq!(provider.retry_policy(), &policy);
        assert_eq!(factory.retry_policy(), &policy);
    }

    #[test]
    fn test_coverage_ignores_credentials() {
        let bounds = coverage_for(&MapSourceConfig::ordnance_survey("")).unwrap();
        assert_eq!(bounds.min_zoom(), 7);
        assert_eq!(bounds.max_zoom(), 16);

        assert!(coverage_for(&MapSourceConfig::OpenStreetMap).is_none());
        assert_eq!(
            coverage_for(&MapSourceConfig::ign("", IgnLayer::Satellite))
                .unwrap()
                .max_zoom(),
            19
        );
    }

    #[tokio::test]
    async fn test_created_provider_filters_before_fetching() {
        let fetcher = MockTileFetcher::ok(vec![9]);
        let factory = ProviderFactory::new(fetcher.clone(), RetryPolicy::None);
        let provider = factory
            .create(MapSource::SwissTopo, &MapSourceConfig::SwissTopo)
            .unwrap();

        assert!(provider.get_tile_stream(3, 0, 0).await.is_out_of_bounds());
        assert_eq!(fetcher.call_count(), 0);

        assert!(provider.get_tile_stream(3, 2, 4).await.is_stream());
        assert_eq!(fetcher.call_count(), 1);
    }
}
