//! This module provides the main entry point for aggregating environmental
//! snapshots. A query resolves a place identity (by name or coordinate),
//! then enriches it with elevation, climate classification and current
//! weather, and publishes one aggregated report per completed query.

use crate::enrichment::{
    fail_soft, ElevationSource, OpenElevationClient, OpenWeatherClient, WeatherSource,
};
use crate::error::ClimascopeError;
use crate::geocoding::{Geocoder, OpenWeatherGeocoder};
use crate::raster::RasterHandle;
use crate::types::coordinate::Coordinate;
use crate::types::report::{AggregatedReport, LocationIdentity, QueryOutcome};
use bon::bon;
use futures_util::join;
use log::{debug, info, warn};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The client for aggregated environmental snapshots.
///
/// One `Climascope` owns the geocoder, the two auxiliary fetchers and the
/// shared climate-raster handle. Queries run through
/// [`Climascope::query_by_name`] or [`Climascope::query_by_coordinate`];
/// at most one report is "active" at a time, and starting a new query
/// supersedes any query still in flight.
///
/// # Examples
///
/// ```no_run
/// use climascope::{Climascope, QueryOutcome};
///
/// # async fn run() -> Result<(), climascope::ClimascopeError> {
/// let client = Climascope::builder()
///     .api_key("<openweathermap api key>".to_string())
///     .build();
/// client
///     .load_raster("https://example.com/koppen_geiger_0p1.tif")
///     .await?;
///
/// if let QueryOutcome::Complete(report) = client.query_by_name("Ho Chi Minh City").await? {
///     println!(
///         "{}: {:?}",
///         report.identity.localized_name,
///         report.climate.map(|c| c.code)
///     );
/// }
/// # Ok(())
/// # }
/// ```
pub struct Climascope<G = OpenWeatherGeocoder, E = OpenElevationClient, W = OpenWeatherClient> {
    geocoder: G,
    elevation: E,
    weather: W,
    raster: RasterHandle,
    http: Client,
    seq: AtomicU64,
    active: Mutex<Option<AggregatedReport>>,
}

#[bon]
impl Climascope {
    /// Creates a client backed by the live OpenWeatherMap and
    /// Open-Elevation services.
    ///
    /// # Arguments
    ///
    /// * `.api_key(String)`: **Required.** OpenWeatherMap API key, used by
    ///   both geocoding and the current-weather fetcher.
    /// * `.http_client(reqwest::Client)`: Optional. A preconfigured HTTP
    ///   client shared by all services. Defaults to `Client::new()`.
    /// * `.raster(RasterHandle)`: Optional. An existing raster handle, for
    ///   sharing one loaded grid between clients. Defaults to an empty
    ///   handle.
    #[builder]
    pub fn new(api_key: String, http_client: Option<Client>, raster: Option<RasterHandle>) -> Self {
        let http = http_client.unwrap_or_default();
        Self {
            geocoder: OpenWeatherGeocoder::new(http.clone(), api_key.clone()),
            elevation: OpenElevationClient::new(http.clone()),
            weather: OpenWeatherClient::new(http.clone(), api_key),
            raster: raster.unwrap_or_default(),
            http,
            seq: AtomicU64::new(0),
            active: Mutex::new(None),
        }
    }

    /// Downloads and installs the climate raster for this session.
    ///
    /// Call once at startup. Queries issued before the load completes (or
    /// after a failed load) still run; their reports simply carry no climate
    /// class. The returned error is informational for the same reason:
    /// ignoring it degrades classification and nothing else.
    pub async fn load_raster(&self, url: &str) -> Result<(), ClimascopeError> {
        self.raster.load_from_url(&self.http, url).await.map_err(|e| {
            warn!("climate raster load failed, classification stays degraded: {}", e);
            ClimascopeError::from(e)
        })
    }
}

impl<G, E, W> Climascope<G, E, W>
where
    G: Geocoder,
    E: ElevationSource,
    W: WeatherSource,
{
    /// Creates a client from explicit providers.
    ///
    /// This is the seam for alternative backends and for tests; the builder
    /// on [`Climascope::new`] covers the common case.
    pub fn with_providers(geocoder: G, elevation: E, weather: W, raster: RasterHandle) -> Self {
        Self {
            geocoder,
            elevation,
            weather,
            raster,
            http: Client::new(),
            seq: AtomicU64::new(0),
            active: Mutex::new(None),
        }
    }

    /// Runs a query from user-entered text.
    ///
    /// The input is trimmed first; empty input is a no-op
    /// ([`QueryOutcome::Skipped`]), not an error. A name with no geocoding
    /// match fails with [`crate::GeocodingError::NotFound`] and produces no
    /// partial report. The previously active report is cleared as soon as
    /// the query starts, so a failed resolution leaves an explicitly empty
    /// state rather than reverting to the old report.
    pub async fn query_by_name(&self, input: &str) -> Result<QueryOutcome, ClimascopeError> {
        let name = input.trim();
        if name.is_empty() {
            debug!("ignoring empty place-name query");
            return Ok(QueryOutcome::Skipped);
        }
        let token = self.begin_query();
        debug!("query #{}: resolving place name {:?}", token, name);
        let identity = self.geocoder.by_name(name).await.map_err(|e| {
            info!("query #{} failed during resolution: {}", token, e);
            ClimascopeError::from(e)
        })?;
        self.enrich(token, identity).await
    }

    /// Runs a query from a raw coordinate, e.g. a map click.
    ///
    /// Always attempted; a coordinate with no known place name still
    /// completes, with the identity carrying the "Unknown place" sentinel.
    pub async fn query_by_coordinate(
        &self,
        coordinate: Coordinate,
    ) -> Result<QueryOutcome, ClimascopeError> {
        let token = self.begin_query();
        debug!("query #{}: resolving coordinate {}", token, coordinate);
        let identity = self.geocoder.by_coordinate(coordinate).await.map_err(|e| {
            info!("query #{} failed during resolution: {}", token, e);
            ClimascopeError::from(e)
        })?;
        self.enrich(token, identity).await
    }

    /// The currently displayed report, if any.
    pub fn active_report(&self) -> Option<AggregatedReport> {
        self.active_slot().clone()
    }

    /// The shared climate-raster handle.
    pub fn raster(&self) -> &RasterHandle {
        &self.raster
    }

    /// Claims the next query token and clears the active report.
    ///
    /// Must stay synchronous: the clear has to happen before the query's
    /// first await so a fast stale query can never render after a newer one.
    fn begin_query(&self) -> u64 {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.active_slot().take();
        token
    }

    /// Fans out the independent enrichments and assembles the report.
    async fn enrich(
        &self,
        token: u64,
        identity: LocationIdentity,
    ) -> Result<QueryOutcome, ClimascopeError> {
        let coordinate = identity.coordinate;
        debug!(
            "query #{}: enriching {} at {}",
            token, identity.localized_name, coordinate
        );

        let (elevation, weather) = join!(
            self.elevation.fetch_elevation(coordinate),
            self.weather.fetch_current_weather(coordinate),
        );
        let climate = self.raster.classify(coordinate);
        if climate.is_none() {
            debug!("query #{}: no climate class for {}", token, coordinate);
        }

        let report = AggregatedReport {
            coordinate,
            identity,
            elevation: fail_soft("elevation", elevation),
            climate,
            weather: fail_soft("current weather", weather),
        };
        Ok(self.publish(token, report))
    }

    /// Publishes a finished report, unless the query has been superseded.
    ///
    /// The token comparison happens under the slot lock, so a stale query
    /// can never overwrite a newer query's report.
    fn publish(&self, token: u64, report: AggregatedReport) -> QueryOutcome {
        let mut slot = self.active_slot();
        if self.seq.load(Ordering::SeqCst) != token {
            info!("query #{} superseded, discarding its report", token);
            return QueryOutcome::Superseded;
        }
        info!(
            "query #{} complete for {}",
            token, report.identity.localized_name
        );
        *slot = Some(report.clone());
        QueryOutcome::Complete(report)
    }

    fn active_slot(&self) -> MutexGuard<'_, Option<AggregatedReport>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
