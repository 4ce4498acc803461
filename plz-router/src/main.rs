use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use plz_router::address::{AddressResolver, CityTable};
use plz_router::cache::CachedGeocoder;
use plz_router::config::ServerConfig;
use plz_router::geocode::{Geocoder, MockGeocoder, NominatimClient};
use plz_router::routing::{AssignmentRouter, ContactBook};
use plz_router::web::{AppState, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("plz_router=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;

    // Reference tables (fail fast if an override is broken)
    let cities = match &config.city_table {
        Some(path) => CityTable::from_path(path)?,
        None => CityTable::embedded()?,
    };
    info!(cities = cities.len(), "loaded city table");

    let contacts = match &config.contacts {
        Some(path) => ContactBook::from_path(path)?,
        None => ContactBook::embedded()?,
    };
    contacts.validate_rules()?;
    info!(contacts = contacts.len(), "loaded contacts");

    let cities = Arc::new(cities);
    let resolver = match build_geocoder(&config)? {
        Some(geocoder) => AddressResolver::new(cities, geocoder, config.resolver_config()),
        None => {
            warn!("geocoding disabled, unknown cities will not be resolved");
            AddressResolver::offline(cities)
        }
    };

    let state = AppState::new(resolver, AssignmentRouter::new(Arc::new(contacts)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "PLZ router listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /api/check_plz   - Assign a postal code");
    info!("  GET  /api/resolve     - Resolve an address to a postal code");
    info!("  GET  /api/lookup      - Resolve and assign in one call");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Pick the geocoding fallback: none, a canned file, or Nominatim behind a cache.
fn build_geocoder(config: &ServerConfig) -> Result<Option<Arc<dyn Geocoder>>, BoxError> {
    if config.geocoder_disabled {
        return Ok(None);
    }

    if let Some(path) = &config.geocoder_mock_file {
        let mock = MockGeocoder::from_file(path)?;
        info!(places = mock.len(), path = %path.display(), "using canned geocoder answers");
        return Ok(Some(Arc::new(mock)));
    }

    let nominatim = config.nominatim_config();
    info!(url = %nominatim.base_url, "geocoding unknown cities via Nominatim");
    let client = NominatimClient::new(nominatim)?;
    let cached = CachedGeocoder::new(client, &config.cache_config());
    Ok(Some(Arc::new(cached)))
}
