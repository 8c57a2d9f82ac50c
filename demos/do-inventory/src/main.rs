use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use muster_digitalocean::{
    DigitalOceanConfig, DigitalOceanInventory, DropletApi, ProviderError,
};
use muster_model::HostRecord;

const DROPLETS: &str = include_str!("../fixtures/droplets.json");
const REGIONS: &str = include_str!("../fixtures/regions.json");
const IMAGES: &str = include_str!("../fixtures/images.json");
const SIZES: &str = include_str!("../fixtures/sizes.json");
const SSH_KEYS: &str = include_str!("../fixtures/ssh_keys.json");

/// Provider stand-in serving bundled fixture records: the real client is a
/// network concern and lives outside the SDK.
struct FixtureApi;

fn records(raw: &str) -> Result<Vec<HostRecord>, ProviderError> {
    serde_json::from_str(raw).map_err(|e| ProviderError(e.to_string()))
}

impl DropletApi for FixtureApi {
    fn droplets(&self) -> Result<Vec<HostRecord>, ProviderError> {
        records(DROPLETS)
    }

    fn regions(&self) -> Result<Vec<HostRecord>, ProviderError> {
        records(REGIONS)
    }

    fn images(&self) -> Result<Vec<HostRecord>, ProviderError> {
        records(IMAGES)
    }

    fn sizes(&self) -> Result<Vec<HostRecord>, ProviderError> {
        records(SIZES)
    }

    fn ssh_keys(&self) -> Result<Vec<HostRecord>, ProviderError> {
        records(SSH_KEYS)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DigitalOceanConfig {
        settings_file: env::var("DO_SETTINGS_FILE")
            .unwrap_or_else(|_| "digital_ocean.ini".to_string())
            .into(),
        ..Default::default()
    };
    info!(
        droplet_slot = %config.droplet_slot.display(),
        lookup_slot = %config.lookup_slot.display(),
        "building inventory from fixture droplets"
    );

    let mut inventory = DigitalOceanInventory::new(FixtureApi, config)?;
    println!("{}", inventory.inventory_json()?);

    Ok(())
}
