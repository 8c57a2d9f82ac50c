use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use muster_cache::FileCache;
use muster_config::Settings;
use muster_core::{
    BoundRules, Classifier, ClassifierConfig, Grouping, Rule, RuleContext, interpolate,
};
use muster_model::{HostRecord, Inventory};

use crate::api::DropletApi;
use crate::errors::DigitalOceanError;
use crate::lookup::LookupTables;

/// Droplet lists change often.
pub const DROPLET_TTL: Duration = Duration::from_secs(300);
/// Regions, images, sizes and keys change rarely.
pub const LOOKUP_TTL: Duration = Duration::from_secs(3600);

const SETTINGS_PREFIX: &str = "DO";
const SETTINGS_SECTION: &str = "digital_ocean";

/// File locations for the adapter: the settings file and the two cache slots.
#[derive(Debug, Clone)]
pub struct DigitalOceanConfig {
    pub settings_file: PathBuf,
    pub droplet_slot: PathBuf,
    pub lookup_slot: PathBuf,
}

impl Default for DigitalOceanConfig {
    fn default() -> Self {
        let tmp = env::temp_dir();
        Self {
            settings_file: PathBuf::from("digital_ocean.ini"),
            droplet_slot: tmp.join("muster-droplets-cache.json"),
            lookup_slot: tmp.join("muster-lookups-cache.json"),
        }
    }
}

/// Stock DigitalOcean grouping: one group per droplet id, name and hostname
/// list, template groups for region/status/size/image ids, and bound rules
/// resolving those ids to human-readable slugs.
pub fn default_grouping() -> ClassifierConfig {
    ClassifierConfig {
        address_field: Some("ip_address".to_string()),
        static_fields: vec![
            "id".to_string(),
            "name".to_string(),
            "hostnames".to_string(),
        ],
        template_fields: vec![
            "region_{region_id}".to_string(),
            "status_{status}".to_string(),
            "size_{size_id}".to_string(),
            "image_{image_id}".to_string(),
        ],
        dynamic_rules: vec![
            Rule::bound("region_name"),
            Rule::bound("size_name"),
            Rule::bound("image_name"),
        ],
    }
}

/// DigitalOcean inventory: settings resolution, cached fetching and
/// classification, wired together over a [`DropletApi`].
pub struct DigitalOceanInventory<A> {
    api: A,
    settings: Settings,
    droplets: FileCache<Vec<HostRecord>>,
    lookups: FileCache<LookupTables>,
    classifier: Classifier,
}

impl<A: DropletApi> DigitalOceanInventory<A> {
    /// Build the adapter with the stock grouping configuration.
    ///
    /// The droplet TTL honors the `cache_max_age` setting (seconds) when
    /// present; lookup tables always use [`LOOKUP_TTL`].
    pub fn new(api: A, config: DigitalOceanConfig) -> Result<Self, DigitalOceanError> {
        let settings = Settings::new(SETTINGS_PREFIX, SETTINGS_SECTION, &config.settings_file)?;

        let droplet_ttl = settings
            .get("cache_max_age")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DROPLET_TTL);
        debug!(ttl_secs = droplet_ttl.as_secs(), "droplet cache ttl resolved");

        Ok(Self {
            api,
            settings,
            droplets: FileCache::new(&config.droplet_slot, droplet_ttl),
            lookups: FileCache::new(&config.lookup_slot, LOOKUP_TTL),
            classifier: Classifier::new(default_grouping()),
        })
    }

    /// Replace the grouping configuration.
    pub fn with_grouping(mut self, grouping: ClassifierConfig) -> Self {
        self.classifier = Classifier::new(grouping);
        self
    }

    /// Merged settings view (environment over file), e.g. `client_id` and
    /// `api_key` for constructing the provider client.
    pub fn setting(&self, key: &str) -> Option<String> {
        self.settings.get(key)
    }

    /// Fetch (through the caches) and classify the current droplets.
    pub fn inventory(&mut self) -> Result<Inventory, DigitalOceanError> {
        let api = &self.api;
        let hosts = self.droplets.fetch(|| api.droplets())?;
        let tables = self.lookups.fetch(|| LookupTables::from_api(api))?;

        let rules = DropletRules { tables: &tables };
        Ok(self.classifier.classify(&hosts, &rules)?)
    }

    /// Compact JSON rendering of [`inventory`](Self::inventory), as consumed
    /// by orchestration tooling.
    pub fn inventory_json(&mut self) -> Result<String, DigitalOceanError> {
        Ok(self.inventory()?.to_json()?)
    }
}

/// Bound rules resolving id fields to display names via the lookup tables.
/// A lookup miss (unknown id) contributes nothing.
struct DropletRules<'a> {
    tables: &'a LookupTables,
}

impl DropletRules<'_> {
    fn lookup(
        &self,
        table: &HashMap<String, HostRecord>,
        ctx: &RuleContext<'_>,
        host: &HostRecord,
        find_key: &str,
        display: &str,
    ) -> Option<Grouping> {
        let datum = table.get(&host.field_str(find_key)?)?;
        Some((interpolate(display, datum)?, ctx.address(host)?))
    }
}

impl BoundRules for DropletRules<'_> {
    fn supports(&self, name: &str) -> bool {
        matches!(name, "region_name" | "size_name" | "image_name")
    }

    fn invoke(&self, name: &str, ctx: &RuleContext<'_>, host: &HostRecord) -> Option<Grouping> {
        match name {
            "region_name" => self.lookup(&self.tables.regions, ctx, host, "region_id", "region_{slug}"),
            "size_name" => self.lookup(&self.tables.sizes, ctx, host, "size_id", "size_{slug}"),
            "image_name" => self.lookup(&self.tables.images, ctx, host, "image_id", "image_{slug}"),
            _ => None,
        }
    }
}
