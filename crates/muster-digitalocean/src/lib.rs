mod api;
pub use api::{DropletApi, ProviderError};

mod lookup;
pub use lookup::LookupTables;

mod inventory;
pub use inventory::{DROPLET_TTL, LOOKUP_TTL};
pub use inventory::{DigitalOceanConfig, DigitalOceanInventory, default_grouping};

mod errors;
pub use errors::DigitalOceanError;
