use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use muster_model::HostRecord;

use crate::api::{DropletApi, ProviderError};

/// Auxiliary lookup tables, each keyed by stringified numeric id.
///
/// The keys are strings because the persisted cache format is JSON and JSON
/// object keys are always strings. The whole bundle caches as one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    pub regions: HashMap<String, HostRecord>,
    pub images: HashMap<String, HostRecord>,
    pub sizes: HashMap<String, HostRecord>,
    pub ssh_keys: HashMap<String, HostRecord>,
}

impl LookupTables {
    /// Fetch every table through the provider contract.
    pub fn from_api(api: &impl DropletApi) -> Result<Self, ProviderError> {
        Ok(Self {
            regions: index_by_id(api.regions()?),
            images: index_by_id(api.images()?),
            sizes: index_by_id(api.sizes()?),
            ssh_keys: index_by_id(api.ssh_keys()?),
        })
    }
}

fn index_by_id(records: Vec<HostRecord>) -> HashMap<String, HostRecord> {
    records
        .into_iter()
        .filter_map(|record| match record.field_str("id") {
            Some(id) => Some((id, record)),
            None => {
                warn!("auxiliary record without id, dropping");
                None
            }
        })
        .collect()
}
