use thiserror::Error;

use muster_model::HostRecord;

/// Failure reported by the provider client.
#[derive(Debug, Error)]
#[error("provider request failed: {0}")]
pub struct ProviderError(pub String);

/// Data-fetch contract of the DigitalOcean client.
///
/// The SDK never performs network I/O itself; implementations hand over
/// already-fetched records. Auxiliary records (regions, images, sizes, ssh
/// keys) are expected to carry at least an `id` field.
pub trait DropletApi {
    fn droplets(&self) -> Result<Vec<HostRecord>, ProviderError>;
    fn regions(&self) -> Result<Vec<HostRecord>, ProviderError>;
    fn images(&self) -> Result<Vec<HostRecord>, ProviderError>;
    fn sizes(&self) -> Result<Vec<HostRecord>, ProviderError>;
    fn ssh_keys(&self) -> Result<Vec<HostRecord>, ProviderError>;
}
