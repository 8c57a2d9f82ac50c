mod host;
pub use host::HostRecord;

mod inventory;
pub use inventory::Inventory;

/// Name of a group (bucket) in the output mapping.
pub type GroupName = String;

/// Host address extracted from a record via the configured address field.
///
/// Addresses are opaque strings; they are neither validated nor deduplicated.
pub type Address = String;
