use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Address, GroupName};

/// The output mapping, group name to ordered list of addresses.
///
/// Groups appear in the order they were first pushed; addresses within a
/// group keep encounter order. Duplicate addresses are preserved, never
/// collapsed: two hosts sharing a static field value both land in the same
/// group with their own entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    groups: IndexMap<GroupName, Vec<Address>>,
}

impl Inventory {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }

    /// Append `address` to `group`, creating the group on first use.
    pub fn push(&mut self, group: impl Into<GroupName>, address: impl Into<Address>) {
        self.groups.entry(group.into()).or_default().push(address.into());
    }

    /// Addresses of a group, in encounter order.
    pub fn get(&self, group: &str) -> Option<&[Address]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupName, &[Address])> {
        self.groups.iter().map(|(group, addrs)| (group, addrs.as_slice()))
    }

    /// Compact JSON rendering for external tool consumption.
    ///
    /// Programmatic callers should use the mapping directly instead.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
