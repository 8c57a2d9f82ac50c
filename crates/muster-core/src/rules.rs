use std::fmt;

use muster_model::{Address, GroupName, HostRecord};

/// A single dynamic grouping outcome: `(group, address)`.
pub type Grouping = (GroupName, Address);

type ExternalFn = Box<dyn Fn(&RuleContext<'_>, &HostRecord) -> Option<Grouping> + Send + Sync>;

/// A dynamic grouping rule.
///
/// `External` carries a free function over a host; `Bound` names a rule
/// resolved against the caller's [`BoundRules`] implementation. Bound names
/// are checked once before any host is processed, so an unknown name fails
/// the whole run instead of surfacing mid-classification.
pub enum Rule {
    External(ExternalFn),
    Bound(String),
}

impl Rule {
    /// Wrap a free function as a rule.
    pub fn external<F>(f: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &HostRecord) -> Option<Grouping> + Send + Sync + 'static,
    {
        Rule::External(Box::new(f))
    }

    /// Reference a named rule on the caller's [`BoundRules`] implementation.
    pub fn bound(name: impl Into<String>) -> Self {
        Rule::Bound(name.into())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::External(_) => f.write_str("Rule::External(..)"),
            Rule::Bound(name) => write!(f, "Rule::Bound({name:?})"),
        }
    }
}

/// Context handed to dynamic rules during classification.
pub struct RuleContext<'a> {
    pub(crate) address_field: &'a str,
}

impl RuleContext<'_> {
    /// Resolve the configured address of a host, if the host carries one.
    pub fn address(&self, host: &HostRecord) -> Option<Address> {
        host.field_str(self.address_field)
    }
}

/// Named rules resolvable by the classification engine.
///
/// Implemented by domain adapters whose rules need state the engine does not
/// own, such as auxiliary lookup tables.
pub trait BoundRules {
    /// Whether `name` resolves to a rule.
    fn supports(&self, name: &str) -> bool;

    /// Invoke the named rule for one host. `None` contributes nothing.
    fn invoke(&self, name: &str, ctx: &RuleContext<'_>, host: &HostRecord) -> Option<Grouping>;
}

/// Empty rule set for classifiers that use no bound rules.
pub struct NoBoundRules;

impl BoundRules for NoBoundRules {
    fn supports(&self, _name: &str) -> bool {
        false
    }

    fn invoke(&self, _name: &str, _ctx: &RuleContext<'_>, _host: &HostRecord) -> Option<Grouping> {
        None
    }
}
