use tracing::debug;

use muster_model::{Address, HostRecord, Inventory};

use crate::errors::ClassifyError;
use crate::rules::{BoundRules, Rule, RuleContext};
use crate::template::interpolate;

/// Per-instance grouping configuration.
///
/// Every strategy list is explicit; there are no shared defaults. An empty
/// list simply contributes no groups.
#[derive(Debug, Default)]
pub struct ClassifierConfig {
    /// Field whose value is the host address. Required for classification.
    pub address_field: Option<String>,
    /// Fields whose raw values become group names.
    pub static_fields: Vec<String>,
    /// `{field}` templates whose interpolations become group names.
    pub template_fields: Vec<String>,
    /// Computed grouping rules, applied after static and template grouping.
    pub dynamic_rules: Vec<Rule>,
}

/// Classification engine: derives a group-to-addresses mapping from host
/// records.
///
/// Per-host gaps (a missing static field, a template referencing an absent
/// field, a rule returning nothing) are skipped silently; only structural
/// misconfiguration fails, and it fails before any host is processed.
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify `hosts` into an [`Inventory`], resolving bound rule names
    /// against `bound`.
    ///
    /// Output is deterministic: identical hosts and configuration yield a
    /// byte-identical JSON rendering.
    pub fn classify(
        &self,
        hosts: &[HostRecord],
        bound: &dyn BoundRules,
    ) -> Result<Inventory, ClassifyError> {
        let address_field = match self.config.address_field.as_deref() {
            Some(field) if !field.is_empty() => field,
            _ => return Err(ClassifyError::MissingAddressField),
        };

        // Resolve bound rule names up front so a bad name never produces a
        // partial mapping.
        for rule in &self.config.dynamic_rules {
            if let Rule::Bound(name) = rule
                && !bound.supports(name)
            {
                return Err(ClassifyError::UnknownBoundRule(name.clone()));
            }
        }

        let ctx = RuleContext { address_field };
        let mut inventory = Inventory::new();

        for host in hosts {
            let Some(address) = ctx.address(host) else {
                debug!(address_field, "host carries no address field, skipping");
                continue;
            };

            self.apply_static(host, &address, &mut inventory);
            self.apply_templates(host, &address, &mut inventory);
            self.apply_dynamic(host, &ctx, bound, &mut inventory);
        }

        Ok(inventory)
    }

    fn apply_static(&self, host: &HostRecord, address: &Address, inventory: &mut Inventory) {
        for field in &self.config.static_fields {
            match host.field_str(field) {
                Some(group) => inventory.push(group, address.clone()),
                None => debug!(%field, "static field absent on host, skipping"),
            }
        }
    }

    fn apply_templates(&self, host: &HostRecord, address: &Address, inventory: &mut Inventory) {
        for template in &self.config.template_fields {
            match interpolate(template, host) {
                Some(group) => inventory.push(group, address.clone()),
                None => debug!(%template, "template not renderable for host, skipping"),
            }
        }
    }

    fn apply_dynamic(
        &self,
        host: &HostRecord,
        ctx: &RuleContext<'_>,
        bound: &dyn BoundRules,
        inventory: &mut Inventory,
    ) {
        for rule in &self.config.dynamic_rules {
            let grouping = match rule {
                Rule::External(f) => f(ctx, host),
                Rule::Bound(name) => bound.invoke(name, ctx, host),
            };
            if let Some((group, address)) = grouping {
                inventory.push(group, address);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Grouping, NoBoundRules};
    use serde_json::json;

    fn hosts() -> Vec<HostRecord> {
        vec![
            HostRecord::from_value(json!({
                "name": "sedbpg01",
                "ip_address": "1.2.3.4",
                "region_id": 6,
                "region_name": "sgp1",
                "hostname": "generated-1-2-3-4.example.net",
            }))
            .unwrap(),
            HostRecord::from_value(json!({
                "name": "sedbpg02",
                "ip_address": "1.2.3.5",
                "region_id": 6,
                "region_name": "sgp1",
                "hostname": "generated-1-2-3-5.example.net",
            }))
            .unwrap(),
        ]
    }

    fn classifier(config: ClassifierConfig) -> Classifier {
        Classifier::new(ClassifierConfig {
            address_field: Some("ip_address".to_string()),
            ..config
        })
    }

    #[test]
    fn static_field_groups_by_raw_value() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.get("sedbpg01"), Some(&["1.2.3.4".to_string()][..]));
        assert_eq!(inventory.get("sedbpg02"), Some(&["1.2.3.5".to_string()][..]));
    }

    #[test]
    fn several_static_fields_produce_several_groups() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string(), "hostname".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert_eq!(inventory.len(), 4);
        assert_eq!(
            inventory.get("generated-1-2-3-4.example.net"),
            Some(&["1.2.3.4".to_string()][..])
        );
    }

    #[test]
    fn hosts_sharing_a_value_share_a_group() {
        let shared: Vec<HostRecord> = vec![
            HostRecord::from_value(json!({"name": "sedbpg", "ip_address": "1.2.3.4"})).unwrap(),
            HostRecord::from_value(json!({"name": "sedbpg", "ip_address": "1.2.3.5"})).unwrap(),
        ];
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&shared, &NoBoundRules).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.get("sedbpg"),
            Some(&["1.2.3.4".to_string(), "1.2.3.5".to_string()][..])
        );
    }

    #[test]
    fn absent_static_field_is_tolerated() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["fizzbang".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn template_groups_interpolate_fields() {
        let classifier = classifier(ClassifierConfig {
            template_fields: vec!["region_{region_id}".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert_eq!(
            inventory.get("region_6"),
            Some(&["1.2.3.4".to_string(), "1.2.3.5".to_string()][..])
        );
    }

    #[test]
    fn template_referencing_absent_field_is_tolerated() {
        let classifier = classifier(ClassifierConfig {
            template_fields: vec!["size_{size_id}".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn external_rule_contributes_groupings() {
        let classifier = classifier(ClassifierConfig {
            dynamic_rules: vec![Rule::external(|ctx, host| {
                let name = host.field_str("name")?;
                Some((name[0..2].to_string(), ctx.address(host)?))
            })],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert_eq!(
            inventory.get("se"),
            Some(&["1.2.3.4".to_string(), "1.2.3.5".to_string()][..])
        );
    }

    #[test]
    fn external_rule_returning_none_contributes_nothing() {
        let classifier = classifier(ClassifierConfig {
            dynamic_rules: vec![Rule::external(|_, _| None)],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert!(inventory.is_empty());
    }

    struct RegionRules;

    impl BoundRules for RegionRules {
        fn supports(&self, name: &str) -> bool {
            name == "region_name"
        }

        fn invoke(&self, name: &str, ctx: &RuleContext<'_>, host: &HostRecord) -> Option<Grouping> {
            match name {
                "region_name" => Some((host.field_str("region_name")?, ctx.address(host)?)),
                _ => None,
            }
        }
    }

    #[test]
    fn bound_rule_resolves_through_rule_set() {
        let classifier = classifier(ClassifierConfig {
            dynamic_rules: vec![Rule::bound("region_name")],
            ..Default::default()
        });

        let inventory = classifier.classify(&hosts(), &RegionRules).unwrap();
        assert_eq!(
            inventory.get("sgp1"),
            Some(&["1.2.3.4".to_string(), "1.2.3.5".to_string()][..])
        );
    }

    #[test]
    fn unknown_bound_rule_fails_before_any_host() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            dynamic_rules: vec![Rule::bound("no_such_rule")],
            ..Default::default()
        });

        let err = classifier.classify(&hosts(), &RegionRules).unwrap_err();
        assert!(matches!(err, ClassifyError::UnknownBoundRule(name) if name == "no_such_rule"));
    }

    #[test]
    fn missing_address_field_fails_before_any_host() {
        let classifier = Classifier::new(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            ..Default::default()
        });

        let err = classifier.classify(&hosts(), &NoBoundRules).unwrap_err();
        assert!(matches!(err, ClassifyError::MissingAddressField));
    }

    #[test]
    fn empty_address_field_is_treated_as_missing() {
        let classifier = Classifier::new(ClassifierConfig {
            address_field: Some(String::new()),
            ..Default::default()
        });

        let err = classifier.classify(&hosts(), &NoBoundRules).unwrap_err();
        assert!(matches!(err, ClassifyError::MissingAddressField));
    }

    #[test]
    fn host_without_address_contributes_nothing() {
        let mixed: Vec<HostRecord> = vec![
            HostRecord::from_value(json!({"name": "lonely"})).unwrap(),
            HostRecord::from_value(json!({"name": "ok", "ip_address": "1.2.3.4"})).unwrap(),
        ];
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&mixed, &NoBoundRules).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get("ok"), Some(&["1.2.3.4".to_string()][..]));
    }

    #[test]
    fn no_hosts_yield_empty_inventory() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string()],
            ..Default::default()
        });

        let inventory = classifier.classify(&[], &NoBoundRules).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = classifier(ClassifierConfig {
            static_fields: vec!["name".to_string(), "hostname".to_string()],
            template_fields: vec!["region_{region_id}".to_string()],
            ..Default::default()
        });

        let first = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        let second = classifier.classify(&hosts(), &NoBoundRules).unwrap();
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
