use std::env;

/// Environment-backed settings source.
///
/// A logical key maps to `PREFIX_UPPERKEY`: prefix `DO` and key `client_id`
/// look up `DO_CLIENT_ID`. An unset variable is a normal absent result.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    prefix: String,
}

impl EnvSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok()
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.to_uppercase())
    }
}
