//! Named configuration values resolved at call time.
//!
//! Components that depend on deployment-specific names (such as the backing
//! table) look them up through a [`ConfigProvider`] when they run, so the
//! same binary can target different tables without recompiling.

use std::collections::HashMap;

/// Name of the configuration value holding the products table name.
pub const PRODUCTS_TABLE_NAME: &str = "PRODUCTS_TABLE_NAME";

/// Source of named string configuration values.
pub trait ConfigProvider: Send + Sync {
    /// Returns the value for `name`, or `None` if it is not set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads configuration from the process environment.
///
/// Empty variables are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigProvider;

impl ConfigProvider for EnvConfigProvider {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// Configuration backed by an explicit map.
#[derive(Debug, Clone, Default)]
pub struct MapConfigProvider {
    values: HashMap<String, String>,
}

impl MapConfigProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value, returning the provider for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfigProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigProvider for MapConfigProvider {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_provider_returns_configured_values() {
        let config = MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, "foo");
        assert_eq!(config.get(PRODUCTS_TABLE_NAME).as_deref(), Some("foo"));
        assert!(config.get("MISSING").is_none());
    }

    #[test]
    fn map_provider_collects_from_pairs() {
        let config: MapConfigProvider = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(config.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn env_provider_misses_unset_variable() {
        assert!(EnvConfigProvider
            .get("PRODUCTS_CORE_TEST_SURELY_UNSET_VARIABLE")
            .is_none());
    }
}
