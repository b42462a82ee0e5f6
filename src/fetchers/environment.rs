// Environment variable fetcher
// Looks a value up by name and deserializes it

use std::sync::Arc;

use super::{FetchError, ValueFetcher};

/// Named-source lookup; the process environment by default
pub type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

type Deserializer<T> = fn(&str) -> Result<T, serde_json::Error>;

pub struct EnvironmentVariableFetcher<T> {
    key: String,
    deserializer: Deserializer<T>,
    lookup: Lookup,
}

impl<T> EnvironmentVariableFetcher<T> {
    pub fn new(key: &str, deserializer: Deserializer<T>) -> Self {
        Self {
            key: key.to_string(),
            deserializer,
            lookup: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Read from another source instead of the process environment
    #[must_use]
    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> ValueFetcher<T> for EnvironmentVariableFetcher<T> {
    fn fetch(&self) -> Result<T, FetchError> {
        let raw = (self.lookup)(&self.key).ok_or_else(|| FetchError::Missing {
            key: self.key.clone(),
        })?;

        (self.deserializer)(&raw).map_err(|source| FetchError::Malformed {
            key: self.key.clone(),
            source,
        })
    }
}
