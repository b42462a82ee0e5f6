//! Value fetchers module
//!
//! Reads JSON-encoded brochure content from named external sources.
//! Everything here runs once at startup; any failure is fatal.

mod environment;

pub use environment::{EnvironmentVariableFetcher, Lookup};

use crate::domain::{ContactMethod, ContactMethodType, Enterprise, Section};
use serde::Deserialize;

/// Default variable holding `{"name": ...}`
pub const ENTERPRISE_KEY: &str = "BROCHURE_ENTERPRISE";
/// Default variable holding `{"contact_method_type": ..., "value": ...}`
pub const CONTACT_METHOD_KEY: &str = "BROCHURE_CONTACT_METHOD";
/// Default variable holding `{"title": ..., "body": ...}`; optional
pub const COVER_SECTION_KEY: &str = "BROCHURE_COVER_SECTION";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("required value '{key}' is not set")]
    Missing { key: String },

    #[error("value '{key}' is not valid JSON for its type: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ValueFetcher<T> {
    fn fetch(&self) -> Result<T, FetchError>;

    /// Like `fetch`, but an unset source yields `None`
    fn fetch_optional(&self) -> Result<Option<T>, FetchError> {
        match self.fetch() {
            Ok(value) => Ok(Some(value)),
            Err(FetchError::Missing { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Raw contact method as stored in the source
#[derive(Debug, Deserialize)]
struct RawContactMethod {
    contact_method_type: String,
    value: String,
}

/// Unrecognized contact method types yield `None`, not an error
pub fn deserialize_contact_method(json: &str) -> Result<Option<ContactMethod>, serde_json::Error> {
    let raw: RawContactMethod = serde_json::from_str(json)?;
    Ok(
        ContactMethodType::parse(&raw.contact_method_type).map(|contact_method_type| {
            ContactMethod {
                contact_method_type,
                value: raw.value,
            }
        }),
    )
}

pub fn enterprise_fetcher(key: &str) -> EnvironmentVariableFetcher<Enterprise> {
    EnvironmentVariableFetcher::new(key, |json| serde_json::from_str(json))
}

pub fn contact_method_fetcher(key: &str) -> EnvironmentVariableFetcher<Option<ContactMethod>> {
    EnvironmentVariableFetcher::new(key, deserialize_contact_method)
}

pub fn cover_section_fetcher(key: &str) -> EnvironmentVariableFetcher<Section> {
    EnvironmentVariableFetcher::new(key, |json| serde_json::from_str(json))
}
