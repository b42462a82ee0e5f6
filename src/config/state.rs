// Application state module
// Everything a connection needs, built once at startup and shared read-only

use std::sync::Arc;

use super::types::{Config, ContentConfig};
use crate::app::BrochureHttpApplication;
use crate::domain::{Basics, BrochureApplication};
use crate::error::StartupError;
use crate::fetchers::{
    contact_method_fetcher, cover_section_fetcher, enterprise_fetcher, FetchError, ValueFetcher,
};
use crate::preprocess::PreprocessorChain;

/// Application state
pub struct AppState {
    pub config: Config,
    pub application: BrochureHttpApplication,
}

impl AppState {
    pub const fn new(config: Config, application: BrochureHttpApplication) -> Self {
        Self {
            config,
            application,
        }
    }

    /// Fetch the brochure content, load the favicon and assemble the request pipeline
    ///
    /// Any failure here must stop the process before it starts listening.
    pub async fn build(config: Config) -> Result<Self, StartupError> {
        let domain = load_brochure(&config.content)?;
        let preprocessors = PreprocessorChain::from_config(&config).await?;
        tracing::info!(preprocessors = ?preprocessors.names(), "request pipeline ready");

        let application =
            BrochureHttpApplication::new(Arc::new(domain)).with_preprocessors(preprocessors);
        Ok(Self::new(config, application))
    }
}

/// Read enterprise, contact method and cover section from their configured sources
///
/// Enterprise and contact method are required; an unset cover section leaves the cover
/// page with the basics only.
pub fn load_brochure(content: &ContentConfig) -> Result<BrochureApplication, FetchError> {
    let enterprise = enterprise_fetcher(&content.enterprise_key).fetch()?;
    let contact_method = contact_method_fetcher(&content.contact_method_key).fetch()?;
    let cover_section = cover_section_fetcher(&content.cover_section_key).fetch_optional()?;

    if cover_section.is_none() {
        tracing::info!(key = %content.cover_section_key, "no cover section configured");
    }
    if contact_method.is_none() {
        tracing::warn!(
            key = %content.contact_method_key,
            "contact method type not recognized, pages will show none"
        );
    }

    Ok(BrochureApplication::new(
        Basics {
            enterprise,
            contact_method,
        },
        cover_section,
    ))
}
