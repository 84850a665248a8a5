//! Service wiring for CLI commands

use std::sync::Arc;

use anyhow::Context as _;
use application::{
    ErrorSlot, FacetTitles, FeedbackService, FetchPort, KeyValueStorePort, PreferencesService,
    SearchService,
};
use infrastructure::{
    AppConfig, FeedbackAdapter, FetchCache, JsonFileStore, ReqwestTransport,
};
use integration_navigation::{HttpNavigationClient, NavigationClient};
use tracing::debug;

/// Everything a command may need, built once from the configuration
pub struct Context {
    pub config: AppConfig,
    pub errors: Arc<ErrorSlot>,
    pub client: Arc<dyn NavigationClient>,
    pub cache: Arc<FetchCache>,
    pub store: Arc<dyn KeyValueStorePort>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("api", &self.config.api.base_url)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let errors = ErrorSlot::shared();
        let client = Arc::new(
            HttpNavigationClient::new(&config.api).context("building API client")?,
        );
        let transport =
            Arc::new(ReqwestTransport::new(&config.api).context("building HTTP transport")?);
        let cache = Arc::new(FetchCache::with_config(
            transport,
            Arc::clone(&errors),
            &config.cache,
        ));
        let store = Arc::new(
            JsonFileStore::open(&config.storage.state_file).context("opening state file")?,
        );

        debug!(
            api = %config.api.base_url,
            state = %config.storage.state_file.display(),
            "CLI context ready"
        );

        Ok(Self {
            config,
            errors,
            client,
            cache,
            store,
        })
    }

    pub fn preferences(&self) -> PreferencesService {
        PreferencesService::new(Arc::clone(&self.store))
    }

    /// Search service labelled in the stored UI language
    pub fn search(&self) -> anyhow::Result<SearchService> {
        let language = self.preferences().language()?;
        let fetch: Arc<dyn FetchPort> = self.cache.clone();
        Ok(SearchService::new(
            fetch,
            Arc::clone(&self.errors),
            self.config.api.base_url.clone(),
            FacetTitles::for_language(language),
        ))
    }

    pub fn feedback(&self) -> FeedbackService {
        FeedbackService::new(
            Arc::new(FeedbackAdapter::new(Arc::clone(&self.client))),
            Arc::clone(&self.store),
            Arc::clone(&self.errors),
            self.config.feedback,
        )
    }

    /// Last error message, or a generic fallback
    pub fn last_error(&self) -> String {
        self.errors
            .get()
            .unwrap_or_else(|| "request failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use application::{Language, Theme};

    use super::*;

    fn context_in(dir: &tempfile::TempDir) -> Context {
        let mut config = AppConfig::for_testing("http://127.0.0.1:9");
        config.storage.state_file = dir.path().join("state.json");
        Context::new(config).unwrap()
    }

    #[test]
    fn preferences_persist_across_contexts() {
        let dir = tempfile::tempdir().unwrap();
        {
            let ctx = context_in(&dir);
            ctx.preferences().set_theme(Theme::Dark).unwrap();
            ctx.preferences().set_language(Language::En).unwrap();
        }

        let ctx = context_in(&dir);
        assert_eq!(ctx.preferences().theme().unwrap(), Theme::Dark);
        assert_eq!(ctx.preferences().language().unwrap(), Language::En);
    }

    #[test]
    fn last_error_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir);
        assert_eq!(ctx.last_error(), "request failed");

        ctx.errors.set("Network error");
        assert_eq!(ctx.last_error(), "Network error");
    }
}
