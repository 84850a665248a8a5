//! Search through the fetch cache

use std::sync::Arc;

use domain::{Facet, SearchQuery, SearchResponse};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::ApplicationError;
use crate::ports::{FetchError, FetchPort};
use crate::services::facets::extract_facets;
use crate::services::preferences::Language;
use crate::services::ui_state::ErrorSlot;

/// Localized facet headings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetTitles {
    pub rooms: String,
    pub buildings: String,
}

impl FacetTitles {
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::De => Self {
                rooms: "Räume".to_string(),
                buildings: "Gebäude / Standorte".to_string(),
            },
            Language::En => Self {
                rooms: "Rooms".to_string(),
                buildings: "Buildings / Sites".to_string(),
            },
        }
    }
}

impl Default for FacetTitles {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

/// Runs searches and shapes the results into facets
pub struct SearchService {
    fetch: Arc<dyn FetchPort>,
    errors: Arc<ErrorSlot>,
    api_base: String,
    titles: FacetTitles,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("api_base", &self.api_base)
            .field("titles", &self.titles)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(
        fetch: Arc<dyn FetchPort>,
        errors: Arc<ErrorSlot>,
        api_base: impl Into<String>,
        titles: FacetTitles,
    ) -> Self {
        Self {
            fetch,
            errors,
            api_base: api_base.into(),
            titles,
        }
    }

    /// Full request URL for `query`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the API base is not a URL.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, ApplicationError> {
        let endpoint = format!("{}/api/search", self.api_base.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, query.query_pairs())
            .map_err(|e| ApplicationError::Configuration(format!("invalid API base: {e}")))
    }

    /// Search and return render-ready facets
    ///
    /// Blank queries return nothing without a request. Failures return an
    /// empty list; the reason ends up in the error slot.
    #[instrument(skip(self), fields(q = %query.q))]
    pub async fn search(&self, query: &SearchQuery) -> Vec<Facet> {
        if query.is_blank() {
            return Vec::new();
        }

        let url = match self.search_url(query) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Cannot build search URL");
                self.errors.set(e.to_string());
                return Vec::new();
            },
        };

        let Some(payload) = self.fetch.fetch(url.as_str()).await else {
            return Vec::new();
        };

        match serde_json::from_value::<SearchResponse>(serde_json::Value::clone(&payload)) {
            Ok(response) => {
                let facets = extract_facets(&response, &self.titles.rooms, &self.titles.buildings);
                debug!(facets = facets.len(), time_ms = response.time_ms, "Search shaped");
                facets
            },
            Err(e) => {
                warn!(error = %e, "Search response has an unexpected shape");
                self.errors
                    .set(FetchError::MalformedContent(e.to_string()).to_string());
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ports::MockFetchPort;

    fn service(fetch: MockFetchPort) -> (SearchService, Arc<ErrorSlot>) {
        let errors = ErrorSlot::shared();
        let service = SearchService::new(
            Arc::new(fetch),
            Arc::clone(&errors),
            "https://nav.example/",
            FacetTitles::for_language(Language::En),
        );
        (service, errors)
    }

    #[test]
    fn url_contains_limits_and_markers() {
        let (service, _) = service(MockFetchPort::new());
        let url = service.search_url(&SearchQuery::new("mi hs")).unwrap();
        assert_eq!(url.path(), "/api/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "mi hs".to_string())));
        assert!(pairs.contains(&("limit_rooms".to_string(), "10".to_string())));
        assert!(pairs.contains(&("pre_highlight".to_string(), "\u{19}".to_string())));
    }

    #[tokio::test]
    async fn blank_query_does_not_fetch() {
        let mut fetch = MockFetchPort::new();
        fetch.expect_fetch().never();
        let (service, _) = service(fetch);
        assert!(service.search(&SearchQuery::new("  ")).await.is_empty());
    }

    #[tokio::test]
    async fn results_become_facets() {
        let mut fetch = MockFetchPort::new();
        fetch
            .expect_fetch()
            .withf(|url| url.contains("q=garching"))
            .times(1)
            .returning(|_| {
                Some(Arc::new(json!({
                    "sections": [{
                        "facet": "sites_buildings",
                        "entries": [{ "id": "garching", "type": "campus", "name": "\u{19}Garching\u{17}", "subtext": "" }],
                        "estimatedTotalHits": 1
                    }],
                    "time_ms": 2
                })))
            });
        let (service, errors) = service(fetch);

        let facets = service.search(&SearchQuery::new("garching")).await;
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].title(), "Buildings / Sites");
        assert_eq!(facets[0].entries()[0].name, "<em>Garching</em>");
        assert!(!errors.is_set());
    }

    #[tokio::test]
    async fn failed_fetch_is_empty() {
        let mut fetch = MockFetchPort::new();
        fetch.expect_fetch().returning(|_| None);
        let (service, _) = service(fetch);
        assert!(service.search(&SearchQuery::new("mi")).await.is_empty());
    }

    #[tokio::test]
    async fn unexpected_shape_reports_error() {
        let mut fetch = MockFetchPort::new();
        fetch
            .expect_fetch()
            .returning(|_| Some(Arc::new(json!({ "sections": "nope" }))));
        let (service, errors) = service(fetch);

        assert!(service.search(&SearchQuery::new("mi")).await.is_empty());
        assert!(errors.get().unwrap().contains("malformed"));
    }
}
