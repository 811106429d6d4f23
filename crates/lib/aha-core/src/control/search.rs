use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{AhaControlPlane, pretty, require};
use crate::client::AhaApi;
use crate::error::{ControlResult, wrap_rest};
use crate::models::SearchData;
use crate::queries::SEARCH_DOCUMENTS;

const SEARCH_DOCUMENTS_FAILED: &str = "Failed to search documents";
const SEARCH_FEATURES_FAILED: &str = "Failed to search features";

pub const FEATURES_PATH: &str = "/api/v1/features";
pub const DEFAULT_SEARCHABLE_TYPE: &str = "Page";

/// Full-text document search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDocumentsRequest {
    pub query: String,
    pub searchable_type: String,
}

impl SearchDocumentsRequest {
    /// Searches pages, the default searchable type.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            searchable_type: DEFAULT_SEARCHABLE_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_searchable_type(mut self, searchable_type: impl Into<String>) -> Self {
        self.searchable_type = searchable_type.into();
        self
    }
}

/// Filters for the REST feature listing. Every filter is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchFeaturesRequest {
    pub q: Option<String>,
    pub product_id: Option<String>,
    pub assigned_to_user: Option<String>,
    pub tag: Option<String>,
    pub updated_since: Option<String>,
}

impl SearchFeaturesRequest {
    /// Query pairs for the supplied filters, in declaration order. Absent and
    /// empty filters produce no key at all.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("q", &self.q),
            ("product_id", &self.product_id),
            ("assigned_to_user", &self.assigned_to_user),
            ("tag", &self.tag),
            ("updated_since", &self.updated_since),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value.to_string()))
        })
        .collect()
    }
}

impl<A: AhaApi> AhaControlPlane<A> {
    /// Searches Aha! documents of one searchable type.
    ///
    /// The result set is returned verbatim; an empty set is valid output.
    ///
    /// # Errors
    /// Returns `InvalidParams` for an empty query and `Internal` for any
    /// remote failure.
    pub async fn search_documents(&self, request: &SearchDocumentsRequest) -> ControlResult<String> {
        let query = require(&request.query, "Search query is required")?;
        debug!(query, searchable_type = %request.searchable_type, "searching documents");

        let data: SearchData = self
            .query(
                SEARCH_DOCUMENTS,
                json!({ "query": query, "searchableType": [request.searchable_type] }),
                SEARCH_DOCUMENTS_FAILED,
            )
            .await?;
        pretty(&data.search_documents, SEARCH_DOCUMENTS_FAILED)
    }

    /// Lists features through the REST API. The response body is rendered
    /// as received.
    ///
    /// # Errors
    /// Returns `Internal` when the account settings are missing (before any
    /// request is sent), on a non-2xx response, or on any other failure.
    pub async fn search_features(&self, request: &SearchFeaturesRequest) -> ControlResult<String> {
        let auth = self.rest.auth()?;
        let params = request.query_pairs();
        debug!(filters = params.len(), "searching features");

        let body = self
            .api
            .rest_get(auth, FEATURES_PATH, &params)
            .await
            .map_err(|err| wrap_rest(SEARCH_FEATURES_FAILED, &err))?;
        pretty(&body, SEARCH_FEATURES_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_produce_no_pairs() {
        assert!(SearchFeaturesRequest::default().query_pairs().is_empty());

        let blank = SearchFeaturesRequest {
            q: Some(String::new()),
            ..SearchFeaturesRequest::default()
        };
        assert!(blank.query_pairs().is_empty());
    }

    #[test]
    fn supplied_filters_keep_declaration_order() {
        let request = SearchFeaturesRequest {
            updated_since: Some("2024-01-01T00:00:00Z".to_string()),
            q: Some("login".to_string()),
            tag: Some("mobile".to_string()),
            ..SearchFeaturesRequest::default()
        };
        assert_eq!(
            request.query_pairs(),
            vec![
                ("q", "login".to_string()),
                ("tag", "mobile".to_string()),
                ("updated_since", "2024-01-01T00:00:00Z".to_string()),
            ]
        );
    }
}
