use serde_json::{Value, json};
use tracing::debug;

use super::{AhaControlPlane, pretty, require};
use crate::client::AhaApi;
use crate::error::{ClientError, ControlError, ControlResult, wrap_remote};
use crate::models::{FeatureData, PageData, Record, RequirementData};
use crate::queries::{GET_FEATURE, GET_PAGE, GET_REQUIREMENT};
use crate::reference::{RecordKind, classify_record, is_note_reference};

const FETCH_RECORD: &str = "Failed to fetch record";
const FETCH_PAGE: &str = "Failed to fetch page";

/// Request for a page lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetPageRequest {
    pub reference: String,
    pub include_parent: bool,
}

impl<A: AhaApi> AhaControlPlane<A> {
    /// Fetches a feature or requirement by reference number.
    ///
    /// Returns the record as pretty JSON, or a "not found" message when the
    /// service has no such record.
    ///
    /// # Errors
    /// Returns `InvalidParams` for an empty or malformed reference and
    /// `Internal` for any remote failure.
    pub async fn get_record(&self, reference: &str) -> ControlResult<String> {
        let reference = require(reference, "Reference number is required")?;
        let kind = classify_record(reference).ok_or_else(|| {
            ControlError::invalid_params(
                "Invalid reference number format. Expected DEVELOP-123 or ADT-123-1",
            )
        })?;
        debug!(reference, ?kind, "fetching record");

        let variables = json!({ "id": reference });
        let record = match kind {
            RecordKind::Feature => {
                let data: FeatureData = self.query(GET_FEATURE, variables, FETCH_RECORD).await?;
                data.feature.map(|feature| Record::Feature(Box::new(feature)))
            }
            RecordKind::Requirement => {
                let data: RequirementData =
                    self.query(GET_REQUIREMENT, variables, FETCH_RECORD).await?;
                data.requirement.map(Record::Requirement)
            }
        };

        match record {
            Some(record) => pretty(&record, FETCH_RECORD),
            None => Ok(format!("No record found for reference {reference}")),
        }
    }

    /// Fetches a page by note reference, optionally with its parent.
    ///
    /// # Errors
    /// Returns `InvalidParams` for an empty or non-note reference and
    /// `Internal` for any remote failure.
    pub async fn get_page(&self, request: &GetPageRequest) -> ControlResult<String> {
        let reference = require(&request.reference, "Reference number is required")?;
        if !is_note_reference(reference) {
            return Err(ControlError::invalid_params(
                "Invalid reference number format. Expected ABC-N-213",
            ));
        }
        debug!(reference, include_parent = request.include_parent, "fetching page");

        let data: PageData = self
            .query(
                GET_PAGE,
                json!({ "id": reference, "includeParent": request.include_parent }),
                FETCH_PAGE,
            )
            .await?;

        match data.page {
            Some(page) => pretty(&Record::Page(page), FETCH_PAGE),
            None => Ok(format!("No page found for reference {reference}")),
        }
    }

    /// Runs a GraphQL document and decodes its `data` into `T`, folding any
    /// failure into an internal error tagged with `context`.
    pub(crate) async fn query<T: serde::de::DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        context: &str,
    ) -> ControlResult<T> {
        let data = self
            .api
            .graphql(document, variables)
            .await
            .map_err(|err| wrap_remote(context, &err))?;
        serde_json::from_value(data).map_err(|err| wrap_remote(context, &ClientError::Decode(err)))
    }
}
