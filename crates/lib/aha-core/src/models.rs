//! Projections of Aha! resources returned by the GraphQL API.
//!
//! Each struct mirrors the selection in [`crate::queries`]. The service may
//! return `null` for any selected field (deleted users, empty descriptions,
//! unset relations), so every field is optional and a `null` is rendered back
//! as `null`. REST bodies are not modelled; they are passed through verbatim.

use serde::{Deserialize, Serialize};

/// Rich-text body attached to most Aha! records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkflowStatus {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub user: Option<User>,
}

/// Name plus reference number, used for epics, releases and page links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLink {
    pub name: Option<String>,
    pub reference_num: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    pub name: Option<String>,
    pub reference_num: Option<String>,
    pub description: Option<Description>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: Option<String>,
    pub reference_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Goal {
    pub name: Option<String>,
}

/// Requirement detail. The workflow status is only selected when the
/// requirement is nested under a feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub name: Option<String>,
    pub description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<WorkflowStatus>,
}

/// Feature detail as selected by [`crate::queries::GET_FEATURE`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub reference_num: Option<String>,
    pub path: Option<String>,
    pub description: Option<Description>,
    pub workflow_status: Option<WorkflowStatus>,
    pub assigned_to_user: Option<User>,
    pub created_by_user: Option<User>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub epic: Option<ReferenceLink>,
    pub initiative: Option<Initiative>,
    pub release: Option<ReferenceLink>,
    pub project: Option<Project>,
    pub goals: Option<Vec<Goal>>,
    pub tag_list: Option<String>,
    pub comments: Option<Vec<Comment>>,
    pub comments_count: Option<u64>,
    pub requirements: Option<Vec<Requirement>>,
    pub requirements_count: Option<u64>,
}

/// Page (note) detail. `parent` is absent unless it was requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Page {
    pub name: Option<String>,
    pub description: Option<Description>,
    pub children: Option<Vec<ReferenceLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ReferenceLink>,
}

/// Any record a reference lookup can produce.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    Feature(Box<Feature>),
    Requirement(Requirement),
    Page(Page),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureData {
    pub feature: Option<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequirementData {
    pub requirement: Option<Requirement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    pub page: Option<Page>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchNode {
    pub name: Option<String>,
    pub url: Option<String>,
    pub searchable_id: Option<String>,
    pub searchable_type: Option<String>,
}

/// One page of GraphQL document search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocuments {
    pub nodes: Option<Vec<SearchNode>>,
    pub current_page: Option<u64>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u64>,
    pub is_last_page: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub search_documents: Option<SearchDocuments>,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn null_relations_survive_a_round_trip() {
        let body = json!({
            "id": "6776",
            "name": "Single sign-on",
            "referenceNum": null,
            "description": null,
            "assignedToUser": { "name": null, "email": "dana@example.com" },
            "comments": [{ "body": "hi", "createdAt": "2024", "user": null }],
            "goals": null
        });
        let feature: Feature = serde_json::from_value(body).expect("nulls should decode");
        assert_eq!(feature.description, None);
        assert_eq!(feature.comments.as_ref().map(Vec::len), Some(1));

        let rendered = serde_json::to_value(Record::Feature(Box::new(feature)))
            .expect("feature should serialize");
        assert_eq!(rendered["referenceNum"], Value::Null);
        assert_eq!(rendered["comments"][0]["user"], Value::Null);
        assert_eq!(rendered["assignedToUser"], json!({ "name": null, "email": "dana@example.com" }));
    }

    #[test]
    fn search_nodes_accept_null_identifiers() {
        let data: SearchData = serde_json::from_value(json!({
            "searchDocuments": {
                "nodes": [{ "name": "Roadmap", "url": null, "searchableId": null, "searchableType": "Page" }],
                "currentPage": 1,
                "totalCount": 1,
                "totalPages": 1,
                "isLastPage": true
            }
        }))
        .expect("null node fields should decode");
        let nodes = data
            .search_documents
            .and_then(|documents| documents.nodes)
            .unwrap_or_default();
        assert_eq!(nodes[0].url, None);
        assert_eq!(nodes[0].searchable_type.as_deref(), Some("Page"));
    }
}
