//! GraphQL documents sent to `/api/v2/graphql`.

pub const GET_FEATURE: &str = r"
  query GetFeature($id: ID!) {
    feature(id: $id) {
      id
      name
      referenceNum
      path
      description { markdownBody }
      workflowStatus { name }
      assignedToUser { name email }
      createdByUser { name }
      createdAt
      updatedAt
      startDate
      dueDate

      epic { name referenceNum }
      initiative { name referenceNum description { markdownBody } }
      release { name referenceNum }
      project { name referencePrefix }
      goals { name }
      tagList

      comments { body createdAt user { name } }
      commentsCount
      requirements { name description { markdownBody } workflowStatus { name } }
      requirementsCount
    }
  }
";

pub const GET_REQUIREMENT: &str = r"
  query GetRequirement($id: ID!) {
    requirement(id: $id) {
      name
      description {
        markdownBody
      }
    }
  }
";

/// The parent relation is only resolved when `$includeParent` is true.
pub const GET_PAGE: &str = r"
  query GetPage($id: ID!, $includeParent: Boolean!) {
    page(id: $id) {
      name
      description {
        markdownBody
      }
      children {
        name
        referenceNum
      }
      parent @include(if: $includeParent) {
        name
        referenceNum
      }
    }
  }
";

pub const SEARCH_DOCUMENTS: &str = r"
  query SearchDocuments($query: String!, $searchableType: [String!]!) {
    searchDocuments(filters: {query: $query, searchableType: $searchableType}) {
      nodes {
        name
        url
        searchableId
        searchableType
      }
      currentPage
      totalCount
      totalPages
      isLastPage
    }
  }
";
