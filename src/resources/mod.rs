//! People, activities and comments endpoints
//!
//! Each operation is a pure translation into an [`ApiRequest`] (path segments
//! plus query parameters) that the [`RequestExecutor`](crate::client::RequestExecutor) sends.

pub mod activities;
pub mod comments;
pub mod people;

use crate::error::{Error, Result};
use std::collections::BTreeMap;

pub use activities::{Activities, OrderBy};
pub use comments::{Comments, SortOrder};
pub use people::{People, PeopleCollection};

/// Query parameters for a request
pub type Params = BTreeMap<String, String>;

/// A GET request relative to the versioned API root.
///
/// Each segment is sent as exactly one path segment; `/`, `#` and `?` inside
/// an id are percent-encoded rather than changing the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub segments: Vec<String>,
    pub params: Params,
}

impl ApiRequest {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            params: Params::new(),
        }
    }

    /// Unescaped path, for logging
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    fn options(mut self, options: &ListOptions) -> Self {
        options.apply(&mut self.params);
        self
    }
}

/// Optional paging and ordering parameters shared by list and search operations.
///
/// Unset fields are left out of the query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
    pub order_by: Option<OrderBy>,
    pub sort_order: Option<SortOrder>,
    pub language: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn apply(&self, params: &mut Params) {
        if let Some(max_results) = self.max_results {
            params.insert("maxResults".to_string(), max_results.to_string());
        }
        if let Some(ref page_token) = self.page_token {
            params.insert("pageToken".to_string(), page_token.clone());
        }
        if let Some(order_by) = self.order_by {
            params.insert("orderBy".to_string(), order_by.as_str().to_string());
        }
        if let Some(sort_order) = self.sort_order {
            params.insert("sortOrder".to_string(), sort_order.as_str().to_string());
        }
        if let Some(ref language) = self.language {
            params.insert("language".to_string(), language.clone());
        }
    }
}

/// Reject an empty required parameter before any request is made.
///
/// `.` and `..` are rejected too since URL normalization would drop them from the path.
fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("'{}' is required", name)));
    }
    if value == "." || value == ".." {
        return Err(Error::Config(format!("'{}' is not a valid {}", value, name)));
    }
    Ok(value)
}
