use super::{require, ApiRequest, ListOptions};
use crate::client::RequestExecutor;
use crate::error::Result;
use serde_json::Value;

/// Chronological order of listed comments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

pub fn get_request(comment_id: &str) -> Result<ApiRequest> {
    let comment_id = require("commentId", comment_id)?;
    Ok(ApiRequest::new(["comments", comment_id]))
}

pub fn list_request(activity_id: &str, options: &ListOptions) -> Result<ApiRequest> {
    let activity_id = require("activityId", activity_id)?;
    Ok(ApiRequest::new(["activities", activity_id, "comments"]).options(options))
}

/// Comment operations
#[derive(Debug, Clone, Copy)]
pub struct Comments<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> Comments<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get(&self, comment_id: &str) -> Result<Value> {
        self.executor.execute(&get_request(comment_id)?).await
    }

    /// Comments on `activity_id`
    pub async fn list(&self, activity_id: &str, options: &ListOptions) -> Result<Value> {
        self.executor.execute(&list_request(activity_id, options)?).await
    }
}
