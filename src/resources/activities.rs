use super::{require, ApiRequest, ListOptions};
use crate::client::RequestExecutor;
use crate::error::Result;
use serde_json::Value;

/// Only public activities can be listed through the API
const PUBLIC_COLLECTION: &str = "public";

/// Result ordering for activity search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Best,
    Recent,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Best => "best",
            OrderBy::Recent => "recent",
        }
    }
}

pub fn get_request(activity_id: &str) -> Result<ApiRequest> {
    let activity_id = require("activityId", activity_id)?;
    Ok(ApiRequest::new(["activities", activity_id]))
}

pub fn list_request(user_id: &str, options: &ListOptions) -> Result<ApiRequest> {
    let user_id = require("userId", user_id)?;
    Ok(ApiRequest::new(["people", user_id, "activities", PUBLIC_COLLECTION]).options(options))
}

pub fn search_request(query: &str, options: &ListOptions) -> Result<ApiRequest> {
    let query = require("query", query)?;
    Ok(ApiRequest::new(["activities"]).param("query", query).options(options))
}

/// Activity (post) operations
#[derive(Debug, Clone, Copy)]
pub struct Activities<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> Activities<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get(&self, activity_id: &str) -> Result<Value> {
        self.executor.execute(&get_request(activity_id)?).await
    }

    /// Public activities posted by `user_id`
    pub async fn list(&self, user_id: &str, options: &ListOptions) -> Result<Value> {
        self.executor.execute(&list_request(user_id, options)?).await
    }

    pub async fn search(&self, query: &str, options: &ListOptions) -> Result<Value> {
        self.executor.execute(&search_request(query, options)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_list_public_activities() {
        let request = list_request("109813896768294978296", &ListOptions::new().page_token("next")).unwrap();
        assert_eq!(request.path(), "people/109813896768294978296/activities/public");
        assert_eq!(request.params.len(), 1);
        assert_eq!(request.params["pageToken"], "next");
    }

    #[test]
    fn test_search_with_ordering() {
        let options = ListOptions::new().order_by(OrderBy::Best).language("fr");
        let request = search_request("cookies", &options).unwrap();
        assert_eq!(request.path(), "activities");
        assert_eq!(request.params["query"], "cookies");
        assert_eq!(request.params["orderBy"], "best");
        assert_eq!(request.params["language"], "fr");
    }

    #[test]
    fn test_missing_required_parameters() {
        assert!(get_request(" ").is_err());
        assert!(list_request("", &ListOptions::default()).is_err());
        assert!(search_request("", &ListOptions::default()).is_err());
    }

    proptest! {
        #[test]
        fn get_request_targets_activity_path(activity_id in "[a-z0-9]{8,40}") {
            let request = get_request(&activity_id).unwrap();
            prop_assert_eq!(request.segments, vec!["activities".to_string(), activity_id.clone()]);
            prop_assert!(request.params.is_empty());
        }
    }
}
