use super::{require, ApiRequest, ListOptions};
use crate::client::RequestExecutor;
use crate::error::Result;
use serde_json::Value;

/// Which people to list for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeopleCollection {
    /// People who +1'd the activity
    Plusoners,
    /// People who reshared the activity
    Resharers,
}

impl PeopleCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeopleCollection::Plusoners => "plusoners",
            PeopleCollection::Resharers => "resharers",
        }
    }
}

/// `people/{userId}`; `"me"` names the authorized user
pub fn get_request(user_id: &str) -> Result<ApiRequest> {
    let user_id = require("userId", user_id)?;
    Ok(ApiRequest::new(["people", user_id]))
}

pub fn search_request(query: &str, options: &ListOptions) -> Result<ApiRequest> {
    let query = require("query", query)?;
    Ok(ApiRequest::new(["people"]).param("query", query).options(options))
}

pub fn list_by_activity_request(
    activity_id: &str,
    collection: PeopleCollection,
    options: &ListOptions,
) -> Result<ApiRequest> {
    let activity_id = require("activityId", activity_id)?;
    Ok(ApiRequest::new(["activities", activity_id, "people", collection.as_str()]).options(options))
}

/// Person profile operations
#[derive(Debug, Clone, Copy)]
pub struct People<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> People<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get(&self, user_id: &str) -> Result<Value> {
        self.executor.execute(&get_request(user_id)?).await
    }

    pub async fn search(&self, query: &str, options: &ListOptions) -> Result<Value> {
        self.executor.execute(&search_request(query, options)?).await
    }

    pub async fn list_by_activity(
        &self,
        activity_id: &str,
        collection: PeopleCollection,
        options: &ListOptions,
    ) -> Result<Value> {
        self.executor
            .execute(&list_by_activity_request(activity_id, collection, options)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_search_without_options_sends_only_query() {
        let request = search_request("Larry Page", &ListOptions::default()).unwrap();
        assert_eq!(request.path(), "people");
        assert_eq!(request.params.len(), 1);
        assert_eq!(request.params["query"], "Larry Page");
    }

    #[test]
    fn test_search_with_max_results() {
        let request = search_request("Larry Page", &ListOptions::new().max_results(2)).unwrap();
        assert_eq!(request.params["query"], "Larry Page");
        assert_eq!(request.params["maxResults"], "2");
        assert!(!request.params.contains_key("pageToken"));
    }

    #[test]
    fn test_search_with_page_token() {
        let request = search_request("Larry Page", &ListOptions::new().page_token("1234567")).unwrap();
        assert_eq!(request.params["query"], "Larry Page");
        assert_eq!(request.params["pageToken"], "1234567");
        assert!(!request.params.contains_key("maxResults"));
    }

    #[test]
    fn test_list_by_activity() {
        let request = list_by_activity_request(
            "z12gtjhq3qn2xxl2o224exwiqruvtda0i",
            PeopleCollection::Resharers,
            &ListOptions::new().max_results(10),
        )
        .unwrap();
        assert_eq!(request.path(), "activities/z12gtjhq3qn2xxl2o224exwiqruvtda0i/people/resharers");
        assert_eq!(request.params["maxResults"], "10");
    }

    #[test]
    fn test_missing_required_parameters() {
        assert!(get_request("").is_err());
        assert!(search_request("", &ListOptions::default()).is_err());
        assert!(list_by_activity_request("", PeopleCollection::Plusoners, &ListOptions::default()).is_err());
    }

    proptest! {
        #[test]
        fn get_request_targets_person_path(user_id in "[0-9]{1,21}|me") {
            let request = get_request(&user_id).unwrap();
            prop_assert_eq!(request.segments, vec!["people".to_string(), user_id.clone()]);
            prop_assert!(request.params.is_empty());
        }

        #[test]
        fn search_always_includes_query(query in "[a-zA-Z][a-zA-Z ]{0,30}", max in proptest::option::of(1u32..50)) {
            let options = ListOptions { max_results: max, ..ListOptions::default() };
            let request = search_request(&query, &options).unwrap();
            prop_assert_eq!(&request.params["query"], &query);
            prop_assert_eq!(request.params.get("maxResults").cloned(), max.map(|m| m.to_string()));
            prop_assert!(!request.params.contains_key("pageToken"));
        }
    }
}
