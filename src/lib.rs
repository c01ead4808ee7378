//! Client for the Google+ REST API.
//!
//! [`Client`] reads people, activities and comments either anonymously with an
//! API key or on behalf of a user with an OAuth 2.0 access token, refreshing
//! that token when it expires.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;

pub use auth::{AccessToken, AuthorizeUrlOptions, TokenManager};
pub use client::{Client, RequestExecutor};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use resources::{ListOptions, OrderBy, Params, PeopleCollection, SortOrder};
