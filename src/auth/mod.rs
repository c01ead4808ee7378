pub mod manager;
pub mod oauth;
pub mod token;

pub use manager::TokenManager;
pub use oauth::{AuthorizeUrlOptions, OAuthClient, DEFAULT_SCOPE};
pub use token::AccessToken;
