pub mod wso2_oauth_client;
pub mod wso2_rest;

pub use wso2_oauth_client::*;
pub use wso2_rest::*;
