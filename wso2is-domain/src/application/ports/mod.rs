pub mod auth;
pub mod config;
pub mod repository;

pub use auth::*;
pub use config::*;
pub use repository::*;
