pub mod auth;
pub mod health;
pub mod identity_providers;
pub mod templates;
pub mod users;
