pub mod common;
pub mod identity_provider;
pub mod payload;
pub mod provider_form;
pub mod session;
pub mod template;
pub mod user;

pub use common::*;
pub use identity_provider::*;
pub use payload::*;
pub use provider_form::{FormValues, ProviderForm};
pub use session::*;
pub use template::*;
pub use user::*;
