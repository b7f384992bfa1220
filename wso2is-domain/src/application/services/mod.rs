pub mod authentication;
pub mod identity_provider_management;
pub mod retry;
pub mod session_shaping;
pub mod user_directory;

pub use authentication::*;
pub use identity_provider_management::*;
pub use retry::{retry, RetryPolicy, RetryableError};
pub use session_shaping::*;
pub use user_directory::*;
