/*!
# WSO2 IS Domain

Domain layer for administering a WSO2 Identity Server tenant, laid out along
hexagonal architecture lines.

This crate provides:
- Identity provider templates and the mapping from a filled-in form to a
  creation payload
- Session shaping: token records, per-request sessions and the organization
  switch
- Port definitions for the identity server and its OAuth endpoints
- Infrastructure adapters talking to the identity server over HTTP

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapters                         │
├─────────────────────────────────────────────────────────────┤
│             HTTP Server (Axum handlers, cookies)            │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • IdentityProviderService  • SessionShapingService         │
│  • UserDirectoryService     • AuthenticationService         │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • IdentityServerRepository • OAuthProvider                 │
│  • OrganizationSwitcher                                     │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • Wso2RestAdapter          • Wso2OAuthClient               │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use std::sync::Arc;
use wso2is_domain::{
    FormValues, IdentityProviderService, TemplateCatalog, Wso2RestAdapter,
};

let endpoints = config.wso2.endpoints();
let service = IdentityProviderService::new(
    Arc::new(TemplateCatalog::builtin()?),
    Arc::new(Wso2RestAdapter::new(endpoints.clone())),
    endpoints,
);

let values = FormValues::new()
    .with("application_name", "Google")
    .with("client_id", "id")
    .with("client_secret", "secret");
let created = service
    .create_identity_provider("google-idp", &values, &session)
    .await?;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use infrastructure::adapters::*;
