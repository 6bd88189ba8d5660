//! Client side of the case-management app: identity, authenticated
//! requests, the case API and the hooks views bind to.

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod hooks;
pub mod request;

pub use api::{CaseApi, CaseClient};
pub use auth::{HostedPage, IdentityContext, IdentityError, IdentityProvider};
pub use guard::{evaluate, may_load_data, GuardDecision, SIGN_IN_PATH};
pub use hooks::{
    ActionGuard, CaseListHook, CreateCaseHook, DeleteCaseHook, FetchState, StateCell,
};
pub use request::{identity_headers, BodyKind, USER_ID_HEADER};
