//! `actions` crate — the workflow `Action` vocabulary and the seams actions
//! reach outside the runtime through.
//!
//! The engine crate interprets [`Action`] values; anything that talks to the
//! network goes through the [`ApiClient`] trait so previews can run against a
//! real backend or a [`mock::MockApiClient`].

pub mod action;
pub mod error;
pub mod http;
pub mod mock;
pub mod traits;

pub use action::{Action, ActionDefinition, ApiRequest, HttpMethod, Severity};
pub use error::ActionError;
pub use http::HttpApiClient;
pub use traits::ApiClient;
