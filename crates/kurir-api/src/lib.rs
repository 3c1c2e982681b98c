//! Typed client for the delivery-management REST API.
//!
//! Wraps `reqwest` with bearer-token auth and maps transport and payload
//! failures onto the [`ApiError`] taxonomy. Wire types live in [`types`];
//! [`normalize`] converts them into the domain records the report
//! pipeline consumes.

mod client;
mod error;
pub mod normalize;
pub mod types;

pub use client::TaskClient;
pub use error::ApiError;
pub use normalize::{RouteResult, Task, TaskLabel};
