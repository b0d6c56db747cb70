//! HTTP handler modules for the cfgsrv API.
//!
//! Handlers parse the request, hand the service call to the blocking pool
//! under the caller's [`Deadline`](crate::deadline::Deadline), and return
//! JSON. No business logic lives in handlers.

pub mod compares;
pub mod health;
pub mod languages;
