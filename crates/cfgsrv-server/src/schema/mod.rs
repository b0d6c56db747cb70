//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for one entity
//! kind. Types use serde derives for JSON serialization/deserialization.

pub mod compares;
pub mod languages;
