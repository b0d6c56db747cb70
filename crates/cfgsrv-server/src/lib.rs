//! HTTP/JSON server for the cfgsrv configuration registry.
//!
//! Judges and runners fetch "how do I build and run language X" and "how do
//! I run compare task Y" from here. This crate contains the entity services,
//! API schema types, error handling, route definitions and process config.

pub mod config;
pub mod deadline;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
