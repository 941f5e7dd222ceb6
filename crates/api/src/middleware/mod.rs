//! Request-level extractors.

pub mod auth;
