//! HTTP request handlers, grouped by domain.

pub mod health;
pub mod sessions;
