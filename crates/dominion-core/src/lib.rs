//! # dominion-core
//!
//! Core crate for Dominion Admin. Contains collaborator traits,
//! configuration schemas, domain types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dominion crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
