//! # dominion-backend
//!
//! Client for the hosted session backend's REST interface. Implements
//! the [`dominion_core::traits::SessionSource`] seam over the
//! `cli_sessions` table with its embedded `cli_users` join.

pub mod rest;

pub use rest::RestSessionSource;
