//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Ticketry
//! application: fixture builders and a mock place-search server.

pub mod test_data;
pub mod geocode_mock;

pub use test_data::*;
pub use geocode_mock::*;
