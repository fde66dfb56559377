//! HTTP handlers module
//!
//! This module contains all API route handlers organized by resource:
//! - Account handlers for signup and login
//! - Event handlers for the public listing and the creator dashboard
//! - Bookmark handlers for the save-for-later toggle
//! - Health handler for liveness checks

pub mod auth;
pub mod events;
pub mod bookmarks;
pub mod health;
