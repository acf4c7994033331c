//! Client data-access layer for the music catalog dashboard.
//!
//! The crate talks to the catalog's REST API, keeps per-kind listing state
//! with loading and error tracking, and guards dashboard routes behind the
//! session's login state.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
pub mod store;
