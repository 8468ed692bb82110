//! Ansania Core - Shared types library.
//!
//! This crate provides common types used across all Ansania components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration console (CMS, promotions)
//! - `cli` - Command-line tools for migrations and database checks
//!
//! # Architecture
//!
//! The core crate contains types, traits, and the best-effort activity logger.
//! It has no HTTP surface. Database access is limited to the optional
//! `postgres` feature, which provides the `sqlx` activity sink and typed ID
//! encoding.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, slugs, and content documents
//! - [`activity`] - Activity (audit) log entries and the `log_activity` operation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod activity;
pub mod types;

pub use activity::{
    ActivityData, ActivityLogEntry, ActivityLogError, ActivitySink, LogOutcome, log_activity,
};
#[cfg(feature = "postgres")]
pub use activity::PgActivitySink;
pub use types::*;
