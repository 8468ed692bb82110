//! Ansania Storefront library.
//!
//! Content pages resolved by slug from the database or an external content
//! service, exposed as a library so the router can be tested end to end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
