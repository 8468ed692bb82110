//! Ansania Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Modules
//!
//! - [`models`] - Banners, CMS pages, flash sales, vouchers and their forms
//! - [`db`] - `PostgreSQL` repositories behind the [`db::AdminStore`] trait
//! - [`services`] - Create/edit flows and background activity recording
//! - [`routes`] - Axum handlers and Askama pages
//!
//! # Security
//!
//! The admin panel has no login of its own. It must only be reachable
//! through the authenticating proxy, which sets `x-admin-user-id`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
