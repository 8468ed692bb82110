//! Core types for Ansania.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod content;
pub mod id;
pub mod slug;

pub use content::ContentDocument;
pub use id::*;
pub use slug::{Slug, SlugError};
