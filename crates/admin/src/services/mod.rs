//! Business logic between route handlers and repositories.
//!
//! - [`activity`] - Background audit logging
//! - [`forms`] - Create and edit flows for admin entities

pub mod activity;
pub mod forms;

pub use activity::ActivityRecorder;
pub use forms::{FormMode, FormState, Submission, edit_form, new_form, submit_create, submit_update};
