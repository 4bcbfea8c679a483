//! Components drawn over the active panel.
//!
//! - `render_utils.rs`: shared container, hint and input-line helpers
//! - `toast.rs`: transient notifications

pub mod render_utils;
pub mod toast;

pub use toast::{Toast, Toasts, render_toasts};
