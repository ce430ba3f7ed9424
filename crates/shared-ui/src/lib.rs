//! Reusable dashboard components built on `dioxus-primitives`.
//!
//! Each component lives in its own folder with a co-located `style.css`.
//! Colors come from CSS variables defined by the host app.

pub mod components;

pub use components::*;
