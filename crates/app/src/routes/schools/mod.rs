//! The schools list screen and its data access.

mod controller;
mod debounce;
mod form;
mod list;
pub mod service;

pub use list::SchoolsPage;
