#[cfg(feature = "server")]
pub(crate) mod auth;

mod account;
pub use account::*;

mod school;
pub use school::*;
