pub mod common;
pub mod error;
pub mod feature_flags;
pub mod models;
pub mod school;

pub use common::*;
pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use school::*;
