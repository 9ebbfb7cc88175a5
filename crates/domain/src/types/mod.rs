//! Domain types and models

pub mod publication;
pub mod published_api;

pub use publication::*;
pub use published_api::*;
