//! Binding for the API a publication exposes to external callers

pub mod service;

pub use service::PublishedBotApi;
