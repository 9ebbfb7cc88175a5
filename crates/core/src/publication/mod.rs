//! Bot publication binding
//!
//! Publishing a bot, listing public bots and managing the API keys of a
//! publication.

pub mod service;

pub use service::PublicationApi;
