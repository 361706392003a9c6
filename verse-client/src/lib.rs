//! Verse client library exports.
//!
//! `api_client` is the data-access adapter over the remote store;
//! `screens` holds one view-model per screen, each resynchronizing its
//! snapshot by refetching after every mutation.

pub mod api_client;
pub mod config;
pub mod screens;

pub use api_client::{ClientError, RestClient};
pub use config::ClientConfig;
