// dnssync-api: Async Rust client for the netcup CCP DNS JSON API

pub mod auth;
pub mod client;
pub mod dns;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use auth::Credentials;
pub use client::NetcupClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
