//! # Teams Meeting Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Microsoft Graph client and its token cache
//! - The shared HTTP client
//! - Configuration loading
//! - Conversions from external errors into `MeetingError`
//!
//! ## Architecture
//! - Implements traits defined in `teamsmeeting-core`
//! - Contains all "impure" code (HTTP, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::graph::{connect, GraphConnection, GraphMeetingClient};
