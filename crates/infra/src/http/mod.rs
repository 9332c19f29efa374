//! HTTP client shared by the Graph integration

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
