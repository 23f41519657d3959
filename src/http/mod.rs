//! HTTP client module for probing the payment service
//!
//! Provides the reqwest-backed client and the `Transport` seam the scenarios
//! send their requests through.

mod client;

pub use client::{exchange, HttpClient, HttpRequest, HttpResponse, Transport};
