///! Typed client for the N2YO satellite-tracking REST API
///!
///! Build a [`Client`] with an API key, then query satellite positions and
///! upcoming radio or visual passes as strongly-typed results. Each query is
///! one HTTP round trip: build the request URI, fetch the body as text,
///! check it for a server-reported error, decode it. No retries, no caching.

pub mod client;
mod decode;
pub mod error;
pub mod transport;
pub mod types;

pub use client::Client;
pub use error::{DecodeError, Error, Result, TransportError};
pub use transport::{HttpTransport, Transport};
pub use types::*;
