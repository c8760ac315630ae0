//! HTTP module
//!
//! Provides the raw JSON transport and the deadline wrapper around it.
//!
//! # Features
//!
//! - **Transport trait**: "GET and parse JSON" boundary, replaceable in tests
//! - **HttpTransport**: reqwest implementation with default headers
//! - **TimedCaller**: hard timeout enforced independently of the transport

mod timed;
mod transport;

pub use timed::TimedCaller;
pub use transport::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder, Transport};
