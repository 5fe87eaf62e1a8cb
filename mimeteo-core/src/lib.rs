//! Core types and service wiring for the mimeteo weather lookup.

/// Lenient decoding helpers shared by the providers.
pub mod de;
/// Small HTTP helper that maps transport, status, and body failures.
pub mod http;
/// Domain models for regions, municipalities, coordinates, and forecasts.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// Turns a forecast bundle into display rows and text.
pub mod report;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use ports::*;
pub use report::*;
pub use service::*;
