// adminkit-api: HTTP capability for the schema-driven admin data layer.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{HttpClient, RestClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
