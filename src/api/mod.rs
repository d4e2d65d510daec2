//! API plumbing
//!
//! Everything below the typed resources: the HTTP transport, the client handle,
//! hyperlinks and request descriptors.
//!
//! # Module Structure
//!
//! - [`client`] - Client handle combining a transport with the API root
//! - [`http`] - Transport trait and its reqwest implementation
//! - [`link`] - Hyperlinks and first-match lookup
//! - [`request`] - Request descriptors, sorting and cursors
//!
//! # Example
//!
//! ```ignore
//! use srapi::api::{Client, Request};
//!
//! async fn example() -> srapi::Result<()> {
//!     let client = Client::from_env()?;
//!     let raw = client.execute(&Request::get("/games/sms")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod link;
pub mod request;

pub use client::Client;
pub use http::{HttpTransport, Transport};
pub use link::{first_link, HasLinks, Link};
pub use request::{ApplyToUrl, Cursor, Direction, Request, Sorting};
