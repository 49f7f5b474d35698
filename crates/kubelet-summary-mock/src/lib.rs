//! Scripted kubelet transport and summary provider for tests and local development.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod provider;
mod transport;

pub use error::Error;
pub use provider::MockSummaryProvider;
pub use transport::{MockBody, MockReply, MockTransport, RecordedRequest};
