//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by a host (CLI, HTTP) into the application
//! - Outbound: Called by the application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::{PreviewItem, PreviewPayload, SummaryPort, SummaryRequest, SummaryResponse};
pub use outbound::{DocumentRenderer, RewritingPort};
