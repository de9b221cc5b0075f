//! fangate-dispatch
//!
//! The concurrent heart of the gateway: build one GraphQL document per
//! configured collection, issue all backend calls at once, convert every
//! termination into a per-collection outcome, and fold the outcomes into
//! one aggregated response.

pub mod aggregate;
pub mod fanout;

pub use aggregate::aggregate;
pub use fanout::{fan_out, FanOut};
