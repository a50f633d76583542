//! State Tracking Feature
//!
//! Request-scoped table of last-known variable values.

mod tracker;

pub use tracker::StateTracker;
