//! Feature modules, leaves first
//!
//! scanning -> classification / state_tracking -> trace_building -> drivers

pub mod classification;
pub mod drivers;
pub mod scanning;
pub mod state_tracking;
pub mod trace_building;
