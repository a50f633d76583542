//! Trace Building Feature
//!
//! One generic builder walks scanned units in source order and emits steps,
//! nodes and edges. Everything language-specific arrives through the
//! `Recognizer` port.
//!
//! ## Structure
//! - `ports` - Recognizer trait and the facts it reports
//! - `builder` - TraceBuilder
//! - `layout` - node positions
//! - `render` - print statement rendering

mod builder;
mod layout;
pub mod ports;
mod render;

pub use builder::TraceBuilder;
pub use layout::Layout;
pub use ports::{Binding, CallSite, LoopHeader, PrintArg, PrintStatement, Recognizer};
pub use render::render_print;
