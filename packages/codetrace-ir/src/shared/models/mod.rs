//! Shared models: the trace data model exchanged with the visual player

mod analysis_result;
mod edge;
mod node;
mod span;
mod step;
mod structure;

pub use analysis_result::{AnalysisResult, TraceSnapshot, TraceViolation};
pub use edge::{Edge, EdgeKind};
pub use node::{Node, NodeKind, Position};
pub use span::Span;
pub use step::{Step, VariableDelta, VariableEntry};
pub use structure::StructureTag;

/// Node identifier type alias
pub type NodeId = String;
