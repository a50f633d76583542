/*
 * Codetrace IR - Execution trace analyzer for a step-by-step code visualizer
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Trace data model (Node, Edge, Step, AnalysisResult), Language, ids
 * - features/    : Vertical slices (scanning → classification → state tracking → trace building → drivers)
 * - api/         : Dispatcher and worker isolation
 * - config/      : AnalyzerConfig, versioned YAML
 *
 * Source text goes in, one AnalysisResult comes out. Nothing is executed.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (scanning → drivers)
pub mod features;

/// Configuration system
pub mod config;

/// Request boundary: dispatcher, `analyze`, worker
pub mod api;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use api::{analyze, AnalysisRequest, AnalysisWorker, Dispatcher, PendingAnalysis};
pub use config::{AnalyzerConfig, ConfigError};
pub use errors::{AnalyzerError, Result};
pub use features::drivers::{create_full_registry, create_registry, DriverRegistry, LanguageDriver};
pub use shared::models::{
    AnalysisResult, Edge, EdgeKind, Node, NodeKind, Position, Step, StructureTag, TraceSnapshot,
    TraceViolation, VariableDelta, VariableEntry,
};
pub use shared::ports::Language;
