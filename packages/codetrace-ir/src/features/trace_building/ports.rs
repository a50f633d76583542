//! Recognizer Port
//!
//! Defines the contract for language-specific recognition. Each language
//! driver implements this trait; the trace builder only talks to it.

use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::features::classification::StructureMatch;
use crate::features::scanning::{ScannedDocument, ScannedUnit};
use crate::shared::ports::Language;

/// `name = value` as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// Raw right-hand side text
    pub value: String,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A `for`/`while` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopHeader {
    /// Loop variable, when the header declares one
    pub variable: Option<String>,
    /// Raw initializer text, when recognizable
    pub initial: Option<String>,
}

impl LoopHeader {
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn with_variable(variable: impl Into<String>, initial: Option<String>) -> Self {
        Self {
            variable: Some(variable.into()),
            initial,
        }
    }
}

/// One argument of a print statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintArg {
    /// String literal contents (quotes already stripped)
    Literal(String),
    Identifier(String),
    /// Any other expression; known identifiers are substituted
    Expression(String),
    /// Interpolated string body, `open` is `${` or `{`
    Template { text: String, open: &'static str },
    /// printf-style call: format string contents plus raw arguments
    Format { template: String, args: Vec<String> },
}

/// Print/output statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStatement {
    pub args: Vec<PrintArg>,
    /// Text placed between rendered arguments
    pub separator: &'static str,
}

impl PrintStatement {
    /// Arguments joined with a space (console.log, print)
    pub fn spaced(args: Vec<PrintArg>) -> Self {
        Self {
            args,
            separator: " ",
        }
    }

    /// Arguments concatenated (`+` operands, `<<` operands)
    pub fn concatenated(args: Vec<PrintArg>) -> Self {
        Self {
            args,
            separator: "",
        }
    }
}

/// Call of a declared callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub callee: String,
    /// Raw argument texts in order
    pub args: Vec<String>,
}

impl CallSite {
    pub fn new(callee: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            callee: callee.into(),
            args,
        }
    }
}

/// Language-specific recognition over scanned units
///
/// Every method looks at one unit and reports what it recognizes; nothing
/// here mutates trace state. Unrecognized constructs return `None`/empty.
pub trait Recognizer: Send + Sync {
    fn language(&self) -> Language;

    /// Split source into a scanned document
    fn scan(&self, source: &str) -> Result<ScannedDocument>;

    /// Name of a callable declared by this unit (pre-scan)
    fn declared_callable(&self, unit: &ScannedUnit<'_>) -> Option<String>;

    /// Declarations with initializers (`int x = 5`, `let x = 5`)
    fn declarations(&self, unit: &ScannedUnit<'_>) -> Vec<Binding>;

    /// Plain assignment that is not also a declaration
    fn assignment(&self, unit: &ScannedUnit<'_>) -> Option<Binding>;

    fn classify(&self, unit: &ScannedUnit<'_>, document: &ScannedDocument) -> Option<StructureMatch>;

    fn loop_header(&self, unit: &ScannedUnit<'_>) -> Option<LoopHeader>;

    fn print(&self, unit: &ScannedUnit<'_>) -> Option<PrintStatement>;

    /// Calls to names in `callables`, in source order
    fn calls(&self, unit: &ScannedUnit<'_>, callables: &FxHashSet<String>) -> Vec<CallSite>;
}
