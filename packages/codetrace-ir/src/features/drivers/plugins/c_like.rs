//! Line-oriented recognition for C-like languages
//!
//! Java and C++ share function headers, assignments, loops and call
//! extraction. Declarations, print statements and container literals differ
//! and come from a `LineRules` implementation.

use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::features::classification::{block_from, classify_record, container_shape, StructureMatch};
use crate::features::scanning::{ScannedDocument, ScannedUnit};
use crate::features::trace_building::{
    Binding, CallSite, LoopHeader, PrintArg, PrintStatement, Recognizer,
};
use crate::shared::ports::Language;
use crate::shared::utils::literal::{is_identifier, is_string_literal, split_top_level, strip_quotes};

lazy_static! {
    /// `<types> name(params) {`; the body may follow on the same line
    static ref FUNCTION_HEADER: Regex = Regex::new(
        r"^\s*((?:[A-Za-z_][\w:<>,\[\]]*[\s\*&]+)+)([A-Za-z_]\w*)\s*\(([^)]*)\)\s*(?:const\s*)?(?:throws\s+[\w.,\s]+?)?\s*(\{|$)"
    )
    .unwrap();

    static ref DECLARATOR: Regex =
        Regex::new(r"^\s*[\*&]*\s*([A-Za-z_]\w*)\s*(?:\[[^\]]*\])*\s*=\s*(.+?)\s*$").unwrap();

    static ref ASSIGNMENT: Regex =
        Regex::new(r"^\s*([A-Za-z_]\w*)\s*=\s*([^=;].*)").unwrap();

    static ref FOR_INIT: Regex = Regex::new(
        r"\bfor\s*\(\s*(?:(?:final|const)\s+)?(?:[A-Za-z_][\w:<>\[\]]*[\s\*&]+)?([A-Za-z_]\w*)\s*=\s*([^;]+);"
    )
    .unwrap();

    static ref FOR_EACH: Regex = Regex::new(
        r"\bfor\s*\(\s*(?:(?:final|const)\s+)?[A-Za-z_][\w:<>\[\]]*[\s\*&]+([A-Za-z_]\w*)\s*:[^:]"
    )
    .unwrap();

    static ref FOR_ANY: Regex = Regex::new(r"\bfor\s*\(").unwrap();

    static ref WHILE: Regex = Regex::new(r"^\s*(?:\}\s*)?while\s*\(").unwrap();

    static ref CALL: Regex = Regex::new(r"\b([A-Za-z_]\w*)\s*\(").unwrap();

    static ref BARE_LIST: Regex = Regex::new(r"^\s*\[(.*)\]\s*;?\s*$").unwrap();

    /// Candidate container names: generic heads, constructed types, declared types
    static ref CONTAINER_NAMES: Regex = Regex::new(
        r"(?:^\s*(?:std::)?([A-Za-z_]\w*)\s+[A-Za-z_]\w*\s*[;=({])|(?:([A-Za-z_]\w*)\s*<)|(?:\bnew\s+([A-Za-z_]\w*))"
    )
    .unwrap();
}

const HEADER_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "sizeof", "else", "do", "new", "delete",
    "throw", "case", "goto",
];

/// Language-specific line patterns
pub trait LineRules: Send + Sync {
    fn language(&self) -> Language;

    /// Declaration with initializer; group 1 holds the declarator list up to
    /// the end of the line
    fn declaration(&self) -> &'static Regex;

    /// Record (class/struct) header; group 1 holds the name
    fn record_header(&self) -> &'static Regex;

    fn print(&self, code: &str) -> Option<PrintStatement>;

    fn array(&self, code: &str) -> Option<StructureMatch>;

    fn dictionary(&self, code: &str) -> Option<StructureMatch>;
}

/// Recognizer over source lines, parameterized by language rules
#[derive(Debug, Clone, Default)]
pub struct LineRecognizer<R> {
    rules: R,
}

impl<R: LineRules> LineRecognizer<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    /// Function header on this line: (name, byte offset where the body starts)
    fn function_header(code: &str) -> Option<(String, usize)> {
        let caps = FUNCTION_HEADER.captures(code)?;
        let types = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();

        let keyword_type = types
            .split(|c: char| c.is_whitespace() || c == '*' || c == '&')
            .any(|token| HEADER_KEYWORDS.contains(&token));
        if keyword_type || HEADER_KEYWORDS.contains(&name) {
            return None;
        }
        Some((name.to_string(), caps.get(0)?.end()))
    }
}

impl<R: LineRules> Recognizer for LineRecognizer<R> {
    fn language(&self) -> Language {
        self.rules.language()
    }

    fn scan(&self, source: &str) -> Result<ScannedDocument> {
        Ok(ScannedDocument::lines(source))
    }

    fn declared_callable(&self, unit: &ScannedUnit<'_>) -> Option<String> {
        Self::function_header(code_of(unit.text)).map(|(name, _)| name)
    }

    fn declarations(&self, unit: &ScannedUnit<'_>) -> Vec<Binding> {
        let code = code_of(unit.text);
        let Some(list) = self
            .rules
            .declaration()
            .captures(code)
            .and_then(|caps| caps.get(1))
        else {
            return Vec::new();
        };

        split_top_level(first_statement(list.as_str()), ",")
            .into_iter()
            .filter_map(|declarator| {
                let caps = DECLARATOR.captures(declarator)?;
                Some(Binding::new(&caps[1], &caps[2]))
            })
            .collect()
    }

    fn assignment(&self, unit: &ScannedUnit<'_>) -> Option<Binding> {
        let caps = ASSIGNMENT.captures(code_of(unit.text))?;
        Some(Binding::new(&caps[1], first_statement(&caps[2]).trim()))
    }

    fn classify(&self, unit: &ScannedUnit<'_>, document: &ScannedDocument) -> Option<StructureMatch> {
        let code = code_of(unit.text);
        if code.trim().is_empty() {
            return None;
        }

        if let Some(found) = self.rules.array(code) {
            return Some(found);
        }
        if let Some(caps) = BARE_LIST.captures(code) {
            return Some(StructureMatch::array(literal_elements(&caps[1])));
        }
        if let Some(found) = self.rules.dictionary(code) {
            return Some(found);
        }

        if let Some(caps) = self.rules.record_header().captures(code) {
            let name = &caps[1];
            let body = block_from(document.source(), unit.line);
            if let Some(tag) = classify_record(name, body, document.source()) {
                return Some(StructureMatch::new(tag));
            }
        }

        let language = self.rules.language();
        CONTAINER_NAMES.captures_iter(code).find_map(|caps| {
            let name = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            let tag = container_shape(name.as_str(), language)?;
            Some(StructureMatch::new(tag))
        })
    }

    fn loop_header(&self, unit: &ScannedUnit<'_>) -> Option<LoopHeader> {
        let code = code_of(unit.text);
        if let Some(caps) = FOR_INIT.captures(code) {
            return Some(LoopHeader::with_variable(&caps[1], Some(caps[2].trim().to_string())));
        }
        if let Some(caps) = FOR_EACH.captures(code) {
            return Some(LoopHeader::with_variable(&caps[1], None));
        }
        if FOR_ANY.is_match(code) || WHILE.is_match(code) {
            return Some(LoopHeader::bare());
        }
        None
    }

    fn print(&self, unit: &ScannedUnit<'_>) -> Option<PrintStatement> {
        self.rules.print(code_of(unit.text))
    }

    fn calls(&self, unit: &ScannedUnit<'_>, callables: &FxHashSet<String>) -> Vec<CallSite> {
        if callables.is_empty() {
            return Vec::new();
        }
        let code = code_of(unit.text);
        // the declared name on its own header line is not a call
        let start = Self::function_header(code).map(|(_, end)| end).unwrap_or(0);
        let Some(searched) = code.get(start..) else {
            return Vec::new();
        };
        let masked = mask_quoted(searched);

        CALL.captures_iter(&masked)
            .filter_map(|caps| {
                let name = caps.get(1)?;
                if !callables.contains(name.as_str()) {
                    return None;
                }
                if masked[..name.start()].trim_end().ends_with("new") {
                    return None;
                }
                let open = caps.get(0)?.end() - 1;
                let inner = balanced_parens(searched, open)?;
                Some(CallSite::new(name.as_str(), split_args(inner)))
            })
            .collect()
    }
}

/// Line without a trailing `//` comment; empty for block-comment lines
pub fn code_of(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with("/*") || trimmed.starts_with('*') {
        return "";
    }

    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';
    for (idx, c) in line.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                } else if c == '/' && prev == '/' {
                    return &line[..idx - 1];
                }
            }
        }
        prev = c;
    }
    line
}

/// Text before the first top-level `;`
fn first_statement(text: &str) -> &str {
    split_top_level(text, ";").into_iter().next().unwrap_or(text)
}

/// Blank out string and char literal contents, keeping byte offsets
fn mask_quoted(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in text.chars() {
        let hidden = match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                quote.is_some()
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                false
            }
        };
        if hidden {
            masked.extend(std::iter::repeat(' ').take(c.len_utf8()));
        } else {
            masked.push(c);
        }
    }
    masked
}

/// Contents between the `(` at `open` and its matching `)`
pub fn balanced_parens(text: &str, open: usize) -> Option<&str> {
    let body = text.get(open + 1..)?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' if depth == 0 => return Some(&body[..idx]),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Top-level comma separated arguments, trimmed, empties dropped
pub fn split_args(inner: &str) -> Vec<String> {
    split_top_level(inner, ",")
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(String::from)
        .collect()
}

/// Elements of a literal list body; an empty body has no elements
pub fn literal_elements(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(inner, ",")
        .into_iter()
        .map(|element| element.trim().to_string())
        .collect()
}

/// Classify one print operand
pub fn print_arg(part: &str) -> PrintArg {
    let part = part.trim();
    if is_string_literal(part) {
        PrintArg::Literal(strip_quotes(part).to_string())
    } else if is_identifier(part) {
        PrintArg::Identifier(part.to_string())
    } else {
        PrintArg::Expression(part.to_string())
    }
}

/// printf-style call starting at the match of `call` (pattern ends at `(`)
pub fn format_call(code: &str, call: &Regex) -> Option<PrintStatement> {
    let found = call.find(code)?;
    let inner = balanced_parens(code, found.end() - 1)?;
    let mut parts = split_args(inner).into_iter();
    let template = parts.next()?;
    if !is_string_literal(&template) {
        return Some(PrintStatement::concatenated(vec![PrintArg::Expression(inner.to_string())]));
    }
    Some(PrintStatement::concatenated(vec![PrintArg::Format {
        template: strip_quotes(&template).to_string(),
        args: parts.collect(),
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_of_strips_comments() {
        assert_eq!(code_of("int x = 5; // five"), "int x = 5; ");
        assert_eq!(code_of("s = \"http://x\";"), "s = \"http://x\";");
        assert_eq!(code_of(" * javadoc"), "");
        assert_eq!(code_of("/* block */"), "");
    }

    #[test]
    fn test_balanced_parens() {
        let text = "f(a, g(b), \")\") + 1";
        assert_eq!(balanced_parens(text, 1), Some("a, g(b), \")\""));
        assert_eq!(balanced_parens("f(a", 1), None);
    }

    #[test]
    fn test_mask_quoted_keeps_offsets() {
        let text = "println(\"f(2); é\") + f(1)";
        let masked = mask_quoted(text);
        assert_eq!(masked.len(), text.len());
        assert_eq!(masked, "println(\"        \") + f(1)");
        assert_eq!(mask_quoted("c = '\\'' + g(x)"), "c = '  ' + g(x)");
    }

    #[test]
    fn test_first_statement() {
        assert_eq!(first_statement("\"a;b\"; x = 1;"), "\"a;b\"");
        assert_eq!(first_statement("5"), "5");
    }

    #[test]
    fn test_calls_inside_strings_are_ignored() {
        let recognizer = LineRecognizer::new(super::super::java::JavaRules);
        let callables: FxHashSet<String> = ["fact".to_string()].into_iter().collect();
        let unit = ScannedUnit {
            line: 0,
            text: "System.out.println(\"fact(2)\" + fact(3));",
            syntax: None,
            parent: None,
        };
        assert_eq!(
            recognizer.calls(&unit, &callables),
            vec![CallSite::new("fact", vec!["3".to_string()])]
        );
    }

    #[test]
    fn test_semicolon_in_string_value() {
        let recognizer = LineRecognizer::new(super::super::java::JavaRules);
        let unit = ScannedUnit {
            line: 0,
            text: "String s = \"a;b\"; int n = 2;",
            syntax: None,
            parent: None,
        };
        assert_eq!(recognizer.declarations(&unit), vec![Binding::new("s", "\"a;b\"")]);

        let assigned = ScannedUnit {
            line: 0,
            text: "s = \"c;d\";",
            syntax: None,
            parent: None,
        };
        assert_eq!(recognizer.assignment(&assigned), Some(Binding::new("s", "\"c;d\"")));
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args(" n - 1 , m "), vec!["n - 1", "m"]);
        assert!(split_args("  ").is_empty());
    }

    #[test]
    fn test_literal_elements() {
        assert_eq!(literal_elements("1, 2, 3"), vec!["1", "2", "3"]);
        assert_eq!(literal_elements("1, , 3"), vec!["1", "", "3"]);
        assert!(literal_elements(" ").is_empty());
    }

    #[test]
    fn test_print_arg_kinds() {
        assert_eq!(print_arg("\"hi\""), PrintArg::Literal("hi".into()));
        assert_eq!(print_arg(" x "), PrintArg::Identifier("x".into()));
        assert_eq!(print_arg("x + 1"), PrintArg::Expression("x + 1".into()));
    }
}
