//! Java line rules

use lazy_static::lazy_static;
use regex::Regex;

use super::c_like::{balanced_parens, format_call, literal_elements, print_arg, LineRecognizer, LineRules};
use crate::features::classification::StructureMatch;
use crate::features::trace_building::{PrintArg, PrintStatement};
use crate::shared::models::StructureTag;
use crate::shared::ports::Language;
use crate::shared::utils::literal::{is_string_literal, split_top_level};

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(
        r"^\s*(?:(?:public|private|protected|static|final)\s+)*(?:int|long|short|byte|float|double|boolean|char|String|var|Integer|Long|Short|Byte|Double|Float|Boolean|Character|Object)(?:\s*\[\])*\s+(.*=.*)"
    )
    .unwrap();

    static ref RECORD_HEADER: Regex = Regex::new(
        r"^\s*(?:(?:public|private|protected|static|final|abstract)\s+)*class\s+([A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*(?:extends\b|implements\b|\{|$)"
    )
    .unwrap();

    static ref PRINT: Regex = Regex::new(r"\bSystem\.out\.print(?:ln)?\s*\(").unwrap();

    static ref PRINTF: Regex =
        Regex::new(r"\bSystem\.out\.(?:printf|format)\s*\(|\bString\.format\s*\(").unwrap();

    /// `int[] a = {1, 2}` / `int[] a = new int[]{1, 2}`
    static ref ARRAY_LITERAL: Regex = Regex::new(
        r"^\s*(?:(?:public|private|protected|static|final)\s+)*[\w<>]+\s*(?:\[\]\s*)+([A-Za-z_]\w*)\s*(?:\[\]\s*)*=\s*(?:new\s+\w+\s*(?:\[\s*\]\s*)+)?\{(.*)\}"
    )
    .unwrap();

    /// `int[] a = new int[5];`, `int a[];`
    static ref ARRAY_DECL: Regex = Regex::new(
        r"^\s*(?:(?:public|private|protected|static|final)\s+)*[\w<>]+(?:\s*\[\]\s*|\s+)(?:\[\]\s*)*([A-Za-z_]\w*)\s*(?:\[\]\s*)*(?:=\s*new\s+\w+\s*\[|;)"
    )
    .unwrap();

    static ref LIST_OF: Regex = Regex::new(
        r"\b(?:List|ArrayList|Collection)\s*<[^>]*>\s+([A-Za-z_]\w*)\s*=\s*(?:Arrays\.asList|List\.of)\s*\("
    )
    .unwrap();

    static ref LIST_DECL: Regex =
        Regex::new(r"\b(?:List|ArrayList)\s*<[^>]*>\s+([A-Za-z_]\w*)").unwrap();

    static ref MAP_OF: Regex = Regex::new(
        r"\b(?:Map|HashMap|TreeMap)\s*<[^=]*>\s+([A-Za-z_]\w*)\s*=\s*Map\.(?:of|ofEntries)\s*\("
    )
    .unwrap();
}

/// Java patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaRules;

pub type JavaRecognizer = LineRecognizer<JavaRules>;

impl LineRules for JavaRules {
    fn language(&self) -> Language {
        Language::Java
    }

    fn declaration(&self) -> &'static Regex {
        &DECLARATION
    }

    fn record_header(&self) -> &'static Regex {
        &RECORD_HEADER
    }

    /// `System.out.println(...)` concatenates `+` operands when a string
    /// literal takes part; otherwise the argument is one expression
    fn print(&self, code: &str) -> Option<PrintStatement> {
        if PRINTF.is_match(code) {
            return format_call(code, &PRINTF);
        }

        let found = PRINT.find(code)?;
        let inner = balanced_parens(code, found.end() - 1)?;
        if inner.trim().is_empty() {
            return Some(PrintStatement::concatenated(vec![PrintArg::Literal(String::new())]));
        }

        let parts = split_top_level(inner, "+");
        let concatenation = parts.len() > 1 && parts.iter().any(|p| is_string_literal(p));
        let args = if concatenation {
            parts.into_iter().map(print_arg).collect()
        } else {
            vec![print_arg(inner)]
        };
        Some(PrintStatement::concatenated(args))
    }

    fn array(&self, code: &str) -> Option<StructureMatch> {
        if let Some(caps) = ARRAY_LITERAL.captures(code) {
            return Some(
                StructureMatch::array(literal_elements(&caps[2])).with_owner(Some(caps[1].to_string())),
            );
        }
        if let Some(found) = LIST_OF.find(code) {
            let owner = LIST_OF.captures(code).map(|caps| caps[1].to_string());
            let inner = balanced_parens(code, found.end() - 1)?;
            return Some(StructureMatch::array(literal_elements(inner)).with_owner(owner));
        }
        if code.contains('[') {
            if let Some(caps) = ARRAY_DECL.captures(code) {
                return Some(StructureMatch::new(StructureTag::Array).with_owner(Some(caps[1].to_string())));
            }
        }
        if let Some(caps) = LIST_DECL.captures(code) {
            return Some(StructureMatch::new(StructureTag::Array).with_owner(Some(caps[1].to_string())));
        }
        None
    }

    fn dictionary(&self, code: &str) -> Option<StructureMatch> {
        let caps = MAP_OF.captures(code)?;
        Some(StructureMatch::new(StructureTag::DictionaryAsGraph).with_owner(Some(caps[1].to_string())))
    }
}
