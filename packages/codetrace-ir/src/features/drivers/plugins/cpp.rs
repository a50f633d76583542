//! C++ line rules

use lazy_static::lazy_static;
use regex::Regex;

use super::c_like::{format_call, literal_elements, print_arg, LineRecognizer, LineRules};
use crate::features::classification::StructureMatch;
use crate::features::trace_building::PrintStatement;
use crate::shared::models::StructureTag;
use crate::shared::ports::Language;
use crate::shared::utils::literal::{is_string_literal, split_top_level, strip_quotes};

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(
        r"^\s*(?:(?:static|const|constexpr|unsigned|signed|long|short|volatile)\s+)*(?:std::)?(?:int|long|short|float|double|bool|char|auto|string|size_t)[\s\*&]+(.*=.*)"
    )
    .unwrap();

    static ref RECORD_HEADER: Regex =
        Regex::new(r"^\s*(?:class|struct)\s+([A-Za-z_]\w*)\s*(?:[:{]|$)").unwrap();

    static ref COUT: Regex = Regex::new(r"\b(?:std::)?cout\s*<<(.*)").unwrap();

    static ref PRINTF: Regex = Regex::new(r"\b(?:std::)?printf\s*\(").unwrap();

    /// `int a[3] = {1, 2, 3};`, `int a[10];`
    static ref C_ARRAY: Regex = Regex::new(
        r"^\s*(?:(?:static|const|constexpr|unsigned)\s+)*(?:std::)?(?:int|long|short|float|double|bool|char|string|size_t)\s+([A-Za-z_]\w*)\s*\[[^\]]*\]\s*(?:=\s*)?(?:\{(.*)\})?"
    )
    .unwrap();

    /// `vector<int> v = {1, 2};`, `std::array<int, 3> a{1, 2, 3};`
    static ref SEQUENCE: Regex = Regex::new(
        r"\b(?:std::)?(?:vector|array)\s*<.*>\s+([A-Za-z_]\w*)\s*(?:=\s*)?(?:\{(.*)\})?"
    )
    .unwrap();

    static ref MAP: Regex =
        Regex::new(r"\b(?:std::)?(?:unordered_)?map\s*<.*>\s+([A-Za-z_]\w*)\s*=?\s*\{").unwrap();
}

/// C++ patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct CppRules;

pub type CppRecognizer = LineRecognizer<CppRules>;

impl LineRules for CppRules {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn declaration(&self) -> &'static Regex {
        &DECLARATION
    }

    fn record_header(&self) -> &'static Regex {
        &RECORD_HEADER
    }

    /// `cout << a << b << endl;` concatenates operands, line breaks dropped
    fn print(&self, code: &str) -> Option<PrintStatement> {
        if let Some(caps) = COUT.captures(code) {
            let chain = caps.get(1)?.as_str();
            let chain = match chain.rfind(';') {
                Some(end) => &chain[..end],
                None => chain,
            };

            let args = split_top_level(chain, "<<")
                .into_iter()
                .map(str::trim)
                .filter(|part| !is_line_break(part))
                .map(|part| {
                    if is_string_literal(part) {
                        let text = strip_quotes(part).trim_end_matches("\\n");
                        print_arg(&format!("\"{}\"", text))
                    } else {
                        print_arg(part)
                    }
                })
                .collect();
            return Some(PrintStatement::concatenated(args));
        }

        if PRINTF.is_match(code) {
            return format_call(code, &PRINTF);
        }
        None
    }

    fn array(&self, code: &str) -> Option<StructureMatch> {
        let caps = C_ARRAY.captures(code).or_else(|| SEQUENCE.captures(code))?;
        let owner = Some(caps[1].to_string());
        let found = match caps.get(2) {
            Some(inner) => StructureMatch::array(literal_elements(inner.as_str())),
            None => StructureMatch::new(StructureTag::Array),
        };
        Some(found.with_owner(owner))
    }

    fn dictionary(&self, code: &str) -> Option<StructureMatch> {
        let caps = MAP.captures(code)?;
        Some(StructureMatch::new(StructureTag::DictionaryAsGraph).with_owner(Some(caps[1].to_string())))
    }
}

fn is_line_break(part: &str) -> bool {
    matches!(part, "" | "endl" | "std::endl" | "\"\\n\"" | "'\\n'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::trace_building::PrintArg;

    #[test]
    fn test_cout_chain() {
        let stmt = CppRules.print("    cout << \"x = \" << x << endl;").unwrap();
        assert_eq!(
            stmt.args,
            vec![PrintArg::Literal("x = ".into()), PrintArg::Identifier("x".into())]
        );
        assert_eq!(stmt.separator, "");
    }

    #[test]
    fn test_cout_drops_newline_escapes() {
        let stmt = CppRules.print("std::cout << \"done\\n\";").unwrap();
        assert_eq!(stmt.args, vec![PrintArg::Literal("done".into())]);

        let stmt = CppRules.print("cout << a + b << \"\\n\";").unwrap();
        assert_eq!(stmt.args, vec![PrintArg::Expression("a + b".into())]);
    }

    #[test]
    fn test_printf() {
        let stmt = CppRules.print("printf(\"%d\\n\", n);").unwrap();
        assert!(matches!(&stmt.args[0], PrintArg::Format { args, .. } if args == &vec!["n".to_string()]));
    }

    #[test]
    fn test_arrays() {
        let found = CppRules.array("int arr[3] = {1, 2, 3};").unwrap();
        assert_eq!(found.elements, Some(vec!["1".into(), "2".into(), "3".into()]));
        assert_eq!(found.owner.as_deref(), Some("arr"));

        let sized = CppRules.array("int buf[10];").unwrap();
        assert_eq!(sized.elements, None);

        let vector = CppRules.array("std::vector<int> v = {7, 8};").unwrap();
        assert_eq!(vector.elements, Some(vec!["7".into(), "8".into()]));
        assert_eq!(vector.owner.as_deref(), Some("v"));

        assert!(CppRules.array("int x = 5;").is_none());
    }

    #[test]
    fn test_map_literal() {
        let found = CppRules
            .dictionary("std::map<std::string, int> ages = {{\"a\", 1}};")
            .unwrap();
        assert_eq!(found.tag, StructureTag::DictionaryAsGraph);
        assert_eq!(found.owner.as_deref(), Some("ages"));
    }

    #[test]
    fn test_record_header_skips_fields() {
        assert!(RECORD_HEADER.is_match("struct Node {"));
        assert!(RECORD_HEADER.is_match("class TreeNode : public Base {"));
        assert!(!RECORD_HEADER.is_match("    struct Node* next;"));
    }
}
