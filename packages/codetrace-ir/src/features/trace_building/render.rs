//! Print statement rendering

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::ports::{PrintArg, PrintStatement};
use crate::features::state_tracking::StateTracker;

lazy_static! {
    static ref FORMAT_SPEC: Regex = Regex::new(r"%[-+ 0#]*\d*(?:\.\d+)?([a-zA-Z%])").unwrap();
}

/// Render a print statement against the current variable state
pub fn render_print(statement: &PrintStatement, state: &StateTracker) -> String {
    statement
        .args
        .iter()
        .map(|arg| render_arg(arg, state))
        .collect::<Vec<_>>()
        .join(statement.separator)
}

fn render_arg(arg: &PrintArg, state: &StateTracker) -> String {
    match arg {
        PrintArg::Literal(text) => text.clone(),
        PrintArg::Identifier(name) => state.lookup(name).to_string(),
        PrintArg::Expression(expr) => state.render_expression(expr),
        PrintArg::Template { text, open } => render_template(text, open, state),
        PrintArg::Format { template, args } => render_format(template, args, state),
    }
}

/// Substitute `${expr}` (or `{expr}`) holes in an interpolated string body
fn render_template(text: &str, open: &str, state: &StateTracker) -> String {
    let python_style = open == "{";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        if python_style && (rest.starts_with("{{") || rest.starts_with("}}")) {
            out.push_str(&rest[..1]);
            rest = &rest[2..];
            continue;
        }
        if rest.starts_with(open) {
            let body = &rest[open.len()..];
            if let Some(end) = closing_brace(body) {
                let mut expr = &body[..end];
                if python_style {
                    expr = expr.split([':', '!']).next().unwrap_or(expr);
                }
                out.push_str(&state.render_expression(expr));
                rest = &body[end + 1..];
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Index of the `}` closing an already-opened brace
fn closing_brace(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// printf-style rendering; unmatched specifiers stay as written
fn render_format(template: &str, args: &[String], state: &StateTracker) -> String {
    let mut remaining = args.iter();
    let rendered = FORMAT_SPEC.replace_all(template, |caps: &Captures| match &caps[1] {
        "%" => "%".to_string(),
        "n" => String::new(),
        _ => match remaining.next() {
            Some(arg) => state.render_expression(arg),
            None => caps[0].to_string(),
        },
    });
    rendered.trim_end_matches("\\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> StateTracker {
        let mut state = StateTracker::new();
        state.observe("x", "5");
        state.observe("name", "Ada");
        state
    }

    #[test]
    fn test_spaced_arguments() {
        let stmt = PrintStatement::spaced(vec![
            PrintArg::Literal("x is".into()),
            PrintArg::Identifier("x".into()),
        ]);
        assert_eq!(render_print(&stmt, &state()), "x is 5");
    }

    #[test]
    fn test_concatenated_arguments() {
        let stmt = PrintStatement::concatenated(vec![
            PrintArg::Literal("x = ".into()),
            PrintArg::Identifier("x".into()),
        ]);
        assert_eq!(render_print(&stmt, &state()), "x = 5");
    }

    #[test]
    fn test_templates() {
        let js = PrintArg::Template {
            text: "Hi ${name}, x+1=${x + 1}".into(),
            open: "${",
        };
        assert_eq!(render_arg(&js, &state()), "Hi Ada, x+1=5 + 1");

        let py = PrintArg::Template {
            text: "{name}: {x:>3} {{literal}}".into(),
            open: "{",
        };
        assert_eq!(render_arg(&py, &state()), "Ada: 5 {literal}");
    }

    #[test]
    fn test_format() {
        let arg = PrintArg::Format {
            template: "%s has %d items, 100%%%n".into(),
            args: vec!["name".into(), "x".into()],
        };
        assert_eq!(render_arg(&arg, &state()), "Ada has 5 items, 100%");

        let missing = PrintArg::Format {
            template: "value: %d\\n".into(),
            args: vec![],
        };
        assert_eq!(render_arg(&missing, &state()), "value: %d");
    }
}
