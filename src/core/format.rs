//! Best-effort code reformatting for display.
//!
//! Each language gets a handful of textual rewrites; none of them parse the code, so the
//! output is only a readable approximation. Unknown languages are trimmed and left alone.

use std::sync::OnceLock;

use regex::{Captures, Regex};

struct Rules {
    blank_runs: Regex,
    js_line_end: Regex,
    js_empty_braces: Regex,
    py_leading_ws: Regex,
    html_adjacent_tags: Regex,
    html_tag_text: Regex,
    css_open_brace: Regex,
    css_semicolon: Regex,
    css_lone_close: Regex,
    css_close_brace: Regex,
    sql_clause: Regex,
    sql_join: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("valid format rule");
        Rules {
            blank_runs: re(r"\n{3,}"),
            js_line_end: re(r"([^;])\n"),
            js_empty_braces: re(r"\{\n*\}"),
            py_leading_ws: re(r"(?m)^\s+"),
            html_adjacent_tags: re(r"><"),
            html_tag_text: re(r"(<[^/][^>]*>)([^<]*)"),
            css_open_brace: re(r"\{(\n)?"),
            css_semicolon: re(r";(\n)?"),
            css_lone_close: re(r"(?m)^\s+\}"),
            css_close_brace: re(r"\}(\n)?"),
            sql_clause: re(
                r"(?i)(\n *)?(?-u:\b)(SELECT|FROM|WHERE|GROUP BY|ORDER BY|HAVING|INSERT|UPDATE|DELETE)(?-u:\b)",
            ),
            sql_join: re(r"(?i)(\n *)?(?-u:\b)(INNER|LEFT|RIGHT|FULL|JOIN|ON)(?-u:\b)"),
        }
    })
}

/// Collapse runs of three or more newlines to a single blank line, then trim.
fn collapse_and_trim(code: &str) -> String {
    rules().blank_runs.replace_all(code, "\n\n").trim().to_string()
}

fn format_javascript(code: &str) -> String {
    let r = rules();
    let code = r.js_line_end.replace_all(code, "${1};\n");
    let code = r.js_empty_braces.replace_all(&code, "{\n}");
    collapse_and_trim(&code)
}

fn format_python(code: &str) -> String {
    let code = rules().py_leading_ws.replace_all(code, "    ");
    collapse_and_trim(&code)
}

fn format_html(code: &str) -> String {
    let r = rules();
    let code = r.html_adjacent_tags.replace_all(code, ">\n<");
    let code = r.html_tag_text.replace_all(&code, |caps: &Captures| {
        let tag = &caps[1];
        let text = &caps[2];
        // text that already starts on its own line is left where it is
        if text.is_empty() || text.starts_with('\n') {
            format!("{}{}", tag, text)
        } else {
            format!("{}\n    {}", tag, text)
        }
    });
    collapse_and_trim(&code)
}

/// Replace `token` with `expanded` unless it is already followed by a newline.
fn unless_newline<'a>(token: &'a str, expanded: &'a str) -> impl Fn(&Captures) -> String + 'a {
    move |caps: &Captures| {
        if caps.get(1).is_some() {
            format!("{}\n", token)
        } else {
            expanded.to_string()
        }
    }
}

fn format_css(code: &str) -> String {
    let r = rules();
    let code = r
        .css_open_brace
        .replace_all(code, unless_newline("{", " {\n    "));
    let code = r
        .css_semicolon
        .replace_all(&code, unless_newline(";", ";\n    "));
    let code = r.css_lone_close.replace_all(&code, "}");
    let code = r.css_close_brace.replace_all(&code, unless_newline("}", "}\n"));
    collapse_and_trim(&code)
}

fn format_sql(code: &str) -> String {
    let r = rules();
    let code = r.sql_clause.replace_all(code, "\n$2");
    let code = r.sql_join.replace_all(&code, "\n    $2");
    collapse_and_trim(&code).to_uppercase()
}

/// Reformat `code` for display according to `language` (a canonical identifier).
pub fn format(code: &str, language: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    log::trace!("format: language={}", language);
    match language {
        "javascript" | "typescript" => format_javascript(code),
        "python" => format_python(code),
        "html" => format_html(code),
        "css" => format_css(code),
        "sql" => format_sql(code),
        _ => code.trim().to_string(),
    }
}
