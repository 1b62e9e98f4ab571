//! Syntax highlighting for code blocks using syntect.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::constants::ACCENT_SECONDARY;
use crate::core::config::DEFAULT_THEME;

/// Convert syntect Color to ratatui Color. Alpha 0 => None (colourless).
fn translate_colour(c: syntect::highlighting::Color) -> Option<Color> {
    let syntect::highlighting::Color { r, g, b, a } = c;
    (a > 0).then_some(Color::Rgb(r, g, b))
}

fn translate_font_style(f: FontStyle) -> Modifier {
    let mut m = Modifier::empty();
    if f.contains(FontStyle::BOLD) {
        m.insert(Modifier::BOLD);
    }
    if f.contains(FontStyle::ITALIC) {
        m.insert(Modifier::ITALIC);
    }
    if f.contains(FontStyle::UNDERLINE) {
        m.insert(Modifier::UNDERLINED);
    }
    m
}

/// Foreground and font style only; the theme background is left to the terminal.
fn translate_style(s: syntect::highlighting::Style) -> Style {
    let fg = translate_colour(s.foreground).unwrap_or(ACCENT_SECONDARY);
    Style::default()
        .fg(fg)
        .add_modifier(translate_font_style(s.font_style))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Look up a theme by name, falling back to the default theme and then to any bundled theme.
fn resolve_theme(name: &str) -> Option<&'static Theme> {
    let ts = theme_set();
    ts.themes.get(name).or_else(|| {
        log::warn!("Unknown theme {:?}, using {}", name, DEFAULT_THEME);
        ts.themes
            .get(DEFAULT_THEME)
            .or_else(|| ts.themes.values().next())
    })
}

/// Map a canonical language identifier to the file extension syntect indexes syntaxes by.
fn lang_to_extension(lang: &str) -> Option<&'static str> {
    let ext = match lang.trim().to_lowercase().as_str() {
        "rust" => "rs",
        "python" => "py",
        "javascript" => "js",
        "typescript" => "ts",
        "go" => "go",
        "ruby" => "rb",
        "bash" => "sh",
        "sql" => "sql",
        "json" => "json",
        "yaml" => "yml",
        "html" => "html",
        "css" => "css",
        "java" => "java",
        "php" => "php",
        "csharp" => "cs",
        "cpp" => "cpp",
        "c" => "c",
        _ => return None,
    };
    Some(ext)
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    syntax_set().find_syntax_by_extension(lang_to_extension(lang)?)
}

fn plain_line(line: &str) -> Vec<Span<'static>> {
    vec![Span::styled(
        line.to_string(),
        Style::default().fg(ACCENT_SECONDARY),
    )]
}

/// Highlight every line of `code`. Unknown languages, themes or highlighter errors fall back
/// to a single plain span per line. The result always has one entry per input line.
pub(crate) fn highlight_code(lang: &str, code: &str, theme: &str) -> Vec<Vec<Span<'static>>> {
    let lines: Vec<&str> = code.split('\n').collect();
    let (Some(syntax), Some(theme)) = (find_syntax(lang), resolve_theme(theme)) else {
        return lines.into_iter().map(plain_line).collect();
    };

    // One highlighter for the whole block so multi-line constructs keep their state.
    let mut h = HighlightLines::new(syntax, theme);
    let ps = syntax_set();
    lines
        .into_iter()
        .map(|line| {
            let with_ending = format!("{}\n", line);
            match h.highlight_line(&with_ending, ps) {
                Ok(segments) => segments
                    .into_iter()
                    .filter_map(|(style, content)| {
                        let s = content.trim_end_matches('\n');
                        (!s.is_empty()).then(|| Span::styled(s.to_string(), translate_style(style)))
                    })
                    .collect(),
                Err(e) => {
                    log::debug!("Highlight failed for {}: {}", lang, e);
                    plain_line(line)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn highlight_keeps_line_count_and_text() {
        let code = "fn main() {\n    println!(\"hi\");\n}";
        let lines = highlight_code("rust", code, DEFAULT_THEME);
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[1]), "    println!(\"hi\");");
    }

    #[test]
    fn highlight_produces_several_styles_for_known_language() {
        let lines = highlight_code("python", "def f(x): return 1", DEFAULT_THEME);
        assert!(lines[0].len() > 1);
    }

    #[test]
    fn unknown_language_is_plain() {
        let lines = highlight_code("cobol", "DISPLAY 'HI'.", DEFAULT_THEME);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 1);
        assert_eq!(lines[0][0].style.fg, Some(ACCENT_SECONDARY));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let lines = highlight_code("sql", "SELECT 1", "no-such-theme");
        assert_eq!(text_of(&lines[0]), "SELECT 1");
    }

    #[test]
    fn lang_to_extension_canonical_names() {
        assert_eq!(lang_to_extension("javascript"), Some("js"));
        assert_eq!(lang_to_extension("csharp"), Some("cs"));
        assert_eq!(lang_to_extension("text"), None);
    }
}
