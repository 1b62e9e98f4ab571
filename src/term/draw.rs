//! Build styled display lines for messages.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::constants::{
    ACCENT, ACCENT_SECONDARY, FRAME_BOTTOM, FRAME_SIDE, FRAME_TOP, MUTED, RUNNABLE_MARKER,
};
use super::syntax::highlight_code;
use crate::core::config::Config;
use crate::core::extract::CodeUnit;
use crate::core::language::is_executable;
use crate::core::message::{Message, Rendered, Sender, render_message};

fn frame_style() -> Style {
    Style::default().fg(ACCENT)
}

/// Header, numbered and highlighted body, footer.
pub(crate) fn code_block_lines(unit: &CodeUnit, theme: &str) -> Vec<Line<'static>> {
    let mut out = Vec::new();

    let mut header = vec![
        Span::styled(FRAME_TOP, frame_style()),
        Span::styled(
            unit.language.to_uppercase(),
            frame_style().add_modifier(Modifier::BOLD),
        ),
    ];
    if is_executable(&unit.language) {
        header.push(Span::styled(RUNNABLE_MARKER, Style::default().fg(MUTED)));
    }
    out.push(Line::from(header));

    let highlighted = highlight_code(&unit.language, &unit.code, theme);
    // Single-line snippets are shown without a gutter.
    let gutter_width = if highlighted.len() > 1 {
        highlighted.len().to_string().len()
    } else {
        0
    };
    for (idx, spans) in highlighted.into_iter().enumerate() {
        let mut line = vec![Span::styled(FRAME_SIDE, frame_style())];
        if gutter_width > 0 {
            line.push(Span::styled(
                format!("{:>width$} ", idx + 1, width = gutter_width),
                Style::default().fg(MUTED),
            ));
        }
        line.extend(spans);
        out.push(Line::from(line));
    }

    out.push(Line::from(Span::styled(FRAME_BOTTOM, frame_style())));
    out
}

fn sender_line(sender: Sender) -> Line<'static> {
    let color = match sender {
        Sender::Ai => ACCENT,
        Sender::User => ACCENT_SECONDARY,
    };
    Line::from(Span::styled(
        format!("{}:", sender),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// All display lines for one message: sender label, then wrapped prose or a code block.
pub(crate) fn message_lines(message: &Message, config: &Config) -> Vec<Line<'static>> {
    let mut out = vec![sender_line(message.sender)];
    match render_message(message) {
        Rendered::Plain(text) => {
            // textwrap breaks at embedded newlines and keeps blank lines.
            out.extend(
                textwrap::wrap(&text, config.width)
                    .into_iter()
                    .map(|l| Line::from(Span::raw(l.into_owned()))),
            );
        }
        Rendered::Code(unit) => {
            log::debug!("Rendering {} code block", unit.language);
            out.extend(code_block_lines(&unit, &config.theme));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn code_block_has_header_and_numbered_lines() {
        let unit = CodeUnit::new("python", "def f():\n    return 1");
        let lines = code_block_lines(&unit, "base16-ocean.dark");
        assert_eq!(lines.len(), 4);
        assert_eq!(plain(&lines[0]), "┌ PYTHON ▶ runnable");
        assert_eq!(plain(&lines[1]), "│ 1 def f():");
        assert_eq!(plain(&lines[2]), "│ 2     return 1");
        assert_eq!(plain(&lines[3]), "└");
    }

    #[test]
    fn single_line_block_has_no_gutter() {
        let unit = CodeUnit::new("sql", "SELECT 1");
        let lines = code_block_lines(&unit, "base16-ocean.dark");
        assert_eq!(plain(&lines[0]), "┌ SQL");
        assert_eq!(plain(&lines[1]), "│ SELECT 1");
    }

    #[test]
    fn gutter_is_right_aligned() {
        let code: Vec<String> = (1..=10).map(|i| format!("x{}", i)).collect();
        let unit = CodeUnit::new("text", code.join("\n"));
        let lines = code_block_lines(&unit, "base16-ocean.dark");
        assert_eq!(plain(&lines[1]), "│  1 x1");
        assert_eq!(plain(&lines[10]), "│ 10 x10");
    }

    #[test]
    fn prose_message_is_wrapped() {
        let config = Config {
            width: 10,
            ..Config::default()
        };
        let lines = message_lines(&Message::new(Sender::User, "Hello there friend"), &config);
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, ["you:", "Hello", "there", "friend"]);
    }

    #[test]
    fn prose_message_keeps_blank_lines() {
        let lines = message_lines(&Message::new(Sender::Ai, "first\n\nsecond"), &Config::default());
        let text: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(text, ["ai:", "first", "", "second"]);
    }

    #[test]
    fn code_message_becomes_block() {
        let lines = message_lines(
            &Message::new(Sender::Ai, "```css\na{color:red;}\n```"),
            &Config::default(),
        );
        assert_eq!(plain(&lines[0]), "ai:");
        assert_eq!(plain(&lines[1]), "┌ CSS");
        assert_eq!(plain(&lines[2]), "│ 1 a {");
    }
}
