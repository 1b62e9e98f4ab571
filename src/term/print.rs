//! Write styled lines to a terminal stream with crossterm escape sequences.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use ratatui::style::{Color, Modifier};
use ratatui::text::{Line, Span};

/// Convert a ratatui color to its crossterm counterpart.
fn translate_colour(c: Color) -> TermColor {
    match c {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}

fn modifier_attributes(m: Modifier) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    if m.contains(Modifier::BOLD) {
        attrs.push(Attribute::Bold);
    }
    if m.contains(Modifier::DIM) {
        attrs.push(Attribute::Dim);
    }
    if m.contains(Modifier::ITALIC) {
        attrs.push(Attribute::Italic);
    }
    if m.contains(Modifier::UNDERLINED) {
        attrs.push(Attribute::Underlined);
    }
    attrs
}

fn write_span<W: Write>(out: &mut W, span: &Span<'_>, color: bool) -> io::Result<()> {
    if !color || span.style == Default::default() {
        return queue!(out, Print(span.content.as_ref()));
    }
    if let Some(fg) = span.style.fg {
        queue!(out, SetForegroundColor(translate_colour(fg)))?;
    }
    if let Some(bg) = span.style.bg {
        queue!(out, SetBackgroundColor(translate_colour(bg)))?;
    }
    for attr in modifier_attributes(span.style.add_modifier) {
        queue!(out, SetAttribute(attr))?;
    }
    queue!(
        out,
        Print(span.content.as_ref()),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

/// Write `lines` to `out`, one terminal line each. With `color` off only the text is written.
pub(crate) fn write_lines<W: Write>(out: &mut W, lines: &[Line<'_>], color: bool) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            write_span(out, span, color)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn sample() -> Vec<Line<'static>> {
        vec![
            Line::from(vec![
                Span::styled("ai:", Style::default().fg(Color::Rgb(1, 2, 3))),
                Span::raw(" hi"),
            ]),
            Line::from(Span::raw("bye")),
        ]
    }

    #[test]
    fn write_lines_without_color_is_plain_text() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &sample(), false).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "ai: hi\nbye\n");
    }

    #[test]
    fn write_lines_with_color_emits_escapes() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &sample(), true).expect("write");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.contains("\x1b["));
        assert!(s.contains("ai:"));
        assert!(s.ends_with("bye\n"));
    }

    #[test]
    fn translate_colour_rgb() {
        assert_eq!(
            translate_colour(Color::Rgb(9, 8, 7)),
            TermColor::Rgb { r: 9, g: 8, b: 7 }
        );
    }
}
