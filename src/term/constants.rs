//! Terminal presentation constants: colors and code block chrome.

use ratatui::style::Color;

/// Accent green color (#98FB98). Used for the assistant label and code block frame.
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent (#7EC8E3). Fallback foreground for unhighlighted code.
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Muted grey for line numbers.
pub(super) const MUTED: Color = Color::Rgb(110, 110, 110);

/// Code block frame: top-left corner, vertical bar, bottom-left corner.
pub(super) const FRAME_TOP: &str = "┌ ";
pub(super) const FRAME_SIDE: &str = "│ ";
pub(super) const FRAME_BOTTOM: &str = "└";

/// Marker appended to the header of blocks in a runnable language.
pub(super) const RUNNABLE_MARKER: &str = " ▶ runnable";
