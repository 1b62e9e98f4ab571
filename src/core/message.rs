//! Chat messages and the classify → extract → format pipeline that prepares them for display.

use serde::{Deserialize, Serialize};

use super::classify::classify;
use super::extract::{CodeUnit, extract};
use super::format::format;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "you"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// One entry of a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    /// Build a message, trimming surrounding whitespace from the text.
    pub fn new(sender: Sender, text: &str) -> Self {
        Self {
            sender,
            text: text.trim().to_string(),
        }
    }
}

/// What the display layer should show for a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Plain(String),
    /// Extracted and formatted code.
    Code(CodeUnit),
}

/// Run text through classification and, for code, extraction and formatting.
pub fn render_text(text: &str) -> Rendered {
    if !classify(text) {
        return Rendered::Plain(text.to_string());
    }
    let unit = extract(text);
    let formatted = format(&unit.code, &unit.language);
    Rendered::Code(unit.with_code(formatted))
}

pub fn render_message(message: &Message) -> Rendered {
    render_text(&message.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_new_trims_text() {
        let m = Message::new(Sender::Ai, "  hello \n");
        assert_eq!(m.text, "hello");
        assert_eq!(m.sender, Sender::Ai);
    }

    #[test]
    fn prose_renders_plain() {
        let m = Message::new(Sender::User, "Hello, how are you today");
        assert_eq!(
            render_message(&m),
            Rendered::Plain("Hello, how are you today".to_string())
        );
    }

    #[test]
    fn fenced_sql_renders_formatted_code() {
        let m = Message::new(Sender::Ai, "```sql\nselect id from users where id = 1\n```");
        match render_message(&m) {
            Rendered::Code(unit) => {
                assert_eq!(unit.language, "sql");
                assert_eq!(unit.code, "SELECT ID \nFROM USERS \nWHERE ID = 1");
            }
            other => panic!("expected Code, got {:?}", other),
        }
    }

    #[test]
    fn bare_python_renders_formatted_code() {
        match render_text("def f(x):\n        return x") {
            Rendered::Code(unit) => {
                assert_eq!(unit.language, "python");
                assert_eq!(unit.code, "def f(x):\n    return x");
            }
            other => panic!("expected Code, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_renders_plain() {
        assert_eq!(render_text(""), Rendered::Plain(String::new()));
    }

    #[test]
    fn sender_serde_names() {
        let json = serde_json::to_string(&Sender::Ai).expect("serialize");
        assert_eq!(json, "\"ai\"");
        let s: Sender = serde_json::from_str("\"user\"").expect("deserialize");
        assert_eq!(s, Sender::User);
    }
}
