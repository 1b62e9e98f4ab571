//! Code extraction: pull the code body and language out of a message.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::classify::FENCE;
use super::language::{PLAIN_TEXT, canonical_language, infer_language};

/// Code body with its language identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeUnit {
    pub language: String,
    pub code: String,
}

impl CodeUnit {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }

    /// Same language, different body. Used after formatting.
    pub fn with_code(self, code: String) -> Self {
        Self { code, ..self }
    }
}

impl Default for CodeUnit {
    fn default() -> Self {
        Self::new(PLAIN_TEXT, "")
    }
}

fn inline_capture() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid inline pattern"))
}

/// Split fenced text into (declared language, body).
/// The first and last lines are dropped as fence lines, so an unclosed fence loses its last line.
fn split_fenced(text: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = text.split('\n').collect();
    let first = lines.first()?.trim();
    if !first.starts_with(FENCE) {
        return None;
    }
    let declared = first.replacen(FENCE, "", 1).trim().to_lowercase();
    let language = if declared.is_empty() {
        PLAIN_TEXT.to_string()
    } else {
        declared
    };
    let body = if lines.len() > 2 {
        lines[1..lines.len() - 1].join("\n")
    } else {
        String::new()
    };
    Some((language, body))
}

/// Extract the code body and language from `text`.
///
/// Fenced blocks take the language from the opening line; inline spans and bare text start
/// out as [`PLAIN_TEXT`] and get a language inferred from the body. The result is resolved
/// through the alias table and the body is trimmed.
pub fn extract(text: &str) -> CodeUnit {
    if text.is_empty() {
        return CodeUnit::default();
    }

    let (language, code) = if text.contains(FENCE) {
        split_fenced(text).unwrap_or_else(|| (PLAIN_TEXT.to_string(), text.to_string()))
    } else if text.contains('`') {
        let code = inline_capture()
            .captures(text)
            .and_then(|c| c.get(1))
            .map_or(text, |m| m.as_str());
        (PLAIN_TEXT.to_string(), code.to_string())
    } else {
        (PLAIN_TEXT.to_string(), text.to_string())
    };

    let language = if language == PLAIN_TEXT {
        infer_language(&code).to_string()
    } else {
        language
    };
    let language = canonical_language(&language).to_string();
    log::debug!("extract: language={} ({} bytes)", language, code.len());

    CodeUnit::new(language, code.trim())
}
