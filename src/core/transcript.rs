//! Conversation transcripts stored as JSON.
//!
//! Two shapes are accepted: `{"messages": [...]}` and a bare array of messages.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use super::message::Message;

/// Errors when loading a transcript file.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Failed to read transcript {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid transcript JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Wrapped { messages: Vec<Message> },
    Bare(Vec<Message>),
}

/// Ordered messages of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<Message>,
}

impl Transcript {
    /// Parse transcript JSON. Message text is trimmed and blank messages are dropped.
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        let file: TranscriptFile = serde_json::from_str(json)?;
        let raw = match file {
            TranscriptFile::Wrapped { messages } => messages,
            TranscriptFile::Bare(messages) => messages,
        };
        let total = raw.len();
        let messages: Vec<Message> = raw
            .into_iter()
            .map(|m| Message::new(m.sender, &m.text))
            .filter(|m| !m.text.is_empty())
            .collect();
        if messages.len() < total {
            log::debug!("Skipped {} blank messages", total - messages.len());
        }
        Ok(Self { messages })
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Load a transcript from disk.
pub fn load_transcript(path: &Path) -> Result<Transcript, TranscriptError> {
    let data = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Transcript::from_json(&data)
}
