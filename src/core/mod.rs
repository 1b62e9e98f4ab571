pub mod app;
pub mod classify;
pub mod config;
pub mod extract;
pub mod format;
pub mod language;
pub mod message;
pub mod transcript;
