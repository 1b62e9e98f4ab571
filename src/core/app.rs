//! Application identity from Cargo.toml.

/// Application name (from Cargo.toml `package.name`). Used as the binary name in completions.
pub const NAME: &str = env!("CARGO_PKG_NAME");
