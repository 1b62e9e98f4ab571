use std::env;

/// Default syntect theme for code blocks.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Default wrap width for plain text messages.
pub const DEFAULT_WIDTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// syntect theme name used for highlighting.
    pub theme: String,
    /// Wrap width (columns) for plain text.
    pub width: usize,
    /// Emit ANSI colors.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            width: DEFAULT_WIDTH,
            color: true,
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<usize>,
    pub no_color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CHATCODE_WIDTH must be a positive integer, got {0:?}")]
    InvalidWidth(String),
}

/// Parse a wrap width. Zero is rejected.
pub fn parse_width(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(ConfigError::InvalidWidth(raw.to_string())),
    }
}

/// Build configuration from a variable lookup. Split out from [`load`] for tests.
/// An overridden variable is never read, so a malformed value there is not an error.
fn from_lookup<F>(lookup: F, overrides: Overrides) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let theme = lookup("CHATCODE_THEME")
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    let width = match (overrides.width, lookup("CHATCODE_WIDTH")) {
        (Some(width), _) => width,
        (None, Some(raw)) => parse_width(&raw)?,
        (None, None) => DEFAULT_WIDTH,
    };

    // https://no-color.org: any non-empty value disables color
    let color = !overrides.no_color && lookup("NO_COLOR").is_none_or(|v| v.is_empty());

    Ok(Config {
        theme,
        width,
        color,
    })
}

/// Load configuration from environment with flag overrides applied.
/// Returns an error if a variable that is actually used is malformed.
pub fn load(overrides: Overrides) -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok(), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_lookup(lookup_from(&[]), Overrides::default()).expect("config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_theme_and_width() {
        let lookup = lookup_from(&[
            ("CHATCODE_THEME", "InspiredGitHub"),
            ("CHATCODE_WIDTH", " 72 "),
        ]);
        let config = from_lookup(lookup, Overrides::default()).expect("config");
        assert_eq!(config.theme, "InspiredGitHub");
        assert_eq!(config.width, 72);
    }

    #[test]
    fn rejects_bad_width() {
        let err = from_lookup(lookup_from(&[("CHATCODE_WIDTH", "wide")]), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("CHATCODE_WIDTH"));
        assert!(parse_width("0").is_err());
    }

    #[test]
    fn no_color_disables_color() {
        let config = from_lookup(lookup_from(&[("NO_COLOR", "1")]), Overrides::default()).expect("config");
        assert!(!config.color);
        let config = from_lookup(lookup_from(&[("NO_COLOR", "")]), Overrides::default()).expect("config");
        assert!(config.color);
    }

    #[test]
    fn width_flag_skips_malformed_env_width() {
        let overrides = Overrides {
            width: Some(80),
            no_color: false,
        };
        let config = from_lookup(lookup_from(&[("CHATCODE_WIDTH", "wide")]), overrides)
            .expect("flag width wins");
        assert_eq!(config.width, 80);
    }

    #[test]
    fn no_color_flag_overrides_env() {
        let overrides = Overrides {
            width: None,
            no_color: true,
        };
        let config = from_lookup(lookup_from(&[]), overrides).expect("config");
        assert!(!config.color);
    }
}
