//! Language identifiers: alias resolution and inference from leading tokens.

use std::sync::OnceLock;

use regex::Regex;

/// Fallback language for anything that is not recognised as code.
pub const PLAIN_TEXT: &str = "text";

/// Short or alternate language tokens mapped to canonical identifiers.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("rb", "ruby"),
    ("php", "php"),
    ("cs", "csharp"),
    ("cpp", "cpp"),
    ("c++", "cpp"),
    ("html", "html"),
    ("css", "css"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("sql", "sql"),
    ("java", "java"),
    ("go", "go"),
    ("rust", "rust"),
    ("swift", "swift"),
    ("kotlin", "kotlin"),
];

/// Languages whose blocks are flagged as runnable in the code block header.
const EXECUTABLE_LANGUAGES: &[&str] = &["javascript", "python", "nodejs"];

/// Resolve a language token through the alias table. Unknown tokens pass through unchanged.
pub fn canonical_language(token: &str) -> &str {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(token)
}

/// Whether a block in this language may be offered for running.
pub fn is_executable(language: &str) -> bool {
    let lang = language.to_lowercase();
    EXECUTABLE_LANGUAGES.contains(&lang.as_str())
}

/// Ordered inference rules: the first pattern matching the code body names its language.
fn inference_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"^(import|export|const|let|var|function|class)\s", "javascript"),
            (r"^(def|class|import|from|print)\s", "python"),
            (r"^(public|private|class|void|int|String)\s", "java"),
            (r"<[^>]+>", "html"),
            (r"^[.#]?[A-Za-z0-9_]+\s*\{", "css"),
            (r"(?i)^(SELECT|INSERT|UPDATE|DELETE|CREATE|DROP|ALTER)\s", "sql"),
            (r"^#include", "cpp"),
        ]
        .into_iter()
        .map(|(pattern, lang)| (Regex::new(pattern).expect("valid inference pattern"), lang))
        .collect()
    })
}

/// Guess a language from the start of a code body. Returns [`PLAIN_TEXT`] when nothing matches.
pub fn infer_language(code: &str) -> &'static str {
    inference_rules()
        .iter()
        .find(|(re, _)| re.is_match(code))
        .map(|(_, lang)| *lang)
        .unwrap_or(PLAIN_TEXT)
}
