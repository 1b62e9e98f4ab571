//! Code detection: decide whether a chat message should be displayed as a code block.
//!
//! Fenced blocks and long inline spans decide on their own. Everything else goes through a
//! weighted score: each [`Signal`] that fires adds its weight, and the text counts as code
//! once the total reaches [`CODE_THRESHOLD`].

use std::sync::OnceLock;

use regex::Regex;

/// Fence delimiter for Markdown code blocks.
pub const FENCE: &str = "```";

/// Inline spans longer than this many characters (backticks included) count as code.
pub const INLINE_SPAN_MIN_LEN: usize = 20;

/// Minimum heuristic score for text to be classified as code.
pub const CODE_THRESHOLD: u32 = 3;

/// Literal keywords per language, scanned in order. The first language with at least
/// [`KEYWORD_VOTE_MIN_HITS`] hits votes for the text.
const LANGUAGE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "javascript",
        &["const", "let", "var", "function", "class", "import", "export", "return", "async", "await"],
    ),
    (
        "python",
        &["def", "class", "import", "from", "return", "async", "await", "if", "for", "while"],
    ),
    (
        "java",
        &["public", "private", "class", "void", "int", "String", "static", "final"],
    ),
    (
        "html",
        &["<html", "<div", "<span", "<p", "<a", "<img", "<button", "<form"],
    ),
    (
        "css",
        &["body", "div", "span", ".class", "#id", "@media", "@keyframes"],
    ),
    (
        "sql",
        &["SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "WHERE"],
    ),
];

const KEYWORD_VOTE_MIN_HITS: usize = 2;

/// Text under evaluation, with the keyword vote computed once up front.
pub struct Sample<'a> {
    pub text: &'a str,
    pub voted_language: Option<&'static str>,
}

impl<'a> Sample<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            voted_language: keyword_vote(text),
        }
    }
}

/// One weighted predicate of the heuristic score.
pub struct Signal {
    pub name: &'static str,
    pub weight: u32,
    detect: fn(&Sample) -> bool,
}

impl Signal {
    pub fn matches(&self, sample: &Sample) -> bool {
        (self.detect)(sample)
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

struct Patterns {
    inline_span: Regex,
    leading_keyword: Regex,
    indentation: Regex,
    comment: Regex,
    brackets: Regex,
    operators: Regex,
    language_specific: [Regex; 5],
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("valid classifier pattern");
        Patterns {
            inline_span: re(r"`[^`]+`"),
            leading_keyword: re(
                r"(?m)^(const|let|var|function|import|class|if|for|while|def|public|private|#include)",
            ),
            indentation: re(r"(?m)^( {2,}|\t+)"),
            comment: re(r"(?m)^(//|/\*|\*|#|--)"),
            brackets: re(r"[{}\[\]()<>]"),
            operators: re(r"[=+\-*/%<>!&|^~]"),
            language_specific: [
                re(r"(?m)^(import .* from|export|const|let|var|async function)"),
                re(r"(?m)^(def |class |import |from .* import|@)"),
                re(r"(?m)^<[^>]+>"),
                re(r"(?m)^[.#]?[A-Za-z0-9_]+\s*\{"),
                re(r"(?im)^(SELECT|INSERT|UPDATE|DELETE|CREATE|DROP|ALTER)\s"),
            ],
        }
    })
}

/// Heuristic signals in evaluation order.
pub static SIGNALS: &[Signal] = &[
    Signal {
        name: "leading keyword",
        weight: 2,
        detect: |s| patterns().leading_keyword.is_match(s.text),
    },
    Signal {
        name: "indentation",
        weight: 1,
        detect: |s| patterns().indentation.is_match(s.text),
    },
    Signal {
        name: "comment marker",
        weight: 1,
        detect: |s| patterns().comment.is_match(s.text),
    },
    Signal {
        name: "brackets",
        weight: 1,
        detect: |s| patterns().brackets.is_match(s.text),
    },
    Signal {
        name: "operators",
        weight: 1,
        detect: |s| patterns().operators.is_match(s.text),
    },
    Signal {
        name: "semicolon",
        weight: 1,
        detect: |s| s.text.contains(';'),
    },
    Signal {
        name: "line break",
        weight: 1,
        detect: |s| s.text.contains('\n'),
    },
    Signal {
        name: "language pattern",
        weight: 2,
        detect: |s| patterns().language_specific.iter().any(|re| re.is_match(s.text)),
    },
    Signal {
        name: "keyword vote",
        weight: 2,
        detect: |s| s.voted_language.is_some(),
    },
];

/// First language (in list order) whose keywords appear at least twice as literal substrings.
pub fn keyword_vote(text: &str) -> Option<&'static str> {
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().filter(|kw| text.contains(*kw)).count() >= KEYWORD_VOTE_MIN_HITS
        })
        .map(|(lang, _)| *lang)
}

/// Heuristic score breakdown for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub total: u32,
    /// Names of the signals that fired, in evaluation order.
    pub matched: Vec<&'static str>,
    /// Language whose keyword list voted, if any.
    pub voted_language: Option<&'static str>,
}

impl Score {
    pub fn is_code(&self) -> bool {
        self.total >= CODE_THRESHOLD
    }
}

/// Evaluate every signal against `text` and sum the weights of those that fire.
pub fn score(text: &str) -> Score {
    let sample = Sample::new(text);
    let mut total = 0;
    let mut matched = Vec::new();
    for signal in SIGNALS {
        if signal.matches(&sample) {
            total += signal.weight;
            matched.push(signal.name);
        }
    }
    Score {
        total,
        matched,
        voted_language: sample.voted_language,
    }
}

/// Which rule decided the classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Empty,
    /// Trimmed text starts and ends with a fence.
    Fenced,
    /// Inline spans were found; `longest` is the length of the longest one in characters.
    Inline { longest: usize },
    Heuristic(Score),
}

impl Verdict {
    pub fn is_code(&self) -> bool {
        match self {
            Verdict::Empty => false,
            Verdict::Fenced => true,
            Verdict::Inline { longest } => *longest > INLINE_SPAN_MIN_LEN,
            Verdict::Heuristic(score) => score.is_code(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Empty => write!(f, "empty text"),
            Verdict::Fenced => write!(f, "complete fenced block"),
            Verdict::Inline { longest } => write!(
                f,
                "inline span, longest {} chars (needs more than {})",
                longest, INLINE_SPAN_MIN_LEN
            ),
            Verdict::Heuristic(score) => {
                write!(f, "score {}/{}", score.total, CODE_THRESHOLD)?;
                if !score.matched.is_empty() {
                    write!(f, " [{}]", score.matched.join(", "))?;
                }
                if let Some(lang) = score.voted_language {
                    write!(f, " keywords: {}", lang)?;
                }
                Ok(())
            }
        }
    }
}

/// Classify `text` and report which rule decided.
pub fn analyze(text: &str) -> Verdict {
    if text.is_empty() {
        return Verdict::Empty;
    }

    if text.contains(FENCE) {
        let trimmed = text.trim();
        if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
            return Verdict::Fenced;
        }
        log::trace!("Unterminated fence, falling back to heuristics");
        return Verdict::Heuristic(score(text));
    }

    if text.contains('`')
        && let Some(longest) = patterns()
            .inline_span
            .find_iter(text)
            .map(|m| m.as_str().chars().count())
            .max()
    {
        return Verdict::Inline { longest };
    }

    Verdict::Heuristic(score(text))
}

/// Whether `text` should be rendered as a code block.
pub fn classify(text: &str) -> bool {
    let verdict = analyze(text);
    log::debug!("classify: {}", verdict);
    verdict.is_code()
}
