//! Pattern categories and the versioned rule set

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Version of the pattern set; bump whenever a pattern or weight changes
pub const RULESET_VERSION: &str = "2025.1";

/// Words that count towards the error-vocabulary ratio
pub(super) const ERROR_VOCABULARY: &[&str] = &[
    "error",
    "exception",
    "failed",
    "failure",
    "undefined",
    "null",
    "cannot",
    "unexpected",
    "syntax",
    "type",
    "reference",
];

/// Independent evidence categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// `error:`, `Exception :`, `failed:`
    ErrorToken,
    /// Language-specific exception and panic names
    NamedException,
    /// Stack frames, line numbers, `line:col` pairs
    StackTrace,
    /// Natural-language error phrasing
    ErrorPhrase,
    /// HTTP status codes in context
    HttpStatus,
    /// Source-file extensions followed by punctuation
    FileReference,
    /// Build, VCS, SQL, mobile and framework fragments
    Ecosystem,
}

impl Category {
    /// Points contributed when any pattern of the category matches
    pub fn weight(self) -> u32 {
        match self {
            Category::ErrorToken
            | Category::NamedException
            | Category::StackTrace
            | Category::ErrorPhrase
            | Category::Ecosystem => 2,
            Category::HttpStatus | Category::FileReference => 1,
        }
    }

    /// Stable name used in API responses
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ErrorToken => "error_token",
            Category::NamedException => "named_exception",
            Category::StackTrace => "stack_trace",
            Category::ErrorPhrase => "error_phrase",
            Category::HttpStatus => "http_status",
            Category::FileReference => "file_reference",
            Category::Ecosystem => "ecosystem",
        }
    }
}

/// One category and the patterns that evidence it
pub(super) struct Rule {
    pub category: Category,
    pub patterns: Vec<Regex>,
}

impl Rule {
    fn new(category: Category, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).expect("Invalid classifier regex")
}

/// The single rule set shared by the pre-check endpoint and the analysis gate
pub(super) static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            Category::ErrorToken,
            &[r"\b(error|exception|failed|failure)\s*:"],
        ),
        Rule::new(
            Category::NamedException,
            &[
                // JavaScript / TypeScript
                r"\b(TypeError|ReferenceError|SyntaxError|RangeError|EvalError|URIError|AggregateError|UnhandledPromiseRejection\w*)\b",
                // Python
                r"\b(NameError|ValueError|KeyError|IndexError|AttributeError|ImportError|ModuleNotFoundError|IndentationError|ZeroDivisionError|FileNotFoundError|PermissionError|RecursionError|AssertionError|NotImplementedError|UnicodeDecodeError|UnicodeEncodeError)\b",
                r"Traceback \(most recent call last\)",
                // Java / Kotlin
                r"\b(NullPointerException|ClassNotFoundException|ArrayIndexOutOfBoundsException|IndexOutOfBoundsException|IllegalArgumentException|IllegalStateException|NumberFormatException|ClassCastException|ConcurrentModificationException|NoSuchMethodError|NoClassDefFoundError|OutOfMemoryError|StackOverflowError)\b",
                r"Exception in thread",
                // C#
                r"\b(NullReferenceException|InvalidOperationException|ArgumentNullException|ArgumentOutOfRangeException|InvalidCastException|KeyNotFoundException|DivideByZeroException|ObjectDisposedException|TaskCanceledException)\b",
                // Go
                r"panic:\s*runtime error",
                r"\bnil pointer dereference\b",
                r"\bgoroutine \d+ \[running\]",
                r"fatal error: all goroutines are asleep",
                // Ruby
                r"\b(NoMethodError|ArgumentError|LoadError|StandardError)\b",
                // PHP
                r"\bFatal error:\s*Uncaught\b",
                r"\bParse error:\s*syntax error\b",
                r"\bCall to undefined (function|method)\b",
                // Swift
                r"Unexpectedly found nil",
                r"\bEXC_BAD_INSTRUCTION\b",
                // Rust
                r"\bpanicked at\b",
                r"\berror\[E\d{4}\]",
                r"called `(Option|Result)::unwrap\(\)` on an? `(None|Err)` value",
            ],
        ),
        Rule::new(
            Category::StackTrace,
            &[
                r"\bat\s+[\w.$<>]+\s*\([^)]*:\d+:\d+\)",
                r"\bat\s+[\w.$<>]+\([\w.]+:\d+\)",
                r"\bline\s+\d+",
                r":\d+:\d+",
            ],
        ),
        Rule::new(
            Category::ErrorPhrase,
            &[
                r"\bcannot\s+(read|access|find|resolve|load)\b",
                r"\bis\s+not\s+(defined|a\s+function|found)\b",
                r"\bunexpected\s+(token|end|character)\b",
                r"\bmodule\s+not\s+found\b",
                r"\bno\s+module\s+named\b",
                r"\bundefined\s+method\b.*\bfor\b",
                r"\bpermission\s+denied\b",
                r"\bcommand\s+not\s+found\b",
                r"\bsegmentation\s+fault\b",
                r"\baccess\s+violation\b",
                r"\bconnection\s+(refused|timed?\s*out|reset)\b",
                r"\bcors\s+(error|policy)\b",
            ],
        ),
        Rule::new(
            Category::HttpStatus,
            &[
                r"\b(400|401|403|404|500|502|503|504)\s+(bad request|unauthorized|forbidden|not found|internal server error|bad gateway|service unavailable|gateway time-?out)\b",
                r"\bstatus(\s+code)?\s*[:=]?\s*(4|5)\d\d\b",
            ],
        ),
        Rule::new(
            Category::FileReference,
            &[r#"\w\.(js|jsx|mjs|ts|tsx|py|java|kt|rb|go|php|cs|swift|rs|c|cc|cpp|h|m)[:"'),\]]"#],
        ),
        Rule::new(
            Category::Ecosystem,
            &[
                // container builds
                r"failed to solve:|executor failed running|returned a non-zero code:\s*\d+|error response from daemon",
                // version control
                r"\bfatal:\s",
                // SQL engines
                r"\bSQLSTATE\b|\bORA-\d{5}\b|\bERROR \d{4} \(\w+\)|duplicate key value violates|syntax error at or near|\bno such table\b|\bdeadlock detected\b",
                // mobile runtimes
                r"FATAL EXCEPTION:|Terminating app due to uncaught exception|\bEXC_BAD_ACCESS\b|\bANR in\b|\bSIGABRT\b|\bSIGSEGV\b",
                // backend frameworks
                r"\b(BeanCreationException|HibernateException|LazyInitializationException|ActiveRecord::\w+|django\.core\.exceptions|sqlalchemy\.exc|IntegrityError|OperationalError)\b",
                r"Illuminate\\\w+",
            ],
        ),
    ]
});
