//! Token grammars for the built-in highlighter.
//!
//! Each grammar is one alternation regex with named groups tried left to
//! right: `comment`, `string`, `ident`, `number`. Identifiers are then
//! classified against the keyword and literal lists.

use regex::Regex;
use std::sync::LazyLock;

const IDENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";
const NUMBER: &str = r"0[xX][0-9a-fA-F_]+|[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9]+)?";

const DOUBLE_QUOTED: &str = r#""(?:[^"\\]|\\.)*""#;
const SINGLE_QUOTED: &str = r"'(?:[^'\\]|\\.)*'";
const SLASH_COMMENT: &str = r"//[^\n]*|(?s:/\*.*?\*/)";
const HASH_COMMENT: &str = r"#[^\n]*";

/// Token classes emitted as `hljs-*` span classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    Literal,
}

impl TokenKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Comment => "hljs-comment",
            Self::String => "hljs-string",
            Self::Number => "hljs-number",
            Self::Keyword => "hljs-keyword",
            Self::Literal => "hljs-literal",
        }
    }
}

pub struct Grammar {
    keywords: &'static [&'static str],
    literals: &'static [&'static str],
    regex: Regex,
}

impl Grammar {
    fn new(
        comment: Option<&str>,
        string: &str,
        keywords: &'static [&'static str],
        literals: &'static [&'static str],
    ) -> Self {
        let comment = comment.map(|c| format!("(?P<comment>{c})|")).unwrap_or_default();
        let pattern = format!(
            "{comment}(?P<string>{string})|(?P<ident>{IDENT})|(?P<number>{NUMBER})"
        );
        Self {
            keywords,
            literals,
            regex: Regex::new(&pattern).unwrap(),
        }
    }

    /// Split `code` into `(kind, text)` pieces covering it exactly.
    ///
    /// Plain stretches carry `None`.
    pub fn tokenize<'a>(&self, code: &'a str) -> Vec<(Option<TokenKind>, &'a str)> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.regex.captures_iter(code) {
            let Some(whole) = caps.get(0) else { continue };
            let kind = if caps.name("comment").is_some() {
                Some(TokenKind::Comment)
            } else if caps.name("string").is_some() {
                Some(TokenKind::String)
            } else if caps.name("number").is_some() {
                Some(TokenKind::Number)
            } else {
                self.classify(whole.as_str())
            };

            let Some(kind) = kind else { continue };
            if whole.start() > last {
                tokens.push((None, &code[last..whole.start()]));
            }
            tokens.push((Some(kind), whole.as_str()));
            last = whole.end();
        }

        if last < code.len() {
            tokens.push((None, &code[last..]));
        }
        tokens
    }

    fn classify(&self, ident: &str) -> Option<TokenKind> {
        if self.keywords.contains(&ident) {
            Some(TokenKind::Keyword)
        } else if self.literals.contains(&ident) {
            Some(TokenKind::Literal)
        } else {
            None
        }
    }
}

// =============================================================================
// Grammars
// =============================================================================

static RUST: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(SLASH_COMMENT),
        // char literals hold exactly one char so lifetimes stay plain
        &format!(r"{DOUBLE_QUOTED}|'(?:[^'\\\n]|\\[^\n]+?)'"),
        &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
            "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
            "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
            "type", "unsafe", "use", "where", "while",
        ],
        &["true", "false", "None", "Some", "Ok", "Err"],
    )
});

static C_LIKE: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(SLASH_COMMENT),
        &format!("{DOUBLE_QUOTED}|{SINGLE_QUOTED}"),
        &[
            "auto", "bool", "break", "case", "catch", "chan", "char", "class", "const",
            "continue", "default", "defer", "delete", "do", "double", "else", "enum", "extends",
            "extern", "final", "float", "for", "func", "go", "goto", "if", "implements", "import",
            "inline", "int", "interface", "long", "map", "namespace", "new", "package", "private",
            "protected", "public", "range", "return", "select", "short", "signed", "sizeof",
            "static", "string", "struct", "switch", "template", "this", "throw", "throws", "try",
            "type", "typedef", "typename", "union", "unsigned", "using", "var", "virtual", "void",
            "volatile", "while",
        ],
        &["true", "false", "null", "nullptr", "NULL", "nil"],
    )
});

static SCRIPT: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(SLASH_COMMENT),
        &format!(r"{DOUBLE_QUOTED}|{SINGLE_QUOTED}|`(?:[^`\\]|\\.)*`"),
        &[
            "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
            "continue", "debugger", "declare", "default", "delete", "do", "else", "enum",
            "export", "extends", "finally", "for", "from", "function", "if", "implements",
            "import", "in", "instanceof", "interface", "keyof", "let", "namespace", "new", "of",
            "private", "protected", "public", "readonly", "return", "static", "super", "switch",
            "this", "throw", "try", "type", "typeof", "var", "void", "while", "with", "yield",
        ],
        &["true", "false", "null", "undefined", "NaN", "Infinity"],
    )
});

static PYTHON: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(HASH_COMMENT),
        &format!(r#"(?s:""".*?""")|(?s:'''.*?''')|{DOUBLE_QUOTED}|{SINGLE_QUOTED}"#),
        &[
            "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
            "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
            "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
            "with", "yield",
        ],
        &["True", "False", "None"],
    )
});

static SHELL: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(HASH_COMMENT),
        &format!("{DOUBLE_QUOTED}|'[^']*'"),
        &[
            "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
            "in", "local", "return", "then", "until", "while",
        ],
        &["true", "false"],
    )
});

static DATA: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(
        Some(HASH_COMMENT),
        &format!("{DOUBLE_QUOTED}|{SINGLE_QUOTED}"),
        &[],
        &["true", "false", "null", "yes", "no", "on", "off"],
    )
});

static JSON: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(None, DOUBLE_QUOTED, &[], &["true", "false", "null"])
});

/// Grammar for a fence language name, case-insensitive.
pub fn grammar_for(language: &str) -> Option<&'static Grammar> {
    let grammar: &LazyLock<Grammar> = match language.to_ascii_lowercase().as_str() {
        "rust" | "rs" => &RUST,
        "c" | "h" | "cpp" | "c++" | "cc" | "hpp" | "java" | "go" | "golang" | "cs" | "csharp"
        | "kotlin" | "kt" | "swift" => &C_LIKE,
        "js" | "javascript" | "jsx" | "mjs" | "cjs" | "ts" | "typescript" | "tsx" => &SCRIPT,
        "py" | "python" => &PYTHON,
        "sh" | "bash" | "shell" | "zsh" | "console" => &SHELL,
        "toml" | "yaml" | "yml" | "ini" => &DATA,
        "json" | "jsonc" => &JSON,
        _ => return None,
    };
    Some(LazyLock::force(grammar))
}
