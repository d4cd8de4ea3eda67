//! Compiler diagnostics.

use crate::source::SourceFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Diagnostic category, numbered like `ts.DiagnosticCategory`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Category {
    /// Advisory issue
    Warning,
    /// Fatal issue
    Error,
    /// Editor suggestion
    Suggestion,
    /// Informational message
    Message,
    /// Category this build does not know about
    Unknown(u8),
}

impl From<u8> for Category {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Warning,
            1 => Self::Error,
            2 => Self::Suggestion,
            3 => Self::Message,
            other => Self::Unknown(other),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        match category {
            Category::Warning => 0,
            Category::Error => 1,
            Category::Suggestion => 2,
            Category::Message => 3,
            Category::Unknown(other) => other,
        }
    }
}

impl Category {
    /// Lower-cased label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One link of a message chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChain {
    /// Message text of this link
    pub text: String,
    /// Category of this link
    pub category: Category,
    /// Diagnostic code of this link
    pub code: u32,
    /// Elaborations, each one level deeper
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    /// Create a chain link without children
    #[must_use]
    pub fn new(text: impl Into<String>, category: Category, code: u32) -> Self {
        Self {
            text: text.into(),
            category,
            code,
            next: Vec::new(),
        }
    }

    /// Append a child link
    #[must_use]
    pub fn with_next(mut self, next: Self) -> Self {
        self.next.push(next);
        self
    }

    /// Visit this link and its descendants depth-first with their depth
    pub fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(usize, &'a Self)) {
        visit(depth, self);
        for child in &self.next {
            child.walk(depth + 1, visit);
        }
    }
}

/// Diagnostic message: a flat text or a chain of elaborations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Single message, categorised by the diagnostic itself
    Text(String),
    /// Chain whose links carry their own category and code
    Chain(MessageChain),
}

impl Message {
    /// Text of the head message
    #[must_use]
    pub fn head(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Chain(chain) => &chain.text,
        }
    }
}

/// One issue reported by the compiler
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Category assigned by the compiler
    pub category: Category,
    /// Numeric diagnostic code (rendered as `TS<code>`)
    pub code: u32,
    /// Message text or chain
    pub message: Message,
    /// Owning file; `None` for global diagnostics
    pub file: Option<Rc<SourceFile>>,
    /// Zero-based start offset in UTF-16 code units
    pub start: usize,
    /// Span length in UTF-16 code units
    pub length: usize,
}

impl Diagnostic {
    /// Create a global diagnostic with a flat message
    #[must_use]
    pub fn new(category: Category, code: u32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: Message::Text(message.into()),
            file: None,
            start: 0,
            length: 0,
        }
    }

    /// Replace the message with a chain
    #[must_use]
    pub fn with_chain(mut self, chain: MessageChain) -> Self {
        self.message = Message::Chain(chain);
        self
    }

    /// Attach a source location
    #[must_use]
    pub fn at(mut self, file: Rc<SourceFile>, start: usize, length: usize) -> Self {
        self.file = Some(file);
        self.start = start;
        self.length = length;
        self
    }

    /// Whether the diagnostic has no owning file
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.file.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_numbering() {
        assert_eq!(Category::from(0), Category::Warning);
        assert_eq!(Category::from(1), Category::Error);
        assert_eq!(Category::from(2), Category::Suggestion);
        assert_eq!(Category::from(3), Category::Message);
        assert_eq!(Category::from(9), Category::Unknown(9));
        assert_eq!(u8::from(Category::Unknown(9)), 9);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Error.to_string(), "error");
        assert_eq!(Category::Warning.label(), "warning");
        assert_eq!(Category::Unknown(7).label(), "unknown");
    }

    #[test]
    fn test_category_serde_as_number() {
        let json = serde_json::to_string(&Category::Message).unwrap();
        assert_eq!(json, "3");
        let category: Category = serde_json::from_str("1").unwrap();
        assert_eq!(category, Category::Error);
    }

    #[test]
    fn test_chain_walk_depths() {
        let chain = MessageChain::new("a", Category::Error, 1)
            .with_next(MessageChain::new("b", Category::Error, 2).with_next(MessageChain::new(
                "c",
                Category::Message,
                3,
            )))
            .with_next(MessageChain::new("d", Category::Warning, 4));
        let mut seen = Vec::new();
        chain.walk(0, &mut |depth, link| seen.push((depth, link.text.as_str())));
        assert_eq!(seen, vec![(0, "a"), (1, "b"), (2, "c"), (1, "d")]);
    }

    #[test]
    fn test_message_head() {
        assert_eq!(Message::Text("flat".into()).head(), "flat");
        let chain = MessageChain::new("top", Category::Error, 1)
            .with_next(MessageChain::new("below", Category::Error, 2));
        assert_eq!(Message::Chain(chain).head(), "top");
    }

    #[test]
    fn test_global_diagnostic() {
        let diagnostic = Diagnostic::new(Category::Error, 6053, "File not found");
        assert!(diagnostic.is_global());
        let file = Rc::new(SourceFile::new("a.ts", "x"));
        assert!(!diagnostic.at(file, 0, 1).is_global());
    }
}
