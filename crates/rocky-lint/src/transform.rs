//! Inline type-annotation comments.
//!
//! Authors may write flow-style hints such as `function foo(s /*: string */)`.
//! Before compilation the comment delimiters are stripped so the hint becomes
//! a real TypeScript annotation: `function foo(s: string)`.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// `/*: Type */` with at least one space after the colon and before `*/`
const ANNOTATION_PATTERN: &str = r"/\*(\s*:\s+[a-zA-Z0-9._]+)\s+\*/";

fn annotation_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)] // constant pattern
    REGEX.get_or_init(|| Regex::new(ANNOTATION_PATTERN).expect("annotation pattern is valid"))
}

/// Replace every inline annotation comment with its `: Type` part.
///
/// Text without annotations is returned borrowed and unchanged.
#[must_use]
pub fn uncomment_annotations(source: &str) -> Cow<'_, str> {
    annotation_regex().replace_all(source, "$1")
}

/// Number of inline annotation comments in `source`
#[must_use]
pub fn count_annotations(source: &str) -> usize {
    annotation_regex().find_iter(source).count()
}
