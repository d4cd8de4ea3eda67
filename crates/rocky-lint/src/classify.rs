//! Diagnostic classification.
//!
//! ## Rules
//!
//! | Rule | Match | Action |
//! |------|-------|--------|
//! | `object-literal-property` | TS2339 on an anonymous `{ ... }` type | suppress |
//! | `never-parameter` | TS2345 against a `never` parameter | suppress |
//! | `not-implemented-in-rocky` | any link naming `IsNotImplementedInRockyYet` | rewrite, force error |
//!
//! The first two are false positives from duck-typed object literals and
//! from array-literal inference. Suppressed diagnostics are neither shown nor
//! counted. Rules are tried in table order and the first match wins.

use crate::diagnostic::{Category, Diagnostic, Message};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel the Rocky definitions use for APIs that exist but are not wired up
pub const NOT_IMPLEMENTED_SENTINEL: &str = "IsNotImplementedInRockyYet";

/// Replacement text for messages naming the sentinel
pub const NOT_IMPLEMENTED_MESSAGE: &str = "This API is not supported in Rocky.js yet.";

/// What a matching rule does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Drop the whole diagnostic
    Suppress,
    /// Replace a link's text and force its category
    Rewrite {
        /// Replacement text
        message: &'static str,
        /// Forced category
        category: Category,
    },
}

/// One entry of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Stable name for logs
    pub name: &'static str,
    /// Diagnostic code the rule is limited to, if any
    pub code: Option<u32>,
    /// Substring the message must contain
    pub needle: &'static str,
    /// Action taken on a match
    pub action: RuleAction,
}

impl Rule {
    /// Whether the rule applies to a message with this code
    #[must_use]
    pub fn matches(&self, code: u32, text: &str) -> bool {
        self.code.map_or(true, |c| c == code) && text.contains(self.needle)
    }
}

/// Built-in rules, in priority order
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "object-literal-property",
        code: Some(2339),
        needle: "does not exist on type '{",
        action: RuleAction::Suppress,
    },
    Rule {
        name: "never-parameter",
        code: Some(2345),
        needle: "to parameter of type 'never'",
        action: RuleAction::Suppress,
    },
    Rule {
        name: "not-implemented-in-rocky",
        code: None,
        needle: NOT_IMPLEMENTED_SENTINEL,
        action: RuleAction::Rewrite {
            message: NOT_IMPLEMENTED_MESSAGE,
            category: Category::Error,
        },
    },
];

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Every emitted message line
    pub total: usize,
    /// Lines classified as errors
    pub errors: usize,
    /// Lines classified as warnings
    pub warnings: usize,
}

impl RunStats {
    /// Count one emitted line
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Error => self.errors += 1,
            Category::Warning => self.warnings += 1,
            _ => {}
        }
        self.total += 1;
    }

    /// Whether any errors were counted
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Whether any warnings were counted
    #[must_use]
    pub const fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

/// One message line ready for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Nesting depth in the message chain
    pub depth: usize,
    /// Effective category
    pub category: Category,
    /// Diagnostic code
    pub code: u32,
    /// Final message text
    pub text: String,
}

/// Outcome of classifying one diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Dropped by the named rule
    Suppressed {
        /// Name of the suppressing rule
        rule: &'static str,
    },
    /// Lines to report, head first
    Emit(Vec<ClassifiedLine>),
}

/// Applies the rule table and keeps the run statistics
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    stats: RunStats,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier with the built-in rules
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Classifier with a custom rule table
    #[must_use]
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            stats: RunStats::default(),
        }
    }

    /// Statistics so far
    #[must_use]
    pub const fn stats(&self) -> RunStats {
        self.stats
    }

    /// The first suppressing rule matching `code`/`text`
    fn suppression(&self, code: u32, text: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.action == RuleAction::Suppress && rule.matches(code, text))
    }

    /// The first rewriting rule matching `code`/`text`
    fn rewrite(&self, code: u32, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| {
            matches!(rule.action, RuleAction::Rewrite { .. }) && rule.matches(code, text)
        })
    }

    /// Classify one diagnostic, counting every emitted line.
    ///
    /// `category_override` replaces the compiler's category for every link;
    /// a rewrite rule still wins over the override.
    pub fn classify(
        &mut self,
        diagnostic: &Diagnostic,
        category_override: Option<Category>,
    ) -> Classification {
        if let Some(rule) = self.suppression(diagnostic.code, diagnostic.message.head()) {
            debug!(rule = rule.name, code = diagnostic.code, "suppressing diagnostic");
            return Classification::Suppressed { rule: rule.name };
        }

        let mut links = Vec::new();
        match &diagnostic.message {
            Message::Text(text) => {
                links.push((0, diagnostic.category, diagnostic.code, text.as_str()));
            }
            Message::Chain(chain) => chain.walk(0, &mut |depth, link| {
                links.push((depth, link.category, link.code, link.text.as_str()));
            }),
        }

        let lines = links
            .into_iter()
            .map(|(depth, category, code, text)| {
                let mut line = ClassifiedLine {
                    depth,
                    category: category_override.unwrap_or(category),
                    code,
                    text: text.to_string(),
                };
                if let Some(Rule {
                    name,
                    action: RuleAction::Rewrite { message, category },
                    ..
                }) = self.rewrite(code, text)
                {
                    debug!(rule = name, code, "rewriting message");
                    line.text = (*message).to_string();
                    line.category = *category;
                }
                line
            })
            .collect::<Vec<_>>();

        for line in &lines {
            self.stats.record(line.category);
        }
        Classification::Emit(lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::diagnostic::MessageChain;

    fn emitted(classification: Classification) -> Vec<ClassifiedLine> {
        match classification {
            Classification::Emit(lines) => lines,
            Classification::Suppressed { rule } => panic!("unexpectedly suppressed by {rule}"),
        }
    }

    mod rule_tests {
        use super::*;

        #[test]
        fn test_rule_order() {
            let names: Vec<_> = DEFAULT_RULES.iter().map(|r| r.name).collect();
            assert_eq!(
                names,
                vec!["object-literal-property", "never-parameter", "not-implemented-in-rocky"]
            );
        }

        #[test]
        fn test_code_restricted_rule() {
            let rule = DEFAULT_RULES[0];
            assert!(rule.matches(2339, "Property 'x' does not exist on type '{ a: number; }'."));
            assert!(!rule.matches(2551, "Property 'x' does not exist on type '{ a: number; }'."));
            assert!(!rule.matches(2339, "Property 'x' does not exist on type 'Foo'."));
        }

        #[test]
        fn test_unrestricted_rule() {
            let rule = DEFAULT_RULES[2];
            assert!(rule.matches(1, "Type 'IsNotImplementedInRockyYet' is bad"));
            assert!(rule.matches(2322, "IsNotImplementedInRockyYet"));
        }
    }

    mod stats_tests {
        use super::*;

        #[test]
        fn test_record() {
            let mut stats = RunStats::default();
            stats.record(Category::Error);
            stats.record(Category::Warning);
            stats.record(Category::Warning);
            stats.record(Category::Message);
            assert_eq!(
                stats,
                RunStats {
                    total: 4,
                    errors: 1,
                    warnings: 2
                }
            );
            assert!(stats.has_errors());
            assert!(stats.has_warnings());
        }

        #[test]
        fn test_default_is_clean() {
            let stats = RunStats::default();
            assert!(!stats.has_errors());
            assert!(!stats.has_warnings());
        }
    }

    mod classifier_tests {
        use super::*;

        #[test]
        fn test_object_literal_property_suppressed() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(
                Category::Error,
                2339,
                "Property 'foo' does not exist on type '{ bar: number; }'.",
            );
            for _ in 0..3 {
                assert_eq!(
                    classifier.classify(&d, Some(Category::Warning)),
                    Classification::Suppressed {
                        rule: "object-literal-property"
                    }
                );
            }
            assert_eq!(classifier.stats(), RunStats::default());
        }

        #[test]
        fn test_named_type_property_not_suppressed() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(
                Category::Error,
                2339,
                "Property 'foo' does not exist on type 'CanvasRenderingContext2D'.",
            );
            let lines = emitted(classifier.classify(&d, Some(Category::Warning)));
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].category, Category::Warning);
            assert_eq!(classifier.stats().warnings, 1);
        }

        #[test]
        fn test_never_parameter_suppressed() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(
                Category::Error,
                2345,
                "Argument of type 'number' is not assignable to parameter of type 'never'.",
            );
            assert!(matches!(
                classifier.classify(&d, None),
                Classification::Suppressed { rule: "never-parameter" }
            ));
            assert_eq!(classifier.stats().total, 0);
        }

        #[test]
        fn test_override_applies() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(Category::Error, 2304, "Cannot find name 'foo'.");
            let lines = emitted(classifier.classify(&d, Some(Category::Warning)));
            assert_eq!(lines[0].category, Category::Warning);
            assert_eq!(lines[0].code, 2304);
            assert_eq!(lines[0].depth, 0);
        }

        #[test]
        fn test_compiler_category_without_override() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(Category::Message, 6000, "note");
            let lines = emitted(classifier.classify(&d, None));
            assert_eq!(lines[0].category, Category::Message);
            assert_eq!(
                classifier.stats(),
                RunStats {
                    total: 1,
                    errors: 0,
                    warnings: 0
                }
            );
        }

        #[test]
        fn test_sentinel_forces_error_over_override() {
            let mut classifier = Classifier::new();
            let d = Diagnostic::new(
                Category::Error,
                2322,
                "Type 'string' is not assignable to type 'IsNotImplementedInRockyYet'.",
            );
            let lines = emitted(classifier.classify(&d, Some(Category::Warning)));
            assert_eq!(lines[0].text, NOT_IMPLEMENTED_MESSAGE);
            assert_eq!(lines[0].category, Category::Error);
            assert_eq!(classifier.stats().errors, 1);
            assert_eq!(classifier.stats().warnings, 0);
        }

        #[test]
        fn test_chain_counts_every_link() {
            let mut classifier = Classifier::new();
            let chain = MessageChain::new("Type 'A' is not assignable to type 'B'.", Category::Error, 2322)
                .with_next(MessageChain::new(
                    "Property 'x' is missing in type 'A'.",
                    Category::Message,
                    2324,
                ));
            let d = Diagnostic::new(Category::Error, 2322, "").with_chain(chain);
            let lines = emitted(classifier.classify(&d, None));
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[1].depth, 1);
            assert_eq!(lines[1].code, 2324);
            assert_eq!(
                classifier.stats(),
                RunStats {
                    total: 2,
                    errors: 1,
                    warnings: 0
                }
            );
        }

        #[test]
        fn test_sentinel_in_chain_link_only() {
            let mut classifier = Classifier::new();
            let chain = MessageChain::new("Argument is not assignable.", Category::Error, 2345).with_next(
                MessageChain::new(
                    "Type 'number' is not assignable to type 'IsNotImplementedInRockyYet'.",
                    Category::Error,
                    2322,
                ),
            );
            let d = Diagnostic::new(Category::Error, 2345, "").with_chain(chain);
            let lines = emitted(classifier.classify(&d, Some(Category::Warning)));
            assert_eq!(lines[0].category, Category::Warning);
            assert_eq!(lines[0].text, "Argument is not assignable.");
            assert_eq!(lines[1].category, Category::Error);
            assert_eq!(lines[1].text, NOT_IMPLEMENTED_MESSAGE);
            assert_eq!(classifier.stats().warnings, 1);
            assert_eq!(classifier.stats().errors, 1);
        }

        #[test]
        fn test_custom_rule_table() {
            let mut classifier = Classifier::with_rules(vec![Rule {
                name: "hide-all-2304",
                code: Some(2304),
                needle: "",
                action: RuleAction::Suppress,
            }]);
            let d = Diagnostic::new(Category::Error, 2304, "Cannot find name 'x'.");
            assert!(matches!(
                classifier.classify(&d, None),
                Classification::Suppressed { rule: "hide-all-2304" }
            ));
        }

        #[test]
        fn test_stats_accumulate_across_diagnostics() {
            let mut classifier = Classifier::new();
            classifier.classify(&Diagnostic::new(Category::Error, 1005, "';' expected."), None);
            classifier.classify(
                &Diagnostic::new(Category::Error, 2304, "Cannot find name 'x'."),
                Some(Category::Warning),
            );
            classifier.classify(
                &Diagnostic::new(Category::Error, 2304, "Cannot find name 'y'."),
                Some(Category::Warning),
            );
            assert_eq!(
                classifier.stats(),
                RunStats {
                    total: 3,
                    errors: 1,
                    warnings: 2
                }
            );
        }
    }
}
