//! Console rendering of classified diagnostics.
//!
//! ```text
//! app.js(3,5): warning TS2304: Cannot find name 'foo'.
//! app.js(7,1): error TS2322: Type 'A' is not assignable to type 'B'.
//! app.js(7,1): error TS2324:   > Property 'x' is missing in type 'A'.
//! ```

use crate::classify::ClassifiedLine;
use crate::diagnostic::{Category, Diagnostic};
use crate::source::SourceFile;
use crate::workspace::FileNameReplacements;
use console::{style, Style};
use std::io::{self, Write};

/// Location tag of diagnostics without a file
pub const GLOBAL_LOCATION: &str = "global(0,0)";

/// Indentation added per message-chain level
pub const CHAIN_INDENT: &str = "  > ";

/// Colour for a category label
fn category_style(category: Category) -> Style {
    match category {
        Category::Warning => Style::new().yellow(),
        Category::Error => Style::new().red(),
        Category::Message => Style::new().blue(),
        Category::Suggestion | Category::Unknown(_) => Style::new().white(),
    }
}

/// Renders diagnostics to a writer
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'a> {
    replacements: &'a FileNameReplacements,
    pretty: bool,
}

impl<'a> Reporter<'a> {
    /// Create a reporter resolving display names through `replacements`
    #[must_use]
    pub const fn new(replacements: &'a FileNameReplacements, pretty: bool) -> Self {
        Self {
            replacements,
            pretty,
        }
    }

    /// `name(line,character)` or `global(0,0)`
    #[must_use]
    pub fn location(&self, diagnostic: &Diagnostic) -> String {
        diagnostic.file.as_ref().map_or_else(
            || GLOBAL_LOCATION.to_string(),
            |file| {
                let position = file.line_and_character(diagnostic.start);
                format!(
                    "{}({},{})",
                    self.replacements.display_name(file.file_name()),
                    position.line,
                    position.character
                )
            },
        )
    }

    /// Write the excerpt block and every message line of one diagnostic
    pub fn render(
        &self,
        out: &mut dyn Write,
        diagnostic: &Diagnostic,
        lines: &[ClassifiedLine],
    ) -> io::Result<()> {
        if self.pretty {
            if let Some(file) = &diagnostic.file {
                write_excerpt(out, file, diagnostic.start, diagnostic.length)?;
            }
        }

        let location = self.location(diagnostic);
        for line in lines {
            writeln!(
                out,
                "{}: {} TS{}: {}{}",
                style(&location).magenta(),
                category_style(line.category).apply_to(line.category.label()),
                line.code,
                CHAIN_INDENT.repeat(line.depth),
                line.text
            )?;
        }
        Ok(())
    }
}

/// Line-numbered excerpt, a `~` underline of the span, and a blank line
fn write_excerpt(
    out: &mut dyn Write,
    file: &SourceFile,
    start: usize,
    length: usize,
) -> io::Result<()> {
    let position = file.line_and_character(start);
    let excerpt = file.line_excerpt(position.line);
    let number = position.line.to_string();

    writeln!(out, "{} {}", style(&number).on_green(), excerpt)?;
    writeln!(
        out,
        "{} {}{}",
        style(" ".repeat(number.len())).on_green(),
        underline_padding(excerpt, position.character - 1),
        style("~".repeat(length)).red()
    )?;
    writeln!(out)
}

/// Whitespace lining up with `columns` UTF-16 units of `excerpt`; tabs stay tabs
fn underline_padding(excerpt: &str, columns: usize) -> String {
    let mut padding = String::new();
    let mut seen = 0;
    for c in excerpt.chars() {
        if seen >= columns {
            break;
        }
        padding.push(if c == '\t' { '\t' } else { ' ' });
        seen += c.len_utf16();
    }
    let rest = columns.saturating_sub(seen);
    padding.push_str(&" ".repeat(rest));
    padding
}
