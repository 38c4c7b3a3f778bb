//! Chainable assembly of **markdown text**.
//!
//! Request and schema renderers need to emit the same markdown structure over
//! and over (a heading, a bold key, a fenced block). `MarkdownBuilder` names
//! each of those shapes once so the call sites read as an outline of the
//! document rather than a pile of `format!` strings. Every method consumes
//! and returns `self`:
//!
//! ```rust
//! use incant_prompt::MarkdownBuilder;
//!
//! let md = MarkdownBuilder::new()
//!     .heading("Task")
//!     .blank_line()
//!     .key_value("Target Schema", "GanttChart")
//!     .fenced("json", "{\"title\": \"demo\"}")
//!     .finish();
//!
//! assert!(md.starts_with("# Task"));
//! ```
//!
//! Output is deliberately dumb: each call appends exactly the characters its
//! doc promises, nothing is escaped, merged or reflowed. Callers depend on
//! that, since the rendered text must be byte-identical for identical input.

use std::fmt::{Display, Write as _};

/// Accumulates markdown line by line; [`Self::finish`] hands back the buffer.
pub struct MarkdownBuilder {
    buffer: String,
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Add a level-1 (`#`) heading.
    pub fn heading(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "# {line}").expect("failed to write buffer");
        self
    }

    /// Add a level-2 (`##`) heading.
    pub fn subheading(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "## {line}").expect("failed to write buffer");
        self
    }

    /// Add a plain line of text and a trailing newline.
    pub fn line(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "{line}").expect("failed to write buffer");
        self
    }

    /// Add a bulleted (`- `) list item.
    pub fn bullet(mut self, line: impl Display) -> Self {
        writeln!(self.buffer, "- {line}").expect("failed to write buffer");
        self
    }

    /// Add a key–value pair in **bold**: `**Key**: Value`.
    pub fn key_value(mut self, key: impl Display, value: impl Display) -> Self {
        writeln!(self.buffer, "**{key}**: {value}").expect("failed to write buffer");
        self
    }

    /// Embed a code block fenced with the given language tag.
    ///
    /// ```rust
    /// use incant_prompt::MarkdownBuilder;
    ///
    /// let block = MarkdownBuilder::new()
    ///     .fenced("yaml", "title: demo")
    ///     .finish();
    /// assert!(block.starts_with("```yaml\n"));
    /// ```
    pub fn fenced(self, lang: impl Display, content: impl Display) -> Self {
        self.line(format_args!("```{lang}")).line(content).line("```")
    }

    /// Insert a single blank line.
    pub fn blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Insert a `---` delimiter line.
    pub fn delimiter(self) -> Self {
        self.line("---")
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finish(self) -> String {
        self.buffer
    }
}
