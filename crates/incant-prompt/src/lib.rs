//! Markdown assembly helpers for the *incant* workspace.
//!
//! Generation requests and schema descriptions are plain markdown. Building
//! them by hand-concatenating strings is tedious and makes the output hard to
//! keep deterministic, so everything that renders text goes through
//! [`builder::MarkdownBuilder`].

pub mod builder;

pub use builder::MarkdownBuilder;
