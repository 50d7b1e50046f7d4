//! Visitors that turn a `texmax-syntax` tree back into text.
//!
//! - [`print_tree`] renders an indented outline for inspection.
//! - [`to_latex`] re-emits normalized LaTeX that parses to the same tree.

pub mod latex;
pub mod tree;

pub use latex::{LatexWriter, to_latex};
pub use tree::{TreeOptions, TreePrinter, print_tree};
