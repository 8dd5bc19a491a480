//! Indented text outlines
//!
//! One node per non-blank line; the depth of a node is its count of leading
//! spaces divided by the indent width:
//!
//! ```text
//! root
//!   first child
//!     grandchild
//!   second child
//! ```

use std::fmt::{self, Display, Write};

use thiserror::Error;

use crate::error::TreeError;
use crate::tree::{GeneralTree, NodeId};

/// Default number of spaces per outline level
pub const DEFAULT_INDENT: usize = 2;

/// Errors from parsing an outline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Indent width of zero
    #[error("indent width must be greater than zero")]
    ZeroIndent,

    /// No non-blank line at all
    #[error("outline has no root line")]
    Empty,

    /// Leading whitespace is not a whole number of levels
    #[error("line {line}: indentation of {spaces} spaces is not a multiple of {indent}")]
    Misaligned {
        /// 1-based line number
        line: usize,
        /// Leading spaces found
        spaces: usize,
        /// Expected indent width
        indent: usize,
    },

    /// Tab in the leading whitespace
    #[error("line {0}: tabs are not allowed in indentation")]
    TabIndent(usize),

    /// First line is indented
    #[error("line {0}: the root line must not be indented")]
    IndentedRoot(usize),

    /// A second line at depth zero
    #[error("line {0}: outline has more than one root")]
    MultipleRoots(usize),

    /// Line more than one level deeper than the one before
    #[error("line {line}: depth {depth} skips a level (previous depth {previous})")]
    SkippedLevel {
        /// 1-based line number
        line: usize,
        /// Depth of this line
        depth: usize,
        /// Depth of the previous node
        previous: usize,
    },

    /// Tree operation failed while building
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Parse an outline into a tree of trimmed line strings
pub fn parse(text: &str, indent: usize) -> Result<GeneralTree<String>, OutlineError> {
    if indent == 0 {
        return Err(OutlineError::ZeroIndent);
    }

    let mut tree = GeneralTree::new();
    // path[d] is the most recent node at depth d
    let mut path: Vec<NodeId> = Vec::new();

    for (offset, raw) in text.lines().enumerate() {
        let line = offset + 1;
        let content = raw.trim_end();
        if content.trim_start().is_empty() {
            continue;
        }

        let value = content.trim_start_matches(' ');
        if value.starts_with('\t') {
            return Err(OutlineError::TabIndent(line));
        }
        let spaces = content.len() - value.len();
        if spaces % indent != 0 {
            return Err(OutlineError::Misaligned {
                line,
                spaces,
                indent,
            });
        }
        let depth = spaces / indent;

        if path.is_empty() {
            if depth != 0 {
                return Err(OutlineError::IndentedRoot(line));
            }
            path.push(tree.create_root(value.to_string())?);
            continue;
        }
        if depth == 0 {
            return Err(OutlineError::MultipleRoots(line));
        }
        if depth > path.len() {
            return Err(OutlineError::SkippedLevel {
                line,
                depth,
                previous: path.len() - 1,
            });
        }

        let node = if depth < path.len() {
            // a previous node at this depth is the new node's left sibling
            path.truncate(depth + 1);
            tree.insert_right_sibling(path[depth], value.to_string())?
        } else {
            tree.insert_left_child(path[depth - 1], value.to_string())?
        };
        path.truncate(depth);
        path.push(node);
    }

    if tree.is_empty() {
        return Err(OutlineError::Empty);
    }
    tracing::debug!(nodes = tree.len(), "parsed outline");
    Ok(tree)
}

/// Render a tree as an outline with `indent` spaces per level
pub fn render<T: Display>(tree: &GeneralTree<T>, indent: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_outline(&mut out, tree, indent);
    out
}

/// Write the outline of `tree` to any formatter sink.
///
/// Padding is written as plain spaces, so depth is not bounded by the
/// formatter's width limit.
pub(crate) fn write_outline<W: Write, T: Display>(
    out: &mut W,
    tree: &GeneralTree<T>,
    indent: usize,
) -> fmt::Result {
    for (depth, value) in tree.iter_with_depth() {
        for _ in 0..depth * indent {
            out.write_char(' ')?;
        }
        writeln!(out, "{value}")?;
    }
    Ok(())
}
