//! Parsing helpers built on the grammar.
//!
//! Tree-sitter never fails on bad input; it recovers and marks the damage
//! with `ERROR` and `MISSING` nodes. [`syntax_errors`] turns those nodes into
//! [`SyntaxIssue`]s and [`parse_checked`] refuses trees that contain any.

use std::ops::Range;

use tracing::{debug, trace};
use tree_sitter::{Node, Parser, Point, Query, QueryCursor, Tree, TreeCursor};

use crate::error::{LoadError, ParseError};
use crate::load::try_language;

const ERROR_QUERY: &str = "(ERROR) @error";

/// What kind of damage a [`SyntaxIssue`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Text the parser could not fit into the grammar.
    Unexpected,
    /// A token the parser had to insert, such as a closing `)`.
    Missing(&'static str),
}

/// A single syntax problem located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub kind: IssueKind,
    pub byte_range: Range<usize>,
    pub start: Point,
}

impl SyntaxIssue {
    fn from_node(node: Node<'_>) -> Self {
        let kind = if node.is_missing() {
            IssueKind::Missing(node.kind())
        } else {
            IssueKind::Unexpected
        };
        Self {
            kind,
            byte_range: node.byte_range(),
            start: node.start_position(),
        }
    }
}

/// Returns a parser with the grammar installed.
pub fn parser() -> Result<Parser, LoadError> {
    let language = try_language()?;
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    Ok(parser)
}

/// Parses `source` into a syntax tree. Bad syntax does not fail the parse.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let tree = parser()?.parse(source, None).ok_or(ParseError::Cancelled)?;
    debug!(
        bytes = source.len(),
        has_error = tree.root_node().has_error(),
        "parsed source"
    );
    Ok(tree)
}

/// Parses `source` and fails if the tree contains any syntax errors.
pub fn parse_checked(source: &str) -> Result<Tree, ParseError> {
    let tree = parse(source)?;
    if !tree.root_node().has_error() {
        return Ok(tree);
    }

    let issues = syntax_errors(&tree, source)?;
    let start = issues
        .first()
        .map(|issue| issue.start)
        .unwrap_or_else(|| tree.root_node().start_position());
    Err(ParseError::Syntax {
        line: start.row + 1,
        column: start.column + 1,
        issues,
    })
}

/// Collects the `ERROR` and `MISSING` nodes of `tree`, in source order.
///
/// Errors nested inside an already reported error, including errors that
/// span exactly the same bytes, are skipped.
pub fn syntax_errors(tree: &Tree, source: &str) -> Result<Vec<SyntaxIssue>, ParseError> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(Vec::new());
    }

    let query = Query::new(&tree.language(), ERROR_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut nodes = Vec::new();
    for m in cursor.matches(&query, root, source.as_bytes()) {
        nodes.extend(m.captures.iter().map(|capture| capture.node));
    }
    collect_missing(&mut root.walk(), &mut nodes);

    nodes.sort_by_key(|node| (node.start_byte(), std::cmp::Reverse(node.end_byte())));

    let mut issues: Vec<SyntaxIssue> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let covered = issues.last().is_some_and(|prev| {
            prev.kind == IssueKind::Unexpected
                && prev.byte_range.start <= node.start_byte()
                && node.end_byte() <= prev.byte_range.end
        });
        if !covered {
            issues.push(SyntaxIssue::from_node(node));
        }
    }

    trace!(count = issues.len(), "collected syntax issues");
    Ok(issues)
}

fn collect_missing<'tree>(cursor: &mut TreeCursor<'tree>, out: &mut Vec<Node<'tree>>) {
    loop {
        let node = cursor.node();
        if node.is_missing() {
            out.push(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Renders every node of `tree`, named and anonymous, one per line.
///
/// Each line shows the field name (if any), the node kind and its byte
/// range. Leaves also show their source text.
///
/// ```
/// let tree = tree_sitter_wabznasm::syntax::parse("1+2").unwrap();
/// let dump = tree_sitter_wabznasm::syntax::render_tree(&tree, "1+2");
/// assert!(dump.starts_with("source_file [0-3]"));
/// assert!(dump.contains("operator: \"+\" [1-2] \"+\""));
/// ```
pub fn render_tree(tree: &Tree, source: &str) -> String {
    let mut out = String::new();
    let mut cursor = tree.walk();
    let mut depth = 0usize;
    loop {
        let node = cursor.node();
        out.push_str(&"  ".repeat(depth));
        if let Some(field) = cursor.field_name() {
            out.push_str(field);
            out.push_str(": ");
        }
        if node.is_named() {
            out.push_str(node.kind());
        } else {
            out.push_str(&format!("{:?}", node.kind()));
        }
        out.push_str(&format!(" [{}-{}]", node.start_byte(), node.end_byte()));
        if node.child_count() == 0 {
            let text = node.utf8_text(source.as_bytes()).unwrap_or("<error>");
            out.push_str(&format!(" {text:?}"));
        }
        out.push('\n');

        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return out;
            }
            depth -= 1;
        }
    }
}
