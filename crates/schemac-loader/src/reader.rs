//! Comment-preserving YAML reader
//!
//! `yaml-rust2` supplies the event stream and token positions; comments are
//! not part of that stream, so they are recovered from the source text:
//!
//! - head comment: the comment-only lines directly above a node that is the
//!   first token on its line;
//! - line comment: a trailing `# ...` belongs to the shallowest scalar or flow
//!   collection starting on that line, the last one when tied. Block
//!   collections start on the line of their first child and never take it.

use crate::{LoaderError, Result};
use schemac_ir::{Entry, Node, NodeKind, Position};
use std::collections::HashMap;
use tracing::trace;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Read every YAML document of `source`.
///
/// A document without content (`---` alone) yields a null node; an empty
/// source yields no documents.
pub fn read_documents(source_name: &str, source: &str) -> Result<Vec<Node>> {
    let mut builder = TreeBuilder::new(source);
    let mut parser = Parser::new_from_str(source);
    parser
        .load(&mut builder, true)
        .map_err(|err| LoaderError::syntax(source_name, err.to_string()))?;

    if let Some(message) = builder.error {
        return Err(LoaderError::syntax(source_name, message));
    }

    trace!(
        source = source_name,
        documents = builder.documents.len(),
        "read YAML documents"
    );
    Ok(builder.documents)
}

/// Source text split into lines for comment lookup
struct SourceLines<'s> {
    lines: Vec<&'s str>,
}

impl<'s> SourceLines<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Line text for a 1-indexed line number
    fn line(&self, line: usize) -> Option<&'s str> {
        line.checked_sub(1).and_then(|idx| self.lines.get(idx).copied())
    }

    fn is_comment_line(text: &str) -> bool {
        text.trim_start().starts_with('#')
    }

    /// True when only indentation and block indicators precede `position`
    fn is_first_on_line(&self, position: Position) -> bool {
        let Some(text) = self.line(position.line) else {
            return false;
        };
        text.chars()
            .take(position.column.saturating_sub(1))
            .all(|c| c.is_whitespace() || c == '-' || c == '?')
    }

    /// Comment block directly above `line`, joined with newlines
    fn head_comment(&self, line: usize) -> String {
        let mut collected = Vec::new();
        let mut current = line;
        while current > 1 {
            current -= 1;
            match self.line(current) {
                Some(text) if Self::is_comment_line(text) => collected.push(text.trim()),
                _ => break,
            }
        }
        collected.reverse();
        collected.join("\n")
    }

    /// Trailing comment of a line that carries content
    fn trailing_comment(&self, line: usize) -> Option<&'s str> {
        let text = self.line(line)?;
        if Self::is_comment_line(text) {
            return None;
        }
        comment_start(text).map(|idx| text[idx..].trim_end())
    }

    /// True when a flow collection starts at `position`
    fn is_flow(&self, position: Position) -> bool {
        self.line(position.line)
            .and_then(|text| text.chars().nth(position.column.saturating_sub(1)))
            .is_some_and(|c| c == '[' || c == '{')
    }
}

/// Byte index of the `#` that opens a comment, outside quoted scalars
fn comment_start(text: &str) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if in_double {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_double = false;
            }
        } else if in_single {
            if c == '\'' {
                if chars.peek().is_some_and(|&(_, next)| next == '\'') {
                    chars.next();
                } else {
                    in_single = false;
                }
            }
        } else {
            let at_token_start = prev.is_none_or(|p| p.is_whitespace() || "[{,:".contains(p));
            match c {
                '#' if prev.is_none_or(char::is_whitespace) => return Some(idx),
                '"' if at_token_start => in_double = true,
                '\'' if at_token_start => in_single = true,
                _ => {}
            }
        }
        prev = Some(c);
    }
    None
}

fn is_null_literal(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}

/// Open collection awaiting its end event
struct Frame {
    node: Node,
    children: Vec<Node>,
}

impl Frame {
    fn close(self) -> Node {
        let Frame { mut node, children } = self;
        node.kind = match node.kind {
            NodeKind::Mapping(_) => {
                let mut entries = Vec::with_capacity(children.len() / 2);
                let mut items = children.into_iter();
                while let (Some(key), Some(value)) = (items.next(), items.next()) {
                    entries.push(Entry::new(key, value));
                }
                NodeKind::Mapping(entries)
            }
            _ => NodeKind::Sequence(children),
        };
        node
    }
}

struct TreeBuilder<'s> {
    lines: SourceLines<'s>,
    stack: Vec<Frame>,
    root: Option<Node>,
    documents: Vec<Node>,
    error: Option<String>,
}

impl<'s> TreeBuilder<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lines: SourceLines::new(source),
            stack: Vec::new(),
            root: None,
            documents: Vec::new(),
            error: None,
        }
    }

    /// Create a node at `mark`, attaching its head comment
    fn open(&self, kind: NodeKind, mark: Marker) -> Node {
        let position = Position::new(mark.line(), mark.col() + 1, mark.index());
        let mut node = Node::new(kind).with_position(position);
        if self.lines.is_first_on_line(position) {
            node.head_comment = self.lines.head_comment(position.line);
        }
        node
    }

    fn insert(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root = Some(node),
        }
    }

    fn finish_document(&mut self) {
        self.stack.clear();
        let mut root = self.root.take().unwrap_or_else(Node::null);

        let mut best = HashMap::new();
        self.collect_candidates(&root, 0, &mut 0, &mut best);

        let winners: HashMap<usize, String> = best
            .into_iter()
            .filter_map(|(line, (_, order))| {
                self.lines
                    .trailing_comment(line)
                    .map(|comment| (order, comment.to_string()))
            })
            .collect();
        assign_line_comments(&mut root, &mut 0, &winners);

        self.documents.push(root);
    }

    /// Record, per line, the shallowest (then latest) comment candidate
    fn collect_candidates(
        &self,
        node: &Node,
        depth: usize,
        order: &mut usize,
        best: &mut HashMap<usize, (usize, usize)>,
    ) {
        let id = *order;
        *order += 1;

        let candidate = match node.kind {
            NodeKind::Null | NodeKind::Scalar(_) => true,
            NodeKind::Sequence(_) | NodeKind::Mapping(_) => self.lines.is_flow(node.position),
        };
        if candidate {
            best.entry(node.position.line)
                .and_modify(|(best_depth, best_id)| {
                    if depth <= *best_depth {
                        *best_depth = depth;
                        *best_id = id;
                    }
                })
                .or_insert((depth, id));
        }

        match &node.kind {
            NodeKind::Sequence(items) => {
                for item in items {
                    self.collect_candidates(item, depth + 1, order, best);
                }
            }
            NodeKind::Mapping(entries) => {
                for entry in entries {
                    self.collect_candidates(&entry.key, depth + 1, order, best);
                    self.collect_candidates(&entry.value, depth + 1, order, best);
                }
            }
            NodeKind::Null | NodeKind::Scalar(_) => {}
        }
    }
}

/// Walk in the same order as `collect_candidates` and attach comments
fn assign_line_comments(node: &mut Node, order: &mut usize, winners: &HashMap<usize, String>) {
    if let Some(comment) = winners.get(order) {
        node.line_comment.clone_from(comment);
    }
    *order += 1;

    match &mut node.kind {
        NodeKind::Sequence(items) => {
            for item in items {
                assign_line_comments(item, order, winners);
            }
        }
        NodeKind::Mapping(entries) => {
            for entry in entries {
                assign_line_comments(&mut entry.key, order, winners);
                assign_line_comments(&mut entry.value, order, winners);
            }
        }
        NodeKind::Null | NodeKind::Scalar(_) => {}
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::DocumentStart { .. } => {
                self.stack.clear();
                self.root = None;
            }
            Event::DocumentEnd { .. } => self.finish_document(),
            Event::Scalar(value, style, ..) => {
                let value = String::from(value);
                let kind = if matches!(style, TScalarStyle::Plain) && is_null_literal(&value) {
                    NodeKind::Null
                } else {
                    NodeKind::Scalar(value)
                };
                let node = self.open(kind, mark);
                self.insert(node);
            }
            Event::SequenceStart { .. } => {
                let node = self.open(NodeKind::Sequence(Vec::new()), mark);
                self.stack.push(Frame {
                    node,
                    children: Vec::new(),
                });
            }
            Event::MappingStart { .. } => {
                let node = self.open(NodeKind::Mapping(Vec::new()), mark);
                self.stack.push(Frame {
                    node,
                    children: Vec::new(),
                });
            }
            Event::SequenceEnd { .. } | Event::MappingEnd { .. } => {
                if let Some(frame) = self.stack.pop() {
                    let node = frame.close();
                    self.insert(node);
                }
            }
            Event::Alias { .. } => {
                self.error
                    .get_or_insert_with(|| format!("aliases are not supported (line {})", mark.line()));
            }
            _ => {}
        }
    }
}
