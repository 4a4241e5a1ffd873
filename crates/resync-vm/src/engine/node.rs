//! Parse tree.
//!
//! Nodes are immutable and cheap to clone: children sit behind `Rc`, so the
//! repair search can share partially built subtrees between branches.

use std::fmt::Write as _;
use std::rc::Rc;

use resync_core::{Grammar, SymbolId, Token, TokenKind};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A shifted token.
#[derive(Clone, Debug)]
pub struct Terminal {
    pub kind: TokenKind,
    pub value: Rc<str>,
    pub line: u32,
    /// 0-based byte offset into the line.
    pub column: u32,
}

impl From<&Token> for Terminal {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind,
            value: Rc::from(token.value.as_str()),
            line: token.line,
            column: token.column,
        }
    }
}

/// Parse tree node.
///
/// A nonterminal with exactly one child is stored as [`Node::Single`]; adding
/// a second child turns it into [`Node::Many`]. Both shapes answer the same
/// queries, and equality ignores the difference (and token positions).
#[derive(Clone, Debug)]
pub enum Node {
    Terminal(Terminal),
    Single { symbol: SymbolId, child: Rc<Node> },
    Many { symbol: SymbolId, children: Rc<[Node]> },
}

impl Node {
    pub fn terminal(token: &Token) -> Self {
        Node::Terminal(Terminal::from(token))
    }

    /// Nonterminal with the given children, picking the compact shape for one child.
    pub fn nonterminal(symbol: SymbolId, mut children: Vec<Node>) -> Self {
        if children.len() == 1
            && let Some(child) = children.pop()
        {
            return Node::Single {
                symbol,
                child: Rc::new(child),
            };
        }
        Node::Many {
            symbol,
            children: children.into(),
        }
    }

    /// Token kind id for terminals, symbol id for nonterminals.
    pub fn type_id(&self) -> u16 {
        match self {
            Node::Terminal(t) => t.kind.id() as u16,
            Node::Single { symbol, .. } | Node::Many { symbol, .. } => *symbol,
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            Node::Terminal(_) => None,
            Node::Single { symbol, .. } | Node::Many { symbol, .. } => Some(*symbol),
        }
    }

    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Node::Terminal(t) => Some(t.kind),
            _ => None,
        }
    }

    /// Rule name or token kind name.
    pub fn name<'g>(&self, grammar: &'g Grammar) -> &'g str {
        match self {
            Node::Terminal(t) => t.kind.name(),
            Node::Single { symbol, .. } | Node::Many { symbol, .. } => {
                grammar.symbol_name(*symbol).unwrap_or("?")
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::Single { child, .. } => std::slice::from_ref(child.as_ref()),
            Node::Many { children, .. } => children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Token text; `None` for nonterminals.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Terminal(t) => Some(&*t.value),
            _ => None,
        }
    }

    /// Line of the first token under this node.
    pub fn line(&self) -> Option<u32> {
        self.terminals().next().map(|t| t.line)
    }

    /// Column of the first token under this node.
    pub fn column(&self) -> Option<u32> {
        self.terminals().next().map(|t| t.column)
    }

    /// Copy of this nonterminal with one more child. `None` for terminals.
    pub fn append_child(&self, child: Node) -> Option<Node> {
        match self {
            Node::Terminal(_) => None,
            Node::Single { symbol, child: first } => Some(Node::Many {
                symbol: *symbol,
                children: Rc::from([first.as_ref().clone(), child]),
            }),
            Node::Many { symbol, children } => {
                let mut all = children.to_vec();
                all.push(child);
                Some(Node::Many {
                    symbol: *symbol,
                    children: all.into(),
                })
            }
        }
    }

    /// Tokens under this node, left to right.
    pub fn terminals(&self) -> Terminals<'_> {
        Terminals { stack: vec![self] }
    }

    /// Indented outline, one node per line.
    pub fn dump(&self, grammar: &Grammar) -> String {
        let mut out = String::new();
        self.dump_into(grammar, 0, &mut out);
        out
    }

    fn dump_into(&self, grammar: &Grammar, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self {
            Node::Terminal(t) if t.value.is_empty() => {
                writeln!(out, "{indent}{}", t.kind).expect("String write never fails");
            }
            Node::Terminal(t) => {
                writeln!(out, "{indent}{} {:?}", t.kind, t.value).expect("String write never fails");
            }
            _ => {
                writeln!(out, "{indent}{}", self.name(grammar)).expect("String write never fails");
                for child in self.children() {
                    child.dump_into(grammar, depth + 1, out);
                }
            }
        }
    }

    /// Serializable view that resolves rule names through `grammar`.
    pub fn view<'a>(&'a self, grammar: &'a Grammar) -> NodeView<'a> {
        NodeView {
            node: self,
            grammar,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Terminal(a), Node::Terminal(b)) => a.kind == b.kind && a.value == b.value,
            (Node::Terminal(_), _) | (_, Node::Terminal(_)) => false,
            _ => self.type_id() == other.type_id() && self.children() == other.children(),
        }
    }
}

impl Eq for Node {}

/// Depth-first iterator over the terminals of a tree.
pub struct Terminals<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Terminals<'a> {
    type Item = &'a Terminal;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Terminal(t) => return Some(t),
                _ => self.stack.extend(node.children().iter().rev()),
            }
        }
        None
    }
}

/// A node paired with the grammar that names its symbols.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    node: &'a Node,
    grammar: &'a Grammar,
}

struct ChildrenView<'a> {
    nodes: &'a [Node],
    grammar: &'a Grammar,
}

impl Serialize for NodeView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.node {
            Node::Terminal(t) => {
                let mut s = serializer.serialize_struct("Terminal", 4)?;
                s.serialize_field("kind", &t.kind)?;
                s.serialize_field("value", &*t.value)?;
                s.serialize_field("line", &t.line)?;
                s.serialize_field("column", &t.column)?;
                s.end()
            }
            node => {
                let mut s = serializer.serialize_struct("Nonterminal", 2)?;
                s.serialize_field("symbol", node.name(self.grammar))?;
                s.serialize_field(
                    "children",
                    &ChildrenView {
                        nodes: node.children(),
                        grammar: self.grammar,
                    },
                )?;
                s.end()
            }
        }
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.nodes.iter().map(|n| n.view(self.grammar)))
    }
}
