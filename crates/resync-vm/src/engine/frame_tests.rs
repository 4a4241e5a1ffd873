use std::sync::Arc;

use resync_core::{Token, TokenKind};

use super::{FrameArena, Node};

fn name(value: &str) -> Node {
    Node::terminal(&Token::new(TokenKind::Name, value, 1, 0, Arc::from(value)))
}

#[test]
fn older_frames_are_never_changed() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let moved = arena.with_state(root, 3);
    let grown = arena.with_child(moved, name("x"));

    assert_eq!(arena.get(root).state, 0);
    assert_eq!(arena.get(root).num_children(), 0);
    assert_eq!(arena.get(moved).state, 3);
    assert_eq!(arena.get(moved).num_children(), 0);
    assert_eq!(arena.get(grown).state, 3);
    assert_eq!(arena.get(grown).num_children(), 1);
    assert_eq!(arena.get(grown).parent, None);
}

#[test]
fn children_keep_their_order() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let one = arena.with_child(root, name("a"));
    let two = arena.with_child(one, name("b"));

    let single = arena.get(one).to_node();
    assert!(matches!(single, Node::Single { symbol: 256, .. }));

    let node = arena.get(two).to_node();
    let values: Vec<_> = node.children().iter().filter_map(Node::value).collect();
    assert_eq!(values, ["a", "b"]);
    assert!(matches!(node, Node::Many { symbol: 256, .. }));
}

#[test]
fn branches_share_their_parent() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let left = arena.push(Some(root), 257);
    let right = arena.push(Some(root), 258);
    let right = arena.with_state(right, 2);

    assert_eq!(arena.depth(left), 2);
    assert_eq!(arena.shape(left), [(257, 0), (256, 0)]);
    assert_eq!(arena.shape(right), [(258, 2), (256, 0)]);
}

#[test]
fn keep_relinks_the_surviving_stack() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let mark = arena.len();

    let moved = arena.with_state(root, 1);
    let _abandoned = arena.push(Some(moved), 257);
    let inner = arena.push(Some(moved), 258);
    let inner = arena.with_state(inner, 2);

    let top = arena.keep(mark, inner);
    assert_eq!(arena.len(), 3);
    assert_eq!(arena.shape(top), [(258, 2), (256, 1)]);
    assert_eq!(arena.depth(top), 2);
}

#[test]
fn keep_below_mark_is_a_no_op() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let top = arena.push(Some(root), 257);

    assert_eq!(arena.keep(arena.len(), top), top);
    assert_eq!(arena.len(), 2);
}

#[test]
fn truncate_drops_later_frames() {
    let mut arena = FrameArena::new();
    let root = arena.push(None, 256);
    let mark = arena.len();
    arena.push(Some(root), 257);
    arena.push(Some(root), 258);

    arena.truncate(mark);
    assert_eq!(arena.len(), 1);
    assert!(!arena.is_empty());
}
