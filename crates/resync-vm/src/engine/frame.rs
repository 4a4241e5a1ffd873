//! Parser stack frames.
//!
//! Implements the cactus stack pattern: frames are append-only and point at
//! their parent by index. A parser stack is named by its top frame, so holding
//! on to an older [`FrameId`] is all it takes to come back to that stack. The
//! repair search branches from one stack into many this way without copying.

use std::rc::Rc;

use resync_core::{StateId, SymbolId};

use super::node::Node;

/// Index of a frame in its [`FrameArena`].
pub type FrameId = u32;

/// Children collected so far, newest first.
#[derive(Debug)]
struct Link {
    node: Node,
    prev: Option<Rc<Link>>,
}

/// One rule being matched.
///
/// Frames are never changed once pushed; moving to another DFA state or
/// adding a child produces a new frame with the same parent.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame of the enclosing rule, `None` for the start rule.
    pub parent: Option<FrameId>,
    pub symbol: SymbolId,
    pub state: StateId,
    children: Option<Rc<Link>>,
    len: u32,
}

impl Frame {
    pub fn num_children(&self) -> usize {
        self.len as usize
    }

    /// Node for the rule, built from the children collected so far.
    pub fn to_node(&self) -> Node {
        let mut children = Vec::with_capacity(self.len as usize);
        let mut link = self.children.as_deref();
        while let Some(l) = link {
            children.push(l.node.clone());
            link = l.prev.as_deref();
        }
        children.reverse();
        Node::nonterminal(self.symbol, children)
    }
}

/// Append-only arena of frames.
#[derive(Debug, Default)]
pub struct FrameArena {
    frames: Vec<Frame>,
}

impl FrameArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, frame: Frame) -> FrameId {
        let id = self.frames.len() as FrameId;
        self.frames.push(frame);
        id
    }

    /// Push a frame for `symbol` in its start state.
    pub fn push(&mut self, parent: Option<FrameId>, symbol: SymbolId) -> FrameId {
        self.alloc(Frame {
            parent,
            symbol,
            state: 0,
            children: None,
            len: 0,
        })
    }

    #[inline]
    pub fn get(&self, id: FrameId) -> &Frame {
        &self.frames[id as usize]
    }

    /// Copy of frame `id` in another DFA state.
    pub fn with_state(&mut self, id: FrameId, state: StateId) -> FrameId {
        let frame = Frame {
            state,
            ..self.get(id).clone()
        };
        self.alloc(frame)
    }

    /// Copy of frame `id` with `node` appended to its children.
    pub fn with_child(&mut self, id: FrameId, node: Node) -> FrameId {
        let base = self.get(id);
        let frame = Frame {
            children: Some(Rc::new(Link {
                node,
                prev: base.children.clone(),
            })),
            len: base.len + 1,
            ..base.clone()
        };
        self.alloc(frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop every frame pushed after the arena had `len` frames.
    ///
    /// Stacks whose top was pushed later must not be used afterwards.
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }

    /// Drop frames pushed after `mark`, except those on the stack `top`.
    ///
    /// Returns the new id of `top`. A parent always has a lower id than its
    /// children, so the frames to keep are a prefix of the walk from `top`.
    pub fn keep(&mut self, mark: usize, top: FrameId) -> FrameId {
        let mut chain = Vec::new();
        let mut id = Some(top);
        while let Some(current) = id
            && current as usize >= mark
        {
            let frame = self.get(current).clone();
            id = frame.parent;
            chain.push(frame);
        }

        self.frames.truncate(mark);
        let mut parent = id;
        for mut frame in chain.into_iter().rev() {
            frame.parent = parent;
            parent = Some(self.alloc(frame));
        }
        parent.unwrap_or(top)
    }

    /// Number of frames on the stack `top`.
    pub fn depth(&self, top: FrameId) -> u32 {
        let mut depth = 0;
        let mut id = Some(top);
        while let Some(i) = id {
            depth += 1;
            id = self.get(i).parent;
        }
        depth
    }

    /// Rule and state of every frame on the stack `top`, innermost first.
    ///
    /// Two stacks with the same shape accept exactly the same token
    /// sequences, whatever nodes they hold.
    pub fn shape(&self, top: FrameId) -> Vec<(SymbolId, StateId)> {
        let mut shape = Vec::new();
        let mut id = Some(top);
        while let Some(i) = id {
            let frame = self.get(i);
            shape.push((frame.symbol, frame.state));
            id = frame.parent;
        }
        shape
    }
}
