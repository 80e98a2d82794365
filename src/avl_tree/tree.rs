use crate::arena::{Arena, Handle};
use crate::avl_tree::node::{Node, Side};
use log::trace;
use std::collections::HashMap;
use std::mem;

/// The balancing engine of an avl tree.
///
/// `Tree<T>` owns every node through an arena and keeps the AVL invariant across leaf
/// attachment and removal. It never compares values: callers locate the attachment point or
/// the node to remove, and the tree relinks, retraces and rotates.
pub struct Tree<T> {
    arena: Arena<Node<T>>,
    root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn node(&self, handle: Handle) -> &Node<T> {
        &self.arena[handle]
    }

    pub fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    pub fn into_parts(self) -> (Arena<Node<T>>, Option<Handle>) {
        (self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Attaches `value` as a new leaf. `slot` names the empty child slot of an existing node,
    /// or `None` to plant the root of an empty tree.
    pub fn attach(&mut self, slot: Option<(Handle, Side)>, value: T) -> Handle {
        match slot {
            None => {
                debug_assert!(self.root.is_none());
                let leaf = self.arena.insert(Node::new(value, None));
                self.root = Some(leaf);
                leaf
            },
            Some((parent, side)) => {
                debug_assert!(self.arena[parent].child(side).is_none());
                let leaf = self.arena.insert(Node::new(value, Some(parent)));
                self.arena[parent].set_child(side, Some(leaf));
                self.retrace_insert(leaf);
                leaf
            },
        }
    }

    /// Removes the value stored at `handle` and returns it. Exactly one node is freed: a node
    /// with two children takes over its in-order successor's value and the successor's node is
    /// the one spliced out.
    pub fn remove(&mut self, handle: Handle) -> T {
        let (left, right) = {
            let node = &self.arena[handle];
            (node.left, node.right)
        };
        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let value = self.splice(successor);
                mem::replace(&mut self.arena[handle].value, value)
            },
            _ => self.splice(handle),
        }
    }

    pub fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // precondition: the node has at most one child
    fn splice(&mut self, handle: Handle) -> T {
        self.retrace_remove(handle);

        let parent = self.arena[handle].parent;
        let side = parent.map(|parent| self.side_of(parent, handle));
        let node = self.arena.remove(&handle);
        debug_assert!(node.left.is_none() || node.right.is_none());

        let child = node.left.or(node.right);
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        match (parent, side) {
            (Some(parent), Some(side)) => self.arena[parent].set_child(side, child),
            _ => self.root = child,
        }
        node.value
    }

    /// Puts `new_root` where `old_root` hung from `parent`, or at the top of the tree.
    fn relink(&mut self, parent: Option<Handle>, old_root: Handle, new_root: Handle) {
        self.arena[new_root].parent = parent;
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, old_root);
                self.arena[parent].set_child(side, Some(new_root));
            },
            None => self.root = Some(new_root),
        }
    }

    /// Single rotation of `x` toward `side.opposite()`, where `z` is the taller child hanging on
    /// `side`. Returns `z`, the new root of the subtree.
    fn rotate_single(&mut self, x: Handle, z: Handle, side: Side) -> Handle {
        let inner = self.arena[z].child(side.opposite());
        self.arena[x].set_child(side, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }
        self.arena[z].set_child(side.opposite(), Some(x));
        self.arena[x].parent = Some(z);

        // a balanced z only arises from removal
        if self.arena[z].balance == 0 {
            self.arena[x].balance = side.sign();
            self.arena[z].balance = -side.sign();
        } else {
            self.arena[x].balance = 0;
            self.arena[z].balance = 0;
        }
        z
    }

    /// Double rotation lifting `y`, the inner child of `z`, above both `x` and `z`. Returns `y`.
    fn rotate_double(&mut self, x: Handle, z: Handle, side: Side) -> Handle {
        let y = self.arena[z]
            .child(side.opposite())
            .expect("Expected an inner grandchild for a double rotation.");

        let outer = self.arena[y].child(side);
        self.arena[z].set_child(side.opposite(), outer);
        if let Some(outer) = outer {
            self.arena[outer].parent = Some(z);
        }
        self.arena[y].set_child(side, Some(z));
        self.arena[z].parent = Some(y);

        let inner = self.arena[y].child(side.opposite());
        self.arena[x].set_child(side, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }
        self.arena[y].set_child(side.opposite(), Some(x));
        self.arena[x].parent = Some(y);

        let balance = self.arena[y].balance;
        if balance == side.sign() {
            self.arena[x].balance = -side.sign();
            self.arena[z].balance = 0;
        } else if balance == 0 {
            self.arena[x].balance = 0;
            self.arena[z].balance = 0;
        } else {
            self.arena[x].balance = 0;
            self.arena[z].balance = side.sign();
        }
        self.arena[y].balance = 0;
        y
    }

    /// Restores `x`, which is two levels taller on `side` where `z` hangs. Returns the new
    /// subtree root; the caller relinks it.
    fn rebalance(&mut self, x: Handle, z: Handle, side: Side) -> Handle {
        if self.arena[z].balance == side.opposite().sign() {
            trace!("double rotation at {:?} through {:?} ({:?} heavy)", x, z, side);
            self.rotate_double(x, z, side)
        } else {
            trace!("single rotation at {:?} through {:?} ({:?} heavy)", x, z, side);
            self.rotate_single(x, z, side)
        }
    }

    fn retrace_insert(&mut self, leaf: Handle) {
        let mut grown = leaf;
        while let Some(x) = self.arena[grown].parent {
            let side = self.side_of(x, grown);
            let balance = self.arena[x].balance;

            if balance == side.sign() {
                let parent = self.arena[x].parent;
                let new_root = self.rebalance(x, grown, side);
                self.relink(parent, x, new_root);
                break;
            } else if balance == -side.sign() {
                self.arena[x].balance = 0;
                break;
            }

            self.arena[x].balance = side.sign();
            grown = x;
        }
    }

    // Runs before the node is spliced out: its subtree is about to lose one level.
    fn retrace_remove(&mut self, handle: Handle) {
        let mut shrunk = handle;
        let mut current = self.arena[handle].parent;
        while let Some(x) = current {
            let parent = self.arena[x].parent;
            let side = self.side_of(x, shrunk);
            let balance = self.arena[x].balance;

            if balance == -side.sign() {
                let sibling_side = side.opposite();
                let z = self.arena[x]
                    .child(sibling_side)
                    .expect("Expected a sibling on the taller side.");
                let sibling_balance = self.arena[z].balance;
                let new_root = self.rebalance(x, z, sibling_side);
                self.relink(parent, x, new_root);
                if sibling_balance == 0 {
                    break;
                }
                shrunk = new_root;
            } else if balance == 0 {
                self.arena[x].balance = -side.sign();
                break;
            } else {
                self.arena[x].balance = 0;
                shrunk = x;
            }

            current = parent;
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max_height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((handle, depth)) = stack.pop() {
            max_height = max_height.max(depth);
            let node = &self.arena[handle];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max_height
    }

    /// Panics unless every parent link, balance factor and the node count are consistent.
    pub fn assert_structure(&self) {
        let mut heights: HashMap<Handle, usize> = HashMap::new();
        let mut stack = Vec::new();
        let mut visited = 0;

        if let Some(root) = self.root {
            assert_eq!(self.arena[root].parent, None, "root has a parent");
            stack.push((root, false));
        }
        while let Some((handle, expanded)) = stack.pop() {
            let node = &self.arena[handle];
            if !expanded {
                stack.push((handle, true));
                for child in node.left.iter().chain(node.right.iter()) {
                    assert_eq!(self.arena[*child].parent, Some(handle), "broken parent link");
                    stack.push((*child, false));
                }
                continue;
            }

            let height_of = |child: Option<Handle>| child.map_or(0, |child| heights[&child]);
            let left = height_of(node.left);
            let right = height_of(node.right);
            let balance = right as isize - left as isize;
            assert_eq!(balance, node.balance as isize, "stale balance factor");
            assert!(balance.abs() <= 1, "unbalanced node");
            heights.insert(handle, left.max(right) + 1);
            visited += 1;
        }

        assert_eq!(visited, self.arena.len(), "unreachable nodes");
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}
