use crate::arena::{Arena, Handle};
use crate::avl_tree::node::{Node, Side};
use crate::avl_tree::order::Compare;
use crate::avl_tree::tree::Tree;
use std::cmp::Ordering;

/// Outcome of descending toward a value.
pub enum Probe {
    /// A node comparing equal to the value.
    Found(Handle),
    /// The empty child slot where the value belongs, or `None` if the tree is empty.
    Vacant(Option<(Handle, Side)>),
}

pub fn probe<T, C>(tree: &Tree<T>, order: &C, value: &T) -> Probe
where
    C: Compare<T>,
{
    let mut slot = None;
    let mut current = tree.root();
    while let Some(handle) = current {
        let node = tree.node(handle);
        let side = match order.compare(value, &node.value) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return Probe::Found(handle),
        };
        slot = Some((handle, side));
        current = node.child(side);
    }
    Probe::Vacant(slot)
}

pub fn find<T, C>(tree: &Tree<T>, order: &C, value: &T) -> Option<Handle>
where
    C: Compare<T>,
{
    match probe(tree, order, value) {
        Probe::Found(handle) => Some(handle),
        Probe::Vacant(_) => None,
    }
}

fn push_spine<T>(
    arena: &Arena<Node<T>>,
    stack: &mut Vec<Handle>,
    mut current: Option<Handle>,
    side: Side,
) {
    while let Some(handle) = current {
        stack.push(handle);
        current = arena[handle].child(side);
    }
}

/// A single descent toward `value` that leaves both neighbor iterators ready to run.
pub fn seek<'a, T, C>(
    tree: &'a Tree<T>,
    order: &C,
    value: &T,
) -> (Option<&'a T>, NeighborIter<'a, T>, NeighborIter<'a, T>)
where
    C: Compare<T>,
{
    let arena = tree.arena();
    let mut equal = None;
    let mut before = Vec::new();
    let mut after = Vec::new();

    let mut current = tree.root();
    while let Some(handle) = current {
        let node = &arena[handle];
        match order.compare(value, &node.value) {
            Ordering::Less => {
                after.push(handle);
                current = node.left;
            },
            Ordering::Greater => {
                before.push(handle);
                current = node.right;
            },
            Ordering::Equal => {
                equal = Some(&node.value);
                push_spine(arena, &mut before, node.left, Side::Right);
                push_spine(arena, &mut after, node.right, Side::Left);
                break;
            },
        }
    }

    (
        equal,
        NeighborIter {
            arena,
            stack: before,
            toward: Side::Left,
        },
        NeighborIter {
            arena,
            stack: after,
            toward: Side::Right,
        },
    )
}

/// An iterator over the values strictly before or strictly after a probe value, nearest first.
///
/// Created by `AvlSet::iter_before` and `AvlSet::iter_after`.
pub struct NeighborIter<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Handle>,
    toward: Side,
}

impl<'a, T> Iterator for NeighborIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            let toward = self.toward;
            push_spine(arena, &mut self.stack, node.child(toward), toward.opposite());
            &node.value
        })
    }
}

/// The keys of a `Neighbors` result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Neighbor {
    Before,
    Equal,
    After,
}

/// The nearest values around a probe value, as returned by `AvlSet::search_neighbors`.
///
/// A key is present only when a matching value was found in that direction.
#[derive(Debug, Eq, PartialEq)]
pub struct Neighbors<'a, T> {
    before: Option<&'a T>,
    equal: Option<&'a T>,
    after: Option<&'a T>,
}

impl<'a, T> Neighbors<'a, T> {
    pub(crate) fn new(
        before: Option<&'a T>,
        equal: Option<&'a T>,
        after: Option<&'a T>,
    ) -> Self {
        Neighbors {
            before,
            equal,
            after,
        }
    }

    /// Returns the value stored under `key`, if one was found.
    pub fn get(&self, key: Neighbor) -> Option<&'a T> {
        match key {
            Neighbor::Before => self.before,
            Neighbor::Equal => self.equal,
            Neighbor::After => self.after,
        }
    }

    pub fn contains_key(&self, key: Neighbor) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of keys present.
    pub fn len(&self) -> usize {
        [self.before.is_some(), self.equal.is_some(), self.after.is_some()]
            .iter()
            .filter(|present| **present)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the present keys with their values, in `Before`, `Equal`, `After` order.
    pub fn iter(&self) -> impl Iterator<Item = (Neighbor, &'a T)> {
        self.before
            .map(|value| (Neighbor::Before, value))
            .into_iter()
            .chain(self.equal.map(|value| (Neighbor::Equal, value)))
            .chain(self.after.map(|value| (Neighbor::After, value)))
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct Iter<'a, T> {
    arena: &'a Arena<Node<T>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Iter {
            arena: tree.arena(),
            current: tree.root(),
            stack: Vec::new(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            self.current = node.right;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct IntoIter<T> {
    arena: Arena<Node<T>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: Tree<T>) -> Self {
        let (arena, root) = tree.into_parts();
        IntoIter {
            arena,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = self.arena.remove(&handle);
            self.current = node.right;
            node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.arena.len(), Some(self.arena.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::{find, probe, seek, Iter, Neighbor, Neighbors, Probe};
    use crate::avl_tree::order::Natural;
    use crate::avl_tree::tree::Tree;

    fn build(values: &[u32]) -> (Tree<u32>, Natural) {
        let mut tree = Tree::new();
        let order = Natural;
        for value in values {
            if let Probe::Vacant(slot) = probe(&tree, &order, value) {
                tree.attach(slot, *value);
            }
        }
        (tree, order)
    }

    #[test]
    fn test_probe_duplicate() {
        let (tree, order) = build(&[2, 1, 3]);
        match probe(&tree, &order, &3) {
            Probe::Found(handle) => assert_eq!(tree.node(handle).value, 3),
            Probe::Vacant(_) => panic!("expected a match"),
        }
        assert!(find(&tree, &order, &4).is_none());
    }

    #[test]
    fn test_iter() {
        let (tree, _) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let iter = Iter::new(&tree);
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&1, &3, &4, &5, &7, &8, &9]);
    }

    #[test]
    fn test_seek_exact() {
        let (tree, order) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let (equal, before, after) = seek(&tree, &order, &5);
        assert_eq!(equal, Some(&5));
        assert_eq!(before.collect::<Vec<&u32>>(), vec![&4, &3, &1]);
        assert_eq!(after.collect::<Vec<&u32>>(), vec![&7, &8, &9]);
    }

    #[test]
    fn test_seek_absent() {
        let (tree, order) = build(&[5, 3, 8, 1, 4, 7, 9]);
        let (equal, before, after) = seek(&tree, &order, &6);
        assert_eq!(equal, None);
        assert_eq!(before.collect::<Vec<&u32>>(), vec![&5, &4, &3, &1]);
        assert_eq!(after.collect::<Vec<&u32>>(), vec![&7, &8, &9]);
    }

    #[test]
    fn test_seek_out_of_range() {
        let (tree, order) = build(&[2, 1, 3]);
        let (_, mut before, _) = seek(&tree, &order, &0);
        assert_eq!(before.next(), None);
        let (_, _, mut after) = seek(&tree, &order, &4);
        assert_eq!(after.next(), None);
    }

    #[test]
    fn test_neighbors() {
        let neighbors = Neighbors::new(Some(&1), None, Some(&3));
        assert_eq!(neighbors.get(Neighbor::Before), Some(&1));
        assert!(!neighbors.contains_key(Neighbor::Equal));
        assert_eq!(neighbors.len(), 2);
        assert_eq!(
            neighbors.iter().collect::<Vec<(Neighbor, &u32)>>(),
            vec![(Neighbor::Before, &1), (Neighbor::After, &3)],
        );
        assert!(Neighbors::<u32>::new(None, None, None).is_empty());
    }

    #[test]
    fn test_neighbors_all_keys() {
        let neighbors = Neighbors::new(Some(&1), Some(&2), Some(&3));
        assert_eq!(neighbors.len(), 3);
        assert_eq!(
            neighbors.iter().collect::<Vec<(Neighbor, &u32)>>(),
            vec![(Neighbor::Before, &1), (Neighbor::Equal, &2), (Neighbor::After, &3)],
        );

        let neighbors = Neighbors::new(None, Some(&2), None);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors.iter().count(), neighbors.len());
        assert_eq!(neighbors.iter().next(), Some((Neighbor::Equal, &2)));
    }
}
