use crate::avl_tree::order::{Compare, Natural, Predicates};
use crate::avl_tree::query::{self, IntoIter, Iter, NeighborIter, Neighbors, Probe};
use crate::avl_tree::tree::Tree;
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. The order of the set is
/// chosen at construction: the natural `Ord` order, a three-way comparator, or a pair of
/// "less than" and "equal" predicates. Values that compare equal are never stored twice; the
/// first one inserted is kept.
///
/// Nodes live in an arena and refer to their children and parent by handle, so every
/// operation, including drop, runs without recursion.
///
/// # Examples
/// ```
/// use avl_set::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.search_after(&1), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct AvlSet<T, C = Natural> {
    tree: Tree<T>,
    order: C,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>` ordered by `T: Ord`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet {
            tree: Tree::new(),
            order: Natural,
        }
    }

    /// Constructs a new, empty `AvlSet<T>` with room for `capacity` values before its node
    /// storage reallocates.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::with_capacity(1024);
    /// assert!(set.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        AvlSet {
            tree: Tree::with_capacity(capacity),
            order: Natural,
        }
    }
}

impl<T, L, E> AvlSet<T, Predicates<L, E>>
where
    L: Fn(&T, &T) -> bool,
    E: Fn(&T, &T) -> bool,
{
    /// Constructs a new, empty `AvlSet<T>` ordered by a "less than" predicate and an "equal"
    /// predicate. Values for which `equal` holds are treated as the same value.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_predicates(
    ///     |a: &f64, b: &f64| a < b,
    ///     |a: &f64, b: &f64| (a - b).abs() < 0.5,
    /// );
    /// set.insert(1.0);
    /// set.insert(1.25);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn with_predicates(less: L, equal: E) -> Self {
        AvlSet::with_comparator(Predicates::new(less, equal))
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `AvlSet<T>` ordered by a three-way comparator.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.to_vec(), vec![2, 1]);
    /// ```
    pub fn with_comparator(order: C) -> Self {
        AvlSet {
            tree: Tree::new(),
            order,
        }
    }

    /// Constructs a new, empty `AvlSet<T>` ordered by `order`, with room for `capacity` values
    /// before its node storage reallocates. Any `Compare<T>` works here, including
    /// `Predicates`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::{AvlSet, Predicates};
    ///
    /// let mut set = AvlSet::with_comparator_and_capacity(
    ///     Predicates::new(|a: &u32, b: &u32| a < b, |a: &u32, b: &u32| a == b),
    ///     16,
    /// );
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.to_vec(), vec![1, 2]);
    /// ```
    pub fn with_comparator_and_capacity(order: C, capacity: usize) -> Self {
        AvlSet {
            tree: Tree::with_capacity(capacity),
            order,
        }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set untouched if an equal
    /// value is already present.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        match query::probe(&self.tree, &self.order, &value) {
            Probe::Found(_) => false,
            Probe::Vacant(slot) => {
                self.tree.attach(slot, value);
                true
            },
        }
    }

    /// Removes a value from the set. If an equal value exists in the set, it is removed and
    /// returned. Otherwise `None` is returned.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        query::find(&self.tree, &self.order, value).map(|handle| self.tree.remove(handle))
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        query::find(&self.tree, &self.order, value).is_some()
    }

    /// Returns the stored value that compares equal to `value`, or `None` if there is none.
    /// Useful when the order treats distinct values as equal.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
    /// set.insert((1, 'a'));
    /// assert_eq!(set.search(&(1, 'z')), Some(&(1, 'a')));
    /// assert_eq!(set.search(&(2, 'a')), None);
    /// ```
    pub fn search(&self, value: &T) -> Option<&T> {
        query::find(&self.tree, &self.order, value).map(|handle| &self.tree.node(handle).value)
    }

    /// Returns the value stored in the parent node of the node holding `value`. Returns `None`
    /// if `value` is absent or is held by the root.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.parent(&1), Some(&2));
    /// assert_eq!(set.parent(&2), None);
    /// ```
    pub fn parent(&self, value: &T) -> Option<&T> {
        query::find(&self.tree, &self.order, value)
            .and_then(|handle| self.tree.node(handle).parent)
            .map(|parent| &self.tree.node(parent).value)
    }

    /// Returns the value stored at the root of the tree, or `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.root(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// set.insert(3);
    /// assert_eq!(set.root(), Some(&2));
    /// ```
    pub fn root(&self) -> Option<&T> {
        self.tree.root().map(|root| &self.tree.node(root).value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing avl set of {} values", self.len());
        self.tree.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. An empty set
    /// has height 0. Runs in linear time.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), 0);
    /// for i in 0..7 {
    ///     set.insert(i);
    /// }
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the lower and upper bounds on the height of any avl tree holding `len()` values.
    /// The bounds depend only on the length, never on the shape of the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for i in 0..6 {
    ///     set.insert(i);
    /// }
    /// let (lower, upper) = set.height_bounds();
    /// assert_eq!(lower, 2);
    /// assert!(lower <= set.height() && set.height() <= upper);
    /// ```
    pub fn height_bounds(&self) -> (usize, usize) {
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        let c = 1.0 / phi.log2();
        let b = c / 2.0 * 5f64.log2() - 2.0;

        let n = self.len() as f64;
        let lower = (n + 1.0).log2().floor() as usize;
        let upper = (c * (n + 2.0).log2() + b).ceil() as usize - 1;
        (lower, upper)
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .root()
            .map(|root| &self.tree.node(self.tree.leftmost(root)).value)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .root()
            .map(|root| &self.tree.node(self.tree.rightmost(root)).value)
    }

    /// Returns an iterator over the values strictly less than `value`, nearest first.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (1..6).collect();
    /// assert_eq!(set.iter_before(&3).collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn iter_before(&self, value: &T) -> NeighborIter<'_, T> {
        query::seek(&self.tree, &self.order, value).1
    }

    /// Returns an iterator over the values strictly greater than `value`, nearest first.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (1..6).collect();
    /// assert_eq!(set.iter_after(&3).collect::<Vec<&u32>>(), vec![&4, &5]);
    /// ```
    pub fn iter_after(&self, value: &T) -> NeighborIter<'_, T> {
        query::seek(&self.tree, &self.order, value).2
    }

    /// Returns the greatest value strictly less than `value`. Returns `None` if no such value
    /// exists. `value` itself need not be in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.search_before(&1), None);
    /// assert_eq!(set.search_before(&3), Some(&1));
    /// assert_eq!(set.search_before(&4), Some(&3));
    /// ```
    pub fn search_before(&self, value: &T) -> Option<&T> {
        self.search_before_by(value, |_| true)
    }

    /// Returns the nearest value strictly less than `value` that satisfies `predicate`. Values
    /// are tested in order of proximity to `value`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (1..10).collect();
    /// assert_eq!(set.search_before_by(&8, |v| v % 3 == 0), Some(&6));
    /// assert_eq!(set.search_before_by(&3, |v| v % 3 == 0), None);
    /// ```
    pub fn search_before_by<P>(&self, value: &T, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_before(value).find(|candidate| predicate(*candidate))
    }

    /// Returns the least value strictly greater than `value`. Returns `None` if no such value
    /// exists. `value` itself need not be in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.search_after(&5), None);
    /// assert_eq!(set.search_after(&3), Some(&5));
    /// assert_eq!(set.search_after(&2), Some(&3));
    /// ```
    pub fn search_after(&self, value: &T) -> Option<&T> {
        self.search_after_by(value, |_| true)
    }

    /// Returns the nearest value strictly greater than `value` that satisfies `predicate`.
    /// Values are tested in order of proximity to `value`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (1..10).collect();
    /// assert_eq!(set.search_after_by(&2, |v| v % 4 == 0), Some(&4));
    /// assert_eq!(set.search_after_by(&8, |v| v % 4 == 0), None);
    /// ```
    pub fn search_after_by<P>(&self, value: &T, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_after(value).find(|candidate| predicate(*candidate))
    }

    /// Returns the nearest values on both sides of `value` together with an equal value, if one
    /// is stored, from a single descent.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::{AvlSet, Neighbor};
    ///
    /// let set: AvlSet<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// let neighbors = set.search_neighbors(&6);
    /// assert_eq!(neighbors.get(Neighbor::Before), Some(&5));
    /// assert_eq!(neighbors.get(Neighbor::Equal), None);
    /// assert_eq!(neighbors.get(Neighbor::After), Some(&7));
    /// ```
    pub fn search_neighbors(&self, value: &T) -> Neighbors<'_, T> {
        self.search_neighbors_by(value, |_| true)
    }

    /// Like `search_neighbors`, but the `Before` and `After` values must satisfy `predicate`.
    /// The `Equal` value is reported whenever an equal value is stored.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::{AvlSet, Neighbor};
    ///
    /// let set: AvlSet<u32> = (1..10).collect();
    /// let neighbors = set.search_neighbors_by(&5, |v| v % 2 == 0);
    /// assert_eq!(neighbors.get(Neighbor::Before), Some(&4));
    /// assert_eq!(neighbors.get(Neighbor::Equal), Some(&5));
    /// assert_eq!(neighbors.get(Neighbor::After), Some(&6));
    /// ```
    pub fn search_neighbors_by<P>(&self, value: &T, mut predicate: P) -> Neighbors<'_, T>
    where
        P: FnMut(&T) -> bool,
    {
        let (equal, mut before, mut after) = query::seek(&self.tree, &self.order, value);
        let before = before.find(|candidate| predicate(*candidate));
        let after = after.find(|candidate| predicate(*candidate));
        Neighbors::new(before, equal, after)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree)
    }

    /// Returns the values of the set in ascending order.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Panics unless the set is a well-formed avl tree: values strictly ascending in-order,
    /// balance factors accurate and within one, parent links consistent, and the length equal
    /// to the number of reachable nodes.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_structure();

        let mut iter = self.iter();
        if let Some(mut prev) = iter.next() {
            for value in iter {
                assert_eq!(
                    self.order.compare(prev, value),
                    Ordering::Less,
                    "values out of order",
                );
                prev = value;
            }
        }
    }
}

impl<T, C> IntoIterator for AvlSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C>
where
    T: 'a,
    C: Compare<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for AvlSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C> fmt::Debug for AvlSet<T, C>
where
    T: fmt::Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::avl_tree::Neighbor;
    use std::cmp::Ordering;

    fn scenario() -> AvlSet<u32> {
        let mut set = AvlSet::new();
        for value in &[5, 3, 8, 1, 4, 7, 9] {
            set.insert(*value);
        }
        set
    }

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
        assert_eq!(set.height(), 0);
        assert_eq!(set.root(), None);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_comparator_with_capacity() {
        let mut set = AvlSet::with_comparator_and_capacity(|a: &u32, b: &u32| b.cmp(a), 4);
        for value in 0..32 {
            assert!(set.insert(value));
        }
        assert_eq!(set.len(), 32);
        assert_eq!(set.min(), Some(&31));
        assert_eq!(set.search_after(&10), Some(&9));
        set.assert_invariants();
    }

    #[test]
    fn test_insert() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        set.assert_invariants();
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = scenario();
        assert!(!set.insert(4));
        assert_eq!(set.len(), 7);
        assert_eq!(set.to_vec(), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn test_to_vec() {
        let set = scenario();
        assert_eq!(set.to_vec(), vec![1, 3, 4, 5, 7, 8, 9]);
        let (_, upper) = set.height_bounds();
        assert!(set.height() <= upper);
        set.assert_invariants();
    }

    #[test]
    fn test_remove() {
        let mut set = scenario();
        assert_eq!(set.remove(&3), Some(3));
        assert_eq!(set.to_vec(), vec![1, 4, 5, 7, 8, 9]);
        assert_eq!(set.len(), 6);
        set.assert_invariants();
    }

    #[test]
    fn test_remove_absent() {
        let mut set = scenario();
        assert_eq!(set.remove(&6), None);
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_remove_root_with_two_children() {
        let mut set = scenario();
        assert_eq!(set.root(), Some(&5));
        assert_eq!(set.remove(&5), Some(5));
        assert_eq!(set.root(), Some(&7));
        assert_eq!(set.to_vec(), vec![1, 3, 4, 7, 8, 9]);
        set.assert_invariants();
    }

    #[test]
    fn test_search_before_after() {
        let set = scenario();
        assert_eq!(set.search_before(&7), Some(&5));
        assert_eq!(set.search_after(&7), Some(&8));
        assert_eq!(set.search_before(&1), None);
        assert_eq!(set.search_after(&9), None);
        assert_eq!(set.search_before(&100), Some(&9));
        assert_eq!(set.search_after(&0), Some(&1));
    }

    #[test]
    fn test_search_by_predicate() {
        let set = scenario();
        assert_eq!(set.search_before_by(&9, |v| v % 2 == 0), Some(&8));
        assert_eq!(set.search_before_by(&8, |v| v % 2 == 0), Some(&4));
        assert_eq!(set.search_after_by(&4, |v| v % 2 == 1), Some(&5));
        assert_eq!(set.search_after_by(&1, |v| *v > 100), None);
    }

    #[test]
    fn test_search_neighbors_absent() {
        let set = scenario();
        let neighbors = set.search_neighbors(&6);
        assert_eq!(neighbors.get(Neighbor::Before), Some(&5));
        assert_eq!(neighbors.get(Neighbor::Equal), None);
        assert_eq!(neighbors.get(Neighbor::After), Some(&7));
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_search_neighbors_only_before() {
        let set = scenario();
        let neighbors = set.search_neighbors(&10);
        assert_eq!(neighbors.get(Neighbor::Before), Some(&9));
        assert!(!neighbors.contains_key(Neighbor::Equal));
        assert!(!neighbors.contains_key(Neighbor::After));
    }

    #[test]
    fn test_search_neighbors_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.search_neighbors(&1).is_empty());
    }

    #[test]
    fn test_search_and_parent() {
        let set = scenario();
        assert_eq!(set.search(&4), Some(&4));
        assert_eq!(set.search(&6), None);
        assert_eq!(set.parent(&4), Some(&3));
        assert_eq!(set.parent(&3), Some(&5));
        assert_eq!(set.parent(&5), None);
        assert_eq!(set.parent(&6), None);
    }

    #[test]
    fn test_height_bounds() {
        let mut set = AvlSet::new();
        assert_eq!(set.height_bounds(), (0, 1));
        set.insert(0);
        assert_eq!(set.height_bounds(), (1, 1));
        for value in 1..6 {
            set.insert(value);
        }
        let (lower, upper) = set.height_bounds();
        assert_eq!(lower, 2);
        assert!(lower <= set.height() && set.height() <= upper);
    }

    #[test]
    fn test_ascending_insert_then_remove() {
        let mut set = AvlSet::new();
        for value in (1..11).map(|i| i * 10) {
            set.insert(value);
            set.assert_invariants();
        }
        for value in (1..11).map(|i| i * 10) {
            assert_eq!(set.remove(&value), Some(value));
            set.assert_invariants();
        }
        assert_eq!(set.len(), 0);
        assert_eq!(set.root(), None);
    }

    #[test]
    fn test_epsilon_comparator() {
        let mut set = AvlSet::with_comparator(|a: &f64, b: &f64| {
            if (a - b).abs() < 1e-9 {
                Ordering::Equal
            } else if a < b {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
        assert!(set.insert(1.0));
        assert!(!set.insert(1.0 + 1e-12));
        assert_eq!(set.len(), 1);
        assert_eq!(set.search(&(1.0 + 1e-12)), Some(&1.0));
    }

    #[test]
    fn test_predicates_match_comparator() {
        let mut by_predicates =
            AvlSet::with_predicates(|a: &i32, b: &i32| a < b, |a: &i32, b: &i32| a == b);
        let mut by_comparator = AvlSet::with_comparator(|a: &i32, b: &i32| a.cmp(b));
        for value in &[4, -2, 9, 4, 0, 7, -2, 3] {
            assert_eq!(by_predicates.insert(*value), by_comparator.insert(*value));
        }
        assert_eq!(by_predicates.to_vec(), by_comparator.to_vec());
        assert_eq!(by_predicates.root(), by_comparator.root());
        assert_eq!(by_predicates.height(), by_comparator.height());
    }

    #[test]
    fn test_clear() {
        let mut set = scenario();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.root(), None);
        assert!(set.insert(1));
        set.assert_invariants();
    }

    #[test]
    fn test_into_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().len(), 3);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_debug() {
        let set: AvlSet<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2}");
    }
}
