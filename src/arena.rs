//! Index-addressed storage for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};

/// A stable reference to a value stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A single-typed store that hands out `Handle`s instead of pointers.
///
/// Nodes that refer to each other through handles never form ownership cycles: the arena owns
/// every value, and dropping the arena drops them all without walking any links. Freed slots
/// are threaded onto a free list and reused by later insertions, so a handle stays valid until
/// the value it names is removed.
///
/// # Examples
///
/// ```
/// use avl_set::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.insert(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.remove(&x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` values before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores a value in the arena and returns the handle that names it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn insert(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.free_head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            },
            Some(index) => {
                match mem::replace(&mut self.slots[index], Slot::Occupied(value)) {
                    Slot::Vacant(next) => self.free_head = next,
                    Slot::Occupied(_) => panic!("Expected the free list to name a vacant slot."),
                }
                Handle { index }
            },
        }
    }

    /// Removes a value from the arena and returns it. The slot is recycled by a later insert.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not name an occupied slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(0);
    /// assert_eq!(arena.remove(&x), 0);
    /// ```
    pub fn remove(&mut self, handle: &Handle) -> T {
        if handle.index >= self.slots.len() {
            panic!("Error: attempting to remove an out of bounds handle.");
        }
        let old_slot = mem::replace(
            &mut self.slots[handle.index],
            Slot::Vacant(self.free_head),
        );
        match old_slot {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free_head = Some(handle.index);
                value
            },
            Slot::Vacant(next) => {
                self.slots[handle.index] = Slot::Vacant(next);
                panic!("Error: attempting to remove a vacant handle.");
            },
        }
    }

    /// Returns an immutable reference to the value named by `handle`, or `None` if the handle
    /// is out of bounds or vacant.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value named by `handle`, or `None` if the handle is
    /// out of bounds or vacant.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of values stored in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena stores no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every stored value. All previously issued handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Expected handle to name an occupied slot.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Expected handle to name an occupied slot.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Handle};

    #[test]
    #[should_panic]
    fn test_remove_out_of_bounds() {
        let mut arena: Arena<u32> = Arena::new();
        arena.remove(&Handle { index: 0 });
    }

    #[test]
    #[should_panic]
    fn test_remove_vacant() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        arena.remove(&x);
        arena.remove(&x);
    }

    #[test]
    fn test_insert() {
        let mut arena = Arena::new();
        assert_eq!(arena.insert(0), Handle { index: 0 });
        assert_eq!(arena.insert(0), Handle { index: 1 });
        assert_eq!(arena.insert(0), Handle { index: 2 });
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_remove_recycles_slot() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        let y = arena.insert(1);
        assert_eq!(arena.remove(&x), 0);
        assert_eq!(arena.insert(2), x);
        assert_eq!(arena[x], 2);
        assert_eq!(arena[y], 1);
    }

    #[test]
    fn test_free_list_order() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        let y = arena.insert(1);
        arena.remove(&x);
        arena.remove(&y);
        assert_eq!(arena.insert(2), y);
        assert_eq!(arena.insert(3), x);
        assert_eq!(arena.insert(4), Handle { index: 2 });
    }

    #[test]
    fn test_get_vacant() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        arena.remove(&x);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        if let Some(value) = arena.get_mut(&x) {
            *value = 1;
        }
        assert_eq!(arena.get(&x), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let x = arena.insert(0);
        arena.insert(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.insert(2), Handle { index: 0 });
    }
}
