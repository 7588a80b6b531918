//! Slot arena holding the nodes of a skip list.

use std::mem;
use std::ops::{Index, IndexMut};

/// A stable reference to an object allocated in an `Arena<T>`.
///
/// Handles are plain indices: copying one never duplicates the object it refers to, and dropping
/// one never releases it. Only `Arena::free` reclaims a slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object that hands out `Handle`s instead of references.
///
/// Freed slots are kept in an intrusive free list and reused by later allocations, so a handle
/// stays valid until the object behind it is freed. The underlying container is a `Vec` and the
/// arena uses no unsafe code.
///
/// # Examples
///
/// ```
/// use sorted_set::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            }
            Some(index) => {
                match mem::replace(&mut self.slots[index], Slot::Occupied(value)) {
                    Slot::Vacant(next) => self.head = next,
                    Slot::Occupied(_) => panic!("Free list points at an occupied slot."),
                }
                Handle { index }
            }
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to a vacant or out of bounds slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_set::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate("a");
    /// assert_eq!(arena.free(x), "a");
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.index >= self.slots.len() {
            panic!("Attempting to free an invalid slot.");
        }
        let next = self.head;
        match mem::replace(&mut self.slots[handle.index], Slot::Vacant(next)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle.index);
                value
            }
            Slot::Vacant(next) => {
                self.slots[handle.index] = Slot::Vacant(next);
                panic!("Attempting to free a vacant slot.");
            }
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
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
        self.get(handle).expect("Handle refers to a vacant slot.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Handle refers to a vacant slot.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Handle};

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: Arena<u32> = Arena::new();
        arena.free(Handle { index: 0 });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = Arena::new();
        let x = arena.allocate(0);
        arena.free(x);
        arena.free(x);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        assert_eq!(arena.allocate(0), Handle { index: 0 });
        assert_eq!(arena.allocate(0), Handle { index: 1 });
        assert_eq!(arena.allocate(0), Handle { index: 2 });
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = Arena::new();
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(x), 0);
        assert_eq!(arena.free(y), 1);
        assert!(arena.is_empty());

        // Most recently freed slot is handed out first.
        assert_eq!(arena.allocate(2), y);
        assert_eq!(arena.allocate(3), x);
        assert_eq!(arena.allocate(4), Handle { index: 2 });
    }

    #[test]
    fn test_get_vacant_slot() {
        let mut arena = Arena::new();
        let x = arena.allocate(0);
        arena.free(x);
        assert_eq!(arena.get(x), None);
        assert_eq!(arena.get(Handle { index: 7 }), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let x = arena.allocate(0);
        *arena.get_mut(x).unwrap() = 1;
        assert_eq!(arena.get(x), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let x = arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(x), None);
        assert_eq!(arena.allocate(5), Handle { index: 0 });
    }
}
