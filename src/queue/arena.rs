//! Index-based doubly linked list with stable slot handles.
//!
//! Slots are reused through a free list, so a handle stays valid until its
//! value is removed. Splicing before an existing slot and unlinking a slot
//! are O(1); only the position search done by callers is linear.

/// Handle to an occupied slot.
pub(crate) type SlotIndex = usize;

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    prev: Option<SlotIndex>,
    next: Option<SlotIndex>,
}

/// Ordered sequence backed by a slot arena.
#[derive(Debug, Clone)]
pub(crate) struct LinkedSlots<T> {
    slots: Vec<Slot<T>>,
    free: Vec<SlotIndex>,
    front: Option<SlotIndex>,
    back: Option<SlotIndex>,
    len: usize,
}

impl<T> LinkedSlots<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            front: None,
            back: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn get(&self, slot: SlotIndex) -> Option<&T> {
        self.slots.get(slot).and_then(|s| s.value.as_ref())
    }

    pub(crate) fn prev(&self, slot: SlotIndex) -> Option<SlotIndex> {
        self.occupied(slot).and_then(|s| s.prev)
    }

    pub(crate) fn next(&self, slot: SlotIndex) -> Option<SlotIndex> {
        self.occupied(slot).and_then(|s| s.next)
    }

    /// Appends `value` and returns its slot.
    pub(crate) fn push_back(&mut self, value: T) -> SlotIndex {
        let slot = self.alloc(value);
        self.slots[slot].prev = self.back;
        match self.back {
            Some(back) => self.slots[back].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.back = Some(slot);
        self.len += 1;
        slot
    }

    /// Links `value` immediately before the occupied slot `at`.
    ///
    /// # Panics
    /// If `at` is not occupied.
    pub(crate) fn insert_before(&mut self, at: SlotIndex, value: T) -> SlotIndex {
        assert!(self.occupied(at).is_some(), "insert_before on a vacant slot");

        let slot = self.alloc(value);
        let prev = self.slots[at].prev;
        self.slots[slot].prev = prev;
        self.slots[slot].next = Some(at);
        self.slots[at].prev = Some(slot);
        match prev {
            Some(prev) => self.slots[prev].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.len += 1;
        slot
    }

    /// Unlinks and returns the value at `slot`, if occupied.
    pub(crate) fn remove(&mut self, slot: SlotIndex) -> Option<T> {
        let entry = self.slots.get_mut(slot)?;
        let value = entry.value.take()?;
        let (prev, next) = (entry.prev.take(), entry.next.take());

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.front = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.back = prev,
        }

        self.free.push(slot);
        self.len -= 1;
        Some(value)
    }

    /// Unlinks the first value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let front = self.front?;
        self.remove(front)
    }

    /// Front-to-back iteration yielding `(slot, value)`.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.front,
        }
    }

    fn occupied(&self, slot: SlotIndex) -> Option<&Slot<T>> {
        self.slots.get(slot).filter(|s| s.value.is_some())
    }

    fn alloc(&mut self, value: T) -> SlotIndex {
        let fresh = Slot {
            value: Some(value),
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = fresh;
                slot
            }
            None => {
                self.slots.push(fresh);
                self.slots.len() - 1
            }
        }
    }
}

impl<T> Default for LinkedSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Iter<'a, T> {
    list: &'a LinkedSlots<T>,
    cursor: Option<SlotIndex>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let entry = &self.list.slots[slot];
        self.cursor = entry.next;
        entry.value.as_ref().map(|value| (slot, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &LinkedSlots<u32>) -> Vec<u32> {
        list.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn test_push_and_pop_order() {
        let mut list = LinkedSlots::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_insert_before_front_and_middle() {
        let mut list = LinkedSlots::new();
        let b = list.push_back(20);
        list.insert_before(b, 10);
        let d = list.push_back(40);
        list.insert_before(d, 30);
        assert_eq!(values(&list), vec![10, 20, 30, 40]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_remove_relinks_neighbors() {
        let mut list = LinkedSlots::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(list.next(a), Some(c));
        assert_eq!(list.prev(c), Some(a));
        assert_eq!(list.remove(b), None);

        assert_eq!(list.remove(c), Some(3));
        assert_eq!(list.next(a), None);
        list.push_back(4);
        assert_eq!(values(&list), vec![1, 4]);
    }

    #[test]
    fn test_vacant_slots_are_reused() {
        let mut list = LinkedSlots::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.remove(a);
        let reused = list.push_back(3);
        assert_eq!(reused, a);
        assert_eq!(values(&list), vec![2, 3]);
        assert_eq!(list.get(reused), Some(&3));
        assert_eq!(list.prev(reused).and_then(|s| list.get(s)), Some(&2));
    }

    #[test]
    #[should_panic(expected = "insert_before on a vacant slot")]
    fn test_insert_before_vacant_panics() {
        let mut list = LinkedSlots::new();
        let a = list.push_back(1);
        list.remove(a);
        list.insert_before(a, 2);
    }
}
