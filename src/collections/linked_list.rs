use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Add, Index, IndexMut};

cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
    } else {
        use std::boxed::Box;
    }
}

pub type LinkedListResult<T> = Result<T, LinkedListError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkedListError {
    #[error("LinkedList index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// an owning, singly-linked list with a sentinel head and a tail pointer.
///
/// the sentinel is heap allocated so that `tail` (which points at the
/// sentinel while the list is empty) stays valid when the list is moved.
pub struct LinkedList<T> {
    /// a sentinel node that always exists, even in empty lists
    sentinel: *mut ListNode<T>,
    /// the last data node, or the sentinel if the list is empty
    tail: *mut ListNode<T>,
    /// the number of non-sentinel elements in the list
    len: usize,
    _owns: PhantomData<Box<ListNode<T>>>,
}

impl<T> LinkedList<T> {
    /// create a new, empty LinkedList
    pub fn new() -> Self {
        let sentinel = Box::into_raw(Box::new(ListNode::sentinel()));
        Self {
            sentinel,
            tail: sentinel,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// get the length of the list, not including the sentinel node
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the length of the list is 0
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// borrow the first element, or None if the list is empty
    pub fn first(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: the list is not empty so the sentinel has a data successor
            unsafe { Some((*(*self.sentinel).next()).data()) }
        }
    }

    /// borrow the last element, or None if the list is empty
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: a non-empty list's tail is always a data node
            unsafe { Some((*self.tail).data()) }
        }
    }

    pub fn get(&self, index: usize) -> LinkedListResult<&T> {
        self.check_index(index)?;
        let node = self.walk(index + 1);
        // SAFETY: index < len so the walk ended on a data node
        unsafe { Ok((*node).data()) }
    }

    pub fn get_mut(&mut self, index: usize) -> LinkedListResult<&mut T> {
        self.check_index(index)?;
        let node = self.walk(index + 1);
        // SAFETY: index < len so the walk ended on a data node, and we hold
        // `&mut self` for the lifetime of the returned borrow
        unsafe { Ok((*node).data_mut()) }
    }

    /// overwrite the element at `index`
    pub fn set(&mut self, index: usize, value: T) -> LinkedListResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// push a value to the back of the list in O(1)
    pub fn append(&mut self, value: T) {
        let node = Box::into_raw(Box::new(ListNode::new(value)));
        // SAFETY: `node` was just allocated and is not part of any list
        unsafe { self.link_back(node) };
    }

    /// insert `value` so that it ends up at position `index`.
    ///
    /// an `index` at or past the end of the list is not an error, the value
    /// is appended instead.
    pub fn insert(&mut self, index: usize, value: T) {
        if index >= self.len {
            self.append(value);
            return;
        }

        let prev = self.walk(index);
        let node = Box::into_raw(Box::new(ListNode::new(value)));
        // SAFETY: index < len so `prev` has a successor and is not the tail
        // Before: (prev) -> (prev.next)
        // After: (prev) -> (node) -> (prev.next)
        unsafe {
            (*node).set_next((*prev).next());
            (*prev).set_next(node);
        }
        self.len += 1;
    }

    /// unlink and return the element at `index`. index 0 removes the first
    /// element; its predecessor is the sentinel.
    pub fn delete_at(&mut self, index: usize) -> LinkedListResult<T> {
        self.check_index(index)?;

        let prev = self.walk(index);
        // SAFETY: index < len so `prev.next` is a data node owned by this list,
        // after unlinking we are its only owner
        unsafe {
            let target = (*prev).next();
            (*prev).set_next((*target).next());
            if target == self.tail {
                self.tail = prev;
            }
            self.len -= 1;
            Ok(Box::from_raw(target).into_data())
        }
    }

    /// remove the first element, if any
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.delete_at(0).ok()
        }
    }

    /// drop every element, leaving only the sentinel
    pub fn clear(&mut self) {
        drop(self.detach_all());
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == value)
    }

    /// a new list holding clones of `self`'s elements followed by `other`'s.
    /// neither input is modified.
    pub fn concatenate(&self, other: &LinkedList<T>) -> LinkedList<T>
    where
        T: Clone,
    {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// detach positions `[index, len)` into a new list, leaving `[0, index)`
    /// in `self`. no elements are copied; the sub-chain changes owner.
    ///
    /// `index == 0` moves every element and `index == len` returns an empty
    /// list. `index > len` is an error.
    pub fn split(&mut self, index: usize) -> LinkedListResult<LinkedList<T>> {
        if index > self.len {
            return Err(LinkedListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.split_off(index))
    }

    /// return an immutable iterator for this list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            // SAFETY: the sentinel is always valid
            curr: unsafe { (*self.sentinel).next() },
            remaining: self.len,
            _ll: PhantomData,
        }
    }

    /// return a mutable iterator for this list
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            // SAFETY: the sentinel is always valid
            curr: unsafe { (*self.sentinel).next() },
            remaining: self.len,
            _ll: PhantomData,
        }
    }

    fn check_index(&self, index: usize) -> LinkedListResult<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(LinkedListError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// follow `steps` next pointers starting at the sentinel. zero steps
    /// yields the sentinel itself, `n` steps the node at position `n - 1`.
    fn walk(&self, steps: usize) -> *mut ListNode<T> {
        assert!(steps <= self.len);
        let mut curr = self.sentinel;
        for _ in 0..steps {
            // SAFETY: steps <= len so every node along the way has a successor
            curr = unsafe { (*curr).next() };
        }
        curr
    }

    /// caller guarantees `index <= len`
    fn split_off(&mut self, index: usize) -> LinkedList<T> {
        let mut rest = LinkedList::new();
        if index == self.len {
            return rest;
        }

        let prev = self.walk(index);
        // SAFETY: index < len so `prev.next` is the first node of a non-empty
        // sub-chain ending at `self.tail`. `rest` is empty, so its sentinel is
        // its tail and adopting the chain keeps both lists' invariants.
        unsafe {
            (*rest.sentinel).set_next((*prev).next());
            (*prev).set_next(core::ptr::null_mut());
        }
        rest.tail = self.tail;
        rest.len = self.len - index;
        self.tail = prev;
        self.len = index;
        rest
    }

    /// link a lone node after the tail
    ///
    /// # Safety
    /// `node` must be a valid, heap allocated data node that no list owns
    unsafe fn link_back(&mut self, node: *mut ListNode<T>) {
        (*node).set_next(core::ptr::null_mut());
        (*self.tail).set_next(node);
        self.tail = node;
        self.len += 1;
    }

    /// take every data node out of the list, leaving it empty
    fn detach_all(&mut self) -> Chain<T> {
        let chain = if self.is_empty() {
            Chain::empty()
        } else {
            Chain {
                // SAFETY: the sentinel is always valid
                head: unsafe { (*self.sentinel).next() },
                tail: self.tail,
                len: self.len,
            }
        };

        // SAFETY: the sentinel is always valid
        unsafe { (*self.sentinel).set_next(core::ptr::null_mut()) };
        self.tail = self.sentinel;
        self.len = 0;
        chain
    }

    /// link a whole detached chain after the tail in O(1)
    fn attach(&mut self, mut chain: Chain<T>) {
        if chain.len == 0 {
            return;
        }

        // SAFETY: the chain's nodes are owned by nobody but `chain`, and its
        // tail's next is null
        unsafe { (*self.tail).set_next(chain.head) };
        self.tail = chain.tail;
        self.len += chain.len;

        chain.head = core::ptr::null_mut();
        chain.tail = core::ptr::null_mut();
        chain.len = 0;
    }
}

impl<T: PartialOrd> LinkedList<T> {
    /// true if every element is `<=` its successor
    pub fn is_sorted(&self) -> bool {
        self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b)
    }
}

impl<T: Ord> LinkedList<T> {
    /// merge `other` into `self`. both lists must already be sorted
    /// ascending; this is not checked.
    ///
    /// nodes are relinked, not copied. on equal elements the one from `self`
    /// comes first.
    pub fn merge(&mut self, mut other: LinkedList<T>) {
        let mut left = self.detach_all();
        let mut right = other.detach_all();

        loop {
            let take_right = match (left.front(), right.front()) {
                (Some(l), Some(r)) => r < l,
                _ => break,
            };
            let node = if take_right {
                right.pop_node()
            } else {
                left.pop_node()
            };
            // SAFETY: `pop_node` hands out exclusive ownership of a data node
            unsafe { self.link_back(node) };
        }

        self.attach(left);
        self.attach(right);
    }

    /// sort the list ascending in place with a stable, top-down merge sort
    pub fn merge_sort(&mut self) {
        if self.len <= 1 {
            return;
        }

        let mut back = self.split_off(self.len / 2);
        back.merge_sort();
        self.merge_sort();
        self.merge(back);
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        drop(self.detach_all());
        // SAFETY: the sentinel was allocated by `new` and is freed only here
        unsafe { drop(Box::from_raw(self.sentinel)) };
    }
}

// SAFETY: the list exclusively owns its nodes, there is no shared state
unsafe impl<T: Send> Send for LinkedList<T> {}
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ll = LinkedList::new();
        ll.extend(iter);
        ll
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for t in iter {
            self.append(t);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(t) => t,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(t) => t,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, T: Clone> Add<&'a LinkedList<T>> for &'a LinkedList<T> {
    type Output = LinkedList<T>;

    fn add(self, rhs: &'a LinkedList<T>) -> LinkedList<T> {
        self.concatenate(rhs)
    }
}

/// concatenation of owned lists relinks `rhs`'s chain onto `self` in O(1)
impl<T> Add for LinkedList<T> {
    type Output = LinkedList<T>;

    fn add(mut self, mut rhs: LinkedList<T>) -> LinkedList<T> {
        self.attach(rhs.detach_all());
        self
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{t}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

/// a node in the list. the sentinel variant never carries data
struct ListNode<T> {
    internal: InternalListNode<T>,
}

/// the private internal layout of a node, either a sentinel or user-provided data
enum InternalListNode<T> {
    Sentinel { next: *mut ListNode<T> },
    Data { data: T, next: *mut ListNode<T> },
}

impl<T> ListNode<T> {
    const fn sentinel() -> Self {
        Self {
            internal: InternalListNode::Sentinel {
                next: core::ptr::null_mut(),
            },
        }
    }

    const fn new(data: T) -> Self {
        Self {
            internal: InternalListNode::Data {
                data,
                next: core::ptr::null_mut(),
            },
        }
    }

    fn data(&self) -> &T {
        match &self.internal {
            InternalListNode::Sentinel { .. } => {
                unreachable!("LinkedList implementation will never vend Sentinels")
            }
            InternalListNode::Data { data, .. } => data,
        }
    }

    fn data_mut(&mut self) -> &mut T {
        match &mut self.internal {
            InternalListNode::Sentinel { .. } => {
                unreachable!("LinkedList implementation will never vend Sentinels")
            }
            InternalListNode::Data { data, .. } => data,
        }
    }

    fn into_data(self) -> T {
        match self.internal {
            InternalListNode::Sentinel { .. } => {
                unreachable!("LinkedList implementation will never vend Sentinels")
            }
            InternalListNode::Data { data, .. } => data,
        }
    }

    fn next(&self) -> *mut ListNode<T> {
        match &self.internal {
            InternalListNode::Sentinel { next } | InternalListNode::Data { next, .. } => *next,
        }
    }

    fn set_next(&mut self, new_next: *mut ListNode<T>) {
        match &mut self.internal {
            InternalListNode::Sentinel { next } | InternalListNode::Data { next, .. } => {
                *next = new_next
            }
        }
    }
}

/// a run of data nodes detached from any list, used while merging. frees
/// whatever it still holds when dropped.
struct Chain<T> {
    head: *mut ListNode<T>,
    tail: *mut ListNode<T>,
    len: usize,
}

impl<T> Chain<T> {
    fn empty() -> Self {
        Self {
            head: core::ptr::null_mut(),
            tail: core::ptr::null_mut(),
            len: 0,
        }
    }

    fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            // SAFETY: a non-empty chain's head is a valid data node
            unsafe { Some((*self.head).data()) }
        }
    }

    /// caller guarantees the chain is not empty
    fn pop_node(&mut self) -> *mut ListNode<T> {
        assert!(self.len > 0);
        let node = self.head;
        // SAFETY: non-empty, so `head` is a valid data node
        self.head = unsafe { (*node).next() };
        self.len -= 1;
        if self.len == 0 {
            self.tail = core::ptr::null_mut();
        }
        node
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        while self.len > 0 {
            let node = self.pop_node();
            // SAFETY: every node in the chain was allocated with `Box` and is
            // owned only by the chain
            unsafe { drop(Box::from_raw(node)) };
        }
    }
}

pub struct Iter<'a, T> {
    curr: *mut ListNode<T>,
    remaining: usize,
    _ll: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` data nodes are still ahead of the cursor
        unsafe {
            let to_return = &*self.curr;
            self.curr = to_return.next();
            self.remaining -= 1;
            Some(to_return.data())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    curr: *mut ListNode<T>,
    remaining: usize,
    _ll: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` data nodes are still ahead of the cursor and each
        // one is handed out at most once
        unsafe {
            let to_return = &mut *self.curr;
            self.curr = to_return.next();
            self.remaining -= 1;
            Some(to_return.data_mut())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod test {
    use super::*;

    const UNSORTED: [u32; 8] = [5, 3, 6, 2, 1, 7, 4, 8];

    #[test]
    fn linked_lists_are_sendable() {
        fn send<S: Send>(_: S) {}
        send(LinkedList::<u32>::new());
    }

    #[test]
    fn new_list_is_empty() {
        let ll = LinkedList::<u32>::new();
        assert_eq!(ll.len(), 0);
        assert!(ll.is_empty());
        assert!(ll.first().is_none());
        assert!(ll.last().is_none());
    }

    #[test]
    fn from_sequence_appends_in_order() {
        let ll = LinkedList::from([73, 42, 114, 901]);
        assert_eq!(ll.len(), 4);
        assert_eq!(ll.first(), Some(&73));
        assert_eq!(ll.last(), Some(&901));
        assert_eq!(ll.iter().copied().collect::<Vec<_>>(), vec![73, 42, 114, 901]);
    }

    #[test]
    fn can_append() {
        let mut ll = LinkedList::new();
        ll.append(73);
        assert_eq!(ll.len(), 1);
        ll.append(42);
        assert_eq!(ll.len(), 2);
        assert_eq!(ll.last(), Some(&42));
    }

    #[test]
    fn get_returns_element_at_index() {
        let ll = LinkedList::from([10, 20, 30]);
        assert_eq!(ll.get(0), Ok(&10));
        assert_eq!(ll.get(2), Ok(&30));
        assert_eq!(ll[1], 20);
    }

    #[test]
    fn get_out_of_range_is_an_error() {
        let ll = LinkedList::from([10, 20, 30]);
        assert_eq!(
            ll.get(3),
            Err(LinkedListError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(LinkedList::<u32>::new().get(0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn indexing_out_of_range_panics() {
        let ll = LinkedList::from([10]);
        let _ = ll[1];
    }

    #[test]
    fn set_replaces_only_that_element() {
        let mut ll = LinkedList::from([10, 20, 30]);
        ll.set(1, 99).expect("index 1 is in range");
        assert_eq!(ll, LinkedList::from([10, 99, 30]));
        assert!(ll.set(3, 0).is_err());
        ll[2] = 7;
        assert_eq!(ll, LinkedList::from([10, 99, 7]));
    }

    #[test]
    fn contains_only_present_values() {
        let ll = LinkedList::from([1, 2, 3]);
        assert!(ll.contains(&2));
        assert!(!ll.contains(&4));
        assert!(!LinkedList::<u32>::new().contains(&0));
    }

    #[test]
    fn insert_splices_at_index() {
        let mut ll = LinkedList::from([1, 3]);
        ll.insert(1, 2);
        ll.insert(0, 0);
        assert_eq!(ll, LinkedList::from([0, 1, 2, 3]));
        assert_eq!(ll.last(), Some(&3));
    }

    #[test]
    fn insert_past_the_end_appends() {
        let mut ll = LinkedList::from([1, 2]);
        ll.insert(1000, 333);
        assert_eq!(ll, LinkedList::from([1, 2, 333]));
        assert_eq!(ll.last(), Some(&333));

        let mut empty = LinkedList::new();
        empty.insert(0, 5);
        assert_eq!(empty.last(), Some(&5));
    }

    #[test]
    fn delete_at_zero_removes_first() {
        let mut ll = LinkedList::from([1, 2, 3]);
        assert_eq!(ll.delete_at(0), Ok(1));
        assert_eq!(ll, LinkedList::from([2, 3]));
    }

    #[test]
    fn delete_at_middle() {
        let mut ll: LinkedList<u32> = (0..100).collect();
        assert_eq!(ll.delete_at(1), Ok(1));
        assert!(!ll.contains(&1));
        assert_eq!(ll.len(), 99);
    }

    #[test]
    fn delete_at_last_repairs_tail() {
        let mut ll = LinkedList::from([1, 2, 3]);
        assert_eq!(ll.delete_at(2), Ok(3));
        assert_eq!(ll.last(), Some(&2));
        ll.append(4);
        assert_eq!(ll, LinkedList::from([1, 2, 4]));

        let mut single = LinkedList::from([9]);
        assert_eq!(single.delete_at(0), Ok(9));
        assert!(single.last().is_none());
        single.append(10);
        assert_eq!(single, LinkedList::from([10]));
    }

    #[test]
    fn delete_at_out_of_range_is_an_error() {
        let mut ll = LinkedList::from([1]);
        assert_eq!(
            ll.delete_at(1),
            Err(LinkedListError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(ll.len(), 1);
    }

    #[test]
    fn pop_front_drains_in_order() {
        let mut ll = LinkedList::from([1, 2]);
        assert_eq!(ll.pop_front(), Some(1));
        assert_eq!(ll.pop_front(), Some(2));
        assert_eq!(ll.pop_front(), None);
        ll.append(3);
        assert_eq!(ll.first(), Some(&3));
    }

    #[test]
    fn clear_leaves_a_usable_list() {
        let mut ll = LinkedList::from([1, 2, 3]);
        ll.clear();
        assert!(ll.is_empty());
        ll.append(4);
        assert_eq!(ll, LinkedList::from([4]));
    }

    #[test]
    fn equality_compares_length_and_elements() {
        assert_eq!(LinkedList::<u32>::new(), LinkedList::new());
        assert_eq!(LinkedList::from([1, 2]), LinkedList::from([1, 2]));
        assert_ne!(LinkedList::from([1, 2]), LinkedList::from([1, 2, 3]));
        assert_ne!(LinkedList::from([1, 2]), LinkedList::from([2, 1]));
    }

    #[test]
    fn copies_are_independent() {
        let original: LinkedList<u32> = (0..100).collect();
        let mut copy: LinkedList<u32> = original.iter().copied().collect();
        assert_eq!(original, copy);
        copy.delete_at(2).expect("index 2 is in range");
        assert_ne!(original, copy);
        assert_eq!(original.len(), 100);

        let mut cloned = original.clone();
        cloned.set(0, 1000).expect("index 0 is in range");
        assert_eq!(original[0], 0);
    }

    #[test]
    fn concatenate_keeps_inputs() {
        let a = LinkedList::from([1, 2]);
        let b = LinkedList::from([3]);
        let c = a.concatenate(&b);
        assert_eq!(c, LinkedList::from([1, 2, 3]));
        assert_eq!(&LinkedList::from([100]) + &a, LinkedList::from([100, 1, 2]));
        assert_eq!(a, LinkedList::from([1, 2]));
        assert_eq!(b, LinkedList::from([3]));
    }

    #[test]
    fn owned_add_relinks_chains() {
        let joined = LinkedList::from([1, 2]) + LinkedList::from([3, 4]);
        assert_eq!(joined, LinkedList::from([1, 2, 3, 4]));
        assert_eq!(joined.last(), Some(&4));

        let left_empty = LinkedList::new() + LinkedList::from([5]);
        assert_eq!(left_empty.last(), Some(&5));
        let right_empty = LinkedList::from([6]) + LinkedList::new();
        assert_eq!(right_empty.last(), Some(&6));
    }

    #[test]
    fn display_renders_brackets_without_spaces() {
        assert_eq!(LinkedList::<u32>::new().to_string(), "[]");
        assert_eq!(LinkedList::from([7]).to_string(), "[7]");
        assert_eq!(LinkedList::from([1, 2, 3]).to_string(), "[1,2,3]");
    }

    #[test]
    fn iter_is_restartable_and_exact() {
        let ll = LinkedList::from([42, 73]);
        let mut iter = ll.iter();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&42));
        assert_eq!(iter.next(), Some(&73));
        for _i in 0..10 {
            assert!(iter.next().is_none());
        }
        assert_eq!(ll.iter().count(), 2);
    }

    #[test]
    fn iter_mut_can_mutate_elements() {
        let mut ll = LinkedList::from([1, 2, 3]);
        for t in ll.iter_mut() {
            *t *= 10;
        }
        assert_eq!(ll, LinkedList::from([10, 20, 30]));
    }

    #[test]
    fn into_iter_yields_owned_values() {
        let ll = LinkedList::from([1, 2, 3]);
        assert_eq!(ll.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn split_in_the_middle() {
        let mut front = LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]);
        let back = front.split(4).expect("4 is within the list");
        assert_eq!(front, LinkedList::from([1, 2, 3, 4]));
        assert_eq!(back, LinkedList::from([5, 6, 7, 8]));
        assert_eq!(front.last(), Some(&4));
        assert_eq!(back.last(), Some(&8));
    }

    #[test]
    fn split_at_bounds() {
        let mut ll = LinkedList::from([1, 2, 3]);
        let none = ll.split(3).expect("len is a valid split point");
        assert!(none.is_empty());
        assert_eq!(ll.len(), 3);

        let all = ll.split(0).expect("0 is a valid split point");
        assert!(ll.is_empty());
        assert_eq!(all, LinkedList::from([1, 2, 3]));
        ll.append(4);
        assert_eq!(ll, LinkedList::from([4]));

        assert!(ll.split(2).is_err());
    }

    #[test]
    fn split_then_merge_round_trips() {
        let mut front = LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]);
        let back = front.split(4).expect("4 is within the list");
        front.merge(back);
        assert_eq!(front, LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(front.last(), Some(&8));
    }

    #[test]
    fn merge_interleaves_sorted_lists() {
        let mut a = LinkedList::from([1, 4, 9]);
        a.merge(LinkedList::from([2, 3, 10, 11]));
        assert_eq!(a, LinkedList::from([1, 2, 3, 4, 9, 10, 11]));
        assert_eq!(a.last(), Some(&11));

        let mut empty = LinkedList::new();
        empty.merge(LinkedList::from([1, 2]));
        assert_eq!(empty, LinkedList::from([1, 2]));
        empty.merge(LinkedList::new());
        assert_eq!(empty.len(), 2);
    }

    #[test]
    fn merge_prefers_self_on_ties() {
        let mut a = LinkedList::from([Keyed(1, 'a'), Keyed(2, 'a')]);
        a.merge(LinkedList::from([Keyed(1, 'b'), Keyed(2, 'b')]));
        let tags: Vec<char> = a.iter().map(|k| k.1).collect();
        assert_eq!(tags, vec!['a', 'b', 'a', 'b']);
    }

    #[test]
    fn is_sorted_detects_order() {
        assert!(LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]).is_sorted());
        assert!(!LinkedList::from(UNSORTED).is_sorted());
        assert!(LinkedList::<u32>::new().is_sorted());
        assert!(LinkedList::from([1]).is_sorted());
        assert!(LinkedList::from([2, 2]).is_sorted());
    }

    #[test]
    fn merge_sort_sorts() {
        let mut ll = LinkedList::from(UNSORTED);
        ll.merge_sort();
        assert_eq!(ll, LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(ll.last(), Some(&8));
        ll.append(9);
        assert_eq!(ll.len(), 9);
    }

    #[test]
    fn merge_sort_on_trivial_lists() {
        let mut empty = LinkedList::<u32>::new();
        empty.merge_sort();
        assert!(empty.is_empty());

        let mut single = LinkedList::from([1]);
        single.merge_sort();
        assert_eq!(single, LinkedList::from([1]));
    }

    #[test]
    fn merge_sort_shuffled_thousand() {
        use rand::seq::SliceRandom;

        let mut values: Vec<u32> = (0..1000).collect();
        values.shuffle(&mut rand::thread_rng());
        let mut ll: LinkedList<u32> = values.into_iter().collect();
        ll.merge_sort();
        assert!(ll.is_sorted());
        assert_eq!(ll.len(), 1000);
        assert!(ll.iter().copied().eq(0..1000));
    }

    /// ordered by the key only, the tag records where an element came from
    #[derive(Debug, Clone, Copy)]
    struct Keyed(u8, char);

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Keyed {}

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> core::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_derive::Arbitrary;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};
    use rand::Rng;

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn linked_list_state_machine_test(
            sequential
            1..200
            =>
            LinkedList<u32>
        );
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        Append(u32),
        Insert(usize, u32),
        DeleteAt(usize),
        Set(usize, u32),
        SplitAndConcatenate(usize),
        PopFront,
        MergeSort,
    }

    pub struct LinkedListStateMachine;

    impl ReferenceStateMachine for LinkedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            // indices reach a little past the end to cover the out-of-range paths
            let bound = state.len() + 3;
            prop_oneof![
                4 => any::<u32>().prop_map(Transition::Append),
                2 => (0..bound, any::<u32>()).prop_map(|(i, v)| Transition::Insert(i, v)),
                2 => (0..bound).prop_map(Transition::DeleteAt),
                1 => (0..bound, any::<u32>()).prop_map(|(i, v)| Transition::Set(i, v)),
                1 => (0..bound).prop_map(Transition::SplitAndConcatenate),
                1 => Just(Transition::PopFront),
                1 => Just(Transition::MergeSort),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::Append(value) => state.push(*value),
                Transition::Insert(index, value) => {
                    if *index < state.len() {
                        state.insert(*index, *value);
                    } else {
                        state.push(*value);
                    }
                }
                Transition::DeleteAt(index) => {
                    if *index < state.len() {
                        state.remove(*index);
                    }
                }
                Transition::Set(index, value) => {
                    if let Some(slot) = state.get_mut(*index) {
                        *slot = *value;
                    }
                }
                Transition::SplitAndConcatenate(_) => {}
                Transition::PopFront => {
                    if !state.is_empty() {
                        state.remove(0);
                    }
                }
                Transition::MergeSort => state.sort(),
            }
            state
        }
    }

    impl StateMachineTest for LinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = LinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::Append(value) => state.append(value),
                Transition::Insert(index, value) => state.insert(index, value),
                Transition::DeleteAt(index) => {
                    let in_range = index < state.len();
                    assert_eq!(state.delete_at(index).is_ok(), in_range);
                }
                Transition::Set(index, value) => {
                    let in_range = index < state.len();
                    assert_eq!(state.set(index, value).is_ok(), in_range);
                }
                Transition::SplitAndConcatenate(index) => match state.split(index) {
                    Ok(back) => {
                        assert_eq!(state.len(), index);
                        state = state + back;
                    }
                    Err(_) => assert!(index > state.len()),
                },
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::MergeSort => state.merge_sort(),
            }
            assert_eq!(state.len(), ref_state.len());
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.last(), ref_state.last());
            assert_eq!(state.first(), ref_state.first());
            for (ll_value, ref_value) in state.iter().zip(ref_state.iter()) {
                assert_eq!(ll_value, ref_value);
            }
        }
    }

    #[derive(Arbitrary, Debug)]
    enum Operation {
        Append(u32),
        Contains(u32),
        DeleteRandom,
        InsertRandom(u32),
        SplitAndMerge,
        Sort,
    }

    fn random_index(len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..len))
    }

    proptest! {
        #[test]
        fn longform(ops in vec(any::<Operation>(), 512)) {
            let mut reference: Vec<u32> = Vec::new();
            let mut ll = LinkedList::new();

            for op in ops.iter() {
                match op {
                    Operation::Append(i) => {
                        reference.push(*i);
                        ll.append(*i);
                    }
                    Operation::Contains(i) => {
                        prop_assert_eq!(ll.contains(i), reference.contains(i));
                    }
                    Operation::DeleteRandom => {
                        if let Some(index) = random_index(reference.len()) {
                            prop_assert_eq!(ll.delete_at(index), Ok(reference.remove(index)));
                        }
                    }
                    Operation::InsertRandom(i) => {
                        let index = random_index(reference.len()).unwrap_or(0);
                        if index < reference.len() {
                            reference.insert(index, *i);
                        } else {
                            reference.push(*i);
                        }
                        ll.insert(index, *i);
                    }
                    Operation::SplitAndMerge => {
                        reference.sort();
                        ll.merge_sort();
                        let index = random_index(reference.len() + 1).unwrap_or(0);
                        let back = ll.split(index).expect("index is at most len");
                        prop_assert_eq!(ll.len(), index);
                        prop_assert_eq!(back.len(), reference.len() - index);
                        ll.merge(back);
                    }
                    Operation::Sort => {
                        reference.sort();
                        ll.merge_sort();
                    }
                }
                prop_assert_eq!(ll.len(), reference.len());
                prop_assert_eq!(ll.last(), reference.last());
            }

            prop_assert!(ll.iter().eq(reference.iter()));
        }

        #[test]
        fn merge_sort_is_a_sorted_permutation(values in vec(any::<i32>(), 0..300)) {
            let mut ll: LinkedList<i32> = values.iter().copied().collect();
            ll.merge_sort();

            let mut expected = values.clone();
            expected.sort();
            prop_assert!(ll.is_sorted());
            prop_assert!(ll.iter().eq(expected.iter()));
        }

        #[test]
        fn merge_sort_is_stable(keys in vec(0u8..8, 0..200)) {
            let mut ll: LinkedList<Tagged> = keys
                .iter()
                .enumerate()
                .map(|(seq, key)| Tagged { key: *key, seq })
                .collect();
            ll.merge_sort();

            let mut expected: Vec<(u8, usize)> =
                keys.iter().enumerate().map(|(seq, key)| (*key, seq)).collect();
            expected.sort_by_key(|(key, _)| *key);
            prop_assert!(ll.iter().map(|t| (t.key, t.seq)).eq(expected.into_iter()));
        }

        #[test]
        fn concatenation_is_positional(a in vec(any::<u32>(), 0..50), b in vec(any::<u32>(), 0..50)) {
            let la: LinkedList<u32> = a.iter().copied().collect();
            let lb: LinkedList<u32> = b.iter().copied().collect();
            let joined = &la + &lb;

            prop_assert_eq!(joined.len(), la.len() + lb.len());
            for i in 0..joined.len() {
                let expected = if i < a.len() { a[i] } else { b[i - a.len()] };
                prop_assert_eq!(joined[i], expected);
            }
        }

        #[test]
        fn split_merge_round_trips_sorted_input(mut values in vec(any::<u16>(), 0..100), at in any::<prop::sample::Index>()) {
            values.sort();
            let mut ll: LinkedList<u16> = values.iter().copied().collect();
            let index = at.index(values.len() + 1);
            let back = ll.split(index).expect("index is at most len");
            ll.merge(back);
            prop_assert!(ll.iter().eq(values.iter()));
        }
    }

    /// compares on `key` alone; `seq` records the original position
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        key: u8,
        seq: usize,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> core::cmp::Ordering {
            self.key.cmp(&other.key)
        }
    }
}
