use alloc::boxed::Box;
use alloc::fmt;
use core::mem;
use core::ptr::{self, NonNull};

extern crate alloc;

/// A node in the recency list.
///
/// Wraps a value plus links to the neighbouring nodes. Not meant to be used
/// directly by users of [`RecencyList`]; the cache engine holds raw pointers
/// to nodes and hands them back to the list for reordering and removal.
pub struct Node<T> {
    /// The value stored in this node. Uses MaybeUninit so the sentinels
    /// carry no value.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous node (towards the LRU end).
    prev: *mut Node<T>,
    /// Pointer to the next node (towards the MRU end).
    next: *mut Node<T>,
}

impl<T> Node<T> {
    /// Creates a new node holding the given value.
    fn new(val: T) -> Self {
        Node {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a sentinel node without initializing the value.
    ///
    /// Sentinels mark the head (LRU) and tail (MRU) boundaries of the list.
    fn new_sentinel() -> Self {
        Node {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Borrows the value stored in this node.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be called on a
    /// sentinel node.
    pub unsafe fn get_value(&self) -> &T {
        // SAFETY: caller guarantees this is a non-sentinel node
        unsafe { self.val.assume_init_ref() }
    }

    /// Mutably borrows the value stored in this node.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be called on a
    /// sentinel node.
    pub unsafe fn get_value_mut(&mut self) -> &mut T {
        // SAFETY: caller guarantees this is a non-sentinel node
        unsafe { self.val.assume_init_mut() }
    }

    /// Consumes a detached node and returns the owned value.
    ///
    /// # Safety
    ///
    /// The value must be initialized and the node must already be unlinked
    /// from any list.
    pub unsafe fn into_value(self: Box<Self>) -> T {
        // SAFETY: caller guarantees the value is initialized; MaybeUninit
        // never drops its contents so there is no double free.
        unsafe { self.val.assume_init() }
    }
}

/// A doubly linked list ordered by recency of use.
///
/// The node after the head sentinel is the least-recently-used entry and the
/// node before the tail sentinel is the most-recently-used one. The list
/// itself carries no capacity: the cache engine appends first and then evicts
/// from the front until it is back within budget, so the list may transiently
/// hold one entry more than the engine's capacity.
///
/// All reorder/removal primitives are O(1). Sentinel nodes remove the
/// "node is first" / "node is last" special cases from the link juggling.
pub struct RecencyList<T> {
    /// Current number of live nodes between the sentinels.
    len: usize,
    /// Pointer to the head sentinel (LRU end).
    head: *mut Node<T>,
    /// Pointer to the tail sentinel (MRU end).
    tail: *mut Node<T>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list with linked sentinels.
    pub fn new() -> RecencyList<T> {
        let head = Box::into_raw(Box::new(Node::new_sentinel()));
        let tail = Box::into_raw(Box::new(Node::new_sentinel()));

        let list = RecencyList { len: 0, head, tail };

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*list.head).next = list.tail;
            (*list.tail).prev = list.head;
        }

        list
    }

    /// Returns the number of live nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a value at the MRU end and returns a pointer to its node.
    ///
    /// The returned pointer stays valid until the node is removed from the
    /// list or the list is dropped.
    pub fn push_back(&mut self, v: T) -> *mut Node<T> {
        // SAFETY: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(Node::new(v)))) };
        // SAFETY: node is a freshly allocated node not yet part of any list
        unsafe { self.attach_back(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Peeks the least-recently-used node without unlinking it.
    ///
    /// This is the eviction victim. Returns `None` when the list is empty.
    pub fn front(&self) -> Option<*mut Node<T>> {
        // SAFETY: head is a valid sentinel initialized in `new`
        let first = unsafe { (*self.head).next };
        if first == self.tail {
            None
        } else {
            Some(first)
        }
    }

    /// Unlinks and returns the least-recently-used node.
    pub fn pop_front(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: both sentinels are valid pointers initialized in `new`,
        // and the list is non-empty so at least one node sits between them
        let first = unsafe { (*self.head).next };
        if first == self.tail {
            return None;
        }
        unsafe {
            // SAFETY: first is a live node of this list
            self.detach(first);
        }
        self.len -= 1;
        // SAFETY: first was just detached and is no longer reachable
        unsafe { Some(Box::from_raw(first)) }
    }

    /// Unlinks an arbitrary node and returns it.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a live node of this list (not null,
    /// not freed, not a sentinel).
    pub unsafe fn remove(&mut self, node: *mut Node<T>) -> Option<Box<Node<T>>> {
        if self.is_empty() || node.is_null() || node == self.head || node == self.tail {
            return None;
        }

        unsafe {
            // SAFETY: caller guarantees node is live and part of this list
            self.detach(node);
            self.len -= 1;
            Some(Box::from_raw(node))
        }
    }

    /// Unlinks a node from the chain without deallocating it.
    ///
    /// # Safety
    ///
    /// `node` must be a valid live node of this list; its neighbours are then
    /// valid as well.
    unsafe fn detach(&mut self, node: *mut Node<T>) {
        // SAFETY: per the contract, node and both neighbours are valid
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// Links a node in front of the tail sentinel, making it the MRU entry.
    ///
    /// # Safety
    ///
    /// `node` must be a valid node that is not currently linked into any list.
    unsafe fn attach_back(&mut self, node: *mut Node<T>) {
        // SAFETY: tail is a valid sentinel and the caller guarantees node is
        // a valid unlinked node
        unsafe {
            (*node).next = self.tail;
            (*node).prev = (*self.tail).prev;
            (*(*node).prev).next = node;
            (*self.tail).prev = node;
        }
    }

    /// Promotes a node to the MRU position ("touch").
    ///
    /// A node that is already most-recently-used, or a sentinel/null pointer,
    /// is left untouched with the chain intact.
    ///
    /// # Safety
    ///
    /// `node` must be null or a valid pointer to a live node of this list.
    pub unsafe fn move_to_back(&mut self, node: *mut Node<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        unsafe {
            // Already the MRU entry: no observable order change.
            if (*self.tail).prev == node {
                return;
            }

            // SAFETY: node is a live node per the contract
            self.detach(node);
            self.attach_back(node);
        }
    }

    /// Replaces the value of the given node in place.
    ///
    /// Returns the old value when `capturing` is true, plus a flag signalling
    /// whether the update happened.
    ///
    /// # Safety
    ///
    /// `node` must be null or a valid pointer to a live node of this list.
    pub unsafe fn update(
        &mut self,
        node: *mut Node<T>,
        v: T,
        capturing: bool,
    ) -> (Option<T>, bool) {
        if node.is_null() {
            return (None, false);
        }
        // SAFETY: node is a live, initialized node per the contract
        let old_val =
            unsafe { mem::replace(&mut (*node).val, mem::MaybeUninit::new(v)).assume_init() };

        match capturing {
            true => (Some(old_val), true),
            false => (None, true),
        }
    }

    /// Removes all live nodes, leaving only the sentinels.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RecencyList<T> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: the sentinels were allocated in `new` and are only freed
        // here; live nodes were reclaimed by `clear` above.
        unsafe {
            if !self.head.is_null() {
                let _ = Box::from_raw(self.head);
                self.head = ptr::null_mut();
            }
            if !self.tail.is_null() {
                let _ = Box::from_raw(self.tail);
                self.tail = ptr::null_mut();
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("length", &self.len)
            .finish()
    }
}
