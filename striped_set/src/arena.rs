//! The node arena and bucket table.
//!
//! `Inner` is the data the controller swaps out wholesale on resize: the
//! slot array and the backing arena of link nodes. It carries no locks of
//! its own — all synchronization lives one level up, in `StripedSet`, which
//! hands out interior mutability here only while holding the stripe lock
//! (or, during resize, every stripe lock) that covers the index being
//! touched.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::primes::PRIME_SIZES;
use crate::STRIPE_COUNT;

/// A single arena slot: either a stripe freelist head (index `< STRIPE_COUNT`)
/// or a link node holding one element (index `>= STRIPE_COUNT`).
///
/// `hash == 0` marks the node as unused; `data` is uninitialized in that
/// state. Freelist heads never set `hash`, so they are never mistaken for a
/// live element during a scan.
pub(crate) struct Node<E> {
    pub(crate) hash: u32,
    pub(crate) next: u32,
    pub(crate) data: MaybeUninit<E>,
}

impl<E> Node<E> {
    fn empty() -> Self {
        Node {
            hash: 0,
            next: 0,
            data: MaybeUninit::uninit(),
        }
    }
}

/// The slot array and arena for one generation of the set.
///
/// Replaced wholesale by the resize barrier; never mutated in place except
/// through the interior mutability of its elements.
pub(crate) struct Inner<E> {
    /// Index into [`PRIME_SIZES`] that `slots.len()` corresponds to.
    pub(crate) prime_idx: usize,
    /// Bucket table: `slots[b]` is the arena index of bucket `b`'s chain
    /// head, or `0` for an empty bucket.
    slots: Vec<AtomicU32>,
    /// The arena. Indices `[0, STRIPE_COUNT)` are freelist heads; indices
    /// `[STRIPE_COUNT, nodes.len())` are (possibly unused) element nodes.
    nodes: Vec<UnsafeCell<Node<E>>>,
}

// SAFETY: access to the contents of `nodes` and `slots` is gated by the
// stripe lock (or, during resize, every stripe lock) covering the relevant
// index; `StripedSet` never hands out an `Inner` reference without that
// discipline being upheld by its callers.
unsafe impl<E: Send> Send for Inner<E> {}
unsafe impl<E: Send> Sync for Inner<E> {}

impl<E> Inner<E> {
    /// Builds a fresh, empty generation at the given progression index.
    pub(crate) fn new(prime_idx: usize) -> Self {
        let slots_len = PRIME_SIZES[prime_idx] as usize;
        let capacity = slots_len + STRIPE_COUNT;
        Inner {
            prime_idx,
            slots: (0..slots_len).map(|_| AtomicU32::new(0)).collect(),
            nodes: (0..capacity).map(|_| UnsafeCell::new(Node::empty())).collect(),
        }
    }

    /// Builds the next generation by growing `old`'s arena and rehashing
    /// every live element into a larger slot table, moving (not copying)
    /// each element's data. `old`'s live nodes are marked freed as they are
    /// moved so that dropping `old` afterward does not double-drop them.
    ///
    /// `old_node_pointer` is the bump-allocation cursor at the moment of
    /// resize: every node at or past this index is untouched capacity.
    ///
    /// SAFETY: caller must hold every stripe lock, so no mutator can be
    /// concurrently reading or writing `old`.
    pub(crate) unsafe fn grow_from(old: &Inner<E>, new_prime_idx: usize, old_node_pointer: u32) -> Self {
        let new_len = PRIME_SIZES[new_prime_idx] as usize;
        let capacity = new_len + STRIPE_COUNT;
        let mut nodes = Vec::with_capacity(capacity);

        for s in 0..STRIPE_COUNT as u32 {
            let head = old.node(s);
            nodes.push(UnsafeCell::new(Node {
                hash: 0,
                next: head.next,
                data: MaybeUninit::uninit(),
            }));
        }

        for i in (STRIPE_COUNT as u32)..old_node_pointer {
            let old_node = old.node(i);
            if old_node.hash != 0 {
                // Move the element out; `as_ptr().read()` duplicates the
                // bits, so `old_node.hash` is zeroed immediately after to
                // stop `Inner`'s `Drop` from dropping it a second time.
                let data = old_node.data.as_ptr().read();
                nodes.push(UnsafeCell::new(Node {
                    hash: old_node.hash,
                    next: 0,
                    data: MaybeUninit::new(data),
                }));
                old_node.hash = 0;
            } else {
                // Free node: not live, but its `next` is a freelist link to
                // another free node for this stripe. Arena indices here are
                // unchanged from `old` (both loops walk `STRIPE_COUNT..`),
                // so the link stays valid — zeroing it would silently
                // truncate the stripe's freelist.
                nodes.push(UnsafeCell::new(Node {
                    hash: 0,
                    next: old_node.next,
                    data: MaybeUninit::uninit(),
                }));
            }
        }

        for _ in old_node_pointer as usize..capacity {
            nodes.push(UnsafeCell::new(Node::empty()));
        }

        let slots: Vec<AtomicU32> = (0..new_len).map(|_| AtomicU32::new(0)).collect();
        let inner = Inner {
            prime_idx: new_prime_idx,
            slots,
            nodes,
        };

        for i in (STRIPE_COUNT as u32)..old_node_pointer {
            let node = inner.node(i);
            if node.hash != 0 {
                let b = (node.hash as usize) % new_len;
                node.next = inner.bucket_head(b);
                inner.set_bucket_head(b, i);
            }
        }

        inner
    }

    pub(crate) fn slots_len(&self) -> usize {
        self.slots.len()
    }

    /// Unchecked indexed access to an arena slot.
    ///
    /// SAFETY: caller must hold the stripe lock covering `i` (either the
    /// stripe that owns `i`'s bucket, or — during resize — every stripe
    /// lock), and must not alias this with another live `&mut Node<E>` to
    /// the same index.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn node(&self, i: u32) -> &mut Node<E> {
        &mut *self.nodes[i as usize].get()
    }

    /// Swaps the full contents (hash, next, data) of two distinct arena
    /// slots in place, without requiring `E: Clone`.
    ///
    /// SAFETY: caller must hold the stripe lock(s) covering both `a` and
    /// `b`, and `a != b`.
    pub(crate) unsafe fn swap_nodes(&self, a: u32, b: u32) {
        debug_assert_ne!(a, b);
        std::ptr::swap(self.nodes[a as usize].get(), self.nodes[b as usize].get());
    }

    pub(crate) fn bucket_head(&self, bucket: usize) -> u32 {
        self.slots[bucket].load(Ordering::Acquire)
    }

    pub(crate) fn set_bucket_head(&self, bucket: usize, head: u32) {
        self.slots[bucket].store(head, Ordering::Release);
    }
}

impl<E> Drop for Inner<E> {
    fn drop(&mut self) {
        for cell in &self.nodes {
            let node = unsafe { &mut *cell.get() };
            if node.hash != 0 {
                unsafe { node.data.assume_init_drop() };
            }
        }
    }
}
