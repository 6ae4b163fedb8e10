//! Lock coupling (hand-over-hand) traversal.
//!
//! A [`CouplingCursor`] always holds the lock of the *predecessor* slot:
//! either the list head or a node. Stepping forward locks the next node
//! while the predecessor is still locked, and only then lets the
//! predecessor go:
//!
//! ```text
//!   hold:     [HEAD]──►  10  ──►  20  ──►  30
//!                 ▲
//!   step:     [HEAD]──► [10] ──►  20  ──►  30      both locked
//!   advance:   HEAD ──► [10] ──►  20  ──►  30      HEAD released
//!   step:      HEAD ──► [10] ──► [20] ──►  30      both locked
//! ```
//!
//! At every instant at least one lock on the path is held, so no other
//! mutator can unlink the segment the cursor stands on. Locks are always
//! taken head first and then in list order, which rules out deadlock.
//!
//! Releasing is done by dropping guards. [`CouplingCursor::advance`] stores
//! the new predecessor before the old guard is dropped, so the
//! acquire-before-release order holds by construction.

use std::sync::Arc;

use parking_lot::{ArcMutexGuard, Mutex, MutexGuard, RawMutex};

/// Owning link to the next node. `None` marks the end of the chain.
pub(crate) type Link = Option<Arc<Mutex<ListNode>>>;

/// Guard over a locked node. Owns a reference to the node, so it can outlive
/// the link it was reached through.
pub(crate) type NodeGuard = ArcMutexGuard<RawMutex, ListNode>;

#[derive(Debug)]
pub(crate) struct ListNode {
    pub(crate) value: i32,
    pub(crate) next: Link,
}

impl ListNode {
    pub(crate) fn new(value: i32, next: Link) -> Arc<Mutex<ListNode>> {
        Arc::new(Mutex::new(ListNode { value, next }))
    }
}

// Removed nodes keep their forward link, so a reader that stalls on one can
// pin an arbitrarily long run of unlinked nodes. Free that run iteratively,
// stopping at the first node someone else still holds.
impl Drop for ListNode {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(node) => next = node.into_inner().next.take(),
                Err(_shared) => break,
            }
        }
    }
}

/// The locked slot whose `next` link the cursor may rewrite.
enum Predecessor<'a> {
    Head(MutexGuard<'a, Link>),
    Node(NodeGuard),
}

impl Predecessor<'_> {
    fn link(&self) -> &Link {
        match self {
            Predecessor::Head(head) => &**head,
            Predecessor::Node(node) => &node.next,
        }
    }

    fn link_mut(&mut self) -> &mut Link {
        match self {
            Predecessor::Head(head) => &mut **head,
            Predecessor::Node(node) => &mut node.next,
        }
    }
}

/// Outcome of looking one node past the predecessor.
pub(crate) enum Step {
    /// The predecessor is the last slot in the chain.
    End,
    /// The next node, locked while the predecessor is still held.
    Visit(NodeGuard),
}

pub(crate) struct CouplingCursor<'a> {
    pred: Predecessor<'a>,
    position: usize,
}

impl<'a> CouplingCursor<'a> {
    /// Locks the head and positions the cursor before the first node.
    pub(crate) fn new(head: &'a Mutex<Link>) -> Self {
        CouplingCursor {
            pred: Predecessor::Head(head.lock()),
            position: 0,
        }
    }

    /// Number of nodes between the head and the current predecessor.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn step(&self) -> Step {
        match self.pred.link() {
            Some(next) => Step::Visit(next.lock_arc()),
            None => Step::End,
        }
    }

    /// Makes `current` the new predecessor and releases the old one.
    ///
    /// `current` must be the guard returned by the last [`step`](Self::step).
    pub(crate) fn advance(&mut self, current: NodeGuard) {
        debug_assert!(self.is_successor(&current));
        // The old predecessor is dropped after the assignment completes.
        self.pred = Predecessor::Node(current);
        self.position += 1;
    }

    /// Splices a new node directly after the predecessor.
    ///
    /// If a visited node is still locked by the caller it becomes the new
    /// node's successor; at the end of the chain the new node is the tail.
    pub(crate) fn link_here(&mut self, value: i32) {
        let link = self.pred.link_mut();
        let successor = link.take();
        *link = Some(ListNode::new(value, successor));
    }

    /// Unlinks `current` by pointing the predecessor at its successor.
    ///
    /// The removed node keeps its own `next` link so a reader already
    /// standing on it can still walk forward into the live chain. The
    /// returned link is the list's reference to the removed node; dropping
    /// it after the guards reclaims the node once no reader holds it.
    pub(crate) fn unlink(&mut self, current: NodeGuard) -> Link {
        debug_assert!(self.is_successor(&current));
        let successor = current.next.clone();
        let removed = std::mem::replace(self.pred.link_mut(), successor);
        drop(current);
        removed
    }

    fn is_successor(&self, current: &NodeGuard) -> bool {
        self.pred
            .link()
            .as_ref()
            .is_some_and(|next| Arc::ptr_eq(next, ArcMutexGuard::mutex(current)))
    }
}
