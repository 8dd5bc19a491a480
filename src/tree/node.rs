//! Node storage
//!
//! Each tree owns one arena of slots. A slot holds the value and the three
//! links of the left-child/right-sibling encoding:
//!   parent        (back-reference, never owning)
//!   left_child    (first child)
//!   right_sibling (next child of the same parent)
//!
//! Links are plain slot indexes. Ids handed out to callers also carry the
//! tree tag and the slot generation, so an id from another tree or of a
//! freed node never resolves to a live node.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TreeTag(u64);

impl TreeTag {
    pub(crate) fn fresh() -> Self {
        TreeTag(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// Detached handle to a node of a [`GeneralTree`](crate::GeneralTree).
///
/// Ids are `Copy` and do not borrow the tree, which makes them the currency
/// of every mutating operation. An id only resolves against the tree that
/// minted it (or the tree it was moved into), and stops resolving once its
/// node is deleted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tag: TreeTag,
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Slot index inside the owning arena
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}#{}@{})", self.tag.0, self.index, self.generation)
    }
}

/// The three links of one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub parent: Option<usize>,
    pub left_child: Option<usize>,
    pub right_sibling: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    links: Links,
    /// `None` marks a free slot
    value: Option<T>,
}

/// Arena of nodes owned by a single tree
pub(crate) struct NodeStore<T> {
    tag: TreeTag,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> NodeStore<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: TreeTag::fresh(),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn tag(&self) -> TreeTag {
        self.tag
    }

    /// Map an id to a live slot of this arena
    pub(crate) fn resolve(&self, id: NodeId) -> Option<usize> {
        if id.tag != self.tag {
            return None;
        }
        let slot = self.slots.get(id.index)?;
        (slot.generation == id.generation && slot.value.is_some()).then_some(id.index)
    }

    pub(crate) fn id_of(&self, index: usize) -> NodeId {
        NodeId {
            tag: self.tag,
            index,
            generation: self.slots[index].generation,
        }
    }

    #[inline]
    pub(crate) fn links(&self, index: usize) -> Links {
        self.slots[index].links
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, index: usize) -> &mut Links {
        &mut self.slots[index].links
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.value.as_ref())
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(|slot| slot.value.as_mut())
    }

    /// Store a value with the given links, reusing a free slot when possible
    pub(crate) fn alloc(&mut self, value: T, links: Links) -> usize {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.links = links;
                slot.value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    links,
                    value: Some(value),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Free a slot and hand its value back. Ids of the slot go stale.
    pub(crate) fn release(&mut self, index: usize) -> Option<T> {
        let slot = self.slots.get_mut(index)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.links = Links::default();
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let reusable = self.free.len().min(additional);
        self.slots.reserve(additional - reusable);
    }

    /// Drop every slot and take a fresh tag so that no earlier id resolves
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
        self.tag = TreeTag::fresh();
    }

    /// Mutable references to every live value, indexed by slot
    pub(crate) fn values_mut_by_slot(&mut self) -> Vec<Option<&mut T>> {
        self.slots.iter_mut().map(|slot| slot.value.as_mut()).collect()
    }

    /// Consume the arena, yielding `(index, links, value)` for live slots
    pub(crate) fn into_live(self) -> impl Iterator<Item = (usize, Links, T)> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.value.map(|value| (index, slot.links, value)))
    }

    /// Total number of slots, live or free
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for NodeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for NodeStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStore")
            .field("tag", &self.tag)
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}
