//! Open queue: a binary min-heap ordered by `f = g + ε·h`.
//!
//! Ties on `f` go to the entry with the larger `g` (the one closer to a
//! goal), then to the older insertion, so pop order is fully deterministic.
//!
//! There is no decrease-key. An improved open record is inserted again and
//! the older entry goes stale; the search loop discards stale entries when
//! they surface. When ε changes the whole queue is rebuilt.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::record::RecordId;

/// One heap entry.
///
/// `g` is the record's cost at insertion time, used to recognise stale
/// entries after the record has been improved.
#[derive(Debug, Clone, Copy)]
pub struct QueueEntry {
    pub f: f64,
    pub g: f64,
    pub seq: u64,
    pub id: RecordId,
}

/// The ordering key: lower `f`, then higher `g`, then older `seq`.
#[derive(Debug, Clone, Copy)]
struct QueueKey {
    f: f64,
    g: f64,
    seq: u64,
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(other.g.total_cmp(&self.g))
            .then(self.seq.cmp(&other.seq))
    }
}

/// `BinaryHeap` is a max-heap, so entries carry `Reverse<QueueKey>`.
#[derive(Debug)]
struct HeapEntry {
    key: Reverse<QueueKey>,
    entry: QueueEntry,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-first priority queue of record references.
#[derive(Debug, Default)]
pub struct OpenQueue {
    heap: BinaryHeap<HeapEntry>,
    next_seq: u64,
    high_water: u64,
}

impl OpenQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record reference with priority `f`. Returns the assigned
    /// sequence number.
    pub fn insert(&mut self, id: RecordId, f: f64, g: f64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            key: Reverse(QueueKey { f, g, seq }),
            entry: QueueEntry { f, g, seq, id },
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        seq
    }

    /// Remove and return the highest-priority entry.
    pub fn extract_min(&mut self) -> Option<QueueEntry> {
        self.heap.pop().map(|e| e.entry)
    }

    /// The entry `extract_min` would return, without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<&QueueEntry> {
        self.heap.peek().map(|e| &e.entry)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Visit every entry in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.heap.iter().map(|e| &e.entry)
    }

    /// Snapshot of every entry in pop order.
    #[must_use]
    pub fn to_list(&self) -> Vec<QueueEntry> {
        let mut keyed: Vec<(QueueKey, QueueEntry)> = self
            .iter()
            .map(|e| {
                let key = QueueKey {
                    f: e.f,
                    g: e.g,
                    seq: e.seq,
                };
                (key, *e)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, e)| e).collect()
    }

    /// Empty the queue, returning its entries in pop order.
    ///
    /// Sequence numbering continues, so entries inserted afterwards still
    /// sort after everything inserted before.
    pub fn drain_sorted(&mut self) -> Vec<QueueEntry> {
        let entries = self.to_list();
        self.heap.clear();
        entries
    }

    /// High-water mark of queue size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
