//! Keyed node index and per-state bookkeeping records.
//!
//! One [`SearchRecord`] exists per distinct node key ever seen during a call.
//! Records are created on first discovery, updated in place when a cheaper
//! path is found, and never removed. Set membership (open, closed,
//! inconsistent) is a single status tag on the record rather than parallel
//! maps, so a record can never be in two sets at once.

use std::collections::HashMap;

/// Arena index of a record inside a [`RecordIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which of the three search sets a record currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Eligible for expansion in the active pass.
    Open,
    /// Expanded during pass `pass`.
    Closed { pass: u32 },
    /// Closed in the active pass, then improved. Waits for the next pass.
    Inconsistent,
}

/// Bookkeeping for one logical state.
#[derive(Debug, Clone)]
pub struct SearchRecord<N> {
    pub node: N,
    pub key: String,
    /// Record this one was reached from (`None` for the start record).
    pub parent: Option<RecordId>,
    /// Cost of the edge from `parent` to this record.
    pub edge_cost: f64,
    /// Best known cost from the start. Never increases.
    pub g: f64,
    /// Unscaled heuristic estimate, evaluated once on discovery.
    pub h: f64,
    pub status: RecordStatus,
}

impl<N> SearchRecord<N> {
    /// Unscaled `g + h`, the admissible lower-bound contribution.
    #[must_use]
    pub fn unscaled_f(&self) -> f64 {
        self.g + self.h
    }

    /// Priority under inflation factor `epsilon`.
    #[must_use]
    pub fn f(&self, epsilon: f64) -> f64 {
        self.g + epsilon * self.h
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == RecordStatus::Open
    }
}

/// Key-addressed arena of records.
///
/// Lookups go through a `HashMap<String, RecordId>`; iteration goes through
/// the arena `Vec`, so enumeration order is discovery order and never
/// depends on hash layout.
#[derive(Debug)]
pub struct RecordIndex<N> {
    records: Vec<SearchRecord<N>>,
    by_key: HashMap<String, RecordId>,
}

impl<N> RecordIndex<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Look up a record by node key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<RecordId> {
        self.by_key.get(key).copied()
    }

    /// Insert a fresh record. The key must not already be present.
    pub fn insert(&mut self, record: SearchRecord<N>) -> RecordId {
        debug_assert!(
            !self.by_key.contains_key(&record.key),
            "duplicate record key {}",
            record.key
        );
        let id = RecordId(self.records.len());
        self.by_key.insert(record.key.clone(), id);
        self.records.push(record);
        id
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> &SearchRecord<N> {
        &self.records[id.0]
    }

    pub fn get_mut(&mut self, id: RecordId) -> &mut SearchRecord<N> {
        &mut self.records[id.0]
    }

    /// Lower `g` and re-point the parent. Returns `false` (and changes
    /// nothing) unless `g` is strictly cheaper than the current value.
    pub fn improve(&mut self, id: RecordId, parent: RecordId, edge_cost: f64, g: f64) -> bool {
        let record = &mut self.records[id.0];
        if g >= record.g {
            return false;
        }
        record.g = g;
        record.parent = Some(parent);
        record.edge_cost = edge_cost;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &SearchRecord<N>)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordId(i), r))
    }
}

impl<N> Default for RecordIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}
