use crate::error::ResultSetError;
use crate::http_probe::prelude::*;

/// Index-aligned results of a run: one slot per target.
///
/// A slot is filled at most once and never cleared. An empty slot means
/// the probe for that target is still in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    slots: Vec<Option<ProbeRecord>>,
}

impl ResultSet {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stores `record` in its slot.
    ///
    /// # Errors
    ///
    /// Fails without touching the set when the slot is already filled or
    /// the index is past the last target.
    pub fn fill(&mut self, record: ProbeRecord) -> Result<(), ResultSetError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(record.index)
            .ok_or(ResultSetError::OutOfRange {
                index: record.index,
                len,
            })?;
        if slot.is_some() {
            return Err(ResultSetError::AlreadyFilled {
                index: record.index,
            });
        }
        *slot = Some(record);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&ProbeRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Slots in target order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&ProbeRecord>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// All records in target order, or `None` while any probe is in flight.
    pub fn records(&self) -> Option<Vec<&ProbeRecord>> {
        self.slots.iter().map(Option::as_ref).collect()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for record in self.slots.iter().flatten() {
            match record.outcome.failure_kind() {
                None => tally.ok += 1,
                Some(FailureKind::Timeout) => tally.timed_out += 1,
                Some(FailureKind::NetworkError | FailureKind::RequestBuildError) => {
                    tally.failed += 1
                }
            }
        }
        tally
    }
}

/// Outcome counts over the filled slots of a [`ResultSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub ok: usize,
    pub timed_out: usize,
    pub failed: usize,
}
