//! Bounded history of dispatched actions, for developer tooling.
//!
//! Enabled by the `inspector` feature. Every dispatch that the root reducer
//! accepted is recorded, whether or not it changed the snapshot; failed and
//! rejected dispatches are not.

use std::collections::VecDeque;

use web_time::{Duration, Instant};

use crate::{Action, Store};

#[derive(Clone, Debug)]
pub struct ActionRecord {
    pub kind: String,
    pub changed: bool,
    /// When the dispatch started.
    pub at: Instant,
    /// Time spent in the root reducer.
    pub elapsed: Duration,
}

pub(crate) struct History {
    limit: usize,
    records: VecDeque<ActionRecord>,
}

impl History {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            records: VecDeque::with_capacity(limit.min(256)),
        }
    }

    pub(crate) fn record(&mut self, action: &Action, changed: bool, started: Instant) {
        if self.limit == 0 {
            return;
        }
        if self.records.len() == self.limit {
            self.records.pop_front();
        }
        self.records.push_back(ActionRecord {
            kind: action.kind().to_string(),
            changed,
            at: started,
            elapsed: started.elapsed(),
        });
    }
}

impl Store {
    /// Oldest first.
    pub fn history(&self) -> Vec<ActionRecord> {
        self.history_cell()
            .borrow()
            .records
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_history(&self) {
        self.history_cell().borrow_mut().records.clear();
    }
}
