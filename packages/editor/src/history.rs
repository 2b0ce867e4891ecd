//! # Commit History
//!
//! Bounded list of labelled tree snapshots with a cursor.
//!
//! ## Design
//!
//! - `commit` appends a snapshot after the cursor and moves the cursor to it
//! - Undo moves the cursor back, redo moves it forward
//! - A new commit after an undo drops everything past the cursor
//! - The oldest snapshots are trimmed once `max_levels` undo steps are kept
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = CommitHistory::new(tree.clone(), "init", 100);
//! history.record("add heading", tree.clone());
//!
//! let previous = history.undo().map(|c| c.tree.clone());
//! ```

use pageblocks_model::BlockTree;

/// A labelled snapshot of the whole tree
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Monotonic across the session, never reused after trimming
    pub sequence: u64,
    pub label: String,
    pub tree: BlockTree,
}

#[derive(Debug, Clone)]
pub struct CommitHistory {
    /// Oldest first, never empty
    entries: Vec<Commit>,

    /// Index of the snapshot the session is at
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    next_sequence: u64,
}

impl CommitHistory {
    pub fn new(initial: BlockTree, label: impl Into<String>, max_levels: usize) -> Self {
        Self {
            entries: vec![Commit {
                sequence: 0,
                label: label.into(),
                tree: initial,
            }],
            cursor: 0,
            max_levels,
            next_sequence: 1,
        }
    }

    /// Append a snapshot and return its sequence number
    pub fn record(&mut self, label: impl Into<String>, tree: BlockTree) -> u64 {
        // New action invalidates the redo branch
        self.entries.truncate(self.cursor + 1);

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(Commit {
            sequence,
            label: label.into(),
            tree,
        });

        if self.max_levels > 0 && self.entries.len() > self.max_levels + 1 {
            let excess = self.entries.len() - (self.max_levels + 1);
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
        sequence
    }

    /// Step back, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&Commit> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward, returning the snapshot to restore
    pub fn redo(&mut self) -> Option<&Commit> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Commit> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// Label of the commit an undo would leave
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            self.current().map(|c| c.label.as_str())
        } else {
            None
        }
    }

    /// Label of the commit a redo would restore
    pub fn redo_label(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1).map(|c| c.label.as_str())
    }

    /// All retained commits, oldest first
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}
