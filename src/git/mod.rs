use std::collections::BTreeSet;

use crate::error::StatsError;

#[cfg(test)]
pub mod fixture;
pub mod history;

pub use history::GitHistory;

/// One commit as seen by the aggregations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    /// Author display name, verbatim.
    pub author: String,
    pub first_parent: Option<String>,
    /// Paths that differ from the first parent. Empty for root commits and
    /// for walks made with [`Detail::AuthorOnly`].
    pub changed_paths: BTreeSet<String>,
}

impl CommitRecord {
    pub fn is_root(&self) -> bool {
        self.first_parent.is_none()
    }
}

/// How much of each commit a walk materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    AuthorOnly,
    WithChanges,
}

pub type CommitStream<'a> = Box<dyn Iterator<Item = Result<CommitRecord, StatsError>> + 'a>;

/// A source of commit history that can be walked from its start more than
/// once. Every call to [`HistorySource::commits`] yields a fresh sequence.
pub trait HistorySource {
    fn commits(&self, detail: Detail) -> Result<CommitStream<'_>, StatsError>;
}
