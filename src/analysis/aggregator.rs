use super::*;
use crate::error::StatsError;
use crate::git::{CommitRecord, Detail, HistorySource};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, trace};

/// Folds commit history into count tables.
///
/// Every count is all-or-nothing: the first error from the history source
/// ends the walk and the partially filled table is dropped.
pub struct Aggregator<'a, S: HistorySource + ?Sized> {
    source: &'a S,
    show_progress: bool,
}

impl<'a, S: HistorySource + ?Sized> Aggregator<'a, S> {
    pub fn new(source: &'a S, show_progress: bool) -> Self {
        Self {
            source,
            show_progress,
        }
    }

    /// Commits per author display name, root commit included.
    pub fn count_authors(&self) -> Result<CountTable, StatsError> {
        let mut authors = CountTable::new();
        let seen = self.fold(Detail::AuthorOnly, "authors", |record| {
            authors.increment(&record.author)
        })?;

        debug_assert_eq!(authors.total(), seen);
        info!("{} commits by {} authors", seen, authors.len());
        Ok(authors)
    }

    /// Commits touching each path. Root commits have nothing to diff against
    /// and are skipped.
    pub fn count_file_changes(&self) -> Result<CountTable, StatsError> {
        let mut files = CountTable::new();
        let seen = self.fold(Detail::WithChanges, "files", |record| {
            count_changes(&mut files, record)
        })?;

        info!("{} commits changed {} distinct files", seen, files.len());
        Ok(files)
    }

    /// Both tables from a single walk.
    pub fn count_all(&self) -> Result<ContributionStats, StatsError> {
        let mut stats = ContributionStats::default();
        let seen = self.fold(Detail::WithChanges, "history", |record| {
            stats.authors.increment(&record.author);
            count_changes(&mut stats.files, record);
        })?;

        info!(
            "{} commits by {} authors changed {} distinct files",
            seen,
            stats.authors.len(),
            stats.files.len()
        );
        Ok(stats)
    }

    fn fold<F>(&self, detail: Detail, label: &'static str, mut step: F) -> Result<usize, StatsError>
    where
        F: FnMut(&CommitRecord),
    {
        let pb = self.spinner(label);

        let result = self.source.commits(detail).and_then(|commits| {
            let mut seen = 0;
            for record in commits {
                let record = record?;
                trace!("{} by {}", record.id, record.author);
                step(&record);
                seen += 1;
                pb.inc(1);
            }
            Ok(seen)
        });

        pb.finish_and_clear();
        if let Err(e) = &result {
            debug!("Walk for {} stopped: {:?}", label, e);
        }
        result
    }

    fn spinner(&self, label: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {msg}: {pos} commits",
        ) {
            pb.set_style(style);
        }
        pb.set_message(label);
        pb
    }
}

fn count_changes(files: &mut CountTable, record: &CommitRecord) {
    if record.is_root() {
        return;
    }
    for path in &record.changed_paths {
        files.increment(path);
    }
}
