use super::*;
use crate::error::ReadStage;
use git2::{Commit, Oid, Repository, Revwalk, Sort};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// History of a local repository, walked from the commit HEAD pointed at
/// when it was opened.
pub struct GitHistory {
    repo: Repository,
    path: PathBuf,
    head: Oid,
}

impl GitHistory {
    pub fn open(path: &Path) -> Result<Self, StatsError> {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        let repo = Repository::open(&path).map_err(|source| StatsError::RepositoryOpen {
            path: path.clone(),
            source,
        })?;

        let head = {
            let reference = repo.head().map_err(StatsError::HeadResolution)?;
            let commit = reference
                .peel_to_commit()
                .map_err(read_failed(ReadStage::Start))?;
            debug!(
                "HEAD is {} at {}",
                reference.shorthand().unwrap_or("HEAD"),
                commit.id()
            );
            commit.id()
        };

        info!("Opened Git repository at {}", path.display());

        Ok(Self { repo, path, head })
    }
}

impl HistorySource for GitHistory {
    fn commits(&self, detail: Detail) -> Result<CommitStream<'_>, StatsError> {
        let mut walk = self.repo.revwalk().map_err(read_failed(ReadStage::Start))?;
        walk.set_sorting(Sort::TIME)
            .map_err(read_failed(ReadStage::Start))?;
        walk.push(self.head).map_err(read_failed(ReadStage::Start))?;

        debug!(
            "Walking {} from {} ({:?})",
            self.path.display(),
            self.head,
            detail
        );

        Ok(Box::new(Commits {
            repo: &self.repo,
            walk,
            detail,
        }))
    }
}

struct Commits<'r> {
    repo: &'r Repository,
    walk: Revwalk<'r>,
    detail: Detail,
}

impl Commits<'_> {
    fn record(&self, oid: Oid) -> Result<CommitRecord, StatsError> {
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(read_failed(ReadStage::Iterate))?;
        let author = String::from_utf8_lossy(commit.author().name_bytes()).into_owned();
        let first_parent = commit.parent_id(0).ok();

        let changed_paths = match (self.detail, first_parent) {
            (Detail::WithChanges, Some(_)) => changed_paths(self.repo, &commit).map_err(
                |source| StatsError::DiffComputation {
                    commit: oid.to_string(),
                    source,
                },
            )?,
            _ => BTreeSet::new(),
        };

        Ok(CommitRecord {
            id: oid.to_string(),
            author,
            first_parent: first_parent.map(|parent| parent.to_string()),
            changed_paths,
        })
    }
}

impl Iterator for Commits<'_> {
    type Item = Result<CommitRecord, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = match self.walk.next()? {
            Ok(oid) => oid,
            Err(e) => return Some(Err(read_failed(ReadStage::Iterate)(e))),
        };
        Some(self.record(oid))
    }
}

fn read_failed(stage: ReadStage) -> impl Fn(git2::Error) -> StatsError {
    move |source| StatsError::HistoryRead { stage, source }
}

/// Paths touched between `commit` and its first parent, deduplicated.
fn changed_paths(repo: &Repository, commit: &Commit<'_>) -> Result<BTreeSet<String>, git2::Error> {
    let tree = commit.tree()?;
    let parent_tree = commit.parent(0)?.tree()?;
    let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;

    Ok(diff
        .deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|path| path.to_string_lossy().into_owned())
        })
        .collect())
}
