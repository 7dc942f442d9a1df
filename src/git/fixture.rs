//! Throwaway repositories for tests.

use git2::{Commit, Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        Self::at(tempfile::tempdir().unwrap())
    }

    /// A repository in a fresh directory directly under `parent`.
    pub fn new_in(parent: &Path) -> Self {
        Self::at(
            tempfile::Builder::new()
                .prefix(".repostats-fixture")
                .tempdir_in(parent)
                .unwrap(),
        )
    }

    fn at(dir: TempDir) -> Self {
        let repo = Repository::init(dir.path()).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `files` into the work tree and commits them on top of HEAD.
    pub fn commit(&mut self, author: &str, files: &[(&str, &str)]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (path, contents) in files {
            let full = self.dir.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, contents).unwrap();
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        self.commit_index(author)
    }

    pub fn remove(&mut self, author: &str, files: &[&str]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for path in files {
            fs::remove_file(self.dir.path().join(path)).unwrap();
            index.remove_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        self.commit_index(author)
    }

    fn commit_index(&self, author: &str) -> Oid {
        let mut index = self.repo.index().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let email = format!("{}@example.com", author.to_lowercase().replace(' ', "."));
        let signature = Signature::now(author, &email).unwrap();

        let parents: Vec<Commit<'_>> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parents: Vec<&Commit<'_>> = parents.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &format!("change by {author}"),
                &tree,
                &parents,
            )
            .unwrap()
    }
}
