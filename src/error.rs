use std::fmt;
use std::path::PathBuf;

/// Where a history read failed: before the walk produced anything, or on
/// a commit in the middle of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Start,
    Iterate,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadStage::Start => f.write_str("Failed to read commits"),
            ReadStage::Iterate => f.write_str("Failed to iterate commits"),
        }
    }
}

/// Failures that end a `stats` run.
///
/// Causes are kept as sources rather than baked into the message, so the
/// one-line report is produced with the alternate formatter (`{:#}`) on the
/// `anyhow::Error` wrapping them: `Failed to open repo: <git2 message>`.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// No repository path on the command line.
    #[error("Please provide a repo path using --path flag")]
    MissingInput,

    #[error("Failed to open repo")]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to get HEAD")]
    HeadResolution(#[source] git2::Error),

    /// The HEAD commit, the revwalk or a commit on it could not be read.
    #[error("{stage}")]
    HistoryRead {
        stage: ReadStage,
        #[source]
        source: git2::Error,
    },

    #[error("Error while collecting file stats")]
    DiffComputation {
        commit: String,
        #[source]
        source: git2::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_names_the_flag() {
        let err = anyhow::Error::from(StatsError::MissingInput);
        assert_eq!(
            format!("{err:#}"),
            "Please provide a repo path using --path flag"
        );
    }

    #[test]
    fn open_failure_chains_the_cause() {
        let err = anyhow::Error::from(StatsError::RepositoryOpen {
            path: PathBuf::from("/nowhere"),
            source: git2::Error::from_str("could not find repository at '/nowhere'"),
        });
        assert_eq!(
            format!("{err:#}"),
            "Failed to open repo: could not find repository at '/nowhere'"
        );
    }

    #[test]
    fn history_read_wording_follows_stage() {
        let start = StatsError::HistoryRead {
            stage: ReadStage::Start,
            source: git2::Error::from_str("revwalk failed"),
        };
        let iterate = StatsError::HistoryRead {
            stage: ReadStage::Iterate,
            source: git2::Error::from_str("object not found"),
        };

        assert_eq!(
            format!("{:#}", anyhow::Error::from(start)),
            "Failed to read commits: revwalk failed"
        );
        assert_eq!(
            format!("{:#}", anyhow::Error::from(iterate)),
            "Failed to iterate commits: object not found"
        );
    }

    #[test]
    fn diff_failure_uses_file_stats_wording() {
        let err = StatsError::DiffComputation {
            commit: "abc123".into(),
            source: git2::Error::from_str("object not found"),
        };
        assert_eq!(err.to_string(), "Error while collecting file stats");
        assert_eq!(
            format!("{:#}", anyhow::Error::from(err)),
            "Error while collecting file stats: object not found"
        );
    }
}
