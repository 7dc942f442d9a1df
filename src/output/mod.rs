use crate::analysis::CountTable;

pub mod reporter;

pub use reporter::Reporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    pub key: String,
    pub count: usize,
}

/// Orders a table by count, highest first, keeping at most `limit` rows.
/// Equal counts fall back to key order so repeated runs print the same text.
pub fn rank(table: CountTable, limit: Option<usize>) -> Vec<RankedEntry> {
    let mut entries: Vec<(String, usize)> = table.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (key, count))| RankedEntry {
            rank: i + 1,
            key,
            count,
        })
        .collect()
}

/// Labels and row cap of one rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub title: &'static str,
    pub rule: &'static str,
    pub unit: &'static str,
    pub limit: Option<usize>,
}

impl TableSpec {
    pub fn contributors() -> Self {
        Self {
            title: "📊 Top Contributors",
            rule: "--------------------",
            unit: "commits",
            limit: None,
        }
    }

    pub fn files(limit: usize) -> Self {
        Self {
            title: "📁 Most Modified Files",
            rule: "----------------------------",
            unit: "changes",
            limit: Some(limit),
        }
    }
}
