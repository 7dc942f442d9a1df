use std::collections::{hash_map, HashMap};

pub mod aggregator;

pub use aggregator::Aggregator;

/// Occurrence counts keyed by author name or file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: HashMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_owned(), 1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counters.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl IntoIterator for CountTable {
    type Item = (String, usize);
    type IntoIter = hash_map::IntoIter<String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl FromIterator<(String, usize)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Both tables produced from one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionStats {
    pub authors: CountTable,
    pub files: CountTable,
}
