use serde::{Serialize, Serializer};

/// Clean-text lines no classifier has claimed yet, in document order.
///
/// Entries are keyed by their position in the record's clean text, so two
/// lines with identical text stay distinguishable and a claim removes exactly
/// the line that was classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Residual {
    entries: Vec<(usize, String)>,
}

impl Residual {
    pub fn push(&mut self, position: usize, line: &str) {
        self.entries.push((position, line.to_string()));
    }

    /// Remove the entry at `position`. Returns `None` if it was never there or
    /// was already claimed.
    pub fn claim(&mut self, position: usize) -> Option<String> {
        let idx = self.entries.iter().position(|(p, _)| *p == position)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, position: usize) -> bool {
        self.entries.iter().any(|(p, _)| *p == position)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, l)| l.as_str())
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for Residual {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.lines())
    }
}
