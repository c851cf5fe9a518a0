//! Alias table and fuzzy suggestions.
//!
//! Rebuilt alongside each snapshot: every node contributes its canonical
//! name and, on the typed network, its display names as alternates. Free
//! text that fails exact resolution is matched here, first exactly
//! (case-insensitive) and then approximately for "did you mean"
//! suggestions.

use std::collections::{BTreeMap, BTreeSet};

use super::snapshot::NetworkSnapshot;

/// Canonical node name → alternate rider inputs.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Canonical → alternates (the canonical itself plus display names).
    alternates: BTreeMap<String, BTreeSet<String>>,
    /// Lowercased alternate → canonicals it could mean.
    reverse: BTreeMap<String, BTreeSet<String>>,
}

impl AliasTable {
    /// Build the table for a snapshot.
    pub fn build(snapshot: &NetworkSnapshot) -> Self {
        let mut table = Self::default();
        for (name, record) in snapshot.records() {
            table.insert(name, name);
            for display in &record.display_names {
                table.insert(name, display);
            }
        }
        table
    }

    fn insert(&mut self, canonical: &str, alternate: &str) {
        self.alternates
            .entry(canonical.to_string())
            .or_default()
            .insert(alternate.to_string());
        self.reverse
            .entry(alternate.to_lowercase())
            .or_default()
            .insert(canonical.to_string());
    }

    pub fn len(&self) -> usize {
        self.alternates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternates.is_empty()
    }

    /// Resolve an alternate to its canonical node name, case-insensitively.
    ///
    /// When one alternate names several nodes, the lexicographically
    /// smallest canonical wins.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.reverse
            .get(&text.to_lowercase())
            .and_then(|canonicals| canonicals.iter().next())
            .map(String::as_str)
    }

    /// Candidate canonical names for free text that failed resolution.
    ///
    /// Candidates are gathered by case-insensitive substring containment
    /// and by normalized edit-distance similarity against every alternate,
    /// ranked by best similarity with a lexicographic tie-break, and capped
    /// at `limit`. Returns an empty vec when nothing comes close.
    pub fn suggest(&self, text: &str, limit: usize, cutoff: f64) -> Vec<String> {
        let query = text.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = Vec::new();
        for (canonical, alternates) in &self.alternates {
            let mut best = 0.0f64;
            let mut contained = false;
            for alternate in alternates {
                let lowered = alternate.to_lowercase();
                if lowered.contains(&query) {
                    contained = true;
                }
                best = best.max(similarity(&query, &lowered));
            }
            if contained || best >= cutoff {
                scored.push((best, canonical.as_str()));
            }
        }

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, name)| name.to_string()).collect()
    }
}

/// Normalized edit-distance similarity in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Levenshtein edit distance, two-row Wagner-Fischer.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
