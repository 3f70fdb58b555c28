//! Longest non-overlapping multi-symbol pattern matching.
//!
//! Some dictionaries define rules spanning several cells (contractions,
//! prefixed words). Resolving them is a two-step affair:
//!
//! 1. An Aho-Corasick automaton reports every occurrence of every pattern,
//!    overlaps included.
//! 2. Candidates are ranked longest first and accepted greedily; anything
//!    touching an already-accepted interval is dropped.
//!
//! Equal-length candidates are ranked by start position, so the leftmost one
//! wins a conflict regardless of how the automaton happened to report them.
//!
//! Positions are symbol (char) offsets, and `end` is inclusive.

use std::collections::BTreeMap;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::CoreError;

/// One accepted match: symbols `start..=end` resolve to `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<V> {
    pub start: usize,
    pub end: usize,
    pub value: V,
}

impl<V> PatternMatch<V> {
    /// Number of symbols covered.
    pub fn width(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Closed-interval overlap test.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start <= self.end && end >= self.start
    }
}

/// A compiled set of symbol-sequence patterns and the values they map to.
#[derive(Debug, Clone)]
pub struct PatternSet<V> {
    automaton: Option<AhoCorasick>,
    patterns: Vec<(String, V)>,
}

impl<V: Clone> PatternSet<V> {
    /// Compile `patterns`. Empty patterns never match and are skipped.
    pub fn new<I, S>(patterns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        let patterns: Vec<(String, V)> = patterns
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let automaton = if patterns.is_empty() {
            None
        } else {
            let built = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(patterns.iter().map(|(k, _)| k.as_str()))
                .map_err(|e| CoreError::Patterns(e.to_string()))?;
            Some(built)
        };

        Ok(Self {
            automaton,
            patterns,
        })
    }

    pub fn empty() -> Self {
        Self {
            automaton: None,
            patterns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over `(pattern, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every occurrence of every pattern, as `(start, end, pattern_id)` in
    /// symbol offsets, in the order the automaton reports them.
    fn all_occurrences(&self, sequence: &str) -> Vec<(usize, usize, usize)> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        // Byte offset -> symbol offset for every char boundary.
        let mut symbol_at = vec![0usize; sequence.len() + 1];
        let mut count = 0;
        for (byte, _) in sequence.char_indices() {
            symbol_at[byte] = count;
            count += 1;
        }
        symbol_at[sequence.len()] = count;

        automaton
            .find_overlapping_iter(sequence)
            .map(|m| {
                let start = symbol_at[m.start()];
                let end = symbol_at[m.end()] - 1;
                (start, end, m.pattern().as_usize())
            })
            .collect()
    }

    /// Longest-first, non-overlapping matches over `sequence`, returned in
    /// ascending `start` order.
    pub fn find_longest_nonoverlapping_matches(&self, sequence: &str) -> Vec<PatternMatch<V>> {
        let mut candidates = self.all_occurrences(sequence);
        // Stable: longer first, then leftmost start.
        candidates.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

        // Accepted intervals keyed by start. They never overlap each other,
        // so a candidate only has to be checked against the interval that
        // starts at or before its own end.
        let mut accepted: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
        for (start, end, id) in candidates {
            let blocked = accepted
                .range(..=end)
                .next_back()
                .is_some_and(|(_, (prev_end, _))| *prev_end >= start);
            if !blocked {
                accepted.insert(start, (end, id));
            }
        }

        accepted
            .into_iter()
            .map(|(start, (end, id))| PatternMatch {
                start,
                end,
                value: self.patterns[id].1.clone(),
            })
            .collect()
    }
}

/// One-shot form of [`PatternSet::find_longest_nonoverlapping_matches`]
/// for callers that do not keep a compiled set around.
pub fn find_longest_nonoverlapping_matches<'a, V, I>(
    sequence: &str,
    patterns: I,
) -> Result<Vec<PatternMatch<V>>, CoreError>
where
    V: Clone + 'a,
    I: IntoIterator<Item = (&'a String, &'a V)>,
{
    let set = PatternSet::new(patterns.into_iter().map(|(k, v)| (k.clone(), v.clone())))?;
    Ok(set.find_longest_nonoverlapping_matches(sequence))
}
