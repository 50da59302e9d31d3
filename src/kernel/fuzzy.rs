//! 模糊匹配：大小写不敏感的子序列匹配与打分
//!
//! Matching is greedy: every query char takes the earliest label position
//! after the previous match. The score only orders results; it never decides
//! whether a label matches.

use std::ops::Range;
use unicode_xid::UnicodeXID;

const SCORE_MATCH: i32 = 16;
const BONUS_START: i32 = 12;
const BONUS_BOUNDARY: i32 = 8;
const BONUS_CONSECUTIVE: i32 = 10;
const PENALTY_GAP_START: i32 = 3;
const PENALTY_GAP_EXTENSION: i32 = 1;
const PENALTY_LEADING_GAP_MAX: i32 = 10;

/// Outcome of matching one query against one label.
///
/// `indices` are char positions (not byte offsets) into the label, strictly
/// increasing. A non-match always carries score 0 and no indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    pub matched: bool,
    pub score: i32,
    pub indices: Vec<usize>,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    fn trivial() -> Self {
        Self {
            matched: true,
            score: 0,
            indices: Vec::new(),
        }
    }

    /// Matched positions merged into contiguous char ranges, for highlighting.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for &idx in &self.indices {
            match ranges.last_mut() {
                Some(last) if last.end == idx => last.end = idx + 1,
                _ => ranges.push(idx..idx + 1),
            }
        }
        ranges
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch<T> {
    pub item: T,
    pub result: MatchResult,
}

/// Stateless matcher; identical inputs always produce identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzySearch;

impl FuzzySearch {
    pub fn new() -> Self {
        Self
    }

    pub fn match_label(&self, query: &str, label: &str) -> MatchResult {
        if query.is_empty() {
            return MatchResult::trivial();
        }

        let query: Vec<char> = query.chars().map(fold_case).collect();
        let label: Vec<char> = label.chars().collect();
        if query.len() > label.len() {
            return MatchResult::no_match();
        }

        let mut indices = Vec::with_capacity(query.len());
        let mut cursor = 0usize;
        for &q in &query {
            let Some(offset) = label[cursor..].iter().position(|&c| fold_case(c) == q) else {
                return MatchResult::no_match();
            };
            indices.push(cursor + offset);
            cursor += offset + 1;
        }

        let score = score_indices(&label, &indices);
        MatchResult {
            matched: true,
            score,
            indices,
        }
    }

    /// Matching items sorted by score, best first. Equal scores keep input order.
    pub fn filter<'a, T, F>(&self, query: &str, items: &'a [T], label_of: F) -> Vec<FuzzyMatch<&'a T>>
    where
        F: Fn(&T) -> &str,
    {
        let mut matches: Vec<FuzzyMatch<&'a T>> = items
            .iter()
            .filter_map(|item| {
                let result = self.match_label(query, label_of(item));
                result.matched.then_some(FuzzyMatch { item, result })
            })
            .collect();

        matches.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        matches
    }
}

fn fold_case(ch: char) -> char {
    if ch.is_ascii() {
        ch.to_ascii_lowercase()
    } else {
        ch.to_lowercase().next().unwrap_or(ch)
    }
}

fn is_separator(ch: char) -> bool {
    ch == '_' || !ch.is_xid_continue()
}

fn is_word_boundary(label: &[char], idx: usize) -> bool {
    let Some(prev_idx) = idx.checked_sub(1) else {
        return true;
    };
    let prev = label[prev_idx];
    let ch = label[idx];
    is_separator(prev) || (prev.is_lowercase() && ch.is_uppercase())
}

fn clamp_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn score_indices(label: &[char], indices: &[usize]) -> i32 {
    let mut score = 0i32;
    let mut prev: Option<usize> = None;

    for &idx in indices {
        score = score.saturating_add(SCORE_MATCH);
        if idx == 0 {
            score = score.saturating_add(BONUS_START);
        } else if is_word_boundary(label, idx) {
            score = score.saturating_add(BONUS_BOUNDARY);
        }

        match prev {
            Some(p) if idx == p + 1 => score = score.saturating_add(BONUS_CONSECUTIVE),
            Some(p) => {
                let extra = clamp_i32(idx - p - 2);
                let penalty =
                    PENALTY_GAP_START.saturating_add(PENALTY_GAP_EXTENSION.saturating_mul(extra));
                score = score.saturating_sub(penalty);
            }
            None => score = score.saturating_sub(clamp_i32(idx).min(PENALTY_LEADING_GAP_MAX)),
        }
        prev = Some(idx);
    }

    score
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/fuzzy.rs"]
mod tests;
