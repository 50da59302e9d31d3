//! Tree decorator driven by settled search box queries.

use crate::kernel::fuzzy::FuzzySearch;
use crate::models::SnapshotNode;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub matched: bool,
    pub visible: bool,
    pub score: i32,
    /// Char ranges of the label to highlight.
    pub highlights: Vec<Range<usize>>,
}

impl Decoration {
    fn hidden() -> Self {
        Self {
            matched: false,
            visible: false,
            score: 0,
            highlights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecorationSet<Id> {
    query: String,
    decorations: FxHashMap<Id, Decoration>,
    positions: FxHashMap<Id, usize>,
    // matched ids in tree order
    matches: Vec<Id>,
    ranked: Vec<Id>,
    reveal: Vec<Id>,
}

impl<Id> Default for DecorationSet<Id> {
    fn default() -> Self {
        Self {
            query: String::new(),
            decorations: FxHashMap::default(),
            positions: FxHashMap::default(),
            matches: Vec::new(),
            ranked: Vec::new(),
            reveal: Vec::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> DecorationSet<Id> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn get(&self, id: Id) -> Option<&Decoration> {
        self.decorations.get(&id)
    }

    /// Undecorated nodes keep their default, visible state.
    pub fn is_visible(&self, id: Id) -> bool {
        self.decorations.get(&id).map(|d| d.visible).unwrap_or(true)
    }

    pub fn is_match(&self, id: Id) -> bool {
        self.decorations.get(&id).is_some_and(|d| d.matched)
    }

    /// Matched ids, best score first; equal scores keep tree order.
    pub fn ranked(&self) -> &[Id] {
        &self.ranked
    }

    /// Matched ids in tree order.
    pub fn matches(&self) -> &[Id] {
        &self.matches
    }

    /// Ancestors of matched nodes that must be expanded to show them.
    pub fn ancestors_to_expand(&self) -> &[Id] {
        &self.reveal
    }

    fn same_decorations(&self, other: &Self) -> bool {
        self.query == other.query && self.decorations == other.decorations
    }
}

pub struct NavigatorSearch<Id> {
    fuzzy: FuzzySearch,
    decorations: DecorationSet<Id>,
}

impl<Id: Copy + Eq + Hash> NavigatorSearch<Id> {
    pub fn new(fuzzy: FuzzySearch) -> Self {
        Self {
            fuzzy,
            decorations: DecorationSet::default(),
        }
    }

    pub fn decorations(&self) -> &DecorationSet<Id> {
        &self.decorations
    }

    pub fn decoration(&self, id: Id) -> Option<&Decoration> {
        self.decorations.get(id)
    }

    pub fn is_active(&self) -> bool {
        !self.decorations.query.is_empty()
    }

    /// Drops every decoration. Returns whether anything was decorated before.
    pub fn clear(&mut self) -> bool {
        let changed = self.is_active() || !self.decorations.is_empty();
        self.decorations = DecorationSet::default();
        changed
    }

    /// Recomputes decorations for `query` over `snapshot`. Nodes without a
    /// label are skipped. Returns whether the decoration set changed.
    pub fn apply_query(&mut self, query: &str, snapshot: &[SnapshotNode<Id>]) -> bool {
        if query.is_empty() {
            return self.clear();
        }

        let mut next = DecorationSet {
            query: query.to_string(),
            ..DecorationSet::default()
        };
        let mut parents: FxHashMap<Id, Option<Id>> = FxHashMap::default();
        let mut skipped = 0usize;

        for (pos, node) in snapshot.iter().enumerate() {
            next.positions.entry(node.id).or_insert(pos);
            parents.insert(node.id, node.parent);

            let Some(label) = node.label.as_deref() else {
                skipped += 1;
                continue;
            };

            let result = self.fuzzy.match_label(query, label);
            if !result.matched {
                next.decorations.insert(node.id, Decoration::hidden());
                continue;
            }

            next.decorations.insert(
                node.id,
                Decoration {
                    matched: true,
                    visible: true,
                    score: result.score,
                    highlights: result.ranges(),
                },
            );
            next.matches.push(node.id);
        }

        let mut revealed: FxHashSet<Id> = FxHashSet::default();
        for &id in &next.matches {
            if !revealed.insert(id) {
                continue;
            }
            let mut current = parents.get(&id).copied().flatten();
            while let Some(ancestor) = current {
                // ancestors outside the snapshot stay undecorated
                if !parents.contains_key(&ancestor) || !revealed.insert(ancestor) {
                    break;
                }
                next.decorations
                    .entry(ancestor)
                    .or_insert_with(Decoration::hidden)
                    .visible = true;
                next.reveal.push(ancestor);
                current = parents.get(&ancestor).copied().flatten();
            }
        }

        let mut ranked = next.matches.clone();
        ranked.sort_by(|a, b| {
            let score_a = next.decorations.get(a).map(|d| d.score).unwrap_or(0);
            let score_b = next.decorations.get(b).map(|d| d.score).unwrap_or(0);
            score_b.cmp(&score_a)
        });
        next.ranked = ranked;

        if skipped > 0 {
            tracing::debug!(skipped, "navigator search skipped nodes without labels");
        }
        tracing::debug!(
            query,
            nodes = snapshot.len(),
            matches = next.matches.len(),
            "navigator search applied"
        );

        let changed = !next.same_decorations(&self.decorations);
        self.decorations = next;
        changed
    }

    pub fn first_match(&self) -> Option<Id> {
        self.decorations.ranked.first().copied()
    }

    /// Next match after `from` in tree order, wrapping around.
    pub fn next_match(&self, from: Option<Id>) -> Option<Id> {
        let matches = &self.decorations.matches;
        let first = *matches.first()?;
        let Some(from_pos) = from.and_then(|id| self.decorations.positions.get(&id).copied())
        else {
            return Some(first);
        };
        Some(
            matches
                .iter()
                .copied()
                .find(|id| self.position(*id) > from_pos)
                .unwrap_or(first),
        )
    }

    /// Previous match before `from` in tree order, wrapping around.
    pub fn previous_match(&self, from: Option<Id>) -> Option<Id> {
        let matches = &self.decorations.matches;
        let last = *matches.last()?;
        let Some(from_pos) = from.and_then(|id| self.decorations.positions.get(&id).copied())
        else {
            return Some(last);
        };
        Some(
            matches
                .iter()
                .rev()
                .copied()
                .find(|id| self.position(*id) < from_pos)
                .unwrap_or(last),
        )
    }

    fn position(&self, id: Id) -> usize {
        self.decorations
            .positions
            .get(&id)
            .copied()
            .unwrap_or(usize::MAX)
    }
}

impl<Id: Copy + Eq + Hash> Default for NavigatorSearch<Id> {
    fn default() -> Self {
        Self::new(FuzzySearch::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/navigator_search.rs"]
mod tests;
