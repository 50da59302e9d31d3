//! 导航器：组装树、搜索框、装饰器与定时器
//!
//! 职责：
//! - 把按键交给 SearchBox，并同步异步定时器
//! - 定时器到期后把稳定的查询交给 NavigatorSearch
//! - 输出带装饰的可见行

use crate::kernel::services::adapters::{NavigatorMessage, SearchBoxId, SearchRuntime};
use crate::kernel::services::ports::{ConfigError, SearchSettings, Settings};
use crate::kernel::{
    Decoration, ExcludeFilter, NavigatorSearch, SearchBox, SearchBoxEvent, SearchBoxKey, SearchBoxProps,
    TimerRequest,
};
use crate::models::{NavigatorTree, NodeId, TreeRow};
use std::fmt;
use std::io;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const NAVIGATOR_BOX: SearchBoxId = SearchBoxId(0);

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Io(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Io(e) => write!(f, "failed to start timer runtime: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct DecoratedRow {
    pub row: TreeRow,
    pub decoration: Option<Decoration>,
}

impl DecoratedRow {
    pub fn highlights(&self) -> &[Range<usize>] {
        self.decoration
            .as_ref()
            .map(|d| d.highlights.as_slice())
            .unwrap_or(&[])
    }
}

pub struct NavigatorApp {
    tree: NavigatorTree,
    search_box: SearchBox,
    search: NavigatorSearch<NodeId>,
    settings: SearchSettings,
    exclude: ExcludeFilter,
    runtime: SearchRuntime,
    rx: Receiver<NavigatorMessage>,
    selected: Option<NodeId>,
}

impl NavigatorApp {
    pub fn new(tree: NavigatorTree, settings: Settings) -> Result<Self, AppError> {
        let search_box = SearchBox::new(SearchBoxProps::with_delay_ms(settings.search.delay))?;
        let exclude = settings.exclude_filter()?;
        let (tx, rx) = mpsc::channel();
        let runtime = SearchRuntime::new(tx)?;

        Ok(Self {
            tree,
            search_box,
            search: NavigatorSearch::default(),
            settings: settings.search,
            exclude,
            runtime,
            rx,
            selected: None,
        })
    }

    pub fn tree(&self) -> &NavigatorTree {
        &self.tree
    }

    pub fn search_box(&self) -> &SearchBox {
        &self.search_box
    }

    pub fn search(&self) -> &NavigatorSearch<NodeId> {
        &self.search
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Returns whether visible state changed.
    pub fn handle_key(&mut self, key: SearchBoxKey, now: Instant) -> bool {
        let outcome = self.search_box.handle_key(key, now);

        match outcome.timer {
            Some(TimerRequest::Arm {
                generation,
                deadline,
            }) => self
                .runtime
                .arm_debounce(NAVIGATOR_BOX, generation, deadline),
            Some(TimerRequest::Cancel) => {
                self.runtime.cancel_debounce(NAVIGATOR_BOX);
            }
            None => {}
        }

        let event_changed = match outcome.event {
            Some(event) => self.handle_event(event),
            None => false,
        };
        outcome.changed || event_changed
    }

    /// Waits up to `timeout` for one runtime message and applies it.
    /// Returns whether a settled query was applied.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(NavigatorMessage::DebounceElapsed { box_id, generation }) => {
                if box_id != NAVIGATOR_BOX {
                    return false;
                }
                match self.search_box.fire(generation, Instant::now()) {
                    Some(event) => {
                        self.handle_event(event);
                        true
                    }
                    None => false,
                }
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("timer runtime disconnected");
                false
            }
        }
    }

    /// Tick-loop alternative to `pump`: emits when the deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_box.poll(now) {
            Some(event) => {
                self.runtime.cancel_debounce(NAVIGATOR_BOX);
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    fn handle_event(&mut self, event: SearchBoxEvent) -> bool {
        match event {
            SearchBoxEvent::Query(query) => self.apply_query(&query),
            SearchBoxEvent::Closed => {
                let changed = self.search.clear() | self.clear_selection();
                tracing::debug!(changed, "navigator search closed");
                changed
            }
            SearchBoxEvent::Next => self.select(self.search.next_match(self.selected)),
            SearchBoxEvent::Previous => self.select(self.search.previous_match(self.selected)),
        }
    }

    fn apply_query(&mut self, query: &str) -> bool {
        let exclude = &self.exclude;
        let snapshot = self
            .tree
            .snapshot_filtered(!self.settings.include_collapsed, |path| {
                exclude.is_excluded(path)
            });
        let mut changed = self.search.apply_query(query, &snapshot);

        if self.settings.reveal_matches {
            let ancestors = self.search.decorations().ancestors_to_expand().to_vec();
            for id in ancestors {
                changed |= !self.tree.is_expanded(id);
                self.tree.expand(id);
            }
        }

        changed |= match self.search.first_match() {
            Some(first) => self.select(Some(first)),
            None => self.clear_selection(),
        };

        tracing::info!(
            query,
            matches = self.search.decorations().matches().len(),
            "navigator filter updated"
        );
        changed
    }

    fn select(&mut self, id: Option<NodeId>) -> bool {
        if id.is_none() || id == self.selected {
            return false;
        }
        self.selected = id;
        true
    }

    fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Rows in view order with their decorations. Excluded nodes never show
    /// up. Unmatched rows are dropped while a search is active and
    /// `hide_unmatched` is set.
    pub fn rows(&self) -> Vec<DecoratedRow> {
        let decorations = self.search.decorations();
        let filtering = self.search.is_active() && self.settings.hide_unmatched;

        self.tree
            .flatten_for_view_filtered(|path| self.exclude.is_excluded(path))
            .into_iter()
            .filter(|row| !filtering || decorations.is_visible(row.id))
            .map(|row| DecoratedRow {
                decoration: decorations.get(row.id).cloned(),
                row,
            })
            .collect()
    }
}

/// Wraps highlighted char ranges of `label` in `[` `]`.
pub fn render_label(label: &str, highlights: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(label.len() + highlights.len() * 2);
    let mut ranges = highlights.iter().peekable();

    for (i, ch) in label.chars().enumerate() {
        while ranges.peek().is_some_and(|r| r.end <= i) {
            ranges.next();
        }
        let current = ranges.peek();
        if current.is_some_and(|r| r.start == i) {
            out.push('[');
        }
        out.push(ch);
        if current.is_some_and(|r| r.end == i + 1) {
            out.push(']');
        }
    }
    out
}
