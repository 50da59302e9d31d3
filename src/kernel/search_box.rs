use crate::kernel::debounce::SearchBoxDebounce;
use crate::kernel::services::ports::config::{ConfigError, SearchBoxDebounceOptions};
use std::time::Instant;

/// Construction properties for a search box. `delay_ms` falls back to the
/// default debounce delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBoxProps {
    pub delay_ms: Option<u64>,
}

impl SearchBoxProps {
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            delay_ms: Some(delay_ms),
        }
    }

    fn debounce_options(&self) -> SearchBoxDebounceOptions {
        match self.delay_ms {
            Some(delay_ms) => SearchBoxDebounceOptions { delay_ms },
            None => SearchBoxDebounceOptions::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBoxKey {
    Char(char),
    Backspace,
    Escape,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBoxEvent {
    Query(String),
    Next,
    Previous,
    Closed,
}

/// What a key did to the debounce timer, so the host can keep an external
/// timer in sync with the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    Arm { generation: u64, deadline: Instant },
    Cancel,
}

#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub event: Option<SearchBoxEvent>,
    pub timer: Option<TimerRequest>,
    pub changed: bool,
}

#[derive(Debug)]
pub struct SearchBox {
    debounce: SearchBoxDebounce,
    visible: bool,
}

impl SearchBox {
    pub fn new(props: SearchBoxProps) -> Result<Self, ConfigError> {
        Ok(Self {
            debounce: SearchBoxDebounce::new(props.debounce_options())?,
            visible: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        self.debounce.query()
    }

    pub fn debounce(&self) -> &SearchBoxDebounce {
        &self.debounce
    }

    pub fn handle_key(&mut self, key: SearchBoxKey, now: Instant) -> KeyOutcome {
        match key {
            SearchBoxKey::Char(ch) if ch.is_control() => KeyOutcome::default(),
            SearchBoxKey::Char(ch) => {
                self.visible = true;
                let deadline = self.debounce.append(ch, now);
                KeyOutcome {
                    event: None,
                    timer: Some(self.arm_request(deadline)),
                    changed: true,
                }
            }
            SearchBoxKey::Backspace => {
                if !self.visible {
                    return KeyOutcome::default();
                }
                match self.debounce.backspace(now) {
                    Some(deadline) => KeyOutcome {
                        event: None,
                        timer: Some(self.arm_request(deadline)),
                        changed: true,
                    },
                    None => KeyOutcome::default(),
                }
            }
            SearchBoxKey::Escape => {
                if !self.visible {
                    return KeyOutcome::default();
                }
                self.visible = false;
                self.debounce.clear();
                KeyOutcome {
                    event: Some(SearchBoxEvent::Closed),
                    timer: Some(TimerRequest::Cancel),
                    changed: true,
                }
            }
            SearchBoxKey::Up | SearchBoxKey::Down if !self.visible => KeyOutcome::default(),
            SearchBoxKey::Up => KeyOutcome {
                event: Some(SearchBoxEvent::Previous),
                timer: None,
                changed: false,
            },
            SearchBoxKey::Down => KeyOutcome {
                event: Some(SearchBoxEvent::Next),
                timer: None,
                changed: false,
            },
        }
    }

    pub fn poll(&mut self, now: Instant) -> Option<SearchBoxEvent> {
        self.debounce.poll(now).map(SearchBoxEvent::Query)
    }

    pub fn fire(&mut self, generation: u64, now: Instant) -> Option<SearchBoxEvent> {
        self.debounce.fire(generation, now).map(SearchBoxEvent::Query)
    }

    fn arm_request(&self, deadline: Instant) -> TimerRequest {
        TimerRequest::Arm {
            generation: self.debounce.generation(),
            deadline,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search_box.rs"]
mod tests;
