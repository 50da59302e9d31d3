//! Headless search core: matcher, debounce, search box, tree decorator and
//! exclude rules.

pub mod debounce;
pub mod exclude;
pub mod fuzzy;
pub mod navigator_search;
pub mod search_box;
pub mod services;

pub use debounce::SearchBoxDebounce;
pub use exclude::ExcludeFilter;
pub use fuzzy::{FuzzyMatch, FuzzySearch, MatchResult};
pub use navigator_search::{Decoration, DecorationSet, NavigatorSearch};
pub use search_box::{
    KeyOutcome, SearchBox, SearchBoxEvent, SearchBoxKey, SearchBoxProps, TimerRequest,
};
