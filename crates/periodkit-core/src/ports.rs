//! External capabilities used by the period controller.
//!
//! The controller never touches browser storage, the address bar or the
//! data-fetching layer directly. Each of them is a trait here, with an
//! in-memory implementation for tests and command-line replays. The
//! in-memory types are cheap handles: clones share the same contents, so a
//! test can keep one clone and inspect what the controller wrote.
//!
//! The controller is single-threaded, so the handles use `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::models::WeekId;

/// Persistent key-value storage that survives reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// URL query parameters of the current page.
pub trait QueryParamStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
    fn remove(&self, name: &str);
}

/// The backend's notion of the most recent week with a finished report.
pub trait CompletedWeekProvider {
    fn last_completed_week(&self) -> WeekId;
}

impl<F> CompletedWeekProvider for F
where
    F: Fn() -> WeekId,
{
    fn last_completed_week(&self) -> WeekId {
        self()
    }
}

/// Cache invalidation signal sent to the data-fetching layer.
pub trait CacheInvalidator {
    fn invalidate(&self, tag: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryKeyValueStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        MemoryKeyValueStore {
            entries: Rc::new(RefCell::new(entries)),
        }
    }
}

/// In-memory [`QueryParamStore`].
///
/// Parameters are kept sorted by name, so [`MemoryQueryParams::to_query`]
/// is deterministic. Values are taken verbatim; period identifiers never
/// need percent-encoding.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryParams {
    params: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2`, with or without a leading `?`. Pairs without `=`
    /// are kept with an empty value; empty segments are skipped.
    pub fn from_query(query: &str) -> Self {
        let params = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        MemoryQueryParams {
            params: Rc::new(RefCell::new(params)),
        }
    }

    /// Render as `a=1&b=2`.
    pub fn to_query(&self) -> String {
        self.params
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn params(&self) -> BTreeMap<String, String> {
        self.params.borrow().clone()
    }
}

impl QueryParamStore for MemoryQueryParams {
    fn get(&self, name: &str) -> Option<String> {
        self.params.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.params
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove(&self, name: &str) {
        self.params.borrow_mut().remove(name);
    }
}

/// [`CacheInvalidator`] that records every tag it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvalidator {
    tags: Rc<RefCell<Vec<String>>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags received so far, in order.
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }
}

impl CacheInvalidator for RecordingInvalidator {
    fn invalidate(&self, tag: &str) {
        self.tags.borrow_mut().push(tag.to_string());
    }
}
