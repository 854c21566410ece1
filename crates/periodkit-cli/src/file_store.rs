use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use periodkit_core::ports::KeyValueStore;
use tracing::{debug, warn};

/// Preferences persisted as a flat JSON object of strings.
///
/// A missing file starts empty. An unreadable or corrupted file is logged
/// and treated as empty; the next write replaces it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring stored preferences");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), count = entries.len(), "preferences loaded");

        JsonFileStore {
            path,
            entries: Rc::new(RefCell::new(entries)),
        }
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&*self.entries.borrow())?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read preferences: {}", path.display()));
        }
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Corrupted preferences file: {}", path.display()))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        if let Err(err) = self.save() {
            warn!(error = %format!("{err:#}"), "preference not persisted");
        }
    }
}
