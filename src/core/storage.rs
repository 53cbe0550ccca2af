//! # Local Storage
//!
//! A tiny persistent string map, the terminal stand-in for a browser's
//! `localStorage`. Lives at `~/.msgfeed/storage.json` by default.
//!
//! Every mutation rewrites the whole file with an atomic rename (write
//! `.tmp`, then `rename()`), so a crash never leaves a half-written token.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USERNAME_KEY: &str = "username";

/// Returns `~/.msgfeed/storage.json`.
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".msgfeed").join("storage.json"))
}

#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Opens the store at `path`. A missing file is an empty store; a file
    /// that can't be read or parsed is logged and also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        debug!("Opened storage at {} ({} keys)", path.display(), items.len());
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.persist()
    }

    pub fn remove_item(&mut self, key: &str) -> io::Result<()> {
        if self.items.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.get_item(TOKEN_KEY)
    }

    pub fn role(&self) -> Option<&str> {
        self.get_item(ROLE_KEY)
    }

    pub fn username(&self) -> Option<&str> {
        self.get_item(USERNAME_KEY)
    }

    /// Drops the credentials written at login. Used by logout and by the
    /// feed's blanket "any fetch error means log in again" rule.
    pub fn clear_session(&mut self) -> io::Result<()> {
        let mut changed = false;
        for key in [TOKEN_KEY, ROLE_KEY, USERNAME_KEY] {
            changed |= self.items.remove(key).is_some();
        }
        if changed {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
