//! Localized chat replies
//!
//! English messages are compiled in. Server owners can edit or translate them
//! through `lang/<code>/DynamicThirdPerson.json` next to the config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{config as paths, lang::DEFAULT_LANGUAGE, plugin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LangKey {
    NoPermission,
    ToggleSuccess,
    AdminToggleDenied,
    CommandSyntaxError,
    ThirdPersonCommandDisabled,
}

impl LangKey {
    pub const ALL: [LangKey; 5] = [
        Self::NoPermission,
        Self::ToggleSuccess,
        Self::AdminToggleDenied,
        Self::CommandSyntaxError,
        Self::ThirdPersonCommandDisabled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoPermission => "NoPermission",
            Self::ToggleSuccess => "ToggleSuccess",
            Self::AdminToggleDenied => "AdminToggleDenied",
            Self::CommandSyntaxError => "CommandSyntaxError",
            Self::ThirdPersonCommandDisabled => "ThirdPersonCommandDisabled",
        }
    }

    /// English text; `{0}` is a positional argument
    pub fn default_message(self) -> &'static str {
        match self {
            Self::NoPermission => "You do not have permission to use this command.",
            Self::ToggleSuccess => "You have switched to {0} view.",
            Self::AdminToggleDenied => "You cannot use this command as an admin.",
            Self::CommandSyntaxError => "Syntax error. Correct usage: {0}.",
            Self::ThirdPersonCommandDisabled => "You cannot use this command in the current mode.",
        }
    }
}

fn default_messages() -> BTreeMap<String, String> {
    LangKey::ALL
        .iter()
        .map(|key| (key.as_str().to_string(), key.default_message().to_string()))
        .collect()
}

/// Messages per language code
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    languages: HashMap<String, BTreeMap<String, String>>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut catalog = Self {
            languages: HashMap::new(),
        };
        catalog.register_messages(DEFAULT_LANGUAGE, default_messages());
        catalog
    }
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations override earlier ones key by key
    pub fn register_messages(
        &mut self,
        language: &str,
        messages: impl IntoIterator<Item = (String, String)>,
    ) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .extend(messages);
    }

    #[cfg(test)]
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Falls back to English, then to the key name itself
    pub fn get_message(&self, key: LangKey, language: Option<&str>) -> &str {
        let lookup = |code: &str| {
            self.languages
                .get(code)
                .and_then(|messages| messages.get(key.as_str()))
        };

        language
            .and_then(lookup)
            .or_else(|| lookup(DEFAULT_LANGUAGE))
            .map(String::as_str)
            .unwrap_or(key.as_str())
    }

    /// Message with `{0}`, `{1}`, ... replaced by `args`
    pub fn format(&self, key: LangKey, language: Option<&str>, args: &[&str]) -> String {
        let mut message = self.get_message(key, language).to_string();
        for (index, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }
}

/// Lang files on disk
#[derive(Debug, Clone)]
pub struct LangStore {
    root: PathBuf,
}

impl LangStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `dir/<app dir>/lang`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(paths::APP_DIR).join(paths::LANG_DIR))
    }

    pub fn file_path(&self, language: &str) -> PathBuf {
        self.root
            .join(language)
            .join(format!("{}.json", plugin::NAME))
    }

    /// Write missing English keys to disk, then load every language found.
    /// Unreadable files are skipped and left untouched.
    pub fn sync(&self, catalog: &mut MessageCatalog) -> Result<()> {
        self.write_default_language()?;

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.root.display(), error = %e, "Cannot list lang directory");
                return Ok(());
            }
        };

        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let language = entry.file_name().to_string_lossy().into_owned();
            if let Some(messages) = self.read_language(&language) {
                debug!(language = %language, count = messages.len(), "Loaded lang file");
                catalog.register_messages(&language, messages);
            }
        }

        Ok(())
    }

    fn read_language(&self, language: &str) -> Option<BTreeMap<String, String>> {
        let path = self.file_path(language);
        let contents = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&contents)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "Failed to parse lang file, skipping"))
            .ok()
    }

    fn write_default_language(&self) -> Result<()> {
        let path = self.file_path(DEFAULT_LANGUAGE);

        let mut messages = if path.exists() {
            match self.read_language(DEFAULT_LANGUAGE) {
                Some(messages) => messages,
                // leave a broken file for the owner to fix
                None => return Ok(()),
            }
        } else {
            BTreeMap::new()
        };

        let before = messages.len();
        for (key, message) in default_messages() {
            messages.entry(key).or_insert(message);
        }
        if messages.len() == before && path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create lang directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&messages).context("Failed to serialize messages")?;
        fs::write(&path, json).with_context(|| format!("Failed to write lang file {}", path.display()))?;

        info!(path = %path.display(), added = messages.len() - before, "Updated default lang file");
        Ok(())
    }
}
