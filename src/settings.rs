//! Persistent defaults stored alongside the mirror tree.
//!
//! A small INI file (`.git-mirror.conf`) in the base directory remembers
//! the gitolite-admin URL, checkout location, and reader defaults so they
//! do not have to be repeated on every invocation. `find_base_dir` lets
//! commands run from anywhere inside a mirror tree.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::Result;

/// Settings file name inside the base directory.
pub const SETTINGS_FILENAME: &str = ".git-mirror.conf";

const SECTION: &str = "git-mirror";

/// Path to the settings file inside `base_dir`.
pub fn settings_path(base_dir: &Path) -> PathBuf {
    base_dir.join(SETTINGS_FILENAME)
}

/// Load settings from `base_dir`; a missing file yields empty settings.
pub fn load(base_dir: &Path) -> Result<Ini> {
    let path = settings_path(base_dir);
    if path.exists() {
        Ok(Ini::load_from_file(&path)?)
    } else {
        Ok(Ini::new())
    }
}

/// Return the stored value for `key`, if any.
pub fn get_value(base_dir: &Path, key: &str) -> Result<Option<String>> {
    let conf = load(base_dir)?;
    Ok(conf.get_from(Some(SECTION), key).map(String::from))
}

/// Store `key = value`, creating the settings file if needed.
pub fn set_value(base_dir: &Path, key: &str, value: &str) -> Result<()> {
    let mut conf = load(base_dir)?;
    conf.with_section(Some(SECTION)).set(key, value);
    conf.write_to_file(settings_path(base_dir))?;
    Ok(())
}

/// Search upward from `start` for a directory containing the settings
/// file. Returns the directory, or `None` when no settings exist on the
/// way to the filesystem root.
pub fn find_base_dir(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if settings_path(dir).exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
