use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
};

use ::log::debug;
use simple531_app::{KEY_LOG, KEY_SETTINGS, log};
use simple531_domain as domain;

use crate::dto;

/// Stores each key as a JSON file in one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Replaces the file atomically by writing a sibling and renaming it.
    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)
    }
}

impl domain::SettingsRepository for FileStorage {
    fn read_settings(&self) -> Result<Option<domain::ProgramSettings>, domain::ReadError> {
        match self.read(KEY_SETTINGS).map_err(domain::StorageError::from)? {
            Some(json) => dto::decode(&json).map(Some),
            None => Ok(None),
        }
    }

    fn write_settings(&self, settings: &domain::ProgramSettings) -> Result<(), domain::WriteError> {
        let json = dto::encode(settings)?;
        self.write(KEY_SETTINGS, &json)
            .map_err(domain::StorageError::from)?;
        debug!("wrote settings to {}", self.path(KEY_SETTINGS).display());
        Ok(())
    }
}

impl log::Repository for FileStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.read(KEY_LOG) {
            Ok(Some(json)) => {
                serde_json::from_str(&json).map_err(|err| log::Error::Storage(err.to_string()))
            }
            Ok(None) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Storage(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        log::push_entry(&mut entries, entry);
        let json =
            serde_json::to_string(&entries).map_err(|err| log::Error::Storage(err.to_string()))?;
        self.write(KEY_LOG, &json)
            .map_err(|err| log::Error::Storage(err.to_string()))
    }
}
