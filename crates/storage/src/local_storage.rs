use std::collections::VecDeque;

use gloo_storage::{Storage as GlooStorage, errors::StorageError};
use simple531_app::{KEY_LOG, KEY_SETTINGS, log};
use simple531_domain as domain;

use crate::dto;

/// Browser local storage, keyed like the file store.
pub struct LocalStorage;

impl domain::SettingsRepository for LocalStorage {
    fn read_settings(&self) -> Result<Option<domain::ProgramSettings>, domain::ReadError> {
        match gloo_storage::LocalStorage::get::<dto::Settings>(KEY_SETTINGS) {
            Ok(settings) => domain::ProgramSettings::try_from(settings)
                .map(Some)
                .map_err(|err| domain::ReadError::Malformed(err.to_string())),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => {
                Err(domain::ReadError::Malformed(err.to_string()))
            }
            Err(err) => Err(domain::StorageError::Other(Box::new(err)).into()),
        }
    }

    fn write_settings(&self, settings: &domain::ProgramSettings) -> Result<(), domain::WriteError> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, dto::Settings::from(settings))
            .map_err(|err| domain::StorageError::Other(Box::new(err)).into())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(StorageError::KeyNotFound(_)) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Storage(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        log::push_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Storage(err.to_string()))
    }
}
