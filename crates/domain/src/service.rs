use log::{debug, error, warn};

use crate::{ProgramSettings, ReadError, SettingsRepository, SettingsService, WriteError};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn load_settings(&self) -> Result<ProgramSettings, ReadError> {
        match self.repository.read_settings() {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => {
                debug!("no stored settings, using defaults");
                Ok(ProgramSettings::default())
            }
            Err(ReadError::Malformed(message)) => {
                warn!("discarding malformed settings: {message}");
                Ok(ProgramSettings::default())
            }
            Err(err) => {
                error!("failed to load settings: {err}");
                Err(err)
            }
        }
    }

    fn set_settings(&self, settings: &ProgramSettings) -> Result<(), WriteError> {
        log_on_error!(
            self.repository.write_settings(settings),
            "set",
            "settings"
        )
    }
}
