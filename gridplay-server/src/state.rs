//! Server state management
//!
//! One engine session shared by every request.

use gridplay_core::{Session, Settings};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ApiError;

/// Server-wide shared state
pub struct ServerState {
    pub session: RwLock<Session>,
    /// Defaults for requests that leave fields out
    pub settings: Settings,
}

impl ServerState {
    pub fn new() -> Self {
        Self::from_settings(Settings::default())
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self {
            session: RwLock::new(Session::from_settings(&settings)),
            settings,
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Session>, ApiError> {
        self.session.read().map_err(|_| ApiError::LockPoisoned)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Session>, ApiError> {
        self.session.write().map_err(|_| ApiError::LockPoisoned)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
