//! System namespace (power management)

use serde_json::Value;

use crate::kodi::{KodiError, Session};

impl Session {
    pub async fn hibernate(&self) -> Result<(), KodiError> {
        self.call_unit("System.Hibernate", Value::Null).await
    }

    pub async fn reboot(&self) -> Result<(), KodiError> {
        self.call_unit("System.Reboot", Value::Null).await
    }

    pub async fn shutdown(&self) -> Result<(), KodiError> {
        self.call_unit("System.Shutdown", Value::Null).await
    }

    pub async fn suspend(&self) -> Result<(), KodiError> {
        self.call_unit("System.Suspend", Value::Null).await
    }
}
