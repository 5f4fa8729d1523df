//! Per-connection context and message dispatch

use std::path::PathBuf;

use log::{info, warn};

use crate::constants::DEFAULT_USERNAME;
use crate::logging::preview;
use crate::probe::message::{
    DiscoveryMessage, EquippedItem, describe_equipment, first_loadout_equipment, has_loadouts,
};
use crate::probe::persist::Persister;

/// State carried across the messages of one connection
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    username: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last username reported by the plugin, or the placeholder
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }
}

/// What [`dispatch`] did with a frame
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    UsernameUpdated(String),
    Saved {
        path: PathBuf,
        has_loadouts: bool,
        /// Occupied slots of the first loadout
        equipped: Vec<EquippedItem>,
    },
    SaveFailed,
    Ignored,
    NotJson,
}

/// Handle one received text frame
pub async fn dispatch(text: &str, session: &mut Session, persister: &Persister) -> Dispatched {
    info!("Received: {}", preview(text));

    match DiscoveryMessage::parse(text) {
        DiscoveryMessage::UsernameChanged { username } => {
            session.set_username(username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()));
            info!("Detected username: {}", session.username());
            Dispatched::UsernameUpdated(session.username().to_string())
        }
        DiscoveryMessage::GetPlayer(message) => {
            let loadouts = has_loadouts(&message);
            let equipped = first_loadout_equipment(&message);
            let result = persister.save(session, &message).await;
            if loadouts {
                info!("Found loadout data: {}", describe_equipment(&equipped));
            }
            match result {
                Ok(path) => {
                    info!("Saved player data to {}", path.display());
                    Dispatched::Saved {
                        path,
                        has_loadouts: loadouts,
                        equipped,
                    }
                }
                Err(e) => {
                    warn!("Error saving data: {}", e);
                    Dispatched::SaveFailed
                }
            }
        }
        DiscoveryMessage::Untagged(_) => Dispatched::Ignored,
        DiscoveryMessage::Raw(raw) => {
            info!("Raw (not JSON): {}", preview(&raw));
            Dispatched::NotJson
        }
    }
}
