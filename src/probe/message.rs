//! Classification of frames received from the plugin

use serde_json::Value;

use crate::constants::{WS_TYPE_FIELD, WS_TYPE_GET_PLAYER, WS_TYPE_USERNAME_CHANGED};

/// A received frame, sorted by its `_wsType` discriminator
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryMessage {
    /// The player logged in or switched accounts. `None` when the field is missing
    /// or not a string.
    UsernameChanged { username: Option<String> },

    /// Player data worth saving. Holds the whole decoded message.
    GetPlayer(Value),

    /// Valid JSON without a recognized discriminator
    Untagged(Value),

    /// Not JSON at all
    Raw(String),
}

impl DiscoveryMessage {
    pub fn parse(text: &str) -> Self {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(_) => return DiscoveryMessage::Raw(text.to_string()),
        };

        match value.get(WS_TYPE_FIELD).and_then(Value::as_str) {
            Some(WS_TYPE_USERNAME_CHANGED) => DiscoveryMessage::UsernameChanged {
                username: value
                    .get("username")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            Some(WS_TYPE_GET_PLAYER) => DiscoveryMessage::GetPlayer(value),
            _ => DiscoveryMessage::Untagged(value),
        }
    }
}

/// Whether a player data message carries `payload.loadouts`
pub fn has_loadouts(message: &Value) -> bool {
    message
        .get("payload")
        .and_then(|payload| payload.get("loadouts"))
        .is_some()
}

/// One occupied equipment slot of a loadout
#[derive(Debug, Clone, PartialEq)]
pub struct EquippedItem {
    pub slot: String,
    pub item_id: u64,
}

/// Equipped slots of the first loadout in `payload.loadouts[0].equipment`, in
/// wire order. Empty slots and slots without a positive numeric `id` are skipped.
pub fn first_loadout_equipment(message: &Value) -> Vec<EquippedItem> {
    let equipment = message
        .get("payload")
        .and_then(|payload| payload.get("loadouts"))
        .and_then(Value::as_array)
        .and_then(|loadouts| loadouts.first())
        .and_then(|loadout| loadout.get("equipment"))
        .and_then(Value::as_object);

    let Some(equipment) = equipment else {
        return Vec::new();
    };

    equipment
        .iter()
        .filter_map(|(slot, item)| {
            let item_id = item.get("id").and_then(Value::as_u64).filter(|id| *id > 0)?;
            Some(EquippedItem {
                slot: slot.clone(),
                item_id,
            })
        })
        .collect()
}

/// `head=10828, weapon=4151`, or `no equipped items`
pub fn describe_equipment(items: &[EquippedItem]) -> String {
    if items.is_empty() {
        return "no equipped items".to_string();
    }
    items
        .iter()
        .map(|item| format!("{}={}", item.slot, item.item_id))
        .collect::<Vec<_>>()
        .join(", ")
}
