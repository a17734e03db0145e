use serde::{Deserialize, Serialize};

/// Operational configuration owned by the remote authority.
///
/// Frequencies are opaque intervals; the agent never interprets their unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    /// Whether the device's operational loop is active.
    pub turned_on: bool,
    /// Interval between data-collection cycles.
    pub collect_freq: i64,
    /// Interval between data-transmission cycles.
    pub send_freq: i64,
}

/// A decoded inbound patch. Absent fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    /// New on/off state, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turned_on: Option<bool>,
    /// New collection interval, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_freq: Option<i64>,
    /// New transmission interval, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_freq: Option<i64>,
}

impl ConfigPatch {
    /// Produces the record that results from applying this patch to `current`.
    pub fn merge_onto(&self, current: &ConfigRecord) -> ConfigRecord {
        ConfigRecord {
            turned_on: self.turned_on.unwrap_or(current.turned_on),
            collect_freq: self.collect_freq.unwrap_or(current.collect_freq),
            send_freq: self.send_freq.unwrap_or(current.send_freq),
        }
    }

    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.turned_on.is_none() && self.collect_freq.is_none() && self.send_freq.is_none()
    }
}

/// Direction of an on/off change between two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTransition {
    /// Device went from off to on.
    TurnedOn,
    /// Device went from on to off.
    TurnedOff,
    /// On/off state did not change.
    Unchanged,
}

impl PowerTransition {
    /// Compares the stored state with an incoming one.
    pub fn between(previous: &ConfigRecord, incoming: &ConfigRecord) -> Self {
        match (previous.turned_on, incoming.turned_on) {
            (false, true) => Self::TurnedOn,
            (true, false) => Self::TurnedOff,
            _ => Self::Unchanged,
        }
    }
}
