use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactStatus {
    pub contact: String,
    pub status: String,
}

/// Shared by SOS alerts, location shares and check-ins. The latter two name
/// their contact list `contacts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SosReceipt {
    pub message: String,
    pub location_link: Option<String>,
    pub timestamp: Option<String>,
    #[serde(alias = "contacts")]
    pub contacts_alerted: Option<Vec<ContactStatus>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SosEvent {
    pub timestamp: String,
    pub user_name: String,
    #[serde(default)]
    pub message: String,
    /// Number of contacts the alert went out to.
    pub contacts_alerted: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SosHistory {
    pub history: Vec<SosEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    #[serde(default)]
    pub contacts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub status: String,
}
