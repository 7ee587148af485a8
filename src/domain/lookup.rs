//! Reference data used to populate filters and selects.

use serde::{Deserialize, Serialize};

/// Category, ingredient function or country entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupEntry {
    pub id: String,
    pub name: String,
}

/// Third-party formulation provider selectable in the wizard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}
