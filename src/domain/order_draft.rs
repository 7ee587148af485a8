//! The order draft accumulated by the creation wizard.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Packaging options offered on the packaging step.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PackagingType {
    FlaconPompe,
    Pot,
    Tube,
    FlaconSpray,
    Sachet,
    Stick,
}

impl PackagingType {
    pub const ALL: [PackagingType; 6] = [
        PackagingType::FlaconPompe,
        PackagingType::Pot,
        PackagingType::Tube,
        PackagingType::FlaconSpray,
        PackagingType::Sachet,
        PackagingType::Stick,
    ];

    /// Stable identifier used in forms and on the wire.
    pub fn id(self) -> &'static str {
        match self {
            PackagingType::FlaconPompe => "flacon-pompe",
            PackagingType::Pot => "pot",
            PackagingType::Tube => "tube",
            PackagingType::FlaconSpray => "flacon-spray",
            PackagingType::Sachet => "sachet",
            PackagingType::Stick => "stick",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PackagingType::FlaconPompe => "Flacon pompe",
            PackagingType::Pot => "Pot",
            PackagingType::Tube => "Tube",
            PackagingType::FlaconSpray => "Flacon spray",
            PackagingType::Sachet => "Sachet",
            PackagingType::Stick => "Stick",
        }
    }
}

impl Display for PackagingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PackagingType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PackagingType::ALL
            .into_iter()
            .find(|packaging| packaging.id() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("packaging type `{s}`")))
    }
}

/// A raw-material line item selected on the raw material step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Unsaved order assembled across the wizard steps.
///
/// Every field starts empty. Text fields hold whatever the user typed so the
/// form can be re-rendered as entered; the per-step validators decide when a
/// value is complete enough to move on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub final_result_family: String,
    pub final_result_name: String,
    pub final_result_quantity: u32,
    pub target_market: String,
    pub marketing_angle: String,
    pub formula: String,
    pub packaging_type: Option<PackagingType>,
    pub estimated_total_cost: f64,
    pub provider_id: String,
    pub order_items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_type_parses_known_ids() {
        assert_eq!(
            "flacon-pompe".parse::<PackagingType>().unwrap(),
            PackagingType::FlaconPompe
        );
        assert_eq!(" tube ".parse::<PackagingType>().unwrap(), PackagingType::Tube);
        assert!("carton".parse::<PackagingType>().is_err());
    }

    #[test]
    fn packaging_ids_match_wire_format() {
        for packaging in PackagingType::ALL {
            let json = serde_json::to_string(&packaging).unwrap();
            assert_eq!(json, format!("\"{}\"", packaging.id()));
        }
    }

    #[test]
    fn draft_serializes_with_camel_case_names() {
        let draft = OrderDraft {
            final_result_family: "Ingrédients cosmétiques".to_string(),
            order_items: vec![OrderItem::new("p1", 5)],
            ..OrderDraft::default()
        };

        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["finalResultFamily"], "Ingrédients cosmétiques");
        assert_eq!(value["orderItems"][0]["productId"], "p1");
        assert_eq!(value["orderItems"][0]["quantity"], 5);
        assert!(value["packagingType"].is_null());
    }
}
