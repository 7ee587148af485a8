//! Form posted by every wizard step.

use serde::Deserialize;

use crate::domain::order_draft::{OrderItem, PackagingType};
use crate::domain::wizard::{StepInput, WizardStep};
use crate::forms::FormError;

/// Navigation requested together with the step fields.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Next,
    Previous,
    #[default]
    Save,
}

/// Raw step payload. Parsed with `serde_html_form` so repeated item fields
/// collect into vectors.
#[derive(Debug, Deserialize, Default)]
pub struct StepForm {
    pub step: usize,
    #[serde(default)]
    pub action: StepAction,
    #[serde(default)]
    pub final_result_family: String,
    #[serde(default)]
    pub final_result_name: String,
    #[serde(default)]
    pub final_result_quantity: String,
    #[serde(default)]
    pub target_market: String,
    #[serde(default)]
    pub marketing_angle: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub product_id: Vec<String>,
    #[serde(default)]
    pub item_quantity: Vec<String>,
    #[serde(default)]
    pub packaging_type: String,
    #[serde(default)]
    pub estimated_total_cost: String,
    #[serde(default)]
    pub provider_id: String,
}

/// Limit for the short step 1 and step 5 fields.
const MAX_SHORT_TEXT_CHARS: usize = 120;
const MAX_FORMULA_CHARS: usize = 1000;
const MAX_PRODUCT_ID_CHARS: usize = 64;
const MAX_ORDER_ITEMS: usize = 30;

/// Trims `value` and rejects it when longer than `max` characters.
fn bounded(value: &str, field: &'static str, max: usize) -> Result<String, FormError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(value.to_string())
}

/// Unparseable numbers count as unset so the step simply stays incomplete.
fn lenient_quantity(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

/// Parses an amount accepting a decimal comma. Blank means zero.
fn parse_amount(value: &str) -> Result<f64, FormError> {
    let value = value.trim().replace(',', ".");
    if value.is_empty() {
        return Ok(0.0);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(FormError::InvalidPrice)
}

impl StepForm {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|_| FormError::InvalidStep)
    }

    /// Extracts the fields owned by the posted step. The terminal step owns
    /// no fields and yields `None`.
    pub fn into_input(self) -> Result<Option<StepInput>, FormError> {
        let step = WizardStep::from_number(self.step).ok_or(FormError::InvalidStep)?;

        let input = match step {
            WizardStep::MarketingAngle => StepInput::MarketingAngle {
                final_result_family: bounded(
                    &self.final_result_family,
                    "Famille de produit",
                    MAX_SHORT_TEXT_CHARS,
                )?,
                final_result_name: bounded(
                    &self.final_result_name,
                    "Nom du produit final",
                    MAX_SHORT_TEXT_CHARS,
                )?,
                final_result_quantity: lenient_quantity(&self.final_result_quantity),
                target_market: bounded(&self.target_market, "Marché cible", MAX_SHORT_TEXT_CHARS)?,
                marketing_angle: bounded(
                    &self.marketing_angle,
                    "Angle marketing",
                    MAX_SHORT_TEXT_CHARS,
                )?,
            },
            WizardStep::Formulation => StepInput::Formulation {
                formula: bounded(&self.formula, "Formulation", MAX_FORMULA_CHARS)?,
            },
            WizardStep::RawMaterial => {
                let order_items = self
                    .product_id
                    .iter()
                    .zip(self.item_quantity.iter())
                    // Rows left without a quantity are not selected.
                    .filter(|(_, quantity)| !quantity.trim().is_empty())
                    .map(|(product_id, quantity)| {
                        let product_id =
                            bounded(product_id, "Matière première", MAX_PRODUCT_ID_CHARS)?;
                        Ok(OrderItem::new(product_id, lenient_quantity(quantity)))
                    })
                    .collect::<Result<Vec<_>, FormError>>()?;
                if order_items.len() > MAX_ORDER_ITEMS {
                    return Err(FormError::TooManyItems(MAX_ORDER_ITEMS));
                }
                StepInput::RawMaterial { order_items }
            }
            WizardStep::Packaging => {
                let packaging = self.packaging_type.trim();
                let packaging_type = if packaging.is_empty() {
                    None
                } else {
                    Some(
                        packaging
                            .parse::<PackagingType>()
                            .map_err(|_| FormError::InvalidPackaging)?,
                    )
                };
                StepInput::Packaging {
                    packaging_type,
                    estimated_total_cost: parse_amount(&self.estimated_total_cost)?,
                }
            }
            WizardStep::Providers => StepInput::Providers {
                provider_id: bounded(&self.provider_id, "Prestataire", MAX_SHORT_TEXT_CHARS)?,
            },
            WizardStep::Submission => return Ok(None),
        };

        Ok(Some(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_step_fields() {
        let form = StepForm::parse(
            "step=1&action=next&final_result_family=Soin&final_result_name=+Cr%C3%A8me+X+\
             &final_result_quantity=5&target_market=Europe&marketing_angle=Naturel"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(form.action, StepAction::Next);

        let input = form.into_input().unwrap().unwrap();

        assert_eq!(
            input,
            StepInput::MarketingAngle {
                final_result_family: "Soin".to_string(),
                final_result_name: "Crème X".to_string(),
                final_result_quantity: 5,
                target_market: "Europe".to_string(),
                marketing_angle: "Naturel".to_string(),
            }
        );
    }

    #[test]
    fn invalid_quantity_counts_as_unset() {
        let form = StepForm {
            step: 1,
            final_result_quantity: "beaucoup".to_string(),
            ..StepForm::default()
        };

        match form.into_input().unwrap() {
            Some(StepInput::MarketingAngle {
                final_result_quantity,
                ..
            }) => assert_eq!(final_result_quantity, 0),
            other => panic!("unexpected input: {other:?}"),
        }
    }

    #[test]
    fn repeated_item_fields_become_line_items() {
        let form = StepForm::parse(
            b"step=3&product_id=p1&item_quantity=5&product_id=&item_quantity=&product_id=p2&item_quantity=2",
        )
        .unwrap();

        let input = form.into_input().unwrap().unwrap();

        assert_eq!(
            input,
            StepInput::RawMaterial {
                order_items: vec![OrderItem::new("p1", 5), OrderItem::new("p2", 2)],
            }
        );
    }

    #[test]
    fn item_row_without_quantity_is_not_selected() {
        let form = StepForm::parse(b"step=3&product_id=p1&item_quantity=&product_id=&item_quantity=3")
            .unwrap();

        let input = form.into_input().unwrap().unwrap();

        assert_eq!(
            input,
            StepInput::RawMaterial {
                order_items: vec![OrderItem::new("", 3)],
            }
        );
    }

    #[test]
    fn overlong_formula_is_rejected() {
        let form = StepForm {
            step: 2,
            formula: "a".repeat(MAX_FORMULA_CHARS + 1),
            ..StepForm::default()
        };

        assert!(matches!(
            form.into_input(),
            Err(FormError::TooLong {
                max: MAX_FORMULA_CHARS,
                ..
            })
        ));
    }

    #[test]
    fn formula_limit_counts_characters() {
        let form = StepForm {
            step: 2,
            formula: "é".repeat(MAX_FORMULA_CHARS),
            ..StepForm::default()
        };

        assert!(form.into_input().is_ok());
    }

    #[test]
    fn too_many_items_are_rejected() {
        let count = MAX_ORDER_ITEMS + 1;
        let form = StepForm {
            step: 3,
            product_id: (0..count).map(|i| format!("p{i}")).collect(),
            item_quantity: vec!["1".to_string(); count],
            ..StepForm::default()
        };

        assert!(matches!(
            form.into_input(),
            Err(FormError::TooManyItems(MAX_ORDER_ITEMS))
        ));
    }

    #[test]
    fn unselected_rows_do_not_count_towards_item_limit() {
        let count = MAX_ORDER_ITEMS + 10;
        let mut item_quantity = vec![String::new(); count];
        item_quantity[0] = "2".to_string();
        let form = StepForm {
            step: 3,
            product_id: (0..count).map(|i| format!("p{i}")).collect(),
            item_quantity,
            ..StepForm::default()
        };

        assert_eq!(
            form.into_input().unwrap(),
            Some(StepInput::RawMaterial {
                order_items: vec![OrderItem::new("p0", 2)],
            })
        );
    }

    #[test]
    fn unknown_packaging_is_rejected() {
        let form = StepForm {
            step: 4,
            packaging_type: "carton".to_string(),
            ..StepForm::default()
        };

        assert!(matches!(form.into_input(), Err(FormError::InvalidPackaging)));
    }

    #[test]
    fn packaging_accepts_decimal_comma() {
        let form = StepForm {
            step: 4,
            packaging_type: "tube".to_string(),
            estimated_total_cost: "12,50".to_string(),
            ..StepForm::default()
        };

        assert_eq!(
            form.into_input().unwrap(),
            Some(StepInput::Packaging {
                packaging_type: Some(PackagingType::Tube),
                estimated_total_cost: 12.5,
            })
        );
    }

    #[test]
    fn unparseable_cost_is_rejected() {
        let form = StepForm {
            step: 4,
            packaging_type: "pot".to_string(),
            estimated_total_cost: "cher".to_string(),
            ..StepForm::default()
        };

        assert!(matches!(form.into_input(), Err(FormError::InvalidPrice)));
    }

    #[test]
    fn terminal_step_owns_no_fields() {
        let form = StepForm {
            step: 6,
            ..StepForm::default()
        };
        assert_eq!(form.into_input().unwrap(), None);
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let form = StepForm {
            step: 9,
            ..StepForm::default()
        };
        assert!(matches!(form.into_input(), Err(FormError::InvalidStep)));
    }
}
