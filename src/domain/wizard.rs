//! Order creation wizard: step registry, per-step validators and the state
//! machine that owns the draft.
//!
//! The wizard is a pure value. Transitions never perform I/O; submission is
//! delegated to an [`OrderSubmitter`] so the step sequence and the validation
//! rules can be exercised without any presentation layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order_draft::{OrderDraft, OrderItem, PackagingType};
use crate::domain::submission::{OrderSubmitter, SubmissionResult};

/// Stages of the order creation wizard in display order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    MarketingAngle,
    Formulation,
    RawMaterial,
    Packaging,
    Providers,
    Submission,
}

/// Static description of a wizard stage.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct StepDefinition {
    pub step: WizardStep,
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Ordered step registry. Position `i` holds step number `i + 1`.
pub const STEP_REGISTRY: [StepDefinition; 6] = [
    StepDefinition {
        step: WizardStep::MarketingAngle,
        id: "marketing-angle",
        name: "Angle marketing",
        icon: "megaphone",
    },
    StepDefinition {
        step: WizardStep::Formulation,
        id: "formulation",
        name: "Formulation",
        icon: "flask-conical",
    },
    StepDefinition {
        step: WizardStep::RawMaterial,
        id: "raw-material",
        name: "Matières premières",
        icon: "leaf",
    },
    StepDefinition {
        step: WizardStep::Packaging,
        id: "packaging",
        name: "Packaging",
        icon: "package",
    },
    StepDefinition {
        step: WizardStep::Providers,
        id: "providers",
        name: "Prestataires",
        icon: "truck",
    },
    StepDefinition {
        step: WizardStep::Submission,
        id: "order",
        name: "Commande",
        icon: "send",
    },
];

/// Number of steps in the wizard.
pub const STEP_COUNT: usize = STEP_REGISTRY.len();

impl WizardStep {
    /// Resolves a 1-based step number.
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| STEP_REGISTRY.get(index))
            .map(|definition| definition.step)
    }

    /// 1-based position of the step in the registry.
    pub fn number(self) -> usize {
        STEP_REGISTRY
            .iter()
            .position(|definition| definition.step == self)
            .map_or(1, |index| index + 1)
    }

    pub fn definition(self) -> &'static StepDefinition {
        &STEP_REGISTRY[self.number() - 1]
    }

    /// Whether the step's own required fields are all set on `draft`.
    pub fn is_complete(self, draft: &OrderDraft) -> bool {
        match self {
            WizardStep::MarketingAngle => marketing_angle_complete(draft),
            WizardStep::Formulation => formulation_complete(draft),
            WizardStep::RawMaterial => raw_material_complete(draft),
            WizardStep::Packaging => packaging_complete(draft),
            WizardStep::Providers => providers_complete(draft),
            WizardStep::Submission => false,
        }
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn marketing_angle_complete(draft: &OrderDraft) -> bool {
    filled(&draft.final_result_family)
        && filled(&draft.final_result_name)
        && draft.final_result_quantity > 0
        && filled(&draft.target_market)
        && filled(&draft.marketing_angle)
}

fn formulation_complete(draft: &OrderDraft) -> bool {
    filled(&draft.formula)
}

fn raw_material_complete(draft: &OrderDraft) -> bool {
    !draft.order_items.is_empty()
        && draft
            .order_items
            .iter()
            .all(|item| filled(&item.product_id) && item.quantity > 0)
}

fn packaging_complete(draft: &OrderDraft) -> bool {
    draft.packaging_type.is_some()
        && draft.estimated_total_cost.is_finite()
        && draft.estimated_total_cost >= 0.0
}

fn providers_complete(draft: &OrderDraft) -> bool {
    filled(&draft.provider_id)
}

/// Values entered on a single step. Each variant carries only the fields the
/// step owns.
#[derive(Clone, Debug, PartialEq)]
pub enum StepInput {
    MarketingAngle {
        final_result_family: String,
        final_result_name: String,
        final_result_quantity: u32,
        target_market: String,
        marketing_angle: String,
    },
    Formulation {
        formula: String,
    },
    RawMaterial {
        order_items: Vec<OrderItem>,
    },
    Packaging {
        packaging_type: Option<PackagingType>,
        estimated_total_cost: f64,
    },
    Providers {
        provider_id: String,
    },
}

impl StepInput {
    pub fn step(&self) -> WizardStep {
        match self {
            StepInput::MarketingAngle { .. } => WizardStep::MarketingAngle,
            StepInput::Formulation { .. } => WizardStep::Formulation,
            StepInput::RawMaterial { .. } => WizardStep::RawMaterial,
            StepInput::Packaging { .. } => WizardStep::Packaging,
            StepInput::Providers { .. } => WizardStep::Providers,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("input for step {input} cannot be applied on step {current}")]
    StepMismatch { current: usize, input: usize },

    #[error("orders can only be submitted from the last step")]
    NotAtTerminalStep,
}

/// Wizard state: the current step and the draft it owns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderWizard {
    step: usize,
    draft: OrderDraft,
}

impl Default for OrderWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderWizard {
    /// Starts on the first step with an empty draft.
    pub fn new() -> Self {
        Self {
            step: 1,
            draft: OrderDraft::default(),
        }
    }

    /// Current 1-based step number.
    pub fn step_number(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_number(self.step).unwrap_or(WizardStep::MarketingAngle)
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn is_first(&self) -> bool {
        self.step == 1
    }

    pub fn is_terminal(&self) -> bool {
        self.step == STEP_COUNT
    }

    /// Whether the "Next" control of the current step is enabled.
    pub fn can_advance(&self) -> bool {
        !self.is_terminal() && self.current_step().is_complete(&self.draft)
    }

    /// Moves one step forward. No-op on the last step.
    pub fn next(&mut self) {
        if self.step < STEP_COUNT {
            self.step += 1;
        }
    }

    /// Moves one step back. No-op on the first step.
    pub fn previous(&mut self) {
        if self.step > 1 {
            self.step -= 1;
        }
    }

    /// Moves forward only when the current step is complete. Returns whether
    /// the step changed.
    pub fn try_next(&mut self) -> bool {
        if self.can_advance() {
            self.next();
            true
        } else {
            false
        }
    }

    /// Writes the fields owned by the current step.
    pub fn apply(&mut self, input: StepInput) -> Result<(), WizardError> {
        let input_step = input.step();
        if input_step != self.current_step() {
            return Err(WizardError::StepMismatch {
                current: self.step,
                input: input_step.number(),
            });
        }

        let draft = &mut self.draft;
        match input {
            StepInput::MarketingAngle {
                final_result_family,
                final_result_name,
                final_result_quantity,
                target_market,
                marketing_angle,
            } => {
                draft.final_result_family = final_result_family;
                draft.final_result_name = final_result_name;
                draft.final_result_quantity = final_result_quantity;
                draft.target_market = target_market;
                draft.marketing_angle = marketing_angle;
            }
            StepInput::Formulation { formula } => draft.formula = formula,
            StepInput::RawMaterial { order_items } => draft.order_items = order_items,
            StepInput::Packaging {
                packaging_type,
                estimated_total_cost,
            } => {
                draft.packaging_type = packaging_type;
                draft.estimated_total_cost = estimated_total_cost;
            }
            StepInput::Providers { provider_id } => draft.provider_id = provider_id,
        }

        Ok(())
    }

    /// Hands the draft to the submission boundary. Only valid on the last
    /// step; the wizard itself is left untouched so a failed attempt can be
    /// retried.
    pub async fn submit<S>(&self, submitter: &S) -> Result<SubmissionResult, WizardError>
    where
        S: OrderSubmitter + ?Sized,
    {
        if !self.is_terminal() {
            return Err(WizardError::NotAtTerminalStep);
        }
        Ok(submitter.submit_order(&self.draft).await)
    }

    /// Restores a wizard from untrusted storage, clamping the step.
    pub fn sanitized(mut self) -> Self {
        self.step = self.step.clamp(1, STEP_COUNT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::StubOrderSubmitter;

    fn marketing_input() -> StepInput {
        StepInput::MarketingAngle {
            final_result_family: "Ingrédients cosmétiques".to_string(),
            final_result_name: "Crème X".to_string(),
            final_result_quantity: 5,
            target_market: "Europe".to_string(),
            marketing_angle: "Naturel".to_string(),
        }
    }

    fn wizard_at(step: usize) -> OrderWizard {
        OrderWizard {
            step,
            draft: OrderDraft::default(),
        }
    }

    /// Drives a wizard through every step with complete data.
    fn completed_wizard() -> OrderWizard {
        let mut wizard = OrderWizard::new();
        let inputs = [
            marketing_input(),
            StepInput::Formulation {
                formula: "Aloe vera, glycérine".to_string(),
            },
            StepInput::RawMaterial {
                order_items: vec![OrderItem::new("p1", 5)],
            },
            StepInput::Packaging {
                packaging_type: Some(PackagingType::Pot),
                estimated_total_cost: 120.0,
            },
            StepInput::Providers {
                provider_id: "prov-1".to_string(),
            },
        ];
        for input in inputs {
            wizard.apply(input).unwrap();
            assert!(wizard.try_next());
        }
        wizard
    }

    #[test]
    fn registry_is_ordered_and_complete() {
        assert_eq!(STEP_COUNT, 6);
        let ids: Vec<_> = STEP_REGISTRY.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                "marketing-angle",
                "formulation",
                "raw-material",
                "packaging",
                "providers",
                "order"
            ]
        );
        for (index, definition) in STEP_REGISTRY.iter().enumerate() {
            assert_eq!(definition.step.number(), index + 1);
            assert_eq!(WizardStep::from_number(index + 1), Some(definition.step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(STEP_COUNT + 1), None);
    }

    #[test]
    fn wizard_starts_on_first_step_with_empty_draft() {
        let wizard = OrderWizard::new();
        assert_eq!(wizard.step_number(), 1);
        assert!(wizard.is_first());
        assert_eq!(wizard.draft(), &OrderDraft::default());
    }

    #[test]
    fn next_increments_until_last_step() {
        for step in 1..=STEP_COUNT {
            let mut wizard = wizard_at(step);
            wizard.next();
            if step < STEP_COUNT {
                assert_eq!(wizard.step_number(), step + 1);
            } else {
                assert_eq!(wizard.step_number(), STEP_COUNT);
            }
        }
    }

    #[test]
    fn previous_decrements_until_first_step() {
        for step in 1..=STEP_COUNT {
            let mut wizard = wizard_at(step);
            wizard.previous();
            if step > 1 {
                assert_eq!(wizard.step_number(), step - 1);
            } else {
                assert_eq!(wizard.step_number(), 1);
            }
        }
    }

    #[test]
    fn first_step_requires_every_field() {
        let mut wizard = OrderWizard::new();
        assert!(!wizard.can_advance());

        wizard.apply(marketing_input()).unwrap();
        assert!(wizard.can_advance());
        // Same input again keeps the same answer.
        wizard.apply(marketing_input()).unwrap();
        assert!(wizard.can_advance());

        let incomplete = [
            StepInput::MarketingAngle {
                final_result_family: " ".to_string(),
                final_result_name: "Crème X".to_string(),
                final_result_quantity: 5,
                target_market: "Europe".to_string(),
                marketing_angle: "Naturel".to_string(),
            },
            StepInput::MarketingAngle {
                final_result_family: "Soin".to_string(),
                final_result_name: String::new(),
                final_result_quantity: 5,
                target_market: "Europe".to_string(),
                marketing_angle: "Naturel".to_string(),
            },
            StepInput::MarketingAngle {
                final_result_family: "Soin".to_string(),
                final_result_name: "Crème X".to_string(),
                final_result_quantity: 0,
                target_market: "Europe".to_string(),
                marketing_angle: "Naturel".to_string(),
            },
            StepInput::MarketingAngle {
                final_result_family: "Soin".to_string(),
                final_result_name: "Crème X".to_string(),
                final_result_quantity: 5,
                target_market: String::new(),
                marketing_angle: "Naturel".to_string(),
            },
            StepInput::MarketingAngle {
                final_result_family: "Soin".to_string(),
                final_result_name: "Crème X".to_string(),
                final_result_quantity: 5,
                target_market: "Europe".to_string(),
                marketing_angle: String::new(),
            },
        ];
        for input in incomplete {
            wizard.apply(input).unwrap();
            assert!(!wizard.can_advance());
            assert!(!wizard.try_next());
            assert_eq!(wizard.step_number(), 1);
        }
    }

    #[test]
    fn raw_material_requires_positive_items() {
        let mut draft = OrderDraft::default();
        assert!(!WizardStep::RawMaterial.is_complete(&draft));

        draft.order_items = vec![OrderItem::new("p1", 0)];
        assert!(!WizardStep::RawMaterial.is_complete(&draft));

        draft.order_items = vec![OrderItem::new("", 2)];
        assert!(!WizardStep::RawMaterial.is_complete(&draft));

        draft.order_items = vec![OrderItem::new("p1", 2)];
        assert!(WizardStep::RawMaterial.is_complete(&draft));
    }

    #[test]
    fn packaging_requires_selection_and_valid_cost() {
        let mut draft = OrderDraft::default();
        assert!(!WizardStep::Packaging.is_complete(&draft));

        draft.packaging_type = Some(PackagingType::Tube);
        assert!(WizardStep::Packaging.is_complete(&draft));

        draft.estimated_total_cost = -5.0;
        assert!(!WizardStep::Packaging.is_complete(&draft));
    }

    #[test]
    fn terminal_step_never_enables_next() {
        let wizard = completed_wizard();
        assert!(wizard.is_terminal());
        assert!(!wizard.can_advance());
    }

    #[test]
    fn step_cannot_write_fields_it_does_not_own() {
        let mut wizard = OrderWizard::new();
        let result = wizard.apply(StepInput::Formulation {
            formula: "Aloe".to_string(),
        });

        assert_eq!(
            result,
            Err(WizardError::StepMismatch {
                current: 1,
                input: 2
            })
        );
        assert_eq!(wizard.draft().formula, "");
    }

    #[test]
    fn going_back_keeps_entered_values() {
        let mut wizard = OrderWizard::new();
        wizard.apply(marketing_input()).unwrap();
        assert!(wizard.try_next());
        wizard.previous();

        assert_eq!(wizard.step_number(), 1);
        assert_eq!(wizard.draft().final_result_name, "Crème X");
    }

    #[test]
    fn sanitized_clamps_out_of_range_steps() {
        assert_eq!(wizard_at(0).sanitized().step_number(), 1);
        assert_eq!(wizard_at(42).sanitized().step_number(), STEP_COUNT);
    }

    #[actix_web::test]
    async fn submit_is_rejected_before_last_step() {
        let wizard = OrderWizard::new();
        let result = wizard.submit(&StubOrderSubmitter).await;
        assert_eq!(result, Err(WizardError::NotAtTerminalStep));
    }

    #[actix_web::test]
    async fn submit_from_last_step_reaches_boundary() {
        let wizard = completed_wizard();
        let result = wizard.submit(&StubOrderSubmitter).await.unwrap();
        assert!(result.success);
        assert_eq!(wizard.step_number(), STEP_COUNT);
    }
}
