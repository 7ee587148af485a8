//! Boundary between the wizard and the order-creation backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order_draft::OrderDraft;

pub const MISSING_REQUIRED_FIELDS: &str = "Veuillez remplir tous les champs obligatoires";
pub const MISSING_ORDER_ITEMS: &str = "Au moins un produit doit être sélectionné";
/// Reported when a submitter rejects the draft without saying why.
pub const SUBMISSION_FAILED: &str = "La commande n'a pas pu être envoyée. Veuillez réessayer.";

/// Reference to an order created by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub reference: String,
}

/// Outcome of a submission attempt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn succeeded(order: Option<OrderSummary>) -> Self {
        Self {
            success: true,
            order,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            order: None,
            error: Some(error.into()),
        }
    }
}

/// Accepts a complete draft and reports whether an order was created.
///
/// Implementations never return `Err`: every failure, including transport
/// errors, is folded into [`SubmissionResult::failed`].
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit_order(&self, draft: &OrderDraft) -> SubmissionResult;
}

/// Local stand-in for the order-creation endpoint.
///
/// Checks that the headline fields and at least one item are present, then
/// reports success without contacting any backend and without an order
/// payload.
// TODO: replace with a backend-backed submitter once the order-creation
// endpoint contract is published.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubOrderSubmitter;

#[async_trait]
impl OrderSubmitter for StubOrderSubmitter {
    async fn submit_order(&self, draft: &OrderDraft) -> SubmissionResult {
        if draft.final_result_family.trim().is_empty()
            || draft.final_result_name.trim().is_empty()
            || draft.final_result_quantity == 0
        {
            return SubmissionResult::failed(MISSING_REQUIRED_FIELDS);
        }

        if draft.order_items.is_empty() {
            return SubmissionResult::failed(MISSING_ORDER_ITEMS);
        }

        SubmissionResult::succeeded(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_draft::{OrderItem, PackagingType};

    fn example_draft() -> OrderDraft {
        OrderDraft {
            final_result_family: "Ingrédients cosmétiques".to_string(),
            final_result_name: "Crème X".to_string(),
            final_result_quantity: 5,
            target_market: "Europe".to_string(),
            marketing_angle: "Naturel".to_string(),
            formula: "Aloe vera".to_string(),
            packaging_type: Some(PackagingType::Pot),
            estimated_total_cost: 250.0,
            provider_id: "prov-1".to_string(),
            order_items: vec![OrderItem::new("p1", 5)],
        }
    }

    #[actix_web::test]
    async fn complete_draft_is_accepted() {
        let result = StubOrderSubmitter.submit_order(&example_draft()).await;
        assert_eq!(result, SubmissionResult::succeeded(None));
    }

    #[actix_web::test]
    async fn empty_item_list_is_rejected() {
        let draft = OrderDraft {
            order_items: vec![],
            ..example_draft()
        };

        let result = StubOrderSubmitter.submit_order(&draft).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Au moins un produit doit être sélectionné")
        );
    }

    #[actix_web::test]
    async fn missing_headline_fields_are_rejected() {
        let drafts = [
            OrderDraft {
                final_result_family: String::new(),
                ..example_draft()
            },
            OrderDraft {
                final_result_name: "  ".to_string(),
                ..example_draft()
            },
            OrderDraft {
                final_result_quantity: 0,
                ..example_draft()
            },
        ];

        for draft in drafts {
            let result = StubOrderSubmitter.submit_order(&draft).await;
            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some(MISSING_REQUIRED_FIELDS));
        }
    }

    #[actix_web::test]
    async fn missing_fields_are_reported_before_missing_items() {
        let result = StubOrderSubmitter.submit_order(&OrderDraft::default()).await;
        assert_eq!(result.error.as_deref(), Some(MISSING_REQUIRED_FIELDS));
    }

    #[test]
    fn result_serializes_without_empty_members() {
        let value = serde_json::to_value(SubmissionResult::failed("x")).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "error": "x"}));
    }
}
