use serde::{Deserialize, Serialize};

use crate::domain::lookup::Provider;
use crate::domain::order_draft::OrderDraft;
use crate::domain::product::Product;

/// Raw-material search on the third step.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WizardQuery {
    pub search: Option<String>,
}

/// Position of a step relative to the current one.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

/// Step indicator entry.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StepView {
    pub number: usize,
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub state: StepState,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PackagingOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// Everything the wizard template needs for the current step.
#[derive(Debug, Serialize)]
pub struct WizardPageData {
    pub step: usize,
    pub step_id: &'static str,
    pub steps: Vec<StepView>,
    pub draft: OrderDraft,
    pub can_advance: bool,
    pub is_first: bool,
    pub is_terminal: bool,
    /// Raw materials offered on the third step; empty elsewhere.
    pub products: Vec<Product>,
    /// Providers offered on the fifth step; empty elsewhere.
    pub providers: Vec<Provider>,
    pub packaging_options: Vec<PackagingOption>,
    pub search: Option<String>,
}
