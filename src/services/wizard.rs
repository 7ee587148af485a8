//! Order-creation wizard: draft persistence, step handling and submission.

use std::cmp::Ordering;

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::order_draft::PackagingType;
use crate::domain::submission::{OrderSubmitter, SUBMISSION_FAILED, SubmissionResult};
use crate::domain::wizard::{OrderWizard, STEP_REGISTRY, WizardError, WizardStep};
use crate::dto::wizard::{PackagingOption, StepState, StepView, WizardPageData, WizardQuery};
use crate::forms::wizard::{StepAction, StepForm};
use crate::repository::{LookupReader, ProductListQuery, ProductReader};
use crate::services::{ServiceError, ServiceResult, ensure_role, filled};

/// Raw materials offered on one screen of the third step.
const RAW_MATERIAL_PAGE_SIZE: usize = 50;

/// Storage of the wizard between requests, one per browser session.
pub trait WizardStore {
    fn load(&self) -> ServiceResult<Option<OrderWizard>>;
    fn save(&self, wizard: &OrderWizard) -> ServiceResult<()>;
    fn clear(&self);
}

/// Current wizard of the session, or a fresh one. An unreadable stored
/// draft is discarded.
pub fn current_wizard<S>(store: &S) -> OrderWizard
where
    S: WizardStore + ?Sized,
{
    match store.load() {
        Ok(Some(wizard)) => wizard.sanitized(),
        Ok(None) => OrderWizard::new(),
        Err(err) => {
            log::warn!("Discarding unreadable wizard draft: {err}");
            store.clear();
            OrderWizard::new()
        }
    }
}

fn step_views(current: usize) -> Vec<StepView> {
    STEP_REGISTRY
        .iter()
        .map(|definition| {
            let number = definition.step.number();
            StepView {
                number,
                id: definition.id,
                name: definition.name,
                icon: definition.icon,
                state: match number.cmp(&current) {
                    Ordering::Less => StepState::Done,
                    Ordering::Equal => StepState::Current,
                    Ordering::Greater => StepState::Upcoming,
                },
            }
        })
        .collect()
}

/// Renders the current step, fetching the reference data it needs.
pub async fn load_wizard_page<R, S>(
    repo: &R,
    store: &S,
    user: &AuthenticatedUser,
    query: WizardQuery,
) -> ServiceResult<WizardPageData>
where
    R: ProductReader + LookupReader + ?Sized,
    S: WizardStore + ?Sized,
{
    ensure_role(user, &[Role::Customer])?;

    let wizard = current_wizard(store);
    let step = wizard.current_step();
    let search = filled(query.search);

    let products = if step == WizardStep::RawMaterial {
        let mut list_query = ProductListQuery::new().paginate(1, RAW_MATERIAL_PAGE_SIZE);
        list_query.search = search.clone();
        let (_, products) = repo.list_products(list_query).await.map_err(|err| {
            log::error!("Failed to list raw materials: {err}");
            err
        })?;
        products
    } else {
        Vec::new()
    };

    let providers = if step == WizardStep::Providers {
        repo.list_providers().await.map_err(|err| {
            log::error!("Failed to list providers: {err}");
            err
        })?
    } else {
        Vec::new()
    };

    Ok(WizardPageData {
        step: wizard.step_number(),
        step_id: step.definition().id,
        steps: step_views(wizard.step_number()),
        draft: wizard.draft().clone(),
        can_advance: wizard.can_advance(),
        is_first: wizard.is_first(),
        is_terminal: wizard.is_terminal(),
        products,
        providers,
        packaging_options: PackagingType::ALL
            .iter()
            .map(|packaging| PackagingOption {
                id: packaging.id(),
                label: packaging.label(),
            })
            .collect(),
        search,
    })
}

/// Records the fields posted for the current step, then moves as requested.
///
/// "Next" only moves when the current step is complete, so a forged request
/// for an incomplete step leaves the wizard in place. Returns the wizard as
/// persisted.
pub fn apply_step<S>(store: &S, user: &AuthenticatedUser, form: StepForm) -> ServiceResult<OrderWizard>
where
    S: WizardStore + ?Sized,
{
    ensure_role(user, &[Role::Customer])?;

    let mut wizard = current_wizard(store);
    if form.step != wizard.step_number() {
        return Err(WizardError::StepMismatch {
            current: wizard.step_number(),
            input: form.step,
        }
        .into());
    }

    let action = form.action;
    if let Some(input) = form.into_input()? {
        wizard.apply(input)?;
    }

    match action {
        StepAction::Next => {
            if !wizard.try_next() {
                log::debug!("Step {} incomplete, staying", wizard.step_number());
            }
        }
        StepAction::Previous => wizard.previous(),
        StepAction::Save => {}
    }

    store.save(&wizard)?;
    Ok(wizard)
}

/// Discards the draft and starts over on the first step.
pub fn reset_wizard<S>(store: &S, user: &AuthenticatedUser) -> ServiceResult<()>
where
    S: WizardStore + ?Sized,
{
    ensure_role(user, &[Role::Customer])?;
    store.clear();
    Ok(())
}

/// Hands the draft to the submitter.
///
/// On success the draft is discarded. On failure it is kept untouched so the
/// user can correct it and retry.
pub async fn submit_wizard<S, B>(
    store: &S,
    submitter: &B,
    user: &AuthenticatedUser,
) -> ServiceResult<SubmissionResult>
where
    S: WizardStore + ?Sized,
    B: OrderSubmitter + ?Sized,
{
    ensure_role(user, &[Role::Customer])?;

    let wizard = current_wizard(store);
    let result = wizard.submit(submitter).await?;

    if result.success {
        store.clear();
        log::info!(
            "Customer {} submitted order draft for {}",
            user.id,
            wizard.draft().final_result_name
        );
        Ok(result)
    } else {
        let message = result
            .error
            .unwrap_or_else(|| SUBMISSION_FAILED.to_string());
        log::warn!("Order submission rejected for {}: {message}", user.id);
        Err(ServiceError::Form(message))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::order_draft::OrderDraft;
    use crate::domain::submission::{MISSING_ORDER_ITEMS, StubOrderSubmitter};
    use crate::services::test_support::user_with_role;

    #[derive(Default)]
    struct MemoryStore {
        wizard: Mutex<Option<OrderWizard>>,
    }

    impl WizardStore for MemoryStore {
        fn load(&self) -> ServiceResult<Option<OrderWizard>> {
            Ok(self.wizard.lock().unwrap().clone())
        }

        fn save(&self, wizard: &OrderWizard) -> ServiceResult<()> {
            *self.wizard.lock().unwrap() = Some(wizard.clone());
            Ok(())
        }

        fn clear(&self) {
            *self.wizard.lock().unwrap() = None;
        }
    }

    impl MemoryStore {
        fn stored(&self) -> Option<OrderWizard> {
            self.wizard.lock().unwrap().clone()
        }
    }

    fn customer() -> AuthenticatedUser {
        user_with_role(Role::Customer)
    }

    fn form(body: &str) -> StepForm {
        StepForm::parse(body.as_bytes()).unwrap()
    }

    const STEP_ONE: &str = "step=1&action=next&final_result_family=Soin&final_result_name=Cr%C3%A8me+X\
                            &final_result_quantity=10&target_market=Europe&marketing_angle=Naturel";

    fn walk_to_submission(store: &MemoryStore, with_items: bool) {
        let user = customer();
        apply_step(store, &user, form(STEP_ONE)).unwrap();
        apply_step(store, &user, form("step=2&action=next&formula=Gel+aloe")).unwrap();
        if with_items {
            apply_step(
                store,
                &user,
                form("step=3&action=next&product_id=p1&item_quantity=4"),
            )
            .unwrap();
        } else {
            // Force past the items step to exercise the submitter's own check.
            let mut wizard = store.stored().unwrap();
            wizard.next();
            store.save(&wizard).unwrap();
        }
        apply_step(
            store,
            &user,
            form("step=4&action=next&packaging_type=tube&estimated_total_cost=120"),
        )
        .unwrap();
        apply_step(store, &user, form("step=5&action=next&provider_id=prov-1")).unwrap();
    }

    #[test]
    fn first_visit_starts_on_step_one() {
        let store = MemoryStore::default();
        let wizard = current_wizard(&store);
        assert_eq!(wizard.step_number(), 1);
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn complete_step_advances_and_persists() {
        let store = MemoryStore::default();

        let wizard = apply_step(&store, &customer(), form(STEP_ONE)).unwrap();

        assert_eq!(wizard.step_number(), 2);
        let stored = store.stored().unwrap();
        assert_eq!(stored.draft().final_result_name, "Crème X");
        assert_eq!(stored.step_number(), 2);
    }

    #[test]
    fn forged_next_on_incomplete_step_stays() {
        let store = MemoryStore::default();

        let wizard = apply_step(
            &store,
            &customer(),
            form("step=1&action=next&final_result_family=Soin"),
        )
        .unwrap();

        assert_eq!(wizard.step_number(), 1);
        assert_eq!(wizard.draft().final_result_family, "Soin");
    }

    #[test]
    fn previous_needs_no_validation() {
        let store = MemoryStore::default();
        apply_step(&store, &customer(), form(STEP_ONE)).unwrap();

        let wizard = apply_step(&store, &customer(), form("step=2&action=previous")).unwrap();

        assert_eq!(wizard.step_number(), 1);
        assert_eq!(wizard.draft().formula, "");
    }

    #[test]
    fn stale_step_post_is_rejected() {
        let store = MemoryStore::default();
        apply_step(&store, &customer(), form(STEP_ONE)).unwrap();

        let result = apply_step(&store, &customer(), form("step=1&final_result_name=Autre"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(store.stored().unwrap().draft().final_result_name, "Crème X");
    }

    #[test]
    fn suppliers_cannot_use_the_wizard() {
        let store = MemoryStore::default();
        let result = apply_step(&store, &user_with_role(Role::Supplier), form(STEP_ONE));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn reset_discards_the_draft() {
        let store = MemoryStore::default();
        apply_step(&store, &customer(), form(STEP_ONE)).unwrap();

        reset_wizard(&store, &customer()).unwrap();

        assert_eq!(store.stored(), None);
    }

    #[test]
    fn step_indicator_marks_progress() {
        let views = step_views(3);
        let states: Vec<_> = views.iter().map(|view| view.state).collect();
        assert_eq!(
            states,
            vec![
                StepState::Done,
                StepState::Done,
                StepState::Current,
                StepState::Upcoming,
                StepState::Upcoming,
                StepState::Upcoming
            ]
        );
        assert_eq!(views[2].id, "raw-material");
    }

    #[actix_web::test]
    async fn successful_submission_clears_the_draft() {
        let store = MemoryStore::default();
        walk_to_submission(&store, true);
        assert!(store.stored().unwrap().is_terminal());

        let result = submit_wizard(&store, &StubOrderSubmitter, &customer())
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(store.stored(), None);
    }

    #[actix_web::test]
    async fn failed_submission_keeps_the_draft() {
        let store = MemoryStore::default();
        walk_to_submission(&store, false);
        let before = store.stored().unwrap();

        let result = submit_wizard(&store, &StubOrderSubmitter, &customer()).await;

        match result {
            Err(ServiceError::Form(message)) => assert_eq!(message, MISSING_ORDER_ITEMS),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(store.stored(), Some(before));
    }

    struct SilentRejection;

    #[async_trait]
    impl OrderSubmitter for SilentRejection {
        async fn submit_order(&self, _draft: &OrderDraft) -> SubmissionResult {
            SubmissionResult {
                success: false,
                order: None,
                error: None,
            }
        }
    }

    #[actix_web::test]
    async fn rejection_without_reason_reports_generic_failure() {
        let store = MemoryStore::default();
        walk_to_submission(&store, true);

        let result = submit_wizard(&store, &SilentRejection, &customer()).await;

        match result {
            Err(ServiceError::Form(message)) => assert_eq!(message, SUBMISSION_FAILED),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.stored().is_some());
    }

    #[actix_web::test]
    async fn submission_before_last_step_is_refused() {
        let store = MemoryStore::default();
        apply_step(&store, &customer(), form(STEP_ONE)).unwrap();

        let result = submit_wizard(&store, &StubOrderSubmitter, &customer()).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(store.stored().is_some());
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod page_tests {
    use std::cell::Cell;

    use super::*;
    use crate::domain::lookup::Provider;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_role;

    struct FixedStore(Cell<Option<usize>>);

    impl WizardStore for FixedStore {
        fn load(&self) -> ServiceResult<Option<OrderWizard>> {
            let mut wizard = OrderWizard::new();
            for _ in 1..self.0.get().unwrap_or(1) {
                wizard.next();
            }
            Ok(Some(wizard))
        }

        fn save(&self, _wizard: &OrderWizard) -> ServiceResult<()> {
            Ok(())
        }

        fn clear(&self) {
            self.0.set(None);
        }
    }

    #[actix_web::test]
    async fn raw_material_step_fetches_products() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.search.as_deref() == Some("aloe"))
            .times(1)
            .returning(|_| Ok((0, vec![])));
        repo.expect_list_providers().times(0);

        let data = load_wizard_page(
            &repo,
            &FixedStore(Cell::new(Some(3))),
            &user_with_role(Role::Customer),
            WizardQuery {
                search: Some("aloe ".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(data.step_id, "raw-material");
        assert_eq!(data.packaging_options.len(), 6);
        assert!(!data.can_advance);
    }

    #[actix_web::test]
    async fn provider_step_fetches_providers() {
        let mut repo = MockRepository::new();
        repo.expect_list_products().times(0);
        repo.expect_list_providers().times(1).returning(|| {
            Ok(vec![Provider {
                id: "prov-1".to_string(),
                name: "Formul'Lab".to_string(),
                country: Some("France".to_string()),
                specialties: vec![],
            }])
        });

        let data = load_wizard_page(
            &repo,
            &FixedStore(Cell::new(Some(5))),
            &user_with_role(Role::Customer),
            WizardQuery::default(),
        )
        .await
        .unwrap();

        assert_eq!(data.providers.len(), 1);
        assert!(!data.is_terminal);
    }
}
