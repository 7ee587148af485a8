//! Supplier analytics page.

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::dashboard::LeadKind;
use crate::dto::dashboard::{DashboardPageData, DashboardQuery};
use crate::pagination::Paginated;
use crate::repository::{DashboardReader, LeadListQuery};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceResult, ensure_role, filled, filled_date};

/// Loads the headline counters and one page of leads. Suppliers only.
pub async fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: DashboardQuery,
) -> ServiceResult<DashboardPageData>
where
    R: DashboardReader + ?Sized,
{
    ensure_role(user, &[Role::Supplier])?;

    let page = query.page.unwrap_or(1).max(1);
    let filters = DashboardQuery {
        kind: filled(query.kind),
        from: filled(query.from),
        to: filled(query.to),
        page: None,
    };

    let mut lead_query = LeadListQuery::new()
        .between(
            filled_date(filters.from.as_deref()),
            filled_date(filters.to.as_deref()),
        )
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    lead_query.kind = filters.kind.as_deref().and_then(LeadKind::parse);

    let stats = repo.dashboard_stats().await.map_err(|err| {
        log::error!("Failed to load dashboard stats: {err}");
        err
    })?;
    let (total, leads) = repo.list_leads(lead_query).await.map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;

    Ok(DashboardPageData {
        stats,
        leads: Paginated::new(leads, page, total, DEFAULT_ITEMS_PER_PAGE),
        filters,
    })
}
