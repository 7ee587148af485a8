use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderKind};

/// Order and quote list filters. Dates are `YYYY-MM-DD` strings as posted by
/// `<input type="date">`; unparseable values are ignored.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub struct OrdersPageData {
    pub kind: OrderKind,
    pub orders: Vec<Order>,
    pub filters: OrdersQuery,
}
