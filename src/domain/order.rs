use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Orders and quotes share one backend resource.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Order,
    Quote,
}

impl OrderKind {
    pub fn id(self) -> &'static str {
        match self {
            OrderKind::Order => "order",
            OrderKind::Quote => "quote",
        }
    }

    /// Prefix of exported spreadsheet names.
    pub fn export_prefix(self) -> &'static str {
        match self {
            OrderKind::Order => "commandes",
            OrderKind::Quote => "devis",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn id(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "En attente",
            OrderStatus::Confirmed => "Confirmée",
            OrderStatus::Shipped => "Expédiée",
            OrderStatus::Delivered => "Livrée",
            OrderStatus::Cancelled => "Annulée",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        OrderStatus::ALL.into_iter().find(|status| status.id() == value)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub reference: String,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub customer_name: String,
    pub supplier_name: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// One-line summary of the items, e.g. `Aloe vera × 5, Glycérine × 2`.
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|line| format!("{} × {}", line.product_name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_deserializes_from_backend_shape() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "reference": "CMD-001",
            "kind": "quote",
            "status": "confirmed",
            "customerName": "Laboratoire A",
            "supplierName": "Fournisseur B",
            "items": [
                {"productId": "p1", "productName": "Aloe vera", "quantity": 5, "unitPrice": 2.5},
                {"productId": "p2", "productName": "Glycérine", "quantity": 2}
            ],
            "totalAmount": 17.5,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(order.kind, OrderKind::Quote);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items_summary(), "Aloe vera × 5, Glycérine × 2");
    }

    #[test]
    fn status_parse_ignores_unknown_values() {
        assert_eq!(OrderStatus::parse("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse(""), None);
        assert_eq!(OrderStatus::parse("lost"), None);
    }
}
