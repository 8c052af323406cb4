use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Minor currency units.
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub total_price: i64,
    pub order_date: DateTime<Utc>,
}

/// Joined order row for the staff views.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub order_id: i32,
    pub customer_name: String,
    pub status: String,
    pub total_price: i64,
    pub order_date: DateTime<Utc>,
}

/// Joined item row for the customer's order detail view.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Canceled,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Returned => "returned",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Wallet,
    Sbp,
    Unknown,
}

impl PaymentMethod {
    /// Map a menu selection to a method; anything else is `Unknown`.
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => PaymentMethod::Card,
            2 => PaymentMethod::Wallet,
            3 => PaymentMethod::Sbp,
            _ => PaymentMethod::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::Sbp => "sbp",
            PaymentMethod::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Customer => "customer",
        }
    }
}

/// The identity a menu session runs under. There is no authentication:
/// each role maps to a fixed user row seeded by migration.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn admin() -> Self {
        Self {
            id: 1,
            name: "Administrator".into(),
            role: Role::Admin,
        }
    }

    pub fn manager() -> Self {
        Self {
            id: 2,
            name: "Manager".into(),
            role: Role::Manager,
        }
    }

    pub fn customer() -> Self {
        Self {
            id: 3,
            name: "Customer".into(),
            role: Role::Customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_through_parse() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse(" Completed "), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn payment_method_from_menu_choice() {
        assert_eq!(PaymentMethod::from_choice(1), PaymentMethod::Card);
        assert_eq!(PaymentMethod::from_choice(2), PaymentMethod::Wallet);
        assert_eq!(PaymentMethod::from_choice(3), PaymentMethod::Sbp);
        assert_eq!(PaymentMethod::from_choice(0), PaymentMethod::Unknown);
        assert_eq!(PaymentMethod::from_choice(42), PaymentMethod::Unknown);
    }
}
