//! Status and classification enums for orders, products and payments.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kitchen status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting confirmation",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready for pickup",
            Self::Delivered => "Completed",
        }
    }

    /// CSS modifier used by the order history badge.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Pending => "status-pending",
            Self::Confirmed => "status-confirmed",
            Self::Preparing => "status-preparing",
            Self::Ready => "status-ready",
            Self::Delivered => "status-delivered",
        }
    }
}

/// Menu section a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Drink,
    Main,
    Side,
}

impl ProductCategory {
    /// All categories in menu order.
    pub const ALL: [Self; 3] = [Self::Drink, Self::Main, Self::Side];

    /// Stored/query-string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drink => "DRINK",
            Self::Main => "MAIN",
            Self::Side => "SIDE",
        }
    }

    /// Menu heading.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Drink => "Drinks",
            Self::Main => "Mains",
            Self::Side => "Sides",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRINK" => Ok(Self::Drink),
            "MAIN" => Ok(Self::Main),
            "SIDE" => Ok(Self::Side),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    Digital,
}

impl PaymentMethod {
    /// All methods in the order they are offered.
    pub const ALL: [Self; 3] = [Self::Card, Self::Cash, Self::Digital];

    /// Form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Digital => "digital",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit card",
            Self::Cash => "Cash on delivery",
            Self::Digital => "Digital wallet (Line Pay / Apple Pay)",
        }
    }
}

/// A string did not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serializes_screaming_case() {
        let json = serde_json::to_string(&OrderStatus::Ready).ok();
        assert_eq!(json.as_deref(), Some("\"READY\""));
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in ProductCategory::ALL {
            assert_eq!(category.as_str().parse::<ProductCategory>(), Ok(category));
        }
        assert!("BREAKFAST".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_payment_method_deserializes_form_values() {
        let method: Result<PaymentMethod, _> = serde_json::from_str("\"digital\"");
        assert_eq!(method.ok(), Some(PaymentMethod::Digital));
        assert_eq!(PaymentMethod::default(), PaymentMethod::Card);
    }
}
