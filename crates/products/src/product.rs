use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

/// A stocked product.
///
/// `id` is assigned by storage on creation; `0` means "not yet persisted".
/// `low_stock_threshold == 0` disables low-stock monitoring for the product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub low_stock_threshold: i64,
}

impl Product {
    pub fn new(name: impl Into<String>, stock_quantity: i64, low_stock_threshold: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            stock_quantity,
            low_stock_threshold,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Low stock iff monitoring is enabled and stock is strictly below the threshold.
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_threshold > 0 && self.stock_quantity < self.low_stock_threshold
    }

    /// Field rules shared by create and update. The id is not checked here.
    pub fn validate_fields(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.stock_quantity < 0 {
            return Err(DomainError::NegativeStock);
        }
        if self.low_stock_threshold < 0 {
            return Err(DomainError::NegativeThreshold);
        }
        Ok(())
    }

    /// Stock after adding `amount`, refusing to exceed `i64::MAX`.
    pub(crate) fn increased_stock(&self, amount: i64) -> Result<i64, DomainError> {
        if self.stock_quantity > i64::MAX - amount {
            return Err(DomainError::StockOverflow);
        }
        Ok(self.stock_quantity + amount)
    }

    /// Stock after removing `amount`, refusing to go below zero.
    pub(crate) fn decreased_stock(&self, amount: i64) -> Result<i64, DomainError> {
        if self.stock_quantity < amount {
            return Err(DomainError::InsufficientStock);
        }
        Ok(self.stock_quantity - amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_name_is_rejected() {
        let product = Product::new("   \t\n", 1, 0);
        assert_eq!(product.validate_fields(), Err(DomainError::EmptyName));
    }

    #[test]
    fn name_check_runs_before_quantity_checks() {
        let product = Product::new("", -1, -1);
        assert_eq!(product.validate_fields(), Err(DomainError::EmptyName));

        let product = Product::new("Widget", -1, -1);
        assert_eq!(product.validate_fields(), Err(DomainError::NegativeStock));

        let product = Product::new("Widget", 0, -1);
        assert_eq!(product.validate_fields(), Err(DomainError::NegativeThreshold));
    }

    #[test]
    fn zero_threshold_is_never_low_stock() {
        assert!(!Product::new("Widget", 0, 0).is_low_stock());
    }

    #[test]
    fn stock_equal_to_threshold_is_not_low() {
        assert!(!Product::new("Widget", 2, 2).is_low_stock());
        assert!(Product::new("Widget", 1, 2).is_low_stock());
        assert!(Product::new("Widget", 0, 2).is_low_stock());
    }

    #[test]
    fn overflow_guard_does_not_overflow() {
        let product = Product::new("Widget", i64::MAX - 1, 0);
        assert_eq!(product.increased_stock(1), Ok(i64::MAX));
        assert_eq!(product.increased_stock(2), Err(DomainError::StockOverflow));
        assert_eq!(product.increased_stock(i64::MAX), Err(DomainError::StockOverflow));
    }

    #[test]
    fn decrease_to_zero_is_allowed() {
        let product = Product::new("Widget", 8, 2);
        assert_eq!(product.decreased_stock(8), Ok(0));
        assert_eq!(product.decreased_stock(9), Err(DomainError::InsufficientStock));
    }

    #[test]
    fn missing_optional_fields_default_on_deserialize() {
        let product: Product = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
        assert_eq!(product, Product::new("Widget", 0, 0));
        assert!(!product.is_persisted());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: low stock matches `threshold > 0 && stock < threshold` exactly.
            #[test]
            fn low_stock_predicate_matches_rule(stock in 0i64..1_000, threshold in 0i64..1_000) {
                let product = Product::new("P", stock, threshold);
                prop_assert_eq!(product.is_low_stock(), threshold > 0 && stock < threshold);
            }

            /// Property: any negative stock is rejected for a well-named product.
            #[test]
            fn negative_stock_rejected(stock in i64::MIN..0, threshold in 0i64..100) {
                let product = Product::new("P", stock, threshold);
                prop_assert_eq!(product.validate_fields(), Err(DomainError::NegativeStock));
            }

            /// Property: any negative threshold is rejected once stock is valid.
            #[test]
            fn negative_threshold_rejected(stock in 0i64..100, threshold in i64::MIN..0) {
                let product = Product::new("P", stock, threshold);
                prop_assert_eq!(product.validate_fields(), Err(DomainError::NegativeThreshold));
            }

            /// Property: blank names are rejected regardless of quantities.
            #[test]
            fn blank_names_rejected(name in "[ \t\r\n]{0,8}", stock in any::<i64>(), threshold in any::<i64>()) {
                let product = Product::new(name, stock, threshold);
                prop_assert_eq!(product.validate_fields(), Err(DomainError::EmptyName));
            }

            /// Property: increase then decrease by the same amount restores stock.
            #[test]
            fn increase_then_decrease_restores(stock in 0i64..1_000_000, amount in 1i64..1_000_000) {
                let mut product = Product::new("P", stock, 0);
                product.stock_quantity = product.increased_stock(amount).unwrap();
                product.stock_quantity = product.decreased_stock(amount).unwrap();
                prop_assert_eq!(product.stock_quantity, stock);
            }
        }
    }
}
