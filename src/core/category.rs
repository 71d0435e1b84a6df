//! Product categories and their price projection formulas.

use crate::core::rounding::round_to_decimal;
use std::fmt::Display;

/// Annual growth rate and resale markup for one product category.
///
/// Both are fixed business constants; they are not read from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryFormula {
    /// Compounded once per elapsed year.
    pub growth_rate: f64,
    /// Applied once on top of the grown price.
    pub markup: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Spices,
    Seasoning,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 2] = [ProductCategory::Spices, ProductCategory::Seasoning];

    pub fn formula(&self) -> CategoryFormula {
        match self {
            ProductCategory::Spices => CategoryFormula {
                growth_rate: 0.005,
                markup: 0.10,
            },
            ProductCategory::Seasoning => CategoryFormula {
                growth_rate: 0.015,
                markup: 0.20,
            },
        }
    }
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ProductCategory::Spices => "Spices",
                ProductCategory::Seasoning => "Seasoning",
            }
        )
    }
}

impl CategoryFormula {
    /// Projects a base USD price `years_elapsed` years forward and applies
    /// the markup, rounded to one decimal place.
    pub fn project(&self, base_usd: f64, years_elapsed: u32) -> f64 {
        let grown = base_usd * (1.0 + self.growth_rate).powi(years_elapsed as i32);
        round_to_decimal(grown * (1.0 + self.markup), 1)
    }
}
