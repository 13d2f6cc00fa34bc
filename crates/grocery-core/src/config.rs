//! # Pricing Configuration
//!
//! Prices, thresholds and discount rates read by the pricing rules.
//!
//! The engine never loads or persists this structure. Callers build it
//! (usually by deserializing a TOML file), call [`PricingConfig::validate`],
//! and hand it over wrapped in an `Arc`. From then on it is read-only.
//!
//! ## Configuration File Format
//! ```toml
//! [bread]
//! unit_price = "1.00"
//! bundle_min_age = 3   # buy 1 take 2 from this age...
//! special_age = 6      # ...up to (excluding) this age, which gets buy 1 take 3
//!
//! [vegetable]
//! price_per_100g = "1.00"
//! small_weight_threshold = 100
//! medium_weight_threshold = 500
//! small_weight_discount = "0.05"
//! medium_weight_discount = "0.07"
//! large_weight_discount = "0.10"
//!
//! [beer]
//! pack_size = 6
//! belgian = { base_price = "0.60", pack_discount = "3.00" }
//! dutch = { base_price = "0.50", pack_discount = "2.00" }
//! german = { base_price = "0.80", pack_discount = "4.00", pack_size = 12 }
//! free_bottle = { origin = "DUTCH", every = 3 }
//!
//! [dairy]
//! unit_price = "1.20"
//! discount_rate = "0.10"
//! price_threshold = "10.00"
//!
//! [combo]
//! discount_rate = "0.05"
//! product_types = ["BREAD", "VEGETABLE"]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BeerOrigin, ProductType};
use crate::validation::{
    validate_discount_amount, validate_price, validate_quantity, validate_range, validate_rate,
    ValidationResult,
};
use crate::MAX_BREAD_AGE_DAYS;

// =============================================================================
// Bread
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreadConfig {
    #[serde(default = "default_bread_unit_price")]
    pub unit_price: Money,

    /// First age (days) that qualifies for buy 1 take 2.
    #[serde(default = "default_bundle_min_age")]
    pub bundle_min_age: u32,

    /// Age (days) that qualifies for buy 1 take 3. Ages in
    /// `[bundle_min_age, special_age)` get buy 1 take 2.
    #[serde(default = "default_special_age")]
    pub special_age: u32,
}

fn default_bread_unit_price() -> Money {
    Money::from_cents(100)
}

fn default_bundle_min_age() -> u32 {
    3
}

fn default_special_age() -> u32 {
    6
}

impl Default for BreadConfig {
    fn default() -> Self {
        BreadConfig {
            unit_price: default_bread_unit_price(),
            bundle_min_age: default_bundle_min_age(),
            special_age: default_special_age(),
        }
    }
}

// =============================================================================
// Vegetable
// =============================================================================

/// Weight tiers are half-open: a weight equal to a threshold falls into the
/// next tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VegetableConfig {
    #[serde(default = "default_price_per_100g")]
    pub price_per_100g: Money,

    #[serde(default = "default_small_weight_threshold")]
    pub small_weight_threshold: u32,

    #[serde(default = "default_medium_weight_threshold")]
    pub medium_weight_threshold: u32,

    #[serde(default = "default_small_weight_discount")]
    pub small_weight_discount: Decimal,

    #[serde(default = "default_medium_weight_discount")]
    pub medium_weight_discount: Decimal,

    #[serde(default = "default_large_weight_discount")]
    pub large_weight_discount: Decimal,
}

fn default_price_per_100g() -> Money {
    Money::from_cents(100)
}

fn default_small_weight_threshold() -> u32 {
    100
}

fn default_medium_weight_threshold() -> u32 {
    500
}

fn default_small_weight_discount() -> Decimal {
    Decimal::new(5, 2)
}

fn default_medium_weight_discount() -> Decimal {
    Decimal::new(7, 2)
}

fn default_large_weight_discount() -> Decimal {
    Decimal::new(10, 2)
}

impl Default for VegetableConfig {
    fn default() -> Self {
        VegetableConfig {
            price_per_100g: default_price_per_100g(),
            small_weight_threshold: default_small_weight_threshold(),
            medium_weight_threshold: default_medium_weight_threshold(),
            small_weight_discount: default_small_weight_discount(),
            medium_weight_discount: default_medium_weight_discount(),
            large_weight_discount: default_large_weight_discount(),
        }
    }
}

impl VegetableConfig {
    /// The discount rate for a total weight.
    pub fn discount_rate_for(&self, weight_grams: u32) -> Decimal {
        if weight_grams < self.small_weight_threshold {
            self.small_weight_discount
        } else if weight_grams < self.medium_weight_threshold {
            self.medium_weight_discount
        } else {
            self.large_weight_discount
        }
    }
}

// =============================================================================
// Beer
// =============================================================================

/// Prices for one beer origin.
///
/// Keys left out of an origin's table fall back to that origin's standard
/// prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeerOriginConfig {
    /// Price of a single bottle.
    pub base_price: Money,

    /// Fixed discount per full pack.
    pub pack_discount: Money,

    /// Overrides the global pack size for this origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<u32>,
}

impl BeerOriginConfig {
    fn new(base_cents: i64, pack_discount_cents: i64) -> Self {
        BeerOriginConfig {
            base_price: Money::from_cents(base_cents),
            pack_discount: Money::from_cents(pack_discount_cents),
            pack_size: None,
        }
    }
}

/// Serialized form of an origin table; every key is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OriginOverride {
    #[serde(default)]
    base_price: Option<Money>,

    #[serde(default)]
    pack_discount: Option<Money>,

    #[serde(default)]
    pack_size: Option<u32>,
}

impl OriginOverride {
    fn apply_to(self, standard: BeerOriginConfig) -> BeerOriginConfig {
        BeerOriginConfig {
            base_price: self.base_price.unwrap_or(standard.base_price),
            pack_discount: self.pack_discount.unwrap_or(standard.pack_discount),
            pack_size: self.pack_size.or(standard.pack_size),
        }
    }
}

fn deserialize_belgian<'de, D: Deserializer<'de>>(d: D) -> Result<BeerOriginConfig, D::Error> {
    OriginOverride::deserialize(d).map(|o| o.apply_to(default_belgian()))
}

fn deserialize_dutch<'de, D: Deserializer<'de>>(d: D) -> Result<BeerOriginConfig, D::Error> {
    OriginOverride::deserialize(d).map(|o| o.apply_to(default_dutch()))
}

fn deserialize_german<'de, D: Deserializer<'de>>(d: D) -> Result<BeerOriginConfig, D::Error> {
    OriginOverride::deserialize(d).map(|o| o.apply_to(default_german()))
}

/// "Every n-th bottle free" promotion for a single origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreeBottleConfig {
    pub origin: BeerOrigin,
    pub every: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeerConfig {
    #[serde(default = "default_pack_size")]
    pub pack_size: u32,

    #[serde(default = "default_belgian", deserialize_with = "deserialize_belgian")]
    pub belgian: BeerOriginConfig,

    #[serde(default = "default_dutch", deserialize_with = "deserialize_dutch")]
    pub dutch: BeerOriginConfig,

    #[serde(default = "default_german", deserialize_with = "deserialize_german")]
    pub german: BeerOriginConfig,

    /// Absent unless the promotion is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_bottle: Option<FreeBottleConfig>,
}

fn default_pack_size() -> u32 {
    6
}

fn default_belgian() -> BeerOriginConfig {
    BeerOriginConfig::new(60, 300)
}

fn default_dutch() -> BeerOriginConfig {
    BeerOriginConfig::new(50, 200)
}

fn default_german() -> BeerOriginConfig {
    BeerOriginConfig::new(80, 400)
}

impl Default for BeerConfig {
    fn default() -> Self {
        BeerConfig {
            pack_size: default_pack_size(),
            belgian: default_belgian(),
            dutch: default_dutch(),
            german: default_german(),
            free_bottle: None,
        }
    }
}

impl BeerConfig {
    pub fn origin(&self, origin: BeerOrigin) -> &BeerOriginConfig {
        match origin {
            BeerOrigin::Belgian => &self.belgian,
            BeerOrigin::Dutch => &self.dutch,
            BeerOrigin::German => &self.german,
        }
    }

    /// Pack size for `origin`, falling back to the global pack size.
    pub fn pack_size_for(&self, origin: BeerOrigin) -> u32 {
        self.origin(origin).pack_size.unwrap_or(self.pack_size)
    }
}

// =============================================================================
// Dairy
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DairyConfig {
    #[serde(default = "default_dairy_unit_price")]
    pub unit_price: Money,

    #[serde(default = "default_dairy_discount_rate")]
    pub discount_rate: Decimal,

    /// Groups priced at or above this amount get `discount_rate` off.
    #[serde(default = "default_dairy_price_threshold")]
    pub price_threshold: Money,
}

fn default_dairy_unit_price() -> Money {
    Money::from_cents(120)
}

fn default_dairy_discount_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_dairy_price_threshold() -> Money {
    Money::from_cents(1000)
}

impl Default for DairyConfig {
    fn default() -> Self {
        DairyConfig {
            unit_price: default_dairy_unit_price(),
            discount_rate: default_dairy_discount_rate(),
            price_threshold: default_dairy_price_threshold(),
        }
    }
}

// =============================================================================
// Combo
// =============================================================================

/// Order-level discount for orders containing every listed product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComboConfig {
    #[serde(default = "default_combo_discount_rate")]
    pub discount_rate: Decimal,

    #[serde(default = "default_combo_product_types")]
    pub product_types: Vec<ProductType>,
}

fn default_combo_discount_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn default_combo_product_types() -> Vec<ProductType> {
    vec![ProductType::Bread, ProductType::Vegetable]
}

impl Default for ComboConfig {
    fn default() -> Self {
        ComboConfig {
            discount_rate: default_combo_discount_rate(),
            product_types: default_combo_product_types(),
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete pricing configuration. Every section and field is optional in
/// serialized form and falls back to the store's standard prices. Unknown
/// keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    #[serde(default)]
    pub bread: BreadConfig,

    #[serde(default)]
    pub vegetable: VegetableConfig,

    #[serde(default)]
    pub beer: BeerConfig,

    #[serde(default)]
    pub dairy: DairyConfig,

    #[serde(default)]
    pub combo: ComboConfig,
}

impl PricingConfig {
    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Prices must be positive; pack discounts must not be negative
    /// - Rates must lie in `[0, 1]`
    /// - `bundle_min_age <= special_age <= MAX_BREAD_AGE_DAYS`
    /// - The small weight threshold must be below the medium one
    /// - Pack sizes and the free-bottle interval must be at least 1
    /// - The combo must name at least one product type
    pub fn validate(&self) -> ValidationResult<()> {
        validate_price("bread.unit_price", self.bread.unit_price)?;
        validate_range(
            "bread.special_age",
            self.bread.special_age,
            0,
            MAX_BREAD_AGE_DAYS,
        )?;
        validate_range(
            "bread.bundle_min_age",
            self.bread.bundle_min_age,
            0,
            self.bread.special_age,
        )?;

        let veg = &self.vegetable;
        validate_price("vegetable.price_per_100g", veg.price_per_100g)?;
        validate_rate("vegetable.small_weight_discount", veg.small_weight_discount)?;
        validate_rate("vegetable.medium_weight_discount", veg.medium_weight_discount)?;
        validate_rate("vegetable.large_weight_discount", veg.large_weight_discount)?;
        if veg.small_weight_threshold >= veg.medium_weight_threshold {
            return Err(ValidationError::InvalidFormat {
                field: "vegetable.small_weight_threshold".to_string(),
                reason: format!(
                    "must be below medium_weight_threshold ({})",
                    veg.medium_weight_threshold
                ),
            });
        }

        validate_quantity("beer.pack_size", self.beer.pack_size)?;
        for origin in BeerOrigin::ALL {
            let prices = self.beer.origin(origin);
            let section = origin.display_name().to_lowercase();
            validate_price(&format!("beer.{}.base_price", section), prices.base_price)?;
            validate_discount_amount(
                &format!("beer.{}.pack_discount", section),
                prices.pack_discount,
            )?;
            if let Some(size) = prices.pack_size {
                validate_quantity(&format!("beer.{}.pack_size", section), size)?;
            }
        }
        if let Some(promo) = &self.beer.free_bottle {
            validate_quantity("beer.free_bottle.every", promo.every)?;
        }

        validate_price("dairy.unit_price", self.dairy.unit_price)?;
        validate_rate("dairy.discount_rate", self.dairy.discount_rate)?;
        validate_discount_amount("dairy.price_threshold", self.dairy.price_threshold)?;

        validate_rate("combo.discount_rate", self.combo.discount_rate)?;
        if self.combo.product_types.is_empty() {
            return Err(ValidationError::Required {
                field: "combo.product_types".to_string(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
