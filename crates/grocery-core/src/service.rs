//! # Order Pricing Service
//!
//! Turns an [`Order`] into a [`Receipt`].
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate_receipt(order)                           │
//! │                                                                         │
//! │  Order items                                                           │
//! │       │  group by ProductType (BTreeMap)                               │
//! │       ▼                                                                 │
//! │  ┌─────────┐ ┌───────────┐ ┌────────┐ ┌─────────┐                      │
//! │  │  Bread  │ │ Vegetable │ │  Beer  │ │  Dairy  │  strategy per type   │
//! │  └────┬────┘ └─────┬─────┘ └───┬────┘ └────┬────┘  (missing = abort)   │
//! │       └────────────┴─────┬─────┴───────────┘                           │
//! │                          ▼                                              │
//! │            lines, subtotal, total_discount                              │
//! │                          │                                              │
//! │                          ▼                                              │
//! │   current_total = subtotal - total_discount                            │
//! │   for rule in order_rules (sorted):                                    │
//! │       discount = min(rule(ctx), current_total)                         │
//! │       total_discount += discount                                       │
//! │       current_total  -= discount                                       │
//! │       ctx = ctx.with_current_total(current_total)                      │
//! │                          │                                              │
//! │                          ▼                                              │
//! │          Receipt { lines, subtotal, total_discount, total }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The service holds only immutable rules and configuration, so a single
//! instance can be shared across threads (`Arc<OrderPricingService>`) and
//! called concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error};

use crate::catalog::RuleCatalog;
use crate::config::PricingConfig;
use crate::context::OrderPricingContext;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::rules::{self, BoxedOrderRule};
use crate::strategy::{self, PricingStrategy};
use crate::types::{AppliedOrderDiscount, Order, OrderItem, ProductType, Receipt, ReceiptLine};

/// Orchestrates the per-product strategies and the order-level rules.
pub struct OrderPricingService {
    strategies: BTreeMap<ProductType, Box<dyn PricingStrategy>>,
    order_rules: Vec<BoxedOrderRule>,
}

impl OrderPricingService {
    /// Creates a service from an explicit set of strategies and order rules.
    ///
    /// Order rules are sorted once by execution order (stable).
    ///
    /// ## Errors
    /// `DuplicateStrategy` if two strategies claim the same product type.
    pub fn new(
        strategies: Vec<Box<dyn PricingStrategy>>,
        mut order_rules: Vec<BoxedOrderRule>,
    ) -> PricingResult<Self> {
        let mut by_type = BTreeMap::new();
        for strategy in strategies {
            let product_type = strategy.product_type();
            if by_type.insert(product_type, strategy).is_some() {
                return Err(PricingError::DuplicateStrategy(product_type));
            }
        }

        order_rules.sort_by_key(|rule| rule.order());

        Ok(OrderPricingService {
            strategies: by_type,
            order_rules,
        })
    }

    /// Creates the standard service: one strategy per product type and the
    /// configured combo rule.
    ///
    /// ## Errors
    /// `Validation` if the configuration is invalid.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use grocery_core::{BeerOrigin, Money, Order, OrderItem, OrderPricingService, PricingConfig};
    ///
    /// let service = OrderPricingService::from_config(Arc::new(PricingConfig::default())).unwrap();
    /// let order = Order::new(vec![OrderItem::beer(6, BeerOrigin::Belgian).unwrap()]);
    ///
    /// let receipt = service.calculate_receipt(&order).unwrap();
    /// assert_eq!(receipt.total(), Money::from_cents(60));
    /// ```
    pub fn from_config(config: Arc<PricingConfig>) -> PricingResult<Self> {
        config.validate()?;
        Self::new(
            strategy::default_strategies(&config),
            rules::order_rules(&config),
        )
    }

    /// Prices `order`.
    ///
    /// ## Errors
    /// - `MissingStrategy` if the order contains a product type without a
    ///   registered strategy; nothing is priced in that case
    /// - `InvariantViolation` if a rule misbehaves or the totals fail to
    ///   reconcile
    /// - `InvalidOrder` if grouped quantities overflow
    pub fn calculate_receipt(&self, order: &Order) -> PricingResult<Receipt> {
        let mut groups: BTreeMap<ProductType, Vec<OrderItem>> = BTreeMap::new();
        for item in order.items() {
            groups.entry(item.product_type()).or_default().push(*item);
        }

        let mut resolved = Vec::with_capacity(groups.len());
        for (product_type, items) in &groups {
            let strategy = self.strategies.get(product_type).ok_or_else(|| {
                error!(%product_type, "No pricing strategy registered");
                PricingError::MissingStrategy(*product_type)
            })?;
            resolved.push((strategy, items));
        }

        let mut lines: Vec<ReceiptLine> = Vec::new();
        for (strategy, items) in resolved {
            lines.extend(strategy.calculate_price(items)?);
        }

        let subtotal: Money = lines.iter().map(ReceiptLine::original_price).sum();
        let mut total_discount: Money = lines.iter().map(ReceiptLine::discount).sum();
        let mut current_total = subtotal - total_discount;

        let mut applied = Vec::new();
        let mut ctx = OrderPricingContext::new(order, subtotal, current_total);
        for rule in self.order_rules.iter() {
            if !rule.is_applicable(&ctx) {
                continue;
            }

            let raw = rule.calculate_discount(&ctx);
            if raw.is_negative() {
                error!(rule = rule.name(), discount = %raw, "Order rule returned a negative amount");
                return Err(PricingError::InvariantViolation(format!(
                    "Order discount rule '{}' returned negative discount {}",
                    rule.name(),
                    raw
                )));
            }

            let discount = raw.min(current_total).normalize();
            total_discount += discount;
            current_total -= discount;
            ctx = ctx.with_current_total(current_total);

            debug!(
                rule = rule.name(),
                discount = %discount,
                current_total = %current_total,
                "Applied order discount"
            );
            applied.push(AppliedOrderDiscount {
                description: rule.description(),
                amount: discount,
            });
        }

        Receipt::new(lines, applied, subtotal, total_discount, current_total).map_err(|e| {
            error!(error = %e, "Receipt failed validation");
            e
        })
    }

    /// Registered strategies in product type order.
    pub fn strategies(&self) -> impl Iterator<Item = &dyn PricingStrategy> + '_ {
        self.strategies.values().map(|strategy| strategy.as_ref())
    }

    /// Registered order-level rules in execution order.
    pub fn order_rules(&self) -> &[BoxedOrderRule] {
        &self.order_rules
    }

    /// Snapshot of every registered rule's description.
    pub fn rule_catalog(&self) -> RuleCatalog {
        RuleCatalog::build(self.strategies(), self.order_rules())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
