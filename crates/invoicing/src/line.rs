use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use invoicekit_core::{DomainError, DomainResult, Entity};

/// One billable item inside an invoice, e.g.
///
/// ```text
/// 3 Bananas X $2.00 = $6.00
/// ```
///
/// Fields only change through the setters below. A setter given a value that
/// fails its predicate leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    id: i64,
    cost: f64,
    quantity: u64,
    description: String,
}

impl Default for InvoiceLine {
    fn default() -> Self {
        Self {
            id: -1,
            cost: 0.0,
            quantity: 0,
            description: String::new(),
        }
    }
}

impl InvoiceLine {
    /// Builds a line from defaults, routing every argument through its
    /// setter: an invalid argument leaves the default in place.
    pub fn new(id: i64, cost: f64, quantity: i64, description: impl Into<String>) -> Self {
        let mut line = Self::default();
        line.set_id(id)
            .set_cost(cost)
            .set_quantity(quantity)
            .set_description(description);
        line
    }

    /// Any finite amount, negative for discount or credit lines.
    pub fn is_valid_cost(cost: f64) -> bool {
        cost.is_finite()
    }

    /// Whole units only, zero allowed.
    pub fn is_valid_quantity(quantity: i64) -> bool {
        quantity >= 0
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_id(&mut self, id: i64) -> &mut Self {
        self.id = id;
        self
    }

    pub fn set_cost(&mut self, cost: f64) -> &mut Self {
        let _ = self.try_set_cost(cost);
        self
    }

    pub fn try_set_cost(&mut self, cost: f64) -> DomainResult<&mut Self> {
        if !Self::is_valid_cost(cost) {
            tracing::debug!(line_id = self.id, cost, "invoice line cost rejected");
            return Err(DomainError::validation(format!(
                "invoice line cost must be finite (got {cost})"
            )));
        }
        self.cost = cost;
        Ok(self)
    }

    pub fn set_quantity(&mut self, quantity: i64) -> &mut Self {
        let _ = self.try_set_quantity(quantity);
        self
    }

    pub fn try_set_quantity(&mut self, quantity: i64) -> DomainResult<&mut Self> {
        self.quantity = u64::try_from(quantity).map_err(|_| {
            tracing::debug!(line_id = self.id, quantity, "invoice line quantity rejected");
            DomainError::validation(format!(
                "invoice line quantity must not be negative (got {quantity})"
            ))
        })?;
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// `cost × quantity`, computed from the current fields.
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.cost
    }
}

impl Entity for InvoiceLine {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Money rendered with two decimals. Exact half-cent ties round away from
/// zero (`0.125` prints `0.13`), judged on the exact binary value, so `1.005`
/// (stored just below the tie) prints `1.00`. `-0.0` prints `0.00`.
pub(crate) struct Amount(pub(crate) f64);

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let amount = self.0 + 0.0;
        match Decimal::from_f64_retain(amount) {
            Some(exact) => write!(
                f,
                "{:.2}",
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            // Out of Decimal range: far beyond cent precision anyway.
            None => write!(f, "{amount:.2}"),
        }
    }
}

impl core::fmt::Display for InvoiceLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {} X ${} = ${}",
            self.quantity,
            self.description,
            Amount(self.cost),
            Amount(self.total())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INVALID_COSTS: [f64; 3] = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

    #[test]
    fn default_line_has_sentinel_values() {
        let line = InvoiceLine::default();
        assert_eq!(line.id(), -1);
        assert_eq!(line.cost(), 0.0);
        assert_eq!(line.quantity(), 0);
        assert_eq!(line.description(), "");
    }

    #[test]
    fn constructor_keeps_valid_arguments() {
        let line = InvoiceLine::new(3, -2.5, 7, "Credit");
        assert_eq!(line.id(), 3);
        assert_eq!(line.cost(), -2.5);
        assert_eq!(line.quantity(), 7);
        assert_eq!(line.description(), "Credit");
    }

    #[test]
    fn constructor_falls_back_to_defaults_for_invalid_arguments() {
        let line = InvoiceLine::new(4, f64::NAN, -3, "Pear");
        assert_eq!(line.id(), 4);
        assert_eq!(line.cost(), 0.0);
        assert_eq!(line.quantity(), 0);
        assert_eq!(line.description(), "Pear");
    }

    #[test]
    fn invalid_cost_is_ignored() {
        let mut line = InvoiceLine::new(1, 6.99, 1, "Apple");
        for cost in INVALID_COSTS {
            line.set_cost(cost);
            assert_eq!(line.cost(), 6.99);
        }
    }

    #[test]
    fn try_set_cost_reports_rejection() {
        let mut line = InvoiceLine::new(1, 6.99, 1, "Apple");
        let err = line.try_set_cost(f64::INFINITY).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("finite") => {}
            _ => panic!("Expected Validation error for infinite cost"),
        }
        assert_eq!(line.cost(), 6.99);

        line.try_set_cost(1.25).unwrap();
        assert_eq!(line.cost(), 1.25);
    }

    #[test]
    fn try_set_quantity_reports_rejection() {
        let mut line = InvoiceLine::new(1, 1.0, 5, "Apple");
        assert!(matches!(
            line.try_set_quantity(-1),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(line.quantity(), 5);

        line.try_set_quantity(0).unwrap();
        assert_eq!(line.quantity(), 0);
    }

    #[test]
    fn setters_chain() {
        let mut line = InvoiceLine::default();
        line.set_id(9)
            .set_cost(f64::NAN)
            .set_quantity(2)
            .set_description("Melon")
            .set_quantity(-8);
        assert_eq!(line, InvoiceLine::new(9, 0.0, 2, "Melon"));
    }

    #[test]
    fn total_tracks_current_fields() {
        let mut line = InvoiceLine::new(1, 2.0, 3, "Bananas");
        assert_eq!(line.total(), 6.0);
        line.set_quantity(5);
        assert_eq!(line.total(), 10.0);
        line.set_cost(-1.5);
        assert_eq!(line.total(), -7.5);
    }

    #[test]
    fn clone_is_independent() {
        let original = InvoiceLine::new(1, 0.99, 5, "Onion");
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_id(2).set_cost(3.0).set_quantity(1).set_description("Leek");
        assert_eq!(original, InvoiceLine::new(1, 0.99, 5, "Onion"));
    }

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(
            InvoiceLine::new(1, 2.0, 3, "Bananas").to_string(),
            "3 Bananas X $2.00 = $6.00"
        );
        assert_eq!(
            InvoiceLine::new(2, 10.21, 4, "Banana").to_string(),
            "4 Banana X $10.21 = $40.84"
        );
        assert_eq!(
            InvoiceLine::new(3, -5.0, 1, "").to_string(),
            "1  X $-5.00 = $-5.00"
        );
        assert_eq!(
            InvoiceLine::new(4, -5.0, 0, "Voucher").to_string(),
            "0 Voucher X $-5.00 = $0.00"
        );
    }

    #[test]
    fn half_cent_ties_round_away_from_zero() {
        assert_eq!(InvoiceLine::new(1, 0.125, 1, "x").to_string(), "1 x X $0.13 = $0.13");
        assert_eq!(InvoiceLine::new(2, 0.375, 1, "x").to_string(), "1 x X $0.38 = $0.38");
        assert_eq!(InvoiceLine::new(3, 1.125, 2, "x").to_string(), "2 x X $1.13 = $2.25");
        assert_eq!(InvoiceLine::new(4, -0.125, 1, "x").to_string(), "1 x X $-0.13 = $-0.13");
    }

    #[test]
    fn amounts_just_below_a_tie_round_down() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(Amount(1.005).to_string(), "1.00");
        assert_eq!(Amount(2.675).to_string(), "2.67");
        assert_eq!(Amount(-0.0).to_string(), "0.00");
        assert_eq!(Amount(6.0).to_string(), "6.00");
    }

    #[test]
    fn serializes_fields_by_name() {
        let json = serde_json::to_value(InvoiceLine::new(1, 1.99, 20, "Pear")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "cost": 1.99,
                "quantity": 20,
                "description": "Pear",
            })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a rejected cost never changes the stored cost.
        #[test]
        fn rejected_cost_is_idempotent(
            start in -1.0e6f64..1.0e6f64,
            pick in 0usize..3
        ) {
            let mut line = InvoiceLine::new(1, start, 1, "");
            line.set_cost(INVALID_COSTS[pick]);
            prop_assert_eq!(line.cost(), start);
        }

        /// Property: any finite cost is stored exactly.
        #[test]
        fn finite_cost_is_stored_exactly(
            cost in any::<f64>().prop_filter("finite", |c| c.is_finite())
        ) {
            let mut line = InvoiceLine::new(1, 6.99, 1, "");
            line.set_cost(cost);
            prop_assert_eq!(line.cost().to_bits(), cost.to_bits());
        }

        /// Property: a negative quantity never changes the stored quantity,
        /// a non-negative one is stored exactly.
        #[test]
        fn quantity_follows_predicate(start in 0i64..1_000_000, next in any::<i64>()) {
            let mut line = InvoiceLine::new(1, 1.0, start, "");
            line.set_quantity(next);
            if next >= 0 {
                prop_assert_eq!(line.quantity(), next as u64);
            } else {
                prop_assert_eq!(line.quantity(), start as u64);
            }
        }

        /// Property: any id and description are stored exactly.
        #[test]
        fn id_and_description_always_apply(id in any::<i64>(), description in ".{0,64}") {
            let mut line = InvoiceLine::default();
            line.set_id(id).set_description(description.clone());
            prop_assert_eq!(line.id(), id);
            prop_assert_eq!(line.description(), description.as_str());
        }
    }
}
