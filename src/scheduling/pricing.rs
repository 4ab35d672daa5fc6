//! Duration based pricing

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{enums::DurationType, resource::Resource};

/// `duration_value` units of `duration_type` at the resource's rate.
/// No proration or discount is applied. None when the product overflows.
pub fn price(resource: &Resource, duration_value: Decimal, duration_type: DurationType) -> Option<Decimal> {
    duration_value.checked_mul(resource.pricing.rate(duration_type))
}

/// Round an amount to currency precision (2 decimals, half away from zero)
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
