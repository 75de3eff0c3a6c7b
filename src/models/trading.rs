//! What the submission endpoints answer with: the order, its cost and any
//! preflight complaints.
//!
//! Money amounts arrive unsigned with a separate `*-effect` field; the
//! `signed` helpers fold the two together, debits negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::PriceEffect;
use super::order::Order;

fn signed(amount: Option<Decimal>, effect: Option<PriceEffect>) -> Option<Decimal> {
    let amount = amount?.abs();
    Some(match effect {
        Some(PriceEffect::Debit) => -amount,
        _ => amount,
    })
}

/// How an order moves margin and buying power.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuyingPowerEffect {
    #[serde(default)]
    pub change_in_margin_requirement: Option<Decimal>,
    #[serde(default)]
    pub change_in_margin_requirement_effect: Option<PriceEffect>,
    #[serde(default)]
    pub change_in_buying_power: Option<Decimal>,
    #[serde(default)]
    pub change_in_buying_power_effect: Option<PriceEffect>,
    #[serde(default)]
    pub current_buying_power: Option<Decimal>,
    #[serde(default)]
    pub current_buying_power_effect: Option<PriceEffect>,
    #[serde(default)]
    pub new_buying_power: Option<Decimal>,
    #[serde(default)]
    pub new_buying_power_effect: Option<PriceEffect>,
    #[serde(default)]
    pub isolated_order_margin_requirement: Option<Decimal>,
    #[serde(default)]
    pub isolated_order_margin_requirement_effect: Option<PriceEffect>,
    #[serde(default)]
    pub is_spread: bool,
    #[serde(default)]
    pub impact: Option<Decimal>,
    #[serde(default)]
    pub effect: Option<PriceEffect>,
}

impl BuyingPowerEffect {
    /// Change in buying power, negative when the order consumes it.
    pub fn signed_buying_power_change(&self) -> Option<Decimal> {
        signed(self.change_in_buying_power, self.change_in_buying_power_effect)
    }
}

/// Fee breakdown for one order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeeCalculation {
    #[serde(default)]
    pub regulatory_fees: Option<Decimal>,
    #[serde(default)]
    pub regulatory_fees_effect: Option<PriceEffect>,
    #[serde(default)]
    pub clearing_fees: Option<Decimal>,
    #[serde(default)]
    pub clearing_fees_effect: Option<PriceEffect>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub commission_effect: Option<PriceEffect>,
    #[serde(default)]
    pub proprietary_index_option_fees: Option<Decimal>,
    #[serde(default)]
    pub proprietary_index_option_fees_effect: Option<PriceEffect>,
    #[serde(default)]
    pub total_fees: Option<Decimal>,
    #[serde(default)]
    pub total_fees_effect: Option<PriceEffect>,
}

impl FeeCalculation {
    /// Magnitude of all fees; zero when the server sent none.
    pub fn total_fees_amount(&self) -> Decimal {
        self.total_fees.unwrap_or(Decimal::ZERO).abs()
    }

    /// Total fees with their effect applied.
    pub fn signed_total_fees(&self) -> Option<Decimal> {
        signed(self.total_fees, self.total_fees_effect)
    }
}

/// A preflight warning or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderMessage {
    /// Machine-readable reason, e.g. `margin_check_failed`
    pub code: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub message: String,
    /// Present on warnings the caller may acknowledge and resubmit
    #[serde(default)]
    pub preflight_id: Option<String>,
}

impl OrderMessage {
    /// Acknowledgeable messages carry a preflight id.
    pub fn is_warning(&self) -> bool {
        self.preflight_id.is_some()
    }
}

/// The `data` of a place or dry-run answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacedOrderResponse {
    /// The order, with a zero id on dry runs
    pub order: Order,
    #[allow(missing_docs)]
    #[serde(default)]
    pub buying_power_effect: Option<BuyingPowerEffect>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub fee_calculation: Option<FeeCalculation>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub warnings: Vec<OrderMessage>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub errors: Vec<OrderMessage>,
}

impl PlacedOrderResponse {
    #[allow(missing_docs)]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[allow(missing_docs)]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The `error` sibling of `data` in a submission answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderErrorResponse {
    #[allow(missing_docs)]
    #[serde(default)]
    pub code: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub message: String,
    /// Per-check failures, in server order
    #[serde(default)]
    pub errors: Vec<OrderMessage>,
}

/// Everything a submission endpoint answers with.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    /// The placement or dry-run result
    pub result: PlacedOrderResponse,
    /// Order-level error, if the server attached one
    pub error: Option<OrderErrorResponse>,
}

impl OrderSubmission {
    /// Returns `true` if neither the result nor the envelope reported errors.
    pub fn is_accepted(&self) -> bool {
        self.error.is_none() && !self.result.has_errors()
    }
}
