//! Orders: what gets submitted, edited and listed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::{AccountNumber, OrderId};
use crate::{Error, Result};

/// An order ready to send to `place` or `dry_run`.
///
/// Either build one with [`NewOrderBuilder`], which checks it, or fill the
/// struct by hand and call [`NewOrder::validate`].
///
/// # Example
///
/// ```
/// use tasty_rs::models::{NewOrderBuilder, OrderType, TimeInForce, OrderLeg, PriceEffect};
/// use rust_decimal_macros::dec;
///
/// let order = NewOrderBuilder::default()
///     .time_in_force(TimeInForce::Day)
///     .order_type(OrderType::Limit)
///     .price(dec!(150.00))
///     .price_effect(PriceEffect::Debit)
///     .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
///     .build()
///     .unwrap();
/// assert_eq!(order.legs.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NewOrder {
    #[allow(missing_docs)]
    pub time_in_force: TimeInForce,
    #[allow(missing_docs)]
    pub order_type: OrderType,
    /// Limit price; needed by limit-style order types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Sign of `price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_effect: Option<PriceEffect>,
    /// Arming price for stop-style order types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_trigger: Option<Decimal>,
    /// Expiry of a `GTD` order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtc_date: Option<NaiveDate>,
    /// Dollar amount of a notional order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Sign of `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_effect: Option<PriceEffect>,
    /// Free-form tag naming the submitting application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Marks orders placed by an automated system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_source: Option<bool>,
    /// One entry per instrument
    pub legs: Vec<OrderLeg>,
    /// Caller-chosen id echoed back on the order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
}

impl NewOrder {
    /// Check the field combinations the API would refuse.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(Error::InvalidInput(msg.to_string()));

        if self.legs.is_empty() {
            return fail("an order needs at least one leg");
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return fail("this order type needs a price");
        }
        if self.order_type.requires_stop_trigger() && self.stop_trigger.is_none() {
            return fail("this order type needs a stop trigger");
        }
        if self.time_in_force == TimeInForce::Gtd && self.gtc_date.is_none() {
            return fail("a GTD order needs a gtc date");
        }
        if self.price.is_some() && self.value.is_some() {
            return fail("price and value are mutually exclusive");
        }
        Ok(())
    }
}

/// Step-by-step construction of a [`NewOrder`].
///
/// `time_in_force` and `order_type` are mandatory; `build` runs
/// [`NewOrder::validate`] on the result.
#[derive(Debug, Default, Clone)]
pub struct NewOrderBuilder {
    time_in_force: Option<TimeInForce>,
    order_type: Option<OrderType>,
    price: Option<Decimal>,
    price_effect: Option<PriceEffect>,
    stop_trigger: Option<Decimal>,
    gtc_date: Option<NaiveDate>,
    value: Option<Decimal>,
    value_effect: Option<PriceEffect>,
    source: Option<String>,
    legs: Vec<OrderLeg>,
    external_identifier: Option<String>,
}

impl NewOrderBuilder {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(missing_docs)]
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    #[allow(missing_docs)]
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    #[allow(missing_docs)]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[allow(missing_docs)]
    pub fn price_effect(mut self, effect: PriceEffect) -> Self {
        self.price_effect = Some(effect);
        self
    }

    #[allow(missing_docs)]
    pub fn stop_trigger(mut self, price: Decimal) -> Self {
        self.stop_trigger = Some(price);
        self
    }

    /// Expiry date; only meaningful with [`TimeInForce::Gtd`].
    pub fn gtc_date(mut self, date: NaiveDate) -> Self {
        self.gtc_date = Some(date);
        self
    }

    /// Dollar amount for [`OrderType::NotionalMarket`].
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    #[allow(missing_docs)]
    pub fn value_effect(mut self, effect: PriceEffect) -> Self {
        self.value_effect = Some(effect);
        self
    }

    #[allow(missing_docs)]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Replace all legs.
    pub fn legs(mut self, legs: Vec<OrderLeg>) -> Self {
        self.legs = legs;
        self
    }

    /// Append one leg.
    pub fn add_leg(mut self, leg: OrderLeg) -> Self {
        self.legs.push(leg);
        self
    }

    #[allow(missing_docs)]
    pub fn external_identifier(mut self, id: impl Into<String>) -> Self {
        self.external_identifier = Some(id.into());
        self
    }

    /// Finish the order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] naming the first missing or conflicting field.
    pub fn build(self) -> Result<NewOrder> {
        let missing = |field: &str| Error::InvalidInput(format!("{} is required", field));

        let order = NewOrder {
            time_in_force: self.time_in_force.ok_or_else(|| missing("time_in_force"))?,
            order_type: self.order_type.ok_or_else(|| missing("order_type"))?,
            price: self.price,
            price_effect: self.price_effect,
            stop_trigger: self.stop_trigger,
            gtc_date: self.gtc_date,
            value: self.value,
            value_effect: self.value_effect,
            source: self.source,
            automated_source: None,
            legs: self.legs,
            external_identifier: self.external_identifier,
        };
        order.validate()?;
        Ok(order)
    }
}

/// One instrument within a [`NewOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderLeg {
    #[allow(missing_docs)]
    pub instrument_type: InstrumentType,
    /// Ticker, or OCC symbol for options
    pub symbol: String,
    /// Absent for notional orders, which size by `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[allow(missing_docs)]
    pub action: OrderAction,
}

impl OrderLeg {
    #[allow(missing_docs)]
    pub fn new(
        instrument_type: InstrumentType,
        symbol: impl Into<String>,
        quantity: Decimal,
        action: OrderAction,
    ) -> Self {
        Self {
            instrument_type,
            symbol: symbol.into(),
            quantity: Some(quantity),
            action,
        }
    }

    /// Open a long stock position.
    pub fn buy_equity(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::Equity, symbol, quantity, OrderAction::BuyToOpen)
    }

    /// Close a long stock position.
    pub fn sell_equity(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::Equity, symbol, quantity, OrderAction::SellToClose)
    }

    /// Open a long option position; `symbol` is the OCC symbol.
    pub fn buy_to_open_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::EquityOption, symbol, quantity, OrderAction::BuyToOpen)
    }

    /// Close a long option position; `symbol` is the OCC symbol.
    pub fn sell_to_close_option(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(InstrumentType::EquityOption, symbol, quantity, OrderAction::SellToClose)
    }
}

/// Changes to a working order, used by replace, edit and their dry run.
///
/// Legs can't change; every other order field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderEdit {
    /// How long the order remains active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Type of order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    /// Limit price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Whether the price results in a credit or debit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_effect: Option<PriceEffect>,
    /// Stop trigger price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_trigger: Option<Decimal>,
    /// Date for GTD orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtc_date: Option<NaiveDate>,
    /// Notional value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Effect of notional value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_effect: Option<PriceEffect>,
    /// Whether to automatically route to the best venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_source: Option<bool>,
    /// Client-provided identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
}

/// Filters for the order history endpoints.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrdersQuery {
    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i32>,
    /// Page offset (0-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_offset: Option<i32>,
    /// Earliest date to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest date to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Underlying symbol filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_symbol: Option<String>,
    /// Statuses to include
    #[serde(rename = "status[]", skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<OrderStatus>,
    /// Futures symbol filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub futures_symbol: Option<String>,
    /// Underlying instrument type filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_instrument_type: Option<InstrumentType>,
    /// Sort order, `Asc` or `Desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Earliest time to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    /// Latest time to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    /// Accounts to include, for the customer-wide endpoints
    #[serde(rename = "account-numbers[]", skip_serializing_if = "Vec::is_empty")]
    pub account_numbers: Vec<AccountNumber>,
}

/// An order as the API reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Order {
    #[allow(missing_docs)]
    pub id: OrderId,
    #[allow(missing_docs)]
    pub account_number: String,
    #[allow(missing_docs)]
    pub time_in_force: TimeInForce,
    #[allow(missing_docs)]
    pub order_type: OrderType,
    /// Shared underlying of all legs
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub underlying_instrument_type: Option<InstrumentType>,
    #[allow(missing_docs)]
    pub status: OrderStatus,
    #[allow(missing_docs)]
    #[serde(default)]
    pub price: Option<Decimal>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub price_effect: Option<PriceEffect>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub stop_trigger: Option<Decimal>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub value: Option<Decimal>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub value_effect: Option<PriceEffect>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub legs: Vec<FilledOrderLeg>,
    /// Quantity across all legs
    #[serde(default)]
    pub size: Option<Decimal>,
    /// Server says a cancel would be accepted now
    #[serde(default)]
    pub cancellable: bool,
    /// Server says an edit would be accepted now
    #[serde(default)]
    pub editable: bool,
    /// The order has been edited at least once
    #[serde(default)]
    pub edited: bool,
    /// Login that submitted the order
    #[serde(default)]
    pub username: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub source: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub external_identifier: Option<String>,
    /// Set while the order waits on `reconfirm`
    #[serde(default)]
    pub confirmation_status: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub live_at: Option<DateTime<Utc>>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the order reached a terminal status
    #[serde(default)]
    pub terminal_at: Option<DateTime<Utc>>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub gtc_date: Option<NaiveDate>,
    /// Parent when this order belongs to an OCO/OTOCO group
    #[serde(default)]
    pub complex_order_id: Option<OrderId>,
    /// Set on the order created by `replace`
    #[serde(default)]
    pub replaces_order_id: Option<OrderId>,
    /// Set on the order that `replace` superseded
    #[serde(default)]
    pub replacing_order_id: Option<OrderId>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub reject_reason: Option<String>,
}

impl Order {
    /// Whether a cancel request can still succeed.
    pub fn is_cancellable(&self) -> bool {
        self.cancellable && !self.status.is_terminal()
    }

    /// Whether an edit or replace can still succeed.
    pub fn is_editable(&self) -> bool {
        self.editable && !self.status.is_terminal()
    }

    #[allow(missing_docs)]
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }
}

/// A leg of an [`Order`], with its executions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilledOrderLeg {
    #[allow(missing_docs)]
    pub instrument_type: InstrumentType,
    #[allow(missing_docs)]
    pub symbol: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Still unfilled
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    #[allow(missing_docs)]
    pub action: OrderAction,
    #[allow(missing_docs)]
    #[serde(default)]
    pub fills: Vec<Fill>,
}

/// One execution against a leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fill {
    #[allow(missing_docs)]
    pub quantity: Decimal,
    #[allow(missing_docs)]
    pub fill_price: Decimal,
    #[allow(missing_docs)]
    pub filled_at: DateTime<Utc>,
    /// Venue that executed the fill
    #[serde(default)]
    pub destination_venue: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub ext_exec_id: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub ext_group_fill_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_builder_valid() {
        let order = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Limit)
            .price(dec!(150.00))
            .price_effect(PriceEffect::Debit)
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
            .build()
            .unwrap();

        assert_eq!(order.time_in_force, TimeInForce::Day);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.price, Some(dec!(150.00)));
        assert_eq!(order.legs.len(), 1);
    }

    fn invalid_input(result: Result<NewOrder>) -> String {
        match result {
            Err(Error::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_order_builder_missing_tif() {
        let result = NewOrderBuilder::new()
            .order_type(OrderType::Limit)
            .price(dec!(150.00))
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
            .build();

        assert_eq!(invalid_input(result), "time_in_force is required");
    }

    #[test]
    fn test_order_builder_limit_no_price() {
        let result = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Limit)
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
            .build();

        assert_eq!(invalid_input(result), "this order type needs a price");
    }

    #[test]
    fn test_order_builder_stop_no_trigger() {
        let result = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Stop)
            .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
            .build();

        assert_eq!(invalid_input(result), "this order type needs a stop trigger");
    }

    #[test]
    fn test_order_builder_no_legs() {
        let result = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Market)
            .build();

        assert_eq!(invalid_input(result), "an order needs at least one leg");
    }

    #[test]
    fn test_hand_built_order_validation() {
        let mut order = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Gtd)
            .order_type(OrderType::Market)
            .gtc_date(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
            .add_leg(OrderLeg::buy_equity("SPY", dec!(1)))
            .build()
            .unwrap();
        assert!(order.validate().is_ok());

        order.gtc_date = None;
        assert!(order.validate().is_err());

        order.time_in_force = TimeInForce::Day;
        order.price = Some(dec!(1));
        order.value = Some(dec!(100));
        assert_eq!(
            invalid_input(order.validate().map(|_| order.clone())),
            "price and value are mutually exclusive"
        );
    }

    #[test]
    fn test_new_order_wire_format() {
        let order = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Gtc)
            .order_type(OrderType::Market)
            .add_leg(OrderLeg::sell_to_close_option("AAPL  240119C00150000", dec!(5)))
            .build()
            .unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "time-in-force": "GTC",
                "order-type": "Market",
                "legs": [{
                    "instrument-type": "Equity Option",
                    "symbol": "AAPL  240119C00150000",
                    "quantity": "5",
                    "action": "Sell to Close"
                }]
            })
        );
    }

    #[test]
    fn test_orders_query_encoding() {
        let query = OrdersQuery {
            per_page: Some(10),
            status: vec![OrderStatus::Live, OrderStatus::Filled],
            underlying_symbol: Some("AAPL".into()),
            ..Default::default()
        };

        let pairs = crate::codec::encode_query(&query).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("per-page".to_string(), "10".to_string()),
                ("status[]".to_string(), "Live".to_string()),
                ("status[]".to_string(), "Filled".to_string()),
                ("underlying-symbol".to_string(), "AAPL".to_string()),
            ]
        );
    }

    #[test]
    fn test_deserialize_order() {
        let json = r#"{
            "id": 12345,
            "account-number": "5WV12345",
            "time-in-force": "Day",
            "order-type": "Limit",
            "size": "10",
            "underlying-symbol": "AAPL",
            "underlying-instrument-type": "Equity",
            "price": "150.0",
            "price-effect": "Debit",
            "status": "Live",
            "cancellable": true,
            "editable": true,
            "edited": false,
            "legs": [{
                "instrument-type": "Equity",
                "symbol": "AAPL",
                "quantity": "10",
                "remaining-quantity": "10",
                "action": "Buy to Open",
                "fills": []
            }]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "12345");
        assert_eq!(order.price, Some(dec!(150.0)));
        assert!(order.is_cancellable());
        assert!(!order.is_filled());
        assert_eq!(order.legs[0].action, OrderAction::BuyToOpen);
    }
}
