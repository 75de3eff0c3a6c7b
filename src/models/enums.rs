//! Wire enums shared by the order, instrument and account models.
//!
//! Variant names follow the strings the API sends; where those contain
//! spaces or abbreviations the serde rename carries the exact spelling.

use serde::{Deserialize, Serialize};

/// Asset class of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstrumentType {
    /// Stocks and ETFs
    #[default]
    Equity,
    /// Listed option on an equity
    #[serde(rename = "Equity Option")]
    EquityOption,
    /// New issue offered to customers
    #[serde(rename = "Equity Offering")]
    EquityOffering,
    /// Futures contract
    Future,
    /// Option on a futures contract
    #[serde(rename = "Future Option")]
    FutureOption,
    /// Spot crypto pair
    Cryptocurrency,
    /// Warrant
    Warrant,
    /// Index, not directly tradeable
    Index,
    /// Anything this crate does not know about yet
    #[serde(other)]
    Unknown,
}

/// Execution style of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Fill at `price` or better
    Limit,
    /// Fill at the prevailing price
    Market,
    /// Limit priced through the market
    #[serde(rename = "Marketable Limit")]
    MarketableLimit,
    /// Market order armed at `stop-trigger`
    Stop,
    /// Limit order armed at `stop-trigger`
    #[serde(rename = "Stop Limit")]
    StopLimit,
    /// Market order sized by dollar `value`
    #[serde(rename = "Notional Market")]
    NotionalMarket,
}

impl OrderType {
    /// Returns `true` if orders of this type need a limit price.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::MarketableLimit | OrderType::StopLimit
        )
    }

    /// Returns `true` if orders of this type need a stop trigger.
    pub fn requires_stop_trigger(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}

/// What a leg does to the position.
///
/// Equities and options use the open/close forms; futures use plain
/// `Buy`/`Sell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    #[allow(missing_docs)]
    #[serde(rename = "Buy to Open")]
    BuyToOpen,
    #[allow(missing_docs)]
    #[serde(rename = "Buy to Close")]
    BuyToClose,
    #[allow(missing_docs)]
    #[serde(rename = "Sell to Open")]
    SellToOpen,
    #[allow(missing_docs)]
    #[serde(rename = "Sell to Close")]
    SellToClose,
    #[allow(missing_docs)]
    Buy,
    #[allow(missing_docs)]
    Sell,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Until the end of the regular session
    Day,
    /// Until filled or cancelled
    #[serde(rename = "GTC")]
    Gtc,
    /// Until `gtc-date`
    #[serde(rename = "GTD")]
    Gtd,
    /// Day order eligible for extended hours
    Ext,
    /// GTC order eligible for extended hours
    #[serde(rename = "GTC Ext")]
    GtcExt,
    /// Fill what is available now, cancel the rest
    #[serde(rename = "IOC")]
    Ioc,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Accepted, not yet routed
    Received,
    /// Sent to the venue
    Routed,
    /// Awaiting venue acknowledgement
    #[serde(rename = "In Flight")]
    InFlight,
    /// Working at the venue
    Live,
    /// Cancellation pending
    #[serde(rename = "Cancel Requested")]
    CancelRequested,
    /// Replacement pending
    #[serde(rename = "Replace Requested")]
    ReplaceRequested,
    /// Waiting on another order
    Contingent,
    /// Fully filled
    Filled,
    /// Cancelled
    Cancelled,
    /// Expired unfilled
    Expired,
    /// Refused by the broker or venue
    Rejected,
    /// Removed by the broker
    Removed,
    /// Removed after a partial fill
    #[serde(rename = "Partially Removed")]
    PartiallyRemoved,
}

impl OrderStatus {
    /// Returns `true` once the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Cancelled
                | OrderStatus::Expired
                | OrderStatus::Rejected
                | OrderStatus::Removed
                | OrderStatus::PartiallyRemoved
        )
    }
}

/// Direction of a cash amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceEffect {
    /// Cash comes in
    Credit,
    /// Cash goes out
    Debit,
    /// Zero amount
    None,
    /// Unrecognized effect
    #[serde(other)]
    Unknown,
}

/// Account margin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginOrCash {
    #[allow(missing_docs)]
    Margin,
    #[allow(missing_docs)]
    Cash,
    #[allow(missing_docs)]
    #[serde(rename = "IRA Margin")]
    IraMargin,
}

/// Call or put. The wire form is the single letter used in OCC symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[allow(missing_docs)]
    #[serde(rename = "C")]
    Call,
    #[allow(missing_docs)]
    #[serde(rename = "P")]
    Put,
}

impl OptionType {
    /// Single-letter code, `C` or `P`.
    pub fn code(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }

    /// Inverse of [`OptionType::code`].
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'C' => Some(OptionType::Call),
            'P' => Some(OptionType::Put),
            _ => None,
        }
    }
}

/// What the logged-in user may do with an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorityLevel {
    /// Account owner
    Owner,
    /// May trade but not move money
    TradeOnly,
    /// May only view
    ReadOnly,
}

/// How easily a security can be borrowed for shorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lendability {
    /// Freely borrowable
    #[serde(rename = "Easy To Borrow")]
    EasyToBorrow,
    /// A locate is needed before shorting
    #[serde(rename = "Locate Required")]
    LocateRequired,
    /// Must be pre-borrowed
    Preborrow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_instrument_type() {
        let parsed: InstrumentType = serde_json::from_str("\"Bond\"").unwrap();
        assert_eq!(parsed, InstrumentType::Unknown);

        let parsed: InstrumentType = serde_json::from_str("\"Equity Offering\"").unwrap();
        assert_eq!(parsed, InstrumentType::EquityOffering);
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::PartiallyRemoved.is_terminal());
        assert!(!OrderStatus::Live.is_terminal());
        assert!(!OrderStatus::CancelRequested.is_terminal());
    }

    #[test]
    fn test_order_type_requirements() {
        assert!(OrderType::Limit.requires_price());
        assert!(OrderType::StopLimit.requires_price());
        assert!(OrderType::StopLimit.requires_stop_trigger());
        assert!(!OrderType::Market.requires_price());
        assert!(!OrderType::Market.requires_stop_trigger());
    }

    #[test]
    fn test_option_type_codes() {
        assert_eq!(OptionType::Put.code(), 'P');
        assert_eq!(OptionType::from_code('C'), Some(OptionType::Call));
        assert_eq!(OptionType::from_code('X'), None);
        assert_eq!(serde_json::to_string(&OptionType::Call).unwrap(), "\"C\"");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::MarketableLimit).unwrap(),
            "\"Marketable Limit\""
        );
        assert_eq!(
            serde_json::to_string(&Lendability::LocateRequired).unwrap(),
            "\"Locate Required\""
        );
        assert_eq!(serde_json::to_string(&TimeInForce::GtcExt).unwrap(), "\"GTC Ext\"");
        assert_eq!(
            serde_json::from_str::<AuthorityLevel>("\"trade-only\"").unwrap(),
            AuthorityLevel::TradeOnly
        );
    }
}
