//! Financial instrument models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{InstrumentType, Lendability, OptionType};
use crate::{Error, Result};

/// Equity (stock/ETF) instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Equity {
    /// Internal identifier
    #[serde(default)]
    pub id: Option<u64>,
    /// Trading symbol
    pub symbol: String,
    /// Instrument type
    #[serde(default)]
    pub instrument_type: InstrumentType,
    /// Symbol for streaming market data
    #[serde(default)]
    pub streamer_symbol: Option<String>,
    /// Description/name of the security
    #[serde(default)]
    pub description: Option<String>,
    /// Short description
    #[serde(default)]
    pub short_description: Option<String>,
    /// CUSIP number
    #[serde(default)]
    pub cusip: Option<String>,
    /// Listed market
    #[serde(default)]
    pub listed_market: Option<String>,
    /// Whether this is actively traded
    #[serde(default)]
    pub active: bool,
    /// Whether this is an index
    #[serde(default)]
    pub is_index: bool,
    /// Whether this is an ETF
    #[serde(default)]
    pub is_etf: bool,
    /// Whether only closing orders are accepted
    #[serde(default)]
    pub is_closing_only: bool,
    /// Whether options are available
    #[serde(default)]
    pub is_options_closing_only: bool,
    /// Whether this is fractional-share eligible
    #[serde(default)]
    pub is_fractional_quantity_eligible: bool,
    /// How easy the security is to borrow
    #[serde(default)]
    pub lendability: Option<Lendability>,
    /// Borrow rate
    #[serde(default)]
    pub borrow_rate: Option<Decimal>,
    /// Market time instrument collection
    #[serde(default)]
    pub market_time_instrument_collection: Option<String>,
}

/// Filters for the equities endpoint.
///
/// # Example
///
/// ```
/// use tasty_rs::models::EquitiesQuery;
///
/// let query = EquitiesQuery {
///     is_etf: Some(true),
///     ..Default::default()
/// };
/// let pairs = tasty_rs::codec::encode_query(&query).unwrap();
/// assert_eq!(pairs, vec![("is-etf".to_string(), "true".to_string())]);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EquitiesQuery {
    /// Symbols to look up
    #[serde(rename = "symbol[]", skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
    /// Lendability filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lendability: Option<Lendability>,
    /// Only indexes, or only non-indexes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_index: Option<bool>,
    /// Only ETFs, or only non-ETFs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_etf: Option<bool>,
}

impl EquitiesQuery {
    /// Query for the given symbols.
    pub fn symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// One match from the symbol search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolSearchResult {
    /// Trading symbol
    #[serde(default)]
    pub symbol: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Listed market
    #[serde(default)]
    pub listed_market: Option<String>,
    /// Price increment rules
    #[serde(default)]
    pub price_increments: Option<String>,
    /// Trading hours
    #[serde(default)]
    pub trading_hours: Option<String>,
    /// Whether options trade on this symbol
    #[serde(default)]
    pub options: bool,
    /// Instrument type
    #[serde(default)]
    pub instrument_type: Option<InstrumentType>,
}

/// Credentials for the market data streamer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QuoteStreamerTokens {
    /// Streamer authentication token
    pub token: String,
    /// Streamer URL
    #[serde(default)]
    pub streamer_url: Option<String>,
    /// Websocket URL
    #[serde(default)]
    pub websocket_url: Option<String>,
    /// DXLink URL
    #[serde(default)]
    pub dxlink_url: Option<String>,
    /// Data level, e.g. `api` or `demo`
    #[serde(default)]
    pub level: Option<String>,
}

/// An option symbol in OCC format.
///
/// The format is the root padded with spaces to 6 characters, the expiration
/// as `yymmdd`, `C` or `P`, and the strike times 1000 padded with zeros to 8
/// digits.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use tasty_rs::models::{OccSymbol, OptionType};
///
/// let symbol = OccSymbol::new(
///     "AAPL",
///     NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
///     OptionType::Call,
///     dec!(150),
/// )
/// .unwrap();
/// assert_eq!(symbol.to_string(), "AAPL  240119C00150000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccSymbol {
    root: String,
    expiration: NaiveDate,
    option_type: OptionType,
    strike: Decimal,
}

const OCC_ROOT_WIDTH: usize = 6;
const OCC_STRIKE_WIDTH: usize = 8;
const OCC_LEN: usize = OCC_ROOT_WIDTH + 6 + 1 + OCC_STRIKE_WIDTH;
const OCC_MAX_STRIKE_MILLIS: u64 = 99_999_999;

impl OccSymbol {
    /// Build a symbol, validating the root and strike.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the root is empty, longer than 6
    /// characters or not ASCII, or if the strike is not positive, has more
    /// than 3 decimal places or doesn't fit in 8 digits.
    pub fn new(
        root: impl Into<String>,
        expiration: NaiveDate,
        option_type: OptionType,
        strike: Decimal,
    ) -> Result<Self> {
        let root = root.into();
        if root.is_empty() || root.len() > OCC_ROOT_WIDTH || !root.is_ascii() {
            return Err(Error::InvalidInput(format!(
                "OCC root must be 1 to 6 ASCII characters: {:?}",
                root
            )));
        }
        strike_millis(strike)?;

        Ok(Self {
            root,
            expiration,
            option_type,
            strike,
        })
    }

    /// Root symbol of the underlying.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Expiration date.
    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    pub fn strike(&self) -> Decimal {
        self.strike
    }
}

fn strike_millis(strike: Decimal) -> Result<u64> {
    let scaled = strike * Decimal::from(1000);
    if strike <= Decimal::ZERO || !scaled.fract().is_zero() {
        return Err(Error::InvalidInput(format!(
            "OCC strike must be positive with at most 3 decimal places: {}",
            strike
        )));
    }
    match scaled.to_u64() {
        Some(millis) if millis <= OCC_MAX_STRIKE_MILLIS => Ok(millis),
        _ => Err(Error::InvalidInput(format!(
            "OCC strike out of range: {}",
            strike
        ))),
    }
}

impl fmt::Display for OccSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = strike_millis(self.strike).map_err(|_| fmt::Error)?;
        write!(
            f,
            "{:<root_width$}{}{}{:0>strike_width$}",
            self.root,
            self.expiration.format("%y%m%d"),
            self.option_type.code(),
            millis,
            root_width = OCC_ROOT_WIDTH,
            strike_width = OCC_STRIKE_WIDTH,
        )
    }
}

impl FromStr for OccSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("Invalid OCC symbol: {:?}", s));
        if s.len() != OCC_LEN || !s.is_ascii() {
            return Err(invalid());
        }

        let root = s[..OCC_ROOT_WIDTH].trim_end();
        let expiration = NaiveDate::parse_from_str(&s[6..12], "%y%m%d").map_err(|_| invalid())?;
        let option_type = s[12..13]
            .chars()
            .next()
            .and_then(OptionType::from_code)
            .ok_or_else(invalid)?;
        let millis: i64 = s[13..].parse().map_err(|_| invalid())?;

        Self::new(root, expiration, option_type, Decimal::new(millis, 3).normalize())
    }
}
