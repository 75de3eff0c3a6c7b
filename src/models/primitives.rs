//! Identifier newtypes and the API environment.
//!
//! Account numbers, order ids and symbols are all strings on the wire;
//! wrapping them keeps one from being passed where another is expected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::client::Endpoints;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[allow(missing_docs)]
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            #[allow(missing_docs)]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_newtype! {
    /// Account number, as used in `/accounts/{account_number}/...` paths.
    ///
    /// ```
    /// use tasty_rs::AccountNumber;
    ///
    /// let account = AccountNumber::new("5WV12345");
    /// assert_eq!(format!("/accounts/{}/orders", account), "/accounts/5WV12345/orders");
    /// ```
    #[derive(Deserialize)]
    AccountNumber
}

string_newtype! {
    /// Order id. Decodes from a JSON number or string.
    OrderId
}

string_newtype! {
    /// Ticker or OCC symbol, e.g. `AAPL`, `BRK/B`, `SPY   240119C00470000`.
    ///
    /// ```
    /// use tasty_rs::Symbol;
    ///
    /// assert_eq!(Symbol::new("BRK/B").path_segment(), "BRK%2FB");
    /// ```
    #[derive(Deserialize)]
    Symbol
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

impl From<u64> for OrderId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Symbol {
    /// The symbol percent-escaped for use as a single path segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

/// Which tastytrade deployment to talk to.
///
/// # Example
///
/// ```
/// use tasty_rs::Environment;
///
/// let env: Environment = "cert".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// println!("API URL: {}", env.api_base_url());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live accounts
    #[default]
    Production,
    /// The certification environment; orders never reach a market
    Sandbox,
}

impl Environment {
    /// REST root, scheme included.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.tastyworks.com",
            Environment::Sandbox => "https://api.cert.tastyworks.com",
        }
    }

    /// REST host without scheme.
    pub fn api_base_host(&self) -> &'static str {
        match self {
            Environment::Production => "api.tastyworks.com",
            Environment::Sandbox => "api.cert.tastyworks.com",
        }
    }

    /// Account streamer websocket.
    pub fn account_streamer_url(&self) -> &'static str {
        match self {
            Environment::Production => "wss://streamer.tastyworks.com",
            Environment::Sandbox => "wss://streamer.cert.tastyworks.com",
        }
    }

    /// All endpoints of this environment.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::for_environment(*self)
    }

    #[allow(missing_docs)]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    #[allow(missing_docs)]
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        })
    }
}

impl FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "sandbox" | "cert" | "certification" => Ok(Environment::Sandbox),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown environment: {}. Expected production or sandbox",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtypes_are_transparent_strings() {
        let account: AccountNumber = serde_json::from_str("\"5WV12345\"").unwrap();
        assert_eq!(account.to_string(), "5WV12345");
        assert_eq!(serde_json::to_string(&account).unwrap(), "\"5WV12345\"");

        let symbol: Symbol = "SPY".into();
        assert_eq!(symbol.as_ref(), "SPY");
        assert_eq!(serde_json::to_string(&OrderId::from(7)).unwrap(), "\"7\"");
    }

    #[test]
    fn test_symbol_path_segment_escapes_slash() {
        assert_eq!(Symbol::new("BRK/B").path_segment(), "BRK%2FB");
        assert_eq!(Symbol::new("AAPL").path_segment(), "AAPL");
    }

    #[test]
    fn test_order_id_from_number_or_string() {
        let from_number: OrderId = serde_json::from_str("12345").unwrap();
        let from_string: OrderId = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "12345");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://api.tastyworks.com"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://api.cert.tastyworks.com"
        );
        assert_eq!(Environment::Sandbox.api_base_host(), "api.cert.tastyworks.com");
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert!("staging".parse::<Environment>().is_err());
    }
}
