//! Customers and the accounts they can reach.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AuthorityLevel, MarginOrCash};
use super::primitives::AccountNumber;

/// The person behind a login.
///
/// The API omits fields freely depending on who asks, so nearly everything
/// is optional.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Customer {
    /// `"me"` when fetched through `/customers/me`
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub mobile_phone_number: Option<String>,
    #[serde(default)]
    pub agreed_to_margining: Option<bool>,
    /// Professional status for market data billing
    #[serde(default)]
    pub is_professional: Option<bool>,
    #[serde(default)]
    pub has_industry_affiliation: Option<bool>,
}

impl Customer {
    /// First and last name joined, skipping whichever is missing.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

/// A brokerage account.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    /// Path component for every account-scoped endpoint
    pub account_number: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// e.g. `Individual`, `Joint`, `Roth IRA`
    #[serde(default)]
    pub account_type_name: Option<String>,
    /// Pattern day trader flag
    #[serde(default)]
    pub day_trader_status: bool,
    #[serde(default)]
    pub margin_or_cash: Option<MarginOrCash>,
    #[serde(default)]
    pub is_foreign: bool,
    /// Paper-trading account
    #[serde(default)]
    pub is_test_drive: bool,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub is_futures_approved: bool,
    #[serde(default)]
    pub is_firm_proprietary: bool,
    #[serde(default)]
    pub investment_objective: Option<String>,
    #[serde(default)]
    pub suitable_options_level: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// The account number as a typed path parameter.
    pub fn account_number(&self) -> AccountNumber {
        AccountNumber::new(&self.account_number)
    }
}

/// Entry of an accounts list: the account plus the caller's access to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountItem {
    #[allow(missing_docs)]
    pub account: Account,
    /// Missing for accounts reached through a customer id
    #[serde(default)]
    pub authority_level: Option<AuthorityLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_account_item() {
        let json = r#"{
            "account": {
                "account-number": "5WV12345",
                "external-id": "A0000123456",
                "opened-at": "2024-01-15T10:30:00.000+00:00",
                "nickname": "Individual",
                "account-type-name": "Individual",
                "margin-or-cash": "Margin",
                "is-test-drive": true
            },
            "authority-level": "owner"
        }"#;

        let item: AccountItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.account.account_number().as_str(), "5WV12345");
        assert_eq!(item.account.margin_or_cash, Some(MarginOrCash::Margin));
        assert_eq!(item.authority_level, Some(AuthorityLevel::Owner));
        assert!(item.account.is_test_drive);
    }

    #[test]
    fn test_deserialize_customer() {
        let json = r#"{
            "id": "me",
            "first-name": "Test",
            "last-name": "Trader",
            "email": "trader@example.com",
            "is-professional": false
        }"#;

        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.first_name.as_deref(), Some("Test"));
        assert_eq!(customer.is_professional, Some(false));
        assert!(customer.username.is_none());
        assert_eq!(customer.full_name().as_deref(), Some("Test Trader"));
    }

    #[test]
    fn test_full_name_with_one_part() {
        let customer: Customer = serde_json::from_str(r#"{"last-name": "Trader"}"#).unwrap();
        assert_eq!(customer.full_name().as_deref(), Some("Trader"));

        let customer: Customer = serde_json::from_str("{}").unwrap();
        assert_eq!(customer.full_name(), None);
    }
}
