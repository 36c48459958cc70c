//! Transaction model
//!
//! A single cash movement against one account and one category. The amount
//! is always stored as a positive magnitude; the direction lives in
//! `is_income`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;
use super::status::TransactionStatus;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// The owning account
    pub account_id: AccountId,

    pub category_id: CategoryId,

    /// Positive magnitude
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub is_income: bool,

    #[serde(default)]
    pub merchant_name: String,

    #[serde(default)]
    pub status: TransactionStatus,

    pub currency: Currency,

    /// Rate recorded at entry time, informational only
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_exchange_rate() -> f64 {
    1.0
}

impl Transaction {
    /// Create a new completed transaction
    pub fn new(
        account_id: AccountId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        is_income: bool,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            category_id,
            amount,
            date,
            description: String::new(),
            is_income,
            merchant_name: String::new(),
            status: TransactionStatus::Completed,
            currency,
            exchange_rate: default_exchange_rate(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount with the direction applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        if self.is_income {
            self.amount
        } else {
            -self.amount
        }
    }

    /// The effect this transaction currently has on its account balance
    pub fn balance_effect(&self) -> Money {
        if self.status.is_posted() {
            self.signed_amount()
        } else {
            Money::zero()
        }
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TransactionStatus::Cancelled
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(TransactionValidationError::InvalidExchangeRate(
                self.exchange_rate,
            ));
        }

        if self.description.chars().count() > 500 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.chars().count(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.merchant_name.is_empty() {
            &self.description
        } else {
            &self.merchant_name
        };
        write!(f, "{} {} {}", self.date, label, self.signed_amount())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    InvalidExchangeRate(f64),
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::InvalidExchangeRate(rate) => {
                write!(f, "Exchange rate must be a positive number, got {}", rate)
            }
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 500)", len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: i64, is_income: bool) -> Transaction {
        Transaction::new(
            AccountId::new(),
            CategoryId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            Money::from_cents(amount),
            is_income,
            Currency::Usd,
        )
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(sample(3000, false).signed_amount().cents(), -3000);
        assert_eq!(sample(2000, true).signed_amount().cents(), 2000);
    }

    #[test]
    fn test_cancelled_has_no_balance_effect() {
        let mut txn = sample(3000, false);
        assert_eq!(txn.balance_effect().cents(), -3000);

        txn.status = TransactionStatus::Cancelled;
        assert!(txn.is_cancelled());
        assert!(txn.balance_effect().is_zero());
    }

    #[test]
    fn test_validation() {
        assert!(sample(1, true).validate().is_ok());
        assert!(matches!(
            sample(0, true).validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            sample(-5, false).validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        let mut txn = sample(100, false);
        txn.exchange_rate = 0.0;
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::InvalidExchangeRate(_))
        ));
        txn.exchange_rate = f64::NAN;
        assert!(txn.validate().is_err());
    }

    #[test]
    fn test_new_is_completed() {
        let txn = sample(100, false);
        assert_eq!(txn.status, TransactionStatus::Completed);
        assert_eq!(txn.exchange_rate, 1.0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let txn = sample(100, false);
        let mut json = serde_json::to_value(&txn).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("exchange_rate");
        obj.remove("status");
        obj.remove("merchant_name");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back.exchange_rate, 1.0);
        assert_eq!(back.status, TransactionStatus::Completed);
        assert!(back.merchant_name.is_empty());
    }
}
