//! Account model
//!
//! Represents balance-bearing accounts (cash, checking, credit cards, etc.)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::AccountId;
use super::money::Money;
use super::status::ActivityStatus;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Cash,
    #[default]
    Checking,
    Savings,
    CreditCard,
    Investment,
    Loan,
    Other,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" | "credit card" => Some(Self::CreditCard),
            "investment" => Some(Self::Investment),
            "loan" => Some(Self::Loan),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Investment => write!(f, "Investment"),
            Self::Loan => write!(f, "Loan"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    /// Account name (e.g., "Everyday Checking")
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    pub currency: Currency,

    /// Balance when the account was opened
    pub initial_balance: Money,

    /// Initial balance plus the signed sum of all posted transactions
    pub current_balance: Money,

    #[serde(default)]
    pub status: ActivityStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            currency,
            initial_balance: Money::zero(),
            current_balance: Money::zero(),
            status: ActivityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account whose current balance starts at `initial_balance`
    pub fn with_initial_balance(
        name: impl Into<String>,
        account_type: AccountType,
        currency: Currency,
        initial_balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type, currency);
        account.initial_balance = initial_balance;
        account.current_balance = initial_balance;
        account
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Apply a signed movement to the current balance
    pub fn post(&mut self, signed_amount: Money) -> Result<(), AccountValidationError> {
        self.current_balance = self.current_balance.checked_add(signed_amount).ok_or(
            AccountValidationError::BalanceOverflow {
                balance: self.current_balance,
                amount: signed_amount,
            },
        )?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.chars().count() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.chars().count()));
        }

        if self.initial_balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.initial_balance));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeBalance(Money),
    BalanceOverflow { balance: Money, amount: Money },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::NegativeBalance(balance) => {
                write!(f, "Initial balance cannot be negative ({})", balance)
            }
            Self::BalanceOverflow { balance, amount } => {
                write!(f, "Posting {} to a balance of {} is out of range", amount, balance)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
