//! Lifecycle states shared by the entities
//!
//! Accounts and categories are either active or inactive; transactions move
//! through pending, completed and cancelled. Transitions go through the
//! methods here so that illegal moves surface as errors instead of silently
//! overwriting a flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soft-delete state for accounts and categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Inactive -> Active
    pub fn activate(self) -> Result<Self, StatusTransitionError<Self>> {
        match self {
            Self::Inactive => Ok(Self::Active),
            Self::Active => Err(StatusTransitionError {
                from: self,
                to: Self::Active,
            }),
        }
    }

    /// Active -> Inactive
    pub fn deactivate(self) -> Result<Self, StatusTransitionError<Self>> {
        match self {
            Self::Active => Ok(Self::Inactive),
            Self::Inactive => Err(StatusTransitionError {
                from: self,
                to: Self::Inactive,
            }),
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
    /// Terminal. The transaction no longer counts toward any balance.
    Cancelled,
}

impl TransactionStatus {
    /// Whether the transaction contributes to its account balance
    pub fn is_posted(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Pending -> Completed
    pub fn complete(self) -> Result<Self, StatusTransitionError<Self>> {
        match self {
            Self::Pending => Ok(Self::Completed),
            _ => Err(StatusTransitionError {
                from: self,
                to: Self::Completed,
            }),
        }
    }

    /// Pending | Completed -> Cancelled
    pub fn cancel(self) -> Result<Self, StatusTransitionError<Self>> {
        match self {
            Self::Pending | Self::Completed => Ok(Self::Cancelled),
            Self::Cancelled => Err(StatusTransitionError {
                from: self,
                to: Self::Cancelled,
            }),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" | "complete" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A rejected status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransitionError<S> {
    pub from: S,
    pub to: S,
}

impl<S: fmt::Display> fmt::Display for StatusTransitionError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot move from {} to {}", self.from, self.to)
    }
}

impl<S: fmt::Debug + fmt::Display> std::error::Error for StatusTransitionError<S> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_transitions() {
        let status = ActivityStatus::Active;
        let status = status.deactivate().unwrap();
        assert_eq!(status, ActivityStatus::Inactive);
        assert!(status.deactivate().is_err());

        let status = status.activate().unwrap();
        assert!(status.is_active());
        assert!(status.activate().is_err());
    }

    #[test]
    fn test_transaction_transitions() {
        assert_eq!(
            TransactionStatus::Pending.complete(),
            Ok(TransactionStatus::Completed)
        );
        assert!(TransactionStatus::Completed.complete().is_err());
        assert!(TransactionStatus::Cancelled.complete().is_err());

        assert_eq!(
            TransactionStatus::Pending.cancel(),
            Ok(TransactionStatus::Cancelled)
        );
        assert_eq!(
            TransactionStatus::Completed.cancel(),
            Ok(TransactionStatus::Cancelled)
        );

        let err = TransactionStatus::Cancelled.cancel().unwrap_err();
        assert_eq!(err.to_string(), "cannot move from Cancelled to Cancelled");
    }

    #[test]
    fn test_is_posted() {
        assert!(TransactionStatus::Pending.is_posted());
        assert!(TransactionStatus::Completed.is_posted());
        assert!(!TransactionStatus::Cancelled.is_posted());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(TransactionStatus::parse("canceled"), Some(TransactionStatus::Cancelled));
        assert_eq!(TransactionStatus::parse("PENDING"), Some(TransactionStatus::Pending));
        assert_eq!(TransactionStatus::parse("cleared"), None);
    }
}
