//! Wallet model
//!
//! Represents a named store of funds (cash, bank account, e-wallet) with a
//! cached running balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// Type of wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    /// Physical cash
    #[default]
    Cash,
    /// Bank account
    Bank,
    /// E-wallet (GoPay, OVO, DANA, ...)
    Ewallet,
}

impl WalletType {
    /// Parse wallet type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "bank" => Some(Self::Bank),
            "ewallet" | "e-wallet" | "e_wallet" => Some(Self::Ewallet),
            _ => None,
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Bank => write!(f, "Bank"),
            Self::Ewallet => write!(f, "E-Wallet"),
        }
    }
}

/// A wallet
///
/// `balance` is derived from the transaction list but cached here; only the
/// ledger services write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Wallet name (e.g., "BCA", "Dompet")
    pub name: String,

    /// Current balance
    pub balance: Money,

    /// Type of wallet
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
}

impl Wallet {
    /// Create a new empty wallet
    pub fn new(id: WalletId, name: impl Into<String>, wallet_type: WalletType) -> Self {
        Self {
            id,
            name: name.into(),
            balance: Money::zero(),
            wallet_type,
        }
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(WalletValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.wallet_type)
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Wallet name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for WalletValidationError {}
