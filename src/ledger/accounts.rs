//! Native-unit account ledger
//!
//! Tracks balances per address and performs transfers. The vault
//! engine moves funds exclusively through the [`FundLedger`] trait so
//! that the transfer collaborator can be substituted in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Maximum number of transfer events retained in history
const TRANSFER_HISTORY_LIMIT: usize = 100;

/// Ledger-related errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Invalid address: cannot transfer to self")]
    SelfTransfer,
}

/// Transfer event (emitted when funds move)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
}

/// The fund-transfer collaborator the vault engine calls into.
///
/// Exactly one `transfer` happens per successful execution; any error
/// aborts the execution with no state change in the vault.
pub trait FundLedger {
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<TransferEvent, LedgerError>;
}

/// In-process account ledger: address -> balance
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<String, u64>,
    /// Transfer history (last 100)
    pub transfer_history: Vec<TransferEvent>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Get balance of an address
    pub fn balance_of(&self, address: &str) -> u64 {
        *self.balances.get(address).unwrap_or(&0)
    }

    /// Credit an address. Used to fund accounts in tests and demos.
    pub fn deposit(&mut self, address: &str, amount: u64) {
        *self.balances.entry(address.to_string()).or_insert(0) += amount;
        log::debug!("Deposited {} to {}", amount, address);
    }

    /// Get all addresses holding a non-zero balance
    pub fn holders(&self) -> Vec<(&String, &u64)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }
}

impl FundLedger for Ledger {
    /// Move funds between accounts
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<TransferEvent, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        if from == to {
            return Err(LedgerError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        let event = TransferEvent {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp: Utc::now(),
        };

        self.transfer_history.push(event.clone());
        if self.transfer_history.len() > TRANSFER_HISTORY_LIMIT {
            self.transfer_history.remove(0);
        }

        log::info!("Transferred {} from {} to {}", amount, from, to);

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_balance() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.balance_of("1Alice"), 0);

        ledger.deposit("1Alice", 500);
        ledger.deposit("1Alice", 250);
        assert_eq!(ledger.balance_of("1Alice"), 750);
        assert_eq!(ledger.holders().len(), 1);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 1000);

        let event = ledger.transfer("1Alice", "1Bob", 400).unwrap();

        assert_eq!(event.from, "1Alice");
        assert_eq!(event.to, "1Bob");
        assert_eq!(event.amount, 400);
        assert_eq!(ledger.balance_of("1Alice"), 600);
        assert_eq!(ledger.balance_of("1Bob"), 400);
        assert_eq!(ledger.transfer_history.len(), 1);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 100);

        let result = ledger.transfer("1Alice", "1Bob", 200);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { have: 100, need: 200 })
        ));

        // No partial state
        assert_eq!(ledger.balance_of("1Alice"), 100);
        assert_eq!(ledger.balance_of("1Bob"), 0);
        assert!(ledger.transfer_history.is_empty());
    }

    #[test]
    fn test_transfer_zero_amount() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 100);

        let result = ledger.transfer("1Alice", "1Bob", 0);
        assert!(matches!(result, Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn test_self_transfer() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 100);

        let result = ledger.transfer("1Alice", "1Alice", 50);
        assert!(matches!(result, Err(LedgerError::SelfTransfer)));
    }
}
