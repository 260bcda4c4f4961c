//! Fund ledger: account balances and transfers
//!
//! The vault engine calls into this module through the [`FundLedger`]
//! trait; the concrete [`Ledger`] is a simple in-process balance book.

pub mod accounts;

pub use accounts::{FundLedger, Ledger, LedgerError, TransferEvent};
