//! Transfer proposals and the proposal ledger
//!
//! The ledger owns the monotonically increasing proposal-id counter
//! and the mapping from id to proposal. Ids are assigned in strict
//! submission order starting at 0 and are never reused; proposals are
//! never deleted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pending or executed transfer request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Proposal {
    /// Proposal id (the counter value at submission time)
    pub id: u64,
    /// Recipient address
    pub recipient: String,
    /// Amount in the smallest native unit
    pub amount: u64,
    /// Optional opaque memo bytes
    pub memo: Option<Vec<u8>>,
    /// The signer who submitted the proposal
    pub proposer: String,
    /// Whether the transfer has been executed
    pub executed: bool,
}

/// Registry of proposals keyed by id, plus the id counter
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalLedger {
    proposals: HashMap<u64, Proposal>,
    next_id: u64,
}

impl ProposalLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new proposal and return its assigned id.
    ///
    /// The id is the counter value before the increment, so the first
    /// proposal is always id 0.
    pub fn submit(
        &mut self,
        recipient: String,
        amount: u64,
        memo: Option<Vec<u8>>,
        proposer: String,
    ) -> u64 {
        let id = self.next_id;
        let proposal = Proposal {
            id,
            recipient,
            amount,
            memo,
            proposer,
            executed: false,
        };

        self.proposals.insert(id, proposal);
        self.next_id = id + 1;
        id
    }

    /// Look up a proposal by id
    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// Flip a proposal's executed flag. Returns false if the id is unknown.
    pub fn mark_executed(&mut self, id: u64) -> bool {
        match self.proposals.get_mut(&id) {
            Some(proposal) => {
                proposal.executed = true;
                true
            }
            None => false,
        }
    }

    /// Current counter value (= number of proposals ever submitted)
    pub fn count(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut ledger = ProposalLedger::new();

        for expected in 0..5u64 {
            let id = ledger.submit("1Recipient".to_string(), 100, None, "1Proposer".to_string());
            assert_eq!(id, expected);
        }
        assert_eq!(ledger.count(), 5);
    }

    #[test]
    fn test_submit_stores_fields() {
        let mut ledger = ProposalLedger::new();
        let id = ledger.submit(
            "1Recipient".to_string(),
            250,
            Some(b"rent".to_vec()),
            "1Alice".to_string(),
        );

        let proposal = ledger.get(id).unwrap();
        assert_eq!(proposal.recipient, "1Recipient");
        assert_eq!(proposal.amount, 250);
        assert_eq!(proposal.memo.as_deref(), Some(b"rent".as_slice()));
        assert_eq!(proposal.proposer, "1Alice");
        assert!(!proposal.executed);
    }

    #[test]
    fn test_mark_executed() {
        let mut ledger = ProposalLedger::new();
        let id = ledger.submit("1Recipient".to_string(), 100, None, "1Alice".to_string());

        assert!(ledger.mark_executed(id));
        assert!(ledger.get(id).unwrap().executed);

        // Unknown id
        assert!(!ledger.mark_executed(99));
    }

    #[test]
    fn test_unknown_id_lookup() {
        let ledger = ProposalLedger::new();
        assert!(ledger.get(0).is_none());
    }
}
