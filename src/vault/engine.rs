//! The vault authorization engine
//!
//! Owns the signer policy and the proposal ledger, and gates fund
//! movement on a threshold of distinct, recovered signer approvals.
//!
//! Lifecycle: `initialize` once, then any number of `submit` /
//! `proposal_digest` / `execute` calls. Every operation is a single
//! atomic state transition; the failing paths of `execute` mutate
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::crypto::{recover_signer, sha256};
use crate::ledger::{FundLedger, LedgerError};
use crate::vault::policy::SignerPolicy;
use crate::vault::proposal::{Proposal, ProposalLedger};

/// Domain tag prefixed to every commitment digest. Versioned so a
/// future encoding change cannot collide with digests produced today.
const DIGEST_DOMAIN_TAG: &[u8] = b"multisig-vault:txn:v1";

/// Errors returned by vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Caller is not the vault administrator")]
    NotAuthorized,
    #[error("Vault is already initialized")]
    AlreadyInitialized,
    #[error("Vault is not initialized")]
    NotInitialized,
    #[error("Signer list is empty")]
    EmptySigners,
    #[error("Caller is not an authorized signer")]
    NotSigner,
    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),
    #[error("Proposal already executed: {0}")]
    AlreadyExecuted(u64),
    #[error("Insufficient signatures: have {have}, need {need}")]
    InsufficientSignatures { have: u32, need: u32 },
    #[error("Duplicate signer address: {0}")]
    DuplicateSigner(String),
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("Transfer failed: {0}")]
    Transfer(#[from] LedgerError),
}

impl VaultError {
    /// Stable numeric identifier for each failure mode
    pub fn code(&self) -> u32 {
        match self {
            VaultError::NotAuthorized => 500,
            VaultError::AlreadyInitialized => 501,
            VaultError::NotInitialized => 502,
            VaultError::EmptySigners => 503,
            VaultError::NotSigner => 504,
            VaultError::ProposalNotFound(_) => 505,
            VaultError::AlreadyExecuted(_) => 506,
            VaultError::InsufficientSignatures { .. } => 507,
            VaultError::DuplicateSigner(_) => 508,
            VaultError::InvalidThreshold(_) => 509,
            VaultError::Transfer(_) => 510,
        }
    }
}

/// Audit record appended on every successful execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub proposal_id: u64,
    pub recipient: String,
    pub amount: u64,
    /// Distinct signer addresses whose signatures approved the transfer
    pub approvers: Vec<String>,
    pub executed_at: DateTime<Utc>,
}

/// A threshold multi-signature vault.
///
/// The administrator (the identity that created the vault) registers
/// the signer set and threshold exactly once. Afterwards any signer
/// may submit transfer proposals, and anyone may relay a batch of
/// recoverable signatures over a proposal's commitment digest to
/// execute it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigVault {
    /// The identity allowed to initialize the vault
    admin: String,
    /// Vault's own address, derived from the policy at initialization
    address: Option<String>,
    /// Signer set and threshold; `Some` once initialized
    policy: Option<SignerPolicy>,
    /// All proposals ever submitted
    proposals: ProposalLedger,
    /// Audit trail of executed transfers
    executions: Vec<ExecutionRecord>,
}

impl MultisigVault {
    /// Create an uninitialized vault owned by `admin`
    pub fn new(admin: String) -> Self {
        Self {
            admin,
            address: None,
            policy: None,
            proposals: ProposalLedger::new(),
            executions: Vec::new(),
        }
    }

    /// Register the signer set and threshold. Callable once, by the
    /// administrator only.
    ///
    /// The signer list is stored verbatim, order preserved. Rejects an
    /// empty list, duplicate entries, a zero threshold, and a threshold
    /// exceeding the signer count (an unreachable threshold would lock
    /// funds permanently).
    pub fn initialize(
        &mut self,
        caller: &str,
        signers: Vec<String>,
        threshold: u32,
    ) -> Result<(), VaultError> {
        if caller != self.admin {
            return Err(VaultError::NotAuthorized);
        }

        if self.policy.is_some() {
            return Err(VaultError::AlreadyInitialized);
        }

        if signers.is_empty() {
            return Err(VaultError::EmptySigners);
        }

        for (i, signer) in signers.iter().enumerate() {
            if signers[..i].contains(signer) {
                return Err(VaultError::DuplicateSigner(signer.clone()));
            }
        }

        if threshold == 0 {
            return Err(VaultError::InvalidThreshold(
                "threshold must be at least 1".to_string(),
            ));
        }

        if threshold as usize > signers.len() {
            return Err(VaultError::InvalidThreshold(format!(
                "threshold {} exceeds signer count {}",
                threshold,
                signers.len()
            )));
        }

        let policy = SignerPolicy::new(signers, threshold);
        let address = policy.vault_address();

        log::info!(
            "Vault initialized: {} at {}",
            policy.description(),
            address
        );

        self.address = Some(address);
        self.policy = Some(policy);

        Ok(())
    }

    /// Submit a transfer proposal. Callable by signers only.
    ///
    /// Returns the assigned proposal id: the counter value before the
    /// increment, so ids run 0, 1, 2, ... in submission order.
    pub fn submit(
        &mut self,
        caller: &str,
        amount: u64,
        recipient: String,
        memo: Option<Vec<u8>>,
    ) -> Result<u64, VaultError> {
        let policy = self.policy.as_ref().ok_or(VaultError::NotInitialized)?;

        if !policy.is_signer(caller) {
            return Err(VaultError::NotSigner);
        }

        let id = self
            .proposals
            .submit(recipient, amount, memo, caller.to_string());

        log::info!("Proposal {} submitted by {}", id, caller);

        Ok(id)
    }

    /// Compute the commitment digest for a proposal.
    ///
    /// The digest binds the proposal's immutable fields and this
    /// vault's own address under a versioned domain tag, so a
    /// signature produced for one proposal or one vault instance can
    /// never be replayed against another. Signers sign exactly this
    /// digest off-chain; `execute` recomputes it with the same
    /// encoding.
    ///
    /// Read-only and callable by anyone.
    pub fn proposal_digest(&self, proposal_id: u64) -> Result<Vec<u8>, VaultError> {
        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or(VaultError::ProposalNotFound(proposal_id))?;
        let address = self.address.as_ref().ok_or(VaultError::NotInitialized)?;

        let mut data = DIGEST_DOMAIN_TAG.to_vec();
        data.extend_from_slice(address.as_bytes());
        data.extend_from_slice(&proposal.id.to_be_bytes());
        data.extend_from_slice(proposal.recipient.as_bytes());
        data.extend_from_slice(&proposal.amount.to_be_bytes());
        match &proposal.memo {
            Some(memo) => {
                data.push(0x01);
                data.extend_from_slice(&(memo.len() as u64).to_be_bytes());
                data.extend_from_slice(memo);
            }
            None => data.push(0x00),
        }

        Ok(sha256(&data))
    }

    /// Execute a proposal given a batch of hex-encoded recoverable
    /// signatures over its commitment digest.
    ///
    /// Each signature is an independent recovery attempt: malformed
    /// entries and signatures from non-members are discarded without
    /// failing the call. Approvals are counted per distinct recovered
    /// address, so duplicate signatures from one signer count once.
    ///
    /// On success the funds move through `ledger`, the proposal is
    /// marked executed, and an [`ExecutionRecord`] is appended; if the
    /// transfer fails, nothing is marked and the error propagates.
    pub fn execute<L: FundLedger>(
        &mut self,
        proposal_id: u64,
        signatures: &[String],
        ledger: &mut L,
    ) -> Result<ExecutionRecord, VaultError> {
        let policy = self.policy.as_ref().ok_or(VaultError::NotInitialized)?;

        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or(VaultError::ProposalNotFound(proposal_id))?
            .clone();

        if proposal.executed {
            return Err(VaultError::AlreadyExecuted(proposal_id));
        }

        let digest = self.proposal_digest(proposal_id)?;

        // Distinct authorizing identities, not raw signature count
        let mut approvers: BTreeSet<String> = BTreeSet::new();
        for (index, signature_hex) in signatures.iter().enumerate() {
            let bytes = match hex::decode(signature_hex) {
                Ok(bytes) => bytes,
                Err(_) => {
                    log::debug!("Discarding signature {}: not valid hex", index);
                    continue;
                }
            };

            let signer = match recover_signer(&digest, &bytes) {
                Ok(signer) => signer,
                Err(e) => {
                    log::debug!("Discarding signature {}: {}", index, e);
                    continue;
                }
            };

            if !policy.is_signer(&signer) {
                log::debug!("Discarding signature {}: {} is not a signer", index, signer);
                continue;
            }

            approvers.insert(signer);
        }

        let have = approvers.len() as u32;
        let need = policy.threshold();
        if have < need {
            return Err(VaultError::InsufficientSignatures { have, need });
        }

        // External transfer first; a failure here leaves the proposal
        // unexecuted so the caller can retry.
        let vault_address = self
            .address
            .clone()
            .ok_or(VaultError::NotInitialized)?;
        ledger.transfer(&vault_address, &proposal.recipient, proposal.amount)?;

        self.proposals.mark_executed(proposal_id);

        let record = ExecutionRecord {
            proposal_id,
            recipient: proposal.recipient.clone(),
            amount: proposal.amount,
            approvers: approvers.into_iter().collect(),
            executed_at: Utc::now(),
        };
        self.executions.push(record.clone());

        log::info!(
            "Proposal {} executed: {} -> {} ({} approvers)",
            proposal_id,
            proposal.amount,
            proposal.recipient,
            record.approvers.len()
        );

        Ok(record)
    }

    // =========================================================================
    // Read-only queries
    // =========================================================================

    /// The administrator identity
    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Whether `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.policy.is_some()
    }

    /// The vault's own address; `None` before initialization
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The signer policy; `None` before initialization
    pub fn policy(&self) -> Option<&SignerPolicy> {
        self.policy.as_ref()
    }

    /// Registered signer addresses, in registration order
    pub fn signers(&self) -> &[String] {
        self.policy.as_ref().map(|p| p.signers()).unwrap_or(&[])
    }

    /// Required approval threshold; `None` before initialization
    pub fn threshold(&self) -> Option<u32> {
        self.policy.as_ref().map(|p| p.threshold())
    }

    /// Number of proposals ever submitted (= next proposal id)
    pub fn proposal_count(&self) -> u64 {
        self.proposals.count()
    }

    /// Look up a proposal by id
    pub fn proposal(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Audit trail of executed transfers
    pub fn executions(&self) -> &[ExecutionRecord] {
        &self.executions
    }
}
