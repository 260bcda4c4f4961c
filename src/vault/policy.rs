//! Authorization policy for the vault
//!
//! The signer set and threshold are fixed when the vault is
//! initialized and never change afterwards. If a different policy is
//! ever needed, a new vault must be created; there is no in-place
//! rotation.

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::crypto::{double_sha256, sha256};

/// The immutable authorization policy: which addresses may approve
/// transfers, and how many distinct approvals are required.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignerPolicy {
    /// Authorized signer addresses, in registration order
    signers: Vec<String>,
    /// Minimum number of distinct signer approvals (M in M-of-N)
    threshold: u32,
}

impl SignerPolicy {
    /// Create a policy from a signer list and threshold.
    ///
    /// The caller is responsible for validation; see
    /// [`MultisigVault::initialize`](crate::vault::MultisigVault::initialize),
    /// which rejects empty or duplicated signer lists and out-of-range
    /// thresholds before constructing the policy.
    pub(crate) fn new(signers: Vec<String>, threshold: u32) -> Self {
        Self { signers, threshold }
    }

    /// Authorized signer addresses, in the order they were registered
    pub fn signers(&self) -> &[String] {
        &self.signers
    }

    /// Required number of distinct approvals
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Total signer count (N)
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Check whether an address is an authorized signer
    pub fn is_signer(&self, address: &str) -> bool {
        self.signers.iter().any(|s| s == address)
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.threshold, self.signers.len())
    }

    /// Derive the vault's own address from the policy.
    ///
    /// Address = Base58Check(0x05 || RIPEMD160(SHA256(threshold || signers)))
    ///
    /// The same policy always yields the same address, and the address
    /// scopes commitment digests to this vault instance.
    pub fn vault_address(&self) -> String {
        let mut script_data = self.threshold.to_be_bytes().to_vec();
        for signer in &self.signers {
            script_data.extend_from_slice(signer.as_bytes());
        }

        let sha256_hash = sha256(&script_data);
        let mut ripemd = Ripemd160::new();
        ripemd.update(&sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // P2SH-style version byte, produces addresses starting with '3'
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);

        let checksum = double_sha256(&address_bytes);
        address_bytes.extend_from_slice(&checksum[..4]);

        bs58::encode(address_bytes).into_string()
    }
}
