//! CLI commands for the vault
//!
//! Implements all command handlers for the CLI interface. All
//! authorization decisions live in the library; these handlers only
//! load state, call into it, and print results.

use crate::crypto::KeyPair;
use crate::storage::{Storage, StorageConfig, VaultState};
use crate::vault::VaultError;
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub state: VaultState,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load existing application state
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        })?;

        if !storage.exists() {
            return Err(format!(
                "No vault found in {:?}. Create one with: vault create --admin <address>",
                data_dir
            )
            .into());
        }

        let state = storage.load()?;
        Ok(Self {
            state,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.state)?;
        Ok(())
    }
}

fn print_vault_error(error: &VaultError) {
    println!("❌ {} (error {})", error, error.code());
}

/// Generate a new key pair
pub fn cmd_keygen() -> CliResult<()> {
    let key_pair = KeyPair::generate();

    println!("🔐 New key pair generated!");
    println!("   📍 Address: {}", key_pair.address());
    println!("   🔑 Public key: {}", key_pair.public_key_hex());
    println!("   🗝️  Private key: {}", key_pair.private_key_hex());
    println!("\n   ⚠️  IMPORTANT: Store the private key securely.");
    println!("   Anyone holding it can approve transfers as this signer.");

    Ok(())
}

/// Create a new vault state file
pub fn cmd_create(data_dir: &Path, admin: &str) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;

    if storage.exists() {
        println!("⚠️  A vault already exists at {:?}", data_dir);
        return Ok(());
    }

    let state = VaultState::new(admin.to_string());
    storage.save(&state)?;

    println!("✅ Vault created!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   👤 Administrator: {}", admin);
    println!("\n   Next: vault init --caller {} --signer <addr> ... --threshold <n>", admin);

    Ok(())
}

/// Initialize the vault with signers and a threshold
pub fn cmd_init(
    state: &mut AppState,
    caller: &str,
    signers: Vec<String>,
    threshold: u32,
) -> CliResult<()> {
    match state.state.vault.initialize(caller, signers, threshold) {
        Ok(()) => {
            let vault = &state.state.vault;
            println!("✅ Vault initialized!");
            println!(
                "   🛡️  Policy: {}",
                vault.policy().map(|p| p.description()).unwrap_or_default()
            );
            println!("   📍 Vault address: {}", vault.address().unwrap_or("-"));
            for signer in vault.signers() {
                println!("   └─ signer {}", signer);
            }
            state.save()?;
        }
        Err(e) => print_vault_error(&e),
    }

    Ok(())
}

/// Credit an address on the fund ledger
pub fn cmd_fund(state: &mut AppState, address: Option<&str>, amount: u64) -> CliResult<()> {
    let target = match address {
        Some(addr) => addr.to_string(),
        None => match state.state.vault.address() {
            Some(addr) => addr.to_string(),
            None => {
                println!("❌ Vault is not initialized; pass --address explicitly");
                return Ok(());
            }
        },
    };

    state.state.ledger.deposit(&target, amount);
    state.save()?;

    println!("💰 Deposited {} units to {}", amount, target);
    println!(
        "   New balance: {}",
        state.state.ledger.balance_of(&target)
    );

    Ok(())
}

/// Submit a transfer proposal
pub fn cmd_submit(
    state: &mut AppState,
    caller: &str,
    amount: u64,
    recipient: &str,
    memo: Option<&str>,
) -> CliResult<()> {
    let memo_bytes = memo.map(|m| m.as_bytes().to_vec());

    match state
        .state
        .vault
        .submit(caller, amount, recipient.to_string(), memo_bytes)
    {
        Ok(id) => {
            println!("📤 Proposal submitted!");
            println!("   🆔 Id: {}", id);
            println!("   💸 Amount: {} units", amount);
            println!("   📍 Recipient: {}", recipient);
            println!("\n   Signers approve with: vault sign --id {} --key <private-key>", id);
            state.save()?;
        }
        Err(e) => print_vault_error(&e),
    }

    Ok(())
}

/// Print a proposal's commitment digest
pub fn cmd_hash(state: &AppState, id: u64) -> CliResult<()> {
    match state.state.vault.proposal_digest(id) {
        Ok(digest) => {
            println!("🔏 Commitment digest for proposal {}:", id);
            println!("   {}", hex::encode(digest));
        }
        Err(e) => print_vault_error(&e),
    }

    Ok(())
}

/// Sign a proposal's commitment digest with a private key
pub fn cmd_sign(state: &AppState, id: u64, private_key_hex: &str) -> CliResult<()> {
    let key_pair = KeyPair::from_private_key_hex(private_key_hex)?;

    match state.state.vault.proposal_digest(id) {
        Ok(digest) => {
            let signature = key_pair.sign_recoverable(&digest)?;
            println!("✍️  Signed proposal {} as {}", id, key_pair.address());
            println!("   {}", hex::encode(signature));
        }
        Err(e) => print_vault_error(&e),
    }

    Ok(())
}

/// Execute a proposal with a batch of hex-encoded signatures
pub fn cmd_execute(state: &mut AppState, id: u64, signatures: Vec<String>) -> CliResult<()> {
    let result = {
        let VaultState { vault, ledger } = &mut state.state;
        vault.execute(id, &signatures, ledger)
    };

    match result {
        Ok(record) => {
            println!("✅ Proposal {} executed!", id);
            println!("   💸 {} units -> {}", record.amount, record.recipient);
            println!("   👥 Approvers:");
            for approver in &record.approvers {
                println!("   └─ {}", approver);
            }
            state.save()?;
        }
        Err(e) => print_vault_error(&e),
    }

    Ok(())
}

/// Display vault status, or one proposal in detail
pub fn cmd_show(state: &AppState, id: Option<u64>) -> CliResult<()> {
    let vault = &state.state.vault;

    if let Some(id) = id {
        match vault.proposal(id) {
            Some(proposal) => {
                println!("📄 Proposal {}", proposal.id);
                println!("   ├─ Recipient: {}", proposal.recipient);
                println!("   ├─ Amount: {} units", proposal.amount);
                let memo = proposal
                    .memo
                    .as_ref()
                    .map(|m| String::from_utf8_lossy(m).into_owned())
                    .unwrap_or_else(|| "-".to_string());
                println!("   ├─ Memo: {}", memo);
                println!("   ├─ Proposer: {}", proposal.proposer);
                println!("   └─ Executed: {}", proposal.executed);
            }
            None => println!("❌ Proposal {} not found", id),
        }
        return Ok(());
    }

    println!("🏦 Vault Status");
    println!("   ├─ Administrator: {}", vault.admin());
    println!("   ├─ Initialized: {}", vault.is_initialized());
    if let Some(policy) = vault.policy() {
        println!("   ├─ Policy: {}", policy.description());
        println!("   ├─ Address: {}", vault.address().unwrap_or("-"));
        println!(
            "   ├─ Balance: {} units",
            vault
                .address()
                .map(|a| state.state.ledger.balance_of(a))
                .unwrap_or(0)
        );
    }
    println!("   ├─ Proposals: {}", vault.proposal_count());
    println!("   └─ Executions: {}", vault.executions().len());

    for id in 0..vault.proposal_count() {
        if let Some(proposal) = vault.proposal(id) {
            let status = if proposal.executed { "executed" } else { "pending" };
            println!(
                "   #{} | {} units -> {} | {}",
                proposal.id, proposal.amount, proposal.recipient, status
            );
        }
    }

    Ok(())
}
