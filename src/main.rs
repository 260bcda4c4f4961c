//! Multisig Vault CLI Application
//!
//! A command-line interface for managing a threshold multi-signature
//! vault: key generation, initialization, proposals, off-chain
//! signing, and execution.

use clap::{Parser, Subcommand};
use multisig_vault::cli::{self, AppState};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "vault")]
#[command(version = "0.1.0")]
#[command(about = "A threshold multi-signature vault", long_about = None)]
struct Cli {
    /// Data directory for vault storage
    #[arg(short, long, default_value = ".vault_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new signer key pair
    Keygen,

    /// Create a new vault owned by an administrator
    Create {
        /// Administrator address (the only identity allowed to initialize)
        #[arg(short, long)]
        admin: String,
    },

    /// Register the signer set and threshold (once)
    Init {
        /// Calling identity (must be the administrator)
        #[arg(short, long)]
        caller: String,

        /// Signer address; repeat for each signer
        #[arg(short, long = "signer", required = true)]
        signers: Vec<String>,

        /// Number of distinct approvals required
        #[arg(short, long)]
        threshold: u32,
    },

    /// Credit an address on the fund ledger
    Fund {
        /// Address to credit (defaults to the vault itself)
        #[arg(short, long)]
        address: Option<String>,

        /// Amount in the smallest native unit
        #[arg(long)]
        amount: u64,
    },

    /// Submit a transfer proposal
    Submit {
        /// Calling signer address
        #[arg(short, long)]
        caller: String,

        /// Amount to transfer
        #[arg(long)]
        amount: u64,

        /// Recipient address
        #[arg(short, long)]
        recipient: String,

        /// Optional memo text
        #[arg(short, long)]
        memo: Option<String>,
    },

    /// Print a proposal's commitment digest
    Hash {
        /// Proposal id
        #[arg(short, long)]
        id: u64,
    },

    /// Sign a proposal's commitment digest
    Sign {
        /// Proposal id
        #[arg(short, long)]
        id: u64,

        /// Signer's private key (hex)
        #[arg(short, long)]
        key: String,
    },

    /// Execute a proposal with collected signatures
    Execute {
        /// Proposal id
        #[arg(short, long)]
        id: u64,

        /// Hex-encoded recoverable signature; repeat for each signer
        #[arg(short, long = "sig", required = true)]
        signatures: Vec<String>,
    },

    /// Display vault status or one proposal
    Show {
        /// Proposal id to display in detail
        #[arg(short, long)]
        id: Option<u64>,
    },
}

fn run(cli: Cli) -> cli::CliResult<()> {
    match cli.command {
        Commands::Keygen => cli::commands::cmd_keygen(),
        Commands::Create { admin } => cli::commands::cmd_create(&cli.data_dir, &admin),
        Commands::Init {
            caller,
            signers,
            threshold,
        } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_init(&mut state, &caller, signers, threshold)
        }
        Commands::Fund { address, amount } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_fund(&mut state, address.as_deref(), amount)
        }
        Commands::Submit {
            caller,
            amount,
            recipient,
            memo,
        } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_submit(&mut state, &caller, amount, &recipient, memo.as_deref())
        }
        Commands::Hash { id } => {
            let state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_hash(&state, id)
        }
        Commands::Sign { id, key } => {
            let state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_sign(&state, id, &key)
        }
        Commands::Execute { id, signatures } => {
            let mut state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_execute(&mut state, id, signatures)
        }
        Commands::Show { id } => {
            let state = AppState::load(cli.data_dir)?;
            cli::commands::cmd_show(&state, id)
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
