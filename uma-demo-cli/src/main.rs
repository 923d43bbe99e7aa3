//! UMA Demo CLI
//!
//! Command-line interface for trying out UMA VASP-to-VASP exchanges.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "uma-demo")]
#[command(about = "UMA Demo CLI - Build and inspect UMA exchange messages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a secp256k1 signing and encryption keypair
    Keygen {
        /// Directory to write the keys and public key document to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Build a signed discovery request URL
    Request {
        /// UMA address being paid (e.g., $alice@vasp1.com)
        receiver: String,

        /// Our VASP domain
        #[arg(long, env = "UMA_VASP_DOMAIN")]
        vasp_domain: String,

        /// Hex signing private key
        #[arg(long, env = "UMA_SIGNING_KEY", hide_env_values = true)]
        signing_key: String,

        /// Mark our VASP as subject to the travel rule
        #[arg(long)]
        travel_rule: bool,

        /// Also render the URL as a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Decode a discovery request URL and optionally verify its signature
    Inspect {
        /// Discovery request URL
        url: String,

        /// Hex signing public key of the sending VASP
        #[arg(long)]
        signing_pubkey: Option<String>,

        /// Fetch the sending VASP's public keys from its well-known endpoint
        #[arg(long, conflicts_with = "signing_pubkey")]
        fetch: bool,
    },

    /// Answer a discovery request with a signed discovery response
    Respond {
        /// Discovery request URL
        url: String,

        /// Our VASP domain
        #[arg(long, env = "UMA_VASP_DOMAIN")]
        vasp_domain: String,

        /// Hex signing private key
        #[arg(long, env = "UMA_SIGNING_KEY", hide_env_values = true)]
        signing_key: String,

        /// KYC status of the receiving user
        #[arg(long, default_value = "VERIFIED")]
        kyc_status: String,
    },

    /// Check a protocol version against the versions we support
    Negotiate {
        /// Counterparty version (e.g., 1.0)
        version: Option<String>,

        /// Unsupported-version error body returned by a counterparty
        #[arg(long, conflicts_with = "version")]
        error_body: Option<String>,
    },

    /// Encrypt travel-rule information to a receiver's encryption key
    Encrypt {
        /// Travel-rule text
        info: String,

        /// Hex encryption public key of the receiving VASP
        #[arg(long)]
        pubkey: String,
    },

    /// Decrypt travel-rule information with our encryption key
    Decrypt {
        /// Hex ciphertext
        ciphertext: String,

        /// Hex encryption private key
        #[arg(long, env = "UMA_ENCRYPTION_KEY", hide_env_values = true)]
        private_key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("uma_demo_cli=debug,uma_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("uma_demo_cli=info,uma_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch commands
    let result = match cli.command {
        Commands::Keygen { output_dir } => commands::keygen::run(output_dir.as_deref(), cli.verbose),
        Commands::Request {
            receiver,
            vasp_domain,
            signing_key,
            travel_rule,
            qr,
        } => commands::request::run(
            &receiver,
            &vasp_domain,
            &signing_key,
            travel_rule,
            qr,
            cli.verbose,
        ),
        Commands::Inspect {
            url,
            signing_pubkey,
            fetch,
        } => commands::inspect::run(&url, signing_pubkey.as_deref(), fetch, cli.verbose),
        Commands::Respond {
            url,
            vasp_domain,
            signing_key,
            kyc_status,
        } => commands::respond::run(&url, &vasp_domain, &signing_key, &kyc_status, cli.verbose),
        Commands::Negotiate {
            version,
            error_body,
        } => commands::negotiate::run(version.as_deref(), error_body.as_deref(), cli.verbose),
        Commands::Encrypt { info, pubkey } => commands::travel_rule::encrypt(&info, &pubkey),
        Commands::Decrypt {
            ciphertext,
            private_key,
        } => commands::travel_rule::decrypt(&ciphertext, &private_key),
    };

    if let Err(err) = &result {
        ui::error(&format!("{:#}", err));
    }
    result
}
