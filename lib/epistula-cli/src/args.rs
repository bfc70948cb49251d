use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
#[group(required = false, multiple = false)]
pub struct BodyArgs {
    /// Request body, passed inline
    #[arg(long)]
    pub body: Option<String>,

    /// Read the request body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct SignArgs {
    /// Hex-encoded 32 byte seed of the sender
    #[arg(long, env = "EPISTULA_SEED", hide_env_values = true)]
    pub seed: String,

    /// Address of the intended recipient
    #[arg(long)]
    pub receiver: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Address of the verifying party
    #[arg(long)]
    pub receiver: String,

    /// File containing the received headers as `Name: value` lines
    #[arg(long)]
    pub headers: PathBuf,

    /// Also check the secret signatures against the current time window
    #[arg(long)]
    pub secret: bool,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args)]
pub struct AddressArgs {
    /// Hex-encoded 32 byte seed
    #[arg(long, env = "EPISTULA_SEED", hide_env_values = true)]
    pub seed: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Print the SS58 address belonging to a seed
    Address(AddressArgs),

    /// Sign a request body and print the authentication headers
    Sign(SignArgs),

    /// Verify a request body against a set of received headers
    Verify(VerifyArgs),
}

/// Sign and verify Epistula requests
#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "EPISTULA_CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
