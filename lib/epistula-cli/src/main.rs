use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;
use std::env;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

mod address;
mod args;
mod config;
mod sign;
mod util;
mod verify;

fn initialise_logging() {
    let filter = env::var("RUST_LOG")
        .ok()
        .and_then(|targets| targets.parse().ok())
        .unwrap_or_else(|| Targets::default().with_default(LevelFilter::INFO));

    Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    initialise_logging();

    let args = ToolArgs::parse();
    let config = config::load(args.config.as_deref()).await?;

    match args.subcommand {
        ToolSubcommand::Address(args) => address::do_it(args, &config),
        ToolSubcommand::Sign(args) => sign::do_it(args, config).await,
        ToolSubcommand::Verify(args) => verify::do_it(args, config).await,
    }
}
