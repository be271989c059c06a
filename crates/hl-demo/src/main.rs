use clap::{Parser, ValueEnum};
use hl_demo::{build_chain, render::render, DemoConfig, LinkMode, OutputFormat, TxSpec};
use hl_transaction::SystemClock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Build a small hash-linked chain and print it.
#[derive(Parser, Debug)]
#[command(
    name = "hashlink",
    version,
    about = "Hash-linked ledger demonstration",
    long_about = "Builds a chain with a genesis block and one block of transfers, \
                  then prints each block's header fields and transactions."
)]
struct Cli {
    /// Transfer to include, as SENDER:RECIPIENT:AMOUNT.  Repeatable.
    /// Defaults to Alice:Bob:10 and Bob:Charlie:5.
    #[arg(
        short,
        long = "tx",
        value_name = "SENDER:RECIPIENT:AMOUNT",
        env = "HASHLINK_TX",
        value_delimiter = ','
    )]
    transactions: Vec<TxSpec>,

    /// How the block is attached to the chain.
    #[arg(short, long, default_value = "append", env = "HASHLINK_LINK")]
    link: CliLink,

    /// Output format.
    #[arg(short, long, default_value = "text", env = "HASHLINK_FORMAT")]
    format: CliFormat,

    /// Verify the chain after building it.
    #[arg(long, default_value_t = false, env = "HASHLINK_VERIFY")]
    verify: bool,

    /// Suppress log output to stderr.
    #[arg(short, long, default_value_t = false, env = "HASHLINK_QUIET")]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone)]
enum CliLink {
    /// Build the block, then let the chain rewrite its previous hash.
    Append,
    /// Let the chain resolve the previous hash before building the block.
    Build,
}

#[derive(ValueEnum, Debug, Clone)]
enum CliFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::from_default_env()
            .add_directive("hl_demo=info".parse()?)
            .add_directive("hl_chain=warn".parse()?)
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .init();

    let defaults = DemoConfig::default();
    let config = DemoConfig {
        transactions: if cli.transactions.is_empty() {
            defaults.transactions
        } else {
            cli.transactions
        },
        link_mode: match cli.link {
            CliLink::Append => LinkMode::Append,
            CliLink::Build => LinkMode::Build,
        },
        format: match cli.format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        },
        verify: cli.verify,
        quiet: cli.quiet,
    };

    info!(
        transactions = config.transactions.len(),
        link = ?config.link_mode,
        format = ?config.format,
        "Building demo chain"
    );

    let chain = build_chain(&config, &SystemClock)?;
    render(&chain, config.format, &mut std::io::stdout().lock())?;

    if config.verify {
        match chain.verify() {
            Ok(()) => info!(blocks = chain.len(), "chain verified"),
            Err(err) => {
                error!(%err, "chain verification failed");
                return Err(err.into());
            }
        }
    }

    Ok(())
}
