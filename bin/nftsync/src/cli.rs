use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "nftsync", about = "Multi-node NFT event sync engine")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "./config.yaml")]
    pub config: String,

    /// Overrides the tracing `EnvFilter` (defaults to `RUST_LOG`, or `info`).
    #[arg(long)]
    pub log_filter: Option<String>
}
