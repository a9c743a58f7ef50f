use clap::Parser;
use std::path::PathBuf;

/// Download per-block miner rewards from Etherscan
#[derive(Parser, Debug)]
#[command(name = "block-rewards", version, about = "Download Ethereum block rewards from Etherscan")]
pub struct RewardsCli {
    /// The first block to download
    #[arg(short = 'f', long)]
    pub from: u64,

    /// The last block to download (the final batch may run past it)
    #[arg(short = 't', long)]
    pub to: u64,

    /// Directory to save block rewards data
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// Output file name (default: <from>_<to>.json)
    #[arg(short = 'n', long)]
    pub filename: Option<String>,

    /// Specify the config file path
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

impl RewardsCli {
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("{}_{}.json", self.from, self.to))
    }

    pub fn output_path(&self) -> PathBuf {
        self.directory.join(self.filename())
    }
}

/// Collect the hashes of the blocks preceding the configured start block
#[derive(Parser, Debug)]
#[command(name = "last-hashes", version, about = "Collect recent Ethereum block hashes")]
pub struct HashesCli {
    /// Specify the config file path
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}
