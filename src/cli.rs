use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_OUTPUT, MapConfig};
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "emsdk-llvm-map")]
#[command(
    version,
    about = "Generate and query the emsdk <-> LLVM version map used for flang wasm builds"
)]
pub struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch upstream sources and write the mapping JSON
    Generate(GenerateArgs),
    /// Print the emsdk release to use for an LLVM version
    Resolve(ResolveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to write generated JSON mapping data
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Range for the derived previous-major policy map (e.g. 19-23)
    #[arg(long)]
    pub flang_major_range: Option<String>,

    /// Minimum emsdk semantic version to include in output
    #[arg(long)]
    pub min_emsdk_version: Option<String>,

    /// Minimum LLVM major to keep in llvm_major_latest_emsdk
    #[arg(long)]
    pub min_llvm_major: Option<u64>,
}

impl GenerateArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, mut config: MapConfig) -> MapConfig {
        if let Some(range) = &self.flang_major_range {
            config.flang_major_range = range.clone();
        }
        if let Some(version) = &self.min_emsdk_version {
            config.min_emsdk_version = version.clone();
        }
        if let Some(major) = self.min_llvm_major {
            config.min_llvm_major = major;
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Path to emsdk-llvm-map.json
    #[arg(long)]
    pub map_file: PathBuf,

    /// LLVM version X.Y.Z
    #[arg(long)]
    pub llvm_version: String,
}
