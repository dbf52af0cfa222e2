use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default index file name.
pub const DEFAULT_INDEX: &str = "static_index.db2";

/// Default data file name.
pub const DEFAULT_DATA: &str = "static_data.db2";

#[derive(Parser)]
#[command(
    name = "varc",
    about = "Virtual file store container un/packer",
    version,
    infer_subcommands = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import files into a fresh index/data pair
    Pack(PackArgs),
    /// Extract every stored asset into a directory
    Unpack(UnpackArgs),
    /// List the entries of an existing container
    List(ListArgs),
}

#[derive(Args)]
pub struct PackArgs {
    /// Directory to import from
    #[arg(long, default_value = "./")]
    pub dir: PathBuf,

    /// Key-path map file; without one, keys are derived from content
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Index file name
    #[arg(default_value = DEFAULT_INDEX)]
    pub index: PathBuf,

    /// Data file name
    #[arg(default_value = DEFAULT_DATA)]
    pub data: PathBuf,
}

#[derive(Args)]
pub struct UnpackArgs {
    /// Directory to extract into
    #[arg(long, default_value = "./")]
    pub dir: PathBuf,

    /// Index file name
    #[arg(default_value = DEFAULT_INDEX)]
    pub index: PathBuf,

    /// Data file name
    #[arg(default_value = DEFAULT_DATA)]
    pub data: PathBuf,
}

#[derive(Args)]
pub struct ListArgs {
    /// Index file name
    #[arg(default_value = DEFAULT_INDEX)]
    pub index: PathBuf,

    /// Data file name
    #[arg(default_value = DEFAULT_DATA)]
    pub data: PathBuf,
}
