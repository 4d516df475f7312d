use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "graft",
    about = "graft — method-body patching for compiled modules",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a patch manifest to a module
    Apply(ApplyArgs),
    /// Show the types and methods of a module
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Patch manifest (TOML)
    #[arg(short, long)]
    pub manifest: PathBuf,
    /// Module to patch
    pub input: PathBuf,
    /// Destination for the patched module
    pub output: PathBuf,
}

#[derive(Args)]
pub struct InspectArgs {
    pub module: PathBuf,
    /// Also print instruction streams
    #[arg(long)]
    pub bodies: bool,
}
