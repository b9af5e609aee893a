use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "talec",
    about = "Tale Script Compiler: turns Markdown story scripts into Tale scene scripts",
    version
)]
pub struct Cli {
    /// Story script to compile
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Root directory for the generated files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON file overriding the compiler settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compile without writing anything, listing the files that would be generated
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
