use crate::cli::args::Cli;
use crate::config::Config;
use crate::transpiler::{self, CompileReport, FsOutput, MemoryOutput};
use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::process::ExitCode;

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Usage errors exit with 1 rather than clap's default of 2
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    match compile_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn compile_command(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    println!("Tale Script Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("📜 Compiling script {}\n", cli.input.display());

    if cli.verbose {
        println!("⚙️ Configuration: {:?}", config);
    }

    if cli.dry_run {
        let mut output = MemoryOutput::new();
        let report = transpiler::transpile_file(&cli.input, &config, &mut output)?;

        print_summary(&report);
        println!("📁 Dry run, nothing written. Would generate:");
        for (path, contents) in output.files() {
            println!("   {} ({} bytes)", cli.output_dir.join(path).display(), contents.len());
        }
    } else {
        let mut output = FsOutput::new(&cli.output_dir);
        let report = transpiler::transpile_file(&cli.input, &config, &mut output)?;

        print_summary(&report);
        println!("📁 Output: {}", output.root().display());
    }

    println!("\n✅ Compiled successfully");

    Ok(())
}

fn print_summary(report: &CompileReport) {
    println!("---");
    println!("🎬 Scenes: {}", report.scenes.len());
    for scene in &report.scenes {
        println!("   {}", scene);
    }
    println!("🗣️ Characters: {}", report.characters.join(", "));
    println!("📄 Files: {}", report.files.len());
}
