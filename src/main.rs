use anyhow::Context;
use clap::Parser;
use tracing::error;

use emsdk_llvm_map::cli::{Cli, Command, GenerateArgs, ResolveArgs};
use emsdk_llvm_map::config::MapConfig;
use emsdk_llvm_map::logging::init_tracing;
use emsdk_llvm_map::mapping::resolve_from_file;
use emsdk_llvm_map::pipeline::{GenerateOptions, generate};
use emsdk_llvm_map::version::sources::GitHubRawSource;

fn main() {
    let cli = Cli::parse();

    let guard = match init_tracing(cli.log_file.as_deref(), cli.log_format) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli.command) {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        drop(guard);
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Resolve(args) => run_resolve(args),
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => MapConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MapConfig::default(),
    };
    let config = args.apply(config);
    let options = GenerateOptions::try_from(&config)?;
    let source = GitHubRawSource::new(config.sources.clone())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(generate(&source, &options, &args.output))?;

    Ok(())
}

fn run_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let resolved = resolve_from_file(&args.map_file, &args.llvm_version)?;
    print!("{}", resolved.to_env_lines());
    Ok(())
}
