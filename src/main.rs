use anyhow::Result;
use clap::Parser;

use git_nextver::config;
use git_nextver::{get_next_version_based_on_mr, NextVersionReport, Output};

#[derive(clap::Parser)]
#[command(
    name = "git-nextver",
    version,
    about = "Compute the next semantic version for merging one branch into another",
    long_about = "Compares the commits of a source branch against a target branch, \
                  classifies them with conventional commits and bumps the latest version tag."
)]
struct Args {
    #[arg(short, long, help = "Path to the git repository, e.g. /home/user/repo")]
    path: String,

    #[arg(
        short,
        long,
        visible_alias = "sourceBranch",
        help = "Source branch, e.g. feature/foo"
    )]
    source_branch: String,

    #[arg(
        short,
        long,
        visible_alias = "targetBranch",
        help = "Target branch, e.g. main (defaults to the configured target)"
    )]
    target_branch: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        help = "Force-checkout each branch before reading its history (discards local changes)"
    )]
    checkout: bool,

    #[arg(short, long, help = "Log progress to stderr")]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> git_nextver::Result<NextVersionReport> {
    let mut config = config::load_config(args.config.as_deref())?;
    if args.checkout {
        config.checkout = true;
    }

    let target_branch = args
        .target_branch
        .clone()
        .unwrap_or_else(|| config.target_branch.clone());

    get_next_version_based_on_mr(&args.path, &args.source_branch, &target_branch, &config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let result = run(&args);
    if let Err(e) = &result {
        log::debug!("Next version computation failed: {:?}", e);
    }

    println!("{}", Output::from_result(result).to_json()?);
    Ok(())
}
