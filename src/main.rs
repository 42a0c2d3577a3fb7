use clap::Parser;
use log::*;

use jira_releaser::{
    PipelineParams, ReleasePipeline, Result,
    cli::Args,
    forge::{github::Github, manager::ForgeManager},
    git::SystemGit,
    tracker::jira::Jira,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("jira_releaser")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let git = SystemGit::new(&cli_args.repo_path, cli_args.commit_filter()?);
    debug!("using git checkout at {}", git.repo_path().display());

    let github = Github::new(cli_args.remote_config()?)?;
    let jira = Jira::new(cli_args.tracker_config()?)?;

    let pipeline = ReleasePipeline::new(PipelineParams {
        config: cli_args.pipeline_config()?,
        git: Box::new(git),
        forge: ForgeManager::new(Box::new(github)),
        tracker: Box::new(jira),
    });

    match pipeline.run(cli_args.version.clone()).await? {
        Some(summary) => info!(
            "release {} complete: {} issue(s) referenced",
            summary.version,
            summary.issues.len()
        ),
        None => info!("nothing to release"),
    }

    Ok(())
}
