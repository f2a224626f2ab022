#![warn(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use upcheck::report::assets::EmbeddedAssets;
use upcheck::report::audio::CommandPlayer;
use upcheck::report::notify::CommandNotifier;
use upcheck::{
    MonitorStatus, NoProgress, OutcomeReporter, PollLoop, Progress, TcpChecker, TerminalProgress,
    resolve,
};

mod cli;
mod config;
mod error;

use cli::Cli;
use config::Config;
use error::AppError;

const EXIT_DOWN: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    if cli.init_config {
        let path = config::resolve_path(cli.config.as_deref())?;
        Config::default().write_config(&path)?;
        info!("wrote default config to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::from_config(cli.config.as_deref())?;
    if cli.show_config {
        print!("{config}");
        return Ok(ExitCode::SUCCESS);
    }

    let raw = cli.endpoint()?;
    let endpoint = resolve(raw)?;
    let poll_config = config.poll_config(&cli)?;
    let policy = config.policy(&cli);

    info!("Check {endpoint}, timeout: {}s", poll_config.budget().as_secs());

    let mut progress: Box<dyn Progress> = if cli.no_progress {
        Box::new(NoProgress)
    } else {
        TerminalProgress::for_stderr(endpoint.to_string())
    };
    let poller = PollLoop::new(TcpChecker::new(), poll_config);
    let reporter = OutcomeReporter::new(
        Box::new(EmbeddedAssets),
        Box::new(CommandNotifier::new(&config.notifier.command, &config.notifier.app_name)),
        Box::new(CommandPlayer::new(config.audio.command.clone())),
    );

    let watch = async {
        let outcome = poller.run(&endpoint, progress.as_mut()).await;
        match outcome.status {
            MonitorStatus::Up => info!(
                "{endpoint} is up! ({} of {} attempts)",
                outcome.elapsed_ticks, outcome.total_ticks
            ),
            MonitorStatus::Down => info!(
                "{endpoint} is down... last error: {}",
                outcome.last_error.as_ref().map_or("none", |e| e.message.as_str())
            ),
        }

        let summary = reporter.report(&outcome, &endpoint, policy).await;
        if !summary.is_clean() {
            warn!("{} notification step(s) failed", summary.failures.len());
        }
        outcome
    };

    // Dropping the watch future on interrupt releases everything it holds,
    // including extracted assets, before the process exits.
    let finished = tokio::select! {
        outcome = watch => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };

    match finished {
        Some(outcome) if outcome.is_up() => Ok(ExitCode::SUCCESS),
        Some(_) => Ok(ExitCode::from(EXIT_DOWN)),
        None => {
            // The bar may have been cut off mid-line
            progress.finish();
            warn!("interrupted, stopping");
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
    }
}
