#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::anyhow;
use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::ProviderConfig;
use domain::models::TracingConfig;
use domain::services::ChatController;
use domain::services::PromptAssembler;
use infrastructure::providers::ProviderManager;
use infrastructure::tracers::TracerManager;
use tokio::sync::mpsc;
use tokio::task;
use tracing_appender::non_blocking::WorkerGuard;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Glimpse has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
        eprintln!(
            "\nDebug logs are written to {} when RUST_LOG=glimpse is set.",
            Config::log_dir().join("debug.log").to_string_lossy()
        );
    } else {
        eprintln!("\n{}", backtrace);
    }
}

async fn run() -> Result<()> {
    let provider_config = ProviderConfig::from_config();
    let tracing_config = TracingConfig::from_config();
    let model = provider_config.model;

    let provider = match ProviderManager::get(&provider_config) {
        Ok(provider) => Some(provider),
        Err(err) => {
            tracing::warn!(error = %err, "Starting with chat disabled");
            None
        }
    };
    let controller = ChatController::new(
        PromptAssembler::default(),
        provider,
        TracerManager::get(&tracing_config),
    );

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::new(controller, provider_config, event_tx)
            .start(&mut action_rx)
            .await;
    });

    let ui_future = ui::start(action_tx, event_rx, model);

    return tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(anyhow!(err)),
            None => Ok(()),
        },
        res = ui_future => res,
    );
}

fn init_logging() -> Option<WorkerGuard> {
    if !env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("glimpse")
    {
        return None;
    }

    let log_file = match Config::open_log_file(&Config::log_dir()) {
        Ok(log_file) => log_file,
        Err(err) => {
            eprintln!(
                "{}",
                Paint::yellow(format!("Debug logging is disabled: {err:#}"))
            );
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(log_file);
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .init();

    return Some(guard);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let log_guard = init_logging();

    let res = match cli::parse().await {
        Ok(true) => run().await.map_err(|err| {
            ui::destruct_terminal_for_panic();
            return err;
        }),
        Ok(false) => Ok(()),
        Err(err) => Err(err),
    };

    // Flushes buffered log lines, process::exit skips destructors.
    drop(log_guard);

    if let Err(err) = res {
        handle_error(err);
        process::exit(1);
    }

    process::exit(0);
}
