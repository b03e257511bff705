//! tomato - A Pomodoro timer for the terminal
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 pomodoros

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use tomato_timer::cli::{
    spawn_stdin_reader, Cli, Commands, ConfigAction, Display, InputCommand, RunArgs,
};
use tomato_timer::config::{load_or_default, ConfigStore, JsonFileStore};
use tomato_timer::engine::{TimerEngine, TimerService};
use tomato_timer::notification::{
    CompletionDispatcher, DesktopNotifier, NotifierSet, SoundNotifier,
};
use tomato_timer::sound::{try_create_player, SoundSource};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never break the status line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let store = open_store(cli.config)?;
            run_timer(&store, &args).await?;
        }
        Some(Commands::Config { action }) => {
            let store = open_store(cli.config)?;
            manage_config(&store, action)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Opens the configuration store at `path` or the default location.
fn open_store(path: Option<PathBuf>) -> Result<JsonFileStore> {
    match path {
        Some(path) => Ok(JsonFileStore::with_path(path)),
        None => JsonFileStore::new().context("cannot locate the configuration file"),
    }
}

/// Handles `tomato config ...`.
fn manage_config(store: &JsonFileStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let stored = match store.load() {
                Ok(stored) => stored,
                Err(e) if e.is_corrupt() => {
                    return Err(anyhow::Error::new(e).context(
                        "the stored configuration is unusable; run `tomato config reset`",
                    ));
                }
                Err(e) => {
                    return Err(
                        anyhow::Error::new(e).context("cannot read the stored configuration")
                    );
                }
            };
            Display::show_config(&stored.unwrap_or_default(), store.path());
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
        ConfigAction::Reset => {
            store.clear().context("failed to remove the stored configuration")?;
            Display::show_config_reset(store.path());
        }
        ConfigAction::Set(values) => {
            if values.is_empty() {
                bail!("nothing to change; pass --work, --short-break, --long-break or --sessions");
            }
            let config = values.apply(load_or_default(store));
            store.save(&config).context("failed to save the configuration")?;
            Display::show_config_saved(&config, store.path());
        }
    }
    Ok(())
}

/// Resolves the completion sound, checking `--sound` before the timer starts.
fn sound_source(args: &RunArgs) -> Result<SoundSource> {
    match &args.sound {
        Some(path) => SoundSource::file_validated(path)
            .with_context(|| format!("cannot use sound file {}", path.display())),
        None => Ok(SoundSource::fallback_tone()),
    }
}

/// Builds the notifiers selected on the command line.
///
/// Runs on the notification thread, where the audio stream lives.
fn build_notifiers(args: &RunArgs, source: SoundSource) -> NotifierSet {
    let mut notifiers = NotifierSet::new();

    if !args.no_notify {
        notifiers.push(DesktopNotifier::new());
    }

    if !args.no_sound {
        if let Some(player) = try_create_player() {
            notifiers.push(SoundNotifier::new(player, source));
        }
    }

    debug!(?notifiers, "Notifiers ready");
    notifiers
}

/// Runs the timer in the foreground until the user quits.
async fn run_timer<S: ConfigStore>(store: &S, args: &RunArgs) -> Result<()> {
    let config = args.durations.apply(load_or_default(store));
    config.validate().context("invalid timer configuration")?;

    let source = sound_source(args)?;
    let notifier_args = args.clone();
    let dispatcher = CompletionDispatcher::spawn(move || build_notifiers(&notifier_args, source))
        .context("failed to start the notification thread")?;

    let engine = TimerEngine::new(config)?.with_on_complete(dispatcher.callback());
    let (service, handle, mut updates) = TimerService::new(engine);
    let service = tokio::spawn(service.run());

    let mut input = spawn_stdin_reader().context("failed to read from stdin")?;
    let mut input_open = true;

    Display::show_welcome(&config);
    Display::show_status(&handle.status().await?);
    if args.autostart {
        handle.start()?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = input.recv(), if input_open => match line {
                Some(line) => match InputCommand::parse(&line) {
                    Some(InputCommand::Quit) => break,
                    Some(InputCommand::Help) => Display::show_controls(),
                    Some(control) => {
                        if let Some(command) = control.to_command() {
                            handle.send(command)?;
                        }
                    }
                    None if line.is_empty() => {}
                    None => Display::show_unknown_input(&line),
                },
                None => {
                    debug!("Input closed; press Ctrl-C to quit");
                    input_open = false;
                }
            },
            update = updates.recv() => match update {
                Some(update) => Display::show_update(&update),
                None => break,
            },
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    // The loop may already be gone if it stopped on its own.
    let _ = handle.shutdown();
    drop(handle);

    let engine = service.await.context("timer service failed")?;
    Display::show_goodbye(engine.state());
    info!(sessions = engine.sessions_completed(), "Timer stopped");

    // The engine holds the completion callback; drop it so the
    // notification thread sees the end of its queue.
    drop(engine);
    tokio::task::spawn_blocking(move || dispatcher.shutdown())
        .await
        .context("notification thread failed")?;

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
