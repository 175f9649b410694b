//! CLI entry point for `tempmail`.

use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};

use tempmail::config::Config;
use tempmail::model::identity::Identity;
use tempmail::session::clipboard::InternalClipboard;
use tempmail::session::controller::SessionController;
use tempmail::session::generator::IdentityGenerator;
use tempmail::session::presenter::{PresenterEvent, RecordingPresenter};
use tempmail::session::random::source_from_seed;
use tempmail::session::scheduler::{Clock, ManualClock};

#[derive(Parser)]
#[command(
    name = "tempmail",
    version,
    about = "Simulated disposable mailbox in the terminal",
    long_about = "Generates a throwaway address and password that live for ten minutes, \
                  with simulated messages arriving while the address is alive. \
                  Nothing is sent over the network."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Seed for a reproducible random source
    #[arg(long, value_name = "SEED", global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the mailbox in the TUI (default)
    Run,
    /// Print freshly generated identities
    Generate {
        /// How many identities to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        json: bool,
    },
    /// Run a session headless on a simulated clock and print what happened
    Simulate {
        /// Simulated seconds to run for
        #[arg(short, long, default_value_t = 600)]
        seconds: u64,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = tempmail::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // The TUI owns the terminal, so it only logs to the file.
    let headless = !matches!(cli.command, None | Some(Commands::Run));
    setup_logging(log_level, &config, headless);

    match cli.command {
        None | Some(Commands::Run) => tempmail::tui::run_tui(&config, cli.seed),
        Some(Commands::Generate { count, json }) => cmd_generate(&config, count, json, cli.seed),
        Some(Commands::Simulate { seconds, json }) => {
            cmd_simulate(&config, seconds, json, cli.seed)
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

fn setup_logging(level: &str, config: &Config, with_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = with_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // Try to set up file logging
    let file_layer = tempmail::config::ensure_log_dir(config).ok().map(|log_dir| {
        let file_appender =
            tracing_appender::rolling::never(&log_dir, tempmail::config::LOG_FILE_NAME);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "tempmail", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Print `count` identities generated under the configured domains.
fn cmd_generate(config: &Config, count: usize, json: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let settings = config.session.to_settings()?;
    let generator = IdentityGenerator::new(settings.domains);
    let mut rng = source_from_seed(seed);

    let identities: Vec<Identity> = (0..count)
        .map(|_| generator.generate(&mut *rng, chrono::Utc::now()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&identities)?);
        return Ok(());
    }

    println!();
    println!("  {:<30} {:<16}", "Address", "Password");
    println!("  {}", "-".repeat(46));
    for identity in &identities {
        println!("  {:<30} {:<16}", identity.address, identity.password);
    }
    println!();
    Ok(())
}

/// A presenter event and when it happened, in simulated seconds.
struct TimedEvent {
    at_secs: u64,
    event: PresenterEvent,
}

/// Run one session for `seconds` simulated seconds and report it.
fn cmd_simulate(config: &Config, seconds: u64, json: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let settings = config.session.to_settings()?;
    let clock = ManualClock::new();
    let mut session = SessionController::new(
        settings,
        RecordingPresenter::new(),
        clock.clone(),
        source_from_seed(seed),
    )
    .with_clipboards(
        Box::new(InternalClipboard::new()),
        Box::new(InternalClipboard::new()),
    );

    let mut log: Vec<TimedEvent> = Vec::new();
    session.create_session();
    drain_events(&mut session, 0, &mut log);

    for second in 1..=seconds {
        clock.advance(Duration::from_secs(1));
        session.advance();
        drain_events(&mut session, second, &mut log);
    }

    tracing::info!(
        seconds,
        state = ?session.state(),
        messages = session.inbox().len(),
        "Simulation finished"
    );

    if json {
        print_simulation_json(&session, &clock, &log)
    } else {
        print_simulation_table(&session, &log);
        Ok(())
    }
}

fn drain_events(
    session: &mut SessionController<RecordingPresenter, ManualClock>,
    at_secs: u64,
    log: &mut Vec<TimedEvent>,
) {
    let presenter = session.presenter_mut();
    log.extend(
        presenter
            .events
            .drain(..)
            .map(|event| TimedEvent { at_secs, event }),
    );
}

/// Print the notification log and final inbox as a human-readable table.
fn print_simulation_table(
    session: &SessionController<RecordingPresenter, ManualClock>,
    log: &[TimedEvent],
) {
    println!();
    if let Some(identity) = session.identity() {
        println!("  {:<12} {}", "Address", identity.address);
        println!("  {:<12} {}", "Password", identity.password);
    }
    println!("  {:<12} {:?}", "State", session.state());
    println!("  {:<12} {}", "Remaining", session.countdown().display());
    println!();

    println!("  {:>6}  Notification", "At");
    println!("  {}", "-".repeat(46));
    for entry in log {
        if let PresenterEvent::Notify { notice } = &entry.event {
            println!(
                "  {:>3}:{:02}  {}",
                entry.at_secs / 60,
                entry.at_secs % 60,
                notice.text
            );
        }
    }
    println!();

    let messages = session.inbox().newest_first();
    println!("  {} message(s)", messages.len());
    if !messages.is_empty() {
        println!();
        println!("  {:<4} {:<10} {:<22} Preview", "#", "Time", "Subject");
        println!("  {}", "-".repeat(78));
        for message in &messages {
            println!(
                "  {:<4} {:<10} {:<22} {}",
                message.id,
                message.time_label,
                message.subject,
                message.snippet(40)
            );
        }
    }
    println!();
}

/// Print the full event log and final inbox as JSON.
fn print_simulation_json(
    session: &SessionController<RecordingPresenter, ManualClock>,
    clock: &ManualClock,
    log: &[TimedEvent],
) -> anyhow::Result<()> {
    let events: Vec<serde_json::Value> = log
        .iter()
        .map(|entry| {
            serde_json::json!({
                "at_secs": entry.at_secs,
                "event": entry.event,
            })
        })
        .collect();

    let output = serde_json::json!({
        "identity": session.identity(),
        "state": format!("{:?}", session.state()),
        "remaining": session.countdown().display(),
        "simulated_secs": clock.elapsed().as_secs(),
        "events": events,
        "inbox": session.inbox().newest_first(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
