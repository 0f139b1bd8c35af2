//! SSC JE Architect - 360-day study planner
//!
//! CLI entry point: launches the TUI or runs one-shot plan commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use studyplan::cli::{Cli, Command, generate_after_help, get_log_path};
use studyplan::config::Config;
use studyplan::controller::{Controller, clamp_day};
use studyplan::curriculum::{PHASES, Phase, check_coverage, resolve};
use studyplan::export::DirectorySink;
use studyplan::generation::{ContentGenerator, LlmContentGenerator, SessionType, UnavailableGenerator};
use studyplan::llm::create_client;
use studyplan::prompts::PromptLoader;
use studyplan::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Log level first, before the full config load can log anything
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "studyplan loaded config");
    log_coverage();

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan { phase }) => cmd_plan(phase),
        Some(Command::Show { day }) => cmd_show(day),
        Some(Command::Generate { day, output }) => cmd_generate(&config, day, output).await,
        Some(Command::Check) => cmd_check(),
        Some(Command::Phases) => cmd_phases(),
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Note curriculum table problems in the log; `sp check` prints them
fn log_coverage() {
    for issue in check_coverage() {
        if issue.is_structural() {
            warn!(%issue, "curriculum coverage");
        } else {
            debug!(%issue, "curriculum coverage");
        }
    }
}

/// Build the LLM-backed generator from config
fn build_generator(config: &Config) -> Result<LlmContentGenerator> {
    debug!("build_generator: called");
    let client = create_client(&config.llm).context("Failed to create LLM client")?;
    Ok(LlmContentGenerator::new(client, PromptLoader::from_user_config()).with_max_tokens(config.llm.max_tokens))
}

fn phase_header(index: usize, phase: &Phase) -> String {
    format!(
        "{} {}  {}",
        format!("{}.", index + 1).dimmed(),
        phase.name.to_uppercase().bold(),
        format!("DAYS {} — {}", phase.start_day, phase.end_day).dimmed()
    )
}

fn cmd_plan(phase: Option<usize>) -> Result<()> {
    debug!(?phase, "cmd_plan: called");
    let selected: Vec<(usize, &Phase)> = match phase {
        Some(n) => {
            let p = n
                .checked_sub(1)
                .and_then(|i| PHASES.get(i))
                .ok_or_else(|| eyre!("No phase {} (there are {})", n, PHASES.len()))?;
            vec![(n - 1, p)]
        }
        None => PHASES.iter().enumerate().collect(),
    };

    for (idx, (i, p)) in selected.into_iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{}", phase_header(i, p));
        for day in p.days() {
            let slot = resolve(day as i64);
            println!(
                "  {}  {} {}",
                format!("DAY {:<4}", day).bold(),
                format!("{:<26}", slot.subject).blue(),
                slot.topic
            );
        }
    }
    Ok(())
}

fn cmd_show(day: i64) -> Result<()> {
    debug!(%day, "cmd_show: called");
    let day = clamp_day(day);
    let slot = resolve(day as i64);
    println!("{} {}", "Day:".bold(), day);
    println!("{} {}", "Phase:".bold(), slot.phase.name);
    println!("{} {}", "Subject:".bold(), slot.subject.blue());
    println!("{} {}", "Topic:".bold(), slot.topic.yellow());
    println!("{} {}", "Milestone:".bold(), slot.phase.description);
    Ok(())
}

fn cmd_phases() -> Result<()> {
    debug!("cmd_phases: called");
    for (i, p) in PHASES.iter().enumerate() {
        println!("{}", phase_header(i, p));
        println!("   {}", p.description);
        println!("   {}", p.subjects.join(", ").dimmed());
    }
    Ok(())
}

fn cmd_check() -> Result<()> {
    debug!("cmd_check: called");
    let issues = check_coverage();
    if issues.is_empty() {
        println!("{} every day 1-360 maps to exactly one phase and every subject has topics", "✓".green());
        return Ok(());
    }

    for issue in &issues {
        let marker = if issue.is_structural() { "✗".red() } else { "!".yellow() };
        println!("{} {}", marker, issue);
    }

    let structural = issues.iter().filter(|i| i.is_structural()).count();
    if structural > 0 {
        return Err(eyre!("{} structural curriculum issue(s) found", structural));
    }
    Ok(())
}

async fn cmd_generate(config: &Config, day: i64, output: Option<PathBuf>) -> Result<()> {
    debug!(%day, ?output, "cmd_generate: called");
    let generator = build_generator(config)?;
    let mut controller = Controller::new();

    let slot = resolve(clamp_day(day) as i64);
    println!(
        "Generating Day {}: {} ({}) with {}...",
        slot.day,
        slot.topic.yellow(),
        slot.subject,
        generator.label()
    );

    controller.generate(Some(day), &generator).await;

    let state = controller.state();
    if let Some(error) = &state.error {
        return Err(eyre!("Generation failed: {}", error));
    }
    for (i, session) in state.sessions.iter().flatten().enumerate() {
        let kind = match session.session_type {
            SessionType::Theory => session.session_type.as_str().blue(),
            SessionType::Application => session.session_type.as_str().green(),
        };
        println!("  {:02} {} [{}]", i + 1, session.title.bold(), kind);
    }

    let module = controller
        .export()
        .ok_or_else(|| eyre!("The generated module had no sessions"))?;
    let dir = output.unwrap_or_else(|| config.export.expanded_dir());
    let path = module
        .save(&DirectorySink::new(dir))
        .context("Failed to save study module")?;
    println!("{} {}", "Saved".green(), path.display());
    Ok(())
}

async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let (generator, label) = match build_generator(config) {
        Ok(generator) => {
            let label = generator.label();
            let generator: Arc<dyn ContentGenerator> = Arc::new(generator);
            (generator, label)
        }
        Err(e) => {
            warn!(error = %e, "LLM unavailable, plan browsing only");
            let generator: Arc<dyn ContentGenerator> = Arc::new(UnavailableGenerator::new(format!("{:#}", e)));
            (generator, "no LLM configured".to_string())
        }
    };

    let sink = Box::new(DirectorySink::new(config.export.expanded_dir()));
    tui::run(generator, label, sink, Duration::from_millis(config.ui.tick_ms)).await
}
