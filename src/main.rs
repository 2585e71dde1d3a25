use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use grammarfix::cli::{Cli, Commands, CorrectArgs};
use grammarfix::config::Config;
use grammarfix::feature::GrammarFixFeature;
use grammarfix::output::{PanelState, render_diff, render_panel};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Read};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    grammarfix::telemetry::init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            if !handle_correct(config, cli.correct, cli.quiet).await? {
                std::process::exit(1);
            }
        }
        Some(Commands::Correct(args)) => {
            let config = load_config(cli.config.as_deref())?;
            if !handle_correct(config, args, cli.quiet).await? {
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            handle_check(&config);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "grammarfix",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    // Environment first, then the key baked in at build time
    Ok(config.with_env_overrides().with_build_key())
}

/// Run one correction through the feature and print the outcome.
///
/// Returns whether the correction succeeded.
async fn handle_correct(mut config: Config, args: CorrectArgs, quiet: bool) -> Result<bool> {
    if let Some(timeout_ms) = args.timeout {
        config.correction.read_timeout_ms = timeout_ms;
    }

    let input = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let target = match args.select {
        Some(range) => match range.slice(&input) {
            Some(selected) => selected.to_string(),
            None => {
                tracing::warn!(%range, "Selection is not valid for the input, correcting all text");
                input.clone()
            }
        },
        None => input.clone(),
    };

    let feature = GrammarFixFeature::new(&config.correction);
    let mut updates = feature.subscribe();
    feature.spawn_correction(target.clone());

    let show_progress = !quiet && std::io::stderr().is_terminal();
    if show_progress {
        eprint!("{}", render_panel(&PanelState::Loading).dimmed());
    }

    let state = updates
        .wait_for(Option::is_some)
        .await
        .context("Correction session ended before a result was published")?
        .clone();
    feature.close();

    if show_progress {
        eprint!("\r\x1b[2K");
    }

    let Some(result) = state else {
        anyhow::bail!("No correction result was published");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result.is_success());
    }

    match PanelState::from_result(&result) {
        PanelState::Ready { corrected } => {
            if args.diff && !quiet {
                eprintln!(
                    "{}",
                    render_diff(&target, corrected, std::io::stderr().is_terminal())
                );
            }
            let output = match args.select {
                Some(range) => range.replace_in(&input, corrected),
                None => corrected.to_string(),
            };
            println!("{}", output);
            Ok(true)
        }
        PanelState::Failed { message } => {
            eprintln!("{} {}", "Correction failed:".red().bold(), message);
            Ok(false)
        }
        PanelState::Loading => Ok(false),
    }
}

/// Print availability and effective settings.
fn handle_check(config: &Config) {
    let feature = GrammarFixFeature::new(&config.correction);
    let settings = &config.correction;

    if feature.is_available() {
        println!("{} grammar fix available", "✓".green());
    } else {
        println!("{} grammar fix unavailable", "✗".red());
        println!("  {}", grammarfix::defaults::UNAVAILABLE_MESSAGE);
    }

    println!();
    println!("Settings:");
    println!(
        "  api_key:         {}",
        if settings.api_key().is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("  endpoint:        {}", settings.endpoint);
    println!("  model:           {}", settings.model);
    println!("  temperature:     {}", settings.temperature);
    println!("  max_tokens:      {}", settings.max_tokens);
    println!("  connect_timeout: {}ms", settings.connect_timeout_ms);
    println!("  read_timeout:    {}ms", settings.read_timeout_ms);
    println!("  version:         {}", grammarfix::version_string());
}

/// Read text from stdin, dropping the single trailing newline a pipe adds.
fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No text given. Pass TEXT or pipe text on stdin.");
    }

    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}
