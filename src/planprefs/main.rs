use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use planprefs::api::PrefsApi;
use planprefs::commands::config::ConfigAction;
use planprefs::commands::{CmdMessage, DisplayPrefs, MessageLevel};
use planprefs::config::CONFIG_KEYS;
use planprefs::error::{PrefsError, Result};
use planprefs::matcher::{MatchMode, Pattern};
use planprefs::model::Preference;
use planprefs::store::fs::FileStore;
use std::path::PathBuf;
use tracing::{debug, Level};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

const HOME_ENV: &str = "PLANPREFS_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dir = resolve_dir(cli.dir.clone())?;
    debug!(dir = %dir.display(), "using preference directory");
    let mut api = PrefsApi::new(FileStore::new(dir.clone()), dir)?;

    match cli.command {
        Some(Commands::Get { key }) => handle_get(&api, &key),
        Some(Commands::Set { key, value, days }) => handle_set(&mut api, &key, &value, days),
        Some(Commands::Delete { key }) => handle_delete(&mut api, &key),
        Some(Commands::List) => handle_list(&api),
        Some(Commands::Layout {
            pixels,
            height,
            scale,
        }) => handle_layout(&mut api, pixels, height, scale),
        Some(Commands::Match { candidates, mode }) => handle_match(&api, &candidates, mode),
        Some(Commands::Patterns) => handle_patterns(&api),
        Some(Commands::Controls { banner }) => handle_controls(&mut api, &banner),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
        Some(Commands::Show) | None => handle_show(&mut api),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "planviewer", "planprefs")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PrefsError::Store("Could not determine a data directory".to_string()))
}

fn handle_get(api: &PrefsApi<FileStore>, key: &str) -> Result<()> {
    let result = api.get_pref(key)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    api: &mut PrefsApi<FileStore>,
    key: &str,
    value: &str,
    days: Option<i64>,
) -> Result<()> {
    let result = api.set_pref(key, value, days)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut PrefsApi<FileStore>, key: &str) -> Result<()> {
    let result = api.delete_pref(key)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &PrefsApi<FileStore>) -> Result<()> {
    let result = api.list_prefs()?;
    print_preferences(&result.preferences);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &mut PrefsApi<FileStore>) -> Result<()> {
    let result = api.display_prefs()?;
    if let Some(display) = &result.display {
        print_display(display);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_layout(api: &mut PrefsApi<FileStore>, pixels: i64, height: i64, scale: i64) -> Result<()> {
    let result = api.save_layout(pixels, height, scale)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_match(
    api: &PrefsApi<FileStore>,
    candidates: &[String],
    mode: Option<MatchMode>,
) -> Result<()> {
    let candidate = |i: usize| candidates.get(i).map(String::as_str).unwrap_or("");
    let is_custom = api.is_custom_node(candidate(0), candidate(1), candidate(2), mode)?;
    println!("{}", is_custom);
    Ok(())
}

fn handle_patterns(api: &PrefsApi<FileStore>) -> Result<()> {
    let result = api.custom_patterns()?;
    print_patterns(&result.patterns);
    print_messages(&result.messages);
    Ok(())
}

fn handle_controls(api: &mut PrefsApi<FileStore>, banner: &str) -> Result<()> {
    if let Some(markup) = api.on_ready(banner) {
        println!("{}", markup);
    }
    Ok(())
}

fn handle_config(
    api: &mut PrefsApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const EXPIRES_WIDTH: usize = 16;

fn print_preferences(prefs: &[Preference]) {
    if prefs.is_empty() {
        println!("No preferences stored.");
        return;
    }

    let name_width = prefs.iter().map(|p| p.name.width()).max().unwrap_or(0);
    for pref in prefs {
        let padding = name_width.saturating_sub(pref.name.width());
        println!(
            "{}{}  {:<30}  {}",
            pref.name.bold(),
            " ".repeat(padding),
            pref.value,
            format_expires_in(pref).dimmed()
        );
    }
}

fn print_display(display: &DisplayPrefs) {
    let on_off = |flag: bool| if flag { "on".green() } else { "off".dimmed() };
    let number = |n: Option<i64>| n.map(|v| v.to_string()).unwrap_or_else(|| "-".into());

    println!("{:<18} {}", "generated nodes", on_off(display.show_generated));
    println!("{:<18} {}", "expanded timeline", on_off(display.show_expanded));
    println!("{:<18} {}", "pixels", number(display.pixels));
    println!("{:<18} {}", "token height", number(display.height));
    println!("{:<18} {}", "scale", number(display.scale));
    println!(
        "{:<18} {}",
        "custom nodes",
        display.custom.as_deref().unwrap_or("-")
    );
}

fn print_patterns(patterns: &[Pattern]) {
    for (i, pattern) in patterns.iter().enumerate() {
        let idx = format!("{}. ", i + 1);
        match pattern {
            Pattern::Literal(literal) => {
                println!("{}{:?} {}", idx.yellow(), literal, "literal".dimmed())
            }
            Pattern::Wildcard(fragments) => {
                let shown: Vec<String> = fragments
                    .iter()
                    .filter(|f| !f.is_empty())
                    .map(|f| format!("{:?}", f))
                    .collect();
                println!(
                    "{}{} {} [{}]",
                    idx.yellow(),
                    pattern,
                    "wildcard".dimmed(),
                    shown.join(", ")
                );
            }
        }
    }
}

fn format_expires_in(pref: &Preference) -> String {
    let remaining = pref.expires_at.signed_duration_since(Utc::now());
    let mut formatter = timeago::Formatter::new();
    formatter.ago("left");
    let text = formatter.convert(remaining.to_std().unwrap_or_default());
    format!("{:>width$}", text, width = EXPIRES_WIDTH)
}
