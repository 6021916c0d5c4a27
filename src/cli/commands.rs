use crate::cli::common::{print_info, print_warning, CliContext};
use crate::keymap::Keymap;
use crate::store::{DashboardStats, Interaction};
use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

/// A terminal CRM for logging interactions with healthcare professionals
#[derive(Parser, Debug)]
#[command(name = "hcp-crm", version, about, long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List logged interactions, newest first
    List {
        /// Show at most this many interactions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Only interactions matching this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show dashboard numbers
    Stats,
    /// Shows logs location and how to view them
    Logs,
    /// Configuration file location
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (detected from $SHELL if omitted)
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Execute a subcommand. Returns `false` when there is none and the TUI should start.
    pub fn execute(&self) -> Result<bool> {
        let Some(ref command) = self.command else {
            return Ok(false);
        };
        info!("Running command: {:?}", command);

        match command {
            Commands::List { limit, search } => self.cmd_list(*limit, search.as_deref())?,
            Commands::Stats => self.cmd_stats()?,
            Commands::Logs => Self::cmd_logs(),
            Commands::Config => self.cmd_config()?,
            Commands::Completions { shell } => super::completions::generate(*shell)?,
        }
        Ok(true)
    }

    fn context(&self) -> Result<CliContext> {
        CliContext::load(self.config.as_deref())
    }

    fn cmd_list(&self, limit: Option<usize>, search: Option<&str>) -> Result<()> {
        let store = self.context()?.store()?;
        let rows = store.search(search.unwrap_or(""));
        if rows.is_empty() {
            print_info("No interactions found");
            return Ok(());
        }

        let shown = limit.unwrap_or(rows.len()).min(rows.len());
        for interaction in rows.iter().take(shown) {
            println!("{}", format_row(interaction));
        }
        if shown < rows.len() {
            println!("... {} more", rows.len() - shown);
        }
        Ok(())
    }

    fn cmd_stats(&self) -> Result<()> {
        let store = self.context()?.store()?;
        print!("{}", format_stats(&store.stats(Local::now().date_naive())));
        Ok(())
    }

    fn cmd_logs() {
        let log_file = crate::utils::get_log_dir().join(crate::LOG_FILE_NAME);
        println!("Logs are written to: {}", log_file.display());
        println!("View logs in real-time: tail -f {}", log_file.display());
        println!("More detail: RUST_LOG=debug hcp-crm");
    }

    fn cmd_config(&self) -> Result<()> {
        let ctx = self.context()?;
        println!("Config file: {}", ctx.config_path.display());
        println!(
            "Data file:   {}",
            crate::utils::format_path_for_display(&ctx.config.data_file)
        );
        match ctx.config.api_base_url() {
            Some(url) => println!("Backend:     {}", url),
            None => print_warning("Chat logging backend is disabled"),
        }
        println!();
        print!("{}", format_bindings(&ctx.config.keymap));
        Ok(())
    }
}

/// Effective key bindings, overrides first
pub fn format_bindings(keymap: &Keymap) -> String {
    let mut out = format!("Key bindings ({} preset):\n", keymap.preset.name());
    for binding in keymap.all_bindings() {
        out.push_str(&format!(
            "  {:<12}{}\n",
            binding.display(),
            binding.action.description()
        ));
    }
    out
}

/// One interaction as a single output line
pub fn format_row(interaction: &Interaction) -> String {
    let mut row = format!(
        "#{:<4} {}  {:<24} {:<10} {:<8}",
        interaction.id,
        interaction.date.format("%Y-%m-%d"),
        interaction.hcp_name,
        interaction.interaction_type.label(),
        interaction.sentiment.label()
    );
    if let Some(ref follow_up) = interaction.follow_up {
        let mark = if interaction.follow_up_done {
            "\u{2713}"
        } else {
            "\u{2691}"
        };
        row.push_str(&format!(" {} {}", mark, follow_up));
    }
    row.trim_end().to_string()
}

/// Dashboard numbers as plain text
pub fn format_stats(stats: &DashboardStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total interactions:  {}\n", stats.total));
    out.push_str(&format!("Last 7 days:         {}\n", stats.this_week));
    out.push_str(&format!("Pending follow-ups:  {}\n", stats.pending_follow_ups));
    out.push_str(&format!(
        "Positive sentiment:  {}\n",
        stats
            .positive_percent()
            .map_or_else(|| "-".to_string(), |p| format!("{}%", p))
    ));
    out.push_str("\nBy type:\n");
    for (kind, count) in &stats.by_type {
        out.push_str(&format!("  {:<12}{}\n", kind.label(), count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InteractionSource, InteractionType, Sentiment};
    use chrono::{NaiveDate, Utc};
    use clap::CommandFactory;

    fn interaction() -> Interaction {
        Interaction {
            id: 7,
            hcp_name: "Dr. Sarah Johnson".to_string(),
            interaction_type: InteractionType::Call,
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            attendees: Vec::new(),
            topics: String::new(),
            sentiment: Sentiment::Positive,
            outcomes: String::new(),
            follow_up: Some("Send samples".to_string()),
            follow_up_done: false,
            source: InteractionSource::Form,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["hcp-crm", "list", "-n", "5", "--no-colors"]);
        assert!(cli.no_colors);
        assert!(matches!(
            cli.command,
            Some(Commands::List { limit: Some(5), search: None })
        ));

        let cli = Cli::parse_from(["hcp-crm", "--config", "/tmp/c.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_format_row() {
        let row = format_row(&interaction());
        assert!(row.starts_with("#7"));
        assert!(row.contains("2026-05-01"));
        assert!(row.contains("Dr. Sarah Johnson"));
        assert!(row.ends_with("\u{2691} Send samples"));
    }

    #[test]
    fn test_format_stats() {
        let one = interaction();
        let stats = DashboardStats::compute(&[&one], NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        let out = format_stats(&stats);
        assert!(out.contains("Total interactions:  1"));
        assert!(out.contains("Pending follow-ups:  1"));
        assert!(out.contains("Positive sentiment:  100%"));
        assert!(out.contains("Call        1"));
    }

    #[test]
    fn test_format_bindings() {
        let keymap = Keymap {
            preset: crate::keymap::KeymapPreset::Standard,
            overrides: vec![crate::keymap::KeyBinding::new("x", crate::keymap::Action::Quit)],
        };
        let out = format_bindings(&keymap);
        assert!(out.starts_with("Key bindings (Standard preset):"));
        // The override is listed first and replaces the preset quit key
        assert_eq!(out.lines().nth(1), Some("  X           Quit"));
        assert!(out.contains("Ctrl+S      Save"));
    }
}
