use anyhow::Result;
use clap::Parser;
use hcp_crm::app::App;
use hcp_crm::cli::{Cli, CliContext};
use hcp_crm::styles::{init_theme, resolve_theme};
use hcp_crm::LOG_FILE_NAME;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Leave raw mode first so the panic message is readable
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_panic_hook();

    let log_dir = hcp_crm::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join(LOG_FILE_NAME);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    if cli.execute()? {
        drop(guard);
        return Ok(());
    }

    let ctx = CliContext::load(cli.config.as_deref())?;
    init_theme(resolve_theme(&ctx.config.theme, cli.no_colors));

    // Visible briefly before the alternate screen takes over
    eprintln!("Logs are being written to: {:?}", log_file);

    let mut app = App::new(&ctx.config)?;
    let result = app.run();

    drop(guard);

    result
}
