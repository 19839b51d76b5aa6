use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = tido::cli::Cli::parse();

    if let Some(filter) = cli.log_filter.clone() {
        init_tracing(filter)?;
    }

    match cli.command.clone() {
        Some(tido::cli::CliCommand::Tui) | None => {
            let config = tido::config::from_cli(&cli)?;
            tido::tui::run(config)?;
        }
        Some(command) => {
            let config = tido::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tido::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}

fn init_tracing(filter: String) -> Result<()> {
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    // Logs go to stderr so the TUI and one-shot output stay clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
