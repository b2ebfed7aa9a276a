use anyhow::Result;
use std::io;
use teamdeck::app::App;
use teamdeck::cli::{self, RunMode};
use teamdeck::script::ReplayScript;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level takes precedence, then RUST_LOG, then config (applied in App::new)
    teamdeck::debug::init_log_bridge(options.log_level);

    log::info!("Starting teamdeck {}", teamdeck::VERSION);

    let mut app = App::new(&options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &options.mode {
        RunMode::Replay { script, json } => {
            let script = ReplayScript::load_from(script)?;
            app.run_script(&script, *json, &mut out)
        }
        RunMode::Interactive => app.run_interactive(io::stdin().lock(), &mut out),
    };

    // Save the session even when the run itself failed
    let shutdown = app.shutdown();
    if let Err(e) = result.and(shutdown) {
        teamdeck::debug_error!("APP", "Session run failed: {:#}", e);
        eprintln!("teamdeck: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
