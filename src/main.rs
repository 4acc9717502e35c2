//! Binary entry point: parse configuration, open the SQLite-backed store, run
//! the Ratatui event loop, and release the store once the user exits.
use anyhow::Context;
use clap::Parser;
use record_keeper::logging::init_logging;
use record_keeper::{run_app, App, Config, SqliteRecordStore};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let logging = config
        .log_path()
        .and_then(|log_path| init_logging(&config.log_level, &log_path));
    if let Err(err) = logging {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let db_path = config.db_path()?;
    let store = SqliteRecordStore::open(&db_path)
        .with_context(|| format!("failed to open record store at {}", db_path.display()))?;

    let mut app = App::new(store)?;
    let result = run_app(&mut app);
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "terminal UI exited with an error");
    }

    app.into_store().close()?;
    result
}
