mod bootstrap;

use anyhow::{Context, Result};
use pile_core::settings::Settings;
use pile_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let log_path = settings
        .log_file
        .clone()
        .unwrap_or_else(|| bootstrap::default_log_path(&app_dir));
    bootstrap::setup_logging(&settings.log_level, &log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let export_dir = settings.resolved_export_dir(&cwd);

    tracing::info!("Solar Pile Monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, export dir: {}",
        settings.theme,
        export_dir.display()
    );

    let app = App::new(&settings.theme, export_dir);
    let session = app.run()?;

    let summary = session.dataset().summary();
    tracing::info!(
        "Session ended: {} piles recorded, {} out of tolerance",
        summary.total,
        summary.out_of_tolerance
    );

    Ok(())
}
