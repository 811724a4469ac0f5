use std::sync::Arc;

use warsim_app::game_loop::spawn_tick_loop;
use warsim_app::settings::Settings;
use warsim_core::events::TracingSink;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> std::io::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();
    tracing::info!(?settings, "starting warsim");

    let engine = warsim_app::build_engine(&settings, Arc::new(TracingSink));
    let store = Arc::clone(engine.store());
    let handle = spawn_tick_loop(engine, settings.tick_interval)?;

    match settings.run_for {
        Some(duration) => std::thread::sleep(duration),
        None => loop {
            std::thread::park();
        },
    }

    let report = handle.stop();
    let final_state = store.get_snapshot();
    let alive = final_state.units.iter().filter(|u| !u.is_destroyed()).count();
    tracing::info!(
        ticks = report.ticks,
        overruns = report.overruns,
        units_alive = alive,
        projectiles = final_state.projectiles.len(),
        "simulation finished"
    );
    Ok(())
}
