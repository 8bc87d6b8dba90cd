mod app;
mod config;
mod controller;
mod effects;
mod logging;
mod persistence;
mod ui;

pub fn run() -> anyhow::Result<()> {
    let path = config::config_path();
    let config = config::load_config(&path)?;
    logging::initialize(&config);
    app::run_app(&config)
}
