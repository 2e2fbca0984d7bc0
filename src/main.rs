use anyhow::Context;
use clap::Parser;
use flightsim::cli::Cli;
use flightsim::config::ApplicationConfig;
use flightsim::logging::setup_logging;
use flightsim::registry::AircraftRegistry;
use flightsim::render::terminal::TerminalRenderer;
use flightsim::scheduler::Scheduler;
use flightsim::simulation::Simulation;
use log::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.logging_level);

    let mut application_config = match &cli.config_file {
        Some(path) => ApplicationConfig::construct_from_path(path)?,
        None => ApplicationConfig::default(),
    };
    if let Some(tick_interval_ms) = cli.tick_interval_ms {
        application_config.simulation.tick_interval_ms = tick_interval_ms;
    }
    anyhow::ensure!(
        application_config.simulation.tick_interval_ms > 0,
        "Tick interval must be greater than zero"
    );

    let registry = AircraftRegistry::initialize(application_config.seed_records()?)?;
    info!("Main: Application started with {} aircraft.", registry.len());

    if cli.gui {
        return run_gui(registry, &application_config);
    }

    let simulation = Simulation::new(registry, TerminalRenderer::new(), &application_config.map)
        .context("Failed to set up the map")?;

    let mut scheduler = Scheduler::new();
    let simulation_task_id =
        scheduler.add_task(simulation, application_config.simulation.tick_interval())?;

    if let Some(duration) = cli.duration {
        std::thread::sleep(std::time::Duration::from_secs(duration));
        scheduler.stop_all_tasks();
    }

    scheduler.wait_on_task_finish(simulation_task_id);

    info!("Main: Program finished.");
    Ok(())
}

#[cfg(feature = "gui")]
fn run_gui(registry: AircraftRegistry, config: &ApplicationConfig) -> anyhow::Result<()> {
    flightsim::gui::run(registry, config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_registry: AircraftRegistry, _config: &ApplicationConfig) -> anyhow::Result<()> {
    anyhow::bail!("--gui requires building with `--features gui`")
}
