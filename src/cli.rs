use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Stop after this many seconds (headless mode only).
    #[arg(long)]
    pub duration: Option<u64>,

    /// Open the map window instead of logging to the terminal.
    #[arg(long, default_value_t = false)]
    pub gui: bool,

    #[arg(short, long, default_value_t = log::LevelFilter::Info)]
    pub logging_level: log::LevelFilter,

    /// TOML file with map, simulation and aircraft settings. Built-in demo values otherwise.
    #[arg(long)]
    pub config_file: Option<std::path::PathBuf>,

    /// Overrides `simulation.tick_interval_ms` from the config.
    #[arg(long)]
    pub tick_interval_ms: Option<u64>,
}
