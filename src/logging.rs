use std::io::Write;

const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Installs the global logger on stdout.
///
/// `level` is the baseline; `RUST_LOG` directives override it per module.
pub fn setup_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let prefix = log_prefix(
                record.level(),
                record.target(),
                &chrono::Local::now().naive_local(),
            );
            writeln!(buf, "{prefix} {0}", record.args())
        })
        .target(env_logger::Target::Stdout)
        .init();
}

// "12:00:03.250 INFO  simulation:" with the crate name dropped from the target.
fn log_prefix(level: log::Level, target: &str, now: &chrono::NaiveDateTime) -> String {
    let module = target
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(target);
    format!("{0} {level:<5} {module}:", now.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::log_prefix;

    fn noon_plus(millis: u32) -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_milli_opt(12, 0, 3, millis)
            .unwrap()
    }

    #[test]
    fn when_target_is_inside_crate_then_crate_name_is_dropped() {
        let prefix = log_prefix(log::Level::Info, "flightsim::simulation", &noon_plus(250));

        assert_eq!(prefix, "12:00:03.250 INFO  simulation:");
    }

    #[test]
    fn when_target_is_external_then_it_is_kept_whole() {
        let prefix = log_prefix(log::Level::Warn, "walkers::tiles", &noon_plus(0));

        assert_eq!(prefix, "12:00:03.000 WARN  walkers::tiles:");
    }
}
