use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("linewatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live machine telemetry dashboard for the terminal")
        .long_about("LINEWATCH polls a machine telemetry backend, normalizes every reading, and shows production, efficiency, error and status figures for the selected devices, shifts and designs.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("snapshot")
                .about("Fetch telemetry once and print the dashboard")
                .args(backend_args())
                .args(filter_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("watch")
                .about("Poll the backend and redraw the dashboard on every refresh")
                .args(backend_args())
                .args(filter_args())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .short('i')
                        .help("Seconds between refreshes: 3, 10, 30, 60 or 300 (overrides config)")
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("no-auto-refresh")
                        .long("no-auto-refresh")
                        .help("Fetch once and wait; do not poll")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration as TOML")
        )
}

fn backend_args() -> Vec<Arg> {
    vec![
        Arg::new("url")
            .long("url")
            .help("Telemetry backend base URL (overrides config)"),
    ]
}

fn filter_args() -> Vec<Arg> {
    vec![
        Arg::new("device")
            .long("device")
            .short('d')
            .help("Only this device (default: all)"),
        Arg::new("shift")
            .long("shift")
            .short('s')
            .help("Only this shift (default: all)"),
        Arg::new("design")
            .long("design")
            .help("Only this design (default: all)"),
        Arg::new("status")
            .long("status")
            .help("Only this status: running, idle, stopped, maintenance (default: all)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_snapshot_filters_parse() {
        let matches = build_cli()
            .try_get_matches_from([
                "linewatch", "snapshot", "--device", "M1", "--status", "Running", "--json",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "snapshot");
        assert_eq!(sub.get_one::<String>("device").unwrap(), "M1");
        assert_eq!(sub.get_one::<String>("status").unwrap(), "Running");
        assert!(sub.get_flag("json"));
        assert!(sub.get_one::<String>("shift").is_none());
    }

    #[test]
    fn test_watch_interval_must_be_numeric() {
        let result =
            build_cli().try_get_matches_from(["linewatch", "watch", "--interval", "fast"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let matches = build_cli()
            .try_get_matches_from(["linewatch", "config", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(["linewatch"]).is_err());
    }
}
