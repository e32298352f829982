use clap::ArgMatches;

use linewatch_core::config::loading;
use linewatch_core::{FacetValue, FilterSpec, LinewatchConfig};

/// Load the config files, apply the command's flag overrides, then
/// validate the result. Flags can repair a value a file got wrong.
pub fn load_config(matches: &ArgMatches) -> Result<LinewatchConfig, Box<dyn std::error::Error>> {
    let config = loading::load_layers()?;
    let config = apply_overrides(config, matches);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(mut config: LinewatchConfig, matches: &ArgMatches) -> LinewatchConfig {
    if let Some(url) = optional_string(matches, "url") {
        config.backend.url = Some(url);
    }
    if let Some(interval) = optional_u64(matches, "interval") {
        config.refresh.interval_secs = Some(interval);
    }
    if optional_flag(matches, "no-auto-refresh") {
        config.refresh.auto_refresh = Some(false);
    }
    config
}

/// Facet selection from `--device`, `--shift`, `--design` and `--status`.
pub fn filter_from_matches(matches: &ArgMatches) -> FilterSpec {
    let facet = |name: &str| -> FacetValue<String> {
        optional_string(matches, name).map_or(FacetValue::All, |v| FacetValue::parse(&v))
    };

    FilterSpec::default()
        .with_device(facet("device"))
        .with_shift(facet("shift"))
        .with_design(facet("design"))
        .with_status(
            optional_string(matches, "status")
                .map_or(FacetValue::All, |v| FacetValue::parse_status(&v)),
        )
}

// The same helpers serve subcommands that do not define every argument.
fn optional_string(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.try_get_one::<String>(name).ok().flatten().cloned()
}

fn optional_u64(matches: &ArgMatches, name: &str) -> Option<u64> {
    matches.try_get_one::<u64>(name).ok().flatten().copied()
}

fn optional_flag(matches: &ArgMatches, name: &str) -> bool {
    matches.try_get_one::<bool>(name).ok().flatten().copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;
    use linewatch_core::StatusTag;

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        matches.subcommand().unwrap().1.clone()
    }

    #[test]
    fn test_filter_defaults_to_all() {
        let matches = sub_matches(&["linewatch", "snapshot"]);
        assert_eq!(filter_from_matches(&matches), FilterSpec::default());
    }

    #[test]
    fn test_filter_flags() {
        let matches = sub_matches(&[
            "linewatch", "snapshot", "--device", "M1", "--shift", "all", "--status", " Idle ",
        ]);
        let spec = filter_from_matches(&matches);

        assert_eq!(spec.device, FacetValue::Only("M1".to_string()));
        assert_eq!(spec.shift, FacetValue::All);
        assert_eq!(spec.design, FacetValue::All);
        assert_eq!(spec.status, FacetValue::Only(StatusTag::Idle));
    }

    #[test]
    fn test_value_named_all_in_other_casing_is_selectable() {
        let matches = sub_matches(&["linewatch", "snapshot", "--design", "All"]);
        let spec = filter_from_matches(&matches);
        assert_eq!(spec.design, FacetValue::Only("All".to_string()));
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let matches = sub_matches(&[
            "linewatch", "watch", "--url", "http://plant-7", "--interval", "30",
            "--no-auto-refresh",
        ]);
        let config = apply_overrides(LinewatchConfig::default(), &matches);

        assert_eq!(config.backend.url(), "http://plant-7");
        assert_eq!(config.refresh.interval_secs(), 30);
        assert!(!config.refresh.auto_refresh());
    }

    #[test]
    fn test_overrides_ignore_missing_arguments() {
        let matches = sub_matches(&["linewatch", "config"]);
        let config = apply_overrides(LinewatchConfig::default(), &matches);
        assert_eq!(config, LinewatchConfig::default());
    }
}
