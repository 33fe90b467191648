//! Integration tests for configuration

use gbm_forecast::config::{Config, OutputFormat, ProviderKind};

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.provider.kind, ProviderKind::Yahoo);
    assert_eq!(config.simulation.time_steps, 252);
    assert_eq!(config.simulation.trials, 1000);
    assert_eq!(config.output.format, OutputFormat::Table);
    assert!(config.output.chart_path.is_none());
}
