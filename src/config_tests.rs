#![cfg(test)]

use super::config::*;

#[test]
fn test_default_config_validates() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.web.port, 8089);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    config.refresh_interval_minutes = 0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.entsoe.in_domain = String::new();
    assert!(config.validate().is_err());

    config = Config::default();
    config.timezone = "Mars/Olympus_Mons".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.entsoe.base_url = "ftp://example.org".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.entsoe.in_domain, deserialized.entsoe.in_domain);
    assert_eq!(
        config.refresh_interval_minutes,
        deserialized.refresh_interval_minutes
    );
}
