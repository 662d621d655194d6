use super::*;

impl Default for EntsoeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            in_domain: "10YNL----------L".to_string(),
            base_url: "https://web-api.tp.entsoe.eu/api".to_string(),
            document_type: "A44".to_string(),
            window_hours: 48,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/epex-monitor.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            name: "EPEX Price Monitor".to_string(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8089,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entsoe: EntsoeConfig::default(),
            refresh_interval_minutes: 15,
            timezone: "Europe/Amsterdam".to_string(),
            logging: LoggingConfig::default(),
            sensor: SensorConfig::default(),
            web: WebConfig::default(),
        }
    }
}
