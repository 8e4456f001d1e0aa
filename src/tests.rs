// Slot store tests
#[path = "services/slots_test.rs"]
mod slots_tests;

// Tool dispatch tests
#[path = "services/tools_test.rs"]
mod tools_tests;

// Chat loop tests
#[path = "services/orchestrator_test.rs"]
mod orchestrator_tests;

// Booking form store tests
#[path = "services/database_test.rs"]
mod database_tests;

// Gemini client and wire format tests
#[path = "client_test.rs"]
mod client_tests;

// Route tests
#[path = "handlers/api_test.rs"]
mod api_tests;

#[cfg(test)]
mod config_tests {
    use std::collections::HashMap;

    use crate::config::{AppConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
    use crate::error::ConfigError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "key")])).unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.max_tool_rounds, 10);
        assert_eq!(config.model_timeout_secs, 20);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.requests_csv, "meeting_requests.csv");
    }

    #[test]
    fn test_api_key_fallback() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn test_missing_api_key() {
        let result = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Missing("GEMINI_API_KEY".to_string())
        );
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_API_ENDPOINT", "http://localhost:9000/"),
            ("PORT", "8080"),
            ("MAX_TOOL_ROUNDS", "4"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_tool_rounds, 4);

        let result = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "key"), ("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::Invalid { ref key, .. }) if key == "PORT"));
    }
}
