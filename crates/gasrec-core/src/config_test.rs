use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "GASREC_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.backend_url, "http://localhost:8080");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "gasrec/0.1 (fuel-planner)");
    assert_eq!(cfg.geolocation_timeout_secs, 10);
    assert_eq!(cfg.geolocation_max_age_secs, 300);
    assert_eq!(cfg.max_map_zoom, 15);
    assert_eq!(cfg.default_fuel_grade, "87");
}

#[test]
fn build_app_config_strips_trailing_slash_from_backend_url() {
    let mut map = HashMap::new();
    map.insert("GASREC_BACKEND_URL", "https://fuel.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.backend_url, "https://fuel.example.com");
}

#[test]
fn build_app_config_rejects_non_http_backend_url() {
    let mut map = HashMap::new();
    map.insert("GASREC_BACKEND_URL", "ftp://fuel.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GASREC_BACKEND_URL"),
        "expected InvalidEnvVar(GASREC_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("GASREC_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("GASREC_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GASREC_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GASREC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_geolocation_overrides() {
    let mut map = HashMap::new();
    map.insert("GASREC_GEOLOCATION_TIMEOUT_SECS", "3");
    map.insert("GASREC_GEOLOCATION_MAX_AGE_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geolocation_timeout().as_secs(), 3);
    assert_eq!(cfg.geolocation_max_age().as_secs(), 60);
}

#[test]
fn build_app_config_rejects_zoom_above_map_limit() {
    let mut map = HashMap::new();
    map.insert("GASREC_MAX_MAP_ZOOM", "22");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GASREC_MAX_MAP_ZOOM"),
        "expected InvalidEnvVar(GASREC_MAX_MAP_ZOOM), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_fuel_grade() {
    let mut map = HashMap::new();
    map.insert("GASREC_DEFAULT_FUEL_GRADE", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GASREC_DEFAULT_FUEL_GRADE"),
        "expected InvalidEnvVar(GASREC_DEFAULT_FUEL_GRADE), got: {result:?}"
    );
}
