use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_uses_defaults() {
    let cfg = ClientConfig::from_vars(None, vars(&[])).unwrap();
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.api_base(), "http://127.0.0.1:8001/api");
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn from_vars_parses_overrides() {
    let cfg = ClientConfig::from_vars(None, vars(&[
        ("GOLDSHOP_BACKEND_URL", "https://shop.example.test/"),
        ("GOLDSHOP_REQUEST_TIMEOUT_SECS", "42"),
        ("GOLDSHOP_CONNECT_TIMEOUT_SECS", " 7 "),
    ]))
    .unwrap();
    assert_eq!(cfg.backend_url, "https://shop.example.test");
    assert_eq!(cfg.api_base(), "https://shop.example.test/api");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn from_vars_ignores_unparseable_timeouts() {
    let cfg = ClientConfig::from_vars(None, vars(&[("GOLDSHOP_REQUEST_TIMEOUT_SECS", "soon")])).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn from_vars_treats_zero_timeouts_as_unset() {
    let cfg = ClientConfig::from_vars(
        None,
        vars(&[("GOLDSHOP_REQUEST_TIMEOUT_SECS", "0"), ("GOLDSHOP_CONNECT_TIMEOUT_SECS", " 0 ")]),
    )
    .unwrap();
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn explicit_backend_url_skips_bad_env_value() {
    let env = vars(&[("GOLDSHOP_BACKEND_URL", "not a url"), ("GOLDSHOP_REQUEST_TIMEOUT_SECS", "12")]);
    let cfg = ClientConfig::from_vars(Some("http://flag.test/"), env).unwrap();
    assert_eq!(cfg.backend_url, "http://flag.test");
    assert_eq!(cfg.timeouts.request_secs, 12);
}

#[test]
fn bad_env_backend_url_fails_without_override() {
    let err = ClientConfig::from_vars(None, vars(&[("GOLDSHOP_BACKEND_URL", "not a url")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBackendUrl { .. }));
}

#[test]
fn new_rejects_relative_url() {
    let err = ClientConfig::new("shop.local:8001").unwrap_err().to_string();
    assert!(err.contains("invalid backend URL"), "{err}");
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = ClientConfig::new("ftp://shop.local").unwrap_err().to_string();
    assert!(err.contains("unsupported scheme 'ftp'"), "{err}");
}

#[test]
fn with_backend_url_keeps_timeouts() {
    let timeouts = Timeouts { request_secs: 5, connect_secs: 1 };
    let cfg = ClientConfig::new("http://a.test")
        .unwrap()
        .with_timeouts(timeouts)
        .with_backend_url("http://b.test//")
        .unwrap();
    assert_eq!(cfg.backend_url, "http://b.test");
    assert_eq!(cfg.timeouts, timeouts);
}
