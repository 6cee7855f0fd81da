use super::*;

/// # Safety
/// Only `from_env_precedence` touches these variables, so no other test races it.
unsafe fn clear_api_env() {
    unsafe {
        std::env::remove_var("NYAYASETU_API_BASE_URL");
        std::env::remove_var("VITE_API_BASE_URL");
        std::env::remove_var("NYAYASETU_LOGIN_URL");
    }
}

#[test]
fn new_applies_fixed_defaults() {
    let cfg = ApiConfig::new("https://api.example.test/v1");
    assert_eq!(cfg.base_url, "https://api.example.test/v1");
    assert_eq!(cfg.timeout, Duration::from_secs(30));
    assert_eq!(cfg.login_url, "/auth/login");
    assert_eq!(
        cfg.default_headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ApiConfig::new("  https://api.example.test/v1//  ");
    assert_eq!(cfg.base_url, "https://api.example.test/v1");
}

#[test]
fn default_points_at_local_placeholder() {
    assert_eq!(ApiConfig::default().base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn url_joins_with_single_slash() {
    let cfg = ApiConfig::new("http://localhost:3000/api/");
    assert_eq!(cfg.url("/complaints"), "http://localhost:3000/api/complaints");
    assert_eq!(cfg.url("complaints/stats"), "http://localhost:3000/api/complaints/stats");
}

#[test]
fn from_env_precedence() {
    unsafe { clear_api_env() };
    let cfg = ApiConfig::from_env();
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.login_url, DEFAULT_LOGIN_URL);

    unsafe { std::env::set_var("VITE_API_BASE_URL", "https://vite.example.test/api/") };
    assert_eq!(ApiConfig::from_env().base_url, "https://vite.example.test/api");

    unsafe {
        std::env::set_var("NYAYASETU_API_BASE_URL", "https://primary.example.test/api");
        std::env::set_var("NYAYASETU_LOGIN_URL", "/signin");
    }
    let cfg = ApiConfig::from_env();
    assert_eq!(cfg.base_url, "https://primary.example.test/api");
    assert_eq!(cfg.login_url, "/signin");

    unsafe { std::env::set_var("NYAYASETU_API_BASE_URL", "   ") };
    assert_eq!(ApiConfig::from_env().base_url, "https://vite.example.test/api");

    unsafe { clear_api_env() };
}
