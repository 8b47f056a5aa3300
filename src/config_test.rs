use super::*;

#[test]
fn new_trims_trailing_slash() {
    let cfg = ApiConfig::new("http://localhost:3000/api/").unwrap();
    assert_eq!(cfg.base_url(), "http://localhost:3000/api");
}

#[test]
fn new_trims_surrounding_whitespace() {
    let cfg = ApiConfig::new("  https://book.example.com  ").unwrap();
    assert_eq!(cfg.base_url(), "https://book.example.com");
}

#[test]
fn new_rejects_relative_url() {
    assert!(matches!(ApiConfig::new("/api"), Err(ConfigError::InvalidBaseUrl(_))));
}

#[test]
fn new_rejects_non_http_scheme() {
    assert!(matches!(ApiConfig::new("ftp://example.com"), Err(ConfigError::InvalidBaseUrl(_))));
}

/// Only test touching `ROOMBOOK_API_BASE_URL`, so no cross-test env races.
#[test]
fn from_env_reads_and_reports_missing_variable() {
    unsafe { std::env::remove_var(BASE_URL_ENV) };
    assert_eq!(
        ApiConfig::from_env(),
        Err(ConfigError::MissingBaseUrl { var: BASE_URL_ENV.to_owned() })
    );

    unsafe { std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:8080/") };
    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url(), "http://127.0.0.1:8080");

    unsafe { std::env::remove_var(BASE_URL_ENV) };
}

#[test]
fn from_build_env_uses_compile_time_value() {
    match option_env!("ROOMBOOK_API_BASE_URL") {
        None => assert_eq!(
            ApiConfig::from_build_env(),
            Err(ConfigError::MissingBaseUrl { var: BASE_URL_ENV.to_owned() })
        ),
        Some(raw) => assert_eq!(ApiConfig::from_build_env(), ApiConfig::new(raw)),
    }
}
