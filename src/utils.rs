use std::str::FromStr;
use url::Url;

/// Read an env var as bool ("1" or "true" = true), falling back to `default`
/// when unset.
pub fn get_env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

/// Read an env var or return `default`.
pub fn get_env_with_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse an env var; unset or unparsable values give `default`.
pub fn get_env_parsed<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring invalid value {:?} for {}", raw, name);
                default
            }
        },
        Err(_) => default,
    }
}

/// Extract the domain (host) from a URL.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://www.amazon.fr/dp/B0C").as_deref(),
            Some("www.amazon.fr")
        );
        assert_eq!(get_domain("not a url"), None);
    }

    #[test]
    fn test_env_helpers_fall_back() {
        // names no test environment sets
        assert!(get_env_bool("PRODUCT_SCOUT_TEST_UNSET_BOOL", true));
        assert_eq!(
            get_env_with_default("PRODUCT_SCOUT_TEST_UNSET_STR", "fallback"),
            "fallback"
        );
        assert_eq!(get_env_parsed("PRODUCT_SCOUT_TEST_UNSET_NUM", 12usize), 12);
    }
}
