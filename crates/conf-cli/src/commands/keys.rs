//! `confctl keys`: list raw configuration keys

use conf_core::ConfigResolver;

/// Raw keys matching both filters, sorted
pub fn run_keys<'a>(config: &'a ConfigResolver, prefix: Option<&str>, suffix: Option<&str>) -> Vec<&'a str> {
    let mut keys = match (prefix, suffix) {
        (Some(prefix), _) => config.keys_starting_with(prefix),
        (None, Some(suffix)) => config.keys_ending_with(suffix),
        (None, None) => config.raw().keys().map(String::as_str).collect(),
    };
    if let (Some(_), Some(suffix)) = (prefix, suffix) {
        keys.retain(|key| key.ends_with(suffix));
    }
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use conf_test_utils::resolver;
    use serde_json::json;

    #[test]
    fn filters_by_prefix_and_suffix() {
        let config = resolver(json!({
            "APP_DB_HOST": "db",
            "APP_DB_PORT": "5432",
            "APP_API_HOST": "api",
            "OTHER_HOST": "x",
        }));

        assert_eq!(run_keys(&config, None, None).len(), 4);
        assert_eq!(run_keys(&config, Some("APP_DB_"), None), vec!["APP_DB_HOST", "APP_DB_PORT"]);
        assert_eq!(
            run_keys(&config, None, Some("_HOST")),
            vec!["APP_API_HOST", "APP_DB_HOST", "OTHER_HOST"]
        );
        assert_eq!(run_keys(&config, Some("APP_"), Some("_HOST")), vec!["APP_API_HOST", "APP_DB_HOST"]);
    }
}
