//! `user:password@host` connection specs

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Credentials and host parsed from `user:password@host`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriSpec {
    pub user: String,
    pub password: String,
    pub host: String,
}

impl UriSpec {
    pub fn new(user: impl Into<String>, password: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
        }
    }
}

/// Parse a `user:pass@host` string.
///
/// Exactly one `@` must separate credentials from host, and the credentials
/// must contain exactly one `:`. No escaping or percent-decoding is applied.
pub fn parse_uri_spec(value: &str) -> Result<UriSpec> {
    let Some((user_pass, host)) = split_exactly_once(value, '@') else {
        return Err(Error::InvalidUri {
            value: value.to_string(),
            reason: "",
        });
    };

    let Some((user, password)) = split_exactly_once(user_pass, ':') else {
        return Err(Error::InvalidUri {
            value: value.to_string(),
            reason: "`user:pass` is not conform. ",
        });
    };

    Ok(UriSpec::new(user, password, host))
}

fn split_exactly_once(value: &str, separator: char) -> Option<(&str, &str)> {
    let (left, right) = value.split_once(separator)?;
    if right.contains(separator) {
        return None;
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_password_and_host() {
        let spec = parse_uri_spec("alice:secret@db.local").unwrap();
        assert_eq!(spec, UriSpec::new("alice", "secret", "db.local"));
    }

    #[test]
    fn keeps_empty_segments() {
        let spec = parse_uri_spec(":@").unwrap();
        assert_eq!(spec, UriSpec::new("", "", ""));
    }

    #[test]
    fn host_may_carry_a_port() {
        let spec = parse_uri_spec("root:pw@localhost:5432").unwrap();
        assert_eq!(spec.host, "localhost:5432");
    }

    #[test]
    fn rejects_missing_at() {
        let err = parse_uri_spec("alice:secret").unwrap_err();
        assert!(err.to_string().contains("`user:pass@host`"));
    }

    #[test]
    fn rejects_double_at() {
        assert!(parse_uri_spec("a:b@c@d").is_err());
    }

    #[test]
    fn rejects_credentials_without_exactly_one_colon() {
        let err = parse_uri_spec("alice@db.local").unwrap_err();
        assert!(err.to_string().contains("alice@db.local"));
        assert!(parse_uri_spec("alice:sec:ret@db.local").is_err());
    }
}
