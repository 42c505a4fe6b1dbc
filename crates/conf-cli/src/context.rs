//! Building a resolver from command-line source flags

use conf_core::ConfigResolver;
use conf_reader::{ConfigSource, SourceReader};

use crate::cli::SourceArgs;
use crate::error::Result;

/// Sources named by the flags, files first, then environment
pub fn sources(args: &SourceArgs) -> Vec<ConfigSource> {
    let mut sources: Vec<ConfigSource> = args.files.iter().map(ConfigSource::file).collect();

    if let Some(prefix) = &args.env_prefix {
        sources.push(ConfigSource::env_prefixed(prefix.as_str()));
    } else if args.env {
        sources.push(ConfigSource::env());
    }
    sources
}

/// Read the configured sources.
///
/// An empty resolver is returned when no configuration is found, so lookups
/// fail with missing-key errors rather than a separate "no config" error.
pub fn load_resolver(args: &SourceArgs) -> Result<ConfigResolver> {
    let mut reader = SourceReader::new();
    if args.skip_missing {
        reader = reader.skip_missing_files();
    }

    let sources = sources(args);
    tracing::debug!(count = sources.len(), "Reading configuration sources");

    let resolver = ConfigResolver::from_sources(&reader, &sources)?;
    Ok(resolver.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn files_come_before_environment() {
        let args = SourceArgs {
            files: vec![PathBuf::from("a.yaml"), PathBuf::from("b.json")],
            env: false,
            env_prefix: Some("APP_".to_string()),
            skip_missing: false,
        };

        assert_eq!(
            sources(&args),
            vec![
                ConfigSource::file("a.yaml"),
                ConfigSource::file("b.json"),
                ConfigSource::env_prefixed("APP_"),
            ]
        );
    }

    #[test]
    fn no_flags_means_no_sources() {
        assert!(sources(&SourceArgs::default()).is_empty());
    }

    #[test]
    fn no_configuration_yields_an_empty_resolver() {
        let resolver = load_resolver(&SourceArgs::default()).unwrap();
        assert!(resolver.raw().is_empty());
    }
}
