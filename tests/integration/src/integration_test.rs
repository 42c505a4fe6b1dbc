//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: source reading -> typed
//! resolution -> export -> a build driven by the resolved configuration.

use std::cell::Cell;

use conf_build::{BuildOutcome, NotebookPulse, NotebookState, ProjectStore, watch_build};
use conf_core::{ConfigResolver, ExportOptions, Lookup, UriSpec};
use conf_reader::{ConfigSource, SourceReader, read_configs};
use conf_test_utils::ConfigDir;
use serde_json::json;

/// Set up a config directory with a base file and a local override
fn setup_config() -> ConfigDir {
    let dir = ConfigDir::new();
    dir.write(
        "polyaxon.yaml",
        r#"
POLYAXON_WORKERS: "2"
POLYAXON_DB_URI: "polyaxon:s3cret@postgres:5432"
POLYAXON_QUEUES: '["build", "notebook"]'
POLYAXON_K8S:
  namespace: polyaxon
  node_selector: {}
POLYAXON_BUILD_CHECK_INTERVAL: 2
"#,
    );
    dir.write(
        "polyaxon.local.toml",
        r#"
POLYAXON_WORKERS = 8

[POLYAXON_K8S]
namespace = "polyaxon-dev"
"#,
    );
    dir
}

fn sources(dir: &ConfigDir) -> Vec<ConfigSource> {
    vec![
        ConfigSource::file(dir.path().join("polyaxon.yaml")),
        ConfigSource::file(dir.path().join("polyaxon.local.toml")),
        ConfigSource::env_prefixed("POLYAXON_IT_"),
    ]
}

#[test]
fn test_full_resolution_flow() {
    let dir = setup_config();

    temp_env::with_var("POLYAXON_IT_DEBUG", Some("on"), || {
        let mut config = read_configs(&sources(&dir)).unwrap().expect("configuration present");

        // Local override wins for scalars, nested mappings are merged
        assert_eq!(config.get_int("POLYAXON_WORKERS", Lookup::new()).unwrap(), Some(8));
        let k8s = config.get_dict("POLYAXON_K8S", Lookup::new()).unwrap().unwrap();
        assert_eq!(k8s["namespace"], json!("polyaxon-dev"));
        assert!(k8s.contains_key("node_selector"));

        // Strings from files and the environment go through the same getters
        assert_eq!(config.get_boolean("POLYAXON_IT_DEBUG", Lookup::new()).unwrap(), Some(true));
        assert_eq!(
            config.get_string_list("POLYAXON_QUEUES", Lookup::new()).unwrap(),
            Some(vec!["build".to_string(), "notebook".to_string()])
        );
        assert_eq!(
            config.get_uri("POLYAXON_DB_URI", Lookup::new().secret()).unwrap(),
            Some(UriSpec::new("polyaxon", "s3cret", "postgres:5432"))
        );

        // The secret is consulted but not exported by default
        let exported = config.get_requested_params(ExportOptions::new().as_strings());
        assert_eq!(exported["POLYAXON_WORKERS"], json!("8"));
        assert!(!exported.contains_key("POLYAXON_DB_URI"));
        assert!(!exported.contains_key("POLYAXON_BUILD_CHECK_INTERVAL"));
    });
}

struct VanishingProject {
    checks_left: Cell<u32>,
}

impl ProjectStore for VanishingProject {
    fn notebook_state(&self, _project_id: u64) -> Option<NotebookState> {
        let left = self.checks_left.get();
        if left == 0 {
            return None;
        }
        self.checks_left.set(left - 1);
        Some(NotebookState {
            has_notebook: true,
            notebook: Some("notebook".to_string()),
        })
    }
}

#[test]
fn test_build_uses_configured_check_interval() {
    let dir = setup_config();
    let mut config = ConfigResolver::from_sources(&SourceReader::new(), &sources(&dir))
        .unwrap()
        .unwrap();

    let store = VanishingProject {
        checks_left: Cell::new(1),
    };
    let pulse = NotebookPulse::from_config(&mut config, &store, 1, "quick-start").unwrap();
    assert_eq!(pulse.check_interval(), 2);

    // First check (event 3) passes, second check (event 6) finds the project gone
    let outcome = watch_build(0..100, &pulse, |_| {});
    assert_eq!(outcome, BuildOutcome::Aborted { events: 6 });
}

#[test]
fn test_no_sources_means_no_configuration() {
    let dir = ConfigDir::new();
    let sources = [ConfigSource::file(dir.path().join("absent.yaml"))];

    let resolver = ConfigResolver::from_sources(&SourceReader::new().skip_missing_files(), &sources).unwrap();
    assert!(resolver.is_none());
}
