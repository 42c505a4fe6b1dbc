//! `confctl export`: resolve keys and print what was consulted

use std::collections::BTreeMap;

use conf_core::{ConfigResolver, ExportOptions};
use serde_json::Value;

use crate::cli::{GetArgs, KeySpec};
use crate::commands::get;
use crate::error::Result;

/// Resolve every key in `keys`, then export the requested parameters.
///
/// Keys listed in `secrets` or `locals` are flagged accordingly.
pub fn run_export(
    config: &mut ConfigResolver,
    keys: &[KeySpec],
    secrets: &[String],
    locals: &[String],
    export: ExportOptions,
) -> Result<BTreeMap<String, Value>> {
    for spec in keys {
        let args = GetArgs {
            key: spec.key.clone(),
            value_type: spec.value_type,
            secret: secrets.contains(&spec.key),
            local: locals.contains(&spec.key),
            ..GetArgs::default()
        };
        get::resolve(config, &args)?;
    }

    Ok(config.get_requested_params(export))
}
