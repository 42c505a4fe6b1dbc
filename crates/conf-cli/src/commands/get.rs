//! `confctl get`: resolve a single typed key

use conf_core::{ConfigResolver, ConfigType, ListLookup, Lookup, split_comma_list};
use serde_json::Value;

use crate::cli::{GetArgs, ValueType};
use crate::error::{CliError, Result};

type Getter<T> = fn(&mut ConfigResolver, &str, Lookup<T>) -> conf_core::Result<Option<T>>;
type ListGetter<T> = fn(&mut ConfigResolver, &str, ListLookup<T>) -> conf_core::Result<Option<Vec<T>>>;

/// Resolve the key described by `args`, `null` for an absent optional key
pub fn run_get(config: &mut ConfigResolver, args: &GetArgs) -> Result<Value> {
    Ok(resolve(config, args)?.unwrap_or(Value::Null))
}

/// Resolve the key described by `args` through the matching typed getter
pub fn resolve(config: &mut ConfigResolver, args: &GetArgs) -> Result<Option<Value>> {
    match (args.value_type, args.list) {
        (ValueType::Int, false) => scalar(config, args, ConfigResolver::get_int),
        (ValueType::Float, false) => scalar(config, args, ConfigResolver::get_float),
        (ValueType::Bool, false) => scalar(config, args, ConfigResolver::get_boolean),
        (ValueType::String, false) => scalar(config, args, ConfigResolver::get_string),
        (ValueType::Dict, false) => scalar(config, args, ConfigResolver::get_dict),
        (ValueType::Uri, false) => scalar(config, args, ConfigResolver::get_uri),
        (ValueType::Int, true) => list(config, args, ConfigResolver::get_int_list),
        (ValueType::Float, true) => list(config, args, ConfigResolver::get_float_list),
        (ValueType::Bool, true) => list(config, args, ConfigResolver::get_boolean_list),
        (ValueType::String, true) => list(config, args, ConfigResolver::get_string_list),
        (ValueType::Dict, true) => list(config, args, ConfigResolver::get_dict_list),
        (ValueType::Uri, true) => list(config, args, ConfigResolver::get_uri_list),
        (ValueType::List, _) => list(config, args, ConfigResolver::get_list),
    }
}

fn scalar<T: ConfigType>(config: &mut ConfigResolver, args: &GetArgs, getter: Getter<T>) -> Result<Option<Value>> {
    let mut lookup = with_flags(Lookup::new(), args);
    if let Some(default) = &args.default {
        lookup = lookup.with_default(parse_arg::<T>("--default", default)?);
    }
    if !args.options.is_empty() {
        lookup = lookup.with_options(parse_options::<T>(&args.options)?);
    }

    let value = getter(config, &args.key, lookup)?;
    Ok(value.map(serde_json::to_value).transpose()?)
}

fn list<T: ConfigType>(config: &mut ConfigResolver, args: &GetArgs, getter: ListGetter<T>) -> Result<Option<Value>> {
    let mut lookup = with_flags(Lookup::new(), args);
    if let Some(default) = &args.default {
        let parts = split_comma_list(default);
        lookup = lookup.with_default(parse_options::<T>(&parts)?);
    }
    if !args.options.is_empty() {
        lookup = lookup.with_options(parse_options::<T>(&args.options)?);
    }

    let value = getter(config, &args.key, lookup)?;
    Ok(value.map(serde_json::to_value).transpose()?)
}

fn with_flags<T, O>(mut lookup: Lookup<T, O>, args: &GetArgs) -> Lookup<T, O> {
    if args.optional {
        lookup = lookup.optional();
    }
    if args.secret {
        lookup = lookup.secret();
    }
    if args.local {
        lookup = lookup.local();
    }
    lookup
}

fn parse_options<T: ConfigType>(raw: &[String]) -> Result<Vec<T>> {
    raw.iter().map(|value| parse_arg::<T>("--option", value)).collect()
}

fn parse_arg<T: ConfigType>(flag: &str, raw: &str) -> Result<T> {
    T::convert(raw).map_err(|_| CliError::user(format!("Invalid value `{raw}` for {flag}: expected `{}`", T::NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conf_test_utils::resolver;
    use serde_json::json;

    fn args(key: &str, value_type: ValueType) -> GetArgs {
        GetArgs {
            key: key.to_string(),
            value_type,
            ..GetArgs::default()
        }
    }

    #[test]
    fn resolves_scalars_as_json() {
        let mut config = resolver(json!({"N": "4", "F": "yes", "U": "a:b@c"}));

        assert_eq!(run_get(&mut config, &args("N", ValueType::Int)).unwrap(), json!(4));
        assert_eq!(run_get(&mut config, &args("F", ValueType::Bool)).unwrap(), json!(true));
        assert_eq!(
            run_get(&mut config, &args("U", ValueType::Uri)).unwrap(),
            json!({"user": "a", "password": "b", "host": "c"})
        );
    }

    #[test]
    fn resolves_lists() {
        let mut config = resolver(json!({"L": "[1, 2]", "C": "x, y"}));

        let mut int_list = args("L", ValueType::Int);
        int_list.list = true;
        assert_eq!(run_get(&mut config, &int_list).unwrap(), json!([1, 2]));
        assert_eq!(run_get(&mut config, &args("C", ValueType::List)).unwrap(), json!(["x", "y"]));
    }

    #[test]
    fn default_is_parsed_with_the_target_type() {
        let mut config = resolver(json!({}));
        let mut get = args("N", ValueType::Int);
        get.optional = true;
        get.default = Some("12".to_string());

        assert_eq!(run_get(&mut config, &get).unwrap(), json!(12));
    }

    #[test]
    fn absent_optional_key_prints_null() {
        let mut config = resolver(json!({}));
        let mut get = args("N", ValueType::Int);
        get.optional = true;

        assert_eq!(run_get(&mut config, &get).unwrap(), Value::Null);
    }

    #[test]
    fn invalid_default_is_a_user_error() {
        let mut config = resolver(json!({}));
        let mut get = args("N", ValueType::Int);
        get.optional = true;
        get.default = Some("many".to_string());

        let err = run_get(&mut config, &get).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn options_are_enforced() {
        let mut config = resolver(json!({"MODE": "staging"}));
        let mut get = args("MODE", ValueType::String);
        get.options = vec!["dev".to_string(), "prod".to_string()];

        let err = run_get(&mut config, &get).unwrap_err();
        assert!(matches!(err, CliError::Config(conf_core::Error::NotAnOption { .. })));
    }
}
