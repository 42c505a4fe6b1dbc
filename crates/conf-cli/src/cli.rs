//! CLI argument parsing using clap derive

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Resolve typed configuration from files and environment variables
#[derive(Parser, Debug)]
#[command(name = "confctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Where configuration is read from, in increasing precedence
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Config file (JSON, TOML or YAML); may be repeated
    #[arg(short, long = "file", global = true, env = "CONFCTL_FILES", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Read every environment variable
    #[arg(long, global = true)]
    pub env: bool,

    /// Read environment variables starting with this prefix
    #[arg(long, global = true, conflicts_with = "env")]
    pub env_prefix: Option<String>,

    /// Skip config files that do not exist
    #[arg(long, global = true)]
    pub skip_missing: bool,
}

/// Target type of a lookup
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    #[default]
    String,
    Dict,
    Uri,
    /// Comma separated list of strings
    List,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Resolve a single key and print it as JSON
    ///
    /// Examples:
    ///   confctl -f config.yaml get WORKERS -t int
    ///   confctl --env-prefix APP_ get APP_HOSTS -t string --list
    ///   confctl get APP_MODE --optional --default dev --option dev --option prod
    Get(GetArgs),

    /// List raw keys, optionally filtered by prefix or suffix
    Keys {
        /// Only keys starting with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Only keys ending with this suffix
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Resolve keys and print the export of every requested key
    Export {
        /// Keys to resolve, as KEY or KEY:TYPE
        #[arg(required = true)]
        keys: Vec<KeySpec>,

        /// Keys to flag as secret
        #[arg(long = "secret")]
        secrets: Vec<String>,

        /// Keys to flag as local
        #[arg(long = "local")]
        locals: Vec<String>,

        /// Include secret keys in the export
        #[arg(long)]
        include_secrets: bool,

        /// Include local keys in the export
        #[arg(long)]
        include_locals: bool,

        /// Render every value as a string
        #[arg(long)]
        as_strings: bool,
    },

    /// Base64-encode a value
    Encode {
        value: String,
    },

    /// Base64-decode a value
    Decode {
        value: String,

        /// Number of decode passes (0 or absent uses the configured value)
        #[arg(long)]
        iterations: Option<u32>,
    },
}

/// Arguments of `confctl get`
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GetArgs {
    /// The key to resolve
    pub key: String,

    /// Target type
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
    pub value_type: ValueType,

    /// Resolve a JSON list of the target type
    #[arg(long)]
    pub list: bool,

    /// Do not fail when the key is absent
    #[arg(long)]
    pub optional: bool,

    /// Value used when an optional key is absent
    #[arg(long, requires = "optional")]
    pub default: Option<String>,

    /// Allowed value; may be repeated
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Flag the key as secret
    #[arg(long)]
    pub secret: bool,

    /// Flag the key as local
    #[arg(long)]
    pub local: bool,
}

/// A key with an optional target type, written `KEY` or `KEY:TYPE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub key: String,
    pub value_type: ValueType,
}

impl FromStr for KeySpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((key, value_type)) = s.rsplit_once(':') else {
            return Ok(Self {
                key: s.to_string(),
                value_type: ValueType::default(),
            });
        };
        let value_type = ValueType::from_str(value_type, true)?;
        Ok(Self {
            key: key.to_string(),
            value_type,
        })
    }
}
