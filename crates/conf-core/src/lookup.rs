//! Per-call lookup and export options

/// How a single typed lookup should behave.
///
/// `T` is the returned type, `O` the type of the allowed options. For
/// scalar getters both are the same; list getters return `Vec<T>` and check
/// options per element (see [`ListLookup`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<T, O = T> {
    pub(crate) optional: bool,
    pub(crate) secret: bool,
    pub(crate) local: bool,
    pub(crate) default: Option<T>,
    pub(crate) options: Option<Vec<O>>,
}

/// Lookup options for list getters
pub type ListLookup<T> = Lookup<Vec<T>, T>;

impl<T, O> Default for Lookup<T, O> {
    fn default() -> Self {
        Self {
            optional: false,
            secret: false,
            local: false,
            default: None,
            options: None,
        }
    }
}

impl<T, O> Lookup<T, O> {
    /// A required, non-secret, non-local lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not fail when the key is absent; return the default instead
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Exclude the key from the default export
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Mark the key as meaningful to this process only
    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }

    /// Value returned for an absent optional key
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Restrict accepted values to `options`
    pub fn with_options(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options = Some(options.into_iter().collect());
        self
    }
}

/// Which requested keys to export and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_secrets: bool,
    pub include_locals: bool,
    pub as_strings: bool,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_secrets(mut self) -> Self {
        self.include_secrets = true;
        self
    }

    pub fn include_locals(mut self) -> Self {
        self.include_locals = true;
        self
    }

    pub fn as_strings(mut self) -> Self {
        self.as_strings = true;
        self
    }
}
