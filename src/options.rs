/// Options for decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
    /// The deepest nesting of objects and arrays accepted. The
    /// top-level object counts as one level.
    pub max_depth: usize,

    /// If true, anything after the top-level object is ignored. If
    /// false, only whitespace may follow it.
    pub allow_trailing: bool,
}

/// Rejects trailing characters and nesting beyond 128 levels.
pub const STRICT: &DecodeOptions = &DecodeOptions {
    max_depth: 128,
    allow_trailing: false,
};

/// Like [STRICT], but ignores whatever follows the top-level object.
pub const LENIENT: &DecodeOptions = &DecodeOptions {
    max_depth: 128,
    allow_trailing: true,
};

impl Default for DecodeOptions {
    fn default() -> Self {
        STRICT.clone()
    }
}
