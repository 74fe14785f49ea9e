/// Controls how field names are turned into paths.
///
/// # Examples
/// ```
/// use serde_formtree::ParseOptions;
///
/// let options = ParseOptions::new().with_normalize_first_name(false);
/// assert!(!options.normalize_first_name);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fold spaces and stray `[` in the leading name to `_`, the way browsers
    /// do when they submit a native form.
    pub normalize_first_name: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalize_first_name(mut self, normalize_first_name: bool) -> Self {
        self.normalize_first_name = normalize_first_name;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_first_name: true,
        }
    }
}
