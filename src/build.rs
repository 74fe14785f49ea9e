use crate::path::NameParser;
use crate::tree::{insert, settle, Container, FieldValue, Map};
use crate::ParseOptions;

/// Folds ordered `(name, value)` pairs into one tree.
///
/// Pairs without a value or with an unparseable name are skipped; pushing
/// never fails. The top level is collected as a map and only settles into a
/// list or a map in [`finish`](Self::finish), once every pair has been seen.
#[derive(Debug)]
pub struct Builder {
    parser: NameParser,
    root: Container,
}

impl Default for Builder {
    fn default() -> Self {
        Self::with_options(&ParseOptions::default())
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &ParseOptions) -> Self {
        Self {
            parser: NameParser::new(options.clone()),
            root: Container::Map(Map::new()),
        }
    }

    /// Add one pair. Returns whether it contributed to the tree.
    pub fn push<V: FieldValue>(&mut self, name: &str, value: V) -> bool {
        let Some(node) = value.into_node() else {
            log::debug!("skipping field {name:?}: no value");
            return false;
        };
        let path = match self.parser.parse(name) {
            Ok(path) => path,
            Err(err) => {
                log::debug!("skipping field: {err}");
                return false;
            }
        };
        match insert(&mut self.root, &path, node) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("skipping field {name:?}: {err}");
                false
            }
        }
    }

    pub fn extend<I, N, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: FieldValue,
    {
        for (name, value) in pairs {
            self.push(name.as_ref(), value);
        }
    }

    /// The tree built so far, with its top level still keyed by name.
    pub fn root(&self) -> &Container {
        &self.root
    }

    /// The finished tree. The top level is a list when its keys are exactly
    /// `0..n` in any order, and a map otherwise.
    pub fn finish(self) -> Container {
        match self.root {
            Container::Map(map) => settle(map),
            list => list,
        }
    }
}

/// Build a tree from pairs in document order.
///
/// # Examples
/// ```
/// use serde_formtree::build;
///
/// let tree = build([("user[name]", "Ada"), ("user[tags][]", "x"), ("[bad]", "skip")]);
/// assert_eq!(tree["user"]["name"].as_str(), Some("Ada"));
/// assert_eq!(tree["user"]["tags"][0].as_str(), Some("x"));
/// assert_eq!(tree.len(), 1);
/// ```
pub fn build<I, N, V>(pairs: I) -> Container
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: FieldValue,
{
    build_with_options(pairs, &ParseOptions::default())
}

pub fn build_with_options<I, N, V>(pairs: I, options: &ParseOptions) -> Container
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: FieldValue,
{
    let mut builder = Builder::with_options(options);
    builder.extend(pairs);
    builder.finish()
}
