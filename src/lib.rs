//! Nested trees from flat, bracket-named form fields.
//!
//! Field names such as `user[name]`, `user[tags][]` or `rows[3][id]` are
//! parsed into paths and folded, in document order, into lists and
//! insertion-ordered maps. A list turns into a map as soon as a key would
//! leave a gap in it.
//!
//! ```
//! use serde_json::json;
//!
//! let pairs = [("user[name]", "Ada"), ("user[tags][]", "math"), ("user[tags][]", "poetry")];
//! let value = serde_formtree::to_json_value(&serde_formtree::build(pairs)).unwrap();
//! assert_eq!(value, json!({"user": {"name": "Ada", "tags": ["math", "poetry"]}}));
//! ```

pub mod build;
pub mod constants;
pub mod error;
pub mod form;
pub mod options;
pub mod path;
pub mod tree;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use crate::build::{build, build_with_options, Builder};
pub use crate::error::{Error, ErrorKind};
pub use crate::form::{FormData, FormEntry};
pub use crate::options::ParseOptions;
pub use crate::path::{parse, parse_with_options, NameParser, Path, Segment};
pub use crate::tree::{insert, promote, Container, FieldValue, FilePart, Map, Node, Scalar};

pub type Result<T> = std::result::Result<T, Error>;

pub fn to_json_value(tree: &Container) -> Result<Value> {
    serde_json::to_value(tree).map_err(|err| Error::serialize(format!("serialize failed: {err}")))
}

pub fn to_string(tree: &Container) -> Result<String> {
    serde_json::to_string(tree).map_err(|err| Error::serialize(format!("serialize failed: {err}")))
}

pub fn to_string_pretty(tree: &Container) -> Result<String> {
    serde_json::to_string_pretty(tree)
        .map_err(|err| Error::serialize(format!("serialize failed: {err}")))
}

/// Build a tree from `pairs` and deserialize it into `T`.
///
/// Every leaf is text, so numeric fields need a type that accepts strings.
///
/// # Examples
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Signup {
///     email: String,
///     roles: Vec<String>,
/// }
///
/// let signup: Signup = serde_formtree::from_pairs([
///     ("email", "ada@example.com"),
///     ("roles[]", "admin"),
///     ("roles[]", "editor"),
/// ])
/// .unwrap();
/// assert_eq!(signup.roles, ["admin", "editor"]);
/// ```
pub fn from_pairs<T, I, N, V>(pairs: I) -> Result<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: FieldValue,
{
    from_pairs_with_options(pairs, &ParseOptions::default())
}

pub fn from_pairs_with_options<T, I, N, V>(pairs: I, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: FieldValue,
{
    from_tree(&build_with_options(pairs, options))
}

pub fn from_tree<T: DeserializeOwned>(tree: &Container) -> Result<T> {
    let value = to_json_value(tree)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

/// Read a `[{"name": ..., "value": ...}]` document and build its tree.
pub fn from_json_entries_str(input: &str, options: &ParseOptions) -> Result<Container> {
    let value: Value = serde_json::from_str(input)
        .map_err(|err| Error::decode(format!("invalid entries document: {err}")))?;
    Ok(FormData::from_json_entries(&value).to_tree(options))
}
