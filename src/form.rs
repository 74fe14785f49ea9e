use serde_json::{Number, Value};

use crate::constants::{DEFAULT_JSON_NAME, JSON_CONTENT_TYPE, JSON_FILE_NAME};
use crate::tree::{Container, FilePart, Scalar};
use crate::{build_with_options, Error, ParseOptions, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    pub name: String,
    pub value: Scalar,
}

/// Ordered `(name, value)` entries as a form would submit them.
///
/// Names may repeat; order is kept exactly as appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect entries, dropping those with an empty name or no value.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, Option<Scalar>)>,
        N: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in entries {
            let name = name.into();
            match value {
                Some(value) if !name.is_empty() => form.append(name, value),
                _ => log::debug!("dropping form entry {name:?}"),
            }
        }
        form
    }

    /// Read the `[{"name": ..., "value": ...}]` shape.
    ///
    /// Items that are not objects, have a missing or empty name, or carry a
    /// value other than a string or number are ignored. Anything other than
    /// an array yields an empty form.
    ///
    /// # Examples
    /// ```
    /// use serde_formtree::FormData;
    /// use serde_json::json;
    ///
    /// let form = FormData::from_json_entries(&json!([
    ///     {"name": "qty", "value": 3},
    ///     {"name": "", "value": "dropped"},
    ///     {"name": "note", "value": null}
    /// ]));
    /// assert_eq!(form.len(), 1);
    /// ```
    pub fn from_json_entries(value: &Value) -> Self {
        let Value::Array(items) = value else {
            return Self::new();
        };
        let entries = items.iter().map(|item| {
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
            let value = match item.get("value") {
                Some(Value::String(text)) => Some(Scalar::Text(text.clone())),
                Some(Value::Number(number)) => Some(Scalar::Text(number_text(number))),
                _ => None,
            };
            (name, value)
        });
        Self::from_entries(entries)
    }

    pub fn append(&mut self, name: impl Into<String>, value: Scalar) {
        self.entries.push(FormEntry {
            name: name.into(),
            value,
        });
    }

    pub fn append_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.append(name, Scalar::Text(text.into()));
    }

    pub fn append_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.append(name, Scalar::File(file));
    }

    /// Append every entry of `others`, in order, after the existing ones.
    pub fn merge<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a FormData>,
    {
        for other in others {
            self.entries.extend(other.entries.iter().cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormEntry> {
        self.entries.iter()
    }

    pub fn text_entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.value {
            Scalar::Text(text) => Some((entry.name.as_str(), text.as_str())),
            Scalar::File(_) => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FilePart)> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.value {
            Scalar::File(file) => Some((entry.name.as_str(), file)),
            Scalar::Text(_) => None,
        })
    }

    /// Build a tree from the text entries. Files are left out.
    pub fn to_tree(&self, options: &ParseOptions) -> Container {
        build_with_options(self.text_entries(), options)
    }

    /// The files of this form plus one text field holding the tree as JSON.
    ///
    /// `name` falls back to `__dataJSON__` when absent or empty.
    pub fn pack_json(&self, name: Option<&str>, options: &ParseOptions) -> Result<FormData> {
        let json = self.tree_json(options)?;
        let mut out = self.files_only();
        out.append_text(json_field_name(name), json);
        Ok(out)
    }

    /// Like [`pack_json`](Self::pack_json), with the JSON attached as a
    /// `data.json` file.
    pub fn pack_json_file(&self, name: Option<&str>, options: &ParseOptions) -> Result<FormData> {
        let json = self.tree_json(options)?;
        let mut out = self.files_only();
        let file =
            FilePart::new(JSON_FILE_NAME, json.into_bytes()).with_content_type(JSON_CONTENT_TYPE);
        out.append_file(json_field_name(name), file);
        Ok(out)
    }

    fn files_only(&self) -> FormData {
        let mut out = FormData::new();
        for (name, file) in self.files() {
            out.append_file(name, file.clone());
        }
        out
    }

    fn tree_json(&self, options: &ParseOptions) -> Result<String> {
        serde_json::to_string(&self.to_tree(options))
            .map_err(|err| Error::serialize(format!("serialize failed: {err}")))
    }
}

/// Integral floats lose their fraction (`1.0` reads as `1`); other numbers
/// keep their JSON spelling.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            itoa::Buffer::new().format(float as i128).to_owned()
        }
        _ => number.to_string(),
    }
}

fn json_field_name(name: Option<&str>) -> &str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_JSON_NAME,
    }
}

impl<'a> IntoIterator for &'a FormData {
    type Item = &'a FormEntry;
    type IntoIter = std::slice::Iter<'a, FormEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
