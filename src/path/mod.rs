mod scanner;

use std::ops::Deref;

use smallvec::SmallVec;

use crate::constants::is_leading_blank;
use crate::{Error, ParseOptions, Result};

use scanner::NameScanner;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal key. Digit-only keys stay strings here; the tree decides
    /// whether they address a list slot.
    Key(String),
    /// `[]`: the next slot of whatever container it lands in.
    AutoIndex,
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    /// Classify the text between one pair of brackets. A group that is empty
    /// once a single leading space or tab is dropped means "next slot".
    pub(crate) fn from_group(inner: &str) -> Self {
        let mut chars = inner.chars();
        let trimmed = match chars.next() {
            Some(ch) if is_leading_blank(ch) => chars.as_str(),
            _ => inner,
        };
        if trimmed.is_empty() {
            Segment::AutoIndex
        } else {
            Segment::Key(inner.to_string())
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::AutoIndex => None,
        }
    }

    pub const fn is_auto_index(&self) -> bool {
        matches!(self, Segment::AutoIndex)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

pub(crate) type Segments = SmallVec<[Segment; 4]>;

/// A parsed field name: root-to-leaf segments, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Segments);

impl Path {
    pub fn from_segments<I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = Segment>,
    {
        let segments: Segments = segments.into_iter().collect();
        if segments.is_empty() {
            return Err(Error::empty_path());
        }
        Ok(Path(segments))
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }

    pub fn head(&self) -> &Segment {
        &self.0[0]
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.0.into_vec()
    }
}

impl Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turns raw field names into [`Path`]s.
#[derive(Debug, Clone, Default)]
pub struct NameParser {
    options: ParseOptions,
}

impl NameParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one field name.
    ///
    /// Leading spaces and tabs are ignored. A name that is empty or starts
    /// with `[` is rejected with [`ErrorKind::InvalidName`](crate::ErrorKind::InvalidName).
    ///
    /// # Examples
    /// ```
    /// use serde_formtree::{NameParser, ParseOptions, Segment};
    ///
    /// let parser = NameParser::new(ParseOptions::default());
    /// let path = parser.parse("user[tags][]").unwrap();
    /// assert_eq!(
    ///     path.as_slice(),
    ///     &[Segment::key("user"), Segment::key("tags"), Segment::AutoIndex]
    /// );
    /// assert!(parser.parse("[user]").is_err());
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Path> {
        let mut scanner = NameScanner::new(raw);
        scanner.skip_leading_blanks();
        if !scanner.starts_name() {
            return Err(Error::invalid_name(raw));
        }

        let mut segments = Segments::new();
        match scanner.split_bracketed() {
            Some(prefix) => {
                segments.push(Segment::Key(self.normalize_prefix(prefix)));
                while let Some(inner) = scanner.next_group() {
                    segments.push(Segment::from_group(inner));
                }
            }
            None => segments.push(Segment::Key(self.normalize_flat(scanner.rest()))),
        }
        Ok(Path(segments))
    }

    fn normalize_prefix(&self, prefix: &str) -> String {
        if self.options.normalize_first_name {
            replace_chars(prefix, |ch| matches!(ch, ' ' | '['))
        } else {
            prefix.to_string()
        }
    }

    // Whichever of ' ' and '[' shows up first decides what gets folded.
    fn normalize_flat(&self, name: &str) -> String {
        if !self.options.normalize_first_name {
            return name.to_string();
        }
        match memchr::memchr2(b' ', b'[', name.as_bytes()).map(|idx| name.as_bytes()[idx]) {
            Some(b' ') => replace_chars(name, |ch| matches!(ch, ' ' | '[')),
            Some(_) => replace_chars(name, |ch| ch == '['),
            None => name.to_string(),
        }
    }
}

fn replace_chars(input: &str, pred: impl Fn(char) -> bool) -> String {
    input
        .chars()
        .map(|ch| {
            if pred(ch) {
                crate::constants::NORMALIZED_CHAR
            } else {
                ch
            }
        })
        .collect()
}

pub fn parse(name: &str) -> Result<Path> {
    parse_with_options(name, &ParseOptions::default())
}

pub fn parse_with_options(name: &str, options: &ParseOptions) -> Result<Path> {
    NameParser::new(options.clone()).parse(name)
}
