#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The field name is empty or begins inside a bracket group.
    InvalidName,
    /// `insert` was handed a path without segments.
    EmptyPath,
    Serialize,
    Deserialize,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn invalid_name(name: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidName,
            message: format!("invalid field name {name:?}"),
        }
    }

    pub fn empty_path() -> Self {
        Self {
            kind: ErrorKind::EmptyPath,
            message: "cannot insert at an empty path".to_string(),
        }
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Serialize,
            message: message.into(),
        }
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn is_invalid_name(&self) -> bool {
        self.kind == ErrorKind::InvalidName
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[rstest::rstest]
    fn test_invalid_name_message_quotes_name() {
        let err = Error::invalid_name("[bad]");
        assert_eq!(err.kind, ErrorKind::InvalidName);
        assert!(err.is_invalid_name());
        assert_eq!(err.to_string(), "invalid field name \"[bad]\"");
    }

    #[rstest::rstest]
    #[case(Error::empty_path(), ErrorKind::EmptyPath)]
    #[case(Error::serialize("x"), ErrorKind::Serialize)]
    #[case(Error::deserialize("x"), ErrorKind::Deserialize)]
    #[case(Error::decode("x"), ErrorKind::Decode)]
    fn test_constructors_set_kind(#[case] err: Error, #[case] kind: ErrorKind) {
        assert_eq!(err.kind, kind);
        assert!(!err.is_invalid_name());
    }
}
