use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyPath,
    PathCollision,
    IndexCollision,
    IndexLimit,
    KindMismatch,
    Decode,
    Deserialize,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    /// Raw form key that triggered the failure, when there is one.
    pub key: Option<String>,
}

impl Error {
    pub fn empty_path(key: &str) -> Self {
        Self {
            kind: ErrorKind::EmptyPath,
            message: format!("form key {key:?} has no path segments"),
            key: Some(key.to_string()),
        }
    }

    pub fn path_collision(key: &str, at: &[&str]) -> Self {
        Self {
            kind: ErrorKind::PathCollision,
            message: format!("form key {key:?} collides at path {:?}", at.join(".")),
            key: Some(key.to_string()),
        }
    }

    pub fn index_collision(at: &str, index: usize, first: &str, second: &str) -> Self {
        let (first, second) = if second < first {
            (second, first)
        } else {
            (first, second)
        };
        Self {
            kind: ErrorKind::IndexCollision,
            message: format!("keys {first:?} and {second:?} under {at:?} both address index {index}"),
            key: Some(at.to_string()),
        }
    }

    pub fn index_limit(at: &str, index: usize, limit: usize) -> Self {
        Self {
            kind: ErrorKind::IndexLimit,
            message: format!("index {index} under {at:?} exceeds the limit of {limit}"),
            key: Some(at.to_string()),
        }
    }

    pub fn kind_mismatch(expected: &str, found: &str, at: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::KindMismatch,
            message: format!("expected {expected} at {at}, found {found}"),
            key: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: message.into(),
            key: None,
        }
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_path_collision_message() {
        let err = Error::path_collision("a.b.c", &["a", "b"]);
        assert_eq!(err.kind, ErrorKind::PathCollision);
        assert_eq!(err.key.as_deref(), Some("a.b.c"));
        assert_eq!(err.to_string(), "form key \"a.b.c\" collides at path \"a.b\"");
    }

    #[rstest::rstest]
    fn test_index_collision_orders_keys() {
        let one = Error::index_collision("rows", 1, "1", "01");
        let two = Error::index_collision("rows", 1, "01", "1");
        assert_eq!(one.to_string(), two.to_string());
        assert_eq!(
            one.to_string(),
            "keys \"01\" and \"1\" under \"rows\" both address index 1"
        );
    }

    #[rstest::rstest]
    fn test_with_key() {
        let err = Error::kind_mismatch("map", "leaf", "\"name\"").with_key("name");
        assert_eq!(err.kind, ErrorKind::KindMismatch);
        assert_eq!(err.key.as_deref(), Some("name"));
        assert_eq!(err.to_string(), "expected map at \"name\", found leaf");
    }
}
