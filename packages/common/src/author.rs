use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Author of a piece of user-generated content, as resolved by the
/// enrichment join.
///
/// On the wire this is the author's email, or `null` when it cannot be
/// shown. `Unknown` marks content whose author subject id has no user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    Known { email: Option<String> },
    Unknown,
}

impl Author {
    pub fn email(&self) -> Option<&str> {
        match self {
            Author::Known { email } => email.as_deref(),
            Author::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Author::Known { .. })
    }
}

impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.email().serialize(serializer)
    }
}

/// A `null` author reads back as `Unknown`; the wire format cannot tell it
/// apart from a known user without an email.
impl<'de> Deserialize<'de> for Author {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(email) => Author::Known { email: Some(email) },
            None => Author::Unknown,
        })
    }
}
