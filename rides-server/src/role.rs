use serde::{Deserialize, Serialize};

/// What kind of account this is. Students book rides; drivers offer them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can search for and book rides
    Student,

    /// Can offer rides
    Driver,
}

impl Role {
    /// How the role is spelled in the database (and on the wire).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Driver => "driver",
        }
    }

    /// Read a stored role value back. `None` means the row holds
    /// something we never write, which the caller should log.
    #[must_use]
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "driver" => Some(Self::Driver),
            _ => None,
        }
    }
}
