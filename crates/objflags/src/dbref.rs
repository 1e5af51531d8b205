//! Object references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to an object in the store. Negative values are special markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dbref(pub i32);

impl Dbref {
    pub const NOTHING: Dbref = Dbref(-1);
    pub const AMBIGUOUS: Dbref = Dbref(-2);
    pub const HOME: Dbref = Dbref(-3);
    pub const NOPERM: Dbref = Dbref(-4);

    /// Display name for the special negative references.
    pub fn special_name(self) -> Option<&'static str> {
        match self {
            Dbref::NOTHING => Some("*NOTHING*"),
            Dbref::AMBIGUOUS => Some("*AMBIGUOUS*"),
            Dbref::HOME => Some("*HOME*"),
            Dbref::NOPERM => Some("*NOPERM*"),
            _ => None,
        }
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl From<i32> for Dbref {
    fn from(value: i32) -> Self {
        Dbref(value)
    }
}

impl fmt::Display for Dbref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
