//! Error types for objflags
//!
//! `FlagError` values double as the user-facing feedback text: their
//! `Display` output is exactly what gets sent back to the acting player.

use thiserror::Error;

use crate::Dbref;

/// Result type alias for flag operations
pub type Result<T> = std::result::Result<T, FlagError>;

/// Generic refusal sent whenever a handler rejects a change.
pub const PERMISSION_DENIED: &str = "Permission denied.";

/// Per-token and per-character errors. None of these are fatal; each is
/// reported and processing continues with the next token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// Registry miss
    #[error("I do not understand that flag.")]
    UnknownFlag,

    /// A token had nothing left after trimming and negation
    #[error("You must specify a flag to {}.", sense_verb(.clearing))]
    MissingFlagName { clearing: bool },

    /// Handler rejected the change
    #[error("Permission denied.")]
    PermissionDenied,

    /// Attempt to strip WIZARD from the top authority
    #[error("You cannot make God mortal.")]
    CannotMakeGodMortal,

    /// Attempt to mark a protected well-known object as GOING
    #[error("Permission denied.")]
    ProtectedObject(Dbref),

    /// Target or actor is not in the object store
    #[error("Permission denied.")]
    NoSuchObject(Dbref),

    /// Two different type letters in one flag list
    #[error("{0}: Conflicting type specifications.")]
    ConflictingType(char),

    /// Flag list character that is neither a visible type nor a visible flag
    #[error("{0}: Flag unknown or not valid for specified object type")]
    UnknownCharacter(char),
}

impl FlagError {
    /// Whether the engine follows this error with the generic refusal.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            FlagError::PermissionDenied
                | FlagError::CannotMakeGodMortal
                | FlagError::ProtectedObject(_)
                | FlagError::NoSuchObject(_)
        )
    }
}

fn sense_verb(clearing: &bool) -> &'static str {
    if *clearing {
        "clear"
    } else {
        "set"
    }
}

/// Catalog invariants checked once when a registry is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Flag name '{0}' is registered twice")]
    DuplicateName(String),

    #[error("Flag letter '{0}' is used by more than one flag")]
    DuplicateLetter(char),

    #[error("Flag bit for '{0}' is described more than once")]
    DuplicateBit(String),

    #[error("Flag name '{0}' refers to a bit with no descriptor")]
    UnknownBit(String),

    #[error("Flag name '{0}' exceeds the maximum name length")]
    NameTooLong(String),

    #[error("Flag letter '{0}' is also an object type letter")]
    TypeLetter(char),
}

/// Configuration-time errors. A failing directive is logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Flag access directive names no flag")]
    MissingFlagName,

    #[error("No such flag: {0}")]
    NoSuchFlag(String),

    #[error("Cannot change access for flag: {0}")]
    NotReassignable(String),

    #[error("Flag access not found: {0}")]
    UnknownAccess(String),

    #[error("Invalid top authority: {0}")]
    InvalidGod(Dbref),

    #[error("Invalid protected object: {0}")]
    InvalidProtectedObject(Dbref),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
