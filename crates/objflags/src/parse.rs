//! Flag command and flag list parsing.
//!
//! Two grammars live here:
//! - Flag commands (`"wizard !dark ! safe"`): whitespace-separated names,
//!   each optionally negated with `!`.
//! - Flag lists (`"PWc"`): one character per type or flag letter, used when
//!   searching or creating by flags.

use crate::error::{FlagError, Result};
use crate::{FlagRegistry, FlagSet, ObjectType, Privileges};

/// One token of a flag command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken<'a> {
    /// Preceded by `!`
    pub negate: bool,
    /// Flag name, empty if the token had none
    pub name: &'a str,
}

/// Split a flag command into tokens.
///
/// A `!` may be followed by whitespace before the name. An empty command
/// yields a single empty token so the caller can report it.
pub fn tokenize_flag_command(command: &str) -> Vec<FlagToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = command.trim_end_matches(|c: char| c.is_ascii_whitespace());
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let negate = match rest.strip_prefix('!') {
            Some(after) => {
                rest = after.trim_start_matches(|c: char| c.is_ascii_whitespace());
                true
            }
            None => false,
        };
        let end = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        tokens.push(FlagToken {
            negate,
            name: &rest[..end],
        });
        if end == rest.len() {
            break;
        }
        rest = &rest[end..];
    }
    tokens
}

/// Flags and optional type selected by a flag list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagMask {
    /// Requested flags; the type tag bits are always zero
    pub flags: FlagSet,
    pub object_type: Option<ObjectType>,
}

impl FlagMask {
    /// Whether an object with `flags` satisfies this mask.
    pub fn matches(&self, flags: &FlagSet) -> bool {
        self.object_type.map_or(true, |t| flags.object_type() == t) && flags.contains_all(&self.flags)
    }
}

/// Convert a flag list into a mask.
///
/// Each character is first tried as a type letter the observer can see,
/// then as the letter of a flag the observer can see. Any miss, or a second
/// different type, fails the whole list.
pub fn parse_flag_list(registry: &FlagRegistry, observer: &Privileges, text: &str) -> Result<FlagMask> {
    let mut mask = FlagMask::default();
    for c in text.chars() {
        let as_type = ObjectType::ALL
            .into_iter()
            .find(|t| t.info().letter == Some(c) && t.info().visibility.visible_to(observer));
        if let Some(object_type) = as_type {
            match mask.object_type {
                Some(existing) if existing != object_type => {
                    return Err(FlagError::ConflictingType(c));
                }
                _ => mask.object_type = Some(object_type),
            }
            continue;
        }

        let entry = registry
            .positive_entries()
            .find(|e| e.descriptor.letter == c && e.descriptor.visibility.visible_to(observer))
            .ok_or(FlagError::UnknownCharacter(c))?;
        mask.flags.insert(entry.descriptor.bit);
    }
    Ok(mask)
}
