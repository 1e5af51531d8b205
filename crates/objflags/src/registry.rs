//! Flag name registry.
//!
//! Built once from the catalog. Request handling only reads it; the one
//! write path is access reassignment during configuration.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;

use crate::catalog::{builtin_descriptors, builtin_names, FlagNameSpec};
use crate::error::{ConfigError, RegistryError};
use crate::{Access, FlagBit, ObjectType, Visibility};

/// Longest flag name accepted by lookup, in bytes.
pub const MAX_FLAG_NAME_LEN: usize = 63;

/// Static metadata for one flag bit. Only `access` changes after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDescriptor {
    pub bit: FlagBit,
    /// Letter used in compact listings
    pub letter: char,
    pub visibility: Visibility,
    pub access: Access,
}

#[derive(Debug, Clone)]
struct NameEntry {
    name: &'static str,
    positive: bool,
    descriptor: usize,
}

/// A resolved name: the name as catalogued, its sense, and its bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEntry<'a> {
    pub name: &'static str,
    pub positive: bool,
    pub descriptor: &'a FlagDescriptor,
}

/// Normalize a flag name for lookup: trim, ASCII-lowercase, bound the length.
///
/// Returns `None` when the trimmed name is too long; it is never truncated.
pub fn canonical_flag_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.len() > MAX_FLAG_NAME_LEN {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

/// Name index over the flag catalog.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    descriptors: Vec<FlagDescriptor>,
    names: Vec<NameEntry>,
    index: HashMap<String, usize>,
}

impl FlagRegistry {
    /// Build a registry, checking the catalog invariants.
    pub fn build(
        descriptors: &[FlagDescriptor],
        names: &[FlagNameSpec],
    ) -> Result<Self, RegistryError> {
        let mut letters = HashSet::new();
        for (i, d) in descriptors.iter().enumerate() {
            if !letters.insert(d.letter) {
                return Err(RegistryError::DuplicateLetter(d.letter));
            }
            // Flag lists mix both kinds of letter in one string.
            if ObjectType::ALL.iter().any(|t| t.info().letter == Some(d.letter)) {
                return Err(RegistryError::TypeLetter(d.letter));
            }
            if descriptors[..i].iter().any(|other| other.bit == d.bit) {
                return Err(RegistryError::DuplicateBit(d.letter.to_string()));
            }
        }

        let mut entries = Vec::with_capacity(names.len());
        let mut index = HashMap::with_capacity(names.len());
        for spec in names {
            let descriptor = descriptors
                .iter()
                .position(|d| d.bit == spec.bit)
                .ok_or_else(|| RegistryError::UnknownBit(spec.name.to_string()))?;
            let key = canonical_flag_name(spec.name)
                .ok_or_else(|| RegistryError::NameTooLong(spec.name.to_string()))?;
            if index.insert(key, entries.len()).is_some() {
                return Err(RegistryError::DuplicateName(spec.name.to_string()));
            }
            entries.push(NameEntry {
                name: spec.name,
                positive: spec.positive,
                descriptor,
            });
        }

        tracing::debug!(
            "Built flag registry with {} names over {} bits",
            entries.len(),
            descriptors.len()
        );
        Ok(Self {
            descriptors: descriptors.to_vec(),
            names: entries,
            index,
        })
    }

    /// Registry over the builtin catalog.
    pub fn builtin() -> Self {
        Self::build(&builtin_descriptors(), &builtin_names())
            .expect("builtin flag catalog is consistent")
    }

    /// Resolve a raw flag name.
    pub fn lookup(&self, raw: &str) -> Option<FlagEntry<'_>> {
        let key = canonical_flag_name(raw)?;
        self.index.get(&key).map(|&i| self.entry(i))
    }

    /// All names in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = FlagEntry<'_>> + '_ {
        (0..self.names.len()).map(move |i| self.entry(i))
    }

    /// Positive-sense names only; each bit appears at most once.
    pub fn positive_entries(&self) -> impl Iterator<Item = FlagEntry<'_>> + '_ {
        self.entries().filter(|e| e.positive)
    }

    pub fn descriptor(&self, bit: FlagBit) -> Option<&FlagDescriptor> {
        self.descriptors.iter().find(|d| d.bit == bit)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Replace the access policy of a flag. Returns the previous policy.
    ///
    /// Both names of an aliased bit share the change.
    pub fn set_access(&mut self, flag_name: &str, access: Access) -> Result<Access, ConfigError> {
        let i = self.descriptor_index(flag_name)?;
        let descriptor = &mut self.descriptors[i];
        if !descriptor.access.is_reassignable() {
            return Err(ConfigError::NotReassignable(flag_name.trim().to_string()));
        }
        let previous = descriptor.access;
        descriptor.access = access;
        tracing::info!(
            "Flag {} access changed from {} to {}",
            flag_name.trim(),
            previous.config_name(),
            access.config_name()
        );
        Ok(previous)
    }

    /// Apply one `<flag-name> <access-policy-name>` directive.
    ///
    /// Tokens are separated by spaces, tabs, `=` or `,`.
    pub fn apply_access_directive(&mut self, directive: &str) -> Result<(), ConfigError> {
        let mut tokens = directive
            .split([' ', '\t', '=', ','])
            .filter(|t| !t.is_empty());
        let flag_name = tokens.next().ok_or(ConfigError::MissingFlagName)?;
        let policy = tokens.next().unwrap_or("");

        let i = self.descriptor_index(flag_name)?;
        if !self.descriptors[i].access.is_reassignable() {
            return Err(ConfigError::NotReassignable(flag_name.to_string()));
        }
        let access = Access::from_config_name(policy)
            .ok_or_else(|| ConfigError::UnknownAccess(policy.to_string()))?;
        self.set_access(flag_name, access).map(|_| ())
    }

    fn descriptor_index(&self, flag_name: &str) -> Result<usize, ConfigError> {
        canonical_flag_name(flag_name)
            .and_then(|key| self.index.get(&key))
            .map(|&i| self.names[i].descriptor)
            .ok_or_else(|| ConfigError::NoSuchFlag(flag_name.trim().to_string()))
    }

    fn entry(&self, i: usize) -> FlagEntry<'_> {
        let name = &self.names[i];
        FlagEntry {
            name: name.name,
            positive: name.positive,
            descriptor: &self.descriptors[name.descriptor],
        }
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

lazy_static! {
    /// Process-wide registry over the builtin catalog
    static ref GLOBAL_REGISTRY: RwLock<FlagRegistry> = RwLock::new(FlagRegistry::builtin());
}

/// Shared read view for request handling.
pub fn global() -> RwLockReadGuard<'static, FlagRegistry> {
    GLOBAL_REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Administrative write view. Hold it only while applying configuration.
pub fn global_mut() -> RwLockWriteGuard<'static, FlagRegistry> {
    GLOBAL_REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_builds() {
        let registry = FlagRegistry::build(&builtin_descriptors(), &builtin_names());
        assert!(registry.is_ok());
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let registry = FlagRegistry::builtin();
        let entry = registry.lookup("  WiZaRd \t").unwrap();
        assert_eq!(entry.name, "WIZARD");
        assert_eq!(entry.descriptor.bit, FlagBit::WIZARD);
        assert!(registry.lookup("wiz").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn overlong_names_never_match() {
        let registry = FlagRegistry::builtin();
        let long = format!("wizard{}", " x".repeat(40));
        assert!(canonical_flag_name(&long).is_none());
        assert!(registry.lookup(&long).is_none());

        let exactly = "a".repeat(MAX_FLAG_NAME_LEN);
        assert_eq!(canonical_flag_name(&exactly), Some(exactly.clone()));
        assert!(canonical_flag_name(&format!("{exactly}a")).is_none());
    }

    #[test]
    fn aliases_share_descriptor() {
        let registry = FlagRegistry::builtin();
        let spoof = registry.lookup("spoof").unwrap();
        let nospoof = registry.lookup("nospoof").unwrap();
        assert!(!spoof.positive);
        assert!(nospoof.positive);
        assert_eq!(spoof.descriptor.bit, nospoof.descriptor.bit);
    }

    #[test]
    fn positive_entries_skip_aliases() {
        let registry = FlagRegistry::builtin();
        assert!(registry.positive_entries().all(|e| e.positive));
        assert_eq!(
            registry.positive_entries().count(),
            registry.len() - 3
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let descriptors = [FlagDescriptor {
            bit: FlagBit::SAFE,
            letter: 's',
            visibility: Visibility::PUBLIC,
            access: Access::Any,
        }];
        let names = [
            FlagNameSpec {
                name: "SAFE",
                positive: true,
                bit: FlagBit::SAFE,
            },
            FlagNameSpec {
                name: " safe",
                positive: false,
                bit: FlagBit::SAFE,
            },
        ];
        let err = FlagRegistry::build(&descriptors, &names).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(_)));
    }

    #[test]
    fn flag_letters_must_not_be_type_letters() {
        let names = [FlagNameSpec {
            name: "NOBLEED",
            positive: true,
            bit: FlagBit::NOBLEED,
        }];
        for letter in ['-', '+', 'P', '#'] {
            let descriptors = [FlagDescriptor {
                bit: FlagBit::NOBLEED,
                letter,
                visibility: Visibility::PUBLIC,
                access: Access::Any,
            }];
            assert_eq!(
                FlagRegistry::build(&descriptors, &names).unwrap_err(),
                RegistryError::TypeLetter(letter)
            );
        }
    }

    #[test]
    fn duplicate_letters_are_rejected() {
        let descriptors = [
            FlagDescriptor {
                bit: FlagBit::SAFE,
                letter: 's',
                visibility: Visibility::PUBLIC,
                access: Access::Any,
            },
            FlagDescriptor {
                bit: FlagBit::STICKY,
                letter: 's',
                visibility: Visibility::PUBLIC,
                access: Access::Any,
            },
        ];
        let err = FlagRegistry::build(&descriptors, &[]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateLetter('s'));
    }

    #[test]
    fn names_need_descriptors() {
        let names = [FlagNameSpec {
            name: "SAFE",
            positive: true,
            bit: FlagBit::SAFE,
        }];
        let err = FlagRegistry::build(&[], &names).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownBit(_)));
    }

    #[test]
    fn reassign_open_flag() {
        let mut registry = FlagRegistry::builtin();
        registry.apply_access_directive("haven wizard").unwrap();
        assert_eq!(registry.lookup("haven").unwrap().descriptor.access, Access::Wizard);

        registry.apply_access_directive("haven=royalty").unwrap();
        assert_eq!(registry.lookup("HAVEN").unwrap().descriptor.access, Access::Royalty);
    }

    #[test]
    fn reassign_alias_changes_both_names() {
        let mut registry = FlagRegistry::builtin();
        registry.apply_access_directive("spoof, god").unwrap();
        assert_eq!(registry.lookup("nospoof").unwrap().descriptor.access, Access::God);
    }

    #[test]
    fn special_handlers_are_locked() {
        let mut registry = FlagRegistry::builtin();
        for flag in ["going", "dark", "monitor", "inherit", "robot"] {
            let err = registry.apply_access_directive(&format!("{flag} any")).unwrap_err();
            assert!(matches!(err, ConfigError::NotReassignable(_)), "{flag}");
        }
    }

    #[test]
    fn staff_policy_is_terminal() {
        let mut registry = FlagRegistry::builtin();
        registry.apply_access_directive("haven staff").unwrap();
        let err = registry.apply_access_directive("haven any").unwrap_err();
        assert!(matches!(err, ConfigError::NotReassignable(_)));
    }

    #[test]
    fn directive_errors() {
        let mut registry = FlagRegistry::builtin();
        assert_eq!(
            registry.apply_access_directive("   "),
            Err(ConfigError::MissingFlagName)
        );
        assert!(matches!(
            registry.apply_access_directive("nosuchflag any"),
            Err(ConfigError::NoSuchFlag(_))
        ));
        assert!(matches!(
            registry.apply_access_directive("haven everyone"),
            Err(ConfigError::UnknownAccess(_))
        ));
        assert!(matches!(
            registry.apply_access_directive("haven"),
            Err(ConfigError::UnknownAccess(_))
        ));
        assert_eq!(registry.lookup("haven").unwrap().descriptor.access, Access::Any);
    }

    #[test]
    fn global_registry_is_builtin() {
        assert_eq!(global().len(), FlagRegistry::builtin().len());
    }
}
