//! The builtin flag catalog.
//!
//! `BUILTIN_DESCRIPTORS` describes each bit once. `BUILTIN_NAMES` lists
//! the names players use, in listing order; a bit may appear under a
//! positive name and a negative alias.

use crate::{Access, FlagBit, FlagDescriptor, Visibility};

/// A name in the catalog, pointing at a bit described in the descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagNameSpec {
    pub name: &'static str,
    /// `false` for a negative alias such as `SPOOF` for `NOSPOOF`
    pub positive: bool,
    pub bit: FlagBit,
}

const GOD_ONLY: Visibility = Visibility::GOD.union(Visibility::NO_DECOMPILE);

const fn flag(bit: FlagBit, letter: char, visibility: Visibility, access: Access) -> FlagDescriptor {
    FlagDescriptor {
        bit,
        letter,
        visibility,
        access,
    }
}

const fn name(name: &'static str, bit: FlagBit) -> FlagNameSpec {
    FlagNameSpec {
        name,
        positive: true,
        bit,
    }
}

const fn alias(name: &'static str, bit: FlagBit) -> FlagNameSpec {
    FlagNameSpec {
        name,
        positive: false,
        bit,
    }
}

pub static BUILTIN_DESCRIPTORS: &[FlagDescriptor] = &[
    flag(FlagBit::ABODE, 'A', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::ANSI, 'X', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::AUDIBLE, 'a', Visibility::PUBLIC, Access::Hearing),
    flag(FlagBit::AUDITORIUM, 'b', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::CHOWN_OK, 'C', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::CONNECTED, 'c', Visibility::NO_DECOMPILE, Access::God),
    flag(FlagBit::DARK, 'D', Visibility::PUBLIC, Access::Dark),
    flag(FlagBit::DESTROY_OK, 'd', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::ENTER_OK, 'e', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::FIXED, 'f', Visibility::PUBLIC, Access::RestrictPlayer),
    flag(FlagBit::FLOATING, 'F', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::GAGGED, 'j', Visibility::PUBLIC, Access::Wizard),
    flag(FlagBit::GOING, 'G', Visibility::NO_DECOMPILE, Access::Going),
    flag(FlagBit::HALTED, 'h', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::HAS_DAILY, '*', GOD_ONLY, Access::God),
    flag(FlagBit::HAS_FORWARDLIST, '&', GOD_ONLY, Access::God),
    flag(FlagBit::HAS_LISTEN, '@', GOD_ONLY, Access::God),
    flag(FlagBit::HAS_STARTUP, '>', GOD_ONLY, Access::God),
    flag(FlagBit::HAVEN, 'H', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::HEAD, '?', Visibility::PUBLIC, Access::Wizard),
    flag(FlagBit::HTML, '(', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::IMMORTAL, 'i', Visibility::PUBLIC, Access::Wizard),
    flag(FlagBit::INHERIT, 'I', Visibility::PUBLIC, Access::Inherit),
    flag(FlagBit::JUMP_OK, 'J', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::KEY, 'K', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::LIGHT, 'l', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::LINK_OK, 'L', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::MONITOR, 'M', Visibility::PUBLIC, Access::Hearing),
    flag(FlagBit::MYOPIC, 'm', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::NO_COMMAND, 'n', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::NOBLEED, '%', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::NOSPOOF, 'N', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::OPAQUE, 'O', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::PARENT_OK, 'Y', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::PLAYER_MAILS, 'B', GOD_ONLY, Access::God),
    flag(FlagBit::PUPPET, 'p', Visibility::PUBLIC, Access::Hearing),
    flag(FlagBit::QUIET, 'Q', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::ROBOT, 'r', Visibility::PUBLIC, Access::NonPlayer),
    flag(FlagBit::ROYALTY, 'Z', Visibility::PUBLIC, Access::Wizard),
    flag(FlagBit::SAFE, 's', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::SLAVE, 'x', Visibility::WIZARD, Access::Wizard),
    flag(FlagBit::STAFF, 'w', Visibility::PUBLIC, Access::Wizard),
    flag(FlagBit::STICKY, 'S', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::SUSPECT, 'u', Visibility::WIZARD, Access::Wizard),
    flag(FlagBit::TERSE, 'q', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::TRACE, 'T', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::TRANSPARENT, 't', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::UNFINDABLE, 'U', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::UNINSPECTED, 'g', Visibility::PUBLIC, Access::Royalty),
    flag(FlagBit::VACATION, '|', Visibility::PUBLIC, Access::RestrictPlayer),
    flag(FlagBit::VERBOSE, 'v', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::VISUAL, 'V', Visibility::PUBLIC, Access::Any),
    flag(FlagBit::WIZARD, 'W', Visibility::PUBLIC, Access::God),
];

pub static BUILTIN_NAMES: &[FlagNameSpec] = &[
    name("ABODE", FlagBit::ABODE),
    name("ANSI", FlagBit::ANSI),
    name("AUDIBLE", FlagBit::AUDIBLE),
    name("AUDITORIUM", FlagBit::AUDITORIUM),
    alias("BLEED", FlagBit::NOBLEED),
    alias("COMMANDS", FlagBit::NO_COMMAND),
    name("CHOWN_OK", FlagBit::CHOWN_OK),
    name("CONNECTED", FlagBit::CONNECTED),
    name("DARK", FlagBit::DARK),
    name("DESTROY_OK", FlagBit::DESTROY_OK),
    name("ENTER_OK", FlagBit::ENTER_OK),
    name("FIXED", FlagBit::FIXED),
    name("FLOATING", FlagBit::FLOATING),
    name("GAGGED", FlagBit::GAGGED),
    name("GOING", FlagBit::GOING),
    name("HALTED", FlagBit::HALTED),
    name("HAS_DAILY", FlagBit::HAS_DAILY),
    name("HAS_FORWARDLIST", FlagBit::HAS_FORWARDLIST),
    name("HAS_LISTEN", FlagBit::HAS_LISTEN),
    name("HAS_STARTUP", FlagBit::HAS_STARTUP),
    name("HAVEN", FlagBit::HAVEN),
    name("HEAD", FlagBit::HEAD),
    name("HTML", FlagBit::HTML),
    name("IMMORTAL", FlagBit::IMMORTAL),
    name("INHERIT", FlagBit::INHERIT),
    name("JUMP_OK", FlagBit::JUMP_OK),
    name("KEY", FlagBit::KEY),
    name("LIGHT", FlagBit::LIGHT),
    name("LINK_OK", FlagBit::LINK_OK),
    name("MONITOR", FlagBit::MONITOR),
    name("MYOPIC", FlagBit::MYOPIC),
    name("NO_COMMAND", FlagBit::NO_COMMAND),
    name("NOBLEED", FlagBit::NOBLEED),
    name("NOSPOOF", FlagBit::NOSPOOF),
    name("OPAQUE", FlagBit::OPAQUE),
    name("PARENT_OK", FlagBit::PARENT_OK),
    name("PLAYER_MAILS", FlagBit::PLAYER_MAILS),
    name("PUPPET", FlagBit::PUPPET),
    name("QUIET", FlagBit::QUIET),
    name("ROBOT", FlagBit::ROBOT),
    name("ROYALTY", FlagBit::ROYALTY),
    name("SAFE", FlagBit::SAFE),
    name("SLAVE", FlagBit::SLAVE),
    alias("SPOOF", FlagBit::NOSPOOF),
    name("STAFF", FlagBit::STAFF),
    name("STICKY", FlagBit::STICKY),
    name("SUSPECT", FlagBit::SUSPECT),
    name("TERSE", FlagBit::TERSE),
    name("TRACE", FlagBit::TRACE),
    name("TRANSPARENT", FlagBit::TRANSPARENT),
    name("UNFINDABLE", FlagBit::UNFINDABLE),
    name("UNINSPECTED", FlagBit::UNINSPECTED),
    name("VACATION", FlagBit::VACATION),
    name("VERBOSE", FlagBit::VERBOSE),
    name("VISUAL", FlagBit::VISUAL),
    name("WIZARD", FlagBit::WIZARD),
];

#[cfg(feature = "realms")]
const REALM: Visibility = Visibility::ADMIN.union(Visibility::STAFF);

#[cfg(feature = "realms")]
pub static REALM_DESCRIPTORS: &[FlagDescriptor] = &[
    flag(FlagBit::OBF, 'o', REALM, Access::Royalty),
    flag(FlagBit::HSS, 'k', REALM, Access::Royalty),
    flag(FlagBit::UMBRA, 'y', REALM, Access::Royalty),
    flag(FlagBit::SHROUD, '$', REALM, Access::Royalty),
    flag(FlagBit::MATRIX, '/', REALM, Access::Royalty),
    flag(FlagBit::MEDIUM, '^', REALM, Access::Royalty),
    flag(FlagBit::DEAD, '_', REALM, Access::Royalty),
    flag(FlagBit::FAE, '0', REALM, Access::Royalty),
    flag(FlagBit::CHIMERA, '1', REALM, Access::Royalty),
    flag(FlagBit::PEERING, '2', REALM, Access::Royalty),
];

#[cfg(feature = "realms")]
pub static REALM_NAMES: &[FlagNameSpec] = &[
    name("OBF", FlagBit::OBF),
    name("HSS", FlagBit::HSS),
    name("UMBRA", FlagBit::UMBRA),
    name("SHROUD", FlagBit::SHROUD),
    name("MATRIX", FlagBit::MATRIX),
    name("MEDIUM", FlagBit::MEDIUM),
    name("DEAD", FlagBit::DEAD),
    name("FAE", FlagBit::FAE),
    name("CHIMERA", FlagBit::CHIMERA),
    name("PEERING", FlagBit::PEERING),
];

/// Descriptors for every flag compiled into this build.
pub fn builtin_descriptors() -> Vec<FlagDescriptor> {
    #[allow(unused_mut)]
    let mut all = BUILTIN_DESCRIPTORS.to_vec();
    #[cfg(feature = "realms")]
    all.extend_from_slice(REALM_DESCRIPTORS);
    all
}

/// Names for every flag compiled into this build, in listing order.
pub fn builtin_names() -> Vec<FlagNameSpec> {
    #[allow(unused_mut)]
    let mut all = BUILTIN_NAMES.to_vec();
    #[cfg(feature = "realms")]
    all.extend_from_slice(REALM_NAMES);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_has_a_descriptor() {
        let descriptors = builtin_descriptors();
        for spec in builtin_names() {
            assert!(
                descriptors.iter().any(|d| d.bit == spec.bit),
                "{} has no descriptor",
                spec.name
            );
        }
    }

    #[test]
    fn negative_aliases_are_few() {
        let aliases: Vec<_> = BUILTIN_NAMES
            .iter()
            .filter(|n| !n.positive)
            .map(|n| n.name)
            .collect();
        assert_eq!(aliases, vec!["BLEED", "COMMANDS", "SPOOF"]);
    }

    #[test]
    fn core_catalog_size() {
        assert_eq!(BUILTIN_DESCRIPTORS.len(), 53);
        assert_eq!(BUILTIN_NAMES.len(), 56);
    }
}
