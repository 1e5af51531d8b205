//! Privileges derived from an object's flags and ownership.

use crate::{Dbref, FlagBit, FlagSet, World};

/// Privilege summary of one object, computed per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Privileges {
    /// The singular top authority
    pub god: bool,
    pub wizard: bool,
    pub royalty: bool,
    pub staff: bool,
    /// May act with its owner's privileges
    pub inherits: bool,
}

impl Privileges {
    /// Privileges of the top authority.
    pub fn god() -> Self {
        Self {
            god: true,
            wizard: true,
            royalty: false,
            staff: true,
            inherits: true,
        }
    }

    /// Derive privileges for `who`. Missing objects get none.
    pub fn of<W: World + ?Sized>(world: &W, who: Dbref, god: Dbref) -> Self {
        let Some(flags) = world.flags(who).copied() else {
            return Self::default();
        };
        let owner = world.owner(who);
        let owner_flags = world.flags(owner).copied().unwrap_or(FlagSet::EMPTY);

        let inherits =
            flags.contains(FlagBit::INHERIT) || owner_flags.contains(FlagBit::INHERIT) || who == owner;
        let wizard = flags.contains(FlagBit::WIZARD) || (owner_flags.contains(FlagBit::WIZARD) && inherits);
        let royalty =
            flags.contains(FlagBit::ROYALTY) || (owner_flags.contains(FlagBit::ROYALTY) && inherits);

        Self {
            god: who == god,
            wizard,
            royalty,
            staff: wizard || royalty || flags.contains(FlagBit::STAFF),
            inherits,
        }
    }

    /// Wizard or God.
    pub fn elevated(&self) -> bool {
        self.wizard || self.god
    }

    /// Royalty or wizard.
    pub fn wiz_roy(&self) -> bool {
        self.royalty || self.wizard
    }

    /// Royalty, wizard, or God.
    pub fn role_or_above(&self) -> bool {
        self.wiz_roy() || self.god
    }
}
