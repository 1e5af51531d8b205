//! Visibility tiers attached to flags and object types.

use bitflags::bitflags;

use crate::Privileges;

bitflags! {
    /// Elevated-visibility requirements. An empty set means public.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Visibility: u8 {
        /// Only wizards (or God) can see it
        const WIZARD = 0x01;
        /// Only God can see it
        const GOD = 0x02;
        /// Royalty and wizards can see it
        const ADMIN = 0x04;
        /// Staff can see it
        const STAFF = 0x08;
        /// Never emitted by decompile
        const NO_DECOMPILE = 0x10;
    }
}

impl Visibility {
    pub const PUBLIC: Visibility = Visibility::empty();

    /// Whether an observer with these privileges may see the flag or type.
    ///
    /// God sees everything. Otherwise a GOD tier hides it, and if any of the
    /// wizard/admin/staff tiers are present the observer must satisfy one.
    pub fn visible_to(self, observer: &Privileges) -> bool {
        if observer.god {
            return true;
        }
        if self.contains(Visibility::GOD) {
            return false;
        }
        let tiers = self & (Visibility::WIZARD | Visibility::ADMIN | Visibility::STAFF);
        if tiers.is_empty() {
            return true;
        }
        (tiers.contains(Visibility::WIZARD) && observer.wizard)
            || (tiers.contains(Visibility::ADMIN) && observer.wiz_roy())
            || (tiers.contains(Visibility::STAFF) && observer.staff)
    }

    pub fn is_public(self) -> bool {
        self.difference(Visibility::NO_DECOMPILE).is_empty()
    }

    pub fn decompilable(self) -> bool {
        !self.contains(Visibility::NO_DECOMPILE)
    }
}
