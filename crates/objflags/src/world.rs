//! The object store and notification channel, seen from the flag subsystem.

use serde::{Deserialize, Serialize};

use crate::{Dbref, FlagBit, FlagSet};

/// Powers granted outside the flag words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    /// May set DARK on itself even as a player
    Hide,
    /// May set MONITOR on players
    Monitor,
}

/// Everything the flag subsystem needs from the surrounding server.
///
/// All calls address one object at a time; implementations need no
/// cross-object locking.
pub trait World {
    /// Flag words of an object, or `None` if it does not exist.
    fn flags(&self, obj: Dbref) -> Option<&FlagSet>;

    fn flags_mut(&mut self, obj: Dbref) -> Option<&mut FlagSet>;

    /// Owner of an object, `Dbref::NOTHING` if it does not exist.
    fn owner(&self, obj: Dbref) -> Dbref;

    fn name(&self, obj: Dbref) -> Option<&str>;

    fn has_power(&self, obj: Dbref, power: Power) -> bool;

    /// Whether `observer` may examine `target` in full.
    fn can_examine(&self, observer: Dbref, target: Dbref) -> bool;

    /// Whether the object currently perceives speech.
    ///
    /// The default looks only at flags. Stores that track listen patterns
    /// should override this.
    fn hears(&self, obj: Dbref) -> bool {
        self.flags(obj).is_some_and(|f| {
            (f.is_player() && f.contains(FlagBit::CONNECTED))
                || f.contains(FlagBit::PUPPET)
                || f.contains(FlagBit::MONITOR)
                || f.contains(FlagBit::HAS_LISTEN)
        })
    }

    /// Called when a hearing-related flag change flips `hears(obj)`.
    fn ears_changed(&mut self, _obj: Dbref, _could_hear: bool, _can_hear: bool) {}

    /// Send a line of text to a player.
    fn notify(&mut self, player: Dbref, message: &str);
}
