//! In-memory object store.
//!
//! Backs the test suite and is small enough to embed in tools that want to
//! exercise flag policies without a real database.

use crate::{Dbref, FlagBit, FlagSet, ObjectType, Power, World};

/// One stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub name: String,
    pub owner: Dbref,
    pub flags: FlagSet,
    pub powers: Vec<Power>,
}

/// A recorded hearing transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarChange {
    pub obj: Dbref,
    pub could_hear: bool,
    pub can_hear: bool,
}

/// Vector-backed `World`. Object numbers are indices.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    objects: Vec<StoredObject>,
    messages: Vec<(Dbref, String)>,
    ear_changes: Vec<EarChange>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object owned by `owner`.
    pub fn create(&mut self, name: &str, object_type: ObjectType, owner: Dbref) -> Dbref {
        let dbref = Dbref(self.objects.len() as i32);
        self.objects.push(StoredObject {
            name: name.to_string(),
            owner,
            flags: FlagSet::new(object_type),
            powers: Vec::new(),
        });
        dbref
    }

    /// Create a self-owned player.
    pub fn create_player(&mut self, name: &str) -> Dbref {
        let dbref = Dbref(self.objects.len() as i32);
        self.create(name, ObjectType::Player, dbref)
    }

    pub fn object(&self, obj: Dbref) -> Option<&StoredObject> {
        usize::try_from(obj.0).ok().and_then(|i| self.objects.get(i))
    }

    pub fn object_mut(&mut self, obj: Dbref) -> Option<&mut StoredObject> {
        usize::try_from(obj.0).ok().and_then(|i| self.objects.get_mut(i))
    }

    /// Set a bit directly, bypassing access checks.
    pub fn set_flag(&mut self, obj: Dbref, bit: FlagBit) {
        if let Some(o) = self.object_mut(obj) {
            o.flags.insert(bit);
        }
    }

    pub fn set_type(&mut self, obj: Dbref, object_type: ObjectType) {
        if let Some(o) = self.object_mut(obj) {
            o.flags.set_object_type(object_type);
        }
    }

    pub fn grant_power(&mut self, obj: Dbref, power: Power) {
        if let Some(o) = self.object_mut(obj) {
            if !o.powers.contains(&power) {
                o.powers.push(power);
            }
        }
    }

    /// Current flags, or an empty set for missing objects.
    pub fn flags_of(&self, obj: Dbref) -> FlagSet {
        self.object(obj).map(|o| o.flags).unwrap_or_default()
    }

    /// Messages sent to one player, oldest first.
    pub fn messages_for(&self, player: Dbref) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn ear_changes(&self) -> &[EarChange] {
        &self.ear_changes
    }
}

impl World for MemoryWorld {
    fn flags(&self, obj: Dbref) -> Option<&FlagSet> {
        self.object(obj).map(|o| &o.flags)
    }

    fn flags_mut(&mut self, obj: Dbref) -> Option<&mut FlagSet> {
        self.object_mut(obj).map(|o| &mut o.flags)
    }

    fn owner(&self, obj: Dbref) -> Dbref {
        self.object(obj).map(|o| o.owner).unwrap_or(Dbref::NOTHING)
    }

    fn name(&self, obj: Dbref) -> Option<&str> {
        self.object(obj).map(|o| o.name.as_str())
    }

    fn has_power(&self, obj: Dbref, power: Power) -> bool {
        self.object(obj).is_some_and(|o| o.powers.contains(&power))
    }

    fn can_examine(&self, observer: Dbref, target: Dbref) -> bool {
        let Some(target_obj) = self.object(target) else {
            return false;
        };
        let observer_flags = self.flags_of(observer);
        target_obj.owner == observer
            || target_obj.flags.contains(FlagBit::VISUAL)
            || observer_flags.contains(FlagBit::WIZARD)
            || observer_flags.contains(FlagBit::ROYALTY)
    }

    fn ears_changed(&mut self, obj: Dbref, could_hear: bool, can_hear: bool) {
        self.ear_changes.push(EarChange {
            obj,
            could_hear,
            can_hear,
        });
    }

    fn notify(&mut self, player: Dbref, message: &str) {
        self.messages.push((player, message.to_string()));
    }
}
