//! Shared test world

use objflags::{Dbref, FlagBit, MemoryWorld, ObjectType};

/// A small world with one of each kind of actor.
#[allow(dead_code)]
pub struct Cast {
    pub world: MemoryWorld,
    pub limbo: Dbref,
    pub god: Dbref,
    pub wizard: Dbref,
    pub mortal: Dbref,
    /// Owned by the mortal
    pub widget: Dbref,
    /// Owned by God
    pub heirloom: Dbref,
    /// STAFF but neither wizard nor royalty
    pub staffer: Dbref,
}

pub fn cast() -> Cast {
    let mut world = MemoryWorld::new();
    let limbo = world.create("Limbo", ObjectType::Room, Dbref(1));
    let god = world.create_player("One");
    world.set_flag(god, FlagBit::WIZARD);
    let wizard = world.create_player("Merlin");
    world.set_flag(wizard, FlagBit::WIZARD);
    let mortal = world.create_player("Alice");
    let widget = world.create("Widget", ObjectType::Thing, mortal);
    let heirloom = world.create("Heirloom", ObjectType::Thing, god);
    let staffer = world.create_player("Sam");
    world.set_flag(staffer, FlagBit::STAFF);
    Cast {
        world,
        limbo,
        god,
        wizard,
        mortal,
        widget,
        heirloom,
        staffer,
    }
}
