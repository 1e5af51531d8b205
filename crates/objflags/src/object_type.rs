//! Object types encoded in the low bits of the first flag word.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::flag::TYPE_MASK;
use crate::Visibility;

bitflags! {
    /// Structural capabilities an object type has.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectCapabilities: u8 {
        const CONTENTS = 0x01;
        const LOCATION = 0x02;
        const EXITS = 0x04;
        const DROPTO = 0x08;
        const HOME = 0x10;
        const OWNER = 0x20;
        const SIBLINGS = 0x40;
    }
}

/// Object type tag. Fixed set; the discriminant is the stored tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectType {
    Room = 0,
    Thing = 1,
    Exit = 2,
    Player = 3,
    Type5 = 4,
    Garbage = 5,
    ReservedGarbage = 6,
    NoType = 7,
}

/// Static description of an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTypeInfo {
    pub name: &'static str,
    /// Listing letter; `None` or a blank means the type prints no letter.
    pub letter: Option<char>,
    /// Tier required to see this type's flags at all
    pub visibility: Visibility,
    pub capabilities: ObjectCapabilities,
}

const ROOM_CAPS: ObjectCapabilities = ObjectCapabilities::CONTENTS
    .union(ObjectCapabilities::EXITS)
    .union(ObjectCapabilities::DROPTO)
    .union(ObjectCapabilities::HOME);

const THING_CAPS: ObjectCapabilities = ObjectCapabilities::CONTENTS
    .union(ObjectCapabilities::LOCATION)
    .union(ObjectCapabilities::EXITS)
    .union(ObjectCapabilities::HOME)
    .union(ObjectCapabilities::SIBLINGS);

const PLAYER_CAPS: ObjectCapabilities = THING_CAPS.union(ObjectCapabilities::OWNER);

static OBJECT_TYPES: [ObjectTypeInfo; 8] = [
    ObjectTypeInfo {
        name: "ROOM",
        letter: Some('R'),
        visibility: Visibility::PUBLIC,
        capabilities: ROOM_CAPS,
    },
    ObjectTypeInfo {
        name: "THING",
        letter: Some(' '),
        visibility: Visibility::PUBLIC,
        capabilities: THING_CAPS,
    },
    ObjectTypeInfo {
        name: "EXIT",
        letter: Some('E'),
        visibility: Visibility::PUBLIC,
        capabilities: ObjectCapabilities::SIBLINGS,
    },
    ObjectTypeInfo {
        name: "PLAYER",
        letter: Some('P'),
        visibility: Visibility::PUBLIC,
        capabilities: PLAYER_CAPS,
    },
    ObjectTypeInfo {
        name: "TYPE5",
        letter: Some('+'),
        visibility: Visibility::GOD,
        capabilities: ObjectCapabilities::empty(),
    },
    ObjectTypeInfo {
        name: "GARBAGE",
        letter: Some('-'),
        visibility: Visibility::PUBLIC,
        capabilities: THING_CAPS,
    },
    ObjectTypeInfo {
        name: "GARBAGE",
        letter: Some('#'),
        visibility: Visibility::GOD,
        capabilities: ObjectCapabilities::empty(),
    },
    ObjectTypeInfo {
        name: "NOTYPE",
        letter: None,
        visibility: Visibility::GOD,
        capabilities: ObjectCapabilities::empty(),
    },
];

impl ObjectType {
    /// All types in tag order.
    pub const ALL: [ObjectType; 8] = [
        ObjectType::Room,
        ObjectType::Thing,
        ObjectType::Exit,
        ObjectType::Player,
        ObjectType::Type5,
        ObjectType::Garbage,
        ObjectType::ReservedGarbage,
        ObjectType::NoType,
    ];

    /// Decode a type from the low bits of a flag word.
    pub const fn from_tag(word1: u32) -> Self {
        match word1 & TYPE_MASK {
            0 => ObjectType::Room,
            1 => ObjectType::Thing,
            2 => ObjectType::Exit,
            3 => ObjectType::Player,
            4 => ObjectType::Type5,
            5 => ObjectType::Garbage,
            6 => ObjectType::ReservedGarbage,
            _ => ObjectType::NoType,
        }
    }

    pub const fn tag(self) -> u32 {
        self as u32
    }

    pub fn info(self) -> &'static ObjectTypeInfo {
        &OBJECT_TYPES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Letter shown in flag listings, if the type shows one.
    pub fn display_letter(self) -> Option<char> {
        self.info().letter.filter(|c| *c != ' ')
    }

    pub fn has(self, capability: ObjectCapabilities) -> bool {
        self.info().capabilities.contains(capability)
    }
}
