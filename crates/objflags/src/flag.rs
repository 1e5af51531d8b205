//! Core flag types: storage words, typed flag bits, and per-object flag sets.
//!
//! Every flag lives in exactly one of a few fixed-size words. A `FlagBit`
//! carries its word alongside its mask, so a bit can only ever be tested
//! against or written into the word it belongs to.

use serde::{Deserialize, Serialize};

use crate::ObjectType;

/// Number of flag words attached to every object.
pub const FLAG_WORD_COUNT: usize = 3;

/// Low bits of the first word that hold the object type tag.
pub const TYPE_MASK: u32 = 0x7;

/// Selects which word of a `FlagSet` holds a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagWord {
    Word1,
    Word2,
    Word3,
}

impl FlagWord {
    pub const ALL: [FlagWord; FLAG_WORD_COUNT] = [FlagWord::Word1, FlagWord::Word2, FlagWord::Word3];

    pub const fn index(self) -> usize {
        match self {
            FlagWord::Word1 => 0,
            FlagWord::Word2 => 1,
            FlagWord::Word3 => 2,
        }
    }
}

/// A single flag bit within its storage word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagBit {
    word: FlagWord,
    mask: u32,
}

impl FlagBit {
    const fn new(word: FlagWord, mask: u32) -> Self {
        assert!(mask.count_ones() == 1, "flag bit must be a single bit");
        assert!(
            !matches!(word, FlagWord::Word1) || mask & TYPE_MASK == 0,
            "word1 low bits are reserved for the object type"
        );
        Self { word, mask }
    }

    pub const fn word(self) -> FlagWord {
        self.word
    }

    pub const fn mask(self) -> u32 {
        self.mask
    }

    // Word 1
    pub const TRANSPARENT: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0008);
    pub const WIZARD: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0010);
    pub const LINK_OK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0020);
    pub const DARK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0040);
    pub const JUMP_OK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0080);
    pub const STICKY: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0100);
    pub const DESTROY_OK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0200);
    pub const HAVEN: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0400);
    pub const QUIET: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_0800);
    pub const HALTED: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_1000);
    pub const TRACE: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_2000);
    pub const GOING: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_4000);
    pub const MONITOR: FlagBit = FlagBit::new(FlagWord::Word1, 0x0000_8000);
    pub const MYOPIC: FlagBit = FlagBit::new(FlagWord::Word1, 0x0001_0000);
    pub const PUPPET: FlagBit = FlagBit::new(FlagWord::Word1, 0x0002_0000);
    pub const CHOWN_OK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0004_0000);
    pub const ENTER_OK: FlagBit = FlagBit::new(FlagWord::Word1, 0x0008_0000);
    pub const VISUAL: FlagBit = FlagBit::new(FlagWord::Word1, 0x0010_0000);
    pub const IMMORTAL: FlagBit = FlagBit::new(FlagWord::Word1, 0x0020_0000);
    pub const HAS_STARTUP: FlagBit = FlagBit::new(FlagWord::Word1, 0x0040_0000);
    pub const OPAQUE: FlagBit = FlagBit::new(FlagWord::Word1, 0x0080_0000);
    pub const VERBOSE: FlagBit = FlagBit::new(FlagWord::Word1, 0x0100_0000);
    pub const INHERIT: FlagBit = FlagBit::new(FlagWord::Word1, 0x0200_0000);
    pub const NOSPOOF: FlagBit = FlagBit::new(FlagWord::Word1, 0x0400_0000);
    pub const ROBOT: FlagBit = FlagBit::new(FlagWord::Word1, 0x0800_0000);
    pub const SAFE: FlagBit = FlagBit::new(FlagWord::Word1, 0x1000_0000);
    pub const ROYALTY: FlagBit = FlagBit::new(FlagWord::Word1, 0x2000_0000);
    pub const AUDIBLE: FlagBit = FlagBit::new(FlagWord::Word1, 0x4000_0000);
    pub const TERSE: FlagBit = FlagBit::new(FlagWord::Word1, 0x8000_0000);

    // Word 2
    pub const KEY: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0001);
    pub const ABODE: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0002);
    pub const FLOATING: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0004);
    pub const UNFINDABLE: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0008);
    pub const PARENT_OK: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0010);
    pub const LIGHT: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0020);
    pub const HAS_LISTEN: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0040);
    pub const HAS_FORWARDLIST: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0080);
    pub const AUDITORIUM: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0100);
    pub const ANSI: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0200);
    pub const HEAD: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0400);
    pub const FIXED: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_0800);
    pub const UNINSPECTED: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_1000);
    pub const NO_COMMAND: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_2000);
    pub const NOBLEED: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_4000);
    pub const STAFF: FlagBit = FlagBit::new(FlagWord::Word2, 0x0000_8000);
    pub const HAS_DAILY: FlagBit = FlagBit::new(FlagWord::Word2, 0x0001_0000);
    pub const GAGGED: FlagBit = FlagBit::new(FlagWord::Word2, 0x0002_0000);
    pub const HTML: FlagBit = FlagBit::new(FlagWord::Word2, 0x0004_0000);
    pub const PLAYER_MAILS: FlagBit = FlagBit::new(FlagWord::Word2, 0x0008_0000);
    pub const VACATION: FlagBit = FlagBit::new(FlagWord::Word2, 0x0010_0000);
    pub const SUSPECT: FlagBit = FlagBit::new(FlagWord::Word2, 0x0020_0000);
    pub const CONNECTED: FlagBit = FlagBit::new(FlagWord::Word2, 0x4000_0000);
    pub const SLAVE: FlagBit = FlagBit::new(FlagWord::Word2, 0x8000_0000);
}

// Word 3 (realm flags)
#[cfg(feature = "realms")]
impl FlagBit {
    pub const OBF: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0001);
    pub const HSS: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0002);
    pub const UMBRA: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0004);
    pub const SHROUD: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0008);
    pub const MATRIX: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0010);
    pub const MEDIUM: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0020);
    pub const DEAD: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0040);
    pub const FAE: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0080);
    pub const CHIMERA: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0100);
    pub const PEERING: FlagBit = FlagBit::new(FlagWord::Word3, 0x0000_0200);
}

/// The flag words attached to one object. This is also the persisted form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
    words: [u32; FLAG_WORD_COUNT],
}

impl FlagSet {
    /// A flag set with no flags and a ROOM type tag.
    pub const EMPTY: FlagSet = FlagSet {
        words: [0; FLAG_WORD_COUNT],
    };

    /// Create a flag set for a new object of the given type.
    pub fn new(object_type: ObjectType) -> Self {
        let mut flags = Self::EMPTY;
        flags.set_object_type(object_type);
        flags
    }

    pub fn from_words(words: [u32; FLAG_WORD_COUNT]) -> Self {
        Self { words }
    }

    pub fn words(&self) -> [u32; FLAG_WORD_COUNT] {
        self.words
    }

    /// Raw contents of one word.
    pub fn word(&self, word: FlagWord) -> u32 {
        self.words[word.index()]
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::from_tag(self.words[FlagWord::Word1.index()])
    }

    pub fn set_object_type(&mut self, object_type: ObjectType) {
        let word1 = &mut self.words[FlagWord::Word1.index()];
        *word1 = (*word1 & !TYPE_MASK) | object_type.tag();
    }

    pub fn is_player(&self) -> bool {
        self.object_type() == ObjectType::Player
    }

    pub fn contains(&self, bit: FlagBit) -> bool {
        self.words[bit.word.index()] & bit.mask != 0
    }

    pub fn insert(&mut self, bit: FlagBit) {
        self.words[bit.word.index()] |= bit.mask;
    }

    pub fn remove(&mut self, bit: FlagBit) {
        self.words[bit.word.index()] &= !bit.mask;
    }

    /// Set or clear a bit.
    pub fn set(&mut self, bit: FlagBit, on: bool) {
        if on {
            self.insert(bit);
        } else {
            self.remove(bit);
        }
    }

    /// Flags only, with the type tag stripped.
    pub fn without_type(&self) -> FlagSet {
        let mut words = self.words;
        words[FlagWord::Word1.index()] &= !TYPE_MASK;
        FlagSet { words }
    }

    /// Whether every flag in `mask` is also set here. Type tags are ignored.
    pub fn contains_all(&self, mask: &FlagSet) -> bool {
        let mask = mask.without_type();
        self.words
            .iter()
            .zip(mask.words.iter())
            .all(|(have, want)| have & want == *want)
    }
}
