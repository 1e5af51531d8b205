//! Flag queries and renderings.
//!
//! Everything here reads flags through the same visibility rules: the
//! descriptor's tier must admit the observer, and a dark wizard's CONNECTED
//! bit is hidden from anyone who is not a wizard.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FlagError, Result};
use crate::parse::{parse_flag_list, FlagMask};
use crate::{Dbref, FlagBit, FlagDescriptor, FlagEngine, FlagSet, ObjectType, Privileges, World};

lazy_static! {
    static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap();
}

/// Returned by `decode` when the observer does not exist.
pub const DECODE_ERROR: &str = "#-2 ERROR";

/// Flags that let anyone see an object's number and flags.
const ADVERTISED: [FlagBit; 5] = [
    FlagBit::CHOWN_OK,
    FlagBit::JUMP_OK,
    FlagBit::LINK_OK,
    FlagBit::DESTROY_OK,
    FlagBit::ABODE,
];

/// Remove ANSI color escapes.
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Whether `observer` may see `descriptor`'s bit on an object with `flags`.
pub fn flag_visible(descriptor: &FlagDescriptor, flags: &FlagSet, observer: &Privileges) -> bool {
    descriptor.visibility.visible_to(observer) && !hides_connected(descriptor.bit, flags, observer)
}

fn hides_connected(bit: FlagBit, flags: &FlagSet, observer: &Privileges) -> bool {
    bit == FlagBit::CONNECTED
        && flags.object_type() == ObjectType::Player
        && flags.contains(FlagBit::WIZARD)
        && flags.contains(FlagBit::DARK)
        && !observer.elevated()
}

impl<'a> FlagEngine<'a> {
    fn privileges<W: World + ?Sized>(&self, world: &W, who: Dbref) -> Privileges {
        Privileges::of(world, who, self.config.god)
    }

    /// Render a flag set as its type letter followed by flag letters.
    ///
    /// The type letter is left out when the observer could not name that
    /// type in a flag list, so the result always parses back.
    pub fn decode<W: World + ?Sized>(&self, world: &W, observer: Dbref, flags: &FlagSet) -> String {
        if world.flags(observer).is_none() {
            return DECODE_ERROR.to_string();
        }
        let who = self.privileges(world, observer);
        let mut out = String::new();
        let object_type = flags.object_type();
        if object_type.info().visibility.visible_to(&who) {
            if let Some(letter) = object_type.display_letter() {
                out.push(letter);
            }
        }
        for entry in self.registry.positive_entries() {
            let d = entry.descriptor;
            if flags.contains(d.bit) && flag_visible(d, flags, &who) {
                out.push(d.letter);
            }
        }
        out
    }

    /// Does `target` have the named flag, as far as `observer` can tell?
    ///
    /// A negative alias is true when its bit is clear.
    pub fn has_flag<W: World + ?Sized>(&self, world: &W, observer: Dbref, target: Dbref, name: &str) -> bool {
        let Some(entry) = self.registry.lookup(name) else {
            return false;
        };
        let Some(flags) = world.flags(target) else {
            return false;
        };
        if flags.contains(entry.descriptor.bit) != entry.positive {
            return false;
        }
        flag_visible(entry.descriptor, flags, &self.privileges(world, observer))
    }

    /// `Type: PLAYER Flags: WIZARD CONNECTED`. Types that are not publicly
    /// listable get the header only.
    pub fn describe<W: World + ?Sized>(&self, world: &W, observer: Dbref, target: Dbref) -> Result<String> {
        let flags = world.flags(target).ok_or(FlagError::NoSuchObject(target))?;
        let object_type = flags.object_type();
        let mut out = format!("Type: {} Flags:", object_type.name());
        if !object_type.info().visibility.is_public() {
            return Ok(out);
        }

        let who = self.privileges(world, observer);
        for entry in self.registry.positive_entries() {
            let d = entry.descriptor;
            if flags.contains(d.bit) && flag_visible(d, flags, &who) {
                out.push(' ');
                out.push_str(entry.name);
            }
        }
        Ok(out)
    }

    /// Commands that recreate `target`'s visible flags, one `@set` per flag.
    pub fn decompile<W: World + ?Sized>(
        &self,
        world: &W,
        observer: Dbref,
        target: Dbref,
        thing_name: &str,
    ) -> Result<Vec<String>> {
        let flags = world.flags(target).ok_or(FlagError::NoSuchObject(target))?;
        let who = self.privileges(world, observer);
        let thing_name = strip_ansi(thing_name);

        Ok(self
            .registry
            .positive_entries()
            .filter(|e| {
                let d = e.descriptor;
                d.visibility.decompilable() && flags.contains(d.bit) && flag_visible(d, flags, &who)
            })
            .map(|e| format!("@set {}={}", thing_name, e.name))
            .collect())
    }

    /// `Flags: ABODE(A) ANSI(X) ... BLEED(!%) ...` for every name the
    /// observer can see.
    pub fn flag_table<W: World + ?Sized>(&self, world: &W, observer: Dbref) -> String {
        let who = self.privileges(world, observer);
        let mut out = String::from("Flags:");
        for entry in self.registry.entries() {
            if !entry.descriptor.visibility.visible_to(&who) {
                continue;
            }
            out.push(' ');
            out.push_str(entry.name);
            out.push('(');
            if !entry.positive {
                out.push('!');
            }
            out.push(entry.descriptor.letter);
            out.push(')');
        }
        out
    }

    /// Name of `target`, with its number and flags when the observer may see them.
    ///
    /// With `obey_myopic`, a MYOPIC observer is treated as unable to examine.
    pub fn unparse_object<W: World + ?Sized>(
        &self,
        world: &W,
        observer: Dbref,
        target: Dbref,
        obey_myopic: bool,
    ) -> String {
        if let Some(special) = target.special_name() {
            return special.to_string();
        }
        let (Some(name), Some(flags)) = (world.name(target), world.flags(target)) else {
            return format!("*ILLEGAL*(#{})", target.0);
        };

        let myopic = obey_myopic && world.flags(observer).is_some_and(|f| f.contains(FlagBit::MYOPIC));
        let examinable = !myopic && world.can_examine(observer, target);
        if examinable || ADVERTISED.iter().any(|bit| flags.contains(*bit)) {
            format!("{}(#{}{})", name, target.0, self.decode(world, observer, flags))
        } else {
            name.to_string()
        }
    }

    /// Parse a flag list for `actor`, reporting any error to them.
    pub fn parse_flag_list<W: World + ?Sized>(&self, world: &mut W, actor: Dbref, text: &str) -> Result<FlagMask> {
        let who = self.privileges(world, actor);
        parse_flag_list(self.registry, &who, text).map_err(|e| {
            world.notify(actor, &e.to_string());
            e
        })
    }
}
