//! Per-flag access policies.
//!
//! Each flag carries one `Access` kind. Invoking it decides whether the actor
//! may change the bit on the target and, if so, makes the change. Every
//! policy ends in the open policy, which is the only place a bit is written.

use serde::{Deserialize, Serialize};

use crate::error::{FlagError, Result};
use crate::{Dbref, FlagBit, FlagConfig, ObjectType, Power, Privileges, World};

/// Sent when a GOING object is rescued.
pub const SPARED_MESSAGE: &str = "Your object has been spared from destruction.";

/// Access policy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Anyone
    Any,
    /// Only God
    God,
    /// Wizards or God
    Wizard,
    /// Royalty, wizards, or God
    Royalty,
    /// Staff (or above) or God
    Staff,
    /// On players only wizards; on anything else anyone
    RestrictPlayer,
    /// Self-owned players holding the flag may pass it to non-players
    Privileged,
    /// Actor must inherit
    Inherit,
    /// DARK: players may only hide themselves with the hide power
    Dark,
    /// GOING: rescue before destruction, otherwise God only
    Going,
    /// Flags that affect whether the object hears
    Hearing,
    /// Anything but players
    NonPlayer,
}

/// One bit change requested on one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRequest {
    pub target: Dbref,
    pub actor: Dbref,
    pub bit: FlagBit,
    /// Clear rather than set
    pub clear: bool,
}

impl Access {
    /// Parse a policy name from a configuration directive.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name {
            "any" => Some(Access::Any),
            "royalty" => Some(Access::Royalty),
            "wizard" => Some(Access::Wizard),
            "god" => Some(Access::God),
            "restrict_player" => Some(Access::RestrictPlayer),
            "privileged" => Some(Access::Privileged),
            "staff" => Some(Access::Staff),
            _ => None,
        }
    }

    pub fn config_name(self) -> &'static str {
        match self {
            Access::Any => "any",
            Access::God => "god",
            Access::Wizard => "wizard",
            Access::Royalty => "royalty",
            Access::Staff => "staff",
            Access::RestrictPlayer => "restrict_player",
            Access::Privileged => "privileged",
            Access::Inherit => "inherit",
            Access::Dark => "dark",
            Access::Going => "going",
            Access::Hearing => "hearing",
            Access::NonPlayer => "non_player",
        }
    }

    /// Whether a flag currently using this policy may be given another one.
    pub fn is_reassignable(self) -> bool {
        matches!(
            self,
            Access::Any
                | Access::Royalty
                | Access::Wizard
                | Access::God
                | Access::RestrictPlayer
                | Access::Privileged
        )
    }

    /// Check the policy and apply the change if it passes.
    pub fn invoke<W: World + ?Sized>(
        self,
        world: &mut W,
        config: &FlagConfig,
        request: &FlagRequest,
    ) -> Result<()> {
        let actor = Privileges::of(world, request.actor, config.god);
        match self {
            Access::Any => apply_bit(world, config, request),
            Access::God => {
                require(actor.god)?;
                apply_bit(world, config, request)
            }
            Access::Wizard => {
                require(actor.elevated())?;
                apply_bit(world, config, request)
            }
            Access::Royalty => {
                require(actor.role_or_above())?;
                apply_bit(world, config, request)
            }
            Access::Staff => {
                require(actor.staff || actor.god)?;
                apply_bit(world, config, request)
            }
            Access::Inherit => {
                require(actor.inherits)?;
                apply_bit(world, config, request)
            }
            Access::RestrictPlayer => {
                if is_player(world, request.target) {
                    require(actor.elevated())?;
                }
                apply_bit(world, config, request)
            }
            Access::NonPlayer => {
                require(!is_player(world, request.target))?;
                apply_bit(world, config, request)
            }
            Access::Privileged => privileged(world, config, request, &actor),
            Access::Dark => dark(world, config, request, &actor),
            Access::Going => going(world, config, request, &actor),
            Access::Hearing => hearing(world, config, request),
        }
    }
}

fn require(allowed: bool) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(FlagError::PermissionDenied)
    }
}

fn is_player<W: World + ?Sized>(world: &W, obj: Dbref) -> bool {
    world.flags(obj).is_some_and(|f| f.is_player())
}

/// The open policy. God never loses the WIZARD bit, whoever asks.
fn apply_bit<W: World + ?Sized>(world: &mut W, config: &FlagConfig, request: &FlagRequest) -> Result<()> {
    if request.clear && request.bit == FlagBit::WIZARD && request.target == config.god {
        return Err(FlagError::CannotMakeGodMortal);
    }
    let flags = world
        .flags_mut(request.target)
        .ok_or(FlagError::NoSuchObject(request.target))?;
    flags.set(request.bit, !request.clear);
    tracing::trace!(
        "{} {:?} on {} by {}",
        if request.clear { "Cleared" } else { "Set" },
        request.bit,
        request.target,
        request.actor
    );
    Ok(())
}

fn privileged<W: World + ?Sized>(
    world: &mut W,
    config: &FlagConfig,
    request: &FlagRequest,
    actor: &Privileges,
) -> Result<()> {
    if !actor.god {
        let holds_bit = world
            .flags(request.actor)
            .is_some_and(|f| f.contains(request.bit));
        require(
            is_player(world, request.actor)
                && world.owner(request.actor) == request.actor
                && !is_player(world, request.target)
                && holds_bit,
        )?;
    }
    apply_bit(world, config, request)
}

fn dark<W: World + ?Sized>(
    world: &mut W,
    config: &FlagConfig,
    request: &FlagRequest,
    actor: &Privileges,
) -> Result<()> {
    let hiding_self =
        request.target == request.actor && world.has_power(request.actor, Power::Hide);
    if !request.clear && is_player(world, request.target) && !hiding_self {
        require(actor.elevated())?;
    }
    apply_bit(world, config, request)
}

fn going<W: World + ?Sized>(
    world: &mut W,
    config: &FlagConfig,
    request: &FlagRequest,
    actor: &Privileges,
) -> Result<()> {
    let flags = world
        .flags(request.target)
        .copied()
        .ok_or(FlagError::NoSuchObject(request.target))?;

    // Anyone allowed to touch the object may pull it back before it is garbage.
    if request.clear
        && flags.contains(FlagBit::GOING)
        && flags.object_type() != ObjectType::Garbage
    {
        world.notify(request.actor, SPARED_MESSAGE);
        return apply_bit(world, config, request);
    }

    require(actor.god)?;
    if !request.clear && config.is_protected(request.target) {
        return Err(FlagError::ProtectedObject(request.target));
    }
    apply_bit(world, config, request)
}

fn hearing<W: World + ?Sized>(world: &mut W, config: &FlagConfig, request: &FlagRequest) -> Result<()> {
    if request.bit == FlagBit::MONITOR && is_player(world, request.target) {
        require(world.has_power(request.actor, Power::Monitor))?;
    }

    let could_hear = world.hears(request.target);
    apply_bit(world, config, request)?;
    let can_hear = world.hears(request.target);
    if could_hear != can_hear {
        world.ears_changed(request.target, could_hear, can_hear);
    }
    Ok(())
}
