//! Flag mutation engine.
//!
//! Each token of a flag command is resolved, authorized, and applied on its
//! own. A failing token is reported and does not undo or stop the others.

use crate::access::FlagRequest;
use crate::error::{FlagError, Result, PERMISSION_DENIED};
use crate::parse::{tokenize_flag_command, FlagToken};
use crate::{Dbref, FlagBit, FlagConfig, FlagRegistry, World};

/// The sense a token asked for, as reported back to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagChange {
    Set,
    Cleared,
}

impl FlagChange {
    pub fn message(self) -> &'static str {
        match self {
            FlagChange::Set => "Set.",
            FlagChange::Cleared => "Cleared.",
        }
    }
}

/// Result of one token of a flag command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOutcome {
    /// Flag name as typed
    pub token: String,
    pub result: Result<FlagChange>,
}

/// Runs flag commands and queries against a registry and configuration.
#[derive(Debug, Clone, Copy)]
pub struct FlagEngine<'a> {
    pub(crate) registry: &'a FlagRegistry,
    pub(crate) config: &'a FlagConfig,
}

impl<'a> FlagEngine<'a> {
    pub fn new(registry: &'a FlagRegistry, config: &'a FlagConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'a FlagRegistry {
        self.registry
    }

    pub fn config(&self) -> &'a FlagConfig {
        self.config
    }

    /// Set or clear each flag named in `command` on `target`.
    ///
    /// Feedback goes to `actor` through the world. "Set."/"Cleared." is
    /// suppressed when `quiet` is true or the actor is QUIET.
    pub fn set_flags<W: World + ?Sized>(
        &self,
        world: &mut W,
        target: Dbref,
        actor: Dbref,
        command: &str,
        quiet: bool,
    ) -> Vec<FlagOutcome> {
        tokenize_flag_command(command)
            .into_iter()
            .map(|token| {
                let result = self.set_one(world, target, actor, token, quiet);
                FlagOutcome {
                    token: token.name.to_string(),
                    result,
                }
            })
            .collect()
    }

    fn set_one<W: World + ?Sized>(
        &self,
        world: &mut W,
        target: Dbref,
        actor: Dbref,
        token: FlagToken<'_>,
        quiet: bool,
    ) -> Result<FlagChange> {
        let resolved = if token.name.is_empty() {
            Err(FlagError::MissingFlagName {
                clearing: token.negate,
            })
        } else {
            self.registry.lookup(token.name).ok_or(FlagError::UnknownFlag)
        };
        let entry = match resolved {
            Ok(entry) => entry,
            Err(e) => {
                world.notify(actor, &e.to_string());
                return Err(e);
            }
        };

        let descriptor = *entry.descriptor;
        let request = FlagRequest {
            target,
            actor,
            bit: descriptor.bit,
            // Naming a negative alias flips the sense.
            clear: token.negate != !entry.positive,
        };
        let change = if token.negate {
            FlagChange::Cleared
        } else {
            FlagChange::Set
        };

        match descriptor.access.invoke(world, self.config, &request) {
            Ok(()) => {
                let actor_quiet = world.flags(actor).is_some_and(|f| f.contains(FlagBit::QUIET));
                if !quiet && !actor_quiet {
                    world.notify(actor, change.message());
                }
                Ok(change)
            }
            Err(e) => {
                tracing::debug!(
                    "{} denied {} {} on {}: {:?}",
                    actor,
                    if request.clear { "clearing" } else { "setting" },
                    entry.name,
                    target,
                    e
                );
                // The God refusal is explained first, then reported like any
                // other denial, so the actor sees two lines.
                if e == FlagError::CannotMakeGodMortal {
                    world.notify(actor, &e.to_string());
                }
                if e.is_denial() {
                    world.notify(actor, PERMISSION_DENIED);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryWorld, ObjectType};

    fn setup() -> (MemoryWorld, Dbref, Dbref) {
        let mut world = MemoryWorld::new();
        let _limbo = world.create("Limbo", ObjectType::Room, Dbref(1));
        let _god = world.create_player("One");
        let player = world.create_player("Alice");
        let thing = world.create("Widget", ObjectType::Thing, player);
        (world, player, thing)
    }

    #[test]
    fn set_and_clear_feedback() {
        let (mut world, player, thing) = setup();
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        let out = engine.set_flags(&mut world, thing, player, "safe !sticky", false);
        assert_eq!(out[0].result, Ok(FlagChange::Set));
        assert_eq!(out[1].result, Ok(FlagChange::Cleared));
        assert_eq!(world.messages_for(player), vec!["Set.", "Cleared."]);
        assert!(world.flags_of(thing).contains(FlagBit::SAFE));
    }

    #[test]
    fn failures_do_not_stop_later_tokens() {
        let (mut world, player, thing) = setup();
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        let out = engine.set_flags(&mut world, thing, player, "bogus wizard haven", false);
        assert_eq!(out[0].result, Err(FlagError::UnknownFlag));
        assert_eq!(out[1].result, Err(FlagError::PermissionDenied));
        assert_eq!(out[2].result, Ok(FlagChange::Set));
        assert_eq!(
            world.messages_for(player),
            vec!["I do not understand that flag.", "Permission denied.", "Set."]
        );
    }

    #[test]
    fn negative_alias_reports_requested_sense() {
        let (mut world, player, thing) = setup();
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        world.set_flag(thing, FlagBit::NOSPOOF);
        let out = engine.set_flags(&mut world, thing, player, "spoof", false);
        assert_eq!(out[0].result, Ok(FlagChange::Set));
        assert!(!world.flags_of(thing).contains(FlagBit::NOSPOOF));
    }

    #[test]
    fn quiet_suppresses_success_only() {
        let (mut world, player, thing) = setup();
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        engine.set_flags(&mut world, thing, player, "safe", true);
        assert!(world.messages_for(player).is_empty());

        world.set_flag(player, FlagBit::QUIET);
        engine.set_flags(&mut world, thing, player, "haven gagged", false);
        assert_eq!(world.messages_for(player), vec!["Permission denied."]);
    }

    #[test]
    fn god_refusal_is_explained_then_denied() {
        let (mut world, player, _thing) = setup();
        let god = Dbref(1);
        world.set_flag(god, FlagBit::WIZARD);
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        let out = engine.set_flags(&mut world, god, god, "!wizard safe", false);
        assert!(out[0].result.as_ref().unwrap_err().is_denial());
        assert_eq!(
            world.messages_for(god),
            vec!["You cannot make God mortal.", "Permission denied.", "Set."]
        );
        assert!(world.messages_for(player).is_empty());
    }

    #[test]
    fn missing_names() {
        let (mut world, player, thing) = setup();
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        let out = engine.set_flags(&mut world, thing, player, "safe !", false);
        assert_eq!(out[1].result, Err(FlagError::MissingFlagName { clearing: true }));
        let out = engine.set_flags(&mut world, thing, player, "", false);
        assert_eq!(out[0].result, Err(FlagError::MissingFlagName { clearing: false }));
    }
}
