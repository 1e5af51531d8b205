//! Property-based tests for the flag engine

mod common;

use common::cast;
use objflags::catalog::builtin_descriptors;
use objflags::{
    canonical_flag_name, flag_visible, Access, FlagBit, FlagConfig, FlagDescriptor, FlagEngine,
    FlagError, FlagRegistry, FlagSet, ObjectType, Privileges, MAX_FLAG_NAME_LEN,
};
use proptest::prelude::*;

fn descriptors_where(keep: impl Fn(&FlagDescriptor) -> bool) -> Vec<FlagDescriptor> {
    builtin_descriptors().into_iter().filter(|d| keep(d)).collect()
}

fn name_of(registry: &FlagRegistry, bit: FlagBit) -> &'static str {
    registry
        .positive_entries()
        .find(|e| e.descriptor.bit == bit)
        .map(|e| e.name)
        .unwrap()
}

fn flags_with(object_type: ObjectType, bits: &[FlagBit]) -> FlagSet {
    let mut flags = FlagSet::new(object_type);
    for bit in bits {
        flags.insert(*bit);
    }
    flags
}

fn thing_with(bits: &[FlagBit]) -> FlagSet {
    flags_with(ObjectType::Thing, bits)
}

/// Keep only the bits `observer` can see.
fn visible_projection(registry: &FlagRegistry, flags: &FlagSet, observer: &Privileges) -> FlagSet {
    let mut out = FlagSet::EMPTY;
    for entry in registry.positive_entries() {
        let d = entry.descriptor;
        if flags.contains(d.bit) && flag_visible(d, flags, observer) {
            out.insert(d.bit);
        }
    }
    out
}

fn all_bits() -> Vec<FlagBit> {
    builtin_descriptors().into_iter().map(|d| d.bit).collect()
}

// === Denial Leaves State Unchanged ===

proptest! {
    #[test]
    fn test_denied_changes_leave_flags_untouched(
        index in any::<prop::sample::Index>(),
        initial in prop::sample::subsequence(all_bits(), 0..8),
        clear in any::<bool>(),
    ) {
        let guarded = descriptors_where(|d| {
            matches!(d.access, Access::God | Access::Wizard | Access::Royalty)
        });
        let descriptor = index.get(&guarded);

        let mut c = cast();
        let target = c.world.create("Target", ObjectType::Thing, c.god);
        c.world.object_mut(target).unwrap().flags = thing_with(&initial);
        let before = c.world.flags_of(target);

        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);
        let name = name_of(&registry, descriptor.bit);
        let command = if clear { format!("!{}", name) } else { name.to_string() };

        let out = engine.set_flags(&mut c.world, target, c.mortal, &command, false);
        prop_assert_eq!(&out[0].result, &Err(FlagError::PermissionDenied));
        prop_assert_eq!(c.world.flags_of(target), before);
        prop_assert_eq!(c.world.messages_for(c.mortal), vec!["Permission denied."]);
    }
}

// === Round Trips ===

proptest! {
    #[test]
    fn test_decode_then_parse_recovers_visible_flags(
        object_type in prop::sample::select(ObjectType::ALL.to_vec()),
        bits in prop::sample::subsequence(all_bits(), 0..12),
        as_god in any::<bool>(),
    ) {
        let mut c = cast();
        let target = c.world.create("Target", ObjectType::Thing, c.wizard);
        let flags = flags_with(object_type, &bits);
        c.world.object_mut(target).unwrap().flags = flags;

        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);
        let observer = if as_god { c.god } else { c.wizard };
        let who = Privileges::of(&c.world, observer, config.god);

        let text = engine.decode(&c.world, observer, &flags);
        let mask = engine.parse_flag_list(&mut c.world, observer, &text).unwrap();
        let expected_type = object_type
            .display_letter()
            .filter(|_| object_type.info().visibility.visible_to(&who))
            .map(|_| object_type);
        prop_assert_eq!(mask.object_type, expected_type);
        prop_assert_eq!(mask.flags, visible_projection(&registry, &flags, &who));
    }

    #[test]
    fn test_decompile_replay_reproduces_flags(
        bits in prop::sample::subsequence(all_bits(), 0..12),
    ) {
        let mut c = cast();
        let original = c.world.create("Original", ObjectType::Thing, c.god);
        c.world.object_mut(original).unwrap().flags = thing_with(&bits);
        let copy = c.world.create("Copy", ObjectType::Thing, c.god);

        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);

        let lines = engine.decompile(&c.world, c.god, original, "Original").unwrap();
        for line in &lines {
            let (_, flag) = line.split_once('=').unwrap();
            let out = engine.set_flags(&mut c.world, copy, c.god, flag, true);
            prop_assert!(out[0].result.is_ok(), "{} failed: {:?}", line, out[0]);
        }

        let replayed = engine.decompile(&c.world, c.god, copy, "Original").unwrap();
        prop_assert_eq!(replayed, lines);
    }
}

// === Idempotence ===

proptest! {
    #[test]
    fn test_repeating_a_change_is_idempotent(
        index in any::<prop::sample::Index>(),
        initial in prop::sample::subsequence(all_bits(), 0..8),
        clear in any::<bool>(),
    ) {
        let open = descriptors_where(|d| d.access == Access::Any);
        let descriptor = index.get(&open);

        let mut c = cast();
        c.world.object_mut(c.widget).unwrap().flags = thing_with(&initial);
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);
        let name = name_of(&registry, descriptor.bit);
        let command = if clear { format!("!{}", name) } else { name.to_string() };

        engine.set_flags(&mut c.world, c.widget, c.mortal, &command, true);
        let once = c.world.flags_of(c.widget);
        engine.set_flags(&mut c.world, c.widget, c.mortal, &command, true);
        prop_assert_eq!(c.world.flags_of(c.widget), once);
        prop_assert_eq!(once.contains(descriptor.bit), !clear);
    }
}

// === Canonicalization ===

proptest! {
    #[test]
    fn test_lookup_ignores_case_and_padding(
        index in any::<prop::sample::Index>(),
        upper in prop::collection::vec(any::<bool>(), 16),
        left in "[ \t]{0,3}",
        right in "[ \t]{0,3}",
    ) {
        let registry = FlagRegistry::builtin();
        let entries: Vec<_> = registry.entries().collect();
        let entry = index.get(&entries);

        let mixed: String = entry
            .name
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if upper[i % upper.len()] {
                    ch.to_ascii_uppercase()
                } else {
                    ch.to_ascii_lowercase()
                }
            })
            .collect();
        let raw = format!("{}{}{}", left, mixed, right);

        let found = registry.lookup(&raw).unwrap();
        prop_assert_eq!(found.name, entry.name);
        prop_assert_eq!(found.positive, entry.positive);
    }

    #[test]
    fn test_overlong_names_never_match(name in "[a-z_]{64,120}") {
        prop_assert!(canonical_flag_name(&name).is_none());
        let registry = FlagRegistry::builtin();
        prop_assert!(registry.lookup(&name).is_none());

        // Even when it starts with a real flag name
        let padded = format!("wizard{}", &name[..MAX_FLAG_NAME_LEN - 5]);
        prop_assert!(registry.lookup(&padded).is_none());
    }
}

// === Negative Aliases ===

proptest! {
    #[test]
    fn test_alias_matches_negated_name(
        pair in prop::sample::select(vec![
            ("BLEED", "NOBLEED"),
            ("COMMANDS", "NO_COMMAND"),
            ("SPOOF", "NOSPOOF"),
        ]),
        initially_set in any::<bool>(),
        via_alias_negated in any::<bool>(),
    ) {
        let (alias, name) = pair;
        let registry = FlagRegistry::builtin();
        let config = FlagConfig::default();
        let engine = FlagEngine::new(&registry, &config);
        let bit = registry.lookup(name).unwrap().descriptor.bit;

        let mut negated = cast();
        let mut aliased = cast();
        if initially_set {
            negated.world.set_flag(negated.widget, bit);
            aliased.world.set_flag(aliased.widget, bit);
        }

        // "!NAME" vs "ALIAS", and "NAME" vs "!ALIAS"
        let (name_cmd, alias_cmd) = if via_alias_negated {
            (name.to_string(), format!("!{}", alias))
        } else {
            (format!("!{}", name), alias.to_string())
        };
        engine.set_flags(&mut negated.world, negated.widget, negated.mortal, &name_cmd, false);
        engine.set_flags(&mut aliased.world, aliased.widget, aliased.mortal, &alias_cmd, false);

        prop_assert_eq!(
            negated.world.flags_of(negated.widget),
            aliased.world.flags_of(aliased.widget)
        );
        prop_assert_eq!(aliased.world.flags_of(aliased.widget).contains(bit), via_alias_negated);
    }
}
