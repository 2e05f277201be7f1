//! Property-based tests for validation, location and cleaning

use keymap_cleaner::{
    clean, locate, validate, CommandRegistry, DiagnosticKind, KeybindingEntry, Severity,
};
use proptest::prelude::*;

/// Strategy for generating command ids such as `editor.action.foo`
fn command_id_strategy() -> impl Strategy<Value = String> {
    r"[a-z]{1,8}(\.[a-zA-Z]{1,8}){0,3}"
}

/// Strategy for generating registries
fn registry_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(command_id_strategy(), 0..8)
}

/// Strategy for generating entries with an absent or empty command
fn commandless_entry_strategy() -> impl Strategy<Value = KeybindingEntry> {
    (
        prop::option::of(r"(ctrl|alt|shift)\+[a-z]"),
        prop::option::of(Just(String::new())),
        prop::option::of(r"[a-zA-Z]{1,10}"),
    )
        .prop_map(|(key, command, when)| KeybindingEntry {
            key,
            command,
            when,
            ..Default::default()
        })
}

/// Strategy for generating entries whose command may or may not be registered
fn entry_strategy() -> impl Strategy<Value = KeybindingEntry> {
    prop_oneof![
        commandless_entry_strategy(),
        command_id_strategy().prop_map(|id| KeybindingEntry::new("ctrl+k", id)),
        command_id_strategy().prop_map(|id| KeybindingEntry::new("ctrl+k", format!("-{}", id))),
    ]
}

fn document(entries: &[KeybindingEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap()
}

proptest! {
    /// Property: an entry without a usable command yields exactly one
    /// missing-command error, whatever the registry holds
    #[test]
    fn prop_missing_command(entry in commandless_entry_strategy(), ids in registry_strategy()) {
        let registry: CommandRegistry = ids.into_iter().collect();
        let entries = vec![entry];
        let diagnostics = validate(&document(&entries), &entries, &registry);

        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingCommand);
        prop_assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    /// Property: unbinding a registered command is valid
    #[test]
    fn prop_unbind_of_registered_command(id in command_id_strategy(), ids in registry_strategy()) {
        let mut registry: CommandRegistry = ids.into_iter().collect();
        registry.insert(id.clone());
        let entries = vec![KeybindingEntry::new("ctrl+k", format!("-{}", id))];

        prop_assert!(validate(&document(&entries), &entries, &registry).is_empty());
    }

    /// Property: an unregistered command yields one unknown-command warning
    /// naming it
    #[test]
    fn prop_unknown_command(id in command_id_strategy(), ids in registry_strategy()) {
        prop_assume!(!ids.contains(&id));
        let registry: CommandRegistry = ids.into_iter().collect();
        let entries = vec![KeybindingEntry::new("ctrl+k", id.clone())];
        let diagnostics = validate(&document(&entries), &entries, &registry);

        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownCommand);
        prop_assert_eq!(diagnostics[0].severity, Severity::Warning);
        prop_assert!(diagnostics[0].message.contains(&id));
    }

    /// Property: validation is deterministic and reports in entry order
    #[test]
    fn prop_validation_is_idempotent(
        entries in prop::collection::vec(entry_strategy(), 0..10),
        ids in registry_strategy(),
    ) {
        let registry: CommandRegistry = ids.into_iter().collect();
        let text = document(&entries);
        let first = validate(&text, &entries, &registry);
        let second = validate(&text, &entries, &registry);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|pair| pair[0].span.start < pair[1].span.start));
    }

    /// Property: cleaning twice equals cleaning once
    #[test]
    fn prop_clean_is_idempotent(
        entries in prop::collection::vec(entry_strategy(), 0..10),
        ids in registry_strategy(),
    ) {
        let registry: CommandRegistry = ids.into_iter().collect();
        let once = clean(&entries, &registry);
        let twice = clean(&once, &registry);

        prop_assert_eq!(once, twice);
    }

    /// Property: cleaning an all-valid sequence changes nothing
    #[test]
    fn prop_clean_preserves_valid_entries(ids in prop::collection::vec(command_id_strategy(), 0..10)) {
        let registry: CommandRegistry = ids.iter().cloned().collect();
        let entries: Vec<KeybindingEntry> = ids
            .iter()
            .map(|id| KeybindingEntry::new("ctrl+k", id.clone()))
            .collect();

        prop_assert_eq!(clean(&entries, &registry), entries);
    }

    /// Property: a located span re-parses as the object holding the command
    #[test]
    fn prop_locate_recovers_object(id in command_id_strategy(), key in r"[a-z]{1,5}") {
        let text = format!(
            "[\n  {{ \"key\": \"{}\", \"command\": \"{}\" }}\n]",
            key, id
        );
        let span = locate(&text, &KeybindingEntry::with_command(id.clone())).unwrap();
        let object: serde_json::Value = serde_json::from_str(span.slice(&text).unwrap()).unwrap();

        prop_assert!(object.is_object());
        prop_assert_eq!(object["command"].as_str(), Some(id.as_str()));
    }
}
