use keymap_cleaner::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> CommandRegistry {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_unknown_command_scenario() {
        let text = r#"[{"key":"ctrl+k","command":"editor.foo"}]"#;
        let diagnostics = validate_document(text, &CommandRegistry::new());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownCommand);
        assert!(diagnostics[0].message.contains("editor.foo"));
        assert_eq!(diagnostics[0].span, TextSpan::new(1, text.len() - 1));
    }

    #[test]
    fn test_invalid_json_scenario() {
        let text = "not valid json";
        let diagnostics = validate_document(text, &registry(&["a"]));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidJson);
        assert_eq!(diagnostics[0].span, TextSpan::whole(text));
        assert!(diagnostics[0].message.starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_invalid_json_range_covers_every_line() {
        let text = "[\n  {\"command\": \"a\"},\n  oops\n]";
        let diagnostics = validate_document(text, &registry(&["a"]));
        let index = LineIndex::new(text);
        let range = diagnostics[0].range(&index);

        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(3, 1));
    }

    #[test]
    fn test_array_with_scalar_is_invalid_json() {
        let diagnostics = validate_document(r#"[{"command":"a"}, 3]"#, &registry(&["a"]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidJson);
    }

    #[test]
    fn test_comments_are_invalid_json() {
        let text = "// my bindings\n[]";
        let diagnostics = validate_document(text, &CommandRegistry::new());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidJson);
    }

    #[test]
    fn test_missing_and_empty_command() {
        let text = r#"[
  { "key": "ctrl+a" },
  { "key": "ctrl+b", "command": "" },
  { "key": "ctrl+c", "command": null }
]"#;
        let diagnostics = validate_document(text, &registry(&["a"]));

        assert_eq!(diagnostics.len(), 3);
        for diagnostic in &diagnostics {
            assert_eq!(diagnostic.kind, DiagnosticKind::MissingCommand);
            assert_eq!(diagnostic.severity, Severity::Error);
            assert_eq!(diagnostic.message, "Missing \"command\" property in keybinding");
        }
        assert_eq!(diagnostics[0].span.slice(text), Some(r#"{ "key": "ctrl+a" }"#));
    }

    #[test]
    fn test_valid_entries_emit_nothing() {
        let text = r#"[
  { "key": "ctrl+a", "command": "editor.a" },
  { "key": "ctrl+b", "command": "-editor.b", "when": "editorFocus" },
  { "key": "ctrl+c", "command": "editor.c", "args": { "text": "}" } }
]"#;
        let diagnostics = validate_document(text, &registry(&["editor.a", "editor.b", "editor.c"]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_diagnostics_in_entry_order() {
        let text = r#"[
  { "command": "zzz" },
  { "key": "x" },
  { "command": "known" },
  { "command": "-aaa" }
]"#;
        let diagnostics = validate_document(text, &registry(&["known"]));
        let kinds: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind).collect();

        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnknownCommand,
                DiagnosticKind::MissingCommand,
                DiagnosticKind::UnknownCommand,
            ]
        );
        assert!(diagnostics[2].message.contains("\"-aaa\""));
        assert_eq!(
            diagnostics[2].related_information[0].message,
            "Command \"aaa\" is not registered"
        );
    }

    #[test]
    fn test_duplicate_commands_get_their_own_spans() {
        let text = r#"[
  { "key": "a", "command": "gone" },
  { "key": "b", "command": "gone" }
]"#;
        let diagnostics = validate_document(text, &CommandRegistry::new());

        assert_eq!(diagnostics.len(), 2);
        assert_ne!(diagnostics[0].span, diagnostics[1].span);
        assert_eq!(
            diagnostics[1].span.slice(text),
            Some(r#"{ "key": "b", "command": "gone" }"#)
        );
    }

    #[test]
    fn test_unlocatable_entries_are_skipped() {
        // Entries that do not come from `text` cannot be mapped by position
        let text = r#"[{"command": "a"}]"#;
        let entries = vec![
            KeybindingEntry::with_command("nowhere"),
            KeybindingEntry::default(),
        ];
        assert!(validate(text, &entries, &CommandRegistry::new()).is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let text = r#"[{"command":"x"},{},{"command":"-y"}]"#;
        let registry = registry(&["y"]);
        assert_eq!(
            validate_document(text, &registry),
            validate_document(text, &registry)
        );
    }
}
