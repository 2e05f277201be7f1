use async_trait::async_trait;
use keymap_cleaner::*;
use serde_json::json;

/// Command source whose listings can each be made to fail
#[derive(Default)]
struct FlakySource {
    active: Option<Vec<String>>,
    all: Option<Vec<String>>,
    manifests: Option<Vec<std::result::Result<ExtensionManifest, RegistryError>>>,
}

fn unavailable(name: &str) -> RegistryError {
    RegistryError::SourceFailed {
        source_name: name.to_string(),
        reason: "host unavailable".to_string(),
    }
}

#[async_trait]
impl CommandSource for FlakySource {
    async fn list_active_commands(&self) -> std::result::Result<Vec<String>, RegistryError> {
        self.active.clone().ok_or_else(|| unavailable("active"))
    }

    async fn list_all_commands(&self) -> std::result::Result<Vec<String>, RegistryError> {
        self.all.clone().ok_or_else(|| unavailable("all"))
    }

    async fn list_installed_extension_manifests(
        &self,
    ) -> std::result::Result<Vec<std::result::Result<ExtensionManifest, RegistryError>>, RegistryError>
    {
        self.manifests.clone().ok_or_else(|| unavailable("manifests"))
    }
}

fn manifest(id: &str, commands: &[&str], keybindings: &[&str]) -> ExtensionManifest {
    ExtensionManifest {
        id: id.to_string(),
        contributed_command_ids: commands.iter().map(|c| c.to_string()).collect(),
        contributed_keybinding_command_ids: keybindings.iter().map(|c| c.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_union_of_all_sources() {
        let source = FlakySource {
            active: Some(vec!["a".into()]),
            all: Some(vec!["a".into(), "lazy".into()]),
            manifests: Some(vec![Ok(manifest("pub.ext", &["ext.cmd"], &["ext.key"]))]),
        };

        let registry = build_registry(&source).await.unwrap();
        assert_eq!(registry.sorted(), vec!["a", "ext.cmd", "ext.key", "lazy"]);
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_skipped() {
        let bad = ExtensionManifest::from_package_json(
            "broken.ext",
            &json!({ "contributes": { "keybindings": 42 } }),
        );
        assert!(bad.is_err());

        let source = FlakySource {
            active: Some(vec![]),
            all: Some(vec![]),
            manifests: Some(vec![bad, Ok(manifest("good.ext", &["good.cmd"], &[]))]),
        };

        let registry = build_registry(&source).await.unwrap();
        assert!(registry.contains("good.cmd"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_single_failing_listing_is_absorbed() {
        let source = FlakySource {
            active: None,
            all: Some(vec!["a".into()]),
            manifests: None,
        };

        let registry = build_registry(&source).await.unwrap();
        assert!(registry.contains("a"));
        assert!(registry.has_host_commands());
    }

    #[tokio::test]
    async fn test_manifests_alone_lack_host_commands() {
        let source = FlakySource {
            active: None,
            all: None,
            manifests: Some(vec![Ok(manifest("pub.ext", &["ext.cmd"], &[]))]),
        };

        let registry = build_registry(&source).await.unwrap();
        assert!(registry.contains("ext.cmd"));
        assert!(!registry.has_host_commands());
    }

    #[tokio::test]
    async fn test_total_failure_is_reported() {
        let result = build_registry(&FlakySource::default()).await;
        assert!(matches!(result, Err(RegistryError::NoSources)));
    }

    #[tokio::test]
    async fn test_registry_reflects_current_host_state() {
        let mut source = StaticCommandSource::with_commands(["a"]);
        let before = build_registry(&source).await.unwrap();

        source.all.push("late.registered".to_string());
        let after = build_registry(&source).await.unwrap();

        assert!(!before.contains("late.registered"));
        assert!(after.contains("late.registered"));
    }

    #[test]
    fn test_manifest_single_object_sections() {
        let package = json!({
            "name": "ext",
            "publisher": "me",
            "contributes": {
                "commands": { "command": "me.one", "title": "One" },
                "keybindings": [{ "command": "me.two", "key": "ctrl+2" }, { "key": "ctrl+3" }]
            }
        });
        let manifest = ExtensionManifest::from_package_json("me.ext", &package).unwrap();

        assert_eq!(manifest.command_ids().collect::<Vec<_>>(), vec!["me.one", "me.two"]);
    }

    #[test]
    fn test_registry_ignores_empty_ids() {
        let mut registry = CommandRegistry::new();
        assert!(!registry.insert(""));
        assert!(registry.insert("x"));
        assert!(!registry.insert("x"));
        assert_eq!(registry.len(), 1);
    }
}
