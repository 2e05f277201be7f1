//! Command registry aggregated from the host's command sources
//!
//! A registry is built fresh for every validation pass. Commands come from
//! the host's live command lists and from the static manifests of installed
//! extensions; presence in any one source makes an id valid.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::models::effective_command_id;

/// Set of command identifiers the host currently recognizes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: HashSet<String>,
    host_listed: bool,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command id. Empty ids are ignored.
    pub fn insert(&mut self, command: impl Into<String>) -> bool {
        let command = command.into();
        if command.is_empty() {
            return false;
        }
        self.commands.insert(command)
    }

    /// Exact, case-sensitive lookup of a command id
    pub fn contains(&self, command_id: &str) -> bool {
        self.commands.contains(command_id)
    }

    /// Lookup of a command reference as written in a keybinding, so
    /// `-foo` resolves against `foo`
    pub fn resolves(&self, command_ref: &str) -> bool {
        self.contains(effective_command_id(command_ref))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    /// All ids in lexical order
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.iter().collect();
        ids.sort_unstable();
        ids
    }

    /// Whether at least one of the host's command lists went into this
    /// registry. Without one, built-in commands are missing and every
    /// binding to them looks unknown.
    pub fn has_host_commands(&self) -> bool {
        self.host_listed
    }

    /// Mark the registry as holding a host command list
    pub fn with_host_commands(mut self) -> Self {
        self.host_listed = true;
        self
    }
}

impl<S: Into<String>> Extend<S> for CommandRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for command in iter {
            self.insert(command);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = CommandRegistry::new();
        registry.extend(iter);
        registry
    }
}

/// Commands an installed extension declares statically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub contributed_command_ids: Vec<String>,
    pub contributed_keybinding_command_ids: Vec<String>,
}

impl ExtensionManifest {
    /// Read the `contributes` section of an extension's `package.json`.
    ///
    /// `contributes.commands` and `contributes.keybindings` may each be an
    /// array or a single object. A section of any other type makes the whole
    /// manifest malformed.
    pub fn from_package_json(id: impl Into<String>, package: &Value) -> Result<Self, RegistryError> {
        let id = id.into();

        let contributes = match package.get("contributes") {
            None | Some(Value::Null) => {
                return Ok(ExtensionManifest {
                    id,
                    ..Default::default()
                })
            }
            Some(Value::Object(contributes)) => contributes,
            Some(_) => return Err(malformed(&id, "`contributes` is not an object")),
        };

        let contributed_command_ids = contributed_ids(&id, contributes.get("commands"), "commands")?;
        let contributed_keybinding_command_ids =
            contributed_ids(&id, contributes.get("keybindings"), "keybindings")?;

        Ok(ExtensionManifest {
            id,
            contributed_command_ids,
            contributed_keybinding_command_ids,
        })
    }

    /// Extension id (`publisher.name`) as declared in `package.json`
    pub fn extension_id(package: &Value) -> Option<String> {
        let name = package.get("name")?.as_str()?;
        match package.get("publisher").and_then(Value::as_str) {
            Some(publisher) => Some(format!("{}.{}", publisher, name)),
            None => Some(name.to_string()),
        }
    }

    /// Every command id the manifest mentions
    pub fn command_ids(&self) -> impl Iterator<Item = &str> {
        self.contributed_command_ids
            .iter()
            .chain(&self.contributed_keybinding_command_ids)
            .map(String::as_str)
    }
}

fn contributed_ids(
    id: &str,
    section: Option<&Value>,
    name: &str,
) -> Result<Vec<String>, RegistryError> {
    let items: Vec<&Value> = match section {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single @ Value::Object(_)) => vec![single],
        Some(_) => {
            return Err(malformed(
                id,
                &format!("`contributes.{}` is neither an array nor an object", name),
            ))
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| item.get("command").and_then(Value::as_str))
        .filter(|command| !command.is_empty())
        .map(str::to_string)
        .collect())
}

fn malformed(id: &str, reason: &str) -> RegistryError {
    RegistryError::MalformedManifest {
        extension: id.to_string(),
        reason: reason.to_string(),
    }
}

/// Host interface for listing known commands
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Commands currently callable
    async fn list_active_commands(&self) -> Result<Vec<String>, RegistryError>;

    /// All commands, including inactive and lazily registered ones
    async fn list_all_commands(&self) -> Result<Vec<String>, RegistryError>;

    /// Static manifests of installed extensions. Each manifest is read
    /// independently; one malformed manifest does not fail the listing.
    async fn list_installed_extension_manifests(
        &self,
    ) -> Result<Vec<Result<ExtensionManifest, RegistryError>>, RegistryError>;
}

/// Build a registry from every source the host offers.
///
/// Failing sources and malformed manifests are skipped. The call only fails
/// when none of the three host listings could be read at all. The result
/// records whether either host command list was among them.
pub async fn build_registry(source: &dyn CommandSource) -> Result<CommandRegistry, RegistryError> {
    let listings = vec![
        ("active commands", source.list_active_commands().await),
        ("all commands", source.list_all_commands().await),
    ];

    let (mut registry, mut readable) = listings.into_iter().fold(
        (CommandRegistry::new(), 0usize),
        |(mut registry, readable), (name, listing)| match listing {
            Ok(ids) => {
                debug!("Read {} ids from {}", ids.len(), name);
                registry.extend(ids);
                (registry.with_host_commands(), readable + 1)
            }
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                (registry, readable)
            }
        },
    );

    match source.list_installed_extension_manifests().await {
        Ok(manifests) => {
            readable += 1;
            let skipped = manifests
                .into_iter()
                .fold(0usize, |skipped, manifest| match manifest {
                    Ok(manifest) => {
                        registry.extend(manifest.command_ids());
                        skipped
                    }
                    Err(e) => {
                        debug!("Ignoring extension metadata: {}", e);
                        skipped + 1
                    }
                });
            if skipped > 0 {
                debug!("Ignored {} malformed extension manifests", skipped);
            }
        }
        Err(e) => warn!("Skipping extension manifests: {}", e),
    }

    if readable == 0 {
        return Err(RegistryError::NoSources);
    }
    if !registry.has_host_commands() {
        warn!("No host command list was read; only extension commands are known");
    }

    debug!("Command registry holds {} ids", registry.len());
    Ok(registry)
}

/// In-memory command source, for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCommandSource {
    pub active: Vec<String>,
    pub all: Vec<String>,
    pub manifests: Vec<Result<ExtensionManifest, RegistryError>>,
}

impl StaticCommandSource {
    /// A source whose active and full command lists are both `commands`
    pub fn with_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands: Vec<String> = commands.into_iter().map(Into::into).collect();
        StaticCommandSource {
            active: commands.clone(),
            all: commands,
            manifests: Vec::new(),
        }
    }
}

#[async_trait]
impl CommandSource for StaticCommandSource {
    async fn list_active_commands(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.active.clone())
    }

    async fn list_all_commands(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.all.clone())
    }

    async fn list_installed_extension_manifests(
        &self,
    ) -> Result<Vec<Result<ExtensionManifest, RegistryError>>, RegistryError> {
        Ok(self.manifests.clone())
    }
}
