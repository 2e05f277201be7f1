//! Filesystem host: command sources and document editing backed by files
//!
//! Outside a running editor the command lists come from a JSON snapshot
//! exported from the editor, and extension manifests are read from the
//! extension directories on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use keymap_cleaner::{
    apply_edit, CommandSource, DocumentEditor, ExtensionManifest, HostError, RegistryError,
    TextEdit,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

const SNAPSHOT_SOURCE: &str = "command snapshot";
const EXTENSIONS_SOURCE: &str = "extensions";
const MANIFEST_FILE: &str = "package.json";

/// Contents of a command snapshot file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommandSnapshot {
    /// A single list used for both active and all commands
    Flat(Vec<String>),
    Lists {
        #[serde(default)]
        active: Vec<String>,
        #[serde(default)]
        all: Vec<String>,
    },
}

impl CommandSnapshot {
    pub fn active(&self) -> &[String] {
        match self {
            CommandSnapshot::Flat(commands) => commands,
            CommandSnapshot::Lists { active, .. } => active,
        }
    }

    pub fn all(&self) -> &[String] {
        match self {
            CommandSnapshot::Flat(commands) => commands,
            CommandSnapshot::Lists { all, .. } => all,
        }
    }
}

/// Command source reading a snapshot file and extension directories.
///
/// Nothing is cached; every call reads the files again.
#[derive(Debug, Clone, Default)]
pub struct FsCommandSource {
    commands_file: Option<PathBuf>,
    extensions_dirs: Vec<PathBuf>,
}

impl FsCommandSource {
    pub fn new(commands_file: Option<PathBuf>, extensions_dirs: Vec<PathBuf>) -> Self {
        Self {
            commands_file,
            extensions_dirs,
        }
    }

    async fn snapshot(&self) -> Result<CommandSnapshot, RegistryError> {
        let path = self
            .commands_file
            .as_ref()
            .ok_or_else(|| source_failed(SNAPSHOT_SOURCE, "no commands file configured"))?;

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| source_failed(SNAPSHOT_SOURCE, &format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| source_failed(SNAPSHOT_SOURCE, &format!("{}: {}", path.display(), e)))
    }

    async fn read_extensions_dir(
        dir: &Path,
        manifests: &mut Vec<Result<ExtensionManifest, RegistryError>>,
    ) -> std::io::Result<()> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let manifest_path = entry.path().join(MANIFEST_FILE);
            let is_file = tokio::fs::metadata(&manifest_path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            let fallback_id = entry.file_name().to_string_lossy().to_string();
            manifests.push(read_manifest(&manifest_path, fallback_id).await);
        }
        Ok(())
    }
}

async fn read_manifest(path: &Path, fallback_id: String) -> Result<ExtensionManifest, RegistryError> {
    let malformed = |reason: String| RegistryError::MalformedManifest {
        extension: fallback_id.clone(),
        reason,
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| malformed(e.to_string()))?;
    let package: Value = serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;

    let id = ExtensionManifest::extension_id(&package).unwrap_or_else(|| fallback_id.clone());
    ExtensionManifest::from_package_json(id, &package)
}

fn source_failed(name: &str, reason: &str) -> RegistryError {
    RegistryError::SourceFailed {
        source_name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl CommandSource for FsCommandSource {
    async fn list_active_commands(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.snapshot().await?.active().to_vec())
    }

    async fn list_all_commands(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.snapshot().await?.all().to_vec())
    }

    async fn list_installed_extension_manifests(
        &self,
    ) -> Result<Vec<Result<ExtensionManifest, RegistryError>>, RegistryError> {
        if self.extensions_dirs.is_empty() {
            return Err(source_failed(EXTENSIONS_SOURCE, "no extensions directory configured"));
        }

        let mut manifests = Vec::new();
        let mut readable = 0usize;
        for dir in &self.extensions_dirs {
            match Self::read_extensions_dir(dir, &mut manifests).await {
                Ok(()) => readable += 1,
                Err(e) => warn!("Cannot read extensions directory {}: {}", dir.display(), e),
            }
        }

        if readable == 0 {
            return Err(source_failed(EXTENSIONS_SOURCE, "no extensions directory is readable"));
        }
        debug!("Found {} extension manifests", manifests.len());
        Ok(manifests)
    }
}

/// Document editor over a single file.
///
/// Edits are staged in memory and written on save. In dry-run mode saves
/// never touch the file.
#[derive(Debug)]
pub struct FileEditor {
    path: PathBuf,
    uri: String,
    dry_run: bool,
    text: Mutex<String>,
    dirty: Mutex<bool>,
}

impl FileEditor {
    pub fn new(path: impl Into<PathBuf>, uri: impl Into<String>, text: impl Into<String>, dry_run: bool) -> Self {
        Self {
            path: path.into(),
            uri: uri.into(),
            dry_run,
            text: Mutex::new(text.into()),
            dirty: Mutex::new(false),
        }
    }

    /// Current text, including staged edits
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    /// Whether edits are staged but not saved
    pub fn is_dirty(&self) -> bool {
        *self.dirty.lock()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentEditor for FileEditor {
    async fn apply_edit(&self, uri: &str, edit: TextEdit) -> bool {
        if uri != self.uri {
            warn!("Refusing edit for unknown document {}", uri);
            return false;
        }

        let mut text = self.text.lock();
        match apply_edit(&text, &edit) {
            Ok(updated) => {
                *text = updated;
                *self.dirty.lock() = true;
                true
            }
            Err(e) => {
                warn!("Rejecting edit for {}: {}", uri, e);
                false
            }
        }
    }

    async fn save(&self, uri: &str) -> Result<(), HostError> {
        if uri != self.uri {
            return Err(HostError::DocumentUnavailable(uri.to_string()));
        }
        if !self.is_dirty() {
            return Ok(());
        }
        if self.dry_run {
            info!("Dry run: not writing {}", self.path.display());
            return Ok(());
        }

        let text = self.text();
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| HostError::SaveFailed {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;
        *self.dirty.lock() = false;
        debug!("Saved {}", self.path.display());
        Ok(())
    }
}
