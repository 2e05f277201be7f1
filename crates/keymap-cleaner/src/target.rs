//! Detection of the user keybindings file

use std::path::{Component, Path, PathBuf};

/// File name of the user keybindings file
pub const KEYBINDINGS_FILE_NAME: &str = "keybindings.json";

/// Folder under the application folder holding user settings
pub const USER_FOLDER: &str = "User";

/// Default keybindings path for an editor whose settings live in
/// `<platform config dir>/<app_folder>/User`
pub fn default_keybindings_path(app_folder: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(app_folder)
            .join(USER_FOLDER)
            .join(KEYBINDINGS_FILE_NAME)
    })
}

/// Whether `candidate` names the same file as `target`.
///
/// Both paths are made absolute against the current directory, `.` and `..`
/// are collapsed lexically, separators are unified and the comparison
/// ignores case.
pub fn is_target_path(candidate: &Path, target: &Path) -> bool {
    comparable(candidate) == comparable(target)
}

fn comparable(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let absolute = absolutize(Path::new(&text));
    normalize(&absolute)
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_user_keybindings() {
        if let Some(path) = default_keybindings_path("Code") {
            assert!(path.ends_with("Code/User/keybindings.json"));
        }
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(is_target_path(
            Path::new("/home/u/.config/Code/User/KeyBindings.json"),
            Path::new("/home/u/.config/code/user/keybindings.json"),
        ));
    }

    #[test]
    fn test_dot_segments_collapse() {
        assert!(is_target_path(
            Path::new("/home/u/.config/Code/./User/../User/keybindings.json"),
            Path::new("/home/u/.config/Code/User/keybindings.json"),
        ));
    }

    #[test]
    fn test_other_file_does_not_match() {
        assert!(!is_target_path(
            Path::new("/home/u/.config/Code/User/settings.json"),
            Path::new("/home/u/.config/Code/User/keybindings.json"),
        ));
    }

    #[test]
    fn test_relative_path_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert!(is_target_path(
            Path::new("keybindings.json"),
            &cwd.join("keybindings.json"),
        ));
    }
}
