use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Platform base for per-user application data.
/// Windows: `%APPDATA%`, elsewhere: `$HOME`.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("{} is not set; cannot resolve home directory", var))
}

/// Expand a leading `~` or `~/` into the platform base directory.
fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the application home directory to an absolute path.
///
/// - `explicit`: user-provided path (may be relative or start with `~`),
///   `None` means "use the platform default `<base>/<default_subdir>`".
/// - `create`: create the directory (and parents) when it does not exist.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let mut path = match explicit {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_base_dir()?.join(default_subdir),
    };

    if path.is_relative() {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        path = cwd.join(path);
    }

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home dir {}", path.display()))?;
    }

    Ok(path)
}

/// Resolve a file path against a base directory; absolute paths pass through.
pub fn resolve_under(base: &Path, file: &str) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_absolute_path_is_kept() {
        let tmp = tempdir().unwrap();
        let want = tmp.path().join("data");
        let got = resolve_home_dir(
            Some(want.to_string_lossy().to_string()),
            ".innermap",
            true,
        )
        .unwrap();
        assert_eq!(got, want);
        assert!(got.is_dir());
    }

    #[test]
    fn tilde_expands_into_platform_base() {
        let tmp = tempdir().unwrap();
        #[cfg(target_os = "windows")]
        std::env::set_var("APPDATA", tmp.path());
        #[cfg(not(target_os = "windows"))]
        std::env::set_var("HOME", tmp.path());

        let got = resolve_home_dir(Some("~/.innermap_test".into()), ".innermap", false).unwrap();
        assert!(got.is_absolute());
        assert!(got.ends_with(".innermap_test"));
    }

    #[test]
    fn resolve_under_keeps_absolute() {
        let base = Path::new("/var/lib/innermap");
        assert_eq!(
            resolve_under(base, "/tmp/x.log"),
            PathBuf::from("/tmp/x.log")
        );
        assert_eq!(
            resolve_under(base, "logs/x.log"),
            PathBuf::from("/var/lib/innermap/logs/x.log")
        );
    }
}
