use crate::error::{GameLogError, GameLogResult};
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "*.csv";

/// Lists the files in `dir` matching the glob `pattern`, sorted by path.
/// Entries that cannot be read are logged and left out.
pub fn discover_logs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, glob::PatternError> {
    let dir_escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&dir_escaped).join(pattern);
    let mut logs = Vec::new();
    for entry in glob::glob(&full.to_string_lossy())? {
        match entry {
            Ok(p) if p.is_file() => logs.push(p),
            Ok(p) => debug!("ignoring {}, not a file", p.display()),
            Err(e) => warn!("could not read {}: {}", e.path().display(), e.error()),
        }
    }
    logs.sort();
    Ok(logs)
}

/// Removes the output directory if present and creates it empty.
/// A path that exists but is not a directory is left untouched.
pub fn prepare_output_dir(dir: &Path) -> GameLogResult<()> {
    let io_err = |source: std::io::Error| GameLogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    if dir.is_dir() {
        debug!("removing previous output in {}", dir.display());
        std::fs::remove_dir_all(dir).map_err(io_err)?;
    } else if dir.exists() {
        return Err(GameLogError::OutputNotDirectory(dir.to_path_buf()));
    }
    std::fs::create_dir_all(dir).map_err(io_err)
}

/// png path in `out_dir` named after the stem of the log file
pub fn output_path(out_dir: &Path, log_file: &Path) -> PathBuf {
    let mut name = log_file
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "game".into());
    name.push(".png");
    out_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_filters_by_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(dir.path().join("a.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub.csv")).unwrap();

        let logs = discover_logs(dir.path(), DEFAULT_PATTERN).unwrap();
        let names: Vec<_> = logs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let logs = discover_logs(dir.path(), "b*").unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_discover_escapes_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs[1]");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("game.csv"), "x").unwrap();
        assert_eq!(discover_logs(&dir, DEFAULT_PATTERN).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_logs(dir.path(), "[").is_err());
    }

    #[test]
    fn test_prepare_output_dir_clears_previous_run() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("graphs");
        prepare_output_dir(&out).unwrap();
        fs::write(out.join("old.png"), "x").unwrap();
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_output_dir_refuses_file() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("graphs");
        fs::write(&out, "keep me").unwrap();
        assert!(matches!(
            prepare_output_dir(&out),
            Err(GameLogError::OutputNotDirectory(_))
        ));
        assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");
    }

    #[test]
    fn test_output_path_uses_stem() {
        assert_eq!(
            output_path(Path::new("graphs"), Path::new("logs/game_12.csv")),
            PathBuf::from("graphs/game_12.png")
        );
        assert_eq!(
            output_path(Path::new("graphs"), Path::new("logs/game.v2.csv")),
            PathBuf::from("graphs/game.v2.png")
        );
    }
}
