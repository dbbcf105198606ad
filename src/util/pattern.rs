//! Shell-style pattern matching for evaluation files
//!
//! The release tables describe evaluation files with shell-style patterns
//! (`n-*.endf`, `n_???-*-???.dat`, `jendl5-n_upd1/*.dat`). This module matches
//! those patterns against directory trees the way the archive scripts expect:
//! a bare pattern matches file names anywhere under the root, while a pattern
//! with path separators matches against the tail of the relative path.

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Match a single path segment against a pattern with `*` and `?` wildcards.
///
/// `*` matches any run of characters (not crossing a separator, since this
/// operates on one segment), `?` matches exactly one character.
pub fn segment_matches(text: &str, pattern: &str) -> bool {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    let (mut ti, mut pi) = (0usize, 0usize);
    let (mut star_p, mut star_t) = (None::<usize>, 0usize);

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            ti += 1;
            pi += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star_p = Some(pi);
            star_t = ti;
            pi += 1;
        } else if let Some(sp) = star_p {
            // Backtrack: let the last `*` consume one more character
            pi = sp + 1;
            star_t += 1;
            ti = star_t;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Match a relative path against a pattern.
///
/// Patterns without a separator match the file name. Patterns with separators
/// match the trailing segments of the path, mirroring `Path.rglob` semantics.
pub fn path_matches(rel_path: &Path, pattern: &str) -> bool {
    let pat_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<String> = rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if pat_segments.len() > path_segments.len() {
        return false;
    }

    let offset = path_segments.len() - pat_segments.len();
    pat_segments
        .iter()
        .zip(&path_segments[offset..])
        .all(|(pat, seg)| segment_matches(seg, pat))
}

/// Find all regular files under `root` matching `pattern`, sorted by path.
pub fn find_matching(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    if root.is_dir() {
        walk(root, root, pattern, &mut matches)?;
    }
    matches.sort();
    Ok(matches)
}

fn walk(root: &Path, dir: &Path, pattern: &str, matches: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, pattern, matches)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            if path_matches(rel, pattern) {
                matches.push(path);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_segment_wildcards() {
        assert!(segment_matches("n-092_U_235.endf", "n-*.endf"));
        assert!(segment_matches("n_001-H-001.dat", "n_???-*-???.dat"));
        assert!(segment_matches("n_095-Am-242m1.dat", "n_???-*-???m?.dat"));
        assert!(!segment_matches("tsl-HinH2O.endf", "n-*.endf"));
        assert!(!segment_matches("n_01-H-001.dat", "n_???-*-???.dat"));
    }

    #[test]
    fn test_star_backtracking() {
        assert!(segment_matches("photoat-001_H_000.endf", "photoat*.endf"));
        assert!(segment_matches("abcbcd", "a*bcd"));
        assert!(!segment_matches("abcbce", "a*bcd"));
    }

    #[test]
    fn test_path_tail_matching() {
        assert!(path_matches(Path::new("jendl5-n_upd1/x.dat"), "jendl5-n_upd1/*.dat"));
        assert!(path_matches(Path::new("deep/jendl5-n_upd1/x.dat"), "jendl5-n_upd1/*.dat"));
        assert!(!path_matches(Path::new("jendl5-n/x.dat"), "jendl5-n_upd1/*.dat"));
        // Bare pattern matches the file name at any depth
        assert!(path_matches(Path::new("a/b/c.dat"), "*.dat"));
    }

    #[test]
    fn test_find_matching() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("n-001_H_001.endf")).unwrap();
        File::create(dir.path().join("sub").join("n-092_U_235.endf")).unwrap();
        File::create(dir.path().join("tsl-HinH2O.endf")).unwrap();

        let found = find_matching(dir.path(), "n-*.endf").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("n-001_H_001.endf"));
    }
}
