//! Evaluation file patching
//!
//! A handful of published evaluations need fixing before the processing tool
//! will accept them:
//!
//! - JENDL-5 ships liquid/solid thermal scattering evaluations that reuse the
//!   same material symbol (ZSYMAM), so the affected files are rewritten with a
//!   unique symbol before processing.
//! - The JEFF single-file fission-yield and decay downloads are distributed
//!   without the leading TPID record, which is prepended in place on the
//!   extracted working copy.
//! - JENDL update archives extract next to the primary evaluation directory;
//!   their files are relocated into it, overwriting the superseded originals.
//!
//! ENDF records are fixed-width: columns 1-66 carry data, 67-70 the MAT
//! number, 71-72 MF, 73-75 MT, and 76-80 the record sequence number.

use crate::util::pattern::find_matching;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Column span holding the MF and MT fields (0-indexed)
const MF_MT: std::ops::Range<usize> = 70..75;
/// Column span holding the record sequence number
const SEQ: std::ops::Range<usize> = 75..80;
/// Width of the ZSYMAM field at the start of the fifth MF=1/MT=451 record
const ZSYMAM_WIDTH: usize = 11;

/// Rewrite the ZSYMAM field of a thermal scattering evaluation.
///
/// The field occupies the first eleven columns of the fifth record of the
/// MF=1/MT=451 section. Evaluations that share a symbol with another material
/// in the same library are rewritten so the processing tool sees unique names.
pub fn update_zsymam(path: &Path, zsymam: &str) -> Result<()> {
    anyhow::ensure!(
        zsymam.len() <= ZSYMAM_WIDTH,
        "ZSYMAM '{}' exceeds {} characters",
        zsymam,
        ZSYMAM_WIDTH
    );

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read evaluation: {}", path.display()))?;

    let mut patched = String::with_capacity(content.len());
    let mut replaced = false;
    for line in content.lines() {
        if !replaced && is_zsymam_record(line) {
            patched.push_str(&format!("{:<width$}", zsymam, width = ZSYMAM_WIDTH));
            patched.push_str(&line[ZSYMAM_WIDTH..]);
            replaced = true;
        } else {
            patched.push_str(line);
        }
        patched.push('\n');
    }

    anyhow::ensure!(
        replaced,
        "No MF=1/MT=451 header record found in {}",
        path.display()
    );

    fs::write(path, patched)
        .with_context(|| format!("Failed to write patched evaluation: {}", path.display()))?;
    Ok(())
}

fn is_zsymam_record(line: &str) -> bool {
    line.len() >= SEQ.end && &line[MF_MT] == " 1451" && &line[SEQ] == "    5"
}

/// Prepend a TPID record to an evaluation file that ships without one.
///
/// Returns `true` if the file was patched, `false` if a TPID record was
/// already present. The fix is applied in place on the extracted working
/// copy, never on a download archive.
pub fn ensure_tpid(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read evaluation: {}", path.display()))?;

    if let Some(first) = content.lines().next() {
        if has_tpid(first) {
            return Ok(false);
        }
    }

    let tpid = format!("{:<66}{:>4}{:>2}{:>3}{:>5}\n", "ndforge tape id", 1, 0, 0, 0);
    let mut patched = String::with_capacity(content.len() + tpid.len());
    patched.push_str(&tpid);
    patched.push_str(&content);

    fs::write(path, patched)
        .with_context(|| format!("Failed to write patched evaluation: {}", path.display()))?;
    Ok(true)
}

// A TPID record carries MF=0/MT=0; any data record has nonzero MF.
fn has_tpid(line: &str) -> bool {
    if line.len() < MF_MT.end {
        return false;
    }
    line[70..72].trim() == "0" && line[72..75].trim() == "0"
}

/// Relocate errata files into the primary evaluation directory.
///
/// Files under `root` matching any of `patterns` are renamed into `dest`,
/// overwriting the superseded evaluations. Files already in `dest` are left
/// alone. Returns the number of files moved.
pub fn relocate_errata(root: &Path, patterns: &[&str], dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    let mut moved = 0;
    for pattern in patterns {
        for path in find_matching(root, pattern)? {
            if path.parent() == Some(dest) {
                continue;
            }
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Errata path has no file name: {}", path.display()))?;
            fs::rename(&path, dest.join(file_name)).with_context(|| {
                format!("Failed to relocate erratum: {}", path.display())
            })?;
            moved += 1;
        }
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    // Build an 80-column ENDF record from its fields
    fn record(data: &str, mat: u32, mf: u32, mt: u32, seq: u32) -> String {
        format!("{:<66}{:>4}{:>2}{:>3}{:>5}", data, mat, mf, mt, seq)
    }

    fn tsl_fixture() -> String {
        let mut lines = vec![record("tape header", 1, 0, 0, 0)];
        for seq in 1..=4 {
            lines.push(record("numeric fields", 51, 1, 451, seq));
        }
        lines.push(record("h(ch4)     long description text", 51, 1, 451, 5));
        lines.push(record("more description", 51, 1, 451, 6));
        lines.join("\n") + "\n"
    }

    #[test]
    fn test_update_zsymam() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsl_HinLiquidMethane.dat");
        fs::write(&path, tsl_fixture()).unwrap();

        update_zsymam(&path, "h(ch4)l").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().nth(5).unwrap();
        assert!(header.starts_with("h(ch4)l    "));
        assert_eq!(&header[70..75], " 1451");
        assert_eq!(&header[75..80], "    5");
        // Only the fifth record is touched
        assert!(content.lines().nth(6).unwrap().starts_with("more description"));
    }

    #[test]
    fn test_update_zsymam_rejects_long_symbol() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsl.dat");
        fs::write(&path, tsl_fixture()).unwrap();
        assert!(update_zsymam(&path, "much-too-long-symbol").is_err());
    }

    #[test]
    fn test_ensure_tpid_prepends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nfy.asc");
        fs::write(&path, record("first data record", 9228, 1, 451, 1) + "\n").unwrap();

        assert!(ensure_tpid(&path).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        let first = content.lines().next().unwrap();
        assert_eq!(first.len(), 80);
        assert_eq!(&first[70..75], " 0  0");
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_ensure_tpid_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nfy.asc");
        fs::write(&path, record("data", 9228, 1, 451, 1) + "\n").unwrap();

        assert!(ensure_tpid(&path).unwrap());
        assert!(!ensure_tpid(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_relocate_errata() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let primary = root.join("jendl5-n");
        let update = root.join("jendl5-n_upd1");
        fs::create_dir_all(&primary).unwrap();
        fs::create_dir_all(&update).unwrap();
        fs::write(primary.join("n_001-H-001.dat"), "old").unwrap();
        fs::write(update.join("n_001-H-001.dat"), "new").unwrap();
        File::create(update.join("readme.txt")).unwrap();

        let moved = relocate_errata(root, &["jendl5-n_upd1/*.dat"], &primary).unwrap();

        assert_eq!(moved, 1);
        assert_eq!(fs::read_to_string(primary.join("n_001-H-001.dat")).unwrap(), "new");
        assert!(!update.join("n_001-H-001.dat").exists());
        assert!(update.join("readme.txt").exists());
    }

    #[test]
    fn test_relocate_skips_files_already_in_place() {
        let dir = tempdir().unwrap();
        let primary = dir.path().join("jendl5-n");
        fs::create_dir_all(&primary).unwrap();
        fs::write(primary.join("n_001-H-001.dat"), "data").unwrap();

        // A bare *.dat pattern also matches files already in the destination
        let moved = relocate_errata(dir.path(), &["*.dat"], &primary).unwrap();
        assert_eq!(moved, 0);
        assert!(primary.join("n_001-H-001.dat").exists());
    }
}
