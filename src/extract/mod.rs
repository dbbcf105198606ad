//! Archive extraction
//!
//! The nuclear-data centers distribute evaluations as zip files (NNDC,
//! OECD-NEA), gzipped tarballs (NNDC, JAEA), or occasionally as bare
//! evaluation files (errata). The library pipeline wants every evaluation in
//! a flat per-particle directory regardless of how the archive nests them,
//! while the chain pipeline keeps archive paths so extracted directories can
//! be renamed afterwards. Both layouts reject entries that would escape the
//! destination.

use crate::Result;
use anyhow::Context;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

/// How archive-internal paths map onto the destination directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Drop archive-internal directories; every file lands in the destination
    Flattened,
    /// Preserve archive-internal paths below the destination
    Preserve,
}

/// Extract an archive (or copy a bare file) into `dest`.
///
/// Dispatches on the file name: `.zip`, `.tar.gz`/`.tgz`, and anything else
/// is treated as a bare evaluation file and copied, overwriting an existing
/// copy. That last case is how errata downloads replace the evaluations they
/// supersede. Returns the number of files written.
pub fn extract(archive: &Path, dest: &Path, layout: Layout) -> Result<usize> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.ends_with(".zip") {
        extract_zip(archive, dest, layout)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar_gz(archive, dest, layout)
    } else {
        let target = dest.join(
            archive
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Download has no file name: {}", archive.display()))?,
        );
        fs::copy(archive, &target)
            .with_context(|| format!("Failed to copy {} to {}", archive.display(), target.display()))?;
        Ok(1)
    }
}

fn extract_zip(archive: &Path, dest: &Path, layout: Layout) -> Result<usize> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive: {}", archive.display()))?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        // enclosed_name() rejects absolute paths and `..` components
        let entry_path = entry
            .enclosed_name()
            .ok_or_else(|| anyhow::anyhow!("Unsafe path in archive: {}", entry.name()))?;
        let target = target_path(dest, &entry_path, layout)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)
            .with_context(|| format!("Failed to create file: {}", target.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("Failed to extract: {}", target.display()))?;
        written += 1;
    }
    Ok(written)
}

fn extract_tar_gz(archive: &Path, dest: &Path, layout: Layout) -> Result<usize> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));

    let mut written = 0;
    for entry in tar
        .entries()
        .with_context(|| format!("Failed to read tar archive: {}", archive.display()))?
    {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let entry_path = entry.path()?.into_owned();
        let target = target_path(dest, &entry_path, layout)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)
            .with_context(|| format!("Failed to create file: {}", target.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("Failed to extract: {}", target.display()))?;
        written += 1;
    }
    Ok(written)
}

fn target_path(dest: &Path, entry_path: &Path, layout: Layout) -> Result<PathBuf> {
    for component in entry_path.components() {
        match component {
            Component::Normal(_) => {}
            _ => anyhow::bail!("Unsafe path in archive: {}", entry_path.display()),
        }
    }

    match layout {
        Layout::Flattened => {
            let name = entry_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Archive entry has no file name: {}", entry_path.display()))?;
            Ok(dest.join(name))
        }
        Layout::Preserve => Ok(dest.join(entry_path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn make_tar_gz(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(gz);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, content.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    fn make_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_tar_gz_flattened() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("neutrons.tar.gz");
        make_tar_gz(
            &archive,
            &[
                ("neutrons-version.VIII.1/n-001_H_001.endf", "h1"),
                ("neutrons-version.VIII.1/sub/n-092_U_235.endf", "u235"),
            ],
        );

        let dest = dir.path().join("out");
        let written = extract(&archive, &dest, Layout::Flattened).unwrap();
        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(dest.join("n-001_H_001.endf")).unwrap(), "h1");
        assert_eq!(fs::read_to_string(dest.join("n-092_U_235.endf")).unwrap(), "u235");
        assert!(!dest.join("neutrons-version.VIII.1").exists());
    }

    #[test]
    fn test_tar_gz_preserved() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("jendl5-n.tar.gz");
        make_tar_gz(&archive, &[("jendl5-n/n_001-H-001.dat", "h1")]);

        let dest = dir.path().join("out");
        extract(&archive, &dest, Layout::Preserve).unwrap();
        assert_eq!(
            fs::read_to_string(dest.join("jendl5-n").join("n_001-H-001.dat")).unwrap(),
            "h1"
        );
    }

    #[test]
    fn test_zip_flattened() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("photoat.zip");
        make_zip(
            &archive,
            &[
                ("photoat/photoat-001_H_000.endf", "h"),
                ("photoat/photoat-092_U_000.endf", "u"),
            ],
        );

        let dest = dir.path().join("out");
        let written = extract(&archive, &dest, Layout::Flattened).unwrap();
        assert_eq!(written, 2);
        assert!(dest.join("photoat-001_H_000.endf").exists());
        assert!(dest.join("photoat-092_U_000.endf").exists());
    }

    #[test]
    fn test_bare_file_overwrites() {
        let dir = tempdir().unwrap();
        let erratum = dir.path().join("n-005_B_010.endf");
        fs::write(&erratum, "corrected").unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("n-005_B_010.endf"), "original").unwrap();

        extract(&erratum, &dest, Layout::Flattened).unwrap();
        assert_eq!(fs::read_to_string(dest.join("n-005_B_010.endf")).unwrap(), "corrected");
    }

    #[test]
    fn test_rejects_escaping_entries() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("evil.zip");
        make_zip(&archive, &[("../escape.endf", "bad")]);

        let dest = dir.path().join("out");
        assert!(extract(&archive, &dest, Layout::Preserve).is_err());
        assert!(!dir.path().join("escape.endf").exists());
    }
}
