//! Cross-section library index
//!
//! The processing tool writes one HDF5 file per material; the index file
//! `cross_sections.xml` is what downstream transport codes actually load.
//! Registration infers the library type and material name from where the
//! file sits and what it is called: the tool names files after the GNDS
//! material (`U235.h5`, `c_H_in_H2O.h5`), thermal materials register as
//! neutron libraries, and the `photon`/`wmp` subdirectories mark the other
//! types. Reading the HDF5 payload is deliberately out of scope.

use crate::Result;
use anyhow::Context;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Library type recorded in the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Neutron,
    Photon,
    Wmp,
}

impl LibraryKind {
    fn as_str(&self) -> &'static str {
        match self {
            LibraryKind::Neutron => "neutron",
            LibraryKind::Photon => "photon",
            LibraryKind::Wmp => "wmp",
        }
    }
}

/// One registered cross-section file
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub kind: LibraryKind,
    pub materials: String,
    pub path: PathBuf,
}

/// Accumulates registered files and exports the index
#[derive(Debug, Default)]
pub struct DataLibrary {
    entries: Vec<LibraryEntry>,
}

impl DataLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cross-section file, inferring type and material
    pub fn register_file(&mut self, path: &Path) -> Result<()> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Cross-section file has no stem: {}", path.display()))?
            .to_string();

        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("");

        let kind = match parent {
            "photon" => LibraryKind::Photon,
            "wmp" => LibraryKind::Wmp,
            _ => LibraryKind::Neutron,
        };

        self.entries.push(LibraryEntry {
            kind,
            materials: stem,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the index. Registered paths are stored relative to the index
    /// file's directory so the library tree stays relocatable.
    pub fn export_to_xml(&self, path: &Path) -> Result<()> {
        let root = path.parent().unwrap_or_else(|| Path::new(""));

        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("cross_sections")))?;

        for entry in &self.entries {
            let rel = entry.path.strip_prefix(root).unwrap_or(&entry.path);
            let rel = rel
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Path is not valid UTF-8: {}", rel.display()))?;

            let mut element = BytesStart::new("library");
            element.push_attribute(("materials", entry.materials.as_str()));
            element.push_attribute(("path", rel));
            element.push_attribute(("type", entry.kind.as_str()));
            writer.write_event(Event::Empty(element))?;
        }

        writer.write_event(Event::End(BytesEnd::new("cross_sections")))?;
        buffer.push(b'\n');

        fs::write(path, buffer)
            .with_context(|| format!("Failed to write index: {}", path.display()))?;
        Ok(())
    }
}
