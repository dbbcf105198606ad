//! Depletion chain source tables
//!
//! A chain build needs three evaluation sets: incident neutron, radioactive
//! decay, and neutron fission yields. Each release distributes those
//! differently: per-file tarball trees (ENDF/B), a mix of tarball, zip, and
//! single multi-evaluation text files (JEFF), or base-plus-update tarballs
//! (JENDL). Each table records how the downloaded pieces are extracted,
//! renamed, and relocated into the `neutrons`/`decay`/`nfy` layout the chain
//! builder consumes.

use super::RemoteFile;
use std::fmt;

/// Depletion chain releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRelease {
    Endfb81,
    Jeff33,
    Jeff40,
    Jendl5,
}

impl ChainRelease {
    /// Default name of the chain file this release produces
    pub fn default_output(&self) -> &'static str {
        match self {
            ChainRelease::Endfb81 => "chain_endfb81.xml",
            ChainRelease::Jeff33 => "chain_jeff33.xml",
            ChainRelease::Jeff40 => "chain_jeff40.xml",
            ChainRelease::Jendl5 => "chain_jendl5.xml",
        }
    }

    /// Directory prefix for download and working trees
    pub fn prefix(&self) -> &'static str {
        match self {
            ChainRelease::Endfb81 => "endfb81-chain",
            ChainRelease::Jeff33 => "jeff33-chain",
            ChainRelease::Jeff40 => "jeff40-chain",
            ChainRelease::Jendl5 => "jendl5-chain",
        }
    }
}

impl fmt::Display for ChainRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainRelease::Endfb81 => "endfb81",
            ChainRelease::Jeff33 => "jeff33",
            ChainRelease::Jeff40 => "jeff40",
            ChainRelease::Jendl5 => "jendl5",
        };
        write!(f, "{}", name)
    }
}

/// The three evaluation sets a chain build consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRole {
    Neutron,
    Decay,
    Nfy,
}

impl fmt::Display for ChainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainRole::Neutron => "neutron",
            ChainRole::Decay => "decay",
            ChainRole::Nfy => "neutron fission product yield",
        };
        write!(f, "{}", name)
    }
}

/// Sources and post-extraction fixups for one evaluation set
#[derive(Debug, Clone, Copy)]
pub struct ChainKindSources {
    pub role: ChainRole,
    pub base_url: &'static str,
    pub files: &'static [RemoteFile],
    /// Skip TLS verification (JAEA)
    pub insecure: bool,
    /// Extract below this subdirectory of the working tree instead of its root
    pub extract_into: Option<&'static str>,
    /// Post-extraction renames, relative to the working tree (dirs or files)
    pub renames: &'static [(&'static str, &'static str)],
    /// Update files to relocate into the evaluation directory
    pub errata: &'static [&'static str],
    /// Evaluation files, relative to the working tree; the pattern's parent
    /// directory is what the chain builder receives
    pub pattern: &'static str,
    /// Single-file distributions shipped without a TPID record
    pub fix_tpid: bool,
}

/// Full source specification for one chain release
#[derive(Debug, Clone, Copy)]
pub struct ChainSpec {
    pub kinds: &'static [ChainKindSources],
}

impl ChainSpec {
    pub fn kind(&self, role: ChainRole) -> Option<&ChainKindSources> {
        self.kinds.iter().find(|k| k.role == role)
    }
}

/// Source table for a chain release
pub fn chain_spec(release: ChainRelease) -> &'static ChainSpec {
    match release {
        ChainRelease::Endfb81 => &ENDFB81,
        ChainRelease::Jeff33 => &JEFF33,
        ChainRelease::Jeff40 => &JEFF40,
        ChainRelease::Jendl5 => &JENDL5,
    }
}

// ---------------------------------------------------------------------------
// ENDF/B-VIII.1

static ENDFB81: ChainSpec = ChainSpec {
    kinds: &[
        ChainKindSources {
            role: ChainRole::Neutron,
            base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/",
            files: &[RemoteFile { path: "neutrons/neutrons-version.VIII.1.tar.gz", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[("neutrons-version.VIII.1", "neutrons")],
            errata: &[],
            pattern: "neutrons/*.endf",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Decay,
            base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/",
            files: &[RemoteFile { path: "decay/decay-version.VIII.1.tar.gz", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[("decay-version.VIII.1", "decay")],
            errata: &[],
            pattern: "decay/*.endf",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Nfy,
            base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/",
            files: &[RemoteFile { path: "nfy/nfy-version.VIII.1.tar.gz", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[("nfy-version.VIII.1", "nfy")],
            errata: &[],
            pattern: "nfy/*.endf",
            fix_tpid: false,
        },
    ],
};

// ---------------------------------------------------------------------------
// JEFF-3.3 (OECD-NEA; URLs require a download query suffix)

static JEFF33: ChainSpec = ChainSpec {
    kinds: &[
        ChainKindSources {
            role: ChainRole::Neutron,
            base_url: "https://data.oecd-nea.org/records/bh7jn-rm903/files/",
            files: &[RemoteFile { path: "JEFF33-n.tgz?download=1", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[("endf6", "neutrons")],
            errata: &[],
            pattern: "neutrons/*.jeff33",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Decay,
            base_url: "https://data.oecd-nea.org/records/qfhqd-s0y84/files/",
            files: &[RemoteFile { path: "JEFF33-rdd.zip?download=1", checksum: None }],
            insecure: false,
            extract_into: Some("decay"),
            renames: &[],
            errata: &[],
            pattern: "decay/*.ASC",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Nfy,
            base_url: "https://data.oecd-nea.org/records/nhfqy-hvz09/files/",
            // Single file holding every fission-yield evaluation
            files: &[RemoteFile { path: "JEFF33-nfy.asc?download=1", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[("JEFF33-nfy.asc", "nfy/JEFF33-nfy.asc")],
            errata: &[],
            pattern: "nfy/*.asc",
            fix_tpid: true,
        },
    ],
};

// ---------------------------------------------------------------------------
// JEFF-4.0

static JEFF40: ChainSpec = ChainSpec {
    kinds: &[
        ChainKindSources {
            role: ChainRole::Neutron,
            base_url: "https://data.oecd-nea.org/records/e9ajn-a3p20/files/",
            files: &[RemoteFile { path: "JEFF40-Evaluations-Neutron-593.zip?download=1", checksum: None }],
            insecure: false,
            extract_into: Some("neutrons"),
            renames: &[],
            errata: &[],
            pattern: "neutrons/*.jeff",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Decay,
            base_url: "https://data.oecd-nea.org/records/tw0c6-t1386/files/",
            files: &[RemoteFile { path: "Radioactive_Decay_Data_JEFF-40.txt?download=1", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[(
                "Radioactive_Decay_Data_JEFF-40.txt",
                "decay/Radioactive_Decay_Data_JEFF-40.txt",
            )],
            errata: &[],
            pattern: "decay/*.txt",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Nfy,
            base_url: "https://data.oecd-nea.org/records/trtwt-k2828/files/",
            files: &[RemoteFile { path: "nf_Fission_Yields_JEFF-40.txt?download=1", checksum: None }],
            insecure: false,
            extract_into: None,
            renames: &[(
                "nf_Fission_Yields_JEFF-40.txt",
                "nfy/nf_Fission_Yields_JEFF-40.txt",
            )],
            errata: &[],
            pattern: "nfy/*.txt",
            fix_tpid: true,
        },
    ],
};

// ---------------------------------------------------------------------------
// JENDL-5

static JENDL5: ChainSpec = ChainSpec {
    kinds: &[
        ChainKindSources {
            role: ChainRole::Neutron,
            base_url: "https://wwwndc.jaea.go.jp/ftpnd/ftp/JENDL/",
            files: &[
                RemoteFile { path: "jendl5-n.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd1.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd6.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd7.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd10.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd11.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd12.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-n_upd14.tar.gz", checksum: None },
            ],
            insecure: true,
            extract_into: None,
            renames: &[],
            errata: &["jendl5-n_upd1/*.dat", "jendl-n_upd6/*.dat", "*.dat"],
            pattern: "jendl5-n/*.dat",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Decay,
            base_url: "https://wwwndc.jaea.go.jp/ftpnd/ftp/JENDL/",
            files: &[
                RemoteFile { path: "jendl5-dec_upd5.tar.gz", checksum: None },
                RemoteFile { path: "jendl5-dec_upd15.tar.gz", checksum: None },
            ],
            insecure: true,
            extract_into: None,
            renames: &[],
            errata: &["jendl5-dec_upd15/*.dat"],
            pattern: "jendl5-dec_upd5/*.dat",
            fix_tpid: false,
        },
        ChainKindSources {
            role: ChainRole::Nfy,
            base_url: "https://wwwndc.jaea.go.jp/ftpnd/ftp/JENDL/",
            files: &[RemoteFile { path: "jendl5-fpy_upd8.tar.gz", checksum: None }],
            insecure: true,
            extract_into: None,
            renames: &[],
            errata: &[],
            pattern: "jendl5-fpy_upd8/*.dat",
            fix_tpid: false,
        },
    ],
};
