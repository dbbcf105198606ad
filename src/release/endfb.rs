//! ENDF/B release tables (NNDC, Brookhaven)

use super::{sab, Particle, ParticleDetail, ParticleSources, RemoteFile, SabPair};

/// This evaluation fails the processing stage in every ENDF/B release
const NEUTRON_SKIP: &[&str] = &["n-000_n_001.endf"];

pub(super) fn vii1(particle: Particle) -> Option<&'static ParticleSources> {
    match particle {
        Particle::Neutron => Some(&VII1_NEUTRON),
        Particle::Thermal => Some(&VII1_THERMAL),
        Particle::Photon => Some(&VII1_PHOTON),
        Particle::Wmp => Some(&VII1_WMP),
    }
}

pub(super) fn viii0(particle: Particle) -> Option<&'static ParticleSources> {
    match particle {
        Particle::Neutron => Some(&VIII0_NEUTRON),
        Particle::Thermal => Some(&VIII0_THERMAL),
        Particle::Photon => Some(&VIII0_PHOTON),
        Particle::Wmp => None,
    }
}

pub(super) fn viii1(particle: Particle) -> Option<&'static ParticleSources> {
    match particle {
        Particle::Neutron => Some(&VIII1_NEUTRON),
        Particle::Thermal => Some(&VIII1_THERMAL),
        Particle::Photon => Some(&VIII1_PHOTON),
        Particle::Wmp => None,
    }
}

// ---------------------------------------------------------------------------
// ENDF/B-VII.1

static VII1_NEUTRON: ParticleSources = ParticleSources {
    base_url: "http://www.nndc.bnl.gov/endf-b7.1/zips/",
    files: &[RemoteFile {
        path: "ENDF-B-VII.1-neutrons.zip",
        checksum: Some("e5d7f441fc4c92893322c24d1725e29c"),
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Neutron {
        patterns: &["n-*.endf"],
        skip: NEUTRON_SKIP,
    },
};

static VII1_THERMAL: ParticleSources = ParticleSources {
    base_url: "http://www.nndc.bnl.gov/endf-b7.1/zips/",
    files: &[RemoteFile {
        path: "ENDF-B-VII.1-thermal_scatt.zip",
        checksum: Some("fe590109dde63b2ec5dc228c7b8cab02"),
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Thermal {
        pairs: VII1_SAB,
        zsymam: &[],
    },
};

const VII1_SAB: &[SabPair] = &[
    sab("n-001_H_001.endf", "tsl-HinH2O.endf"),
    sab("n-001_H_001.endf", "tsl-HinCH2.endf"),
    sab("n-001_H_001.endf", "tsl-HinZrH.endf"),
    sab("n-001_H_001.endf", "tsl-ortho-H.endf"),
    sab("n-001_H_001.endf", "tsl-para-H.endf"),
    sab("n-001_H_001.endf", "tsl-benzine.endf"),
    sab("n-001_H_001.endf", "tsl-l-CH4.endf"),
    sab("n-001_H_001.endf", "tsl-s-CH4.endf"),
    sab("n-001_H_002.endf", "tsl-DinD2O.endf"),
    sab("n-001_H_002.endf", "tsl-ortho-D.endf"),
    sab("n-001_H_002.endf", "tsl-para-D.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinBeO.endf"),
    sab("n-004_Be_009.endf", "tsl-Be-metal.endf"),
    sab("n-006_C_000.endf", "tsl-graphite.endf"),
    sab("n-008_O_016.endf", "tsl-OinBeO.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2.endf"),
    sab("n-013_Al_027.endf", "tsl-013_Al_027.endf"),
    sab("n-026_Fe_056.endf", "tsl-026_Fe_056.endf"),
    sab("n-014_Si_028.endf", "tsl-SiO2.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrH.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2.endf"),
];

static VII1_PHOTON: ParticleSources = ParticleSources {
    base_url: "http://www.nndc.bnl.gov/endf-b7.1/zips/",
    files: &[
        RemoteFile {
            path: "ENDF-B-VII.1-photoat.zip",
            checksum: Some("5192f94e61f0b385cf536f448ffab4a4"),
        },
        RemoteFile {
            path: "ENDF-B-VII.1-atomic_relax.zip",
            checksum: Some("fddb6035e7f2b6931e51a58fc754bd10"),
        },
    ],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Photon {
        photo_pattern: "photoat*.endf",
        relax_pattern: "atom*.endf",
    },
};

static VII1_WMP: ParticleSources = ParticleSources {
    base_url: "https://github.com/mit-crpg/WMP_Library/releases/download/v1.1/",
    files: &[RemoteFile {
        path: "WMP_Library_v1.1.tar.gz",
        checksum: None,
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Wmp,
};

// ---------------------------------------------------------------------------
// ENDF/B-VIII.0

static VIII0_NEUTRON: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-b8.0/",
    files: &[
        RemoteFile {
            path: "zips/ENDF-B-VIII.0_neutrons.zip",
            checksum: Some("90c1b1a6653a148f17cbf3c5d1171859"),
        },
        // Erratum distributed as a bare evaluation; overwrites the original
        RemoteFile {
            path: "erratafiles/n-005_B_010.endf",
            checksum: Some("eaf71eb22258f759abc205a129d8715a"),
        },
    ],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Neutron {
        patterns: &["n-*.endf"],
        skip: NEUTRON_SKIP,
    },
};

static VIII0_THERMAL: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-b8.0/zips/",
    files: &[RemoteFile {
        path: "ENDF-B-VIII.0_thermal_scatt.zip",
        checksum: Some("ecd503d3f8214f703e95e17cc947062c"),
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Thermal {
        pairs: VIII0_SAB,
        zsymam: &[],
    },
};

const VIII0_SAB: &[SabPair] = &[
    sab("n-001_H_001.endf", "tsl-HinC5O2H8.endf"),
    sab("n-001_H_001.endf", "tsl-HinH2O.endf"),
    sab("n-001_H_001.endf", "tsl-HinCH2.endf"),
    sab("n-001_H_001.endf", "tsl-HinZrH.endf"),
    sab("n-001_H_001.endf", "tsl-HinIceIh.endf"),
    sab("n-001_H_001.endf", "tsl-HinYH2.endf"),
    sab("n-001_H_001.endf", "tsl-ortho-H.endf"),
    sab("n-001_H_001.endf", "tsl-para-H.endf"),
    sab("n-001_H_001.endf", "tsl-benzene.endf"),
    sab("n-001_H_001.endf", "tsl-l-CH4.endf"),
    sab("n-001_H_001.endf", "tsl-s-CH4.endf"),
    sab("n-001_H_002.endf", "tsl-DinD2O.endf"),
    sab("n-001_H_002.endf", "tsl-ortho-D.endf"),
    sab("n-001_H_002.endf", "tsl-para-D.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinBeO.endf"),
    sab("n-004_Be_009.endf", "tsl-Be-metal.endf"),
    sab("n-006_C_012.endf", "tsl-CinSiC.endf"),
    sab("n-006_C_012.endf", "tsl-crystalline-graphite.endf"),
    sab("n-006_C_012.endf", "tsl-reactor-graphite-10P.endf"),
    sab("n-006_C_012.endf", "tsl-reactor-graphite-30P.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN.endf"),
    sab("n-008_O_016.endf", "tsl-OinBeO.endf"),
    sab("n-008_O_016.endf", "tsl-OinD2O.endf"),
    sab("n-008_O_016.endf", "tsl-OinIceIh.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2.endf"),
    sab("n-013_Al_027.endf", "tsl-013_Al_027.endf"),
    sab("n-026_Fe_056.endf", "tsl-026_Fe_056.endf"),
    sab("n-014_Si_028.endf", "tsl-SiinSiC.endf"),
    sab("n-014_Si_028.endf", "tsl-SiO2-alpha.endf"),
    sab("n-014_Si_028.endf", "tsl-SiO2-beta.endf"),
    sab("n-039_Y_089.endf", "tsl-YinYH2.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrH.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2.endf"),
];

static VIII0_PHOTON: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-b8.0/",
    files: &[
        RemoteFile {
            path: "zips/ENDF-B-VIII.0_photoat.zip",
            checksum: Some("d49f5b54be278862e1ce742ccd94f5c0"),
        },
        RemoteFile {
            path: "erratafiles/atomic_relax.tar.gz",
            checksum: Some("805f877c59ad22dcf57a0446d266ceea"),
        },
    ],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Photon {
        photo_pattern: "photoat*.endf",
        relax_pattern: "atom*.endf",
    },
};

// ---------------------------------------------------------------------------
// ENDF/B-VIII.1

static VIII1_NEUTRON: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/neutrons/",
    files: &[RemoteFile {
        path: "neutrons-version.VIII.1.tar.gz",
        checksum: Some("dc622c0f1c3c4477433e698266e0fc80"),
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Neutron {
        patterns: &["n-*.endf"],
        skip: NEUTRON_SKIP,
    },
};

static VIII1_THERMAL: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/thermal_scatt/",
    files: &[RemoteFile {
        path: "thermal_scatt-version.VIII.1.tar.gz",
        checksum: Some("f7bcae02b2da577e28a3a083e07a3a3a"),
    }],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Thermal {
        pairs: VIII1_SAB,
        zsymam: &[],
    },
};

const VIII1_SAB: &[SabPair] = &[
    sab("n-001_H_001.endf", "tsl-H1inCaH2.endf"),
    sab("n-001_H_001.endf", "tsl-H2inCaH2.endf"),
    sab("n-001_H_001.endf", "tsl-Hin7LiH-mixed.endf"),
    sab("n-001_H_001.endf", "tsl-HinC5O2H8.endf"),
    sab("n-001_H_001.endf", "tsl-HinC8H8.endf"),
    sab("n-001_H_001.endf", "tsl-HinCH2.endf"),
    sab("n-001_H_001.endf", "tsl-HinH2O.endf"),
    sab("n-001_H_001.endf", "tsl-HinHF.endf"),
    sab("n-001_H_001.endf", "tsl-HinIceIh.endf"),
    sab("n-001_H_001.endf", "tsl-HinParaffinicOil.endf"),
    sab("n-001_H_001.endf", "tsl-HinUH3.endf"),
    sab("n-001_H_001.endf", "tsl-HinYH2.endf"),
    sab("n-001_H_001.endf", "tsl-HinZrH2.endf"),
    sab("n-001_H_001.endf", "tsl-HinZrH.endf"),
    sab("n-001_H_001.endf", "tsl-HinZrHx.endf"),
    sab("n-001_H_001.endf", "tsl-ortho-H.endf"),
    sab("n-001_H_001.endf", "tsl-para-H.endf"),
    sab("n-001_H_001.endf", "tsl-benzene.endf"),
    sab("n-001_H_001.endf", "tsl-l-CH4.endf"),
    sab("n-001_H_001.endf", "tsl-s-CH4.endf"),
    sab("n-001_H_002.endf", "tsl-Din7LiD-mixed.endf"),
    sab("n-001_H_002.endf", "tsl-DinD2O.endf"),
    sab("n-001_H_002.endf", "tsl-ortho-D.endf"),
    sab("n-001_H_002.endf", "tsl-para-D.endf"),
    sab("n-003_Li_007.endf", "tsl-7Liin7LiD-mixed.endf"),
    sab("n-003_Li_007.endf", "tsl-7Liin7LiH-mixed.endf"),
    sab("n-003_Li_007.endf", "tsl-LiinFLiBe.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinBe2C.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinBeF2.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinBeO.endf"),
    sab("n-004_Be_009.endf", "tsl-BeinFLiBe.endf"),
    sab("n-004_Be_009.endf", "tsl-Be-metal.endf"),
    sab("n-004_Be_009.endf", "tsl-Be-metal+Sd.endf"),
    sab("n-006_C_012.endf", "tsl-CinBe2C.endf"),
    sab("n-006_C_012.endf", "tsl-CinC5O2H8.endf"),
    sab("n-006_C_012.endf", "tsl-CinC8H8.endf"),
    sab("n-006_C_012.endf", "tsl-CinCF2.endf"),
    sab("n-006_C_012.endf", "tsl-CinSiC.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC-100P.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC-10P.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC-5P.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC-HALEU.endf"),
    sab("n-006_C_012.endf", "tsl-CinUC-HEU.endf"),
    sab("n-006_C_012.endf", "tsl-CinZrC.endf"),
    sab("n-006_C_012.endf", "tsl-crystalline-graphite.endf"),
    sab("n-006_C_012.endf", "tsl-graphiteSd.endf"),
    sab("n-006_C_012.endf", "tsl-reactor-graphite-10P.endf"),
    sab("n-006_C_012.endf", "tsl-reactor-graphite-20P.endf"),
    sab("n-006_C_012.endf", "tsl-reactor-graphite-30P.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN-100P.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN-10P.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN-5P.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN-HALEU.endf"),
    sab("n-007_N_014.endf", "tsl-NinUN-HEU.endf"),
    sab("n-008_O_016.endf", "tsl-OinAl2O3.endf"),
    sab("n-008_O_016.endf", "tsl-OinBeO.endf"),
    sab("n-008_O_016.endf", "tsl-OinC5O2H8.endf"),
    sab("n-008_O_016.endf", "tsl-OinD2O.endf"),
    sab("n-008_O_016.endf", "tsl-OinIceIh.endf"),
    sab("n-008_O_016.endf", "tsl-OinMgO.endf"),
    sab("n-008_O_016.endf", "tsl-OinPuO2.endf"),
    sab("n-008_O_016.endf", "tsl-OinSiO2-alpha.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2-100P.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2-10P.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2-5P.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2-HALEU.endf"),
    sab("n-008_O_016.endf", "tsl-OinUO2-HEU.endf"),
    sab("n-009_F_019.endf", "tsl-FinBeF2.endf"),
    sab("n-009_F_019.endf", "tsl-FinCF2.endf"),
    sab("n-009_F_019.endf", "tsl-FinFLiBe.endf"),
    sab("n-009_F_019.endf", "tsl-FinHF.endf"),
    sab("n-009_F_019.endf", "tsl-FinMgF2.endf"),
    sab("n-012_Mg_024.endf", "tsl-MginMgF2.endf"),
    sab("n-012_Mg_024.endf", "tsl-MginMgO.endf"),
    sab("n-013_Al_027.endf", "tsl-013_Al_027.endf"),
    sab("n-013_Al_027.endf", "tsl-AlinAl2O3.endf"),
    sab("n-026_Fe_056.endf", "tsl-026_Fe_056.endf"),
    sab("n-014_Si_028.endf", "tsl-SiinSiC.endf"),
    sab("n-014_Si_028.endf", "tsl-SiinSiO2-alpha.endf"),
    sab("n-014_Si_028.endf", "tsl-SiO2-beta.endf"),
    sab("n-020_Ca_040.endf", "tsl-CainCaH2.endf"),
    sab("n-039_Y_089.endf", "tsl-YinYH2.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrC.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrH2.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrH.endf"),
    sab("n-040_Zr_090.endf", "tsl-ZrinZrHx.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC-100P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC-10P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC-5P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC-HALEU.endf"),
    sab("n-092_U_238.endf", "tsl-UinUC-HEU.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN-100P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN-10P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN-5P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN-HALEU.endf"),
    sab("n-092_U_238.endf", "tsl-UinUN-HEU.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2-100P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2-10P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2-5P.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2-HALEU.endf"),
    sab("n-092_U_238.endf", "tsl-UinUO2-HEU.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal-100P.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal-10P.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal-5P.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal-HALEU.endf"),
    sab("n-092_U_238.endf", "tsl-U-metal-HEU.endf"),
    sab("n-094_Pu_239.endf", "tsl-PuinPuO2.endf"),
];

static VIII1_PHOTON: ParticleSources = ParticleSources {
    base_url: "https://www.nndc.bnl.gov/endf-releases/releases/B-VIII.1/",
    files: &[
        RemoteFile {
            path: "photoat/photoat-version.VIII.1.tar.gz",
            checksum: Some("6d5f4830f6290d6c618803a8391ba0cf"),
        },
        RemoteFile {
            path: "atomic_relax/atomic_relax-version.VIII.1.tar.gz",
            checksum: Some("70e9ca0c481236499b7a3e0a490f4ef2"),
        },
    ],
    insecure: false,
    flatten: true,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Photon {
        photo_pattern: "photoat*.endf",
        relax_pattern: "atom*.endf",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sab_counts() {
        assert_eq!(VII1_SAB.len(), 21);
        assert_eq!(VIII0_SAB.len(), 34);
        assert_eq!(VIII1_SAB.len(), 114);
    }

    #[test]
    fn test_thermal_files_unique_within_release() {
        for pairs in [VII1_SAB, VIII0_SAB, VIII1_SAB] {
            let mut seen = std::collections::HashSet::new();
            for pair in pairs {
                assert!(seen.insert(pair.thermal), "duplicate TSL file {}", pair.thermal);
            }
        }
    }
}
