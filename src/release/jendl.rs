//! JENDL release tables (JAEA)
//!
//! JENDL-5 is distributed as a base tarball plus cumulative update tarballs
//! per data class. Updates extract into sibling directories and are relocated
//! into the primary evaluation directory, superseding the originals. The
//! liquid/solid organic TSL evaluations ship with duplicate material symbols
//! and carry ZSYMAM patches.

use super::{sab, Particle, ParticleDetail, ParticleSources, RemoteFile, SabPair};

const BASE_URL: &str = "https://wwwndc.jaea.go.jp/ftpnd/ftp/JENDL/";

pub(super) fn jendl5(particle: Particle) -> Option<&'static ParticleSources> {
    match particle {
        Particle::Neutron => Some(&JENDL5_NEUTRON),
        Particle::Thermal => Some(&JENDL5_THERMAL),
        Particle::Photon => Some(&JENDL5_PHOTON),
        Particle::Wmp => None,
    }
}

static JENDL5_NEUTRON: ParticleSources = ParticleSources {
    base_url: BASE_URL,
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
    flatten: false,
    evaluation_dir: Some("jendl5-n"),
    errata: &["jendl5-n_upd1/*.dat", "jendl-n_upd6/*.dat", "*.dat"],
    detail: ParticleDetail::Neutron {
        patterns: &["n_???-*-???.dat", "n_???-*-???m?.dat"],
        skip: &[],
    },
};

static JENDL5_THERMAL: ParticleSources = ParticleSources {
    base_url: BASE_URL,
    files: &[
        RemoteFile { path: "jendl5-tsl.tar.gz", checksum: None },
        RemoteFile { path: "jendl5-tsl_upd16.tar.gz", checksum: None },
    ],
    insecure: true,
    flatten: false,
    evaluation_dir: Some("jendl5-tsl"),
    errata: &["*.dat"],
    detail: ParticleDetail::Thermal {
        pairs: JENDL5_SAB,
        zsymam: JENDL5_ZSYMAM,
    },
};

const JENDL5_SAB: &[SabPair] = &[
    // Hydrogen (H-1) compounds
    sab("n_001-H-001.dat", "tsl_HinC5O2H8.dat"),
    sab("n_001-H-001.dat", "tsl_HinCH2.dat"),
    sab("n_001-H-001.dat", "tsl_HinH2O.dat"),
    sab("n_001-H-001.dat", "tsl_HinIceIh.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidBenzene.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidEthanol.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidMesitylene.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidMethane.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidM-Xylene.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidToluene.dat"),
    sab("n_001-H-001.dat", "tsl_HinLiquidTriphenylmethane.dat"),
    sab("n_001-H-001.dat", "tsl_HinOrthoH.dat"),
    sab("n_001-H-001.dat", "tsl_HinParaH.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidBenzene.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidEthanol.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidMesitylene.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidMethane.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidM-Xylene.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidToluene.dat"),
    sab("n_001-H-001.dat", "tsl_HinSolidTriphenylmethane.dat"),
    sab("n_001-H-001.dat", "tsl_HinYH2.dat"),
    sab("n_001-H-001.dat", "tsl_HinZrH.dat"),
    // Deuterium (H-2) compounds
    sab("n_001-H-002.dat", "tsl_DinD2O.dat"),
    sab("n_001-H-002.dat", "tsl_DinOrthoD.dat"),
    sab("n_001-H-002.dat", "tsl_DinParaD.dat"),
    // Beryllium (Be-9) compounds
    sab("n_004-Be-009.dat", "tsl_Be-metal.dat"),
    sab("n_004-Be-009.dat", "tsl_BeinBeO.dat"),
    // Carbon (C-12) compounds
    sab("n_006-C-012.dat", "tsl_CinLiquidBenzene.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidEthanol.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidMesitylene.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidMethane.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidM-Xylene.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidToluene.dat"),
    sab("n_006-C-012.dat", "tsl_CinLiquidTriphenylmethane.dat"),
    sab("n_006-C-012.dat", "tsl_CinSiC.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidBenzene.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidEthanol.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidMesitylene.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidMethane.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidM-Xylene.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidToluene.dat"),
    sab("n_006-C-012.dat", "tsl_CinSolidTriphenylmethane.dat"),
    sab("n_006-C-012.dat", "tsl_crystalline-graphite.dat"),
    sab("n_006-C-012.dat", "tsl_reactor-graphite-10P.dat"),
    sab("n_006-C-012.dat", "tsl_reactor-graphite-30P.dat"),
    // Nitrogen (N-14) compounds
    sab("n_007-N-014.dat", "tsl_NinUN.dat"),
    // Oxygen (O-16) compounds
    sab("n_008-O-016.dat", "tsl_OinBeO.dat"),
    sab("n_008-O-016.dat", "tsl_OinD2O.dat"),
    sab("n_008-O-016.dat", "tsl_OinH2O.dat"),
    sab("n_008-O-016.dat", "tsl_OinIceIh.dat"),
    sab("n_008-O-016.dat", "tsl_OinLiquidEthanol.dat"),
    sab("n_008-O-016.dat", "tsl_OinSolidEthanol.dat"),
    sab("n_008-O-016.dat", "tsl_OinUO2.dat"),
    // Aluminum (Al-27)
    sab("n_013-Al-027.dat", "tsl_013_Al_027.dat"),
    // Silicon (Si-28) compounds
    sab("n_014-Si-028.dat", "tsl_SiinSiC.dat"),
    sab("n_014-Si-028.dat", "tsl_SiO2-alpha.dat"),
    sab("n_014-Si-028.dat", "tsl_SiO2-beta.dat"),
    // Iron (Fe-56)
    sab("n_026-Fe-056.dat", "tsl_026_Fe_056.dat"),
    // Yttrium (Y-89) compounds
    sab("n_039-Y-089.dat", "tsl_YinYH2.dat"),
    // Zirconium (Zr-90) compounds
    sab("n_040-Zr-090.dat", "tsl_ZrinZrH.dat"),
    // Uranium (U-238) compounds
    sab("n_092-U-238.dat", "tsl_UinUN.dat"),
    sab("n_092-U-238.dat", "tsl_UinUO2.dat"),
];

// Liquid/solid evaluations patched to have unique ZSYMAM fields
const JENDL5_ZSYMAM: &[(&str, &str)] = &[
    ("tsl_CinLiquidBenzene.dat", "c(c6h6)l"),
    ("tsl_CinLiquidEthanol.dat", "c(c2h6o)l"),
    ("tsl_CinLiquidM-Xylene.dat", "c(m-c8h10)l"),
    ("tsl_CinLiquidMesitylene.dat", "c(c9h12)l"),
    ("tsl_CinLiquidMethane.dat", "c(ch4)l"),
    ("tsl_CinLiquidToluene.dat", "c(c7h8)l"),
    ("tsl_CinLiquidTriphenylmethane.dat", "c(c19h16)l"),
    ("tsl_CinSolidBenzene.dat", "c(c6h6)s"),
    ("tsl_CinSolidEthanol.dat", "c(c2h6o)s"),
    ("tsl_CinSolidM-Xylene.dat", "c(m-c8h10)s"),
    ("tsl_CinSolidMesitylene.dat", "c(c9h12)s"),
    ("tsl_CinSolidMethane.dat", "c(ch4)s"),
    ("tsl_CinSolidToluene.dat", "c(c7h8)s"),
    ("tsl_CinSolidTriphenylmethane.dat", "c(c19h16)s"),
    ("tsl_HinLiquidBenzene.dat", "h(c6h6)l"),
    ("tsl_HinLiquidEthanol.dat", "h(c2h6o)l"),
    ("tsl_HinLiquidM-Xylene.dat", "h(m-c8h10)l"),
    ("tsl_HinLiquidMesitylene.dat", "h(c9h12)l"),
    ("tsl_HinLiquidMethane.dat", "h(ch4)l"),
    ("tsl_HinLiquidToluene.dat", "h(c7h8)l"),
    ("tsl_HinLiquidTriphenylmethane.dat", "h(c19h16)l"),
    ("tsl_HinSolidBenzene.dat", "h(c6h6)s"),
    ("tsl_HinSolidEthanol.dat", "h(c2h6o)s"),
    ("tsl_HinSolidM-Xylene.dat", "h(m-c8h10)s"),
    ("tsl_HinSolidMesitylene.dat", "h(c9h12)s"),
    ("tsl_HinSolidMethane.dat", "h(ch4)s"),
    ("tsl_HinSolidToluene.dat", "h(c7h8)s"),
    ("tsl_HinSolidTriphenylmethane.dat", "h(c19h16)s"),
    ("tsl_OinLiquidEthanol.dat", "o(c2h6o)l"),
    ("tsl_OinSolidEthanol.dat", "o(c2h6o)s"),
];

static JENDL5_PHOTON: ParticleSources = ParticleSources {
    base_url: BASE_URL,
    files: &[
        RemoteFile { path: "jendl5-pa.tar.gz", checksum: None },
        RemoteFile { path: "jendl5-ar.tar.gz", checksum: None },
    ],
    insecure: true,
    flatten: false,
    evaluation_dir: None,
    errata: &[],
    detail: ParticleDetail::Photon {
        photo_pattern: "jendl5-pa/*.dat",
        relax_pattern: "jendl5-ar/*.dat",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_zsymam_patch_targets_a_listed_evaluation() {
        for (file, _) in JENDL5_ZSYMAM {
            assert!(
                JENDL5_SAB.iter().any(|pair| pair.thermal == *file),
                "ZSYMAM patch for unlisted evaluation {}",
                file
            );
        }
    }

    #[test]
    fn test_zsymam_symbols_fit_field() {
        for (_, symbol) in JENDL5_ZSYMAM {
            assert!(symbol.len() <= 11);
        }
    }

    #[test]
    fn test_neutron_updates_follow_base_archive() {
        assert_eq!(JENDL5_NEUTRON.files[0].path, "jendl5-n.tar.gz");
        assert!(JENDL5_NEUTRON.files[1..].iter().all(|f| f.path.contains("_upd")));
    }
}
