//! Nuclide naming and registration ordering
//!
//! Cross-section files produced by the processing tool carry GNDS-style names
//! (`U235`, `Am242_m1`, `C0` for elemental carbon, `c_H_in_H2O` for thermal
//! scattering materials). Registration in `cross_sections.xml` orders nuclide
//! files by (Z, A, metastable state) with thermal materials sorted after all
//! nuclides, so this module parses those names and builds the sort key.

use crate::Result;
use std::path::Path;

/// Element symbols indexed by atomic number; index 0 is the free neutron.
const SYMBOLS: [&str; 119] = [
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Atomic number for an element symbol (case-sensitive, as in GNDS names)
pub fn atomic_number(symbol: &str) -> Option<u32> {
    SYMBOLS.iter().position(|&s| s == symbol).map(|z| z as u32)
}

/// Element symbol for an atomic number
pub fn symbol(z: u32) -> Option<&'static str> {
    SYMBOLS.get(z as usize).copied()
}

/// A nuclide identified by atomic number, mass number, and metastable state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Zam {
    /// Atomic number (0 for the free neutron)
    pub z: u32,
    /// Mass number (0 for elemental evaluations)
    pub a: u32,
    /// Metastable state (0 for ground state)
    pub m: u32,
}

impl Zam {
    /// Parse a GNDS-style nuclide name (`U235`, `Am242_m1`, `C0`, `H1`)
    pub fn parse(name: &str) -> Result<Self> {
        let (base, m) = match name.split_once("_m") {
            Some((base, meta)) => {
                let m: u32 = meta
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid metastable state in nuclide name: {}", name))?;
                (base, m)
            }
            None => (name, 0),
        };

        let digits_at = base
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| anyhow::anyhow!("No mass number in nuclide name: {}", name))?;
        let (sym, mass) = base.split_at(digits_at);

        let z = atomic_number(sym)
            .ok_or_else(|| anyhow::anyhow!("Unknown element symbol in nuclide name: {}", name))?;
        let a: u32 = mass
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid mass number in nuclide name: {}", name))?;

        Ok(Self { z, a, m })
    }

    /// GNDS-style name for this nuclide
    pub fn name(&self) -> String {
        let sym = symbol(self.z).unwrap_or("?");
        if self.m > 0 {
            format!("{}{}_m{}", sym, self.a, self.m)
        } else {
            format!("{}{}", sym, self.a)
        }
    }
}

/// Registration ordering for cross-section files.
///
/// Nuclide files sort by (Z, A, m); thermal scattering files (`c_*`) sort
/// after all of them, by name; anything unparsable sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Nuclide(Zam),
    Thermal(String),
    Other(String),
}

impl SortKey {
    /// Build the sort key for a cross-section file path from its stem
    pub fn for_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if stem.starts_with("c_") {
            SortKey::Thermal(stem)
        } else {
            match Zam::parse(&stem) {
                Ok(zam) => SortKey::Nuclide(zam),
                Err(_) => SortKey::Other(stem),
            }
        }
    }
}

/// Sort cross-section file paths into registration order
pub fn sort_for_registration(paths: &mut [std::path::PathBuf]) {
    paths.sort_by_key(|p| SortKey::for_path(p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_ground_state() {
        assert_eq!(Zam::parse("U235").unwrap(), Zam { z: 92, a: 235, m: 0 });
        assert_eq!(Zam::parse("H1").unwrap(), Zam { z: 1, a: 1, m: 0 });
        assert_eq!(Zam::parse("C0").unwrap(), Zam { z: 6, a: 0, m: 0 });
    }

    #[test]
    fn test_parse_metastable() {
        assert_eq!(Zam::parse("Am242_m1").unwrap(), Zam { z: 95, a: 242, m: 1 });
        assert_eq!(Zam::parse("Ag110_m1").unwrap(), Zam { z: 47, a: 110, m: 1 });
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Zam::parse("Xx123").is_err());
        assert!(Zam::parse("H").is_err());
        assert!(Zam::parse("U235_mx").is_err());
    }

    #[test]
    fn test_name_round_trip() {
        for name in ["U235", "Am242_m1", "H2", "Og294"] {
            assert_eq!(Zam::parse(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_registration_order() {
        let mut paths = vec![
            PathBuf::from("c_H_in_H2O.h5"),
            PathBuf::from("U238.h5"),
            PathBuf::from("H1.h5"),
            PathBuf::from("c_Be.h5"),
            PathBuf::from("Am242_m1.h5"),
            PathBuf::from("Am242.h5"),
        ];
        sort_for_registration(&mut paths);
        let names: Vec<_> = paths.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(
            names,
            ["H1.h5", "U238.h5", "Am242.h5", "Am242_m1.h5", "c_Be.h5", "c_H_in_H2O.h5"]
        );
    }
}
