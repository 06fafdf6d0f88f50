// petrors-logs/src/curves.rs

use std::collections::BTreeMap;
use std::fmt;

/// Mnemonics tried, in order, to identify the depth column.
pub const DEPTH_ALIASES: [&str; 10] = [
    "DEPTH",
    "DEPT",
    "MD",
    "MEASURED_DEPTH",
    "TVD",
    "TVDSS",
    "TDEP",
    "MD_FT",
    "DEPTM",
    "INDEX",
];

/// Canonical curves the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Curve {
    Caliper,
    GammaRay,
    Resistivity,
    BulkDensity,
    NeutronPorosity,
    Photoelectric,
    ShaleVolume,
    TotalPorosity,
    WaterSaturation,
}

impl Curve {
    pub const ALL: [Curve; 9] = [
        Curve::Caliper,
        Curve::GammaRay,
        Curve::Resistivity,
        Curve::BulkDensity,
        Curve::NeutronPorosity,
        Curve::Photoelectric,
        Curve::ShaleVolume,
        Curve::TotalPorosity,
        Curve::WaterSaturation,
    ];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Curve::Caliper => "CALI",
            Curve::GammaRay => "GR",
            Curve::Resistivity => "RT",
            Curve::BulkDensity => "RHOB",
            Curve::NeutronPorosity => "NPHI",
            Curve::Photoelectric => "PEF",
            Curve::ShaleVolume => "VSH",
            Curve::TotalPorosity => "PHIT",
            Curve::WaterSaturation => "SW",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Curve::Caliper => &["CALI", "CAL", "CAL1", "CALIPER"],
            Curve::GammaRay => &["GR", "GAM", "HGR", "GAMMA"],
            Curve::Resistivity => &[
                "RT", "RTRUE", "RESD", "RDEP", "ILD", "LLD", "RILD", "RD", "AT90", "AIT90",
                "AT60", "AIT60", "RLA4", "HRLA4",
            ],
            Curve::BulkDensity => &["RHOB", "DEN", "DENS", "RHOZ", "DENSITY"],
            Curve::NeutronPorosity => &["NPHI", "NPL", "NPOS", "NEUT"],
            Curve::Photoelectric => &["PEF", "PE", "PHOTO"],
            Curve::ShaleVolume => &["VSH", "VCL", "VSHALE"],
            Curve::TotalPorosity => &["PHIT", "PHI_T", "PHIE", "PHI"],
            Curve::WaterSaturation => &["SW", "SWE", "SWAT"],
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Outcome of matching source mnemonics against the alias tables.
///
/// Indices point into the mnemonic slice the resolution was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveResolution {
    pub depth: usize,
    pub curves: BTreeMap<Curve, usize>,
}

impl CurveResolution {
    /// Returns `None` when there are no columns at all.
    pub fn resolve<S: AsRef<str>>(mnemonics: &[S]) -> Option<Self> {
        if mnemonics.is_empty() {
            return None;
        }
        let normalized: Vec<String> = mnemonics
            .iter()
            .map(|m| m.as_ref().trim().to_uppercase())
            .collect();
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|m| m == alias))
        };
        let depth = find(&DEPTH_ALIASES).unwrap_or(0);
        let curves = Curve::ALL
            .iter()
            .filter_map(|curve| find(curve.aliases()).map(|index| (*curve, index)))
            .collect();
        Some(Self { depth, curves })
    }

    pub fn index_of(&self, curve: Curve) -> Option<usize> {
        self.curves.get(&curve).copied()
    }
}
