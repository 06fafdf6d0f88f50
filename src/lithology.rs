// petrors-logs/src/lithology.rs

use crate::matrix::Matrix;
use plotly::color::Rgb;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Colour for labels outside the lithology table.
pub const UNKNOWN_COLOR: (u8, u8, u8) = (0xCC, 0xCC, 0xCC);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lithology {
    Sandstone,
    ArgillaceousSandstone,
    Shale,
    Limestone,
    /// Present in the colour table but never emitted by [`classify`].
    Carbonate,
    Dolomite,
    /// Present in the colour table but never emitted by [`classify`].
    Conglomerate,
}

impl Lithology {
    pub const ALL: [Lithology; 7] = [
        Lithology::Sandstone,
        Lithology::ArgillaceousSandstone,
        Lithology::Shale,
        Lithology::Limestone,
        Lithology::Carbonate,
        Lithology::Dolomite,
        Lithology::Conglomerate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Lithology::Sandstone => "SANDSTONE",
            Lithology::ArgillaceousSandstone => "ARGILLACEOUS_SANDSTONE",
            Lithology::Shale => "SHALE",
            Lithology::Limestone => "LIMESTONE",
            Lithology::Carbonate => "CARBONATE",
            Lithology::Dolomite => "DOLOMITE",
            Lithology::Conglomerate => "CONGLOMERATE",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Lithology::Sandstone => (0xFF, 0xE1, 0x7F),
            Lithology::ArgillaceousSandstone => (0xD4, 0xAC, 0x0D),
            Lithology::Shale => (0x80, 0x80, 0x80),
            Lithology::Limestone | Lithology::Carbonate => (0x87, 0xCE, 0xEB),
            Lithology::Dolomite => (0xFF, 0xB6, 0xC1),
            Lithology::Conglomerate => (0xCD, 0x85, 0x3F),
        }
    }

    pub fn color(&self) -> Rgb {
        let (r, g, b) = self.rgb();
        Rgb::new(r, g, b)
    }

    /// Matrix density used for this label's porosity, g/cc.
    pub fn matrix_density(&self, dominant_matrix_density: f64) -> f64 {
        match self {
            Lithology::Dolomite => 2.87,
            Lithology::Limestone | Lithology::Carbonate => 2.71,
            Lithology::Shale => 2.70,
            _ => dominant_matrix_density,
        }
    }
}

impl fmt::Display for Lithology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown lithology label: {0}")]
pub struct UnknownLithology(pub String);

impl FromStr for Lithology {
    type Err = UnknownLithology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_uppercase().replace(' ', "_");
        Lithology::ALL
            .into_iter()
            .find(|lithology| lithology.label() == label)
            .ok_or_else(|| UnknownLithology(s.to_string()))
    }
}

/// Hex colour of a free-form label; unknown labels are neutral gray.
pub fn color_for_label(label: &str) -> String {
    let (r, g, b) = label
        .parse::<Lithology>()
        .map(|lithology| lithology.rgb())
        .unwrap_or(UNKNOWN_COLOR);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Classifier inputs with the neutral defaults already substituted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LithologyInputs {
    pub vsh: f64,
    pub density: f64,
    /// Carried for completeness; no rule reads it.
    pub neutron_porosity: f64,
    pub photoelectric_factor: Option<f64>,
    pub dominant_matrix: Matrix,
}

impl LithologyInputs {
    /// Missing VSH becomes 0.5, missing density the matrix density and
    /// missing neutron porosity 0.15, so every sample gets a label.
    pub fn new(
        vsh: Option<f64>,
        density: Option<f64>,
        neutron_porosity: Option<f64>,
        photoelectric_factor: Option<f64>,
        dominant_matrix: Matrix,
    ) -> Self {
        Self {
            vsh: vsh.unwrap_or(0.5),
            density: density.unwrap_or_else(|| dominant_matrix.density()),
            neutron_porosity: neutron_porosity.unwrap_or(0.15),
            photoelectric_factor,
            dominant_matrix,
        }
    }
}

/// One step of the decision tree; `None` hands over to the next rule.
pub struct LithologyRule {
    pub name: &'static str,
    pub evaluate: fn(&LithologyInputs) -> Option<Lithology>,
}

/// Decision tree, first match wins.
pub const RULES: [LithologyRule; 4] = [
    LithologyRule {
        name: "shale cutoff",
        evaluate: shale_rule,
    },
    LithologyRule {
        name: "photoelectric factor",
        evaluate: photoelectric_rule,
    },
    LithologyRule {
        name: "shaly formation",
        evaluate: shaly_rule,
    },
    LithologyRule {
        name: "density",
        evaluate: density_rule,
    },
];

fn shale_rule(inputs: &LithologyInputs) -> Option<Lithology> {
    (inputs.vsh > 0.7).then_some(Lithology::Shale)
}

fn photoelectric_rule(inputs: &LithologyInputs) -> Option<Lithology> {
    let pef = inputs.photoelectric_factor?;
    if pef > 4.5 {
        if inputs.density > 2.80 {
            Some(Lithology::Dolomite)
        } else {
            Some(Lithology::Limestone)
        }
    } else if pef > 2.5 {
        Some(Lithology::Dolomite)
    } else if pef < 2.2 && inputs.vsh < 0.35 {
        Some(Lithology::Sandstone)
    } else {
        None
    }
}

fn shaly_rule(inputs: &LithologyInputs) -> Option<Lithology> {
    if inputs.vsh <= 0.35 {
        return None;
    }
    if inputs.density > 2.68 {
        Some(Lithology::Limestone)
    } else {
        Some(Lithology::ArgillaceousSandstone)
    }
}

fn density_rule(inputs: &LithologyInputs) -> Option<Lithology> {
    let lithology = if inputs.density > 2.78 {
        Lithology::Dolomite
    } else if inputs.density > 2.68 {
        Lithology::Limestone
    } else if inputs.density > 2.60 {
        match inputs.dominant_matrix {
            Matrix::Limestone => Lithology::Limestone,
            Matrix::Dolomite => Lithology::Dolomite,
            Matrix::Sandstone => Lithology::Sandstone,
        }
    } else {
        Lithology::Sandstone
    };
    Some(lithology)
}

pub fn classify(inputs: &LithologyInputs) -> Lithology {
    RULES
        .iter()
        .find_map(|rule| {
            let lithology = (rule.evaluate)(inputs)?;
            log::trace!("Rule '{}' matched: {}", rule.name, lithology);
            Some(lithology)
        })
        .unwrap_or(Lithology::Sandstone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(vsh: f64, density: f64, pef: Option<f64>, matrix: Matrix) -> LithologyInputs {
        LithologyInputs::new(Some(vsh), Some(density), Some(0.15), pef, matrix)
    }

    #[test]
    fn test_shale_wins_regardless() {
        for pef in [None, Some(1.0), Some(3.0), Some(5.0)] {
            for density in [2.2, 2.65, 2.9] {
                let lithology = classify(&inputs(0.8, density, pef, Matrix::Dolomite));
                assert_eq!(lithology, Lithology::Shale);
            }
        }
    }

    #[test]
    fn test_photoelectric_rule() {
        let rule = |pef, density, vsh| {
            photoelectric_rule(&inputs(vsh, density, Some(pef), Matrix::Sandstone))
        };
        assert_eq!(rule(5.0, 2.85, 0.1), Some(Lithology::Dolomite));
        assert_eq!(rule(5.0, 2.70, 0.1), Some(Lithology::Limestone));
        assert_eq!(rule(3.0, 2.40, 0.1), Some(Lithology::Dolomite));
        assert_eq!(rule(4.5, 2.40, 0.1), Some(Lithology::Dolomite));
        assert_eq!(rule(2.0, 2.70, 0.2), Some(Lithology::Sandstone));
        assert_eq!(rule(2.0, 2.70, 0.5), None);
        assert_eq!(rule(2.3, 2.70, 0.1), None);
        assert_eq!(photoelectric_rule(&inputs(0.1, 2.7, None, Matrix::Sandstone)), None);
    }

    #[test]
    fn test_shaly_rule() {
        assert_eq!(
            shaly_rule(&inputs(0.5, 2.70, None, Matrix::Sandstone)),
            Some(Lithology::Limestone)
        );
        assert_eq!(
            shaly_rule(&inputs(0.5, 2.50, None, Matrix::Sandstone)),
            Some(Lithology::ArgillaceousSandstone)
        );
        assert_eq!(shaly_rule(&inputs(0.35, 2.50, None, Matrix::Sandstone)), None);
    }

    #[test]
    fn test_density_rule_defers_to_matrix() {
        let rule = |density, matrix| density_rule(&inputs(0.1, density, None, matrix));
        assert_eq!(rule(2.80, Matrix::Sandstone), Some(Lithology::Dolomite));
        assert_eq!(rule(2.70, Matrix::Sandstone), Some(Lithology::Limestone));
        assert_eq!(rule(2.65, Matrix::Limestone), Some(Lithology::Limestone));
        assert_eq!(rule(2.65, Matrix::Dolomite), Some(Lithology::Dolomite));
        assert_eq!(rule(2.65, Matrix::Sandstone), Some(Lithology::Sandstone));
        assert_eq!(rule(2.40, Matrix::Dolomite), Some(Lithology::Sandstone));
    }

    #[test]
    fn test_neutral_defaults() {
        let defaults = LithologyInputs::new(None, None, None, None, Matrix::Limestone);
        assert_eq!(defaults.vsh, 0.5);
        assert_eq!(defaults.density, 2.71);
        assert_eq!(defaults.neutron_porosity, 0.15);
        // vsh 0.5 and density 2.71 land in the shaly rule
        assert_eq!(classify(&defaults), Lithology::Limestone);
    }

    #[test]
    fn test_limestone_sample_in_limestone_well() {
        let sample =
            LithologyInputs::new(Some(0.2), Some(2.66), Some(0.18), None, Matrix::Limestone);
        assert_eq!(classify(&sample), Lithology::Limestone);
    }

    #[test]
    fn test_matrix_density_per_label() {
        assert_eq!(Lithology::Dolomite.matrix_density(2.65), 2.87);
        assert_eq!(Lithology::Limestone.matrix_density(2.65), 2.71);
        assert_eq!(Lithology::Carbonate.matrix_density(2.65), 2.71);
        assert_eq!(Lithology::Shale.matrix_density(2.65), 2.70);
        assert_eq!(Lithology::Sandstone.matrix_density(2.71), 2.71);
        assert_eq!(Lithology::ArgillaceousSandstone.matrix_density(2.65), 2.65);
    }

    #[test]
    fn test_label_colors() {
        assert_eq!(color_for_label("SANDSTONE"), "#FFE17F");
        assert_eq!(color_for_label("argillaceous sandstone"), "#D4AC0D");
        assert_eq!(color_for_label("CARBONATE"), color_for_label("LIMESTONE"));
        assert_eq!(color_for_label("ANHYDRITE"), "#CCCCCC");
        assert_eq!("conglomerate".parse::<Lithology>(), Ok(Lithology::Conglomerate));
    }
}
