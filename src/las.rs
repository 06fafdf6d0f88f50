// petrors-logs/src/las.rs
//! Minimal LAS 2.0 reader for unwrapped ASCII well logs.

use log::{debug, info, warn};
use ndarray::{Array2, ArrayView1, Axis};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_NULL_VALUE: f64 = -999.25;

#[derive(Clone, Debug, PartialEq)]
pub struct LasCurveInfo {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
}

/// Header entries and data of a LAS file. Missing samples are stored as NaN.
#[derive(Clone, Debug)]
pub struct LasFile {
    well_name: String,
    version: Option<String>,
    null_value: f64,
    curves: Vec<LasCurveInfo>,
    data: Array2<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curves,
    Data,
    Other,
}

struct HeaderLine<'a> {
    mnemonic: &'a str,
    unit: &'a str,
    value: &'a str,
    description: &'a str,
}

// MNEM.UNIT  VALUE : DESCRIPTION
fn parse_header_line(line: &str) -> Option<HeaderLine<'_>> {
    let (mnemonic, rest) = line.split_once('.')?;
    let (unit, rest) = match rest.find(char::is_whitespace) {
        Some(end) => rest.split_at(end),
        None => rest.split_at(rest.find(':').unwrap_or(rest.len())),
    };
    let (value, description) = rest.rsplit_once(':').unwrap_or((rest, ""));
    Some(HeaderLine {
        mnemonic: mnemonic.trim(),
        unit: unit.trim(),
        value: value.trim(),
        description: description.trim(),
    })
}

impl LasFile {
    /// Parses LAS text. The well name falls back to `UNNAMED` when the
    /// `WELL` entry is missing or empty.
    pub fn parse(text: &str) -> Result<Self, LasLoadError> {
        Self::parse_with_fallback_name(text, "UNNAMED")
    }

    /// Reads a LAS file from disk; the uppercased file stem names wells
    /// without a `WELL` entry.
    pub fn read(path: &Path) -> Result<Self, LasLoadError> {
        let text = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "UNNAMED".to_string());
        let las = Self::parse_with_fallback_name(&text, &stem)?;
        info!(
            "Read {}: well {}, {} curves, {} rows",
            path.display(),
            las.well_name,
            las.curves.len(),
            las.nrows()
        );
        Ok(las)
    }

    fn parse_with_fallback_name(text: &str, fallback_name: &str) -> Result<Self, LasLoadError> {
        let mut section = None;
        let mut seen_curves = false;
        let mut seen_data = false;
        let mut version = None;
        let mut well_name: Option<String> = None;
        let mut null_value = DEFAULT_NULL_VALUE;
        let mut curves = Vec::new();
        let mut raw_rows: Vec<(usize, &str)> = Vec::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('~') {
                let current = match header.chars().next().map(|c| c.to_ascii_uppercase()) {
                    Some('V') => Section::Version,
                    Some('W') => Section::Well,
                    Some('C') => Section::Curves,
                    Some('A') => Section::Data,
                    _ => Section::Other,
                };
                seen_curves |= current == Section::Curves;
                seen_data |= current == Section::Data;
                section = Some(current);
                continue;
            }
            match section {
                None => return Err(LasLoadError::InvalidFormat(index + 1, line.to_string())),
                Some(Section::Data) => raw_rows.push((index + 1, line)),
                Some(Section::Other) => {}
                Some(current) => {
                    let entry = parse_header_line(line)
                        .ok_or_else(|| LasLoadError::InvalidFormat(index + 1, line.to_string()))?;
                    match current {
                        Section::Version => match entry.mnemonic.to_uppercase().as_str() {
                            "VERS" => version = Some(entry.value.to_string()),
                            "WRAP" if entry.value.eq_ignore_ascii_case("YES") => {
                                return Err(LasLoadError::WrappedNotSupported)
                            }
                            _ => {}
                        },
                        Section::Well => match entry.mnemonic.to_uppercase().as_str() {
                            "NULL" => {
                                null_value = entry.value.parse().map_err(|_| {
                                    LasLoadError::InvalidNullValue(entry.value.to_string())
                                })?
                            }
                            "WELL" if !entry.value.is_empty() => {
                                well_name = Some(entry.value.to_string())
                            }
                            _ => {}
                        },
                        Section::Curves => curves.push(LasCurveInfo {
                            mnemonic: entry.mnemonic.to_string(),
                            unit: entry.unit.to_string(),
                            description: entry.description.to_string(),
                        }),
                        Section::Data | Section::Other => {}
                    }
                }
            }
        }

        if !seen_curves {
            return Err(LasLoadError::MissingSection("~C"));
        }
        if !seen_data {
            return Err(LasLoadError::MissingSection("~A"));
        }
        if curves.is_empty() {
            return Err(LasLoadError::NoCurves);
        }

        let ncols = curves.len();
        let mut values = Vec::with_capacity(raw_rows.len() * ncols);
        let mut unparsable = 0usize;
        for (line, row) in &raw_rows {
            let start = values.len();
            for token in row.split_whitespace() {
                let value = match token.parse::<f64>() {
                    Ok(v) if v.is_finite() && !is_null(v, null_value) => v,
                    Ok(_) => f64::NAN,
                    Err(_) => {
                        unparsable += 1;
                        f64::NAN
                    }
                };
                values.push(value);
            }
            let found = values.len() - start;
            if found != ncols {
                return Err(LasLoadError::RowLength {
                    line: *line,
                    expected: ncols,
                    found,
                });
            }
        }
        if unparsable > 0 {
            warn!("{} unparsable data values treated as missing", unparsable);
        }
        let data = Array2::from_shape_vec((raw_rows.len(), ncols), values)?;
        debug!(
            "Parsed LAS {:?}: NULL={}, curves={:?}",
            version,
            null_value,
            curves.iter().map(|c| c.mnemonic.as_str()).collect::<Vec<_>>()
        );
        Ok(Self {
            well_name: well_name.unwrap_or_else(|| fallback_name.to_string()),
            version,
            null_value,
            curves,
            data,
        })
    }

    pub fn well_name(&self) -> &str {
        &self.well_name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    pub fn curves(&self) -> &[LasCurveInfo] {
        &self.curves
    }

    pub fn mnemonics(&self) -> Vec<String> {
        self.curves.iter().map(|c| c.mnemonic.clone()).collect()
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Column `index` with NaN mapped to `None`. Out of range columns are
    /// empty.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        if index >= self.curves.len() {
            return Vec::new();
        }
        column_values(self.data.index_axis(Axis(1), index))
    }
}

fn column_values(column: ArrayView1<'_, f64>) -> Vec<Option<f64>> {
    column
        .iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

fn is_null(value: f64, null_value: f64) -> bool {
    (value - null_value).abs() < 1e-9
}

impl TryFrom<&PathBuf> for LasFile {
    type Error = LasLoadError;

    fn try_from(path: &PathBuf) -> Result<Self, Self::Error> {
        Self::read(path)
    }
}

#[derive(Error, Debug)]
pub enum LasLoadError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Invalid LAS line {0}: {1}")]
    InvalidFormat(usize, String),
    #[error("Wrapped LAS files are not supported")]
    WrappedNotSupported,
    #[error("Invalid NULL value: {0}")]
    InvalidNullValue(String),
    #[error("Missing {0} section")]
    MissingSection(&'static str),
    #[error("Data row at line {line} has {found} values, expected {expected}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("No curves defined in ~C section")]
    NoCurves,
    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
~VERSION INFORMATION
 VERS.   2.0 : CWLS LOG ASCII STANDARD
 WRAP.   NO  : ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.FT 1000.0 : START DEPTH
 NULL.   -999.25 : NULL VALUE
 WELL.   POZO-7 : WELL
~CURVE INFORMATION
 DEPT.FT        : MEASURED DEPTH
 GR  .GAPI      : GAMMA RAY
 RHOB.G/C3      : BULK DENSITY
~PARAMETER INFORMATION
 BHT .DEGC  90.0 : BOTTOM HOLE TEMPERATURE
# comment line
~A
1000.0  45.0  2.45
1000.5  -999.25  2.47
1001.0  60.0  abc
";

    #[test]
    fn test_parse_headers_and_data() {
        let las = LasFile::parse(SAMPLE).unwrap();
        assert_eq!(las.well_name(), "POZO-7");
        assert_eq!(las.version(), Some("2.0"));
        assert_eq!(las.null_value(), -999.25);
        assert_eq!(las.mnemonics(), vec!["DEPT", "GR", "RHOB"]);
        assert_eq!(las.curves()[2].unit, "G/C3");
        assert_eq!(las.curves()[1].description, "GAMMA RAY");
        assert_eq!(las.nrows(), 3);
        assert_eq!(las.column(0), vec![Some(1000.0), Some(1000.5), Some(1001.0)]);
        assert_eq!(las.column(1), vec![Some(45.0), None, Some(60.0)]);
        assert_eq!(las.column(2), vec![Some(2.45), Some(2.47), None]);
        assert!(las.column(9).is_empty());
    }

    #[test]
    fn test_custom_null_and_missing_well_name() {
        let text = "~W\n NULL. -9999 : NULL\n~C\n DEPTH.M : \n NPHI.V/V : \n~A\n1 -9999\n2 0.2\n";
        let las = LasFile::parse(text).unwrap();
        assert_eq!(las.well_name(), "UNNAMED");
        assert_eq!(las.column(1), vec![None, Some(0.2)]);
    }

    #[test]
    fn test_wrapped_files_rejected() {
        let text = "~V\n WRAP. YES : MULTIPLE LINES\n~C\n DEPT.FT : \n~A\n1\n";
        assert!(matches!(
            LasFile::parse(text),
            Err(LasLoadError::WrappedNotSupported)
        ));
    }

    #[test]
    fn test_row_length_mismatch() {
        let text = "~C\n DEPT.FT : \n GR.GAPI : \n~A\n1 2\n3\n";
        assert!(matches!(
            LasFile::parse(text),
            Err(LasLoadError::RowLength {
                line: 6,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(
            LasFile::parse("~C\n DEPT.FT : \n"),
            Err(LasLoadError::MissingSection("~A"))
        ));
        assert!(matches!(
            LasFile::parse("~A\n1 2\n"),
            Err(LasLoadError::MissingSection("~C"))
        ));
        assert!(matches!(
            LasFile::parse("~C\n~A\n"),
            Err(LasLoadError::NoCurves)
        ));
    }

    #[test]
    fn test_header_line_split() {
        let entry = parse_header_line("DEPT.FT   : MEASURED DEPTH").unwrap();
        assert_eq!((entry.mnemonic, entry.unit, entry.value), ("DEPT", "FT", ""));
        let entry = parse_header_line("DATE.  13-DEC-86 10:30 : LOG DATE").unwrap();
        assert_eq!(entry.value, "13-DEC-86 10:30");
        assert_eq!(entry.description, "LOG DATE");
        let entry = parse_header_line("NULL.  -999.25 : NULL VALUE").unwrap();
        assert_eq!(entry.unit, "");
        assert_eq!(entry.value, "-999.25");
        assert!(parse_header_line("no dot here").is_none());
    }
}
