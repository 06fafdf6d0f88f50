// petrors-logs/src/export/mod.rs

mod csv;
mod errors;
pub use self::csv::{
    write_well, write_well_to_path, write_wells, write_wells_to_path, COMBINED_HEADER, HEADER,
};
pub use errors::ExportError;

/// File-system friendly stem for a well's output files.
pub fn output_stem(well_name: &str) -> String {
    let stem: String = well_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "WELL".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem("POZO-7"), "POZO-7");
        assert_eq!(output_stem(" A 1/2 "), "A_1_2");
        assert_eq!(output_stem(""), "WELL");
    }
}
