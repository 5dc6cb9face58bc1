//! CSV layout of pump-probe readings
//!
//! The acquisition software writes a fixed preamble of 18 lines (scan
//! settings, counts and placeholders), then a header row and one
//! comma-separated row per delay-stage position. Files are written in the
//! Japanese Windows codepage (cp932) unless the instrument was configured
//! otherwise.

use encoding_rs::{Encoding, SHIFT_JIS};
use log::{debug, warn};

use super::PompProbeError;
use crate::offset::{OffsetCorrection, OffsetDetector};
use crate::series::Transient;

/// Default text encoding label
pub const DEFAULT_ENCODING: &str = "cp932";
/// Non-blank lines before the header row
pub const PREAMBLE_LINES: usize = 18;
/// Delay-stage position column, in cm
pub const POSITION_COLUMN: &str = "x (cm)";
/// Channel 1 lock-in signal column, in mV
pub const INTENSITY_COLUMN: &str = "強度1 (mv)";
/// Speed of light in cm/ps
pub const SPEED_OF_LIGHT: f64 = 3.0e-2;
/// Scale from mV readings to arbitrary intensity units
pub const INTENSITY_SCALE: f64 = 1000.0;

/// Layout constants of the CSV format
#[derive(Debug, Clone, PartialEq)]
pub struct PompProbeFormat {
    /// Non-blank lines skipped before the header row
    pub preamble_lines: usize,
    /// Name of the position column
    pub position_column: String,
    /// Name of the intensity column
    pub intensity_column: String,
    /// Divisor converting position (cm) into time (ps)
    pub speed_of_light: f64,
    /// Factor applied to the intensity readings
    pub intensity_scale: f64,
}

impl Default for PompProbeFormat {
    fn default() -> Self {
        Self {
            preamble_lines: PREAMBLE_LINES,
            position_column: POSITION_COLUMN.to_string(),
            intensity_column: INTENSITY_COLUMN.to_string(),
            speed_of_light: SPEED_OF_LIGHT,
            intensity_scale: INTENSITY_SCALE,
        }
    }
}

/// Options for decoding a pump-probe reading
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PompProbeOptions {
    /// Text encoding label; `None` means cp932
    pub encoding: Option<String>,
    /// Offset correction applied after decoding
    pub correction: OffsetCorrection,
    /// CSV layout
    pub format: PompProbeFormat,
}

impl PompProbeOptions {
    /// Use a specific text encoding
    pub fn with_encoding<S: Into<String>>(mut self, encoding: S) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Enable or disable time zeroing
    pub fn with_time_offset(mut self, enabled: bool) -> Self {
        self.correction.auto_time_offset = enabled;
        self
    }

    /// Enable or disable baseline subtraction
    pub fn with_intensity_offset(mut self, enabled: bool) -> Self {
        self.correction.auto_intensity_offset = enabled;
        self
    }

    /// Use a specific onset detector
    pub fn with_detector(mut self, detector: OffsetDetector) -> Self {
        self.correction.detector = detector;
        self
    }
}

/// Resolve an encoding label; `cp932` maps to Shift_JIS
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding, PompProbeError> {
    let label = label.unwrap_or(DEFAULT_ENCODING).trim();
    if label.eq_ignore_ascii_case("cp932") {
        return Ok(SHIFT_JIS);
    }
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| PompProbeError::UnknownEncoding(label.to_string()))
}

/// Decode raw file bytes into an uncorrected transient
pub fn parse(bytes: &[u8], options: &PompProbeOptions) -> Result<Transient, PompProbeError> {
    let encoding = resolve_encoding(options.encoding.as_deref())?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Input is not valid {}; undecodable bytes replaced",
            encoding.name()
        );
    }

    let format = &options.format;
    let body = skip_preamble(&text, format.preamble_lines);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let position_index = column_index(&headers, &format.position_column)?;
    let intensity_index = column_index(&headers, &format.intensity_column)?;

    let mut time = Vec::new();
    let mut intensity = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if is_blank_line(&record) {
            continue;
        }
        time.push(parse_cell(record.get(position_index)) / format.speed_of_light);
        intensity.push(parse_cell(record.get(intensity_index)) * format.intensity_scale);
    }

    debug!("Parsed {} pump-probe rows", time.len());

    Ok(Transient::from_rows(time, intensity))
}

/// Skip `count` non-blank lines and return the rest of the text
fn skip_preamble(text: &str, count: usize) -> &str {
    if count == 0 {
        return text;
    }
    let mut offset = 0;
    let mut seen = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if !line.trim().is_empty() {
            seen += 1;
            if seen == count {
                return &text[offset..];
            }
        }
    }
    ""
}

/// Whitespace-only lines carry no row
fn is_blank_line(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, PompProbeError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| PompProbeError::MissingColumn(name.to_string()))
}

/// Unparsable or missing cells become NaN
fn parse_cell(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_encoding() {
        assert_eq!(resolve_encoding(None).unwrap(), SHIFT_JIS);
        assert_eq!(resolve_encoding(Some("CP932")).unwrap(), SHIFT_JIS);
        assert_eq!(resolve_encoding(Some("UTF-8")).unwrap(), encoding_rs::UTF_8);
        assert!(matches!(
            resolve_encoding(Some("klingon")),
            Err(PompProbeError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_skip_preamble_ignores_blank_lines() {
        let text = "\na\n\nb\n  \nc\nheader\n1\n";
        assert_eq!(skip_preamble(text, 3), "header\n1\n");
        assert_eq!(skip_preamble(text, 0), text);
        assert_eq!(skip_preamble(text, 10), "");
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(Some(" 8.25 ")), 8.25);
        assert!(parse_cell(Some("")).is_nan());
        assert!(parse_cell(Some("no data")).is_nan());
        assert!(parse_cell(None).is_nan());
    }

    #[test]
    fn test_missing_column() {
        let options = PompProbeOptions {
            format: PompProbeFormat {
                preamble_lines: 0,
                ..Default::default()
            },
            ..Default::default()
        }
        .with_encoding("UTF-8");
        let result = parse(b"a,b\n1,2\n", &options);
        assert!(matches!(result, Err(PompProbeError::MissingColumn(name)) if name == POSITION_COLUMN));
    }
}
