//! Integration tests for pump-probe readings
//!
//! Readings are written to disk in the instrument's cp932 layout, decoded,
//! paired and exported.

use encoding_rs::SHIFT_JIS;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;
use tlab::export::{self, ExportConfig};
use tlab::offset::OffsetDetector;
use tlab::pomp_probe::{PairError, PompProbeOptions, PompProbePair, PompProbeRecord};

const ROWS: usize = 200;
const ONSET_ROW: usize = 80;

/// Write a reading whose signal rises to `amplitude` mV at `ONSET_ROW`
fn write_reading(path: &Path, amplitude: f64, rows: usize) {
    let mut text = String::from("\n8.2\n9.7\n");
    text.push_str(&"\0".repeat(64));
    text.push_str("\n0\n0\n0\n");
    text.push_str(&"\0".repeat(256));
    text.push_str(&format!("\n{}\n", rows));
    for _ in 0..10 {
        text.push_str("\"no data\"\n");
    }
    text.push_str("x (cm),強度1 (mv),強度2 (mV),Unnamed: 3,Unnamed: 4\n");
    for i in 0..rows {
        let x = 8.2 + 0.01 * i as f64;
        let noise = if i % 2 == 0 { 0.0 } else { 0.002 };
        let signal = if i < ONSET_ROW {
            0.0
        } else {
            amplitude * (-((i - ONSET_ROW) as f64) / 40.0).exp()
        };
        text.push_str(&format!("{},{},{},,\n", x, signal + noise, -signal));
    }
    fs::write(path, SHIFT_JIS.encode(&text).0).unwrap();
}

/// Test the complete read-correct-export cycle for one reading
#[test]
fn test_reading_to_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("RR.csv");
    let output = dir.path().join("RR_out.csv");
    write_reading(&input, 0.8, ROWS);

    let reading = PompProbeRecord::decode(&input).unwrap();
    assert_eq!(reading.len(), ROWS);

    let onset = reading.applied_offset().unwrap().index;
    assert_eq!(onset, ONSET_ROW - 3);
    assert_eq!(reading.time()[onset], 0.0);
    // One stage step of 0.01 cm is a third of a picosecond
    assert!((reading.time()[onset + 3] - 1.0).abs() < 1e-9);

    let stats = export::write_table(&output, &reading, &ExportConfig::default(), &[]).unwrap();
    assert_eq!(stats.rows_written, ROWS);

    let text = fs::read_to_string(&output).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("time,intensity"));
    assert_eq!(lines.count(), ROWS);
}

#[test]
fn test_pair_to_parquet() {
    let dir = tempdir().unwrap();
    let rr_path = dir.path().join("RR.csv");
    let rl_path = dir.path().join("RL.csv");
    let output = dir.path().join("polarization.parquet");
    write_reading(&rr_path, 0.9, ROWS);
    write_reading(&rl_path, 0.3, ROWS);

    let pair = PompProbePair::from_two_readings(&rr_path, &rl_path, None).unwrap();
    let polarization = pair.polarization();
    assert_eq!(polarization.len(), ROWS);

    // Right after the rise the signal dwarfs the noise: (0.9 - 0.3) / 1.2
    let peak = polarization.spin_polarization[ONSET_ROW];
    assert!((peak - 50.0).abs() < 0.5);

    let stats =
        export::write_table(&output, polarization, &ExportConfig::default(), &[]).unwrap();
    assert_eq!(stats.rows_written, ROWS);

    let reader = SerializedFileReader::new(File::open(&output).unwrap()).unwrap();
    let file_metadata = reader.metadata().file_metadata();
    assert_eq!(file_metadata.num_rows() as usize, ROWS);
    let columns: Vec<String> = (0..file_metadata.schema_descr().num_columns())
        .map(|i| file_metadata.schema_descr().column(i).name().to_string())
        .collect();
    assert_eq!(columns, vec!["time", "RR", "RL", "SpinPolarization"]);
}

#[test]
fn test_pair_with_different_lengths() {
    let dir = tempdir().unwrap();
    let rr_path = dir.path().join("RR.csv");
    let rl_path = dir.path().join("RL.csv");
    write_reading(&rr_path, 0.9, ROWS);
    write_reading(&rl_path, 0.3, ROWS - 20);

    let result = PompProbePair::from_two_readings(&rr_path, &rl_path, None);
    assert!(matches!(
        result,
        Err(PairError::LengthMismatch { rr: ROWS, rl }) if rl == ROWS - 20
    ));
}

#[test]
fn test_custom_detector_moves_onset() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("RR.csv");
    write_reading(&input, 0.8, ROWS);

    let options = PompProbeOptions::default()
        .with_intensity_offset(false)
        .with_detector(OffsetDetector::default().with_lookahead(0));
    let reading = PompProbeRecord::from_source(&input, &options).unwrap();

    let applied = reading.applied_offset().unwrap();
    assert_eq!(applied.index, ONSET_ROW);
    assert!(applied.intensity_offset.is_none());
    assert_eq!(reading.time()[ONSET_ROW], 0.0);
}
