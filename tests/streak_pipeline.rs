//! Integration tests for streak images
//!
//! These tests run the full pipeline from a file on disk to exported tables.

use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::{self, File};
use tempfile::tempdir;
use tlab::export::{self, metadata_keys, ExportConfig};
use tlab::offset::OffsetCorrection;
use tlab::streak::{
    decode_batch, horizontal, StreakRecord, TIME_RESOLUTION, WAVELENGTH_RESOLUTION,
};

const CELLS: usize = TIME_RESOLUTION * WAVELENGTH_RESOLUTION;

fn axis(start: f32, step: f32, n: usize) -> Vec<f32> {
    (0..n).map(|i| start + step * i as f32).collect()
}

/// Flat background of 2 counts with a decaying emission line at column 320
fn emission_record() -> StreakRecord {
    let mut intensity = vec![2u32; CELLS];
    for row in 200..TIME_RESOLUTION {
        let decay = 1000.0 * (-((row - 200) as f64) / 60.0).exp();
        for col in 315..325 {
            intensity[row * WAVELENGTH_RESOLUTION + col] += decay as u32;
        }
    }

    StreakRecord::from_parts(
        tlab::streak::DEFAULT_HEADER.to_vec(),
        vec![
            "HiPic,1.0,100,1.0\r\n".to_string(),
            "Streak:Time=10 ns, Mode=Operate, Shutter=0\r\n".to_string(),
            "Spectrograph:Wavelength=490.000[nm], Grating=2 : 150g/mm\r\n".to_string(),
            "Date:2022/06/03,14:09:55\r\n".to_string(),
        ],
        axis(0.0, 10.0 / 479.0, TIME_RESOLUTION),
        axis(440.0, 0.15625, WAVELENGTH_RESOLUTION),
        intensity,
    )
    .unwrap()
}

/// Test the complete file-decode-aggregate cycle
#[test]
fn test_decode_file_and_aggregate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emission.img");
    fs::write(&path, emission_record().encode()).unwrap();

    let record = StreakRecord::decode(&path).unwrap();
    assert_eq!(record, emission_record());
    assert_eq!(record.long_table().len(), CELLS);

    let spectrum = record.to_hdf(None);
    assert_eq!(spectrum.len(), WAVELENGTH_RESOLUTION);
    let (peak_index, _) = spectrum
        .intensity
        .iter()
        .enumerate()
        .max_by_key(|&(_, v)| *v)
        .unwrap();
    assert!((315..325).contains(&peak_index));

    // Emission line only, no background columns
    let lo = f64::from(record.wavelength()[315]);
    let hi = f64::from(record.wavelength()[324]);
    let transient = record
        .to_vdf(Some((lo, hi)), &OffsetCorrection::default())
        .unwrap();
    assert_eq!(transient.len(), TIME_RESOLUTION);

    let onset = transient.time().iter().position(|&t| t == 0.0).unwrap();
    assert!((195..=200).contains(&onset));
    let baseline = &transient.intensity()[..onset];
    let mean = baseline.iter().sum::<f64>() / baseline.len() as f64;
    assert!(mean.abs() < 1e-6);
}

#[test]
fn test_hdf_matches_free_function() {
    let record = emission_record();
    let range = Some((1.0, 4.0));
    assert_eq!(record.to_hdf(range), horizontal(record.long_table(), range));
}

#[test]
fn test_export_long_table_to_parquet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.parquet");
    let record = emission_record();

    let metadata = export::streak_metadata(&record).unwrap();
    let stats =
        export::write_table(&path, record.long_table(), &ExportConfig::default(), &metadata)
            .unwrap();
    assert_eq!(stats.rows_written, CELLS);
    assert_eq!(stats.row_groups_written, 4);

    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    let file_metadata = reader.metadata().file_metadata();
    assert_eq!(file_metadata.num_rows() as usize, CELLS);
    assert_eq!(file_metadata.schema_descr().num_columns(), 3);

    let kv = file_metadata.key_value_metadata().unwrap();
    let lines = kv
        .iter()
        .find(|entry| entry.key == metadata_keys::METADATA)
        .and_then(|entry| entry.value.as_deref())
        .unwrap();
    assert!(lines.contains("Date:2022/06/03,14:09:55"));
}

#[test]
fn test_export_spectrum_to_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spectrum.csv");
    let spectrum = emission_record().to_hdf(Some((0.0, 1.0)));

    export::write_table(&path, &spectrum, &ExportConfig::default(), &[]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("wavelength,intensity"));
    assert_eq!(lines.count(), WAVELENGTH_RESOLUTION);
}

#[test]
fn test_decode_batch_reports_each_file() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.img");
    let short = dir.path().join("short.img");
    fs::write(&good, emission_record().encode()).unwrap();
    fs::write(&short, &emission_record().encode()[..1000]).unwrap();

    let results = decode_batch(&[good, short, dir.path().to_path_buf()]);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_err());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn small_record(times: usize, wavelengths: usize, seed: u32) -> StreakRecord {
        let intensity = (0..times * wavelengths)
            .map(|i| (i as u32).wrapping_mul(2_654_435_761).wrapping_add(seed) % 1000)
            .collect();
        StreakRecord::new(
            axis(0.0, 0.5, times),
            axis(400.0, 1.0, wavelengths),
            intensity,
        )
        .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// Any full-size record within u16 range survives encode/decode
        #[test]
        fn test_binary_roundtrip(seed in any::<u32>(), max in 1u32..=65_535) {
            let intensity: Vec<u32> = (0..CELLS as u32)
                .map(|i| i.wrapping_mul(2_654_435_761).wrapping_add(seed) % (max + 1))
                .collect();
            let record = StreakRecord::new(
                axis(0.0, 0.02, TIME_RESOLUTION),
                axis(440.0, 0.15625, WAVELENGTH_RESOLUTION),
                intensity,
            ).unwrap();

            let decoded = StreakRecord::decode(record.encode()).unwrap();
            prop_assert_eq!(decoded, record);
        }
    }

    proptest! {
        /// Row i of the long table broadcasts time[i / W] and wavelength[i % W]
        #[test]
        fn test_long_table_indexing(times in 1usize..20, wavelengths in 1usize..20, seed in any::<u32>()) {
            let record = small_record(times, wavelengths, seed);
            let table = record.long_table();
            prop_assert_eq!(table.len(), times * wavelengths);
            for i in 0..table.len() {
                prop_assert_eq!(table.time[i], record.time()[i / wavelengths]);
                prop_assert_eq!(table.wavelength[i], record.wavelength()[i % wavelengths]);
                prop_assert_eq!(table.intensity[i], record.intensity()[i]);
            }
        }

        /// The default time window is the full extent of the axis
        #[test]
        fn test_hdf_default_is_full_extent(times in 1usize..20, wavelengths in 1usize..20, seed in any::<u32>()) {
            let record = small_record(times, wavelengths, seed);
            let lo = f64::from(record.time()[0]);
            let hi = f64::from(record.time()[times - 1]);
            prop_assert_eq!(record.to_hdf(None), record.to_hdf(Some((lo, hi))));

            let total: u64 = record.intensity().iter().map(|&v| u64::from(v)).sum();
            prop_assert_eq!(record.to_hdf(None).intensity.iter().sum::<u64>(), total);
        }
    }
}
