//! End-to-end ingestion engine tests over synthetic input trees.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::TempDir;

use auscult_core::{cleanup_and_dedupe, ingest_all, patient_demographics};

fn write_wav(path: &Path, sample_rate: u32, seconds: f64) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let samples = (sample_rate as f64 * seconds) as usize;
    for _ in 0..samples {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Two tabular rows and one WAV share a basename; the tabular rows lack
/// acoustic metadata and the probe supplies it.
fn merge_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("hospital_a");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(
        site.join("sessions.csv"),
        "patient_id,filename,recording_date,diagnosis\n\
         P123,P123_Anterior_Left.wav,2023-05-17,healthy\n\
         P123,P123_Anterior_Left.wav,2023-05-17,\n",
    )
    .unwrap();
    write_wav(&site.join("P123_Anterior_Left.wav"), 44_100, 3.0);
    dir
}

#[test]
fn probe_fills_missing_acoustics_without_new_records() {
    let dir = merge_fixture();
    let outcome = ingest_all(dir.path()).unwrap();

    // Both tabular rows enriched; the wav spawned no orphan.
    assert_eq!(outcome.summary.tabular_rows, 2);
    assert_eq!(outcome.summary.enriched_records, 2);
    assert_eq!(outcome.summary.orphan_records, 0);
    assert_eq!(outcome.records.len(), 2);

    for record in &outcome.records {
        assert_eq!(record.sample_rate, Some(44_100));
        assert_eq!(record.bit_depth, Some(16));
        let duration = record.duration_seconds.unwrap();
        assert!((duration - 3.0).abs() < 1e-6);
        // Curated metadata survives enrichment untouched.
        assert_eq!(record.patient_id.as_deref(), Some("P123"));
        assert_eq!(
            record.timestamp.unwrap().format("%Y-%m-%d").to_string(),
            "2023-05-17"
        );
        assert_eq!(record.source_name, "hospital_a");
    }

    let deduped = cleanup_and_dedupe(outcome.records);
    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped[0].diagnosis.as_deref(), Some("healthy"));
}

#[test]
fn orphan_wav_synthesizes_a_record_from_name_and_probe() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("hospital_b");
    std::fs::create_dir_all(&site).unwrap();
    write_wav(&site.join("P456_Posterior_Right_20230601_Bell.wav"), 8_000, 2.5);

    let outcome = ingest_all(dir.path()).unwrap();
    assert_eq!(outcome.summary.orphan_records, 1);
    assert_eq!(outcome.records.len(), 1);

    let record = &outcome.records[0];
    assert_eq!(record.patient_id.as_deref(), Some("P456"));
    assert_eq!(record.recording_location.as_deref(), Some("Posterior_Right"));
    assert_eq!(record.filter_mode.as_deref(), Some("Bell"));
    assert_eq!(record.sample_rate, Some(8_000));
    assert_eq!(record.hospital_site.as_deref(), Some("hospital_b"));
    assert_eq!(record.source_name, "hospital_b");
    // Probe mtime outranks the filename date as the fallback timestamp.
    assert!(record.timestamp.is_some());
}

#[test]
fn reingestion_is_idempotent() {
    let dir = merge_fixture();
    let first = ingest_all(dir.path()).unwrap();
    let second = ingest_all(dir.path()).unwrap();

    let ids = |records: &[auscult_model::CanonicalAudioRecord]| {
        records
            .iter()
            .map(|r| r.recording_id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first.records), ids(&second.records));
    assert_eq!(
        cleanup_and_dedupe(first.records),
        cleanup_and_dedupe(second.records)
    );
}

#[test]
fn spanish_headers_resolve_and_rows_without_ids_use_filenames() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("clinica");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(
        site.join("metadatos.csv"),
        "archivo,edad,genero,fecha\n\
         P789_Diaphragm.wav,41,masculino,01/06/2023\n",
    )
    .unwrap();

    let outcome = ingest_all(dir.path()).unwrap();
    let record = &outcome.records[0];
    // No patient column: the id comes from the filename.
    assert_eq!(record.patient_id.as_deref(), Some("P789"));
    assert_eq!(record.filter_mode.as_deref(), Some("Diaphragm"));
    assert_eq!(record.age, Some(41.0));
    assert_eq!(record.gender.map(|g| g.as_str()), Some("M"));
    assert_eq!(
        record.timestamp.unwrap().format("%Y-%m-%d").to_string(),
        "2023-06-01"
    );
    // No hospital column either: the partition is the default site.
    assert_eq!(record.hospital_site.as_deref(), Some("clinica"));
}

#[test]
fn unreadable_sources_degrade_without_aborting() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("hospital_c");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(site.join("broken.json"), "{definitely not json").unwrap();
    std::fs::write(site.join("broken.wav"), "not a riff container").unwrap();
    std::fs::write(
        site.join("good.csv"),
        "patient_id,sample_rate\nP111,48k\n",
    )
    .unwrap();

    let outcome = ingest_all(dir.path()).unwrap();
    // The corrupt wav still synthesizes a (metadata-less) record keyed
    // by its name; the corrupt json contributes nothing.
    assert_eq!(outcome.summary.tabular_files, 1);
    let good = outcome
        .records
        .iter()
        .find(|r| r.patient_id.as_deref() == Some("P111"))
        .expect("csv row ingested");
    assert_eq!(good.sample_rate, Some(48_000));
}

#[test]
fn missing_input_directory_is_fatal() {
    assert!(ingest_all(Path::new("/nonexistent/raw_ingest")).is_err());
}

#[test]
fn demographics_aggregate_across_sources() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("hospital_a");
    std::fs::create_dir_all(&site).unwrap();
    std::fs::write(
        site.join("visits.csv"),
        "patient_id,age,gender,recording_date,filename\n\
         P123,29,,2023-01-10,a.wav\n\
         P123,34,M,2023-03-10,b.wav\n",
    )
    .unwrap();

    let outcome = ingest_all(dir.path()).unwrap();
    let records = cleanup_and_dedupe(outcome.records);
    let patients = patient_demographics(&records);
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].age, Some(34.0));
    assert_eq!(patients[0].gender.map(|g| g.as_str()), Some("M"));
}
