//! End-to-end CLI tests for the generate and modify commands.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

use tgprep::textgrid::{Interval, IntervalTier, TextGrid, open_textgrid, save};

fn write_aligned_textgrid(path: &std::path::Path) {
    let mut tg = TextGrid::new();
    tg.add_tier(IntervalTier::with_entries(
        "realization - phone",
        0.0,
        2.0,
        vec![Interval::new(0.0, 0.4, "h"), Interval::new(0.4, 1.0, "ei")],
    ))
    .unwrap();
    tg.add_tier(IntervalTier::with_entries(
        "realization - word",
        0.0,
        2.0,
        vec![Interval::new(0.0, 1.0, "hei"), Interval::new(1.5, 2.0, "du")],
    ))
    .unwrap();
    tg.add_tier(IntervalTier::with_entries(
        "realization - trans",
        0.0,
        2.0,
        vec![Interval::new(0.0, 2.0, "hei du")],
    ))
    .unwrap();
    save(&tg, path, true).unwrap();
}

#[test]
fn test_generate_writes_one_textgrid_per_participant() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("responses.csv");
    std::fs::write(
        &csv,
        "participant;start_time;end_time;response\nS01;0.5;1.2;ja\nS02;0;2;nei\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("generate")
        .arg(&csv)
        .arg("--output-dir")
        .arg(&out)
        .arg("--quiet");
    cmd.assert().success();

    let tg = open_textgrid(&out.join("S01.TextGrid"), false).unwrap();
    let tier = tg.tier("response").unwrap().as_interval().unwrap();
    assert_eq!(tier.entries.len(), 1);
    assert_eq!(tier.entries[0].label, "ja");
    assert!(out.join("S02.TextGrid").is_file());
}

#[test]
fn test_generate_default_output_dir_is_beside_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("responses.csv");
    std::fs::write(
        &csv,
        "participant;start_time;end_time;response\nS01;0;1;ja\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("generate").arg(&csv).arg("--quiet");
    cmd.assert().success();

    assert!(dir.path().join("textgrids").join("S01.TextGrid").is_file());
}

#[test]
fn test_generate_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("responses.csv");
    std::fs::write(&csv, "participant;start_time;response\nS01;0;ja\n").unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("generate").arg(&csv).arg("--quiet");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("end_time"));
}

#[test]
fn test_modify_restructures_and_skips_other_files() {
    let dir = tempfile::tempdir().unwrap();
    write_aligned_textgrid(&dir.path().join("S01.TextGrid"));
    // Non-TextGrid files in the input directory are skipped silently.
    std::fs::write(dir.path().join("S01.wav"), "not audio").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "notes").unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("modify")
        .arg(dir.path())
        .arg("--unit-marker")
        .arg("σ")
        .arg("--quiet");
    cmd.assert().success();

    let out_dir = dir.path().join("modified_textgrids");
    let tg = open_textgrid(&out_dir.join("S01.TextGrid"), false).unwrap();
    assert_eq!(
        tg.tier_names(),
        vec![
            "stress (S|SS|0)",
            "prosodic unit",
            "emphasis (E)",
            "uniquenumb",
            "realization",
            "translation",
            "comment",
            "word",
            "phone",
        ]
    );

    // Only the TextGrid was processed.
    assert!(!out_dir.join("S01.wav").exists());
    assert!(!out_dir.join("readme.txt").exists());
}

#[test]
fn test_modify_joins_csv_rows_by_participant() {
    let dir = tempfile::tempdir().unwrap();
    write_aligned_textgrid(&dir.path().join("S01.TextGrid"));
    let csv = dir.path().join("trials.csv");
    std::fs::write(
        &csv,
        "participant;start_time;end_time;uniquenumb\nS01;0,5;1,2;7\nS02;0;1;9\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("modify")
        .arg(dir.path())
        .arg("--csv")
        .arg(&csv)
        .arg("--quiet");
    cmd.assert().success();

    let tg = open_textgrid(
        &dir.path().join("modified_textgrids").join("S01.TextGrid"),
        false,
    )
    .unwrap();
    let numb = tg.tier("uniquenumb").unwrap().as_interval().unwrap();
    assert_eq!(numb.entries.len(), 1);
    assert_eq!(numb.entries[0].label, "7");
}

#[test]
fn test_modify_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("modify").arg(dir.path()).arg("--quiet");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(".TextGrid"));
}

#[test]
fn test_modify_is_rerunnable() {
    // The output directory already existing must not be an error.
    let dir = tempfile::tempdir().unwrap();
    write_aligned_textgrid(&dir.path().join("S01.TextGrid"));

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("tgprep");
        cmd.arg("modify").arg(dir.path()).arg("--quiet");
        cmd.assert().success();
    }
}

#[test]
fn test_generate_reads_csv_with_utf8_bom() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("responses.csv");
    std::fs::write(
        &csv,
        "\u{feff}participant;start_time;end_time;response\nS01;0;1;ja\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("generate").arg(&csv).arg("--quiet");
    cmd.assert().success();

    assert!(dir.path().join("textgrids").join("S01.TextGrid").is_file());
}

#[test]
fn test_seed_builds_textgrid_from_audio_duration() {
    let dir = tempfile::tempdir().unwrap();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(dir.path().join("trial_01.wav"), spec).unwrap();
    for _ in 0..16000 {
        writer.write_sample(0_i16).unwrap();
    }
    writer.finalize().unwrap();

    let csv = dir.path().join("realization.csv");
    std::fs::write(
        &csv,
        "audio_filename;participant;duration;realization\ntrial_01.wav;S01;1,5;hei du\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("seed")
        .arg(&csv)
        .arg(dir.path())
        .arg("--quiet");
    cmd.assert().success();

    let tg = open_textgrid(
        &dir.path().join("textgrids").join("trial_01.TextGrid"),
        false,
    )
    .unwrap();
    assert!((tg.max_time - 2.0).abs() < 1e-9);
    let tier = tg.tier("realization").unwrap().as_interval().unwrap();
    assert_eq!(tier.entries[0].label, "hei du");
    assert!((tier.entries[0].end - 1.5).abs() < 1e-9);
}

#[test]
fn test_config_path_prints_toml_path() {
    let mut cmd = cargo_bin_cmd!("tgprep");
    cmd.arg("config").arg("path");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
