//! Tests for reading registry files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use regpop_ingest::{IngestError, IngestOptions, SourceEncoding, read_registry};

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    dir.push(format!("regpop_ingest_{pid}_{name}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &Path) {
    let _ = fs::remove_file(path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

const REGISTRY: &str = "행정구역,2019년_총인구,2020년_총인구\n\
전국  (0000000000),\"51,849,861\",\"51,829,136\"\n\
서울특별시  (1100000000),\"9,729,107\",\"9,668,465\"\n\
부산광역시  (2600000000),,\"3,391,946\"\n";

#[test]
fn reads_euc_kr_registry() {
    let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(REGISTRY);
    assert!(!had_errors);
    let path = temp_file("euc_kr.csv", &bytes);

    let raw = read_registry(&path, &IngestOptions::default()).expect("read registry");

    assert_eq!(
        raw.headers(),
        vec!["행정구역", "2019년_총인구", "2020년_총인구"]
    );
    assert_eq!(raw.row_count(), 3);
    assert_eq!(
        raw.rows()[1][0].as_deref(),
        Some("서울특별시  (1100000000)")
    );
    assert_eq!(raw.rows()[2][1], None);
    assert_eq!(raw.missing_cells(), 1);

    cleanup(&path);
}

#[test]
fn reads_utf8_registry() {
    let path = temp_file("utf8.csv", REGISTRY.as_bytes());
    let options = IngestOptions::new().with_encoding(SourceEncoding::Utf8);

    let raw = read_registry(&path, &options).expect("read registry");

    assert_eq!(raw.rows()[2][2].as_deref(), Some("3,391,946"));

    cleanup(&path);
}

#[test]
fn truncated_multibyte_sequence_fails_to_decode() {
    let path = temp_file("truncated.csv", b"a,b\n\x81\n");

    let err = read_registry(&path, &IngestOptions::default()).unwrap_err();

    assert!(matches!(err, IngestError::Decode { encoding: "EUC-KR", .. }));

    cleanup(&path);
}

#[test]
fn missing_file_is_reported() {
    let path = std::env::temp_dir().join("regpop_ingest_does_not_exist.csv");
    let err = read_registry(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn short_rows_are_padded() {
    let path = temp_file(
        "short.csv",
        "행정구역,2019년_총인구,2020년_총인구\n서울특별시(1100000000),\"9,729,107\"\n".as_bytes(),
    );
    let options = IngestOptions::new().with_encoding(SourceEncoding::Utf8);

    let raw = read_registry(&path, &options).expect("read registry");

    assert_eq!(raw.rows()[0].len(), 3);
    assert_eq!(raw.rows()[0][2], None);

    cleanup(&path);
}
