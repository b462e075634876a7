// ayatscope-core/tests/corpus_loading_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use ayatscope_core::{AnalysisError, Corpus, Verse};

fn temp_with_suffix(suffix: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_raw_dump_skips_malformed_lines() -> Result<()> {
    let raw = "\
1|2|Segala puji bagi Allah
1|1|Dengan nama Allah
not a verse
2|x|Alif Lam Mim
2|1|a|b

2|2|Kitab ini tidak ada keraguan
";
    let file = temp_with_suffix(".txt", raw)?;
    let (corpus, summary) = Corpus::load(file.path())?;

    assert_eq!(summary.accepted, 3);
    assert_eq!(summary.skipped, 3);
    let keys: Vec<(u32, u32)> = corpus.iter().map(|v| (v.group_id, v.index_in_group)).collect();
    assert_eq!(keys, vec![(1, 1), (1, 2), (2, 2)]);
    assert_eq!(corpus.group_ids(), vec![1, 2]);
    Ok(())
}

#[test]
fn test_csv_written_by_convert_loads_identically() -> Result<()> {
    let corpus = Corpus::from_verses(vec![
        Verse::new(1, 1, "Dengan nama Allah, Yang Maha Pengasih"),
        Verse::new(1, 2, "Segala \"puji\" bagi Allah"),
    ]);

    let file = Builder::new().suffix(".csv").tempfile()?;
    corpus.write_csv(file.as_file())?;

    let header = std::fs::read_to_string(file.path())?;
    assert!(header.starts_with("surah,ayat,teks"));

    let (reloaded, summary) = Corpus::load(file.path())?;
    assert_eq!(summary.skipped, 0);
    assert_eq!(reloaded, corpus);
    assert_eq!(reloaded.fingerprint(), corpus.fingerprint());
    Ok(())
}

#[test]
fn test_csv_bad_rows_are_skipped() -> Result<()> {
    let file = temp_with_suffix(".csv", "surah,ayat,teks\n1,1,satu\nx,2,dua\n1,3,tiga\n")?;
    let (corpus, summary) = Corpus::load(file.path())?;
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(corpus.verses()[1].text, "tiga");
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let err = Corpus::load("/definitely/not/here/corpus.txt").unwrap_err();
    match err {
        AnalysisError::CorpusRead { path, .. } => {
            assert!(path.ends_with("corpus.txt"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_fingerprint_tracks_content() {
    let a = Corpus::from_verses(vec![Verse::new(1, 1, "ab")]);
    let b = Corpus::from_verses(vec![Verse::new(1, 1, "a b")]);
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint(), a.clone().fingerprint());
}
