//! Corpus ingestion for `ayatscope-core`.
//!
//! A corpus is an ordered list of verses. Two on-disk forms are supported:
//!
//! * the raw translation dump, one verse per line as `surah|ayat|text`;
//! * the converted CSV form with a `surah,ayat,teks` header.
//!
//! Malformed rows are skipped with a warning here, so the analysis stages
//! never see partial records.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::errors::AnalysisError;

/// A single verse of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Surah number (1..114).
    #[serde(rename = "surah")]
    pub group_id: u32,
    /// 1-based ayat number within the surah.
    #[serde(rename = "ayat")]
    pub index_in_group: u32,
    #[serde(rename = "teks")]
    pub text: String,
}

impl Verse {
    pub fn new(group_id: u32, index_in_group: u32, text: impl Into<String>) -> Self {
        Self {
            group_id,
            index_in_group,
            text: text.into(),
        }
    }
}

/// On-disk layout of a corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// `surah|ayat|text`, no header.
    Delimited,
    /// CSV with a `surah,ayat,teks` header.
    Csv,
}

impl CorpusFormat {
    /// Picks the format from the file extension; anything but `.csv` is delimited.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => CorpusFormat::Csv,
            _ => CorpusFormat::Delimited,
        }
    }
}

/// Row counts from a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub accepted: usize,
    pub skipped: usize,
}

/// An immutable, reading-ordered collection of verses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    verses: Vec<Verse>,
}

impl Corpus {
    /// Builds a corpus, stable-sorting verses into reading order (surah, then ayat).
    pub fn from_verses(mut verses: Vec<Verse>) -> Self {
        verses.sort_by_key(|v| (v.group_id, v.index_in_group));
        Self { verses }
    }

    /// Loads a corpus file, choosing the parser from the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, LoadSummary), AnalysisError> {
        let path = path.as_ref();
        let format = CorpusFormat::from_path(path);
        info!("Loading corpus from {} as {:?}", path.display(), format);

        let file = File::open(path).map_err(|source| AnalysisError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;

        let (corpus, summary) = match format {
            CorpusFormat::Delimited => Self::read_delimited(BufReader::new(file))?,
            CorpusFormat::Csv => Self::read_csv(file)?,
        };

        info!(
            "Loaded {} verses from {} ({} rows skipped).",
            summary.accepted,
            path.display(),
            summary.skipped
        );
        Ok((corpus, summary))
    }

    /// Parses the raw `surah|ayat|text` form.
    ///
    /// A line is accepted only when it splits into exactly three fields and
    /// both numeric fields parse.
    pub fn read_delimited<R: BufRead>(reader: R) -> Result<(Self, LoadSummary), AnalysisError> {
        let mut verses = Vec::new();
        let mut summary = LoadSummary::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('|').collect();
            if parts.len() != 3 {
                warn!(
                    "Skipping line {}: expected 3 '|'-separated fields, found {}.",
                    line_no + 1,
                    parts.len()
                );
                summary.skipped += 1;
                continue;
            }

            match (parts[0].trim().parse::<u32>(), parts[1].trim().parse::<u32>()) {
                (Ok(group_id), Ok(index_in_group)) => {
                    verses.push(Verse::new(group_id, index_in_group, parts[2]));
                    summary.accepted += 1;
                }
                _ => {
                    warn!("Skipping line {}: surah/ayat fields are not integers.", line_no + 1);
                    summary.skipped += 1;
                }
            }
        }

        Ok((Self::from_verses(verses), summary))
    }

    /// Parses the CSV form. Records that fail to deserialize are skipped;
    /// I/O failures abort the load.
    pub fn read_csv<R: Read>(reader: R) -> Result<(Self, LoadSummary), AnalysisError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut verses = Vec::new();
        let mut summary = LoadSummary::default();

        for (record_no, record) in csv_reader.deserialize::<Verse>().enumerate() {
            match record {
                Ok(verse) => {
                    verses.push(verse);
                    summary.accepted += 1;
                }
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping CSV record {}: {}", record_no + 1, e);
                    summary.skipped += 1;
                }
            }
        }

        Ok((Self::from_verses(verses), summary))
    }

    /// Writes the corpus as CSV with a `surah,ayat,teks` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), AnalysisError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for verse in &self.verses {
            csv_writer.serialize(verse)?;
        }
        csv_writer.flush()?;
        debug!("Wrote {} verses as CSV.", self.verses.len());
        Ok(())
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Verse> {
        self.verses.iter()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Distinct surah numbers, ascending.
    pub fn group_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.verses.iter().map(|v| v.group_id).collect();
        ids.dedup();
        ids
    }

    /// SHA-256 hex digest of the corpus content in reading order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for verse in &self.verses {
            hasher.update(verse.group_id.to_le_bytes());
            hasher.update(verse.index_in_group.to_le_bytes());
            hasher.update((verse.text.len() as u64).to_le_bytes());
            hasher.update(verse.text.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Verse;
    type IntoIter = std::slice::Iter<'a, Verse>;

    fn into_iter(self) -> Self::IntoIter {
        self.verses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_delimited_skips_malformed_lines() {
        let raw = "1|1|Dengan nama Allah\n\
                   1|2|Segala puji bagi Allah|extra\n\
                   x|3|bukan angka\n\
                   \n\
                   1|3|Yang Maha Pengasih\n";
        let (corpus, summary) = Corpus::read_delimited(raw.as_bytes()).unwrap();
        assert_eq!(summary, LoadSummary { accepted: 2, skipped: 2 });
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.verses()[1], Verse::new(1, 3, "Yang Maha Pengasih"));
    }

    #[test]
    fn test_from_verses_sorts_into_reading_order() {
        let corpus = Corpus::from_verses(vec![
            Verse::new(2, 1, "b1"),
            Verse::new(1, 2, "a2"),
            Verse::new(1, 1, "a1"),
        ]);
        let order: Vec<&str> = corpus.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(order, vec!["a1", "a2", "b1"]);
        assert_eq!(corpus.group_ids(), vec![1, 2]);
    }

    #[test]
    fn test_csv_round_trip_preserves_commas_and_quotes() {
        let corpus = Corpus::from_verses(vec![
            Verse::new(1, 1, "Dengan nama Allah, Yang Maha Pengasih"),
            Verse::new(1, 2, "\"Segala puji\" bagi Allah"),
        ]);
        let mut buf = Vec::new();
        corpus.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("surah,ayat,teks\n"));

        let (parsed, summary) = Corpus::read_csv(buf.as_slice()).unwrap();
        assert_eq!(summary.skipped, 0);
        assert_eq!(parsed, corpus);
    }

    #[test]
    fn test_read_csv_skips_bad_records() {
        let csv_text = "surah,ayat,teks\n1,1,ok\nnope,2,bad\n1,3\n1,4,fine\n";
        let (corpus, summary) = Corpus::read_csv(csv_text.as_bytes()).unwrap();
        assert_eq!(summary, LoadSummary { accepted: 2, skipped: 2 });
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_fingerprint_depends_on_content() {
        let a = Corpus::from_verses(vec![Verse::new(1, 1, "a")]);
        let b = Corpus::from_verses(vec![Verse::new(1, 1, "b")]);
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(CorpusFormat::from_path(Path::new("q.CSV")), CorpusFormat::Csv);
        assert_eq!(CorpusFormat::from_path(Path::new("id.indonesian.txt")), CorpusFormat::Delimited);
    }
}
