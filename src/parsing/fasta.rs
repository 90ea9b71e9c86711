//! FASTA reading and writing using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed input:
//! `.fa`, `.fasta`, `.fna`, plus `.gz`/`.bgz` variants of each.
//!
//! Consensus masking assumes a single-record reference, so loading for that
//! path goes through [`read_single_record`], which counts records and fails
//! on anything other than exactly one rather than silently taking the first.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::core::sequence::SeqRecord;
use crate::parsing::ParseError;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read all records from a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, or `ParseError::InvalidFormat` if the file holds no
/// records.
pub fn read_records(path: &Path) -> Result<Vec<SeqRecord>, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let decoder = GzDecoder::new(file);
        let reader = BufReader::new(decoder);
        read_from(fasta::io::Reader::new(reader))
    } else {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        read_from(fasta::io::Reader::new(reader))
    }
}

/// Read a FASTA file that must contain exactly one record.
///
/// # Errors
///
/// In addition to [`read_records`] errors, returns
/// `ParseError::SingleRecordRequired` when the file holds more than one
/// record.
pub fn read_single_record(path: &Path) -> Result<SeqRecord, ParseError> {
    let mut records = read_records(path)?;
    if records.len() != 1 {
        return Err(ParseError::SingleRecordRequired {
            found: records.len(),
        });
    }
    // Length checked above
    Ok(records.remove(0))
}

fn read_from<R: BufRead>(mut reader: fasta::io::Reader<R>) -> Result<Vec<SeqRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = record.sequence().as_ref().to_vec();
        records.push(SeqRecord::new(name, sequence));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}

/// Write records to an uncompressed FASTA file.
///
/// # Errors
///
/// Returns an IO error if the file cannot be created or written.
pub fn write_records(path: &Path, records: &[SeqRecord]) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writer.write_all(b">")?;
        writer.write_all(record.name.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(&record.sequence)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_records() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">contig1 k141_0\nACGTACGT\nACGT\n>contig2\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let records = read_records(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "contig1");
        assert_eq!(records[0].len(), 12);
        assert_eq!(records[1].sequence, b"GGGG");
    }

    #[test]
    fn test_read_empty_fails() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(read_records(temp.path()).is_err());
    }

    #[test]
    fn test_read_single_record_rejects_multi() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">a\nACGT\n>b\nACGT\n").unwrap();
        temp.flush().unwrap();

        let err = read_single_record(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::SingleRecordRequired { found: 2 }
        ));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fasta");
        let records = vec![SeqRecord::new("consensus", b"ACGTN".to_vec())];

        write_records(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, ">consensus\nACGTN\n");

        let reread = read_records(&path).unwrap();
        assert_eq!(reread, records);
    }

    #[test]
    fn test_read_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.fasta.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b">denv\nACGT\n").unwrap();
        encoder.finish().unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "denv");
        assert_eq!(records[0].sequence, b"ACGT");
    }
}
