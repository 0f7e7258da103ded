//! Reading OCR text files from disk and writing extracted records out.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};
use wellscan_extract::{ExtractedDocument, SourceDocument};

/// Extensions treated as OCR output.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Read one text file. OCR caches are named after their scans, so
/// `W11745.txt` is reported as `W11745.pdf`.
pub fn read_document(path: &Path) -> anyhow::Result<SourceDocument> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    // OCR output is not always valid UTF-8.
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let name = path
        .file_stem()
        .map(|stem| format!("{}.pdf", stem.to_string_lossy()));
    Ok(SourceDocument::new(name, text))
}

/// Every text file directly inside `dir`, sorted by file name.
pub fn read_corpus(dir: &Path) -> anyhow::Result<Vec<SourceDocument>> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TEXT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_document(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
        }
    }
    debug!("Read {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}

/// Write one JSON object per extracted document.
pub fn write_jsonl<'a>(
    path: &Path,
    documents: impl IntoIterator<Item = &'a ExtractedDocument>,
) -> anyhow::Result<usize> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for doc in documents {
        serde_json::to_writer(&mut out, doc)?;
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellscan_core::ExtractionConfig;

    #[test]
    fn test_read_corpus_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("W200.txt"), "Well File No. 200").unwrap();
        fs::write(dir.path().join("W100.TXT"), "Well File No. 100").unwrap();
        fs::write(dir.path().join("W300.pdf"), [0x25, 0x50, 0x44, 0x46]).unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let docs = read_corpus(dir.path()).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["W100.pdf", "W200.pdf"]);
    }

    #[test]
    fn test_read_document_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("W1.txt");
        fs::write(&path, b"Operator: Caf\xe9 Oil LLC").unwrap();

        let doc = read_document(&path).unwrap();
        assert!(doc.text.starts_with("Operator: Caf"));
        assert_eq!(doc.name.as_deref(), Some("W1.pdf"));
    }

    #[test]
    fn test_write_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let doc = wellscan_extract::extract_document(
            "Well Name: ALPHA 1-1H and some more scanned text",
            Some("W100.txt"),
            &ExtractionConfig::default(),
        )
        .unwrap();

        let path = dir.path().join("out.jsonl");
        assert_eq!(write_jsonl(&path, [&doc, &doc]).unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["well"]["well_file_no"], "100");
    }
}
