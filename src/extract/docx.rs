//! DOCX text extraction.
//!
//! A .docx file is a ZIP archive; the document body lives in
//! `word/document.xml`. Text runs are concatenated, with paragraph ends and
//! explicit breaks mapped to newlines so downstream tokenization sees word
//! boundaries.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extract::ExtractError;

fn docx_error(message: impl Into<String>) -> ExtractError {
    ExtractError::ExtractionFailed {
        format: "DOCX",
        message: message.into(),
    }
}

/// Extract plain text from DOCX bytes.
///
/// # Errors
///
/// Returns [`ExtractError::ExtractionFailed`] if the bytes are not a valid
/// ZIP archive, the document part is missing, or the XML is malformed.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| docx_error(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| docx_error(format!("missing document part: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(e.to_string()))?;

    parse_document_xml(&xml)
}

/// Pull the text runs out of a `word/document.xml` body.
fn parse_document_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let chunk = t.unescape().map_err(|e| docx_error(e.to_string()))?;
                text.push_str(&chunk);
            }
            // Paragraph boundaries and explicit breaks become newlines.
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(e)) if matches!(e.name().as_ref(), b"w:br" | b"w:tab") => {
                text.push(if e.name().as_ref() == b"w:tab" { '\t' } else { '\n' });
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(docx_error(e.to_string())),
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(extract_docx_text(b"not a zip archive").is_err());
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("other.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }
        assert!(extract_docx_text(cursor.get_ref()).is_err());
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Python developer</w:t></w:r></w:p>
                <w:p><w:r><w:t>AWS and Docker</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let text = extract_docx_text(cursor.get_ref()).unwrap();
        assert!(text.contains("Python developer"));
        assert!(text.contains("AWS and Docker"));
        // Paragraphs are separated so words don't run together.
        assert!(text.contains("developer\n") || text.contains("developer \n"));
    }

    #[test]
    fn test_parse_entities_unescaped() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>C&amp;I systems</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = parse_document_xml(xml).unwrap();
        assert!(text.contains("C&I systems"));
    }
}
