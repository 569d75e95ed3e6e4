//! Certificate PDF rendering.
//!
//! Builds a single-page landscape A4 document by hand: centered title,
//! recipient name, course line, and a footer with the issuer, the
//! instructor, and the completion date.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;

/// Landscape A4 in PDF points.
const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;

/// Inputs for one rendered certificate.
#[derive(Debug, Clone)]
pub struct CertificateDocument {
    /// Recipient's display name.
    pub student_name: String,
    /// Completed course title.
    pub course_title: String,
    /// Course author's display name.
    pub instructor_name: String,
    /// Issuing platform name.
    pub issuer_name: String,
    /// When the course was completed.
    pub completion_date: DateTime<Utc>,
}

/// Render a certificate to PDF bytes.
pub fn render_certificate(doc: &CertificateDocument) -> AppResult<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");

    let pages_id = pdf.new_object_id();
    let regular_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let date_line = doc.completion_date.format("%B %-d, %Y").to_string();
    let footer = format!(
        "Issued by {} on {}",
        doc.issuer_name, date_line
    );
    let instructor_line = format!("Instructor: {}", doc.instructor_name);

    let mut operations = Vec::new();
    operations.extend(centered_text("Certificate of Completion", "F2", 36.0, 460.0));
    operations.extend(centered_text("This certifies that", "F1", 16.0, 400.0));
    operations.extend(centered_text(&doc.student_name, "F2", 30.0, 350.0));
    operations.extend(centered_text(
        "has successfully completed the course",
        "F1",
        16.0,
        300.0,
    ));
    operations.extend(centered_text(&doc.course_title, "F2", 24.0, 255.0));
    operations.extend(centered_text(&instructor_line, "F1", 14.0, 160.0));
    operations.extend(centered_text(&footer, "F1", 12.0, 120.0));

    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| AppError::internal(format!("Failed to encode PDF content: {e}")))?;
    let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = pdf.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|e| AppError::internal(format!("Failed to serialize PDF: {e}")))?;
    Ok(buffer)
}

/// A centered text run at the given baseline height.
///
/// Helvetica has no embedded metrics here, so centering uses an average
/// glyph width of roughly half the font size. Good enough for titles.
fn centered_text(text: &str, font: &str, size: f32, baseline: f32) -> Vec<Operation> {
    let approx_width = text.chars().count() as f32 * size * 0.5;
    let x = ((PAGE_WIDTH - approx_width) / 2.0).max(40.0);

    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), baseline.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> CertificateDocument {
        CertificateDocument {
            student_name: "Asha Karki".to_string(),
            course_title: "Introduction to Rust".to_string(),
            instructor_name: "Bibek Sharma".to_string(),
            issuer_name: "LearnHub".to_string(),
            completion_date: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_certificate(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn content_mentions_recipient_and_course() {
        let bytes = render_certificate(&sample()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Asha Karki"));
        assert!(text.contains("Introduction to Rust"));
    }

    #[test]
    fn rendered_document_parses_back() {
        let bytes = render_certificate(&sample()).unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }
}
