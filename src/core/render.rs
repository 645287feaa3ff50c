use crate::core::layout::{layout_grid, DirectoryGrid, PhysicianBlock, GRID_COLUMNS};
use crate::domain::model::DirectoryDocument;
use crate::utils::error::{DirectoryError, Result};
use docx_rs::*;
use std::io::Cursor;

// Sizes are in half-points, widths in twips.
const TITLE_SIZE: usize = 52;
const HEADING_SIZE: usize = 32;
const COLUMN_WIDTH: usize = 4819;

/// Render one directory document as DOCX bytes.
///
/// Layout: the title, then for every section a heading followed by a
/// two-column table of physician blocks, then the closing paragraph.
/// `docx-rs` creates table cells without a placeholder paragraph, so cell
/// content is inserted directly; a blank trailing cell gets one empty
/// paragraph because Word requires every cell to hold one.
pub fn render_document(document: &DirectoryDocument, closing: &str) -> Result<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(TITLE_SIZE)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(HEADING_SIZE)
                .bold(),
        );

    docx = docx.add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(&document.title))
            .style("Title"),
    );

    for section in &document.sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&section.heading))
                .style("Heading1"),
        );

        let grid = layout_grid(&section.records);
        tracing::debug!(
            "Section '{}': {} records in {} rows",
            section.heading,
            grid.filled_cells(),
            grid.row_count()
        );
        docx = docx.add_table(grid_table(&grid));
    }

    docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(closing)));

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| DirectoryError::RenderError {
            message: format!("Failed to pack '{}': {}", document.title, e),
        })?;

    Ok(buf.into_inner())
}

fn grid_table(grid: &DirectoryGrid) -> Table {
    let rows = grid
        .rows
        .iter()
        .map(|row| TableRow::new(row.iter().map(|cell| grid_cell(cell.as_ref())).collect()))
        .collect();

    Table::new(rows).set_grid(vec![COLUMN_WIDTH; GRID_COLUMNS])
}

fn grid_cell(block: Option<&PhysicianBlock>) -> TableCell {
    let cell = TableCell::new().width(COLUMN_WIDTH, WidthType::Dxa);
    match block {
        Some(block) => cell.add_paragraph(block_paragraph(block)),
        None => cell.add_paragraph(Paragraph::new()),
    }
}

fn block_paragraph(block: &PhysicianBlock) -> Paragraph {
    let mut paragraph = Paragraph::new().add_run(
        Run::new()
            .add_text(&block.name)
            .bold()
            .add_break(BreakType::TextWrapping),
    );

    let lines = block.detail_lines();
    for (i, line) in lines.iter().enumerate() {
        let mut run = Run::new().add_text(*line);
        if i + 1 < lines.len() {
            run = run.add_break(BreakType::TextWrapping);
        }
        paragraph = paragraph.add_run(run);
    }

    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DirectorySection, PhysicianRecord};
    use std::io::Read;

    fn physician(last: &str, fax: &str) -> PhysicianRecord {
        PhysicianRecord {
            last_name: last.to_string(),
            first_name: "Pat".to_string(),
            title: "MD".to_string(),
            specialty: "Urology".to_string(),
            address_line1: "100 Main St".to_string(),
            city: "Concord".to_string(),
            state: "CA".to_string(),
            zip: "94520".to_string(),
            office_phone: "925-555-0100".to_string(),
            office_fax: fax.to_string(),
            ..PhysicianRecord::default()
        }
    }

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_render_produces_docx_with_one_table_per_section() {
        let document = DirectoryDocument {
            title: "John Muir - Urology".to_string(),
            file_stem: "Urology".to_string(),
            sections: vec![
                DirectorySection {
                    heading: "Urology".to_string(),
                    records: vec![physician("Adams", "1"), physician("Baker", "2"), physician("Clark", "")],
                },
                DirectorySection {
                    heading: "Pediatric Urology".to_string(),
                    records: vec![physician("Davis", "3")],
                },
            ],
        };

        let bytes = render_document(&document, "Book online: https://example.com/").unwrap();
        assert_eq!(&bytes[0..2], b"PK");

        let xml = document_xml(&bytes);
        assert_eq!(xml.matches("</w:tbl>").count(), 2);
        assert_eq!(xml.matches("</w:tr>").count(), 3);
        assert_eq!(xml.matches("</w:tc>").count(), 6);
        assert!(xml.contains("John Muir - Urology"));
        assert!(xml.contains("Pediatric Urology"));
        assert!(xml.contains("Adams, Pat MD"));
        assert!(xml.contains("Office Fax: "));
        assert!(xml.contains("Book online: https://example.com/"));

        let adams = xml.find("Adams, Pat MD").unwrap();
        let baker = xml.find("Baker, Pat MD").unwrap();
        let davis = xml.find("Davis, Pat MD").unwrap();
        assert!(adams < baker && baker < davis);
    }

    #[test]
    fn test_render_empty_section() {
        let document = DirectoryDocument {
            title: "John Muir - Ophthalmology".to_string(),
            file_stem: "John Muir - Ophthalmology".to_string(),
            sections: vec![DirectorySection {
                heading: "Ophthalmology".to_string(),
                records: vec![],
            }],
        };

        let bytes = render_document(&document, "closing").unwrap();
        let xml = document_xml(&bytes);
        assert_eq!(xml.matches("</w:tr>").count(), 0);
        assert!(xml.contains("closing"));
    }
}
