//! Text access over a parsed DOCX tree.
//!
//! Body paragraphs and paragraphs nested in table cells (at any depth) are
//! visited in document order.

use docx_rs::{
    DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild, Table, TableCell,
    TableCellContent, TableChild, TableRowChild, Text,
};

/// Concatenated text of all runs in a paragraph.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run_text(run)),
            _ => None,
        })
        .collect()
}

/// Text of one run.
pub fn run_text(run: &Run) -> String {
    run.children
        .iter()
        .filter_map(|c| match c {
            RunChild::Text(t) => Some(unescape(&t.text)),
            _ => None,
        })
        .collect()
}

/// The paragraph's runs in order. Other children are skipped but stay put.
pub fn runs_mut(paragraph: &mut Paragraph) -> Vec<&mut Run> {
    paragraph
        .children
        .iter_mut()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => {
                let run: &mut Run = run;
                Some(run)
            }
            _ => None,
        })
        .collect()
}

/// Replace the text of a run, keeping its formatting and non-text children.
pub fn set_run_text(run: &mut Run, text: &str) {
    let at = run
        .children
        .iter()
        .position(|c| matches!(c, RunChild::Text(_)))
        .unwrap_or(run.children.len());
    clear_run_text(run);
    let at = at.min(run.children.len());
    run.children.insert(at, RunChild::Text(Text::new(text)));
}

/// Drop all text from a run.
pub fn clear_run_text(run: &mut Run) {
    run.children.retain(|c| !matches!(c, RunChild::Text(_)));
}

/// Concatenated text of every paragraph in a table cell.
pub fn cell_text(cell: &TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|c| match c {
            TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-level tables of the document body.
pub fn tables(docx: &Docx) -> impl Iterator<Item = &Table> {
    docx.document.children.iter().filter_map(|c| match c {
        DocumentChild::Table(t) => {
            let t: &Table = t;
            Some(t)
        }
        _ => None,
    })
}

/// Cell at `(row, column)`, if the table has one there.
pub fn cell_at(table: &Table, row: usize, column: usize) -> Option<&TableCell> {
    let TableChild::TableRow(row) = table.rows.get(row)?;
    match row.cells.get(column)? {
        TableRowChild::TableCell(cell) => Some(cell),
    }
}

/// Texts of the cells of one row.
pub fn row_texts(table: &Table, row: usize) -> Vec<String> {
    let Some(TableChild::TableRow(row)) = table.rows.get(row) else {
        return Vec::new();
    };
    row.cells
        .iter()
        .map(|c| match c {
            TableRowChild::TableCell(cell) => cell_text(cell),
        })
        .collect()
}

/// Call `f` on every paragraph of the body, including table cells.
pub fn for_each_paragraph_mut(docx: &mut Docx, f: &mut dyn FnMut(&mut Paragraph)) {
    for child in docx.document.children.iter_mut() {
        match child {
            DocumentChild::Paragraph(p) => {
                let p: &mut Paragraph = p;
                f(p)
            }
            DocumentChild::Table(t) => table_paragraphs_mut(t, f),
            _ => {}
        }
    }
}

fn table_paragraphs_mut(table: &mut Table, f: &mut dyn FnMut(&mut Paragraph)) {
    for TableChild::TableRow(row) in table.rows.iter_mut() {
        for TableRowChild::TableCell(cell) in row.cells.iter_mut() {
            for content in cell.children.iter_mut() {
                match content {
                    TableCellContent::Paragraph(p) => {
                        let p: &mut Paragraph = p;
                        f(p)
                    }
                    TableCellContent::Table(inner) => table_paragraphs_mut(inner, f),
                    _ => {}
                }
            }
        }
    }
}

/// Undo the XML entity escaping docx-rs keeps in run text.
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_restores_markup_characters() {
        assert_eq!(unescape("&lt;0,500"), "<0,500");
        assert_eq!(unescape("a &amp;lt; b"), "a &lt; b");
        assert_eq!(unescape("plain"), "plain");
    }
}
