//! Shared helpers for the integration tests.
//!
//! Fixtures are generated with `lopdf` into temporary directories.

use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Write a PDF with one page per marker to `dir/name`.
///
/// Each page draws its marker, so page order can be checked after a merge.
pub fn write_pdf(dir: &Path, name: &str, markers: &[&str]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for marker in markers {
        let content = format!("BT /F1 24 Tf 72 720 Td ({marker}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => markers.len() as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Write a file that is not a PDF.
pub fn write_text(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "just some notes\n").expect("Failed to write fixture");
    path
}

/// Markers drawn on each page of the PDF at `path`, in page order.
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let bytes = doc.get_page_content(page_id).expect("page without content");
            let text = String::from_utf8_lossy(&bytes);
            let start = text.find('(').map_or(0, |i| i + 1);
            let end = text.rfind(')').unwrap_or(start);
            text[start..end].to_string()
        })
        .collect()
}
