//! Integration tests for image extraction over real PDF documents.

mod common;

use common::{jpeg_bytes, zlib, PdfBuilder};
use lopdf::dictionary;
use pdf_imgext::{
    extract_images, extract_images_from_bytes, extract_images_from_file,
    extract_images_with_options, extract_images_with_report, ExtractOptions, Extractor,
    PageSelection, Source,
};

fn payloads(records: &[pdf_imgext::ExtractionRecord]) -> Vec<Vec<u8>> {
    records.iter().map(|r| r.decode_data().unwrap()).collect()
}

#[test]
fn test_paint_order_within_page() {
    let mut pdf = PdfBuilder::new();
    let a = pdf.jpeg(1);
    let b = pdf.jpeg(2);
    pdf.page(
        "q 10 0 0 10 0 0 cm /B Do Q q 10 0 0 10 20 0 cm /A Do Q",
        &[("A", a), ("B", b)],
    );

    let records = extract_images_from_bytes(&pdf.build()).unwrap();
    assert_eq!(payloads(&records), vec![jpeg_bytes(2), jpeg_bytes(1)]);
}

#[test]
fn test_cross_page_order() {
    let mut pdf = PdfBuilder::new();
    let first = pdf.jpeg(1);
    let second = pdf.jpeg(2);
    let third = pdf.jpeg(3);
    pdf.page("/X Do", &[("X", third)]);
    pdf.page("/X Do /Y Do", &[("X", first), ("Y", second)]);

    let records = extract_images_from_bytes(&pdf.build()).unwrap();
    assert_eq!(
        payloads(&records),
        vec![jpeg_bytes(3), jpeg_bytes(1), jpeg_bytes(2)]
    );
}

#[test]
fn test_same_name_painted_twice() {
    let mut pdf = PdfBuilder::new();
    let logo = pdf.jpeg(7);
    pdf.page("/Logo Do /Logo Do", &[("Logo", logo)]);
    pdf.page("/Logo Do", &[("Logo", logo)]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.stats.images_seen, 3);
    assert_eq!(report.stats.duplicates_skipped, 2);
}

#[test]
fn test_identical_bytes_under_different_names() {
    let mut pdf = PdfBuilder::new();
    let one = pdf.jpeg(5);
    let two = pdf.jpeg(5);
    pdf.page("/One Do /Two Do", &[("One", one), ("Two", two)]);

    let records = extract_images_from_bytes(&pdf.build()).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_two_page_scenario() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    let im2 = pdf.jpeg(2);
    let im3 = pdf.jpeg(1);
    pdf.page("/Im1 Do /Im2 Do", &[("Im1", im1), ("Im2", im2)]);
    pdf.page("/Im3 Do", &[("Im3", im3)]);

    let records = extract_images_from_bytes(&pdf.build()).unwrap();
    assert_eq!(payloads(&records), vec![jpeg_bytes(1), jpeg_bytes(2)]);
    assert!(records.iter().all(|r| r.format == "jpg"));
}

#[test]
fn test_form_xobjects_are_not_entered() {
    let mut pdf = PdfBuilder::new();
    let hidden = pdf.jpeg(9);
    let form = pdf.form(Some(hidden));
    let shown = pdf.jpeg(1);
    pdf.page("/Fm1 Do /Im1 Do", &[("Fm1", form), ("Im1", shown)]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert_eq!(payloads(&report.records), vec![jpeg_bytes(1)]);
    assert_eq!(report.stats.non_image_xobjects, 1);
}

#[test]
fn test_malformed_operators_are_tolerated() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    pdf.page("Do 5 Do (Im1) Do /Missing Do /Im1 Do", &[("Im1", im1)]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert_eq!(payloads(&report.records), vec![jpeg_bytes(1)]);
    assert_eq!(report.stats.malformed_operators, 3);
    assert_eq!(report.stats.unresolved_references, 1);
}

#[test]
fn test_document_without_images() {
    let mut pdf = PdfBuilder::new();
    pdf.page("", &[]);
    pdf.page("BT /F1 12 Tf (hello) Tj ET", &[]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.stats.pages_walked, 2);
}

#[test]
fn test_unreadable_page_is_skipped() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    pdf.broken_page();
    pdf.page("/Im1 Do", &[("Im1", im1)]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.stats.pages_skipped, 1);
    assert_eq!(report.stats.page_count, 2);
}

#[test]
fn test_oversized_predictor_params_skip_page() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    let im2 = pdf.jpeg(2);
    for predictor in [2i64, 12] {
        pdf.page_with_stream(
            dictionary! {
                "Filter" => "FlateDecode",
                "DecodeParms" => dictionary! {
                    "Predictor" => predictor,
                    "Colors" => 1i64 << 31,
                    "Columns" => 1i64 << 40,
                    "BitsPerComponent" => 8i64,
                },
            },
            zlib(b"/Im1 Do"),
            &[("Im1", im1)],
        );
    }
    pdf.page("/Im2 Do", &[("Im2", im2)]);

    let report = extract_images_with_report(pdf.build(), &ExtractOptions::default()).unwrap();
    assert_eq!(payloads(&report.records), vec![jpeg_bytes(2)]);
    assert_eq!(report.stats.pages_skipped, 2);
    assert_eq!(report.stats.pages_walked, 1);
}

#[test]
fn test_raw_policy_keeps_stored_bytes() {
    let pixels = vec![10u8, 20, 30, 40, 50, 60];
    let stored = zlib(&pixels);

    let mut pdf = PdfBuilder::new();
    let image = pdf.image(&stored, Some("FlateDecode"));
    pdf.page("/Im1 Do", &[("Im1", image)]);
    let data = pdf.build();

    let raw = extract_images(data.clone()).unwrap();
    assert_eq!(raw[0].format, "png");
    assert_eq!(raw[0].decode_data().unwrap(), stored);

    let unfiltered = extract_images_with_options(data, &ExtractOptions::new().unfiltered()).unwrap();
    assert_eq!(unfiltered[0].format, "png");
    assert_eq!(unfiltered[0].decode_data().unwrap(), pixels);
}

#[test]
fn test_unfiltered_policy_keeps_jpeg_payload() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(4);
    pdf.page("/Im1 Do", &[("Im1", im1)]);

    let records =
        extract_images_with_options(pdf.build(), &ExtractOptions::new().unfiltered()).unwrap();
    assert_eq!(payloads(&records), vec![jpeg_bytes(4)]);
}

#[test]
fn test_format_labels_and_default() {
    let mut pdf = PdfBuilder::new();
    let jpx = pdf.image(b"jpx-payload", Some("JPXDecode"));
    let plain = pdf.image(b"rgb", None);
    let odd = pdf.image(b"<~!!~>", Some("ASCII85Decode"));
    pdf.page(
        "/A Do /B Do /C Do",
        &[("A", jpx), ("B", plain), ("C", odd)],
    );
    let data = pdf.build();

    let formats: Vec<String> = extract_images(data.clone())
        .unwrap()
        .into_iter()
        .map(|r| r.format)
        .collect();
    assert_eq!(formats, vec!["jpx", "png", "jpg"]);

    let records = Extractor::new()
        .with_default_format("unknown")
        .extract(data)
        .unwrap();
    assert_eq!(records[2].format, "unknown");
}

#[test]
fn test_page_selection() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    let im2 = pdf.jpeg(2);
    pdf.page("/Im Do", &[("Im", im1)]);
    pdf.page("/Im Do", &[("Im", im2)]);

    let options = ExtractOptions::new().with_pages(PageSelection::parse("2").unwrap());
    let records = extract_images_with_options(pdf.build(), &options).unwrap();
    assert_eq!(payloads(&records), vec![jpeg_bytes(2)]);
}

#[test]
fn test_file_source() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    pdf.page("/Im1 Do", &[("Im1", im1)]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf.build()).unwrap();

    let records = extract_images_from_file(&path).unwrap();
    assert_eq!(payloads(&records), vec![jpeg_bytes(1)]);
}

#[test]
fn test_source_errors() {
    let err = Source::from_parts(None, None).unwrap_err();
    assert_eq!(err.code(), "NoSource");

    let err = extract_images_from_bytes(b"%PDF-1.4\nnot really").unwrap_err();
    assert_eq!(err.code(), "ExtractionError");

    let err = extract_images_from_file("/nonexistent/doc.pdf").unwrap_err();
    assert_eq!(err.code(), "ExtractionError");
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    let im2 = pdf.image(&zlib(b"pixels"), Some("FlateDecode"));
    pdf.page("/Im1 Do /Im2 Do", &[("Im1", im1), ("Im2", im2)]);
    let data = pdf.build();

    let first = extract_images(data.clone()).unwrap();
    let second = extract_images(data).unwrap();
    assert_eq!(first, second);
}
