//! Tests for the host-facing surfaces: dispatcher, worker and file output.

mod common;

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{jpeg_bytes, zlib, PdfBuilder};
use pdf_imgext::render::{self, JsonFormat};
use pdf_imgext::{
    spawn_extraction, Dispatcher, ExtractOptions, ExtractionRecord, Extractor, MethodCall,
    MethodResponse, Source,
};
use serde_json::json;

fn two_page_pdf() -> Vec<u8> {
    let mut pdf = PdfBuilder::new();
    let im1 = pdf.jpeg(1);
    let im2 = pdf.jpeg(2);
    let im3 = pdf.jpeg(1);
    pdf.page("/Im1 Do /Im2 Do", &[("Im1", im1), ("Im2", im2)]);
    pdf.page("/Im3 Do", &[("Im3", im3)]);
    pdf.build()
}

fn result_records(response: MethodResponse) -> Vec<ExtractionRecord> {
    match response {
        MethodResponse::Success { result } => serde_json::from_value(result).unwrap(),
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn test_dispatch_base64_pdf_data() {
    let encoded = STANDARD.encode(two_page_pdf());
    let call = MethodCall::new("extractImages", json!({ "pdfData": encoded }));

    let records = result_records(Dispatcher::new().handle(&call));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].data, STANDARD.encode(jpeg_bytes(1)));
    assert_eq!(records[1].data, STANDARD.encode(jpeg_bytes(2)));
}

#[test]
fn test_dispatch_byte_array_pdf_data() {
    let call = MethodCall::new("extractImages", json!({ "pdfData": two_page_pdf() }));
    let records = result_records(Dispatcher::new().handle(&call));
    assert_eq!(records.len(), 2);
}

#[test]
fn test_dispatch_file_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, two_page_pdf()).unwrap();

    let call = MethodCall::new(
        "extractImages",
        json!({ "filePath": path.to_str().unwrap(), "pdfData": [1, 2, 3] }),
    );
    let records = result_records(Dispatcher::new().handle(&call));
    assert_eq!(records.len(), 2);
}

#[test]
fn test_dispatcher_options_apply_to_every_call() {
    let pixels = b"gray pixels".to_vec();
    let mut pdf = PdfBuilder::new();
    let image = pdf.image(&zlib(&pixels), Some("FlateDecode"));
    pdf.page("/Im1 Do", &[("Im1", image)]);
    let call = MethodCall::new("extractImages", json!({ "pdfData": pdf.build() }));

    let dispatcher = Dispatcher::with_options(ExtractOptions::new().unfiltered());
    let records = result_records(dispatcher.handle(&call));
    assert_eq!(records[0].format, "png");
    assert_eq!(records[0].decode_data().unwrap(), pixels);
}

#[test]
fn test_dispatch_wire_format() {
    let call: MethodCall =
        serde_json::from_str(r#"{"method":"generateThumbnail","arguments":{}}"#).unwrap();
    let response = Dispatcher::new().handle(&call);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "status": "notImplemented" })
    );

    let call: MethodCall = serde_json::from_str(r#"{"method":"extractImages"}"#).unwrap();
    let value = serde_json::to_value(Dispatcher::new().handle(&call)).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["code"], "NoSource");
}

#[test]
fn test_dispatch_async_replies_once() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let call = MethodCall::new("extractImages", json!({ "pdfData": two_page_pdf() }));

    Dispatcher::new().handle_async(call, move |response| {
        tx.send(response).unwrap();
    });

    let response = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(result_records(response).len(), 2);
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_spawn_extraction() {
    let rx = spawn_extraction(Source::from(two_page_pdf()), ExtractOptions::default());
    let records = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
    assert_eq!(records.len(), 2);

    let rx = Extractor::new().spawn(Vec::<u8>::new());
    assert!(rx.recv_timeout(Duration::from_secs(10)).unwrap().is_err());
}

#[test]
fn test_json_round_trip() {
    let records = pdf_imgext::extract_images(two_page_pdf()).unwrap();
    let json = render::to_json(&records, JsonFormat::Compact).unwrap();
    assert!(json.starts_with(r#"[{"format":"jpg","data":""#));
    assert_eq!(render::from_json(&json).unwrap(), records);
}

#[test]
fn test_write_images() {
    let records = pdf_imgext::extract_images(two_page_pdf()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("images");

    let written = render::write_images(&records, &out).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("image-001.jpg"));
    assert_eq!(std::fs::read(&written[1]).unwrap(), jpeg_bytes(2));
}
