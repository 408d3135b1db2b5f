//! C-ABI FFI bindings for cross-language integration.
//!
//! Every extraction function returns a [`PdfImgResult`] whose `data` is the
//! JSON array of `{"format", "data"}` records on success. Results must be
//! released with [`pdfimg_free_result`].

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::{self, JsonFormat};
use crate::Source;

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct PdfImgResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed).
    pub data: *mut c_char,
    /// Error code, "NoSource" or "ExtractionError" (null if succeeded).
    pub code: *mut c_char,
    /// Error message (null if succeeded).
    pub error: *mut c_char,
}

impl PdfImgResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            code: ptr::null_mut(),
            error: ptr::null_mut(),
        }
    }

    fn error(code: &str, message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            code: CString::new(code).unwrap_or_default().into_raw(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }

    fn from_result(result: crate::Result<String>) -> Self {
        match result {
            Ok(json) => Self::success(json),
            Err(e) => Self::error(e.code(), e.to_string()),
        }
    }
}

fn extract_to_json(source: Source) -> crate::Result<String> {
    let records = crate::extract_images(source)?;
    render::to_json(&records, JsonFormat::Compact)
}

/// Extract images from a PDF file.
///
/// # Safety
///
/// The `path` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `pdfimg_free_result`.
#[no_mangle]
pub unsafe extern "C" fn pdfimg_extract_images(path: *const c_char) -> PdfImgResult {
    if path.is_null() {
        return PdfImgResult::from_result(Err(crate::Error::NoSource));
    }

    let path_str = match CStr::from_ptr(path).to_str() {
        Ok(s) => s,
        Err(_) => {
            return PdfImgResult::error(
                crate::error::CODE_EXTRACTION_ERROR,
                "Invalid UTF-8 path".to_string(),
            )
        }
    };

    PdfImgResult::from_result(extract_to_json(Source::from(Path::new(path_str))))
}

/// Extract images from an in-memory PDF.
///
/// # Safety
///
/// `data` must be null or point to `len` readable bytes.
/// The returned result must be freed with `pdfimg_free_result`.
#[no_mangle]
pub unsafe extern "C" fn pdfimg_extract_images_from_bytes(
    data: *const u8,
    len: usize,
) -> PdfImgResult {
    if data.is_null() {
        return PdfImgResult::from_result(Err(crate::Error::NoSource));
    }

    let bytes = std::slice::from_raw_parts(data, len);
    PdfImgResult::from_result(extract_to_json(Source::from(bytes)))
}

/// Free a result returned by any pdfimg function.
///
/// # Safety
///
/// The `result` must have been returned by a pdfimg function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn pdfimg_free_result(result: PdfImgResult) {
    for raw in [result.data, result.code, result.error] {
        if !raw.is_null() {
            drop(CString::from_raw(raw));
        }
    }
}

/// Get the version of the pdfimg library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn pdfimg_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
