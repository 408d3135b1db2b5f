//! Method-call dispatcher for embedding hosts.
//!
//! A host (mobile shell, plugin bridge, RPC layer) sends a named call with a
//! JSON argument map and gets back exactly one response. Only
//! `extractImages` is served; everything else is answered with
//! [`MethodResponse::NotImplemented`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result, CODE_EXTRACTION_ERROR, CODE_NO_SOURCE};
use crate::extract::ExtractOptions;
use crate::source::Source;
use crate::worker;

/// Method name for image extraction.
pub const METHOD_EXTRACT_IMAGES: &str = "extractImages";

const NO_SOURCE_MESSAGE: &str = "PDF source not available.";
const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract images.";

/// An incoming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `extractImages`
    pub method: String,

    /// Argument map
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    /// Create a call.
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// String argument, if present and a string.
    fn str_argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

/// The single reply to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    /// Successful result
    Success { result: Value },
    /// Failure with a stable code
    Error {
        code: String,
        message: String,
        details: Option<String>,
    },
    /// The method is not served here
    NotImplemented,
}

impl MethodResponse {
    fn from_error(err: &Error) -> Self {
        match err {
            Error::NoSource => MethodResponse::Error {
                code: CODE_NO_SOURCE.to_string(),
                message: NO_SOURCE_MESSAGE.to_string(),
                details: None,
            },
            other => MethodResponse::Error {
                code: CODE_EXTRACTION_ERROR.to_string(),
                message: EXTRACTION_FAILED_MESSAGE.to_string(),
                details: Some(other.to_string()),
            },
        }
    }
}

/// Routes calls to the extraction entry points.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    options: ExtractOptions,
}

impl Dispatcher {
    /// Create a dispatcher using default extraction options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher using `options` for every call.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Handle a call on the current thread.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            METHOD_EXTRACT_IMAGES => self.extract_images(call),
            other => {
                log::debug!("method '{}' not implemented", other);
                MethodResponse::NotImplemented
            }
        }
    }

    /// Handle a call on a worker thread and pass the response to `reply`
    /// exactly once.
    ///
    /// A panic during extraction is answered as an `ExtractionError`; a
    /// thread that cannot be started is answered inline.
    pub fn handle_async<F>(&self, call: MethodCall, reply: F)
    where
        F: FnOnce(MethodResponse) + Send + 'static,
    {
        let dispatcher = self.clone();
        run_async(move || dispatcher.handle(&call), reply);
    }

    fn extract_images(&self, call: &MethodCall) -> MethodResponse {
        let result = source_from_arguments(call)
            .and_then(|source| crate::extract_images_with_options(source, &self.options))
            .and_then(|records| {
                serde_json::to_value(records).map_err(|e| Error::Render(e.to_string()))
            });

        match result {
            Ok(result) => MethodResponse::Success { result },
            Err(e) => {
                log::warn!("{} failed: {}", METHOD_EXTRACT_IMAGES, e);
                MethodResponse::from_error(&e)
            }
        }
    }
}

/// Run `work` on a worker thread and hand its response to `reply` once.
fn run_async<W, F>(work: W, reply: F)
where
    W: FnOnce() -> MethodResponse + Send + 'static,
    F: FnOnce(MethodResponse) + Send + 'static,
{
    let slot = Arc::new(Mutex::new(Some(reply)));
    let worker_slot = Arc::clone(&slot);

    let spawned = thread::Builder::new()
        .name("pdfimg-dispatch".to_string())
        .spawn(move || {
            let response = worker::catch_panic(|| Ok(work()))
                .unwrap_or_else(|e| MethodResponse::from_error(&e));
            deliver(&worker_slot, response);
        });

    if let Err(e) = spawned {
        deliver(&slot, MethodResponse::from_error(&Error::Io(e)));
    }
}

fn deliver<F: FnOnce(MethodResponse)>(slot: &Mutex<Option<F>>, response: MethodResponse) {
    let reply = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(reply) = reply {
        reply(response);
    }
}

/// Build a [`Source`] from `filePath` / `pdfData`.
///
/// `pdfData` may be an array of byte values or a base64 string. Null or
/// absent arguments count as missing.
fn source_from_arguments(call: &MethodCall) -> Result<Source> {
    let path = call.str_argument("filePath").map(PathBuf::from);

    let bytes = match call.arguments.get("pdfData") {
        None | Some(Value::Null) => None,
        Some(Value::String(encoded)) => Some(
            STANDARD
                .decode(encoded)
                .map_err(|e| Error::Encoding(format!("pdfData is not base64: {}", e)))?,
        ),
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|v| {
                    v.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| Error::Encoding("pdfData holds a non-byte value".into()))
                })
                .collect::<Result<Vec<u8>>>()?,
        ),
        Some(_) => return Err(Error::Encoding("pdfData must be bytes".into())),
    };

    Source::from_parts(path, bytes)
}
