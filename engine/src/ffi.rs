//! FFI layer for non-Rust presentation layers.
//!
//! This module provides C-compatible functions that a UI written in another
//! language can call to drive the engine. All data crosses the boundary as
//! JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `tableview_*` functions are allocated by Rust
//! - Caller must free them with `tableview_string_free`
//! - Engine pointers must be freed with `tableview_engine_free`
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure
//!
//! # Time
//!
//! The engine owns no timer. The host passes its clock in milliseconds to
//! `tableview_set_filter` and calls `tableview_poll` (for example from a UI
//! timer armed at the returned deadline) to commit a debounced filter.

use crate::{EngineConfig, Envelope, Record, RecordId, TableViewEngine};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Result wrapper for FFI responses.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum FfiResult<T: serde::Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: serde::Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

/// Records as handed to `tableview_load`: a bare array or the upstream envelope.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LoadPayload {
    Records(Vec<Record>),
    Envelope(Envelope),
}

impl LoadPayload {
    fn into_records(self) -> Vec<Record> {
        match self {
            LoadPayload::Records(records) => records,
            LoadPayload::Envelope(envelope) => envelope.into_records(),
        }
    }
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `tableview_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => c"{\"error\":\"string contained null bytes\"}"
            .to_owned()
            .into_raw(),
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn null_engine() -> *mut c_char {
    to_c_string(FfiResult::<()>::err("null engine pointer").to_json())
}

// ============================================================================
// Engine Lifecycle
// ============================================================================

/// Create a new, empty engine.
///
/// # Arguments
/// - `config_json`: JSON string of EngineConfig, or null for defaults
///
/// # Returns
/// Pointer to TableViewEngine, or null on failure.
///
/// # Safety
/// - `config_json` must be a valid null-terminated C string or null
/// - Caller must free the returned pointer with `tableview_engine_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_engine_new(config_json: *const c_char) -> *mut TableViewEngine {
    let config = match from_c_string(config_json) {
        Some(s) => match serde_json::from_str::<EngineConfig>(&s) {
            Ok(c) => c,
            Err(_) => return ptr::null_mut(),
        },
        None => EngineConfig::default(),
    };

    match TableViewEngine::new(config) {
        Ok(engine) => Box::into_raw(Box::new(engine)),
        Err(_) => ptr::null_mut(),
    }
}

/// Free an engine.
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new`
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn tableview_engine_free(engine: *mut TableViewEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `tableview_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn tableview_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// View Operations
// ============================================================================

/// Load the baseline records.
///
/// # Arguments
/// - `records_json`: JSON array of Record, or an envelope `{"results": [...]}`
///
/// # Returns
/// JSON string: `{"ok": <row count>}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - `records_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_load(
    engine: *mut TableViewEngine,
    records_json: *const c_char,
) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    let records_str = match from_c_string(records_json) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid records JSON").to_json()),
    };

    let payload: LoadPayload = match serde_json::from_str(&records_str) {
        Ok(p) => p,
        Err(e) => {
            return to_c_string(FfiResult::<()>::err(format!("parse error: {}", e)).to_json())
        }
    };

    engine.load(payload.into_records());
    to_c_string(FfiResult::ok(engine.baseline().len()).to_json())
}

/// Set the filter text and arm the debounce deadline.
///
/// # Arguments
/// - `text`: filter text, stored verbatim
/// - `now_ms`: caller's current time in milliseconds
///
/// # Returns
/// JSON string: `{"ok": <deadline ms>}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - `text` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_set_filter(
    engine: *mut TableViewEngine,
    text: *const c_char,
    now_ms: u64,
) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    let text = match from_c_string(text) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid filter text").to_json()),
    };

    let deadline = engine.set_filter(text, now_ms);
    to_c_string(FfiResult::ok(deadline).to_json())
}

/// Commit a pending filter if its deadline has passed.
///
/// # Returns
/// 1 if the displayed set changed, 0 if not, -1 for a null engine.
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
#[no_mangle]
pub unsafe extern "C" fn tableview_poll(engine: *mut TableViewEngine, now_ms: u64) -> i32 {
    match engine.as_mut() {
        Some(e) => i32::from(e.poll(now_ms)),
        None => -1,
    }
}

/// Sort the rendered view by a column key (`first`, `last` or `country`).
///
/// # Returns
/// JSON string: `{"ok": [Record, ...]}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - `column` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_sort(
    engine: *mut TableViewEngine,
    column: *const c_char,
) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    let column = match from_c_string(column) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid column").to_json()),
    };

    match engine.sort_by_key(&column) {
        Ok(rows) => to_c_string(FfiResult::ok(rows).to_json()),
        Err(e) => to_c_string(FfiResult::<()>::err(e.to_string()).to_json()),
    }
}

/// Sort the rendered view by country.
///
/// # Returns
/// JSON string: `{"ok": [Record, ...]}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_sort_by_country(engine: *mut TableViewEngine) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    to_c_string(FfiResult::ok(engine.sort_by_country()).to_json())
}

/// Delete every rendered record with an id.
///
/// # Arguments
/// - `id_json`: JSON id, e.g. `7`, `"abc"` or `{"name": "DNI", "value": "1"}`
///
/// # Returns
/// JSON string: `{"ok": <removed count>}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - `id_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_delete(
    engine: *mut TableViewEngine,
    id_json: *const c_char,
) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    let id_str = match from_c_string(id_json) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid id JSON").to_json()),
    };

    let id: RecordId = match serde_json::from_str(&id_str) {
        Ok(id) => id,
        Err(e) => {
            return to_c_string(FfiResult::<()>::err(format!("parse error: {}", e)).to_json())
        }
    };

    to_c_string(FfiResult::ok(engine.delete_record(&id)).to_json())
}

/// Undo all deletions.
///
/// # Returns
/// JSON string: `{"ok": null}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_restore(engine: *mut TableViewEngine) -> *mut c_char {
    let engine = match engine.as_mut() {
        Some(e) => e,
        None => return null_engine(),
    };

    engine.restore();
    to_c_string(FfiResult::ok(()).to_json())
}

/// Get the rows to draw.
///
/// # Returns
/// JSON string: `{"ok": [Record, ...]}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_displayed(engine: *const TableViewEngine) -> *mut c_char {
    let engine = match engine.as_ref() {
        Some(e) => e,
        None => return null_engine(),
    };

    let displayed = engine.compute_displayed();
    to_c_string(FfiResult::ok(&*displayed).to_json())
}

/// Export a view snapshot.
///
/// # Returns
/// JSON string: `{"ok": ViewSnapshot}` or `{"error": "message"}`
///
/// # Safety
/// - `engine` must be a valid pointer from `tableview_engine_new` or null
/// - Caller must free the returned string with `tableview_string_free`
#[no_mangle]
pub unsafe extern "C" fn tableview_snapshot(engine: *const TableViewEngine) -> *mut c_char {
    let engine = match engine.as_ref() {
        Some(e) => e,
        None => return null_engine(),
    };

    to_c_string(FfiResult::ok(engine.snapshot()).to_json())
}

// ============================================================================
// Utility
// ============================================================================

/// Get the engine version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn tableview_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
