use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_path;
use crate::ipc::types::{AppState, Request};
use crate::store::Store;
use serde_json::json;
use std::path::PathBuf;

fn handle_backup_export_bundle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match required_path(&req.params, "outPath") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    // Flush any pending WAL frames so the bundle holds a complete copy.
    let _ = state
        .store
        .connection()
        .execute_batch("PRAGMA wal_checkpoint(FULL)");

    let out = PathBuf::from(&out_path);
    let export = match backup::export_bundle(&state.data_dir, &out) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "io_failed",
                e.to_string(),
                Some(json!({ "path": out_path })),
            )
        }
    };

    ok(
        &req.id,
        json!({
            "ok": true,
            "path": out_path,
            "bundleFormat": export.bundle_format,
            "entryCount": export.entry_count
        }),
    )
}

fn handle_backup_import_bundle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let in_path = match required_path(&req.params, "inPath") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    let src = PathBuf::from(&in_path);
    if !src.is_file() {
        return err(
            &req.id,
            "not_found",
            "bundle file not found",
            Some(json!({ "path": in_path })),
        );
    }

    let import = match backup::import_bundle(&src, &state.data_dir) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "io_failed",
                e.to_string(),
                Some(json!({ "path": in_path })),
            )
        }
    };

    // Reopen against the replaced file; the old handle is retired by the
    // assignment.
    match Store::open(&state.data_dir) {
        Ok(store) => {
            state.store = store;
            ok(
                &req.id,
                json!({
                    "ok": true,
                    "dataDir": state.data_dir.to_string_lossy(),
                    "bundleFormatDetected": import.bundle_format_detected
                }),
            )
        }
        Err(e) => err(&req.id, "db_open_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.exportBundle" => Some(handle_backup_export_bundle(state, req)),
        "backup.importBundle" => Some(handle_backup_import_bundle(state, req)),
        _ => None,
    }
}
