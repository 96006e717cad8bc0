use crate::backup;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn backup_failed(e: anyhow::Error) -> HandlerErr {
    log::error!("event=backup module=ipc status=failed");
    HandlerErr {
        code: "backup_failed",
        message: format!("{e:#}"),
        details: None,
    }
}

fn backup_export(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let path = PathBuf::from(get_required_str(params, "path")?);
    let summary =
        backup::export_snapshot_bundle(&state.book.snapshot(), &path).map_err(backup_failed)?;
    log::info!(
        "event=backup_export module=ipc status=ok entries={}",
        summary.entry_count
    );
    Ok(json!({
        "path": path.to_string_lossy(),
        "bundleId": summary.bundle_id,
        "bundleFormat": summary.bundle_format,
        "entryCount": summary.entry_count,
        "stateSha256": summary.state_sha256,
    }))
}

fn backup_import(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let path = PathBuf::from(get_required_str(params, "path")?);
    let summary = backup::import_snapshot_bundle(&path).map_err(backup_failed)?;
    state.book.restore(summary.snapshot);
    Ok(json!({
        "bundleFormatDetected": summary.bundle_format_detected,
        "studentCount": state.book.roster().students().len(),
        "attendanceDates": state.book.attendance().len(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.export" => Some(respond(&req.id, backup_export(state, &req.params))),
        "backup.import" => Some(respond(&req.id, backup_import(state, &req.params))),
        _ => None,
    }
}
