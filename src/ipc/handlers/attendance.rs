use crate::ipc::error::ok;
use crate::ipc::helpers::{required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{AttendanceRecord, AttendanceStatus, Store};
use chrono::NaiveDate;
use serde_json::json;

fn attendance_mark(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let date = required_str(params, "date")?;
    let status = required_str(params, "status")?;

    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(HandlerErr::bad_params("date must be YYYY-MM-DD"));
    }
    let Some(status) = AttendanceStatus::parse(&status) else {
        return Err(HandlerErr::bad_params("status must be Present or Absent"));
    };

    // One record per roll number; a new mark replaces the previous one.
    store
        .put_attendance(&roll_no, &AttendanceRecord { date, status })
        .map_err(HandlerErr::db_update)?;
    Ok(json!({ "ok": true }))
}

fn attendance_get(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let record = store
        .get_attendance(&roll_no)
        .map_err(HandlerErr::db_query)?;
    let Some(record) = record else {
        return Err(HandlerErr::not_found("no attendance record found"));
    };
    Ok(json!({ "date": record.date, "status": record.status.as_str() }))
}

fn handle_attendance_mark(state: &mut AppState, req: &Request) -> serde_json::Value {
    match attendance_mark(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_attendance_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match attendance_get(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.mark" => Some(handle_attendance_mark(state, req)),
        "attendance.get" => Some(handle_attendance_get(state, req)),
        _ => None,
    }
}
