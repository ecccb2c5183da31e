use crate::ipc::error::ok;
use crate::ipc::helpers::{required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{ComplaintRecord, Store};
use serde_json::json;

fn complaints_add(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let complaint = required_str(params, "complaint")?;
    store
        .put_complaint(&roll_no, &ComplaintRecord { complaint })
        .map_err(HandlerErr::db_update)?;
    Ok(json!({ "ok": true }))
}

fn complaints_get(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let record = store.get_complaint(&roll_no).map_err(HandlerErr::db_query)?;
    let Some(record) = record else {
        return Err(HandlerErr::not_found("no complaint record found"));
    };
    Ok(json!({ "complaint": record.complaint }))
}

fn handle_complaints_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match complaints_add(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_complaints_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match complaints_get(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "complaints.add" => Some(handle_complaints_add(state, req)),
        "complaints.get" => Some(handle_complaints_get(state, req)),
        _ => None,
    }
}
