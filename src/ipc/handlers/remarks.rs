use crate::ipc::error::ok;
use crate::ipc::helpers::{required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{RemarkRecord, Store};
use serde_json::json;

fn remarks_add(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let remarks = required_str(params, "remarks")?;
    store
        .put_remark(&roll_no, &RemarkRecord { remarks })
        .map_err(HandlerErr::db_update)?;
    Ok(json!({ "ok": true }))
}

fn remarks_get(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    let record = store.get_remark(&roll_no).map_err(HandlerErr::db_query)?;
    let Some(record) = record else {
        return Err(HandlerErr::not_found("no remarks record found"));
    };
    Ok(json!({ "remarks": record.remarks }))
}

fn handle_remarks_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match remarks_add(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_remarks_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match remarks_get(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "remarks.add" => Some(handle_remarks_add(state, req)),
        "remarks.get" => Some(handle_remarks_get(state, req)),
        _ => None,
    }
}
