use crate::ipc::error::ok;
use crate::ipc::helpers::{required_i64, required_path, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{Store, Student};
use serde_json::json;
use std::path::PathBuf;

// Bounds of the age input widget.
const AGE_MIN: i64 = 18;
const AGE_MAX: i64 = 100;

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn students_add(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = required_str(params, "name")?;
    let roll_no = required_str(params, "rollNo")?;
    let age = required_i64(params, "age")?;
    let course = required_str(params, "course")?;
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(HandlerErr::bad_params(format!(
            "age must be between {} and {}",
            AGE_MIN, AGE_MAX
        )));
    }

    let student = Student {
        name,
        roll_no,
        age,
        course,
    };
    store.put_student(&student).map_err(HandlerErr::db_update)?;
    Ok(json!({ "rollNo": student.roll_no }))
}

fn students_list(store: &Store) -> Result<serde_json::Value, HandlerErr> {
    let students = store.list_students().map_err(HandlerErr::db_query)?;
    let mut by_roll_no = serde_json::Map::new();
    for s in students {
        by_roll_no.insert(
            s.roll_no.clone(),
            json!({
                "name": s.name,
                "rollNo": s.roll_no,
                "age": s.age,
                "course": s.course
            }),
        );
    }
    Ok(json!({ "students": by_roll_no }))
}

fn students_delete(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll_no = required_str(params, "rollNo")?;
    // Absent keys succeed as a no-op; the other three collections keep
    // whatever they hold for this roll number.
    let deleted = store
        .delete_student(&roll_no)
        .map_err(HandlerErr::db_delete)?;
    Ok(json!({ "ok": true, "deleted": deleted }))
}

fn students_export_csv(
    store: &Store,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let out_path = required_path(params, "outPath")?;
    let students = store.list_students().map_err(HandlerErr::db_query)?;

    let mut csv = String::from("roll_no,name,age,course\n");
    let rows_exported = students.len();
    for s in &students {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            csv_quote(&s.roll_no),
            csv_quote(&s.name),
            s.age,
            csv_quote(&s.course)
        ));
    }

    let out = PathBuf::from(&out_path);
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HandlerErr::io(e, &out_path))?;
    }
    std::fs::write(&out, csv).map_err(|e| HandlerErr::io(e, &out_path))?;

    Ok(json!({ "ok": true, "rowsExported": rows_exported, "path": out_path }))
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_add(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_list(&state.store) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_delete(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_export_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_export_csv(&state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_students_add(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        "students.exportCsv" => Some(handle_students_export_csv(state, req)),
        _ => None,
    }
}
