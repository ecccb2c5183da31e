use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_daemon(data_dir: &Path) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rollbookd");
    let credentials = json!({ "dataDir": data_dir.to_string_lossy() }).to_string();
    let mut child = Command::new(exe)
        .env("ROLLBOOK_CREDENTIALS", credentials)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rollbookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn delete_removes_only_that_roll_no_and_missing_delete_is_noop() {
    let data_dir = temp_dir("rollbook-delete");
    let (_child, mut stdin, mut reader) = spawn_daemon(&data_dir);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.add",
        json!({ "name": "Asha", "rollNo": "R001", "age": 20, "course": "CS" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.add",
        json!({ "name": "Bilal", "rollNo": "R002", "age": 22, "course": "Physics" }),
    );

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.delete",
        json!({ "rollNo": "R001" }),
    );
    assert_eq!(deleted.get("deleted").and_then(|v| v.as_bool()), Some(true));

    let listed = request_ok(&mut stdin, &mut reader, "4", "students.list", json!({}));
    let students = listed
        .get("students")
        .and_then(|v| v.as_object())
        .expect("students map");
    assert!(!students.contains_key("R001"));
    assert!(students.contains_key("R002"));

    let noop = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.delete",
        json!({ "rollNo": "R404" }),
    );
    assert_eq!(noop.get("deleted").and_then(|v| v.as_bool()), Some(false));
}

#[test]
fn delete_leaves_attendance_complaint_and_remarks_in_place() {
    let data_dir = temp_dir("rollbook-delete-orphans");
    let (_child, mut stdin, mut reader) = spawn_daemon(&data_dir);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.add",
        json!({ "name": "Asha", "rollNo": "R010", "age": 20, "course": "CS" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "attendance.mark",
        json!({ "rollNo": "R010", "date": "2024-03-01", "status": "Present" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "complaints.add",
        json!({ "rollNo": "R010", "complaint": "Lost library card." }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "remarks.add",
        json!({ "rollNo": "R010", "remarks": "Consistent participation." }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.delete",
        json!({ "rollNo": "R010" }),
    );

    let attendance = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "attendance.get",
        json!({ "rollNo": "R010" }),
    );
    assert_eq!(
        attendance.get("status").and_then(|v| v.as_str()),
        Some("Present")
    );

    let complaint = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "complaints.get",
        json!({ "rollNo": "R010" }),
    );
    assert_eq!(
        complaint.get("complaint").and_then(|v| v.as_str()),
        Some("Lost library card.")
    );

    let remarks = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "remarks.get",
        json!({ "rollNo": "R010" }),
    );
    assert_eq!(
        remarks.get("remarks").and_then(|v| v.as_str()),
        Some("Consistent participation.")
    );
}
