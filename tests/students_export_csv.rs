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
fn export_writes_quoted_rows_in_roll_no_order() {
    let data_dir = temp_dir("rollbook-export-csv");
    let (_child, mut stdin, mut reader) = spawn_daemon(&data_dir);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.add",
        json!({ "name": "Rao, Asha \"Ash\"", "rollNo": "R002", "age": 20, "course": "CS" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.add",
        json!({ "name": "Bilal", "rollNo": "R001", "age": 22, "course": "Physics" }),
    );

    let out_path = data_dir.join("students.csv");
    let export = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.exportCsv",
        json!({ "outPath": out_path.to_string_lossy() }),
    );
    assert_eq!(export.get("rowsExported").and_then(|v| v.as_i64()), Some(2));

    let csv = std::fs::read_to_string(&out_path).expect("read exported csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "roll_no,name,age,course");
    assert_eq!(lines[1], "R001,Bilal,22,Physics");
    assert_eq!(lines[2], "R002,\"Rao, Asha \"\"Ash\"\"\",20,CS");
}

#[test]
fn export_of_empty_collection_writes_header_only() {
    let data_dir = temp_dir("rollbook-export-empty");
    let (_child, mut stdin, mut reader) = spawn_daemon(&data_dir);

    let out_path = data_dir.join("empty.csv");
    let export = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.exportCsv",
        json!({ "outPath": out_path.to_string_lossy() }),
    );
    assert_eq!(export.get("rowsExported").and_then(|v| v.as_i64()), Some(0));

    let csv = std::fs::read_to_string(&out_path).expect("read exported csv");
    assert_eq!(csv, "roll_no,name,age,course\n");
}
