use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
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

fn spawn_sidecar(args: &[&str]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rollbookd");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rollbookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn read_response(reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response");
    serde_json::from_str(line.trim()).expect("parse response json")
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

    let value = read_response(reader);
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("rollbook-router-smoke");
    let bundle_out = workspace.join("smoke.rollbook.zip");

    let (mut child, mut stdin, mut reader) = spawn_sidecar(&[]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["result"]["studentCount"], 8);
    assert_eq!(health["result"]["courseCount"], 7);

    // Blank lines are skipped; malformed lines get an error without dispatch.
    writeln!(stdin).expect("write blank");
    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let bad = read_response(&mut reader);
    assert_eq!(bad["ok"], false);
    assert_eq!(bad["error"]["code"], "bad_json");

    let _ = request(&mut stdin, &mut reader, "2", "students.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "3", "students.add", json!({ "name": "Smoke" }));
    let _ = request(&mut stdin, &mut reader, "4", "courses.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "5", "courses.add", json!({ "name": "Smoke Course" }));
    let marked = request(
        &mut stdin,
        &mut reader,
        "6",
        "attendance.mark",
        json!({ "date": "2024-03-05", "statuses": { "Smoke": "P" } }),
    );
    assert_eq!(marked["result"]["presentCount"], 1);
    assert_eq!(marked["result"]["absentCount"], 8);
    let _ = request(&mut stdin, &mut reader, "7", "attendance.day", json!({ "date": "2024-03-05" }));
    let _ = request(&mut stdin, &mut reader, "8", "attendance.dates", json!({}));
    let _ = request(&mut stdin, &mut reader, "9", "attendance.student", json!({ "name": "Smoke" }));
    let _ = request(
        &mut stdin,
        &mut reader,
        "10",
        "homework.record",
        json!({ "date": "2024-03-05", "course": "Maths", "description": "Smoke" }),
    );
    let _ = request(&mut stdin, &mut reader, "11", "homework.get", json!({ "date": "2024-03-05", "course": "Maths" }));
    let _ = request(&mut stdin, &mut reader, "12", "homework.list", json!({}));
    let exported = request(
        &mut stdin,
        &mut reader,
        "13",
        "backup.export",
        json!({ "path": bundle_out.to_string_lossy() }),
    );
    assert_eq!(exported["ok"], true);
    let _ = request(&mut stdin, &mut reader, "14", "students.remove", json!({ "name": "Smoke" }));
    let imported = request(
        &mut stdin,
        &mut reader,
        "15",
        "backup.import",
        json!({ "path": bundle_out.to_string_lossy() }),
    );
    assert_eq!(imported["result"]["studentCount"], 9);

    let unknown = request_unknown(&mut stdin, &mut reader);
    assert_eq!(unknown["error"]["code"], "not_implemented");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

fn request_unknown(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    writeln!(stdin, "{}", json!({ "id": "x", "method": "nope.nothing" })).expect("write request");
    stdin.flush().expect("flush request");
    read_response(reader)
}

#[test]
fn config_file_seeds_roster_and_policy() {
    let workspace = temp_dir("rollbook-config-smoke");
    let cfg = workspace.join("rollbookd.json");
    std::fs::write(
        &cfg,
        r#"{ "students": ["A", "B"], "courses": ["Maths"], "datePolicy": "reject" }"#,
    )
    .expect("write config");

    let cfg_arg = cfg.to_string_lossy().to_string();
    let log_dir = workspace.join("logs").to_string_lossy().to_string();
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar(&["--config", &cfg_arg, "--log-dir", &log_dir]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["result"]["studentCount"], 2);
    assert_eq!(health["result"]["datePolicy"], "reject");

    let rejected = request(&mut stdin, &mut reader, "2", "attendance.mark", json!({ "date": "05/03/2024" }));
    assert_eq!(rejected["error"]["code"], "bad_date");

    drop(stdin);
    let _ = child.wait();
    assert!(workspace.join("logs").is_dir());
    let _ = std::fs::remove_dir_all(workspace);
}
