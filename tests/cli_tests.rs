use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const OCTAVE: [&str; 4] = ["--number-of-keys", "12", "--black-key-width-scale", "0.5"];

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pianokeys"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_layout_table() {
    let mut args = vec!["layout"];
    args.extend_from_slice(&OCTAVE);
    let output = run(&args);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("White key: 101 x 200 px, black key: 51 x 120 px, remainder: 5 px"),
        "{}",
        stdout
    );
    assert!(stdout.contains("Keys: 12 (7 white, 5 black), stroke 2 px"));

    // Row for key 11: index, class, octave, left, top, right, bottom, width.
    let row = Regex::new(r"\|\s*11\s*\|\s*white\s*\|\s*0\s*\|\s*599\s*\|\s*0\s*\|\s*700\s*\|\s*200\s*\|\s*101\s*\|")
        .unwrap();
    assert!(row.is_match(&stdout), "{}", stdout);
}

#[test]
fn test_cli_layout_json() {
    let mut args = vec!["layout", "--json"];
    args.extend_from_slice(&OCTAVE);
    let output = run(&args);
    assert!(output.status.success());

    let rects: Vec<serde_json::Value> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(rects.len(), 12);
    assert_eq!(
        rects[1],
        serde_json::json!({ "left": 76, "top": 0, "right": 127, "bottom": 120 })
    );
}

#[test]
fn test_cli_locate() {
    let mut args = vec!["locate", "--x", "100", "--y", "50"];
    args.extend_from_slice(&OCTAVE);
    let output = run(&args);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "key: 1 (black, octave 0)");

    let mut args = vec!["locate", "--x", "-5", "--y", "10"];
    args.extend_from_slice(&OCTAVE);
    let output = run(&args);
    assert_eq!(stdout_of(&output).trim(), "key: none");
}

#[test]
fn test_cli_replay() {
    let ctx = TestContext::new();
    let script = ctx.write(
        "gesture.json",
        r#"[
            { "type": "down", "id": 0, "x": 50.0, "y": 180.0 },
            { "type": "move", "pointers": [ { "id": 0, "x": 150.0, "y": 180.0 } ] },
            { "type": "down", "id": 1, "x": 250.0, "y": 180.0 },
            { "type": "up", "id": 1, "x": 250.0, "y": 180.0 },
            { "type": "cancel", "id": 0 }
        ]"#,
    );

    let mut args = vec!["replay", "--script", script.to_str().unwrap()];
    args.extend_from_slice(&OCTAVE);
    let output = run(&args);
    assert!(output.status.success(), "{:?}", output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("key_up(0) key_down(2)"), "{}", stdout);
    assert!(stdout.contains("key_up(4) key_click(4)"), "{}", stdout);
    assert!(stdout.contains("Pressed keys: []"), "{}", stdout);
}

#[test]
fn test_cli_config_file_with_override() {
    let ctx = TestContext::new();
    let config = ctx.write(
        "piano.json",
        r#"{ "number_of_keys": 12, "black_key_width_scale": 0.5, "key_stroke_width": 0 }"#,
    );

    let output = run(&[
        "layout",
        "--json",
        "--config",
        config.to_str().unwrap(),
        "--number-of-keys",
        "5",
        "--width",
        "300",
        "--height",
        "100",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let rects: Vec<serde_json::Value> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(rects.len(), 5);
    // Stroke from the file, key count from the command line.
    assert_eq!(rects[2]["left"], 100);
    assert_eq!(rects[2]["right"], 200);
}

#[test]
fn test_cli_rejects_invalid_config() {
    let output = run(&["layout", "--number-of-keys", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("numberOfKeys must be between 1 and 88"),
        "{}",
        stderr
    );
}

#[test]
fn test_cli_missing_script_fails() {
    let output = run(&["replay", "--script", "/nonexistent/gesture.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IO Error"));
}
