//! Integration tests for the platoon binaries.
//!
//! Tests the full PBI session flow by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses. The batch solver is
//! driven the same way with JSON lines.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_platoon");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start platoon");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Feeds `input` to the batch solver and returns its stdout lines.
fn run_batch(args: &[&str], input: &str) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_batch");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start batch");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("failed to wait on child");
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const OWN: &str = "Spearmen#10;Militia#30;FootArcher#20;LightCavalry#1000;HeavyCavalry#120";
const ENEMY: &str = "Militia#10;Spearmen#10;FootArcher#1000;LightCavalry#120;CavalryArcher#100";

#[test]
fn pbi_handshake_with_protocol_version() {
    let lines = run_engine(&["pbi", "quit"]);

    assert!(lines.iter().any(|l| l == "id name platoon"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));
    assert!(lines.iter().any(|l| l == "pbiok"));

    let ok_idx = lines.iter().position(|l| l == "pbiok").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < ok_idx, "protocol_version must appear before pbiok");
}

#[test]
fn pbi_handshake_includes_options() {
    let lines = run_engine(&["pbi", "quit"]);
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 2);
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn unknown_and_empty_lines_are_ignored() {
    let lines = run_engine(&["foobar", "", "  ", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn reference_battle_produces_full_ledger() {
    let own = format!("own {}", OWN);
    let enemy = format!("enemy {}", ENEMY);
    let lines = run_engine(&["pbi", "isready", &own, &enemy, "go", "quit"]);

    let best_idx = lines
        .iter()
        .position(|l| l.starts_with("bestarrangement "))
        .expect("missing bestarrangement");
    assert_eq!(lines[best_idx], format!("bestarrangement {}", OWN));
    assert_eq!(lines[best_idx - 1], "info candidates 1 resolutions 5");
    assert_eq!(
        &lines[best_idx + 1..],
        &[
            "round 1 Spearmen#10 Militia#10 Draw",
            "round 2 Militia#30 Spearmen#10 Win",
            "round 3 FootArcher#20 FootArcher#1000 Loss",
            "round 4 LightCavalry#1000 LightCavalry#120 Win",
            "round 5 HeavyCavalry#120 CavalryArcher#100 Win",
        ]
    );
}

#[test]
fn hopeless_battle_reports_nosolution() {
    let lines = run_engine(&[
        "own Militia#1;Militia#1;Militia#1;Militia#1;Militia#1",
        "enemy Militia#2;Militia#2;Militia#2;Militia#2;Militia#2",
        "go",
        "quit",
    ]);
    assert_eq!(lines.last().map(String::as_str), Some("nosolution"));
    assert!(!lines.iter().any(|l| l.starts_with("round ")));
}

#[test]
fn invalid_roster_is_reported_and_not_searched() {
    let lines = run_engine(&[
        &format!("own {}", OWN),
        "enemy Militia#10;Spearmen#10",
        "go",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "invalid enemy expected 5 unit groups, got 2".to_string(),
            "invalid enemy no roster set".to_string(),
        ]
    );
}

#[test]
fn malformed_segment_is_format_error() {
    let lines = run_engine(&[
        "own Militia-10;Spearmen#10;FootArcher#1000;LightCavalry#120;CavalryArcher#100",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec!["invalid own segment 0 'Militia-10': missing '#' between type and count".to_string()]
    );
}

#[test]
fn unknown_types_option_admits_neutral_units() {
    let own = "own Catapult#50;Militia#1;Militia#1;Militia#50;Militia#50";
    let enemy = "enemy Militia#5;Militia#5;Militia#5;Militia#5;Militia#5";

    let strict = run_engine(&[own, "quit"]);
    assert_eq!(strict, vec!["invalid own segment 0: unknown unit type 'Catapult'".to_string()]);

    let lenient = run_engine(&[
        "setoption name UnknownTypes value neutral",
        own,
        enemy,
        "go",
        "quit",
    ]);
    assert!(lenient
        .iter()
        .any(|l| l.starts_with("bestarrangement Catapult#50;")));
}

#[test]
fn json_format_produces_result_line() {
    let lines = run_engine(&[
        "setoption name Format value json",
        &format!("own {}", OWN),
        &format!("enemy {}", ENEMY),
        "go",
        "quit",
    ]);
    assert_eq!(lines.len(), 1);
    let json = lines[0].strip_prefix("result ").unwrap();
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["status"], "win");
    assert_eq!(value["rounds"][4]["outcome"], "Win");
}

#[test]
fn newbattle_forgets_rosters() {
    let lines = run_engine(&[
        &format!("own {}", OWN),
        &format!("enemy {}", ENEMY),
        "newbattle",
        "go",
        "quit",
    ]);
    assert_eq!(lines, vec!["invalid own no roster set".to_string()]);
}

#[test]
fn batch_reports_each_scenario_in_order() {
    let input = format!(
        "{}\n{}\n\n{}\n",
        serde_json::json!({ "own": OWN, "enemy": ENEMY }),
        serde_json::json!({ "own": "Militia#10;Spearmen#10", "enemy": ENEMY }),
        serde_json::json!({
            "own": "Militia#1;Militia#1;Militia#1;Militia#1;Militia#1",
            "enemy": "Militia#3;Militia#3;Militia#3;Militia#3;Militia#3",
        }),
    );
    let lines = run_batch(&["--threads", "2", "--quiet"], &input);
    let values: Vec<serde_json::Value> = lines
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["index"], 0);
    assert_eq!(values[0]["status"], "win");
    assert_eq!(values[0]["arrangement"], OWN);
    assert_eq!(values[1]["status"], "invalid");
    assert_eq!(values[1]["side"], "own");
    assert_eq!(values[2]["index"], 2);
    assert_eq!(values[2]["status"], "nosolution");
}

#[test]
fn batch_rejects_unknown_argument() {
    let status = Command::new(env!("CARGO_BIN_EXE_batch"))
        .arg("--bogus")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("failed to start batch");
    assert!(!status.success());
}
