use std::process::{Command, Output};

fn run_notifybox(args: &[&str], data_dir: &std::path::Path, config_dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_notifybox"))
        .args(args)
        .env("XDG_DATA_HOME", data_dir)
        .env("XDG_CONFIG_HOME", config_dir)
        .env_remove("EDITOR")
        .output()
        .expect("Failed to run notifybox")
}

fn events(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn summary(events: &[serde_json::Value]) -> Vec<(String, u64, u64)> {
    events
        .iter()
        .map(|e| {
            (
                e["kind"].as_str().unwrap().to_string(),
                e["id"].as_u64().unwrap(),
                e["elapsedMs"].as_u64().unwrap(),
            )
        })
        .collect()
}

fn write_config(config_dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let config_path = config_dir.join("notifybox").join("config.toml");
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(&config_path, content).unwrap();
    config_path
}

fn ev(kind: &str, id: u64, at: u64) -> (String, u64, u64) {
    (kind.to_string(), id, at)
}

#[test]
fn send_shows_then_closes() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["--json", "send", "--title", "Build", "--message", "done", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());

    let events = events(&output);
    assert_eq!(summary(&events), vec![ev("shown", 1, 0), ev("closed", 1, 2300)]);
    assert_eq!(events[0]["text"], "Build: done");
    assert!(events[0]["position"].is_object());
}

#[test]
fn send_honors_duration_override() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["--json", "send", "-t", "Quick", "-d", "500", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(
        summary(&events(&output)),
        vec![ev("shown", 1, 0), ev("closed", 1, 800)]
    );
}

#[test]
fn demo_runs_queue_in_order() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["--json", "demo", "--count", "3", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());

    let events = events(&output);
    assert_eq!(
        summary(&events),
        vec![
            ev("shown", 1, 0),
            ev("pending", 2, 0),
            ev("pending", 3, 0),
            ev("closed", 1, 2300),
            ev("shown", 2, 2300),
            ev("closed", 2, 4600),
            ev("shown", 3, 4600),
            ev("closed", 3, 6900),
        ]
    );
    assert_eq!(events[4]["text"], "[mail] Mohamed | Vacation Request - 20/12 to 30/12");
}

#[test]
fn demo_with_two_slots_from_config() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_config(config_dir.path(), "[queue]\nmax_active = 2\n");

    let output = run_notifybox(
        &["--json", "demo", "--count", "3", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(
        summary(&events(&output)),
        vec![
            ev("shown", 1, 0),
            ev("shown", 2, 0),
            ev("pending", 3, 0),
            ev("closed", 1, 2300),
            ev("shown", 3, 2300),
            ev("closed", 2, 2300),
            ev("closed", 3, 4600),
        ]
    );
}

#[test]
fn hovered_toast_stays_until_pointer_leaves() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["--json", "demo", "--count", "1", "--hover-ms", "3000", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());
    // Timeout at 2000 is postponed to 4000, when the pointer has left.
    assert_eq!(
        summary(&events(&output)),
        vec![ev("shown", 1, 0), ev("closed", 1, 4300)]
    );
}

#[test]
fn clear_leaves_visible_toast_until_exit() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["--json", "demo", "--count", "2", "--clear-after-ms", "1000", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());

    let events = events(&output);
    assert_eq!(
        summary(&events),
        vec![
            ev("shown", 1, 0),
            ev("pending", 2, 0),
            ev("cleared", 1, 1000),
            ev("cleared", 2, 1000),
            ev("closed", 1, 1000),
        ]
    );
    assert_eq!(events[2]["text"], "left on screen");
    assert!(events[3].get("text").is_none());
}

#[test]
fn clear_closes_when_configured() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_config(config_dir.path(), "[queue]\nclose_on_clear = true\n");

    let output = run_notifybox(
        &["--json", "demo", "--count", "2", "--clear-after-ms", "1000", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(
        summary(&events(&output)),
        vec![
            ev("shown", 1, 0),
            ev("pending", 2, 0),
            ev("closed", 1, 1000),
            ev("cleared", 1, 1000),
            ev("cleared", 2, 1000),
        ]
    );
}

#[test]
fn unknown_template_is_rejected() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["send", "--title", "x", "--template", "nope", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Template not found: nope"));
}

#[test]
fn invalid_direction_is_rejected() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();

    let output = run_notifybox(
        &["send", "--title", "x", "--direction", "middle"],
        data_dir.path(),
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid flow direction: middle"));
}

#[test]
fn direction_is_saved_with_comments_intact() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = write_config(
        config_dir.path(),
        "# my settings\n[toast]\n# keep this\nduration_ms = 1500\n",
    );

    let output = run_notifybox(&["direction", "left-up"], data_dir.path(), config_dir.path());
    assert!(output.status.success());

    let content = std::fs::read_to_string(config_path).unwrap();
    assert!(content.contains("# my settings"));
    assert!(content.contains("# keep this"));
    assert!(content.contains("duration_ms = 1500"));
    assert!(content.contains("flow_direction = \"left-up\""));
}

#[test]
fn saved_direction_moves_the_toast() {
    let data_dir = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    write_config(config_dir.path(), "[toast]\nflow_direction = \"left-up\"\n");

    let output = run_notifybox(
        &["--json", "send", "--title", "x", "--virtual-time"],
        data_dir.path(),
        config_dir.path(),
    );
    assert!(output.status.success());
    let events = events(&output);
    assert_eq!(events[0]["position"]["x"], 0.0);
    assert_eq!(events[0]["position"]["y"], 0.0);
}
