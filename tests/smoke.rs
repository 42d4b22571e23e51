use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const STAGE: &str = r#"
[room.floor]
size = [10.0, 0.2, 6.0]
position = [0.0, 0.0, 0.0]

[room.walls]
size = [10.0, 4.0, 0.5]
position = [0.0, 2.1, -3.25]

[room.ceiling]
size = [10.0, 0.2, 6.0]
position = [0.0, 4.2, 0.0]

[camera]
projection = "orthographic"
half_height = 5.0
position = [0.0, 20.0, 0.0]
target = [0.0, 0.0, 0.0]
near = 0.1
far = 100.0

[viewport]
width = 1280
height = 720

[drag]
sensitivity = 0.01

[[assets]]
name = "lamp"
size = [1.0, 1.0, 1.0]
draggable = true

[[assets]]
name = "sofa"
size = [2.0, 1.0, 1.0]
placement = { anchor = "back-wall" }
"#;

const SCRIPT: &str = r#"{"steps": [
    {"op": "down", "x": 640, "y": 360},
    {"op": "move", "x": 940, "y": 360},
    {"op": "move", "x": 1240, "y": 360},
    {"op": "up", "x": 1240, "y": 360},
    {"op": "frame"}
]}"#;

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roomstage"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn roomstage")
}

fn asset<'a>(layout: &'a Value, name: &str) -> &'a Value {
    layout
        .as_array()
        .expect("layout is an array")
        .iter()
        .find(|entry| entry["name"] == name)
        .unwrap_or_else(|| panic!("{name} missing from layout"))
}

#[test]
fn scripted_drag_clamps_lamp_to_floor_edge() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("stage.toml"), STAGE).expect("write config");
    fs::write(dir.path().join("drag.json"), SCRIPT).expect("write script");

    let output = run(
        &[
            "--strict",
            "--config",
            "stage.toml",
            "--script",
            "drag.json",
            "--event-log",
            "out/events.jsonl",
            "--output",
            "out/layout.json",
            "--shuffle-loads",
            "42",
        ],
        dir.path(),
    );
    assert!(
        output.status.success(),
        "roomstage failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let layout: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/layout.json")).unwrap())
            .expect("layout json");
    let lamp = asset(&layout, "lamp");
    assert_eq!(lamp["draggable"], true);
    let x = lamp["position"][0].as_f64().unwrap();
    let y = lamp["position"][1].as_f64().unwrap();
    assert!((x - 4.5).abs() < 1e-4, "lamp x = {x}");
    assert!((y - 0.6).abs() < 1e-5, "lamp y = {y}");

    let sofa = asset(&layout, "sofa");
    let z = sofa["position"][2].as_f64().unwrap();
    assert!((z + 2.5).abs() < 1e-5, "sofa z = {z}");

    let events = fs::read_to_string(dir.path().join("out/events.jsonl")).expect("event log");
    let records: Vec<Value> = events
        .lines()
        .map(|line| serde_json::from_str(line).expect("jsonl record"))
        .collect();
    // Initial frame plus one record per script step.
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["kind"], "frame");
    assert_eq!(records[0]["payload"].as_array().unwrap().len(), 2);
    assert_eq!(records[1]["payload"]["outcome"], "started");
    assert_eq!(records[3]["payload"]["outcome"], "moved");
    assert_eq!(records[4]["payload"]["outcome"], "released");
}

#[test]
fn write_config_emits_loadable_defaults() {
    let dir = tempdir().expect("tempdir");
    let output = run(&["--write-config", "config/stage.toml"], dir.path());
    assert!(output.status.success());

    let written = fs::read_to_string(dir.path().join("config/stage.toml")).expect("written");
    assert!(written.contains("lamp"));
    assert!(written.contains("front-right-corner"));
}

#[test]
fn strict_mode_rejects_two_draggable_assets() {
    let dir = tempdir().expect("tempdir");
    let config = STAGE.replace(
        "placement = { anchor = \"back-wall\" }",
        "placement = { anchor = \"back-wall\" }\ndraggable = true",
    );
    fs::write(dir.path().join("stage.toml"), config).expect("write config");

    let output = run(&["--strict", "--config", "stage.toml"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("only one asset may be draggable"));
}

#[test]
fn model_bounds_come_from_the_obj_file() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("models")).expect("models dir");
    fs::write(
        dir.path().join("models/crate.obj"),
        "o crate\nv -50 0 -50\nv 50 0 -50\nv 50 200 50\nv -50 200 50\nf 1 2 3 4\n",
    )
    .expect("write model");

    let config = STAGE.replace(
        "[[assets]]\nname = \"sofa\"",
        "[[assets]]\nname = \"crate\"\nmodel = \"models/crate.obj\"\nscale = 0.01\nsize = [3.0, 3.0, 3.0]\n\n[[assets]]\nname = \"sofa\"",
    );
    fs::write(dir.path().join("stage.toml"), config).expect("write config");

    let output = run(
        &["--strict", "--config", "stage.toml", "--event-log", "events.jsonl"],
        dir.path(),
    );
    assert!(
        output.status.success(),
        "roomstage failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let layout: Value = serde_json::from_slice(&output.stdout).expect("layout json on stdout");
    let placed = asset(&layout, "crate");
    let size: Vec<f64> = (0..3)
        .map(|i| placed["size"][i].as_f64().unwrap())
        .collect();
    assert!((size[0] - 1.0).abs() < 1e-5, "size = {size:?}");
    assert!((size[1] - 2.0).abs() < 1e-5, "size = {size:?}");
    assert!((size[2] - 1.0).abs() < 1e-5, "size = {size:?}");
    // Model origin is on its base, so the origin rests on the floor top.
    let y = placed["position"][1].as_f64().unwrap();
    assert!((y - 0.1).abs() < 1e-5, "crate y = {y}");
}
