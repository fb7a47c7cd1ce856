use hyprparser::{
    normalize, ConfigError, FileId, LooseCoder, Monitor, Session, Setting, Value, ValueCoder,
};
use std::fs;
use tempfile::TempDir;

const HYPRLAND_CONF: &str = "\
# Example configuration
monitor = ,preferred,auto,1

$terminal = kitty

general {
    gaps_in = 5
    gaps_out = 20
    border_size = 2
    col.active_border = rgba(33ccffee) rgba(00ff99ee) 45deg
    col.inactive_border = rgba(595959aa)
    layout = dwindle
}

decoration {
    rounding = 10
    active_opacity = 0.95
    blur {
        enabled = true
        size = 3
    }
}

input {
    kb_layout = us
    follow_mouse = 1
    sensitivity = -0.5
}

bind = SUPER, Q, exec, kitty
bind = SUPER SHIFT, M, exit,
";

fn setup(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hyprland.conf");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_get_existing_integer_setting() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let session = Session::load(&path).unwrap();

    let setting = session.get_option("general:gaps_in").unwrap();
    assert_eq!(setting, &Setting::new("general:gaps_in", 5));
    assert_eq!(setting.value.as_int().unwrap(), 5);
}

#[test]
fn test_new_setting_becomes_first_child_of_section() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let mut session = Session::load(&path).unwrap();

    assert!(session.get_option("input:numlock_by_default").is_none());
    session
        .new_option(Setting::new("input:numlock_by_default", true))
        .unwrap();
    session.save_all().unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("input {\n    numlock_by_default = true\n    kb_layout = us\n"));
    assert_eq!(
        session.get_value("input:numlock_by_default"),
        Some(&Value::Bool(true))
    );
}

#[test]
fn test_new_setting_creates_missing_section() {
    let (_dir, path) = setup("general {\n    gaps_in = 5\n}\n");
    let mut session = Session::load(&path).unwrap();

    session
        .new_option(Setting::new("input:numlock_by_default", true))
        .unwrap();
    session.save_all().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "general {\n    gaps_in = 5\n}\ninput {\n    numlock_by_default = true\n}\n"
    );
}

#[test]
fn test_set_option_rewrites_a_single_line() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let mut session = Session::load(&path).unwrap();

    assert!(session.set_option("general:gaps_in", 50).unwrap());
    session.save_all().unwrap();

    let before: Vec<&str> = HYPRLAND_CONF.lines().collect();
    let written = fs::read_to_string(&path).unwrap();
    let after: Vec<&str> = written.lines().collect();

    assert_eq!(before.len(), after.len());
    let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(after[changed[0]], "    gaps_in = 50");
}

#[test]
fn test_sourced_monitor_is_collected() {
    let (dir, path) = setup("source = ./extra.conf\n");
    fs::write(dir.path().join("extra.conf"), "monitor = DP-1,1920x1080,0x0,1\n").unwrap();

    let session = Session::load(&path).unwrap();

    assert_eq!(session.graph().len(), 2);
    assert_eq!(
        session.document().monitors(),
        &[Monitor::new("DP-1", "1920x1080", "0x0", "1")]
    );
}

#[test]
fn test_unbalanced_close_is_structural_error() {
    let (_dir, path) = setup("general {\n    gaps_in = 5\n}\n}\nborder_size = 2\n");
    let err = Session::load(&path).err().unwrap();

    assert!(err.is_fatal());
    match err {
        ConfigError::Structural { line, .. } => assert_eq!(line, 4),
        other => panic!("expected structural error, got {:?}", other),
    }
}

#[test]
fn test_save_all_is_idempotent() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let mut session = Session::load(&path).unwrap();
    session.set_option("decoration:rounding", 4).unwrap();

    session.save_all().unwrap();
    let first = fs::read(&path).unwrap();
    session.save_all().unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unmodified_save_preserves_layout() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let mut session = Session::load(&path).unwrap();
    session.save_all().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), HYPRLAND_CONF);
}

#[test]
fn test_setting_lines_round_trip() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let session = Session::load(&path).unwrap();
    let coder = LooseCoder;

    assert_eq!(session.document().settings().len(), 13);
    for setting in session.document().settings().values() {
        let location = session.locate(&setting.path).unwrap().unwrap();
        let file = session.file(location.file).unwrap();
        assert_eq!(location.file, FileId::ROOT);
        assert_eq!(
            setting.format_with(&coder),
            normalize(&file.lines[location.line]),
            "round trip of {}",
            setting.path
        );
    }
}

#[test]
fn test_decoded_types() {
    let (_dir, path) = setup(HYPRLAND_CONF);
    let session = Session::load(&path).unwrap();

    assert_eq!(session.get_value("decoration:blur:enabled"), Some(&Value::Bool(true)));
    assert_eq!(session.get_value("input:sensitivity"), Some(&Value::Float(-0.5)));
    assert_eq!(session.get_value("general:layout"), Some(&Value::Raw("dwindle".into())));

    let border = session.get_value("general:col.inactive_border").unwrap();
    assert_eq!(border.as_color().unwrap().rgba(), "595959aa");

    let gradient = session
        .get_value("general:col.active_border")
        .unwrap()
        .as_gradient()
        .unwrap();
    assert_eq!(gradient.angle, 45);
    assert_eq!(gradient.colors.len(), 2);
    assert_eq!(
        LooseCoder.encode(&Value::Gradient(gradient.clone())),
        "rgba(33ccffee) rgba(00ff99ee) 45deg"
    );
}
