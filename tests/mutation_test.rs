use hyprparser::{
    Bezier, Binding, Color, Env, Exec, Gradient, LooseCoder, MemoryFs, Monitor, Session,
    SessionOptions, Setting, Value, Variable,
};

const ROOT: &str = "/home/user/.config/hypr/hyprland.conf";

fn open(content: &str) -> (Session, MemoryFs) {
    let fs = MemoryFs::new().with_file(ROOT, content);
    let session = Session::load_with(ROOT, SessionOptions::default(), fs.clone(), LooseCoder)
        .expect("config should load");
    (session, fs)
}

fn saved(session: &mut Session, fs: &MemoryFs) -> String {
    session.save_all().unwrap();
    fs.content(ROOT).unwrap()
}

#[test]
fn test_set_gradient_value() {
    let (mut session, fs) = open("general {\n    col.active_border = rgba(33ccffee) 45deg\n}\n");

    let mut gradient = session
        .get_value("general:col.active_border")
        .unwrap()
        .as_gradient()
        .unwrap()
        .clone();
    gradient.add_color(Color::new("ff", "00", "00", "ff"));
    gradient.angle = 90;

    assert!(session.set_option("general:col.active_border", gradient).unwrap());
    assert_eq!(
        saved(&mut session, &fs),
        "general {\n    col.active_border = rgba(33ccffee) rgba(ff0000ff) 90deg\n}\n"
    );
}

#[test]
fn test_set_float_keeps_decimal_point() {
    let (mut session, fs) = open("decoration {\n    active_opacity = 0.9\n}\n");
    session.set_option("decoration:active_opacity", 1.0).unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "decoration {\n    active_opacity = 1.0\n}\n"
    );
    assert_eq!(
        session.get_value("decoration:active_opacity"),
        Some(&Value::Float(1.0))
    );
}

#[test]
fn test_set_rewrites_only_the_owning_line() {
    let content = "# header\ngeneral {\n    # spacing\n    gaps_in = 5 # inner\n}\n";
    let (mut session, fs) = open(content);
    session.set_option("general:gaps_in", 6).unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "# header\ngeneral {\n    # spacing\n    gaps_in = 6\n}\n"
    );
}

#[test]
fn test_new_setting_deep_section_synthesis() {
    let (mut session, fs) = open("input {\n    kb_layout = us\n}\n");
    session
        .new_option(Setting::new("input:touchpad:natural_scroll", true))
        .unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "input {\n    touchpad {\n        natural_scroll = true\n    }\n    kb_layout = us\n}\n"
    );
}

#[test]
fn test_new_setting_creates_whole_chain() {
    let (mut session, fs) = open("$mod = SUPER\n");
    session
        .new_option(Setting::new("decoration:blur:size", 8))
        .unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "$mod = SUPER\ndecoration {\n    blur {\n        size = 8\n    }\n}\n"
    );

    // Second insert reuses the synthesized sections
    session
        .new_option(Setting::new("decoration:blur:passes", 2))
        .unwrap();
    assert_eq!(
        saved(&mut session, &fs),
        "$mod = SUPER\ndecoration {\n    blur {\n        passes = 2\n        size = 8\n    }\n}\n"
    );
}

#[test]
fn test_new_bind_after_first_bind() {
    let (mut session, fs) =
        open("$mod = SUPER\nbind = SUPER, Q, exec, kitty\nbind = SUPER, C, killactive,\n");
    session
        .new_option(Binding::new(
            "bind",
            vec!["SUPER".into(), "SHIFT".into()],
            "E",
            "exec",
            vec!["wofi".into()],
        ))
        .unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "$mod = SUPER\nbind = SUPER, Q, exec, kitty\nbind = SUPER SHIFT, E, exec, wofi\nbind = SUPER, C, killactive,\n"
    );
    assert_eq!(session.document().binds().len(), 3);
}

#[test]
fn test_new_bezier_goes_into_animations() {
    let (mut session, fs) = open(
        "animations {\n    enabled = true\n    bezier = myBezier, 0.05, 0.9, 0.1, 1.05\n}\n",
    );
    session
        .new_option(Bezier::new("easeOut", vec![0.25, 1.0, 0.5, 1.0]))
        .unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "animations {\n    enabled = true\n    bezier = myBezier, 0.05, 0.9, 0.1, 1.05\n    bezier = easeOut, 0.25, 1.0, 0.5, 1.0\n}\n"
    );
    assert!(session.document().bezier("easeOut").is_some());
}

#[test]
fn test_new_monitor_env_and_exec() {
    let (mut session, fs) = open(
        "monitor = ,preferred,auto,1\nenv = XCURSOR_SIZE,24\nexec-once = waybar\nexec = notify-send hi\n",
    );

    session
        .new_option(Monitor::new("DP-1", "1920x1080@144", "0x0", "1"))
        .unwrap();
    session
        .new_option(Env::new("QT_QPA_PLATFORM", vec!["wayland".into(), "xcb".into()]))
        .unwrap();
    session.new_option(Exec::new("hyprpaper", true)).unwrap();
    session.new_option(Exec::new("dunst", false)).unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "monitor = ,preferred,auto,1\n\
         monitor = DP-1,1920x1080@144,0x0,1\n\
         env = XCURSOR_SIZE,24\n\
         env = QT_QPA_PLATFORM, wayland:xcb\n\
         exec-once = waybar\n\
         exec-once = hyprpaper\n\
         exec = notify-send hi\n\
         exec = dunst\n"
    );

    let doc = session.document();
    assert_eq!(doc.monitors().len(), 2);
    assert_eq!(doc.env_var("QT_QPA_PLATFORM").unwrap().value, vec!["wayland", "xcb"]);
    assert_eq!(doc.execs().iter().filter(|e| e.once).count(), 2);
}

#[test]
fn test_new_variable_appends_to_root() {
    let (mut session, fs) = open("general {\n}\n");
    session.new_option(Variable::new("terminal", "kitty")).unwrap();

    assert_eq!(saved(&mut session, &fs), "general {\n}\n$terminal = kitty\n");
    assert_eq!(session.document().variable("terminal"), Some("kitty"));
}

#[test]
fn test_mutations_without_save_stay_in_memory() {
    let (mut session, fs) = open("general {\n    gaps_in = 5\n}\n");
    session.set_option("general:gaps_in", 1).unwrap();
    session.new_option(Setting::new("general:gaps_out", 2)).unwrap();

    assert_eq!(fs.content(ROOT).unwrap(), "general {\n    gaps_in = 5\n}\n");
    assert_eq!(session.modified_files().len(), 1);
}

#[test]
fn test_set_gradient_from_constructed_value() {
    let (mut session, fs) = open("general {\n    col.active_border = rgba(595959aa)\n}\n");
    let gradient = Gradient::new(
        45,
        vec![Color::from_token("rgba(33ccffee)"), Color::from_token("rgba(00ff99ee)")],
    );
    session.set_option("general:col.active_border", gradient).unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "general {\n    col.active_border = rgba(33ccffee) rgba(00ff99ee) 45deg\n}\n"
    );
}

#[test]
fn test_document_serializes_to_json() {
    let (mut session, _) = open(
        "general {\n    gaps_in = 5\n    col.active_border = rgba(33ccffee)\n}\nmonitor = DP-1,1920x1080,0x0,1\n",
    );
    session.set_option("general:gaps_in", 7).unwrap();

    let setting = serde_json::to_value(session.get_option("general:gaps_in").unwrap()).unwrap();
    assert_eq!(setting, serde_json::json!({ "path": "general:gaps_in", "value": 7 }));

    let doc = serde_json::to_value(session.document()).unwrap();
    assert_eq!(doc["monitors"][0]["resolution"], "1920x1080");
    assert_eq!(
        doc["settings"]["general:col.active_border"]["value"],
        serde_json::json!({ "r": "33", "g": "cc", "b": "ff", "a": "ee" })
    );
    assert_eq!(doc["ignored_rules"], 0);
}

#[test]
fn test_tiny_and_huge_floats_reload_as_floats() {
    let (mut session, fs) = open("input {\n    sensitivity = 0.5\n    scroll_factor = 1.0\n}\n");
    session.set_option("input:sensitivity", 0.00001).unwrap();
    session.set_option("input:scroll_factor", 1e20).unwrap();

    assert_eq!(
        saved(&mut session, &fs),
        "input {\n    sensitivity = 0.00001\n    scroll_factor = 100000000000000000000.0\n}\n"
    );

    let reloaded =
        Session::load_with(ROOT, SessionOptions::default(), fs, LooseCoder).unwrap();
    assert_eq!(reloaded.get_value("input:sensitivity"), Some(&Value::Float(0.00001)));
    assert_eq!(reloaded.get_value("input:scroll_factor"), Some(&Value::Float(1e20)));
}

#[test]
fn test_brace_in_value_is_rejected_and_file_stays_loadable() {
    let (mut session, fs) = open("general {\n    layout = dwindle\n}\n");

    let err = session.set_option("general:layout", "x}").unwrap_err();
    assert!(matches!(err, hyprparser::ConfigError::InvalidValue { .. }));
    // Unknown paths are still a quiet no-op
    assert!(!session.set_option("general:missing", "x}").unwrap());

    assert_eq!(saved(&mut session, &fs), "general {\n    layout = dwindle\n}\n");
    let reloaded =
        Session::load_with(ROOT, SessionOptions::default(), fs, LooseCoder).unwrap();
    assert_eq!(
        reloaded.get_value("general:layout"),
        Some(&Value::Raw("dwindle".into()))
    );
}
