#![cfg(feature = "cli")]

use std::time::Duration;

use structopt::StructOpt;

use ilokalama::{
    app::line_events,
    cli::Opt,
    config::{Settings, DEFAULT_MAX_HISTORY, DEFAULT_MAX_REPEAT},
    editor::{Binding, InputEvent, Keytable},
    grid::{Direction, Size},
    Action,
};

#[test]
fn test_line_events() {
    assert_eq!(line_events(":quit"), vec![InputEvent::Exit]);
    assert_eq!(line_events(":undo"), vec![InputEvent::Undo]);
    assert_eq!(
        line_events("2l"),
        vec![InputEvent::Char('2'), InputEvent::Char('l'), InputEvent::Confirm]
    );
    assert_eq!(line_events(""), vec![InputEvent::Confirm]);
}

#[test]
fn test_options_to_app_config() {
    let opt = Opt::from_iter(&["ilokalama", "--size", "8x4", "--step", "0.5", "--ticks", "10"]);
    let config = opt.to_app_config().unwrap();

    assert_eq!(config.size, Size::new(8, 4));
    assert_eq!(config.step, Duration::from_millis(500));
    assert_eq!(config.fps, 25);
    assert_eq!(config.ticks, Some(10));
    assert_eq!(config.settings, Settings::default());
}

#[test]
fn test_options_reject_bad_values() {
    assert!(Opt::from_iter_safe(&["ilokalama", "--size", "8by4"]).is_err());
    assert!(Opt::from_iter_safe(&["ilokalama", "--step", "-1"]).is_err());
    assert!(Opt::from_iter_safe(&["ilokalama", "--step", "1e30"]).is_err());
    assert!(Opt::from_iter_safe(&["ilokalama", "--size", "3000000000x2"]).is_err());

    let opt = Opt::from_iter(&["ilokalama", "--fps", "0"]);

    assert!(opt.to_app_config().is_err());
}

#[test]
fn test_settings_from_json() {
    let settings: Settings = serde_json::from_str(
        r#"{ "keytable": { "x": { "change_type": "spreader" }, "w": { "move_cursor": "up" } }, "max_repeat": 50 }"#,
    )
    .unwrap();

    assert_eq!(settings.max_repeat, 50);
    assert_eq!(settings.max_history, DEFAULT_MAX_HISTORY);
    assert_eq!(settings.keytable.resolve('x'), Some(Action::change_type("spreader")));
    assert_eq!(settings.keytable.resolve('w'), Some(Action::MoveCursor(Direction::Up)));
    assert_eq!(settings.keytable.resolve('h'), None);
}

#[test]
fn test_settings_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();

    assert_eq!(settings.max_repeat, DEFAULT_MAX_REPEAT);
    assert_eq!(settings.max_history, DEFAULT_MAX_HISTORY);
    assert_eq!(settings.keytable, Keytable::default());
    assert!(settings
        .keytable
        .iter()
        .any(|(key, binding)| key == 'm' && *binding == Binding::ChangeType("spreader".into())));
}
