//! Loading a written data directory and driving a session from it.

use tc_core::{GmSession, SessionConfig};
use tc_data::{load_dir, write_template};

#[test]
fn template_drives_a_session() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path()).unwrap();
    let loaded = load_dir(dir.path()).unwrap();
    let calendar = loaded.open_calendar();
    let mut session = GmSession::new(loaded.data, calendar, SessionConfig::default());

    session.process("zone old road").unwrap();
    let out = session.process("day").unwrap();
    assert!(out.contains("Old Road"));
    assert!(out.contains("Thaw 2 (Spring)"));

    let out = session.process("site-zone barrow").unwrap();
    assert!(out.contains("Barrow"));
    session.process("turn").unwrap();
}

#[test]
fn date_changes_are_saved() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path()).unwrap();
    let loaded = load_dir(dir.path()).unwrap();
    let calendar = loaded.open_calendar();
    let mut session = GmSession::new(loaded.data, calendar, SessionConfig::default());

    session.process("date set 3 10").unwrap();

    let reloaded = load_dir(dir.path()).unwrap();
    let cal = reloaded.open_calendar().unwrap();
    assert_eq!(cal.current_label(), "Highsun 10 (Summer)");
    assert_eq!(cal.current_season(), Some("Summer"));
}
