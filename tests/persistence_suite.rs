mod common;

use ptt_core::LoadSource;
use ptt_domain::{AccountType, Mode, NewAccount, PreferencesPatch};
use pt_trackers::app::App;

use common::{ledger_path, temp_home};

#[test]
fn first_start_seeds_and_persists() {
    let home = temp_home();
    let app = App::bootstrap(home.clone()).expect("bootstrap");
    assert_eq!(app.store.load_report().source, LoadSource::Seeded);
    assert_eq!(app.store.state().accounts.len(), 4);
    assert!(ledger_path(&home).exists());
}

#[test]
fn mutations_survive_restart() {
    let home = temp_home();
    let mut app = App::bootstrap(home.clone()).expect("bootstrap");
    let id = app
        .store
        .add_account(NewAccount::masked(
            "Kotak Mahindra",
            AccountType::Savings,
            "7788",
            50000.0,
            Mode::Personal,
        ))
        .expect("add account");
    app.store.set_mode(Mode::Business).expect("set mode");
    app.store
        .update_preferences(PreferencesPatch {
            dark_mode: Some(true),
            ..PreferencesPatch::default()
        })
        .expect("update preferences");
    drop(app);

    let reopened = App::bootstrap(home).expect("reopen");
    let state = reopened.store.state();
    assert_eq!(reopened.store.load_report().source, LoadSource::Persisted);
    assert_eq!(state.account(&id).map(|a| a.last_four.as_str()), Some("7788"));
    assert_eq!(state.mode, Mode::Business);
    assert!(state.preferences.dark_mode);
}

#[test]
fn restore_replaces_the_live_ledger() {
    let home = temp_home();
    let mut app = App::bootstrap(home).expect("bootstrap");
    let key = app.config.storage_key.clone();
    let backup = app.storage.backup(&key, Some("pristine")).expect("backup");

    app.store.delete_account("a2").expect("delete account");
    assert!(app.store.state().account("a2").is_none());

    app.storage.restore(&key, &backup.id).expect("restore");
    app.reload().expect("reload");
    assert!(app.store.state().account("a2").is_some());
}

#[test]
fn persisted_account_shape() {
    let home = temp_home();
    let app = App::bootstrap(home).expect("bootstrap");
    let card = app.store.state().account("a3").expect("seeded card");
    let json = serde_json::to_string_pretty(card).expect("serialize");
    insta::assert_snapshot!(json, @r###"
    {
      "id": "a3",
      "bankName": "ICICI Credit",
      "accountType": "Credit Card",
      "accountNumber": "XXXXXX1002",
      "lastFour": "1002",
      "balance": -15000.0,
      "mode": "PERSONAL"
    }
    "###);
}
