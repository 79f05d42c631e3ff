//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - First-run default configuration generation
//! - Configuration loading and saving
//! - Game root lookup and its configuration errors
//! - Hand-written YAML in the on-disk format

use camino::Utf8PathBuf;
use hoyomm::{ConfigManager, GameId, ModError, UserConfig};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_config_dir_created_when_missing() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("HoyoModManager Data");

    ConfigManager::new(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn test_first_run_writes_empty_paths() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let user_config = manager.load_user_config().unwrap();

    // Every game is listed so the user only has to fill in the blanks
    let written = fs::read_to_string(manager.user_config_path()).unwrap();
    assert!(written.contains("PathGIMI"));
    assert!(written.contains("PathSRMI"));
    assert!(written.contains("PathZZMI"));

    for game in GameId::ALL {
        assert!(matches!(
            user_config.game_root(game),
            Err(ModError::ConfigurationMissing(_))
        ));
    }
}

#[test]
fn test_save_and_load_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut user_config = UserConfig::default();
    user_config.set_game_root(GameId::Genshin, "/games/GIMI");
    user_config.set_game_root(GameId::Zenless, "/games/ZZMI");
    user_config.debug_mode = true;

    manager.save_user_config(&user_config).unwrap();
    let loaded_config = manager.load_user_config().unwrap();

    assert_eq!(loaded_config, user_config);
    assert_eq!(
        loaded_config.layout(GameId::Zenless).unwrap().mods_root(),
        Utf8PathBuf::from("/games/ZZMI/Mods")
    );
}

#[test]
fn test_load_hand_written_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let content = r#"
Paths:
  PathGIMI: "D:\\Games\\GIMI"
  PathSRMI: ""
"#;
    fs::write(manager.user_config_path(), content).unwrap();

    let user_config = manager.load_user_config().unwrap();

    assert_eq!(
        user_config.game_root(GameId::Genshin).unwrap().as_str(),
        "D:\\Games\\GIMI"
    );
    assert!(user_config.game_root(GameId::StarRail).is_err());
    // Key missing entirely
    assert!(user_config.game_root(GameId::Zenless).is_err());
    assert!(!user_config.debug_mode);
}

#[test]
fn test_unknown_keys_are_kept_in_paths() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.user_config_path(),
        "Paths:\n  PathGIMI: /g\n  PathHI3: /h\n",
    )
    .unwrap();

    let user_config = manager.load_user_config().unwrap();
    assert_eq!(user_config.paths.get("PathHI3").map(String::as_str), Some("/h"));
}
