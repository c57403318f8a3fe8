//! Tests for profile persistence and the progression tables.

use std::fs;

use proptest::prelude::*;

use invaders_core::enums::{GameMode, Tier, Unlock};

use crate::levels::{level_requirements, TARGET_INCREMENT};
use crate::profile::{Config, HighScores, Profile, LEVEL5_SKIN};
use crate::store::{load_profile, JsonProfileStore, MemoryStore, ProfileStore, CONFIG_FILE, HIGH_SCORE_FILE};

fn sample_profile() -> Profile {
    let mut profile = Profile::default();
    profile.config.unlock_impossible = true;
    profile.config.max_level_reached = 12;
    profile.config.shotgun_unlocked = true;
    profile.config.whip_unlocked = true;
    profile.config.grant(Unlock::Level5Skin);
    profile.config.active_skin = LEVEL5_SKIN.to_string();
    profile.config.sound_volume = 0.3;
    profile.config.music_volume = 0.12;
    profile.config.mouse_control = true;
    profile.high_scores.easy = 120;
    profile.high_scores.hard = 1450;
    profile.high_scores.record(GameMode::Level(3), 220);
    profile.high_scores.record(GameMode::Level(11), 505);
    profile
}

// ---- Round trips ----

#[test]
fn test_json_store_round_trip() {
    let dir = std::env::temp_dir().join("invaders_test_profile_round_trip");
    let _ = fs::remove_dir_all(&dir);

    let profile = sample_profile();
    let mut store = JsonProfileStore::new(&dir);
    store.save_config(&profile.config).unwrap();
    store.save_high_scores(&profile.high_scores).unwrap();

    let mut reopened = JsonProfileStore::new(&dir);
    let loaded = load_profile(&mut reopened);
    assert_eq!(loaded, profile);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_memory_store_round_trip() {
    let profile = sample_profile();
    let mut store = MemoryStore::new();
    store.save_config(&profile.config).unwrap();
    store.save_high_scores(&profile.high_scores).unwrap();
    assert_eq!(load_profile(&mut store), profile);
}

// ---- Defaults and fallbacks ----

#[test]
fn test_missing_files_are_created_with_defaults() {
    let dir = std::env::temp_dir().join("invaders_test_profile_missing");
    let _ = fs::remove_dir_all(&dir);

    let mut store = JsonProfileStore::new(&dir);
    let profile = load_profile(&mut store);
    assert_eq!(profile, Profile::default());
    assert!(dir.join(CONFIG_FILE).exists());
    assert!(dir.join(HIGH_SCORE_FILE).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_keys_filled_present_keys_kept() {
    let mut store = MemoryStore::with_documents(
        Some(r#"{"max_level_reached": 7, "mouse_control": true, "legacy_field": 3}"#),
        Some(r#"{"hard": 900, "level_mode": {"level_2": 160}}"#),
    );
    let profile = load_profile(&mut store);

    assert_eq!(profile.config.max_level_reached, 7);
    assert!(profile.config.mouse_control);
    assert_eq!(profile.config.sound_volume, Config::default().sound_volume);
    assert_eq!(profile.config.unlocked_skins, vec!["default".to_string()]);

    assert_eq!(profile.high_scores.hard, 900);
    assert_eq!(profile.high_scores.easy, 0);
    assert_eq!(profile.high_scores.get(GameMode::Level(2)), 160);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = std::env::temp_dir().join("invaders_test_profile_malformed");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(CONFIG_FILE), "{ not json").unwrap();

    let mut store = JsonProfileStore::new(&dir);
    assert!(store.load_config().is_err());
    let profile = load_profile(&mut store);
    assert_eq!(profile.config, Config::default());
    // The malformed file is left for the player to inspect.
    assert_eq!(fs::read_to_string(dir.join(CONFIG_FILE)).unwrap(), "{ not json");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_error_messages_name_the_file() {
    let mut store = MemoryStore::with_documents(Some("42"), None);
    let err = store.load_config().unwrap_err();
    assert!(err.to_string().contains(CONFIG_FILE));
}

// ---- High scores ----

#[test]
fn test_tier_high_score_only_when_beaten() {
    let mut scores = HighScores::default();
    assert!(!scores.record(GameMode::Tier(Tier::Easy), 0));
    assert!(scores.record(GameMode::Tier(Tier::Easy), 50));
    assert!(!scores.record(GameMode::Tier(Tier::Easy), 50));
    assert!(scores.record(GameMode::Tier(Tier::Easy), 51));
    assert_eq!(scores.get(GameMode::Tier(Tier::Easy)), 51);
    assert_eq!(scores.get(GameMode::Tier(Tier::Medium)), 0);
}

#[test]
fn test_first_level_score_always_records() {
    let mut scores = HighScores::default();
    assert!(scores.record(GameMode::Level(4), 0));
    assert_eq!(scores.level_mode.get("level_4"), Some(&0));
    assert!(!scores.record(GameMode::Level(4), 0));
    assert_eq!(HighScores::key_for(GameMode::Level(4)), "level_4");
    assert_eq!(HighScores::key_for(GameMode::Tier(Tier::Impossible)), "impossible");
}

// ---- Settings ----

#[test]
fn test_volume_steps_and_bounds() {
    let mut config = Config::default();
    config.adjust_sound_volume(true);
    assert!((config.sound_volume - 0.6).abs() < 1e-4);
    for _ in 0..20 {
        config.adjust_sound_volume(true);
    }
    assert_eq!(config.sound_volume, 1.0);
    for _ in 0..20 {
        config.adjust_sound_volume(false);
    }
    assert_eq!(config.sound_volume, 0.0);

    config.adjust_music_volume(true);
    assert!((config.music_volume - 0.08).abs() < 1e-4);
    for _ in 0..40 {
        config.adjust_music_volume(true);
    }
    assert!((config.music_volume - 0.2).abs() < 1e-4);
}

#[test]
fn test_grant_and_skin_selection() {
    let mut config = Config::default();
    assert!(!config.select_skin(LEVEL5_SKIN));
    assert!(config.grant(Unlock::Level5Skin));
    assert!(!config.grant(Unlock::Level5Skin));
    assert!(config.select_skin(LEVEL5_SKIN));
    assert_eq!(config.active_skin, LEVEL5_SKIN);
    assert!(config.grant(Unlock::SpreadWeapon));
    assert!(!config.grant(Unlock::SpreadWeapon));
    assert!(!config.grant(Unlock::ExplosiveShot));
}

// ---- Properties ----

proptest! {
    #[test]
    fn prop_targets_grow_with_level(level in 1u32..2000) {
        let here = level_requirements(level);
        let next = level_requirements(level + 1);
        prop_assert!(next.target_score > here.target_score);
        prop_assert!(next.composition.enemies <= 8);
        prop_assert!(next.composition.strong <= 1);
    }

    #[test]
    fn prop_mid_band_linear(level in 6u32..=10) {
        prop_assert_eq!(
            level_requirements(level).target_score,
            level_requirements(5).target_score + (level - 5) * TARGET_INCREMENT
        );
    }

    #[test]
    fn prop_partial_config_keeps_present_keys(max_level in 1u32..500, mouse in any::<bool>(), volume in 0u32..=10) {
        let sound = volume as f32 / 10.0;
        let doc = format!(
            r#"{{"max_level_reached": {max_level}, "mouse_control": {mouse}, "sound_volume": {sound}}}"#
        );
        let mut store = MemoryStore::with_documents(Some(&doc), None);
        let config = store.load_config().unwrap();
        prop_assert_eq!(config.max_level_reached, max_level);
        prop_assert_eq!(config.mouse_control, mouse);
        prop_assert!((config.sound_volume - sound).abs() < 1e-6);
        prop_assert_eq!(config.music_volume, Config::default().music_volume);
        prop_assert_eq!(config.active_skin, Config::default().active_skin);
    }
}
