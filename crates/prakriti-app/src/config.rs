use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use prakriti_core::config::{RulesConfig, parse_hex_color};
use prakriti_instruments::defaults::{CONFIG_VERSION, default_config};
use prakriti_instruments::validate_banks;

/// Watermark keys that older configs kept at the top level.
const LEGACY_WATERMARK_KEYS: [(&str, &str); 3] = [
    ("watermark_text", "text"),
    ("watermark_opacity", "opacity"),
    ("show_footer_logo", "show_footer_logo"),
];

/// Write the default config to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn bootstrap_config(path: &Path) -> eyre::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(path, &default_config())?;
    tracing::info!(path = %path.display(), "default config written");
    Ok(true)
}

pub fn load_config(path: &Path) -> eyre::Result<RulesConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse YAML text, run migrations and validate.
pub fn parse_config(contents: &str) -> eyre::Result<RulesConfig> {
    // Parse as a raw value so we can run migrations before deserializing.
    let raw: Value = serde_yaml::from_str(contents)?;
    let on_disk_version = match raw.get("config_version").and_then(Value::as_u64) {
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} is newer than this build supports ({CONFIG_VERSION})"))?,
        None => 0,
    };

    let migrated = migrate(raw, on_disk_version)?;
    let config: RulesConfig = serde_yaml::from_value(migrated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CONFIG_VERSION`].
fn migrate(mut raw: Value, from_version: u32) -> eyre::Result<Value> {
    if from_version > CONFIG_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CONFIG_VERSION})"
        ));
    }

    // v0 → v1: fold top-level watermark keys into a `watermark` section
    if from_version < 1 {
        let obj = raw
            .as_mapping_mut()
            .ok_or_else(|| eyre::eyre!("config is not a YAML mapping"))?;
        let mut moved = Mapping::new();
        for (legacy, key) in LEGACY_WATERMARK_KEYS {
            if let Some(value) = obj.remove(legacy) {
                moved.insert(Value::from(key), value);
            }
        }
        if !moved.is_empty() {
            let section = obj
                .entry(Value::from("watermark"))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if let Some(section) = section.as_mapping_mut() {
                for (key, value) in moved {
                    section.entry(key).or_insert(value);
                }
            }
        }
        obj.insert(Value::from("config_version"), Value::from(1u32));
        tracing::info!("migrated config v0 → v1");
    }

    Ok(raw)
}

/// Checks that typed deserialization cannot express.
pub fn validate_config(config: &RulesConfig) -> eyre::Result<()> {
    validate_banks(&config.questions)?;

    let t = &config.mappings.dosha_thresholds;
    if !(t.mild < t.moderate && t.moderate < t.severe) {
        return Err(eyre::eyre!(
            "dosha thresholds must increase: mild {} < moderate {} < severe {}",
            t.mild,
            t.moderate,
            t.severe
        ));
    }
    parse_hex_color(&config.branding.accent_color)?;
    let opacity = config.watermark.opacity;
    if !(0.01..=0.2).contains(&opacity) {
        return Err(eyre::eyre!("watermark opacity {opacity} outside 0.01–0.2"));
    }
    Ok(())
}

/// Validate, then write through a temp file and rename.
pub fn save_config(path: &Path, config: &RulesConfig) -> eyre::Result<()> {
    validate_config(config)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CONFIG_VERSION;
    let yaml = serde_yaml::to_string(&stamped)?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())?;
    fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Copy of `config` with the dotted `key` (e.g. `branding.clinic_name`)
/// set to `raw`, parsed as a YAML scalar or flow value. The result is
/// type-checked and validated.
pub fn set_config_value(config: &RulesConfig, key: &str, raw: &str) -> eyre::Result<RulesConfig> {
    let mut root = serde_yaml::to_value(config)?;
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    let Some((leaf, parents)) = parts.split_last() else {
        return Err(eyre::eyre!("empty config key"));
    };

    let mut node = &mut root;
    for part in parents {
        node = node
            .as_mapping_mut()
            .and_then(|m| m.get_mut(*part))
            .ok_or_else(|| eyre::eyre!("unknown config section '{part}' in '{key}'"))?;
    }
    let section = node
        .as_mapping_mut()
        .ok_or_else(|| eyre::eyre!("'{key}' does not name a field"))?;
    if !section.contains_key(*leaf) {
        return Err(eyre::eyre!("unknown config key '{key}'"));
    }
    let value: Value = serde_yaml::from_str(raw)?;
    section.insert(Value::from(*leaf), value);

    let updated: RulesConfig = serde_yaml::from_value(root)
        .map_err(|e| eyre::eyre!("invalid value for '{key}': {e}"))?;
    validate_config(&updated)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_watermark_keys_are_folded() {
        let mut raw = serde_yaml::to_value(default_config()).unwrap();
        let obj = raw.as_mapping_mut().unwrap();
        obj.remove("config_version");
        obj.remove("watermark");
        obj.insert(Value::from("watermark_text"), Value::from("Kakunje Wellness"));
        obj.insert(Value::from("watermark_opacity"), Value::from(0.05));

        let text = serde_yaml::to_string(&raw).unwrap();
        let config = parse_config(&text).unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(config.watermark.text.as_deref(), Some("Kakunje Wellness"));
        assert!((config.watermark.opacity - 0.05).abs() < 1e-6);
    }

    #[test]
    fn newer_version_rejected() {
        let mut config = default_config();
        config.config_version = CONFIG_VERSION + 1;
        let text = serde_yaml::to_string(&config).unwrap();
        assert!(parse_config(&text).is_err());
    }

    #[test]
    fn oversized_version_is_not_truncated() {
        let mut raw = serde_yaml::to_value(default_config()).unwrap();
        let obj = raw.as_mapping_mut().unwrap();
        obj.insert(Value::from("config_version"), Value::from(u64::from(u32::MAX) + 2));
        let text = serde_yaml::to_string(&raw).unwrap();
        let err = parse_config(&text).unwrap_err();
        assert!(err.to_string().contains("4294967297"), "{err}");
    }
}
