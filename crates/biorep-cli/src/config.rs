use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use biorep_core::paths::SCORES_WORKBOOK;
use biorep_export::ConverterSettings;
use biorep_export::layout::FigureLayout;
use biorep_figures::FigureSettings;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "com.biorep.report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version. A file without one is read as the current version.
    #[serde(default = "current_version")]
    pub config_version: u32,
    /// SQLite patient store.
    pub database_path: PathBuf,
    /// Reference population workbooks for the distribution figures.
    pub data_dir: PathBuf,
    /// Directory holding `template_MOS.docx`, `template_annex.docx` and
    /// their `_EN` variants.
    pub templates_dir: PathBuf,
    /// Classification workbook name inside the working directory.
    pub scores_workbook: String,
    #[serde(default)]
    pub figures: FigureSettings,
    #[serde(default)]
    pub layout: FigureLayout,
    #[serde(default)]
    pub converter: ConverterSettings,
    pub created_at: jiff::Timestamp,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

impl Default for ReportConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            config_version: CURRENT_VERSION,
            database_path: base.join("patients.db"),
            data_dir: base.join("data"),
            templates_dir: base.join("templates"),
            scores_workbook: SCORES_WORKBOOK.to_string(),
            figures: FigureSettings::default(),
            layout: FigureLayout::default(),
            converter: ConverterSettings::default(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// `<config dir>/com.biorep.report/config.json`.
pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR).join("config.json"))
}

/// Load the config at `path`, or the built-in defaults when there is none.
pub fn load_config(path: &Path) -> eyre::Result<ReportConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ReportConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(CURRENT_VERSION, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: ReportConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Version 1 is the first shape, so the chain is empty for now.
pub fn migrate(json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if !json.is_object() {
        return Err(eyre::eyre!("config is not a JSON object"));
    }
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update biorep."
        ));
    }
    if from_version < 1 {
        return Err(eyre::eyre!("config_version {from_version} is not a known version"));
    }

    Ok(json)
}

pub fn save_config(config: &ReportConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = dir.join(tmp_name);
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
