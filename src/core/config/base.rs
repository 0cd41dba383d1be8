use super::{constant::*, ConfigEntity};
use crate::{logging, utils, Error, Result};
use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<ConfigEntity> = RwLock::new(ConfigEntity::new());
}

#[inline]
fn global_config() -> RwLockReadGuard<'static, ConfigEntity> {
    GLOBAL_CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn reset_global_config(entity: ConfigEntity) {
    let mut cfg = GLOBAL_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *cfg = entity;
}

// init_config_with_yaml loads general configuration from the YAML file under provided path.
pub fn init_config_with_yaml(config_path: &mut String) -> Result<()> {
    // Initialize general config and logging module.
    apply_yaml_config_file(config_path)?;
    override_items_from_system_env()?;
    init_log()?;
    Ok(())
}

// apply_yaml_config_file loads general configuration from the given YAML file.
fn apply_yaml_config_file(config_path: &mut String) -> Result<()> {
    // Priority: system environment > YAML file > default config
    if utils::is_blank(config_path) {
        // If the config file path is absent, Sentinel will try to resolve it from the system env.
        *config_path = env::var(CONF_FILE_PATH_ENV_KEY).unwrap_or_else(|_| CONFIG_FILENAME.into());
    }
    // First Sentinel will try to load config from the given file.
    // If the path is empty (not set), Sentinel will use the default config.
    load_global_config_from_yaml_file(config_path)
}

fn load_global_config_from_yaml_file(path_str: &str) -> Result<()> {
    if path_str == CONFIG_FILENAME {
        //use default globalCfg.
        return Ok(());
    }
    let path = Path::new(path_str);
    if !path.exists() {
        return Err(Error::msg(
            "Sentinel YAML configuration file does not exist!",
        ));
    }
    let content = fs::read_to_string(path)?;
    let entity: ConfigEntity = serde_yaml::from_str(&content)?;
    entity.check()?;
    logging::info!(
        "[Config] Resolving Sentinel config from file, file {}",
        path_str
    );
    reset_global_config(entity);
    Ok(())
}

pub(crate) fn override_items_from_system_env() -> Result<()> {
    let app_name = match env::var(APP_NAME_ENV_KEY) {
        Ok(app_name) if !utils::is_blank(&app_name) => app_name,
        _ => return Ok(()),
    };
    let mut cfg = GLOBAL_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut entity = cfg.clone();
    entity.config.app.app_name = app_name;
    entity.check()?;
    *cfg = entity;
    Ok(())
}

pub fn init_log() -> Result<()> {
    logging::logger_init(log_config_file());
    logging::info!("[Config] App name resolved, appName {}", app_name());
    logging::info!(
        "[Config] Print effective global config, globalConfig {:?}",
        *global_config()
    );
    Ok(())
}

#[inline]
pub fn log_config_file() -> Option<String> {
    let file = global_config().config.log.config_file.clone();
    if utils::is_blank(&file) {
        None
    } else {
        Some(file)
    }
}

#[inline]
pub fn app_name() -> String {
    global_config().config.app.app_name.clone()
}

#[inline]
pub fn max_resource_amount() -> usize {
    global_config().config.stat.max_resource_amount
}
