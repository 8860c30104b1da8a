use std::{env, path::PathBuf};

use crate::constants::{defaults, envvars};

pub fn data_dir() -> PathBuf {
    if let Ok(data_dir) = env::var(envvars::DATA_DIR) {
        return data_dir.into();
    }
    PathBuf::from(defaults::DATA_DIR)
}

pub fn default_db_path() -> PathBuf {
    data_dir().join(defaults::DB_FILE)
}

pub fn default_config_path() -> PathBuf {
    data_dir().join(defaults::CONFIG_FILE)
}

pub fn default_capture_dir() -> PathBuf {
    data_dir().join(defaults::CAPTURE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_follows_env_var() {
        temp_env::with_var(envvars::DATA_DIR, Some("/srv/reservoirs"), || {
            assert_eq!(default_db_path(), PathBuf::from("/srv/reservoirs/reservoirs.db"));
            assert_eq!(default_capture_dir(), PathBuf::from("/srv/reservoirs/captures"));
        });
        temp_env::with_var_unset(envvars::DATA_DIR, || {
            assert_eq!(default_config_path(), PathBuf::from("./config.json"));
        });
    }
}
