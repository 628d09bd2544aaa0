//! INI file configuration adapter.

use crate::domain::error::EmacrossError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EmacrossError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| EmacrossError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, EmacrossError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| EmacrossError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[strategy]
period_short = 3
period_long = 5
capital_fraction = 0.6

[market]
data_dir = /var/lib/emacross/bars
instruments = BHP.ASX, CBA.ASX

[account]
balance = 10000.5

[logging]
level = debug
ansi = no
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("market", "data_dir"),
            Some("/var/lib/emacross/bars".to_string())
        );
        assert_eq!(
            adapter.get_string("market", "instruments"),
            Some("BHP.ASX, CBA.ASX".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "period_long", 0), 5);
        assert_eq!(adapter.get_double("account", "balance", 0.0), 10000.5);
        assert!(!adapter.get_bool("logging", "ansi", true));
    }

    #[test]
    fn missing_keys_fall_back() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("strategy", "min_bars", 7), 7);
        assert_eq!(adapter.get_double("account", "balance", 99.9), 99.9);
        assert!(adapter.get_bool("logging", "ansi", true));
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nperiod_short = abc\ncapital_fraction = lots\n")
                .unwrap();
        assert_eq!(adapter.get_int("strategy", "period_short", 2), 2);
        assert_eq!(adapter.get_double("strategy", "capital_fraction", 0.6), 0.6);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[logging]\na = true\nb = YES\nc = 1\nd = off\ne = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("logging", "a", false));
        assert!(adapter.get_bool("logging", "b", false));
        assert!(adapter.get_bool("logging", "c", false));
        assert!(!adapter.get_bool("logging", "d", true));
        assert!(adapter.get_bool("logging", "e", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[market]\ndata_dir = ./bars\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("market", "data_dir"),
            Some("./bars".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/emacross.ini");
        assert!(matches!(result, Err(EmacrossError::ConfigParse { file, .. }) if file.contains("emacross.ini")));
    }
}
