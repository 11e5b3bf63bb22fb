use std::io::Write;

use routergen::settings::{update_settings_from_content, update_settings_from_file, Settings};

#[cfg(test)]
mod settings_tests {
    use super::*;

    // Kept in one test: the global settings are shared by the whole binary
    #[test]
    fn test_settings_update_and_current() {
        let settings = Settings::current();
        assert_eq!(settings.common.log_level, "info");
        assert!(settings.export.header);

        let yaml_content = r#"
common:
  log_level: debug
export:
  comments: false
        "#;
        update_settings_from_content(yaml_content).unwrap();
        let settings = Settings::current();
        assert_eq!(settings.common.log_level, "debug");
        assert!(!settings.export.comments);

        assert!(update_settings_from_content("common: [").is_err());
        assert_eq!(Settings::current().common.log_level, "debug");

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[common]\nlog_level = \"warn\"\n[export]\nshorten = false").unwrap();
        update_settings_from_file(file.path()).unwrap();

        let settings = Settings::current();
        assert_eq!(settings.common.log_level, "warn");
        assert!(!settings.export.shorten);
        assert!(settings.export.comments);
        assert_eq!(settings.pref_path, file.path().display().to_string());
    }
}
