// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试配置文件与默认值的合并

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};
    use mirrorrs::config::settings::Settings;
    use std::time::Duration;

    #[test]
    fn test_file_values_override_defaults() {
        let toml = r#"
            [storage]
            storage_type = "local"
            local_folder = "archive"

            [mirror]
            concurrency = 8
            fetch_timeout_secs = 5

            [imgbb]
            api_key = "abc"
        "#;

        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.storage.storage_type, "local");
        assert_eq!(settings.storage.local_folder, "archive");
        assert_eq!(settings.mirror.concurrency, 8);
        assert_eq!(settings.mirror.fetch_timeout(), Duration::from_secs(5));
        // 未覆盖的项保持默认值
        assert_eq!(settings.mirror.upload_timeout(), Duration::from_secs(60));
        assert_eq!(settings.imgbb.api_key.as_deref(), Some("abc"));
        assert_eq!(settings.imgbb.api_base_url, "https://api.imgbb.com");
    }

    #[test]
    fn test_default_toml_is_loadable() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::with_name("config/default").required(false))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!settings.drive.token_uri.is_empty());
        assert!(settings.mirror.concurrency >= 1);
    }
}
