use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created auto-i18n.config.json

    ----- stderr -----
    ");

    let content = test.read_file("auto-i18n.config.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceLanguage"], "zh");
    assert_eq!(parsed["callingConvention"], "bareFunction");
    assert_eq!(parsed["translationModuleSource"], "react-i18next");
    assert_eq!(parsed["outputDir"], "public/locales");
    assert!(content.contains("\n  \"include\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_config("{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: auto-i18n.config.json already exists

    ----- stderr -----
    ");

    assert_eq!(test.read_file("auto-i18n.config.json")?, "{}");
    Ok(())
}
