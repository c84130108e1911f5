use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_extract_leaves_sources_untouched() -> Result<()> {
    let test = CliTest::with_config(r#"{ "sourceLanguage": "ko", "comment": true }"#)?;
    let source = r#"const user = { name: "양성훈", sex: "남" };

export function Profile() {
  return <p>{t("프로필")}</p>;
}
"#;
    test.write_file("src/user.tsx", source)?;

    let (code, stdout) = run(test.extract_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Scanned 1 file, extracted 3 texts, wrote 1 catalog"));
    assert_eq!(test.read_file("src/user.tsx")?, source);
    assert_eq!(
        test.read_file("public/locales/en/translation.json")?,
        r#"{
  "프로필": "",

  "__comment_0": "src/user.tsx/user",
  "양성훈": "",
  "남": ""
}
"#
    );
    Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
    let test = CliTest::with_config(r#"{ "sourceLanguage": "ko" }"#)?;
    test.write_file("src/user.ts", r#"const user = { name: "양성훈", sex: "남" };"#)?;

    let (code, stdout) = run({
        let mut cmd = test.extract_command();
        cmd.arg("--json");
        cmd
    })?;
    assert_eq!(code, Some(0));

    let json_end = stdout.rfind(']').map_or(0, |i| i + 1);
    let occurrences: Value = serde_json::from_str(&stdout[..json_end])?;
    let occurrences = occurrences.as_array().cloned().unwrap_or_default();

    assert_eq!(occurrences.len(), 2);
    for occurrence in &occurrences {
        assert_eq!(occurrence["isAlreadyWrapped"], false);
        assert_eq!(occurrence["containerPath"], "src/user.ts/user");
    }
    assert_eq!(occurrences[0]["rawText"], "양성훈");
    assert_eq!(occurrences[1]["normalizedKey"], "남");
    Ok(())
}

#[test]
fn test_extract_unknown_language_matches_nothing() -> Result<()> {
    let test = CliTest::with_config(r#"{ "sourceLanguage": "xx" }"#)?;
    test.write_file("src/a.tsx", "const A = () => <p>你好 안녕</p>;\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)?.contains("extracted 0 texts"));
    assert!(String::from_utf8(output.stderr)?.contains("unknown source language 'xx'"));
    assert_eq!(test.read_file("public/locales/en/translation.json")?, "{}\n");
    Ok(())
}
