use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const KO_HOOK_CONFIG: &str = r#"{
  "sourceLanguage": "ko",
  "callingConvention": "hook"
}"#;

#[test]
fn test_transform_component_with_hook() -> Result<()> {
    let test = CliTest::with_config(KO_HOOK_CONFIG)?;
    test.write_file(
        "src/Greeting.tsx",
        "const Greeting = () => <p>안녕하세요</p>;\n",
    )?;

    assert_cmd_snapshot!(test.transform_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Transformed 1 file of 1 (1 text), extracted 1 text, wrote 1 catalog
      - public/locales/en/translation.json

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("src/Greeting.tsx")?,
        "import { useTranslation } from \"react-i18next\";\nconst Greeting = () => { const { t } = useTranslation(); return <p>{t(\"안녕하세요\")}</p>; };\n"
    );
    assert_eq!(
        test.read_file("public/locales/en/translation.json")?,
        "{\n  \"안녕하세요\": \"\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_transform_bare_function_with_comments() -> Result<()> {
    let test = CliTest::with_config(r#"{ "locales": ["en", "ko"] }"#)?;
    test.write_file(
        "src/Form.tsx",
        r#"export function Form() {
  return <input placeholder="请输入您的名字" />;
}
"#,
    )?;

    let (code, _) = run({
        let mut cmd = test.transform_command();
        cmd.arg("--comment");
        cmd
    })?;
    assert_eq!(code, Some(0));

    assert_eq!(
        test.read_file("src/Form.tsx")?,
        r#"import { t } from "react-i18next";
export function Form() {
  return <input placeholder={t("请输入您的名字")} />;
}
"#
    );
    let expected =
        "{\n\n  \"__comment_0\": \"src/Form.tsx/Form\",\n  \"请输入您的名字\": \"\"\n}\n";
    assert_eq!(test.read_file("public/locales/en/translation.json")?, expected);
    assert_eq!(test.read_file("public/locales/ko/translation.json")?, expected);
    Ok(())
}

#[test]
fn test_transform_is_idempotent() -> Result<()> {
    let test = CliTest::with_config(KO_HOOK_CONFIG)?;
    test.write_file(
        "src/Welcome.tsx",
        r#"export function Welcome({ name }) {
  const title = "환영합니다";
  return <h1 title={title}>{`${name}님 반가워요`}</h1>;
}
"#,
    )?;

    let (code, _) = run(test.transform_command())?;
    assert_eq!(code, Some(0));
    let once = test.read_file("src/Welcome.tsx")?;
    assert_eq!(
        once,
        r#"import { useTranslation } from "react-i18next";
export function Welcome({ name }) {
  const { t } = useTranslation();
  const title = t("환영합니다");
  return <h1 title={title}>{t("{{name}}님 반가워요", { "name": name })}</h1>;
}
"#
    );

    let (code, stdout) = run(test.transform_command())?;
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Transformed 0 files of 1 (0 texts), extracted 2 texts"));
    assert_eq!(test.read_file("src/Welcome.tsx")?, once);
    assert_eq!(
        test.read_file("public/locales/en/translation.json")?,
        "{\n  \"환영합니다\": \"\",\n  \"{{name}}님 반가워요\": \"\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_transform_continues_after_parse_error() -> Result<()> {
    let test = CliTest::with_config(KO_HOOK_CONFIG)?;
    test.write_file("src/Bad.tsx", "const Bad = () => <p>안녕</p>;\nconst = ;\n")?;
    test.write_file("src/Good.tsx", "const Good = () => <p>좋아요</p>;\n")?;

    let (code, stdout) = run(test.transform_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("error: failed to parse file: line 2"));
    assert!(stdout.contains("--> src/Bad.tsx:2:"));
    assert!(stdout.contains("2 | const = ;"));
    assert!(stdout.contains("1 file could not be processed"));
    assert!(stdout.contains("Transformed 1 file of 2"));

    assert_eq!(
        test.read_file("src/Bad.tsx")?,
        "const Bad = () => <p>안녕</p>;\nconst = ;\n"
    );
    assert!(test.read_file("src/Good.tsx")?.contains("{t(\"좋아요\")}"));
    Ok(())
}

#[test]
fn test_transform_dry_run_writes_snapshots() -> Result<()> {
    let test = CliTest::with_config(KO_HOOK_CONFIG)?;
    let source = "const Title = () => <h1>제목</h1>;\n";
    test.write_file("src/Title.tsx", source)?;

    let (code, stdout) = run({
        let mut cmd = test.transform_command();
        cmd.arg("--dry");
        cmd
    })?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("(dry run)"));
    assert!(stdout.contains("public/locales/en/translation.json.snap"));
    assert_eq!(test.read_file("src/Title.tsx")?, source);
    assert!(test.read_file("src/Title.tsx.snap")?.contains("{t(\"제목\")}"));
    assert!(!test.root().join("public/locales/en/translation.json").exists());
    Ok(())
}

#[test]
fn test_transform_merge_keeps_existing_translations() -> Result<()> {
    let test = CliTest::with_config(
        r#"{ "sourceLanguage": "ja", "outputJsonMode": "merge", "defaultTranslation": "TODO" }"#,
    )?;
    test.write_file(
        "src/Nav.tsx",
        "export const Nav = () => <nav>ホーム{\"設定\"}</nav>;\n",
    )?;
    test.write_file(
        "public/locales/en/translation.json",
        r#"{ "ホーム": "Home", "古い": "Old" }"#,
    )?;

    let (code, _) = run(test.transform_command())?;
    assert_eq!(code, Some(0));

    assert_eq!(
        test.read_file("public/locales/en/translation.json")?,
        "{\n  \"ホーム\": \"Home\",\n  \"設定\": \"TODO\",\n  \"古い\": \"Old\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_transform_excludes_and_extensions() -> Result<()> {
    let test = CliTest::with_config(
        r#"{
  "sourceLanguage": "ko",
  "include": ["src", "lib"],
  "exclude": ["src/legacy", "**/*.stories.tsx"],
  "ext": ["tsx"]
}"#,
    )?;
    let legacy = "const Old = () => <p>옛날</p>;\n";
    let story = "const Story = () => <p>이야기</p>;\n";
    let script = "export const label = () => \"라벨\";\n";
    test.write_file("src/legacy/Old.tsx", legacy)?;
    test.write_file("src/Button.stories.tsx", story)?;
    test.write_file("src/label.ts", script)?;
    test.write_file("lib/Card.tsx", "const Card = () => <p>카드</p>;\n")?;

    let (code, stdout) = run(test.transform_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Transformed 1 file of 1"));
    assert_eq!(test.read_file("src/legacy/Old.tsx")?, legacy);
    assert_eq!(test.read_file("src/Button.stories.tsx")?, story);
    assert_eq!(test.read_file("src/label.ts")?, script);
    assert!(test.read_file("lib/Card.tsx")?.contains("{t(\"카드\")}"));
    Ok(())
}

#[test]
fn test_transform_aggressive_module_scope() -> Result<()> {
    let test = CliTest::with_config(r#"{ "sourceLanguage": "ko" }"#)?;
    test.write_file(
        "src/messages.ts",
        r#"import { format } from "./포맷";
export const MESSAGES = { save: "저장", cancel: "취소" };
"#,
    )?;

    let (code, _) = run({
        let mut cmd = test.transform_command();
        cmd.arg("--aggressive");
        cmd
    })?;
    assert_eq!(code, Some(0));

    assert_eq!(
        test.read_file("src/messages.ts")?,
        r#"import { t } from "react-i18next";
import { format } from "./포맷";
export const MESSAGES = { save: t("저장"), cancel: t("취소") };
"#
    );
    Ok(())
}

#[test]
fn test_transform_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_config(r#"{ "exclude": ["src/**/[oops"] }"#)?;

    let output = test.transform_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Invalid glob pattern in 'exclude'"));
    Ok(())
}

#[test]
fn test_transform_accepts_legacy_config_keys() -> Result<()> {
    let test = CliTest::with_config(
        r#"{ "keyLanguage": "ko", "useHook": true, "enablePrettier": true }"#,
    )?;
    test.write_file("src/Greeting.tsx", "const Greeting = () => <p>안녕</p>;\n")?;
    test.write_file("src/Plain.tsx", "const Plain = () => <p>hello</p>;\n")?;

    let (code, stdout) = run(test.transform_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Transformed 1 file of 2 (1 text)"));
    assert_eq!(
        test.read_file("src/Greeting.tsx")?,
        "import { useTranslation } from \"react-i18next\";\nconst Greeting = () => { const { t } = useTranslation(); return <p>{t(\"안녕\")}</p>; };\n"
    );
    assert_eq!(
        test.read_file("src/Plain.tsx")?,
        "const Plain = () => <p>hello</p>;\n"
    );
    Ok(())
}
