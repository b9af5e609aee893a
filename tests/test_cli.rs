use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn talec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_talec"))
}

#[test]
fn test_compiles_into_working_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("story.md"),
        "# Script\n## Scene 1\nAlice: Hi\nBob: Hey\n",
    )?;

    let output = talec()
        .arg("story.md")
        .current_dir(temp_dir.path())
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Compiled successfully"));
    assert!(temp_dir.path().join("Scenes/Story_1.cs").exists());
    assert!(temp_dir.path().join("Transition.cs").exists());
    assert!(temp_dir.path().join("Dialog.cs").exists());

    Ok(())
}

#[test]
fn test_output_dir_and_dry_run() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("story.md");
    fs::write(&input, "# Script\n## Hall\nAlice: Hi\n")?;

    let out_dir = temp_dir.path().join("generated");

    let dry = talec()
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--dry-run")
        .output()?;

    assert!(dry.status.success());
    assert!(String::from_utf8_lossy(&dry.stdout).contains("Hall.cs"));
    assert!(!out_dir.exists(), "Dry run must not write files");

    let real = talec().arg(&input).arg("-o").arg(&out_dir).output()?;

    assert!(real.status.success());
    assert!(out_dir.join("Scenes/Hall.cs").exists());

    Ok(())
}

#[test]
fn test_usage_errors_exit_with_one() -> Result<()> {
    let missing = talec().output()?;
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Usage"));

    let extra = talec().args(["a.md", "b.md"]).output()?;
    assert_eq!(extra.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_missing_entry_point_reports_error() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("story.md"), "## Scene 1\nAlice: Hi\n")?;

    let output = talec()
        .arg("story.md")
        .current_dir(temp_dir.path())
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("[ERROR] Failed to find entry point; make sure a '# Script' heading exists"));
    assert!(!temp_dir.path().join("Scenes").exists());

    Ok(())
}

#[test]
fn test_duplicate_scene_reports_error() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("story.md"),
        "# Script\n## Lobby\n## Lobby!\n",
    )?;

    let output = talec()
        .arg("story.md")
        .current_dir(temp_dir.path())
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[ERROR] Scene Lobby is already defined"));

    Ok(())
}

#[test]
fn test_config_file_overrides_entry_point() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("talec.json"), r#"{ "entry_point": "Story" }"#)?;
    fs::write(temp_dir.path().join("story.md"), "# Story\n## Scene 2\nAlice: Hi\n")?;

    let output = talec()
        .args(["story.md", "--config", "talec.json"])
        .current_dir(temp_dir.path())
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(temp_dir.path().join("Scenes/Story_2.cs").exists());

    Ok(())
}
