use std::process::Command;

#[test]
fn test_stdout_carries_only_captcha_records() {
    let output = Command::new(env!("CARGO_BIN_EXE_mavecaptcha"))
        .env("RUST_LOG", "debug")
        .env("LOG_FORMAT", "json")
        .env("CAPTCHA_COUNT", "2")
        .env("CAPTCHA_WIDTH", "240")
        .env("CAPTCHA_HEIGHT", "80")
        .env("CAPTCHA_FONT_SIZE", "32")
        .env("CAPTCHA_CHARACTERS", "5")
        .env("CAPTCHA_IDENTIFIER", "true")
        .env_remove("FONT_PATH")
        .env_remove("OUTPUT_DIR")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["value"].as_str().unwrap().len(), 5);
        assert!(
            record["imageReference"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Generator initialized"));
}

#[test]
fn test_invalid_font_size_exits_with_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_mavecaptcha"))
        .env("CAPTCHA_FONT_SIZE", "1e30")
        .env("CAPTCHA_COUNT", "1")
        .env_remove("FONT_PATH")
        .env_remove("OUTPUT_DIR")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
