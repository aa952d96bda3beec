use std::process::Command;

fn word_guesser(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_word_guesser"))
        .args(args)
        .env("WORD_GUESSER_LOG", "off")
        .output()
        .expect("failed to run word_guesser binary");
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("non utf8 output")
}

#[test]
fn score_prints_symbols_and_tags() {
    let stdout = word_guesser(&["score", "noon", "moon"]);
    assert_eq!(stdout.trim(), "-+++  nomatch,exact,exact,exact");
}

#[test]
fn samples_print_json_sessions() {
    let stdout = word_guesser(&["samples", "--seed", "5"]);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let sessions = v.as_array().expect("array of sessions");
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["secret"]["role"], "master(false)");
    assert_eq!(sessions[0]["completed"], true);
}
