use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_cdoc")));
    for var in [
        "CDOC_BACKSLASH",
        "CDOC_DEFAULT_TEXT",
        "CDOC_NO_DETAILS",
        "CDOC_BLANK_DETAILS",
        "CDOC_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn source_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// -- doc --

#[test]
fn doc_from_stdin_prints_commented_declaration() {
    cmd()
        .args(["doc", "--line", "1"])
        .write_stdin("int add(int a, int b);\n")
        .assert()
        .success()
        .stdout(
            "/** @brief Summary\n \
             * @details TODO\n \
             * @param[in] a TODO\n \
             * @param[in] b TODO\n \
             * @return TODO\n \
             */\n\
             int add(int a, int b);\n",
        );
}

#[test]
fn doc_write_edits_file_in_place() {
    let file = source_file("#include <stdio.h>\n#define MAX 10\n");

    cmd()
        .args(["doc", "--line", "2", "--write"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("");

    let edited = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(
        edited,
        "#include <stdio.h>\n\n/** @def MAX\n * TODO\n */\n#define MAX 10\n"
    );
}

#[test]
fn doc_write_from_stdin_prints_document() {
    cmd()
        .args(["doc", "-l", "2", "-w"])
        .write_stdin("int x;\nvoid reset(void);\n")
        .assert()
        .success()
        .stdout("int x;\n\n/** @brief Summary\n * @details TODO\n */\nvoid reset(void);\n");
}

#[test]
fn doc_full_aligns_member_comments() {
    cmd()
        .args(["doc", "--line", "1", "--full"])
        .write_stdin("struct point {\n    int x;\n    long id;\n};\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("    int x;   /**< TODO */\n"))
        .stdout(predicate::str::contains("    long id; /**< TODO */\n"));
}

#[test]
fn doc_json_reports_classification() {
    let assert = cmd()
        .args(["--format", "json", "doc", "--line", "1"])
        .write_stdin("enum mode { ON, OFF };\n")
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["kind"], "Enum");
    assert_eq!(value["declaration"]["shape"], "tagged");
    assert_eq!(value["declaration"]["name"], "mode");
    assert_eq!(value["plan"]["line"], 0);
    assert_eq!(value["rendered"]["text"], "/** @enum mode\n * TODO\n */");
}

#[test]
fn invalid_declaration_exits_with_status_2() {
    let file = source_file("int main(void) {\n    return 0;\n}\n");

    cmd()
        .args(["doc", "--line", "2", "--write"])
        .arg(file.path())
        .assert()
        .code(2)
        .stderr("cdoc: invalid statement\n");

    let untouched = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(untouched, "int main(void) {\n    return 0;\n}\n");
}

#[test]
fn invalid_declaration_in_json() {
    cmd()
        .args(["-f", "json", "doc", "--line", "1"])
        .write_stdin("int broken(int a;\n")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"kind\": \"Invalid\""))
        .stderr(predicate::str::starts_with("cdoc: "));
}

#[test]
fn line_past_end_is_a_usage_error() {
    cmd()
        .args(["doc", "--line", "7"])
        .write_stdin("int x;\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("past the end"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["--format", "html", "doc", "--line", "1"])
        .write_stdin("int x;\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

// -- configuration --

#[test]
fn flags_change_rendering() {
    cmd()
        .args(["--backslash", "--blank-details", "doc", "--line", "1"])
        .write_stdin("void reset(void);\n")
        .assert()
        .success()
        .stdout("/** \\brief Summary\n *\n * TODO\n */\nvoid reset(void);\n");
}

#[test]
fn environment_configures_rendering() {
    cmd()
        .env("CDOC_DEFAULT_TEXT", "FIXME")
        .env("CDOC_NO_DETAILS", "true")
        .args(["doc", "--line", "1"])
        .write_stdin("int scale(int n);\n")
        .assert()
        .success()
        .stdout(
            "/** @brief Summary\n \
             * @param[in] n FIXME\n \
             * @return FIXME\n \
             */\n\
             int scale(int n);\n",
        );
}

// -- header --

#[test]
fn header_with_name() {
    cmd()
        .args(["header", "--name", "list.c"])
        .assert()
        .success()
        .stdout("/** @file list.c\n * @brief TODO\n * @details TODO\n */\n");
}

#[test]
fn header_without_name_on_stdin_fails() {
    cmd()
        .arg("header")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--name is required"));
}

#[test]
fn header_write_prepends_to_file() {
    let file = source_file("int x;\n");
    let name = file
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    cmd()
        .args(["--no-details", "header", "--write"])
        .arg(file.path())
        .assert()
        .success();

    let edited = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(
        edited,
        format!("/** @file {name}\n * @brief TODO\n */\n\nint x;\n")
    );
}

// -- group --

#[test]
fn group_wraps_matching_lines() {
    cmd()
        .args(["group", "--line", "2", "--full"])
        .write_stdin("int x;\n#define A 1\n#define BB 2\nint y;\n")
        .assert()
        .success()
        .stdout(
            "/** @name TODO\n \
             * @{\n \
             */\n\
             #define A 1  /**< TODO */\n\
             #define BB 2 /**< TODO */\n\
             /** @} */\n",
        );
}

#[test]
fn group_on_blank_line_is_invalid() {
    cmd()
        .args(["group", "--line", "2"])
        .write_stdin("int x;\n\nint y;\n")
        .assert()
        .code(2)
        .stderr("cdoc: parser error\n");
}
