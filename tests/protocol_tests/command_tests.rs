//! Tests for command building
//!
//! These tests verify:
//! - Parameter keys become the right word prefixes
//! - Word order follows insertion order

use rosapi::Command;

fn words(command: &Command) -> Vec<String> {
    command
        .to_words()
        .into_iter()
        .map(|w| String::from_utf8(w).unwrap())
        .collect()
}

#[test]
fn test_path_is_first_word() {
    let cmd = Command::new("/system/resource/print");
    assert_eq!(words(&cmd), vec!["/system/resource/print"]);
    assert_eq!(cmd.path(), "/system/resource/print");
}

#[test]
fn test_query_keys_pass_through() {
    let cmd = Command::with_params("/user/print", [("?name", "alice")]);
    assert_eq!(words(&cmd), vec!["/user/print", "?name=alice"]);
}

#[test]
fn test_bare_keys_become_attributes() {
    let cmd = Command::with_params("/ppp/secret/add", [("name", "bob"), ("profile", "10M")]);
    assert_eq!(words(&cmd), vec!["/ppp/secret/add", "=name=bob", "=profile=10M"]);
}

#[test]
fn test_prefixed_keys_are_not_doubled() {
    let cmd = Command::with_params("/ppp/secret/set", [("=.id", "*3"), (".tag", "9")]);
    assert_eq!(words(&cmd), vec!["/ppp/secret/set", "=.id=*3", ".tag=9"]);
}

#[test]
fn test_builder_methods() {
    let cmd = Command::new("/interface/print")
        .attribute(".proplist", "name,type")
        .query("type", "ether")
        .query("disabled", "false")
        .word("?#&");

    assert_eq!(
        words(&cmd),
        vec![
            "/interface/print",
            "=.proplist=name,type",
            "?type=ether",
            "?disabled=false",
            "?#&",
        ]
    );
}

#[test]
fn test_value_with_equals_is_kept() {
    let cmd = Command::with_params("/system/script/add", [("source", ":put a=b")]);
    assert_eq!(words(&cmd)[1], "=source=:put a=b");
}
