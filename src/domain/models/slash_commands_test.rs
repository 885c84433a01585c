use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_plain_message() {
    let text = "what is in /image please";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_is_image_attach() {
    let cmd = SlashCommand::parse("/image https://example.com/cat.png").unwrap();
    assert!(cmd.is_image_attach());
    assert_eq!(cmd.args, vec!["https://example.com/cat.png".to_string()]);

    assert!(SlashCommand::parse("/i ./cat.png").unwrap().is_image_attach());
}

#[test]
fn it_keeps_spaces_in_rest() {
    let cmd = SlashCommand::parse("/image ./My Pictures/cat.png").unwrap();
    assert_eq!(cmd.rest(), "./My Pictures/cat.png");
}

#[test]
fn it_is_image_list() {
    let cmd = SlashCommand::parse("/images").unwrap();
    assert!(cmd.is_image_list());
    assert!(!cmd.is_image_attach());
}

#[test]
fn it_is_image_detach() {
    assert!(SlashCommand::parse("/d").unwrap().is_image_detach());
    assert!(SlashCommand::parse("/detach").unwrap().is_image_detach());
}

#[test]
fn it_is_clear() {
    assert!(SlashCommand::parse("/clear").unwrap().is_clear());
}

#[test]
fn it_is_session() {
    assert!(SlashCommand::parse("/s").unwrap().is_session());
    assert!(SlashCommand::parse("/session").unwrap().is_session());
}

#[test]
fn it_is_model_set() {
    let cmd = SlashCommand::parse("/model gpt-4-turbo").unwrap();
    assert!(cmd.is_model_set());
    assert_eq!(cmd.rest(), "gpt-4-turbo");
}

#[test]
fn it_is_key_set() {
    let cmd = SlashCommand::parse("/key sk-abc").unwrap();
    assert!(cmd.is_key_set());
    assert_eq!(cmd.rest(), "sk-abc");

    let cmd = SlashCommand::parse("/key").unwrap();
    assert!(cmd.is_key_set());
    assert!(cmd.rest().is_empty());
}
