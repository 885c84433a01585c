use anyhow::Result;

use super::ChatInput;

#[test]
fn it_defaults_missing_fields() -> Result<()> {
    let input: ChatInput = serde_json::from_str("{}")?;
    assert_eq!(input, ChatInput::default());
    assert!(input.is_empty());

    return Ok(());
}

#[test]
fn it_defaults_null_fields() -> Result<()> {
    let input: ChatInput = serde_json::from_str(r#"{"text": null, "images": null}"#)?;
    assert_eq!(input.text, "");
    assert!(input.images.is_empty());

    return Ok(());
}

#[test]
fn it_keeps_provided_fields() -> Result<()> {
    let input: ChatInput =
        serde_json::from_str(r#"{"text": "hi", "images": ["https://a.png", "https://b.png"]}"#)?;
    assert_eq!(
        input,
        ChatInput::new(
            "hi",
            vec!["https://a.png".to_string(), "https://b.png".to_string()]
        )
    );

    return Ok(());
}

#[test]
fn it_is_not_empty_with_only_images() {
    let input = ChatInput::new("", vec!["https://a.png".to_string()]);
    assert!(!input.is_empty());
}

#[test]
fn it_is_empty_with_whitespace() {
    let input = ChatInput::new("  \n ", vec![]);
    assert!(input.is_empty());
}
