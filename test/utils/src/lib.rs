/// Builds an OpenAI style server-sent events body streaming the given
/// fragments, terminated with `[DONE]` when `done` is set.
pub fn sse_fixture(fragments: &[&str], done: bool) -> String {
    let mut lines = vec![serde_json::json!({
        "choices": [{ "delta": { "role": "assistant" } }]
    })
    .to_string()];

    for fragment in fragments {
        lines.push(
            serde_json::json!({
                "choices": [{ "delta": { "content": fragment } }]
            })
            .to_string(),
        );
    }

    let mut body = lines
        .iter()
        .map(|line| {
            return format!("data: {line}\n\n");
        })
        .collect::<Vec<String>>()
        .join("");

    if done {
        body += "data: [DONE]\n\n";
    }

    return body;
}

/// A 1x1 transparent PNG.
pub fn png_fixture() -> &'static [u8] {
    return &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];
}
