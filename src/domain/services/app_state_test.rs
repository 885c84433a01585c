use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use test_utils::png_fixture;
use tokio::fs;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatState;
use crate::domain::models::ContentPart;
use crate::domain::models::EntryType;
use crate::domain::models::Message;
use crate::domain::models::ModelVariant;
use crate::domain::models::RenderUnit;
use crate::domain::models::MISSING_TOKEN_NOTICE;

fn app_state<'a>() -> AppState<'a> {
    let mut app_state = AppState::new(ModelVariant::Gpt4o);
    app_state.set_rect(Rect::new(0, 0, 100, 300));
    app_state.handle_status(ChatState::Idle, "abc".to_string(), ModelVariant::Gpt4o);
    return app_state;
}

fn last_text(app_state: &AppState) -> String {
    if let Some(entry) = app_state.entries.last() {
        if let Some(RenderUnit::Text(text)) = entry.units.last() {
            return text.to_string();
        }
    }
    return "".to_string();
}

fn human(text: &str) -> Message {
    return Message::human(vec![ContentPart::Text {
        text: text.to_string(),
    }]);
}

mod handle_slash_commands {
    use super::*;

    #[tokio::test]
    async fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        let (should_break, should_continue) = app_state.handle_slash_commands("/q", &tx).await?;

        assert!(should_break);
        assert!(!should_continue);
        assert!(!app_state.waiting_for_backend);

        return Ok(());
    }

    #[tokio::test]
    async fn it_passes_through_chat_messages() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        let (should_break, should_continue) = app_state
            .handle_slash_commands("what is in this picture?", &tx)
            .await?;

        assert!(!should_break);
        assert!(!should_continue);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[tokio::test]
    async fn it_shows_help() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        let (should_break, should_continue) = app_state.handle_slash_commands("/h", &tx).await?;

        assert!(!should_break);
        assert!(should_continue);
        assert!(last_text(&app_state).starts_with("COMMANDS:"));

        return Ok(());
    }

    #[tokio::test]
    async fn it_attaches_remote_images() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state
            .handle_slash_commands("/image https://example.com/cat.png", &tx)
            .await?;
        app_state
            .handle_slash_commands("/i https://example.com/dog.png", &tx)
            .await?;

        assert_eq!(
            app_state.pending_images,
            vec![
                "https://example.com/cat.png".to_string(),
                "https://example.com/dog.png".to_string()
            ]
        );

        app_state.handle_slash_commands("/images", &tx).await?;
        assert_eq!(
            last_text(&app_state),
            "- (1) https://example.com/cat.png\n- (2) https://example.com/dog.png"
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_attaches_local_images() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let file_path = std::env::temp_dir().join(format!("glimpse-{}.png", uuid::Uuid::new_v4()));
        fs::write(&file_path, png_fixture()).await?;

        let mut app_state = app_state();
        app_state
            .handle_slash_commands(&format!("/image {}", file_path.display()), &tx)
            .await?;
        fs::remove_file(&file_path).await?;

        assert_eq!(app_state.pending_images.len(), 1);
        assert!(app_state.pending_images[0].starts_with("data:image/png;base64,"));
        assert_eq!(
            last_text(&app_state),
            "Attached inline image/png (67 bytes). It will be sent with your next message."
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_reports_unreadable_images() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state
            .handle_slash_commands("/image /definitely/not/here.png", &tx)
            .await?;

        assert!(app_state.pending_images.is_empty());
        let entry = app_state.entries.last().unwrap();
        assert_eq!(entry.entry_type(), EntryType::Error);
        assert!(last_text(&app_state).starts_with("Unable to read image /definitely/not/here.png"));

        return Ok(());
    }

    #[tokio::test]
    async fn it_detaches_images() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.pending_images = vec!["https://example.com/cat.png".to_string()];
        app_state.handle_slash_commands("/detach", &tx).await?;

        assert!(app_state.pending_images.is_empty());
        assert_eq!(last_text(&app_state), "Detached 1 images.");

        app_state.handle_slash_commands("/images", &tx).await?;
        assert_eq!(last_text(&app_state), "No images attached.");

        return Ok(());
    }

    #[tokio::test]
    async fn it_forwards_session_commands() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        let entries = app_state.entries.len();

        for command in ["/clear", "/s", "/model gpt-4-turbo", "/key sk-test"] {
            let (should_break, should_continue) =
                app_state.handle_slash_commands(command, &tx).await?;
            assert!(!should_break);
            assert!(should_continue);
        }

        assert!(matches!(rx.try_recv()?, Action::SessionReset()));
        assert!(matches!(rx.try_recv()?, Action::SessionShow()));
        match rx.try_recv()? {
            Action::ModelSet(name) => assert_eq!(name, "gpt-4-turbo"),
            _ => bail!("Wrong enum"),
        }
        match rx.try_recv()? {
            Action::TokenSet(token) => assert_eq!(token, "sk-test"),
            _ => bail!("Wrong enum"),
        }

        // Keys must never be echoed into the transcript.
        assert_eq!(app_state.entries.len(), entries);

        return Ok(());
    }
}

mod submit {
    use super::*;

    #[test]
    fn it_sends_text_with_pending_images() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.pending_images = vec!["https://example.com/cat.png".to_string()];
        app_state.submit("What is this?", &tx)?;

        assert!(app_state.waiting_for_backend);
        assert!(app_state.pending_images.is_empty());
        match rx.try_recv()? {
            Action::ChatSubmit(input) => {
                assert_eq!(input.text, "What is this?");
                assert_eq!(input.images, vec!["https://example.com/cat.png".to_string()]);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_ignores_empty_input() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.submit("   ", &tx)?;

        assert!(!app_state.waiting_for_backend);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_refuses_input_while_disabled() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.handle_status(ChatState::Disabled, "abc".to_string(), ModelVariant::Gpt4o);
        app_state.pending_images = vec!["https://example.com/cat.png".to_string()];
        app_state.submit("hi", &tx)?;

        assert!(!app_state.waiting_for_backend);
        assert!(rx.try_recv().is_err());
        assert_eq!(app_state.pending_images.len(), 1);
        assert_eq!(last_text(&app_state), MISSING_TOKEN_NOTICE);

        return Ok(());
    }
}

mod chat_events {
    use super::*;

    #[test]
    fn it_streams_fragments_into_one_entry() -> Result<()> {
        let mut app_state = app_state();
        app_state.waiting_for_backend = true;
        app_state.handle_human_message(human("hi"));
        app_state.handle_fragment("Hel");
        app_state.handle_fragment("lo!");

        assert_eq!(app_state.entries.len(), 3);
        assert_eq!(app_state.entries[1].author, Author::User);
        assert_eq!(
            app_state.entries[2].author,
            Author::Model(ModelVariant::Gpt4o)
        );
        assert_eq!(last_text(&app_state), "Hello!");

        app_state.handle_settled(Message::assistant("Hello!"));
        assert_eq!(app_state.entries.len(), 3);
        assert!(!app_state.waiting_for_backend);
        assert!(!app_state.streaming);

        return Ok(());
    }

    #[test]
    fn it_renders_replies_without_fragments() -> Result<()> {
        let mut app_state = app_state();
        app_state.handle_human_message(human("hi"));
        app_state.handle_settled(Message::assistant("Hello!"));

        assert_eq!(app_state.entries.len(), 3);
        assert_eq!(last_text(&app_state), "Hello!");

        return Ok(());
    }

    #[test]
    fn it_keeps_partial_replies_on_failure() -> Result<()> {
        let mut app_state = app_state();
        app_state.waiting_for_backend = true;
        app_state.handle_human_message(human("hi"));
        app_state.handle_fragment("Par");
        app_state.handle_failed("The provider failed with the following error: boom");

        assert_eq!(app_state.entries.len(), 4);
        assert_eq!(app_state.entries[2].units, vec![RenderUnit::Text("Par".to_string())]);
        assert_eq!(app_state.entries[3].entry_type(), EntryType::Error);
        assert!(!app_state.waiting_for_backend);

        app_state.handle_fragment("Next");
        assert_eq!(app_state.entries.len(), 5);

        return Ok(());
    }

    #[test]
    fn it_replaces_the_transcript_on_session_change() -> Result<()> {
        let mut app_state = app_state();
        app_state.pending_images = vec!["https://example.com/cat.png".to_string()];
        app_state.handle_human_message(human("hi"));
        app_state.handle_fragment("Hello!");

        app_state.handle_session_changed("def".to_string(), vec![]);
        assert_eq!(app_state.session_id, "def");
        assert_eq!(app_state.entries.len(), 1);
        assert!(app_state.pending_images.is_empty());

        app_state.handle_session_changed(
            "ghi".to_string(),
            vec![human("hi"), Message::assistant("Hello!")],
        );
        assert_eq!(app_state.entries.len(), 3);
        assert_eq!(app_state.bubble_list.len(), 9);

        return Ok(());
    }

    #[test]
    fn it_tracks_status() -> Result<()> {
        let mut app_state = app_state();
        app_state.handle_status(
            ChatState::Streaming,
            "def".to_string(),
            ModelVariant::Gpt4Turbo,
        );

        assert!(app_state.waiting_for_backend);
        assert_eq!(app_state.session_id, "def");
        assert_eq!(app_state.model, ModelVariant::Gpt4Turbo);

        return Ok(());
    }

    #[test]
    fn it_keeps_waiting_through_stale_statuses() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.submit("hi", &tx)?;
        assert!(app_state.waiting_for_backend);

        app_state.handle_status(ChatState::Idle, "abc".to_string(), ModelVariant::Gpt4o);
        assert!(app_state.waiting_for_backend);

        app_state.handle_human_message(human("hi"));
        app_state.handle_fragment("Hello!");
        assert!(app_state.waiting_for_backend);
        assert_eq!(app_state.entries.len(), 3);
        assert_eq!(
            app_state.entries[2].author,
            Author::Model(ModelVariant::Gpt4o)
        );

        app_state.handle_settled(Message::assistant("Hello!"));
        assert!(!app_state.waiting_for_backend);

        app_state.handle_status(ChatState::Settled, "abc".to_string(), ModelVariant::Gpt4o);
        assert!(!app_state.waiting_for_backend);

        return Ok(());
    }
}
