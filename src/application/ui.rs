use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Banner;
use crate::domain::models::ChatState;
use crate::domain::models::Event;
use crate::domain::models::ModelVariant;
use crate::domain::models::TextArea;
use crate::domain::models::MISSING_TOKEN_NOTICE;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn status_line(app_state: &AppState) -> Line<'static> {
    let mut text = format!(
        " Session {} | {} | {}",
        app_state.session_id, app_state.model, app_state.chat_state
    );
    if !app_state.pending_images.is_empty() {
        text = format!("{text} | {} image(s) attached", app_state.pending_images.len());
    }

    return Line::from(Span::styled(
        text,
        Style {
            fg: Some(Color::DarkGray),
            ..Style::default()
        },
    ));
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);

    #[cfg(feature = "dev")]
    TextArea::paste(
        &mut textarea,
        "Describe this image in one sentence, then list the colours you can see.",
    );

    loop {
        terminal.draw(|frame| {
            let disabled = app_state.chat_state == ChatState::Disabled;
            let mut constraints = vec![Constraint::Min(1), Constraint::Length(1)];
            if disabled {
                constraints.push(Constraint::Length(3));
            }
            constraints.push(Constraint::Max(4));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(Paragraph::new(status_line(app_state)), layout[1]);

            let input_rect = layout[layout.len() - 1];
            if disabled {
                Banner::disabled(MISSING_TOKEN_NOTICE).render(frame, layout[2]);
            }

            if app_state.waiting_for_backend {
                Banner::waiting().render(frame, input_rect);
            } else {
                frame.render_widget(textarea.widget(), input_rect);
            }
        })?;

        match events.next().await? {
            Event::ChatFailed(text) => {
                app_state.handle_failed(&text);
            }
            Event::ChatFragment(text) => {
                app_state.handle_fragment(&text);
            }
            Event::ChatHumanMessage(message) => {
                app_state.handle_human_message(message);
            }
            Event::ChatNotice(entry) => {
                app_state.add_entry(entry);
            }
            Event::ChatSettled(message) => {
                app_state.handle_settled(message);
            }
            Event::ChatStatus(state, session_id, model) => {
                app_state.handle_status(state, session_id, model);
            }
            Event::SessionChanged(session_id, messages) => {
                app_state.handle_session_changed(session_id, messages);
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_backend {
                    continue;
                }

                let input_str = TextArea::contents(&textarea);
                textarea = TextArea::default();

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(&input_str, &tx).await?;
                if should_break {
                    break;
                }
                if should_continue {
                    continue;
                }

                app_state.submit(&input_str, &tx)?;
            }
            Event::KeyboardPaste(text) => {
                if app_state.waiting_for_backend {
                    continue;
                }

                TextArea::paste(&mut textarea, &text);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    model: ModelVariant,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(model);

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
