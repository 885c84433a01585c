use tui_textarea::Input;

use super::ChatState;
use super::Entry;
use super::Message;
use super::ModelVariant;

pub enum Event {
    ChatFailed(String),
    ChatFragment(String),
    ChatHumanMessage(Message),
    ChatNotice(Entry),
    ChatSettled(Message),
    ChatStatus(ChatState, String, ModelVariant),
    SessionChanged(String, Vec<Message>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
