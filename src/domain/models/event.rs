use tui_textarea::Input;

use super::ChatView;

pub enum Event {
    ChatUpdate(ChatView),
    ChatNotice(String),
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
