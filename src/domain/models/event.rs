use tui_textarea::Input;

use super::Coordinate;
use super::Panel;
use super::Section;

pub enum Event {
    Alert(String),
    ContactAdded(),
    Contacts(Vec<String>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardNewline(),
    KeyboardPaste(String),
    KeyboardTab(),
    KeyboardBackTab(),
    Loading(bool),
    LocationUpdated(Coordinate),
    Panel(Section, Panel),
    UITick(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
}
