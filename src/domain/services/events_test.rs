use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;

use super::EventsService;
use crate::domain::models::Event;

fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermEvent {
    return CrosstermEvent::Key(KeyEvent {
        code,
        modifiers,
        kind,
        state: KeyEventState::NONE,
    });
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
    return EventsService::handle_crossterm(key(code, modifiers, KeyEventKind::Press));
}

#[test]
fn it_cycles_sections_with_tab_keys() {
    assert!(matches!(
        press(KeyCode::Tab, KeyModifiers::NONE),
        Some(Event::KeyboardTab())
    ));
    assert!(matches!(
        press(KeyCode::BackTab, KeyModifiers::SHIFT),
        Some(Event::KeyboardBackTab())
    ));
}

#[test]
fn it_splits_enter_into_submit_and_newline() {
    assert!(matches!(
        press(KeyCode::Enter, KeyModifiers::NONE),
        Some(Event::KeyboardEnter())
    ));
    assert!(matches!(
        press(KeyCode::Enter, KeyModifiers::ALT),
        Some(Event::KeyboardNewline())
    ));
}

#[test]
fn it_maps_scroll_and_quit_keys() {
    assert!(matches!(
        press(KeyCode::PageDown, KeyModifiers::NONE),
        Some(Event::UIScrollPageDown())
    ));
    assert!(matches!(
        press(KeyCode::Char('u'), KeyModifiers::CONTROL),
        Some(Event::UIScrollPageUp())
    ));
    assert!(matches!(
        press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Some(Event::KeyboardCTRLC())
    ));
}

#[test]
fn it_passes_typing_through() {
    assert!(matches!(
        press(KeyCode::Char('a'), KeyModifiers::NONE),
        Some(Event::KeyboardCharInput(_))
    ));
}

#[test]
fn it_drops_key_releases() {
    let res = EventsService::handle_crossterm(key(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert!(res.is_none());
}

#[test]
fn it_forwards_pastes() {
    let res = EventsService::handle_crossterm(CrosstermEvent::Paste("hi".to_string()));
    assert!(matches!(res, Some(Event::KeyboardPaste(text)) if text == "hi"));
}
