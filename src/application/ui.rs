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
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Tabs;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Section;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Submission;

fn render_tabs<B: Backend>(frame: &mut Frame<B>, rect: Rect, active_section: Option<Section>) {
    let titles = Section::iter()
        .map(|section| return Line::from(section.title()))
        .collect::<Vec<Line>>();

    let mut tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("SheSafe"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    if let Some(section) = active_section {
        tabs = tabs.select(section.index());
    } else {
        // Nothing highlighted until a section is picked.
        tabs = tabs.highlight_style(Style::default());
    }

    frame.render_widget(tabs, rect);
}

fn render_results<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &mut AppState) {
    let title = match (app_state.show_help, app_state.active_section) {
        (true, _) => "Help",
        (false, Some(section)) => section.title(),
        (false, None) => "Welcome",
    };

    frame.render_widget(
        Paragraph::new(app_state.visible_panel().as_lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .padding(Padding::new(1, 1, 0, 0)),
            )
            .wrap(Wrap { trim: false })
            .scroll((app_state.scroll.position, 0)),
        rect,
    );

    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

fn paste_into(textarea: &mut tui_textarea::TextArea, text: &str) {
    for char in text.chars() {
        if char == '\r' {
            continue;
        }
        if char == '\n' {
            textarea.insert_newline();
            continue;
        }

        textarea.input(Input {
            key: Key::Char(char),
            ctrl: false,
            alt: false,
        });
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::for_section(app_state.active_section);
    let mut loading = Loading::default();
    let mut events = EventsService::new(rx);

    #[cfg(feature = "dev")]
    {
        paste_into(&mut textarea, "/go toxicity");
    }

    loop {
        terminal.draw(|frame| {
            let size = frame.size();
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Max(4),
                ])
                .split(size);

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            render_tabs(frame, layout[0], app_state.active_section);
            render_results(frame, layout[1], app_state);

            if app_state.loading {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }

            if let Some(modal) = app_state.modal() {
                modal.render(frame, size);
            }
        })?;

        let event = events.next().await?;

        // Open dialogs take every key.
        if app_state.modal().is_some() {
            match event {
                Event::KeyboardCTRLC() => break,
                Event::KeyboardCharInput(input) => {
                    app_state.handle_modal_input(input, &tx)?;
                }
                Event::KeyboardEnter() => {
                    app_state.handle_modal_input(
                        Input {
                            key: Key::Enter,
                            ctrl: false,
                            alt: false,
                        },
                        &tx,
                    )?;
                }
                Event::KeyboardPaste(text) => app_state.handle_modal_paste(&text),
                Event::UITick()
                | Event::UIScrollDown()
                | Event::UIScrollUp()
                | Event::UIScrollPageDown()
                | Event::UIScrollPageUp()
                | Event::KeyboardNewline()
                | Event::KeyboardTab()
                | Event::KeyboardBackTab() => (),
                worker_event => app_state.handle_event(worker_event),
            }

            continue;
        }

        match event {
            Event::KeyboardCTRLC() => break,
            Event::KeyboardCharInput(input) => {
                if !app_state.loading {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.loading {
                    paste_into(&mut textarea, &text);
                }
            }
            Event::KeyboardNewline() => {
                if !app_state.loading {
                    textarea.insert_newline();
                }
            }
            Event::KeyboardTab() => {
                app_state.next_section();
                textarea = TextArea::for_section(app_state.active_section);
            }
            Event::KeyboardBackTab() => {
                app_state.prev_section();
                textarea = TextArea::for_section(app_state.active_section);
            }
            Event::KeyboardEnter() => {
                if app_state.loading {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                match app_state.submit(&input_str, &tx)? {
                    Submission::Quit => break,
                    Submission::Clear => {
                        textarea = TextArea::for_section(app_state.active_section);
                    }
                    Submission::Keep => (),
                }
            }
            Event::UIScrollDown() => app_state.scroll.down(),
            Event::UIScrollUp() => app_state.scroll.up(),
            Event::UIScrollPageDown() => app_state.scroll.down_page(),
            Event::UIScrollPageUp() => app_state.scroll.up_page(),
            Event::UITick() => loading.tick(),
            worker_event => app_state.handle_event(worker_event),
        }

        if app_state.clear_prompt {
            app_state.clear_prompt = false;
            textarea = TextArea::for_section(app_state.active_section);
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
    let mut app_state = AppState::new(&Config::get(ConfigKey::Username), None);

    tx.send(Action::LoadContacts())?;
    tx.send(Action::CheckSystemHealth())?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
