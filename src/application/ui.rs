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
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ChatView;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::models::QUICK_PROMPTS;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

const SIDEBAR_WIDTH: u16 = 36;

fn heading(text: &str) -> Line<'static> {
    return Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
}

fn sidebar_lines(view: &ChatView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Model"),
        Line::from(view.model.label()),
        Line::from(""),
        heading("Persona"),
        Line::from(view.persona.name),
        Line::from(""),
        heading("Temperature"),
        Line::from(format!("{:.1}", view.settings.temperature)),
        Line::from(""),
        heading("Max tokens"),
        Line::from(view.settings.max_tokens.to_string()),
    ];

    if !view.messages.is_empty() {
        lines.extend([
            Line::from(""),
            heading("📊 Chat Stats"),
            Line::from(format!("Total messages: {}", view.stats.total)),
            Line::from(format!("Your messages: {}", view.stats.user_count)),
        ]);
    }

    lines.extend([Line::from(""), heading("🎯 Quick Actions")]);
    for (idx, prompt) in QUICK_PROMPTS.iter().enumerate() {
        lines.push(Line::from(format!("/quick {} {prompt}", idx + 1)));
    }

    return lines;
}

fn notice_height(notice: &Option<String>, available: u16) -> u16 {
    let Some(notice) = notice else {
        return 0;
    };

    let lines = u16::try_from(notice.lines().count()).unwrap_or(u16::MAX);
    return lines.saturating_add(2).min(available / 2);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str("Explain the difference between a process and a thread.");
    }

    loop {
        terminal.draw(|frame| {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Min(1), Constraint::Length(SIDEBAR_WIDTH)])
                .split(frame.area());

            let notice_len = notice_height(&app_state.notice, columns[0].height);
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(notice_len),
                    Constraint::Max(4),
                ])
                .split(columns[0]);

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
                layout[0].inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if let Some(notice) = &app_state.notice {
                frame.render_widget(
                    Paragraph::new(notice.as_str())
                        .wrap(Wrap { trim: false })
                        .block(
                            Block::default()
                                .borders(Borders::TOP)
                                .title(" Notice ")
                                .padding(Padding::new(1, 1, 0, 0)),
                        ),
                    layout[1],
                );
            }

            if app_state.waiting_for_backend {
                app_state.loading.render(frame, layout[2]);
            } else {
                frame.render_widget(&textarea, layout[2]);
            }

            frame.render_widget(
                Paragraph::new(sidebar_lines(&app_state.view))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .title(" ⚙️ Configuration ")
                            .padding(Padding::new(1, 1, 0, 0)),
                    ),
                columns[1],
            );
        })?;

        match events.next().await? {
            Event::ChatUpdate(view) => {
                app_state.handle_chat_update(view);
            }
            Event::ChatNotice(notice) => {
                app_state.set_notice(&notice);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_backend {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                app_state.notice = None;

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(input_str.trim(), &tx)?;
                if should_break {
                    break;
                }
                if should_continue {
                    continue;
                }

                app_state.submit(&input_str, &tx)?;
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_backend {
                    textarea.insert_str(text);
                }
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
            Event::UITick() => {
                app_state.loading.tick();
            }
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
        DisableBracketedPaste,
        cursor::Show
    );
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(ChatView::default());

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
