use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use railshell::app::{App, AppState};
use railshell::modules::navigation::DemoHandler;
use railshell::{logging, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::setup_tracing();

    let (width, _) = terminal::size()?;
    let mut app = App::new(width)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "shell exited with error");
        eprintln!("Error: {:?}", err);
        if let Some(path) = log_path {
            eprintln!("Log: {}", path.display());
        }
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        app.frame_drawn();

        if event::poll(app.next_wakeup())? {
            match event::read()? {
                Event::Resize(width, _) => app.resize(width),
                Event::FocusGained => app.refresh_system_theme(),
                Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
                    if kind != KeyEventKind::Press { continue; }
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    match app.state() {
                        AppState::Normal => match code {
                            KeyCode::Char('q') => return Ok(()),
                            KeyCode::Char('?') => { app.show_help = !app.show_help; }
                            KeyCode::Char(c @ '1'..='9') => {
                                let index = c as usize - '1' as usize;
                                app.activate_index(index);
                            }
                            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.nav.focus_previous(),
                            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.nav.focus_next(),
                            KeyCode::Enter => app.activate_focused(),
                            KeyCode::Char('t') => app.run_demo(DemoHandler::ToastDemo),
                            KeyCode::Char('x') => app.dismiss_newest_toast(),
                            KeyCode::Char('T') => app.toggle_theme(),
                            KeyCode::Char('[') => app.toggle_rail(),
                            KeyCode::Char('a') => app.chrome.toggle_avatar_menu(),
                            KeyCode::Char('i') => app.open_inset(),
                            KeyCode::Char('y') => app.copy_page_link(),
                            KeyCode::Char('/') => app.open_search(),
                            KeyCode::Esc => app.escape(),
                            _ => {}
                        },
                        AppState::Search => match code {
                            KeyCode::Enter => app.submit_search(),
                            KeyCode::Esc => app.close_search(),
                            KeyCode::Backspace => app.search.backspace(),
                            KeyCode::Up => app.search.previous(),
                            KeyCode::Down => app.search.next(),
                            KeyCode::Left => app.search.move_left(),
                            KeyCode::Right => app.search.move_right(),
                            KeyCode::Char(c) => app.search.input_char(c),
                            _ => {}
                        },
                        AppState::Submenu => match code {
                            KeyCode::Up | KeyCode::Char('k') => app.chrome.submenu_previous(),
                            KeyCode::Down | KeyCode::Char('j') => app.chrome.submenu_next(),
                            KeyCode::Enter => app.choose_submenu_item(),
                            KeyCode::Esc => app.escape(),
                            _ => {}
                        },
                    }
                }
                _ => {}
            }
        }

        app.tick();
    }
}
