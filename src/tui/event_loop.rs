use std::sync::mpsc::Receiver;
use std::time::Duration;

use airwave::events::RadioEvent;
use airwave::mpris::ControlCmd;
use airwave::runtime::RadioHandle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Request};
use crate::ui;

/// Main terminal event loop: draws, folds radio events into `app`, and
/// forwards keys and MPRIS commands to the radio. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    radio: &RadioHandle,
    events: &Receiver<RadioEvent>,
    control_rx: &Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let batch: Vec<RadioEvent> = events.try_iter().collect();
        app.apply_events(&batch);

        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, radio) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, radio) {
                    return Ok(());
                }
            }
        }
    }
}

/// Ask the radio to start or stop. The placeholder goes first on the same
/// command queue, so a stream that fails at once still ends on the offline
/// track.
fn send_request(request: Request, app: &App, radio: &RadioHandle) {
    if let Some(placeholder) = app.placeholder(request) {
        radio.custom_metadata(placeholder, None);
    }
    match request {
        Request::Play => radio.play(),
        Request::Pause => radio.pause(),
    }
}

fn toggle(app: &App, radio: &RadioHandle) {
    if radio.is_playing() {
        send_request(Request::Pause, app, radio);
    } else {
        send_request(Request::Play, app, radio);
    }
}

/// Returns `true` when the app should quit.
fn handle_control_cmd(cmd: ControlCmd, app: &App, radio: &RadioHandle) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !radio.is_playing() {
                send_request(Request::Play, app, radio);
            }
        }
        ControlCmd::Pause | ControlCmd::Stop => {
            if radio.is_playing() {
                send_request(Request::Pause, app, radio);
            }
        }
        ControlCmd::PlayPause => toggle(app, radio),
    }
    false
}

/// Returns `true` when the app should quit.
fn handle_key_event(key: KeyEvent, app: &App, radio: &RadioHandle) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            toggle(app, radio);
            false
        }
        _ => false,
    }
}
