use std::sync::mpsc;

use airwave::audio::RodioSession;
use airwave::mpris::{self, ControlCmd};
use airwave::now_playing::{LogPublisher, NowPlayingPublisher};
use airwave::runtime::spawn_radio;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PROMPT_TEXT};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("airwave: failed to set up logging: {e}");
    }
    if let Some(msg) = config_warning {
        tracing::warn!("{msg}");
    }

    let session = RodioSession::new(settings.audio.clone());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let publisher: Box<dyn NowPlayingPublisher> = if settings.mpris.enabled {
        Box::new(mpris::spawn_mpris(&settings.mpris.identity, control_tx))
    } else {
        Box::new(LogPublisher)
    };

    let runtime = spawn_radio(Box::new(session), publisher);
    let radio = runtime.handle();
    let events = radio.subscribe();

    let station = settings.station.to_station();
    let mut app = App::new(&station);
    radio.set_station(station);
    radio.custom_metadata(PROMPT_TEXT, None);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut app, &radio, &events, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    runtime.shutdown();
    run_result
}
