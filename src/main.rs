mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use laser_defense::config::GameConfig;
use laser_defense::entities::GameStatus;
use laser_defense::events::Key;
use laser_defense::session::Session;

use display::{EndPanel, GlyphAtlas, TerminalSurface};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Translate a key press into a game input. `None` for keys the game ignores.
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter => Some(Key::Confirm),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run until the player quits.
///
/// Every pass drains pending input into the session, feeds it the whole
/// milliseconds elapsed since the previous pass and writes the frame out.
/// Sub-millisecond remainders are carried over so the session clock never drifts.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut panel = EndPanel::default();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Release {
                        continue;
                    }
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    // Holding Enter must not restart the game over and over.
                    if kind == KeyEventKind::Repeat && code == KeyCode::Enter {
                        continue;
                    }
                    if let Some(key) = map_key(code) {
                        session.handle_key(key);
                    }
                }
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    out.execute(terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }

        if panel.is_open() && session.status() == GameStatus::Playing {
            panel.dismiss();
            out.execute(terminal::Clear(terminal::ClearType::All))?;
        }

        let elapsed = Duration::from_millis(last.elapsed().as_millis() as u64);
        last += elapsed;
        session.advance(elapsed, surface, &mut panel);

        display::flush(out, surface, &panel).context("writing frame")?;

        let spent = frame_start.elapsed();
        if spent < FRAME {
            thread::sleep(FRAME - spent);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => GameConfig::default(),
    };

    // Resolve every texture before touching the terminal.
    let mut atlas = GlyphAtlas::default();
    let mut session = Session::load(config, &mut atlas).context("loading textures")?;
    let canvas = (session.config().canvas.width, session.config().canvas.height);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size()
        .context("querying terminal size")
        .and_then(|(cols, rows)| {
            let mut surface = TerminalSurface::new(atlas, canvas, cols, rows);
            log::info!("terminal surface {}x{} cells", surface.cols(), surface.rows());
            game_loop(&mut out, &mut session, &mut surface, &rx)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
