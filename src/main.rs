mod display;

use std::collections::HashMap;
use std::error::Error;
use std::io::{stdout, BufWriter};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use display::{load_images, TerminalSurface, MIN_COLS, MIN_ROWS};
use invaders::input::Actions;
use invaders::session::Session;
use invaders::{CANVAS_HEIGHT, CANVAS_WIDTH};

const FRAME: Duration = Duration::from_millis(33); // ~30 FPS

/// A key is considered "held" if its last press/repeat event arrived
/// within this many frames. Covers terminals that don't emit key-release
/// events: the OS key-repeat rate is at least 15 Hz, so the window is
/// refreshed before it expires while the key is really down.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Collapse the held-key map into the per-tick snapshot the session
/// consumes. Key repeat only refreshes the hold window, so an action
/// stays a single edge until the key is actually released.
fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Actions {
    let held = |key: KeyCode| is_held(key_frame, &key, frame);
    Actions {
        up: held(KeyCode::Up) || held(KeyCode::Char('w')),
        down: held(KeyCode::Down) || held(KeyCode::Char('s')),
        left: held(KeyCode::Left) || held(KeyCode::Char('a')) || held(KeyCode::Char('A')),
        right: held(KeyCode::Right) || held(KeyCode::Char('d')) || held(KeyCode::Char('D')),
        fire: held(KeyCode::Char(' ')),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop(rx: &mpsc::Receiver<Event>) -> Result<(), Box<dyn Error>> {
    let mut rng = thread_rng();
    let (term_cols, term_rows) = terminal::size()?;

    let out = BufWriter::new(stdout());
    let mut surface = TerminalSurface::new(out, term_cols, term_rows);
    let images = load_images();
    let mut session = Session::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    // Maps each held key to the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking).
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                // Keyboard-enhancement path: release removes immediately.
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        session.handle_input(snapshot(&key_frame, frame));
        session.update(&mut rng)?;
        session.render(&mut surface, &images);
        surface.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        eprintln!(
            "Terminal too small: need at least {}x{} cells, have {}x{}.",
            MIN_COLS, MIN_ROWS, cols, rows
        );
        return Ok(());
    }

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them;
    // everywhere else the hold window covers for us.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads, sending them through a
    // channel so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&rx);

    // Always restore the terminal.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
