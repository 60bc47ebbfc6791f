use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};

use crate::logging;
use crate::proc::{Coord, Field, Rect};

type Err = Box<dyn std::error::Error>;
pub type Result<T> = std::result::Result<T, Err>;

pub const DEFAULT_TIMEOUT: u64 = 450;

pub struct App {
    pub field: Field,
    pub should_exit: bool,
    pub pause: bool,
    maxgen: u64,
    pub upd_timeout: u64,
    note: Option<&'static str>,
}

impl App {
    #[inline]
    pub fn new(field: Field, maxgen: u64) -> Self {
        App {
            field,
            should_exit: false,
            pause: false,
            maxgen,
            upd_timeout: DEFAULT_TIMEOUT,
            note: None,
        }
    }

    #[inline]
    pub fn with_timeout(mut self, ms: u64) -> Self {
        self.upd_timeout = ms;
        self
    }

    #[inline]
    pub fn maxgen(&self) -> u64 {
        self.maxgen
    }
}

/// Renders a grid with one `X ` or `. ` per cell and a newline per row.
pub fn render_generation<R: AsRef<[bool]>>(grid: &[R]) -> String {
    let mut s = String::new();
    for row in grid {
        for cell in row.as_ref() {
            s.push_str(if *cell { "X " } else { ". " });
        }
        s.push('\n');
    }
    s
}

/// Renders one `(row, col)` line per coordinate.
pub fn render_locations(cells: &[Coord]) -> String {
    cells
        .iter()
        .map(|(i, j)| format!("({i}, {j})\n"))
        .collect()
}

/// Writes the initial field followed by every computed generation and its
/// live cell locations. Returns the last generation.
pub fn report<W: Write>(out: &mut W, a: App) -> Result<Field> {
    let mut field = a.field;

    writeln!(out, "Initial Generation:")?;
    write!(out, "{}", render_generation(field.data()))?;

    for gen in 1..=a.maxgen {
        field = field.next();

        if gen == 1 {
            writeln!(out, "\nNext Generation:")?;
        } else {
            writeln!(out, "\nGeneration {gen}:")?;
        }
        write!(out, "{}", render_generation(field.data()))?;

        writeln!(out, "\nLiving Cell Locations:")?;
        write!(out, "{}", render_locations(&field.living_cells()))?;
    }
    out.flush()?;
    Ok(field)
}

/// Animates the field on the alternate screen until `maxgen` generations
/// have been drawn, the field dies out, or the user quits.
pub fn run(mut a: App) -> Result<()> {
    let terminal = term_size()?;
    // one extra line for the status bar
    let needed = Rect::new(a.field.size().w(), a.field.size().h() + 1);
    if !needed.fits_in(&terminal) {
        return Err(format!(
            "Terminal size {}x{} is too small for a {}x{} field",
            terminal.w(),
            terminal.h(),
            a.field.size().w(),
            a.field.size().h()
        )
        .into());
    }

    // stderr shares the tty with the alternate screen
    logging::suspended(|| {
        session(
            runup,
            || draw(&mut io::stdout(), &mut a, hotkeys),
            shutdown,
        )
    })
}

/// Runs `body` between `up` and `down`. `down` also runs when `up` fails
/// halfway, so the terminal is never left in the alternate screen.
fn session<U, B, D>(up: U, body: B, down: D) -> Result<()>
where
    U: FnOnce() -> Result<()>,
    B: FnOnce() -> Result<()>,
    D: FnOnce() -> Result<()>,
{
    if let Err(e) = up() {
        let _ = down();
        return Err(e);
    }
    let d = body();
    down()?;
    d
}

fn term_size() -> Result<Rect> {
    let (width, height) = terminal::size()?;
    Ok(Rect::new(width as usize, height as usize))
}

fn runup() -> Result<()> {
    execute!(
        io::stderr(),
        EnterAlternateScreen,
        SetTitle("Life generations"),
        Hide
    )?;
    enable_raw_mode()?;
    Ok(())
}

fn shutdown() -> Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// `wait` blocks for one frame and handles input, see [`hotkeys`].
fn draw<W, F>(out: &mut W, a: &mut App, mut wait: F) -> Result<()>
where
    W: Write,
    F: FnMut(&mut App, Duration) -> Result<()>,
{
    let frame = Duration::from_millis(a.upd_timeout);
    let mut gen = 0u64;
    paint(out, a, gen)?;

    while gen < a.maxgen() {
        wait(a, frame)?;

        if a.should_exit {
            return Ok(());
        }
        if a.pause {
            paint(out, a, gen)?;
            continue;
        }

        a.field = a.field.next();
        gen += 1;

        if a.field.population() == 0 {
            a.note = Some("field died out");
            break;
        }
        paint(out, a, gen)?;
    }

    if a.note.is_none() {
        a.note = Some("done");
    }
    paint(out, a, gen)?;
    // hold the last frame before leaving the screen
    wait(a, frame)
}

fn paint<W: Write>(out: &mut W, a: &App, gen: u64) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for r in a.field.data() {
        let line: String = r.iter().map(|c| if *c { '#' } else { ' ' }).collect();
        queue!(out, Print(line), Print("\r\n"))?;
    }
    let status = format!(
        "gen {gen}/{} | live {} | p: pause  q: quit{}{}",
        a.maxgen(),
        a.field.population(),
        if a.pause { "  [paused]" } else { "" },
        a.note.map(|n| format!("  [{n}]")).unwrap_or_default()
    );
    queue!(out, Print(status))?;
    out.flush()?;
    Ok(())
}

/// Waits up to `timeout` for a key press. The poll doubles as the frame delay.
fn hotkeys(a: &mut App, timeout: Duration) -> Result<()> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    if key.code == KeyCode::Char('c') {
                        a.should_exit = true;
                    }
                } else {
                    match key.code {
                        KeyCode::Char('p') => a.pause = !a.pause,
                        KeyCode::Char('q') | KeyCode::Esc => a.should_exit = true,
                        _ => {}
                    }
                }
            }
        }
    }
    Ok(())
}
