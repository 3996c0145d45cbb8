use crate::round::{Rgb, Round};
use crate::session::{GameConfig, Phase, Session};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use rand::Rng;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const FRAME_MS: u64 = 33;
const GRID_ROWS: usize = 3;
const GRID_COLS: usize = 3;
const TILE_WIDTH: usize = 9;
const TILE_HEIGHT: usize = 3;
const TILE_GAP: usize = 2;

const ACCENT_FG: &str = "\x1b[38;2;158;200;185m";
const RESET: &str = "\x1b[0m";

struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run(config: GameConfig) -> Result<(), String>
{
    let mut term = TerminalGuard::enter().map_err(|err| err.to_string())?;
    let mut rng = rand::thread_rng();
    let mut session = Session::new(&mut rng, &config);
    let mut last_frame = Instant::now();

    draw(term.stdout(), &session)?;

    loop {
        let now = Instant::now();
        if handle_input(&mut session, &mut rng, now)? {
            break;
        }
        session.poll(now);

        if last_frame.elapsed() >= Duration::from_millis(FRAME_MS) {
            draw(term.stdout(), &session)?;
            last_frame = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    Ok(())
}

fn handle_input(session: &mut Session, rng: &mut impl Rng, now: Instant) -> Result<bool, String>
{
    while event::poll(Duration::from_millis(0)).map_err(|err| err.to_string())? {
        match event::read().map_err(|err| err.to_string())? {
            Event::Key(KeyEvent { code, modifiers, .. }) => match code {
                KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true)
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    session.start(rng, now);
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if session.phase() != Phase::Playing {
                        session.start(rng, now);
                    }
                }
                KeyCode::Char(ch) => {
                    if let Some(digit) = ch.to_digit(10) {
                        if (1..=9).contains(&digit) {
                            session.pick(rng, digit as usize - 1, now);
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(false)
}

fn draw(stdout: &mut Stdout, session: &Session) -> Result<(), String>
{
    let lines = match session.phase() {
        Phase::NotStarted => start_screen_lines(session),
        Phase::Playing => board_lines(session),
        Phase::GameOver => game_over_lines(session),
    };

    let output = format!("{}\r\n", lines.join("\r\n"));
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))
        .map_err(|err| err.to_string())?;
    stdout.write_all(output.as_bytes()).map_err(|err| err.to_string())?;
    stdout.flush().map_err(|err| err.to_string())?;

    Ok(())
}

fn title_line() -> String
{
    format!("Find the {}odd{} color!", ACCENT_FG, RESET)
}

fn start_screen_lines(session: &Session) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push(title_line());
    lines.push("Are you colorblind? Play this and check.".to_string());
    lines.push(String::new());
    lines.extend(tile_grid_lines(session.round()));
    lines.push(String::new());
    lines.push("One tile is a slightly different shade. Keys 1-9 pick it.".to_string());
    lines.push("A right pick adds a second, a wrong one costs three.".to_string());
    lines.push(String::new());
    lines.push("Press SPACE to start. Esc quits.".to_string());
    lines
}

fn board_lines(session: &Session) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push(title_line());
    lines.push(String::new());
    lines.push(format!("High score: {}", session.high_score()));
    lines.push(format!(
        "{} seconds   Score: {}",
        session.seconds_left().max(0),
        session.score()
    ));
    lines.push(String::new());
    lines.extend(tile_grid_lines(session.round()));
    lines.push(String::new());
    lines.push("Keys 1-9 pick a tile. R restarts. Esc quits.".to_string());
    lines
}

fn game_over_lines(session: &Session) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push("Game over".to_string());
    lines.push(String::new());
    lines.push("Looks like this is where your color vision tops out. :(".to_string());
    lines.push(String::new());
    lines.push(format!("Your score: {}", session.score()));
    lines.push(format!("High score: {}", session.high_score()));
    lines.push(String::new());
    lines.push("Press R or SPACE to play again. Esc quits.".to_string());
    lines
}

fn tile_grid_lines(round: &Round) -> Vec<String>
{
    let mut lines = Vec::new();
    for row in 0..GRID_ROWS {
        for line_idx in 0..TILE_HEIGHT {
            let mut line = String::new();
            for col in 0..GRID_COLS {
                let index = row * GRID_COLS + col;
                let tile = &round.tiles()[index];
                line.push_str(&tile_cell(tile.color, index, line_idx));
                if col + 1 < GRID_COLS {
                    line.push_str(&" ".repeat(TILE_GAP));
                }
            }
            lines.push(line);
        }
        if row + 1 < GRID_ROWS {
            lines.push(String::new());
        }
    }
    lines
}

fn tile_cell(color: Rgb, index: usize, line_idx: usize) -> String
{
    let background = format!(
        "\x1b[48;2;{};{};{}m",
        channel_byte(color.r),
        channel_byte(color.g),
        channel_byte(color.b)
    );

    if line_idx == TILE_HEIGHT / 2 {
        let foreground = if is_light(color) {
            "\x1b[38;2;0;0;0m"
        } else {
            "\x1b[38;2;255;255;255m"
        };
        let left = (TILE_WIDTH - 1) / 2;
        let right = TILE_WIDTH - 1 - left;
        format!(
            "{}{}{}{}{}{}",
            background,
            foreground,
            " ".repeat(left),
            index + 1,
            " ".repeat(right),
            RESET
        )
    } else {
        format!("{}{}{}", background, " ".repeat(TILE_WIDTH), RESET)
    }
}

fn channel_byte(value: u16) -> u8
{
    value.min(255) as u8
}

fn is_light(color: Rgb) -> bool
{
    let r = channel_byte(color.r) as u32;
    let g = channel_byte(color.g) as u32;
    let b = channel_byte(color.b) as u32;
    (299 * r + 587 * g + 114 * b) / 1000 >= 140
}
