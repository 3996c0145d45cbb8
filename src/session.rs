use crate::round::{ROUND_TILES, Round, generate_round, margin_for_score};

use rand::Rng;
use std::time::{Duration, Instant};

const DEFAULT_START_SECONDS: i32 = 30;
const MIN_START_SECONDS: i32 = 5;
const MAX_START_SECONDS: i32 = 300;
const CORRECT_BONUS_SECS: i32 = 1;
const WRONG_PENALTY_SECS: i32 = 3;
const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase
{
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome
{
    Correct,
    Wrong,
    Ignored,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig
{
    start_seconds: i32,
}

impl GameConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, String>
    {
        let mut seconds: Option<i32> = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--seconds" {
                let value = iter
                    .next()
                    .ok_or_else(|| "Expected value after --seconds".to_string())?;
                seconds = Some(parse_seconds(value)?);
            } else if let Some(rest) = arg.strip_prefix("--seconds=") {
                seconds = Some(parse_seconds(rest)?);
            } else {
                return Err(format!("Unknown option '{arg}'. Run with --help."));
            }
        }

        Ok(Self::new(seconds.unwrap_or(DEFAULT_START_SECONDS)))
    }

    fn new(start_seconds: i32) -> Self
    {
        Self {
            start_seconds: start_seconds.clamp(MIN_START_SECONDS, MAX_START_SECONDS),
        }
    }

    pub fn start_seconds(&self) -> i32
    {
        self.start_seconds
    }
}

impl Default for GameConfig
{
    fn default() -> Self
    {
        Self::new(DEFAULT_START_SECONDS)
    }
}

fn parse_seconds(value: &str) -> Result<i32, String>
{
    let parsed = value
        .parse::<i32>()
        .map_err(|_| "Seconds must be a whole number".to_string())?;
    if parsed <= 0 {
        return Err("Seconds must be positive".to_string());
    }
    Ok(parsed)
}

// All game state lives here; the screen only reads it. A pending countdown
// tick is the deadline in next_tick. Every transition that touches
// seconds_left replaces that deadline, never stacks a second one.
pub struct Session
{
    phase: Phase,
    score: u32,
    seconds_left: i32,
    high_score: u32,
    round: Round,
    next_tick: Option<Instant>,
    start_seconds: i32,
}

impl Session
{
    pub fn new(rng: &mut impl Rng, config: &GameConfig) -> Self
    {
        Self {
            phase: Phase::NotStarted,
            score: 0,
            seconds_left: config.start_seconds(),
            high_score: 0,
            round: generate_round(rng, ROUND_TILES, margin_for_score(0)),
            next_tick: None,
            start_seconds: config.start_seconds(),
        }
    }

    // Start and restart are the same transition; the high score survives it.
    pub fn start(&mut self, rng: &mut impl Rng, now: Instant)
    {
        self.phase = Phase::Playing;
        self.score = 0;
        self.seconds_left = self.start_seconds;
        self.round = generate_round(rng, ROUND_TILES, margin_for_score(self.score));
        self.next_tick = Some(now + TICK_PERIOD);
    }

    pub fn pick(&mut self, rng: &mut impl Rng, index: usize, now: Instant) -> PickOutcome
    {
        if self.phase != Phase::Playing {
            return PickOutcome::Ignored;
        }
        let Some(tile) = self.round.tile(index).copied() else {
            return PickOutcome::Ignored;
        };

        if tile.is_odd {
            self.score += 1;
            self.seconds_left += CORRECT_BONUS_SECS;
            self.round = generate_round(rng, ROUND_TILES, margin_for_score(self.score));
            self.next_tick = Some(now + TICK_PERIOD);
            PickOutcome::Correct
        } else {
            self.seconds_left -= WRONG_PENALTY_SECS;
            self.next_tick = Some(now + TICK_PERIOD);
            if self.seconds_left <= 0 {
                self.enter_game_over();
            }
            PickOutcome::Wrong
        }
    }

    // Fires every due tick, catching up if the caller stalled past one
    // period. Stops on the tick that empties the countdown.
    pub fn poll(&mut self, now: Instant)
    {
        while self.phase == Phase::Playing {
            let Some(deadline) = self.next_tick else {
                break;
            };
            if now < deadline {
                break;
            }

            self.seconds_left = (self.seconds_left - 1).max(0);
            if self.seconds_left == 0 {
                self.enter_game_over();
            } else {
                self.next_tick = Some(deadline + TICK_PERIOD);
            }
        }
    }

    fn enter_game_over(&mut self)
    {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.phase = Phase::GameOver;
        self.next_tick = None;
    }

    pub fn phase(&self) -> Phase
    {
        self.phase
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    pub fn seconds_left(&self) -> i32
    {
        self.seconds_left
    }

    pub fn high_score(&self) -> u32
    {
        self.high_score
    }

    pub fn round(&self) -> &Round
    {
        &self.round
    }
}
