use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;

use numbers48::{Direction, GameSession, Rules, SessionConfig, State};

/// Play a sliding-tile number puzzle one line at a time.
///
/// Commands: h/a/left, j/s/down, k/w/up, l/d/right, p (pause or resume), n (new game), r (reset),
/// q (quit).
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Width and height of the board.
    #[arg(long, default_value_t = numbers48::config::DEFAULT_SIZE)]
    size: usize,

    /// Seed for tile placement; larger seeds start with more tiles.
    #[arg(long, default_value_t = numbers48::config::DEFAULT_SEED)]
    seed: u64,

    /// The game is won once a tile reaches 2^GOAL.
    #[arg(long, default_value_t = numbers48::config::DEFAULT_GOAL_EXPONENT)]
    goal: u32,

    /// Classic turn order: a full board loses even on a winning move, and every move spawns a tile.
    #[arg(long)]
    classic: bool,

    /// Lose only when the board is full and no move can merge.
    #[arg(long)]
    strict_loss: bool,

    #[arg(long, default_value = "./numbers48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

enum Command {
    Shift(Direction),
    TogglePause,
    NewGame,
    Reset,
    Quit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file(&cli.log_file)?)
        .apply()?;

    let mut rules = if cli.classic {
        Rules::classic()
    } else {
        Rules::default()
    };
    if cli.strict_loss {
        rules.loss = numbers48::LossRule::NoMovesLeft;
    }
    let config = SessionConfig::new(cli.size, cli.seed, cli.goal).with_rules(rules);
    let mut session = GameSession::new(config)?;
    log::info!("{:?}", config);

    let _ = session.start();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_session(&mut out, &session)?;

    for line in io::stdin().lock().lines() {
        let command = match parse_command(line?.trim()) {
            Some(c) => c,
            None => {
                writeln!(out, "unknown command")?;
                continue;
            }
        };
        if !run_command(&mut session, command) {
            break;
        }
        print_session(&mut out, &session)?;
    }

    Ok(())
}

/// Apply one command to the session. Returns false on quit.
fn run_command(session: &mut GameSession, command: Command) -> bool {
    match command {
        Command::Shift(d) => {
            let turn = session.shift(d);
            log::debug!("{} changed {} cells", d, turn.changed_cells.len());
        }
        Command::TogglePause => {
            let _ = match session.state() {
                State::Paused => session.resume(),
                _ => session.pause(),
            };
        }
        Command::NewGame => {
            session.reset();
            let _ = session.start();
        }
        Command::Reset => session.reset(),
        Command::Quit => return false,
    }
    true
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "h" | "a" | "left" => Some(Command::Shift(Direction::Left)),
        "l" | "d" | "right" => Some(Command::Shift(Direction::Right)),
        "k" | "w" | "up" => Some(Command::Shift(Direction::Up)),
        "j" | "s" | "down" => Some(Command::Shift(Direction::Down)),
        "p" | "pause" => Some(Command::TogglePause),
        "n" | "new" => Some(Command::NewGame),
        "r" | "reset" => Some(Command::Reset),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

fn print_session(out: &mut impl Write, session: &GameSession) -> io::Result<()> {
    write!(out, "{}", session.board())?;
    writeln!(
        out,
        "{} | goal {} | score {} | moves {}",
        session.state(),
        session.goal_value(),
        session.score(),
        session.move_count()
    )?;
    out.flush()
}
