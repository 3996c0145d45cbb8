mod round;
mod screen;
mod session;

use crate::session::GameConfig;

use std::env;

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String>
{
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("-h") | Some("--help") => {
            print_help();
            Ok(())
        }
        _ => {
            let config = GameConfig::from_args(&args)?;
            screen::run(config)
        }
    }
}

fn print_help()
{
    println!("odd-tile");
    println!("\nA 3x3 grid of color tiles, one a slightly different shade.");
    println!("Pick the odd one out before the countdown runs dry.");
    println!("\nUsage:");
    println!("  odd-tile [--seconds=30]");
    println!("\nControls:");
    println!("  1-9    pick a tile");
    println!("  space  start, or play again after a game over");
    println!("  r      restart at any time");
    println!("  esc    quit");
    println!("\nNotes:");
    println!("  Right picks add a second and tighten the shade gap.");
    println!("  Wrong picks cost three seconds. Needs a truecolor terminal.");
}
