use backend::Backend;
use clap::{Parser, ValueEnum};
use terminal_ui::TerminalUIPlayer;
use woodpusher::WoodpusherPlayer;

/// Terminal chess with full rule enforcement
#[derive(Parser)]
struct Args {
    /// Who controls the white pieces
    #[arg(long, value_enum, default_value = "human")]
    white: PlayerKind,
    /// Who controls the black pieces
    #[arg(long, value_enum, default_value = "computer")]
    black: PlayerKind,
    /// Seed the computer opponent for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Human,
    Computer,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let computer = |seed: Option<u64>| match seed {
        Some(seed) => WoodpusherPlayer::with_seed(seed),
        None => WoodpusherPlayer::new(),
    };
    match (args.white, args.black) {
        (PlayerKind::Human, PlayerKind::Human) => {
            Backend::new(TerminalUIPlayer::new(), TerminalUIPlayer::new()).play_game()
        }
        (PlayerKind::Human, PlayerKind::Computer) => {
            Backend::new(TerminalUIPlayer::new(), computer(args.seed)).play_game()
        }
        (PlayerKind::Computer, PlayerKind::Human) => {
            Backend::new(computer(args.seed), TerminalUIPlayer::new()).play_game()
        }
        (PlayerKind::Computer, PlayerKind::Computer) => {
            // Offset the second seed so the two sides don't mirror each other
            let second = args.seed.map(|seed| seed.wrapping_add(1));
            Backend::new(computer(args.seed), computer(second)).play_game()
        }
    }
}
