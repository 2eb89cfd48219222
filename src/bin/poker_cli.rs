use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use holdem_engine::api::{execute_command, ApiError, Command, ShowTarget};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::GameId;
use holdem_engine::engine::Action;
use holdem_engine::infra::JsonFileStore;

/// Покер в терминале: каждое действие – отдельный вызов,
/// состояние игры живёт в JSON-файле между вызовами.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Файл с состоянием игр.
    #[arg(long, global = true, default_value = "poker_state.json")]
    file: PathBuf,

    /// Номер игры в файле.
    #[arg(long, global = true, default_value_t = 0)]
    game: GameId,

    /// Подробный лог (debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Создать новую игру.
    New,
    /// Посадить игрока (по умолчанию – стартовый стек).
    AddPlayer {
        name: String,
        chips: Option<u64>,
    },
    /// Убрать игрока из-за стола.
    RemovePlayer { name: String },
    /// Задать блайнды.
    SetBlinds { small_blind: u64, big_blind: u64 },
    /// Стартовый стек для новых игроков.
    SetStartingStack { amount: u64 },
    /// Раздать новую руку.
    Deal {
        /// Seed для воспроизводимой колоды.
        #[arg(long)]
        seed: Option<u64>,
    },
    Check,
    Call,
    /// Доложить `amount` фишек (включая доплату до call).
    Raise { amount: u64 },
    Fold,
    /// Показать: hole, board, money, pot, current-player, bet, players, winners.
    Show { target: String },
}

impl CliCommand {
    fn into_command(self) -> Result<Command, ApiError> {
        let command = match self {
            CliCommand::New => Command::NewGame,
            CliCommand::AddPlayer { name, chips } => Command::AddPlayer {
                name,
                chips: chips.map(Chips),
            },
            CliCommand::RemovePlayer { name } => Command::RemovePlayer { name },
            CliCommand::SetBlinds {
                small_blind,
                big_blind,
            } => Command::SetBlinds {
                small_blind: Chips(small_blind),
                big_blind: Chips(big_blind),
            },
            CliCommand::SetStartingStack { amount } => Command::SetStartingStack {
                amount: Chips(amount),
            },
            CliCommand::Deal { seed } => Command::DealHand { seed },
            CliCommand::Check => act(Action::Check, 0),
            CliCommand::Call => act(Action::Call, 0),
            CliCommand::Raise { amount } => act(Action::Raise, amount),
            CliCommand::Fold => act(Action::Fold, 0),
            CliCommand::Show { target } => Command::Show(target.parse::<ShowTarget>()?),
        };
        Ok(command)
    }
}

fn act(action: Action, amount: u64) -> Command {
    Command::Act {
        action,
        amount: Chips(amount),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut store = JsonFileStore::new(&cli.file);
    let result = cli
        .command
        .into_command()
        .and_then(|command| execute_command(&mut store, cli.game, command));

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Ошибка: {e}");
            ExitCode::FAILURE
        }
    }
}
