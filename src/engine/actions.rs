use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Действие игрока. Размер рейза передаётся отдельно в `Round::do_action`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Сколько фишек игрок докладывает сейчас (включая доплату до call).
    Raise,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Fold, Action::Check, Action::Call, Action::Raise];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "FOLD",
            Action::Check => "CHECK",
            Action::Call => "CALL",
            Action::Raise => "RAISE",
        };
        f.write_str(s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "raise" => Ok(Action::Raise),
            other => Err(format!("Unknown action: {other}")),
        }
    }
}
