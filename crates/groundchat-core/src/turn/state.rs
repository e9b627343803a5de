use std::fmt;

/// States of a turn. `Scraping` and `Searching` are skipped when the plan
/// does not call for them; `Error` is reachable from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Init,
    Scraping,
    Searching,
    Assembling,
    Inferring,
    Emitting,
    Done,
    Error,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnState::Init => "INIT",
            TurnState::Scraping => "SCRAPING",
            TurnState::Searching => "SEARCHING",
            TurnState::Assembling => "ASSEMBLING",
            TurnState::Inferring => "INFERRING",
            TurnState::Emitting => "EMITTING",
            TurnState::Done => "DONE",
            TurnState::Error => "ERROR",
        };
        f.write_str(name)
    }
}
