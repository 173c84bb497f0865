//! Round outcomes and the values they are built from.
//!
//! RULE: a `Die` can only hold a face in 1..=6. Range checks happen here,
//! at the boundary, so nothing past `RoundInput` ever sees a bad face.

use crate::{
    error::{EngineError, EngineResult},
    types::RoundIndex,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A side that can be bet on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Banker,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Player => Self::Banker,
            Self::Banker => Self::Player,
        }
    }

    pub fn as_winner(self) -> Winner {
        match self {
            Self::Player => Winner::Player,
            Self::Banker => Winner::Banker,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_winner(), f)
    }
}

/// Result of a single round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Banker,
    Tie,
}

impl Winner {
    /// Equal sums tie; otherwise the higher sum wins.
    pub fn compare(player_sum: u8, banker_sum: u8) -> Self {
        match player_sum.cmp(&banker_sum) {
            std::cmp::Ordering::Equal   => Self::Tie,
            std::cmp::Ordering::Greater => Self::Player,
            std::cmp::Ordering::Less    => Self::Banker,
        }
    }

    /// The winning side, or `None` for a tie.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Player => Some(Side::Player),
            Self::Banker => Some(Side::Banker),
            Self::Tie    => None,
        }
    }

    pub fn is_tie(self) -> bool {
        self == Self::Tie
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Banker => "Banker",
            Self::Tie    => "Tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so fixed-width ledger rows can align on it.
        f.pad(self.label())
    }
}

/// A single die face, always in 1..=6.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(u8);

impl Die {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Every face, in order.
    pub const FACES: [Die; 6] = [Die(1), Die(2), Die(3), Die(4), Die(5), Die(6)];

    pub fn new(value: u8) -> EngineResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidDieValue { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Die {
    type Error = EngineError;

    fn try_from(value: u8) -> EngineResult<Self> {
        Self::new(value)
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> u8 {
        die.0
    }
}

/// Two dice thrown for one side of a round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DicePair {
    pub first:  Die,
    pub second: Die,
}

impl DicePair {
    pub fn new(first: u8, second: u8) -> EngineResult<Self> {
        Ok(Self {
            first:  Die::new(first)?,
            second: Die::new(second)?,
        })
    }

    /// Sum of both faces, in 2..=12.
    pub fn sum(&self) -> u8 {
        self.first.value() + self.second.value()
    }

    pub fn faces(&self) -> [u8; 2] {
        [self.first.value(), self.second.value()]
    }

    pub fn contains(&self, face: u8) -> bool {
        self.faces().contains(&face)
    }
}

impl fmt::Display for DicePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("[{},{}]", self.first.value(), self.second.value());
        f.pad(&text)
    }
}

/// What the caller knows about a round when recording it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundInput {
    /// Both pairs were read off the table; the winner is derived.
    Dice { player: DicePair, banker: DicePair },
    /// Only the winner is known.
    Winner(Winner),
}

impl RoundInput {
    /// Validate raw faces coming from outside the engine.
    pub fn from_faces(player: [u8; 2], banker: [u8; 2]) -> EngineResult<Self> {
        Ok(Self::Dice {
            player: DicePair::new(player[0], player[1])?,
            banker: DicePair::new(banker[0], banker[1])?,
        })
    }

    pub fn winner(&self) -> Winner {
        match self {
            Self::Dice { player, banker } => Winner::compare(player.sum(), banker.sum()),
            Self::Winner(w) => *w,
        }
    }
}

/// One entry of the ledger. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundOutcome {
    pub index:       RoundIndex,
    pub player_dice: Option<DicePair>,
    pub banker_dice: Option<DicePair>,
    pub player_sum:  Option<u8>,
    pub banker_sum:  Option<u8>,
    pub winner:      Winner,
    pub timestamp:   NaiveDateTime,
}

impl RoundOutcome {
    pub fn new(index: RoundIndex, input: RoundInput, timestamp: NaiveDateTime) -> Self {
        let (player_dice, banker_dice) = match input {
            RoundInput::Dice { player, banker } => (Some(player), Some(banker)),
            RoundInput::Winner(_) => (None, None),
        };
        Self {
            index,
            player_dice,
            banker_dice,
            player_sum: player_dice.map(|d| d.sum()),
            banker_sum: banker_dice.map(|d| d.sum()),
            winner: input.winner(),
            timestamp,
        }
    }

    pub fn has_dice(&self) -> bool {
        self.player_dice.is_some() && self.banker_dice.is_some()
    }

    /// True when any of the four faces equals `face`. Always false without dice.
    pub fn shows_face(&self, face: u8) -> bool {
        [self.player_dice, self.banker_dice]
            .iter()
            .flatten()
            .any(|pair| pair.contains(face))
    }
}
