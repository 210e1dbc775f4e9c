use serde::Serialize;

use crate::errors::EntityError;

/// The betting round an action belongs to.
/// `SHOW DOWN` lines are tagged as `River`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    #[default]
    None,
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn as_str(self) -> &'static str {
        match self {
            Street::None => "none",
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

/// The elementary move a player can make.
/// `None` marks a synthetic entry for a winner who took no recorded action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    None,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::None => "none",
            ActionType::Fold => "fold",
            ActionType::Check => "check",
            ActionType::Call => "call",
            ActionType::Bet => "bet",
            ActionType::Raise => "raise",
        }
    }
}

/// One player move inside a hand. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    hand_id: String,
    player_name: String,
    street: Street,
    kind: ActionType,
    /// Position in the hand's chronological order, 0-based across all streets.
    index: usize,
    bet_amount: f64,
}

impl Action {
    pub fn new(
        hand_id: &str,
        player_name: &str,
        street: Street,
        kind: ActionType,
        index: usize,
        bet_amount: f64,
    ) -> Result<Self, EntityError> {
        if hand_id.is_empty() {
            return Err(EntityError::EmptyField {
                entity: "action",
                field: "hand id",
            });
        }
        if player_name.is_empty() {
            return Err(EntityError::EmptyField {
                entity: "action",
                field: "player name",
            });
        }
        if street == Street::None {
            return Err(EntityError::NoStreet);
        }
        if !bet_amount.is_finite() || bet_amount < 0.0 {
            return Err(EntityError::InvalidAmount);
        }
        Ok(Self {
            hand_id: hand_id.to_string(),
            player_name: player_name.to_string(),
            street,
            kind,
            index,
            bet_amount,
        })
    }

    pub fn hand_id(&self) -> &str {
        &self.hand_id
    }
    pub fn player_name(&self) -> &str {
        &self.player_name
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn kind(&self) -> ActionType {
        self.kind
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }
}
