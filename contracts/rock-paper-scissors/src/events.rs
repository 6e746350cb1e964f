use soroban_sdk::{contractevent, Address, BytesN};

use crate::Move;

#[contractevent]
pub struct GameOpened {
    #[topic]
    pub game_id: BytesN<32>,
    pub player: Address,
    pub amount: i128,
    pub reveal_deadline: u64,
}

#[contractevent]
pub struct CounterpartyMoved {
    #[topic]
    pub game_id: BytesN<32>,
    pub player: Address,
    pub choice: Move,
    pub amount: i128,
}

/// `winner` is `None` on a draw. `amount` is everything released from escrow.
#[contractevent]
pub struct GameSettled {
    #[topic]
    pub game_id: BytesN<32>,
    pub player: Address,
    pub winner: Option<Address>,
    pub amount: i128,
}

#[contractevent]
pub struct GameCancelled {
    #[topic]
    pub game_id: BytesN<32>,
    pub player: Address,
    pub amount: i128,
}

#[contractevent]
pub struct GameForfeited {
    #[topic]
    pub game_id: BytesN<32>,
    pub player: Address,
    pub amount: i128,
}

#[contractevent]
pub struct BalanceWithdrawn {
    #[topic]
    pub player: Address,
    pub amount: i128,
}

#[contractevent]
pub struct PauseChanged {
    pub paused: bool,
}
