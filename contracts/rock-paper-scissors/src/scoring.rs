use soroban_sdk::contracttype;

use crate::{Error, Move};

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Draw = 0,
    FirstWins = 1,
    SecondWins = 2,
}

/// Amounts credited to each side when a game closes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub committed: i128,
    pub counterparty: i128,
}

impl Payout {
    pub fn total(&self) -> Result<i128, Error> {
        self.committed
            .checked_add(self.counterparty)
            .ok_or(Error::Overflow)
    }
}

/// Scores `first` against `second`. `None` if either side is `Undefined`.
pub fn score(first: Move, second: Move) -> Option<Outcome> {
    if !first.is_playable() || !second.is_playable() {
        return None;
    }
    // Rock=1, Paper=2, Scissors=3: each value beats the one below it, cyclically.
    match (first as u32 + 3 - second as u32) % 3 {
        0 => Some(Outcome::Draw),
        1 => Some(Outcome::FirstWins),
        _ => Some(Outcome::SecondWins),
    }
}

/// Splits an escrow of `2 * stake + deposit` after a reveal. The committing
/// player is always `first`; the deposit goes back to them on every outcome.
pub fn settle(outcome: Outcome, stake: i128, deposit: i128) -> Result<Payout, Error> {
    let pot = stake.checked_mul(2).ok_or(Error::Overflow)?;
    let (committed, counterparty) = match outcome {
        Outcome::Draw => (stake, stake),
        Outcome::FirstWins => (pot, 0),
        Outcome::SecondWins => (0, pot),
    };
    Ok(Payout {
        committed: committed.checked_add(deposit).ok_or(Error::Overflow)?,
        counterparty,
    })
}

/// Counterparty takes the whole escrow, deposit included, when the
/// committing player lets the reveal window lapse.
pub fn forfeit(stake: i128, deposit: i128) -> Result<Payout, Error> {
    let counterparty = stake
        .checked_mul(2)
        .and_then(|pot| pot.checked_add(deposit))
        .ok_or(Error::Overflow)?;
    Ok(Payout {
        committed: 0,
        counterparty,
    })
}

/// Unjoined game: only the committing player ever paid in.
pub fn refund(stake: i128, deposit: i128) -> Result<Payout, Error> {
    Ok(Payout {
        committed: stake.checked_add(deposit).ok_or(Error::Overflow)?,
        counterparty: 0,
    })
}
