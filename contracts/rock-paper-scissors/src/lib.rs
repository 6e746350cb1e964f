#![no_std]

//! Rock-paper-scissors for stakes, settled by commit-reveal escrow.
//!
//! The committing player opens a game under `sha256(contract, player, move, secret)`
//! and escrows their stake (plus the configured security deposit). A counterparty
//! joins with a plaintext move and a matching stake. The committing player then
//! reveals, which scores the game and credits the winner's withdrawable balance.
//!
//! Nothing is ever pushed to a player: every payout lands in the balance ledger
//! and leaves through `withdraw`.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, panic_with_error, token, Address,
    Bytes, BytesN, Env,
};

mod commitment;
mod events;
mod ledger;
mod scoring;



pub use scoring::{Outcome, Payout};

use events::{
    BalanceWithdrawn, CounterpartyMoved, GameCancelled, GameForfeited, GameOpened, GameSettled,
    PauseChanged,
};

// ============================================================================
// Errors
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    InvalidConfig = 2,
    Paused = 3,
    InvalidMove = 4,
    EmptySecret = 5,
    EmptyCommitment = 6,
    CommitmentAlreadyUsed = 7,
    ValueMismatch = 8,
    NotJoinable = 9,
    SamePlayer = 10,
    NotOpponent = 11,
    AlreadyCommitted = 12,
    NotRevealable = 13,
    NotCancelable = 14,
    NotClaimable = 15,
    TooEarly = 16,
    GameNotFound = 17,
    EmptyBalance = 18,
    InvalidAmount = 19,
    Overflow = 20,
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Move {
    Undefined = 0,
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Move {
    pub fn is_playable(self) -> bool {
        !matches!(self, Move::Undefined)
    }
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameStatus {
    Uninitialized = 0,
    AwaitingSecondMove = 1,
    AwaitingReveal = 2,
    Closed = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Asset every stake and payout is denominated in.
    pub token: Address,
    /// Per-player stake.
    pub stake: i128,
    /// Security deposit charged to the committing player, in percent of `stake`.
    pub deposit_percent: u32,
    /// Seconds before an unjoined game may be cancelled when no deadline is given.
    pub cancel_window: u64,
    /// Seconds the committing player has to reveal once the counterparty joined.
    pub reveal_window: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    pub committed_player: Address,
    pub opponent: Option<Address>,
    pub counterparty: Option<Address>,
    pub counterparty_move: Move,
    pub revealed_move: Move,
    pub stake: i128,
    pub deposit: i128,
    pub opened_at: u64,
    // Unjoined games may be cancelled from here on.
    pub reveal_deadline: u64,
    // Set on join; the counterparty may claim the escrow from here on.
    pub claim_deadline: Option<u64>,
    pub status: GameStatus,
}

#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    Paused,
    Game(BytesN<32>),
    Balance(Address),
}

// ============================================================================
// Contract Implementation
// ============================================================================

const MAX_DEPOSIT_PERCENT: u32 = 100;
const INSTANCE_TTL_LEDGERS: u32 = 518_400; // ~30 days
const GAME_TTL_LEDGERS: u32 = 518_400;
pub(crate) const BALANCE_TTL_LEDGERS: u32 = 518_400;

#[contract]
pub struct RockPaperScissors;

#[contractimpl]
impl RockPaperScissors {
    pub fn __constructor(env: Env, admin: Address, config: Config, paused: bool) {
        if let Err(e) = Self::validate_config(&config) {
            panic_with_error!(&env, e);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        Self::load_admin(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        Self::load_config(&env)
    }

    /// Deposit the committing player pays on top of the stake.
    pub fn required_deposit(env: Env) -> Result<i128, Error> {
        let config = Self::load_config(&env)?;
        Self::deposit_for(&config)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Paused)
            .unwrap_or(false)
    }

    /// Pausing blocks new games and joins only; escrow can always be released.
    pub fn set_paused(env: Env, paused: bool) -> Result<(), Error> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.storage().instance().set(&DataKey::Paused, &paused);
        Self::bump_instance(&env);
        PauseChanged { paused }.publish(&env);
        Ok(())
    }

    // ----- Pure helpers -----------------------------------------------------

    /// Game id the committing player must open with. Meant for client-side use.
    pub fn compute_commitment(
        env: Env,
        player: Address,
        choice: Move,
        secret: Bytes,
    ) -> Result<BytesN<32>, Error> {
        commitment::compute(
            &env,
            &env.current_contract_address(),
            &player,
            choice,
            &secret,
        )
    }

    pub fn score(_env: Env, first: Move, second: Move) -> Result<Outcome, Error> {
        scoring::score(first, second).ok_or(Error::InvalidMove)
    }

    // ----- Game lifecycle ---------------------------------------------------

    /// Opens `game_id` and escrows `stake + deposit` from `player`.
    ///
    /// `deadline_secs` is how long, from now, the game stays uncancellable
    /// while nobody joins. `opponent` restricts who may join.
    pub fn open_game(
        env: Env,
        player: Address,
        game_id: BytesN<32>,
        amount: i128,
        deadline_secs: Option<u64>,
        opponent: Option<Address>,
    ) -> Result<(), Error> {
        player.require_auth();
        Self::ensure_not_paused(&env)?;

        if commitment::is_empty(&game_id) {
            return Err(Error::EmptyCommitment);
        }
        let key = DataKey::Game(game_id.clone());
        // Closed games are never removed, so this also rejects reuse.
        if env.storage().persistent().has(&key) {
            return Err(Error::CommitmentAlreadyUsed);
        }

        let config = Self::load_config(&env)?;
        let deposit = Self::deposit_for(&config)?;
        let required = config.stake.checked_add(deposit).ok_or(Error::Overflow)?;
        if amount != required {
            return Err(Error::ValueMismatch);
        }
        if opponent.as_ref() == Some(&player) {
            return Err(Error::SamePlayer);
        }

        let now = env.ledger().timestamp();
        let reveal_deadline = now
            .checked_add(deadline_secs.unwrap_or(config.cancel_window))
            .ok_or(Error::Overflow)?;

        let game = Game {
            committed_player: player.clone(),
            opponent,
            counterparty: None,
            counterparty_move: Move::Undefined,
            revealed_move: Move::Undefined,
            stake: config.stake,
            deposit,
            opened_at: now,
            reveal_deadline,
            claim_deadline: None,
            status: GameStatus::AwaitingSecondMove,
        };
        Self::store_game(&env, &game_id, &game);

        Self::escrow(&env, &config.token, &player, amount);
        GameOpened {
            game_id,
            player,
            amount,
            reveal_deadline,
        }
        .publish(&env);
        Ok(())
    }

    /// Joins an open game with a plaintext move and a matching stake.
    pub fn submit_counterparty_move(
        env: Env,
        player: Address,
        game_id: BytesN<32>,
        choice: Move,
        amount: i128,
    ) -> Result<(), Error> {
        player.require_auth();
        Self::ensure_not_paused(&env)?;

        let mut game = Self::load_game(&env, &game_id).map_err(|_| Error::NotJoinable)?;
        match game.status {
            GameStatus::AwaitingSecondMove => {}
            GameStatus::AwaitingReveal => return Err(Error::AlreadyCommitted),
            _ => return Err(Error::NotJoinable),
        }
        if !choice.is_playable() {
            return Err(Error::InvalidMove);
        }
        if player == game.committed_player {
            return Err(Error::SamePlayer);
        }
        if let Some(opponent) = game.opponent.as_ref() {
            if *opponent != player {
                return Err(Error::NotOpponent);
            }
        }
        if amount != game.stake {
            return Err(Error::ValueMismatch);
        }

        let config = Self::load_config(&env)?;
        let claim_deadline = env
            .ledger()
            .timestamp()
            .checked_add(config.reveal_window)
            .ok_or(Error::Overflow)?;

        game.counterparty = Some(player.clone());
        game.counterparty_move = choice;
        game.claim_deadline = Some(claim_deadline);
        game.status = GameStatus::AwaitingReveal;
        Self::store_game(&env, &game_id, &game);

        Self::escrow(&env, &config.token, &player, amount);
        CounterpartyMoved {
            game_id,
            player,
            choice,
            amount,
        }
        .publish(&env);
        Ok(())
    }

    /// Reveals the committed move, scores the game and credits both sides.
    ///
    /// The game is located by re-deriving the commitment from the caller, so a
    /// wrong caller, move or secret all fail the same way with `NotRevealable`.
    pub fn reveal_and_settle(
        env: Env,
        player: Address,
        choice: Move,
        secret: Bytes,
    ) -> Result<Outcome, Error> {
        player.require_auth();

        let game_id = commitment::compute(
            &env,
            &env.current_contract_address(),
            &player,
            choice,
            &secret,
        )
        .map_err(|_| Error::NotRevealable)?;
        let mut game = Self::load_game(&env, &game_id).map_err(|_| Error::NotRevealable)?;
        if game.status != GameStatus::AwaitingReveal {
            return Err(Error::NotRevealable);
        }
        let counterparty = game.counterparty.clone().ok_or(Error::NotRevealable)?;

        let outcome = scoring::score(choice, game.counterparty_move).ok_or(Error::NotRevealable)?;
        let payout = scoring::settle(outcome, game.stake, game.deposit)?;
        let released = payout.total()?;

        game.revealed_move = choice;
        game.status = GameStatus::Closed;
        Self::store_game(&env, &game_id, &game);

        ledger::credit(&env, &game.committed_player, payout.committed)?;
        ledger::credit(&env, &counterparty, payout.counterparty)?;

        let winner = match outcome {
            Outcome::FirstWins => Some(game.committed_player.clone()),
            Outcome::SecondWins => Some(counterparty),
            Outcome::Draw => None,
        };
        log!(&env, "game settled", game_id, outcome, released);
        GameSettled {
            game_id,
            player,
            winner,
            amount: released,
        }
        .publish(&env);
        Ok(outcome)
    }

    /// Refunds stake and deposit of a game nobody joined, once its deadline passed.
    pub fn cancel_unjoined_game(
        env: Env,
        player: Address,
        choice: Move,
        secret: Bytes,
    ) -> Result<i128, Error> {
        player.require_auth();

        let game_id = commitment::compute(
            &env,
            &env.current_contract_address(),
            &player,
            choice,
            &secret,
        )
        .map_err(|_| Error::NotCancelable)?;
        let mut game = Self::load_game(&env, &game_id).map_err(|_| Error::NotCancelable)?;
        if game.status != GameStatus::AwaitingSecondMove {
            return Err(Error::NotCancelable);
        }
        if env.ledger().timestamp() < game.reveal_deadline {
            return Err(Error::TooEarly);
        }

        let payout = scoring::refund(game.stake, game.deposit)?;
        game.status = GameStatus::Closed;
        Self::store_game(&env, &game_id, &game);
        ledger::credit(&env, &game.committed_player, payout.committed)?;

        GameCancelled {
            game_id,
            player,
            amount: payout.committed,
        }
        .publish(&env);
        Ok(payout.committed)
    }

    /// Lets the counterparty take the whole escrow when the committing player
    /// has not revealed within the reveal window.
    pub fn claim_forfeit(env: Env, player: Address, game_id: BytesN<32>) -> Result<i128, Error> {
        player.require_auth();

        let mut game = Self::load_game(&env, &game_id).map_err(|_| Error::NotClaimable)?;
        if game.status != GameStatus::AwaitingReveal {
            return Err(Error::NotClaimable);
        }
        if game.counterparty.as_ref() != Some(&player) {
            return Err(Error::NotClaimable);
        }
        let claim_deadline = game.claim_deadline.ok_or(Error::NotClaimable)?;
        if env.ledger().timestamp() < claim_deadline {
            return Err(Error::TooEarly);
        }

        let payout = scoring::forfeit(game.stake, game.deposit)?;
        game.status = GameStatus::Closed;
        Self::store_game(&env, &game_id, &game);
        ledger::credit(&env, &player, payout.counterparty)?;

        log!(&env, "game forfeited", game_id, payout.counterparty);
        GameForfeited {
            game_id,
            player,
            amount: payout.counterparty,
        }
        .publish(&env);
        Ok(payout.counterparty)
    }

    // ----- Balance ledger ---------------------------------------------------

    /// Pays out the caller's whole balance.
    pub fn withdraw(env: Env, player: Address) -> Result<i128, Error> {
        player.require_auth();

        let config = Self::load_config(&env)?;
        // Zeroed before the transfer below.
        let amount = ledger::take(&env, &player)?;
        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &player,
            &amount,
        );

        BalanceWithdrawn { player, amount }.publish(&env);
        Ok(amount)
    }

    pub fn balance(env: Env, player: Address) -> i128 {
        ledger::balance_of(&env, &player)
    }

    // ----- Read accessors ---------------------------------------------------

    pub fn get_game(env: Env, game_id: BytesN<32>) -> Result<Game, Error> {
        Self::load_game(&env, &game_id)
    }

    pub fn game_status(env: Env, game_id: BytesN<32>) -> GameStatus {
        Self::load_game(&env, &game_id)
            .map(|g| g.status)
            .unwrap_or(GameStatus::Uninitialized)
    }

    // --- Internals ---
    fn validate_config(config: &Config) -> Result<(), Error> {
        if config.stake <= 0
            || config.deposit_percent > MAX_DEPOSIT_PERCENT
            || config.reveal_window == 0
        {
            return Err(Error::InvalidConfig);
        }
        Self::deposit_for(config).map(|_| ())
    }
    fn deposit_for(config: &Config) -> Result<i128, Error> {
        config
            .stake
            .checked_mul(config.deposit_percent as i128)
            .map(|v| v / MAX_DEPOSIT_PERCENT as i128)
            .ok_or(Error::Overflow)
    }
    fn load_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
    fn load_config(env: &Env) -> Result<Config, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }
    fn ensure_not_paused(env: &Env) -> Result<(), Error> {
        if Self::is_paused(env.clone()) { Err(Error::Paused) } else { Ok(()) }
    }
    fn load_game(env: &Env, game_id: &BytesN<32>) -> Result<Game, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Game(game_id.clone()))
            .ok_or(Error::GameNotFound)
    }
    fn store_game(env: &Env, game_id: &BytesN<32>, game: &Game) {
        let key = DataKey::Game(game_id.clone());
        env.storage().persistent().set(&key, game);
        env.storage()
            .persistent()
            .extend_ttl(&key, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
        Self::bump_instance(env);
    }
    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_LEDGERS, INSTANCE_TTL_LEDGERS);
    }
    fn escrow(env: &Env, token: &Address, from: &Address, amount: i128) {
        token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
    }
}
