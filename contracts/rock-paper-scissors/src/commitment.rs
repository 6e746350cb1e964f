//! Game ids are SHA-256 commitments over the hidden move.
//!
//! Preimage layout: `xdr(scope) || xdr(player) || be32(choice) || secret`.
//! Binding the contract address and the committing player into the hash means
//! a commitment copied from another deployment or another player never
//! re-derives, so the reveal check doubles as caller authentication.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{Error, Move};

pub fn compute(
    env: &Env,
    scope: &Address,
    player: &Address,
    choice: Move,
    secret: &Bytes,
) -> Result<BytesN<32>, Error> {
    if !choice.is_playable() {
        return Err(Error::InvalidMove);
    }
    if secret.is_empty() {
        return Err(Error::EmptySecret);
    }

    let mut preimage = scope.clone().to_xdr(env);
    preimage.append(&player.clone().to_xdr(env));
    preimage.extend_from_array(&(choice as u32).to_be_bytes());
    preimage.append(secret);
    Ok(env.crypto().sha256(&preimage).into())
}

/// The all-zero id is reserved as "no commitment".
pub fn is_empty(game_id: &BytesN<32>) -> bool {
    game_id.to_array() == [0u8; 32]
}
