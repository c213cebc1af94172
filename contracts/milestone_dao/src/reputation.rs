//! Reputation ledger.
//!
//! Scores decay lazily: a read computes the decayed value without storing it,
//! and the next write (credit, penalty) realizes the decay before applying its
//! own change. Every write restamps `last_update`, which restarts the decay
//! clock for that account.

use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::errors::DaoError;
use crate::events::ReputationUpdated;
use crate::storage;
use crate::types::{DataKey, DecayParams, ReputationRecord, BPS_DENOMINATOR, DAY_IN_SECONDS};

/// Applies `periods` rounds of `score * (10000 - decay_bps) / 10000`,
/// truncating after every round.
///
/// Once `score * decay_bps < 10000` every further round removes exactly one
/// point, so the remaining rounds are applied in a single subtraction.
pub fn decayed_score(score: u64, last_update: u64, now: u64, params: &DecayParams) -> u64 {
    if params.decay_period == 0 || params.decay_bps == 0 {
        return score;
    }
    let elapsed = now.saturating_sub(last_update);
    if elapsed < params.decay_period {
        return score;
    }
    let periods = elapsed / params.decay_period;
    let rate = u128::from(params.decay_bps.min(BPS_DENOMINATOR));
    let keep = u128::from(BPS_DENOMINATOR) - rate;
    let denominator = u128::from(BPS_DENOMINATOR);

    let mut current = u128::from(score);
    let mut round = 0u64;
    while round < periods && current > 0 {
        if current * rate < denominator {
            current = current.saturating_sub(u128::from(periods - round));
            break;
        }
        current = current * keep / denominator;
        round += 1;
    }
    // Never grows, so it still fits.
    current as u64
}

pub fn record(env: &Env, account: &Address) -> ReputationRecord {
    env.storage()
        .persistent()
        .get(&DataKey::Reputation(account.clone()))
        .unwrap_or(ReputationRecord {
            score: 0,
            last_update: 0,
        })
}

pub fn query(env: &Env, account: &Address, now: u64) -> u64 {
    let record = record(env, account);
    decayed_score(record.score, record.last_update, now, &storage::decay_params(env))
}

pub fn credit(env: &Env, actor: &Address, account: &Address, amount: u64, now: u64) -> u64 {
    let current = query(env, account, now);
    let score = current
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow));
    write(env, actor, account, score, now, i128::from(amount));
    score
}

/// Subtracts `amount`, clamping the score at zero.
pub fn penalize(env: &Env, actor: &Address, account: &Address, amount: u64, now: u64) -> u64 {
    let current = query(env, account, now);
    let score = current.saturating_sub(amount);
    write(env, actor, account, score, now, -i128::from(amount));
    score
}

/// Overwrites the score with no decay or delta accounting.
pub fn set_absolute(env: &Env, admin: &Address, account: &Address, score: u64, now: u64) {
    let previous = record(env, account).score;
    let delta = i128::from(score) - i128::from(previous);
    write(env, admin, account, score, now, delta);
}

pub fn set_decay_params(env: &Env, params: &DecayParams) {
    validate_decay_params(env, params);
    env.storage().instance().set(&DataKey::DecayParams, params);
}

pub fn validate_decay_params(env: &Env, params: &DecayParams) {
    // A period shorter than a day would make a single read walk too many rounds.
    if params.decay_bps > BPS_DENOMINATOR || params.decay_period < DAY_IN_SECONDS {
        panic_with_error!(env, DaoError::InvalidParameter);
    }
}

fn write(env: &Env, actor: &Address, account: &Address, score: u64, now: u64, delta: i128) {
    storage::persistent_set(
        env,
        &DataKey::Reputation(account.clone()),
        &ReputationRecord {
            score,
            last_update: now,
        },
    );
    log!(env, "reputation updated", account.clone(), delta, score);
    ReputationUpdated {
        account: account.clone(),
        actor: actor.clone(),
        delta,
        score,
    }
    .publish(env);
}
