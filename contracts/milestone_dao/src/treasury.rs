//! Treasury: the fund ledger, the per-milestone release guard and the
//! timelock for large transfers.
//!
//! `TreasuryBalance` is tracked separately from the token balance of the
//! contract because proposer stakes sit in the same account. It counts only
//! what is free to commit: a release lowers it immediately, whether the
//! tokens leave now or wait behind a timelock.

use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::errors::DaoError;
use crate::events::{
    RewardAllocated, TimelockCancelled, TimelockCreated, TimelockExecuted, TreasuryFunded,
};
use crate::storage;
use crate::types::{DataKey, TimelockTransfer, TreasuryParams};

pub fn balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TreasuryBalance)
        .unwrap_or(0)
}

fn set_balance(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::TreasuryBalance, &balance);
}

pub fn fund(env: &Env, from: &Address, amount: i128) -> i128 {
    if amount <= 0 {
        panic_with_error!(env, DaoError::InvalidAmount);
    }
    storage::token(env).transfer(from, &env.current_contract_address(), &amount);
    let balance = storage::checked_add(env, balance(env), amount);
    set_balance(env, balance);
    TreasuryFunded {
        from: from.clone(),
        amount,
        balance,
    }
    .publish(env);
    balance
}

/// Moves tokens already held by the contract (a forfeited stake) into the
/// treasury's free balance.
pub fn absorb(env: &Env, amount: i128) {
    let balance = storage::checked_add(env, balance(env), amount);
    set_balance(env, balance);
}

pub fn is_released(env: &Env, proposal_id: u64, milestone_index: u32) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Released(proposal_id, milestone_index))
}

pub fn released_total(env: &Env, proposal_id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ReleasedTotal(proposal_id))
        .unwrap_or(0)
}

/// Commits the funds of one milestone to `recipient`, at most once per
/// `(proposal_id, milestone_index)`. Amounts below the timelock threshold are
/// paid out now; larger ones are queued and the new transfer id is returned.
pub fn release(
    env: &Env,
    proposal_id: u64,
    milestone_index: u32,
    recipient: &Address,
    amount: i128,
    now: u64,
) -> Option<u64> {
    // Validate recipient and amount
    if *recipient == env.current_contract_address() {
        panic_with_error!(env, DaoError::InvalidRecipient);
    }
    if amount <= 0 {
        panic_with_error!(env, DaoError::InvalidAmount);
    }
    // Check the milestone was never paid and the treasury can cover it
    if is_released(env, proposal_id, milestone_index) {
        panic_with_error!(env, DaoError::AlreadyReleased);
    }
    let available = balance(env);
    if available < amount {
        panic_with_error!(env, DaoError::InsufficientTreasuryBalance);
    }

    storage::persistent_set(env, &DataKey::Released(proposal_id, milestone_index), &true);
    let total = storage::checked_add(env, released_total(env, proposal_id), amount);
    storage::persistent_set(env, &DataKey::ReleasedTotal(proposal_id), &total);
    set_balance(env, storage::checked_sub(env, available, amount));

    let params = storage::treasury_params(env);
    let timelock_id = if amount < params.timelock_threshold {
        storage::token(env).transfer(&env.current_contract_address(), recipient, &amount);
        None
    } else {
        Some(create_timelock(
            env,
            proposal_id,
            milestone_index,
            recipient,
            amount,
            now,
            &params,
        ))
    };

    log!(env, "milestone funds released", proposal_id, milestone_index, amount);
    RewardAllocated {
        proposal_id,
        milestone_index,
        recipient: recipient.clone(),
        amount,
        timelocked: timelock_id.is_some(),
    }
    .publish(env);

    timelock_id
}

fn create_timelock(
    env: &Env,
    proposal_id: u64,
    milestone_index: u32,
    recipient: &Address,
    amount: i128,
    now: u64,
    params: &TreasuryParams,
) -> u64 {
    let release_time = now
        .checked_add(params.timelock_duration)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow));
    let id = storage::next_id(env, &DataKey::TimelockCount);
    let transfer = TimelockTransfer {
        id,
        proposal_id,
        milestone_index,
        recipient: recipient.clone(),
        amount,
        release_time,
        executed: false,
        cancelled: false,
    };
    storage::persistent_set(env, &DataKey::Timelock(id), &transfer);

    TimelockCreated {
        transfer_id: id,
        proposal_id,
        milestone_index,
        recipient: recipient.clone(),
        amount,
        release_time,
    }
    .publish(env);
    id
}

pub fn get_timelock(env: &Env, id: u64) -> TimelockTransfer {
    env.storage()
        .persistent()
        .get(&DataKey::Timelock(id))
        .unwrap_or_else(|| panic_with_error!(env, DaoError::TimelockNotFound))
}

pub fn timelock_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TimelockCount)
        .unwrap_or(0u64)
}

/// Push path: anyone may settle a matured transfer.
pub fn execute_timelock(env: &Env, executor: &Address, id: u64, now: u64) {
    let transfer = get_timelock(env, id);
    settle(env, executor, transfer, now);
}

/// Pull path: only the stored recipient may settle.
pub fn claim(env: &Env, caller: &Address, id: u64, now: u64) {
    let transfer = get_timelock(env, id);
    if *caller != transfer.recipient {
        panic_with_error!(env, DaoError::NotRecipient);
    }
    settle(env, caller, transfer, now);
}

fn settle(env: &Env, executor: &Address, mut transfer: TimelockTransfer, now: u64) {
    // Check it is still pending and matured
    require_pending(env, &transfer);
    if now < transfer.release_time {
        panic_with_error!(env, DaoError::TimelockNotReady);
    }

    transfer.executed = true;
    storage::persistent_set(env, &DataKey::Timelock(transfer.id), &transfer);
    storage::token(env).transfer(
        &env.current_contract_address(),
        &transfer.recipient,
        &transfer.amount,
    );

    TimelockExecuted {
        transfer_id: transfer.id,
        executor: executor.clone(),
        recipient: transfer.recipient,
        amount: transfer.amount,
    }
    .publish(env);
}

/// Cancels a queued transfer for good. The reserved amount returns to the free
/// balance; the milestone stays marked as released.
pub fn cancel(env: &Env, admin: &Address, id: u64) {
    let mut transfer = get_timelock(env, id);
    require_pending(env, &transfer);

    transfer.cancelled = true;
    storage::persistent_set(env, &DataKey::Timelock(id), &transfer);
    absorb(env, transfer.amount);

    TimelockCancelled {
        transfer_id: id,
        admin: admin.clone(),
        amount: transfer.amount,
        balance: balance(env),
    }
    .publish(env);
}

fn require_pending(env: &Env, transfer: &TimelockTransfer) {
    if transfer.executed {
        panic_with_error!(env, DaoError::AlreadyExecuted);
    }
    if transfer.cancelled {
        panic_with_error!(env, DaoError::TransferCancelled);
    }
}

pub fn validate_params(env: &Env, params: &TreasuryParams) {
    if params.timelock_threshold <= 0 {
        panic_with_error!(env, DaoError::InvalidParameter);
    }
}

pub fn set_params(env: &Env, params: &TreasuryParams) {
    validate_params(env, params);
    env.storage().instance().set(&DataKey::TreasuryParams, params);
}
