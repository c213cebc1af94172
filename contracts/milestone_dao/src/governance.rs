//! Decision procedure: one voting window per proposal, token-weighted votes,
//! and the quorum/majority rule that approves a proposal and releases its
//! first tranche.
//!
//! A proposal whose vote fails stays Active after `execute` is refused. Only
//! the explicit `reject` path moves it to Rejected.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::errors::DaoError;
use crate::events::{ProposalExecuted, VoteCast, VotingOpened};
use crate::oracle::SupplyOracleClient;
use crate::types::{
    DataKey, GovernanceParams, ProposalStatus, Vote, VoteTally, VotingState, BPS_DENOMINATOR,
    DAY_IN_SECONDS,
};
use crate::{registry, storage, treasury};

/// Quorum: `(F + A) * 10000 >= S * Q`. Majority: `F * 10000 >= (F + A) * M`.
/// No votes never passes. `None` on arithmetic overflow.
pub fn outcome_passes(
    for_votes: i128,
    against_votes: i128,
    total_supply: i128,
    quorum_bps: u32,
    majority_bps: u32,
) -> Option<bool> {
    let bps = i128::from(BPS_DENOMINATOR);
    let cast = for_votes.checked_add(against_votes)?;
    if cast <= 0 {
        return Some(false);
    }
    let quorum = cast.checked_mul(bps)? >= total_supply.checked_mul(i128::from(quorum_bps))?;
    let majority = for_votes.checked_mul(bps)? >= cast.checked_mul(i128::from(majority_bps))?;
    Some(quorum && majority)
}

pub fn open_voting(env: &Env, proposal_id: u64, now: u64) {
    let key = DataKey::Tally(proposal_id);
    if env.storage().persistent().has(&key) {
        panic_with_error!(env, DaoError::VotingAlreadyOpen);
    }
    let params = storage::governance_params(env);
    let end = now
        .checked_add(params.voting_duration)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow));
    let tally = VoteTally {
        for_votes: 0,
        against_votes: 0,
        start: now,
        end,
    };
    storage::persistent_set(env, &key, &tally);

    VotingOpened {
        proposal_id,
        start: now,
        end,
    }
    .publish(env);
}

pub fn get_tally(env: &Env, proposal_id: u64) -> VoteTally {
    env.storage()
        .persistent()
        .get(&DataKey::Tally(proposal_id))
        .unwrap_or_else(|| panic_with_error!(env, DaoError::VotingNotOpen))
}

pub fn get_vote(env: &Env, proposal_id: u64, voter: &Address) -> Option<Vote> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(proposal_id, voter.clone()))
}

/// Records a vote weighted by the voter's balance right now. A voter votes
/// once per proposal; a second vote is refused rather than re-weighted.
pub fn vote(env: &Env, voter: &Address, proposal_id: u64, support: bool, now: u64) -> i128 {
    let mut tally = get_tally(env, proposal_id);

    // Check the window and the voter
    if now < tally.start || now > tally.end {
        panic_with_error!(env, DaoError::VotingClosed);
    }
    let vote_key = DataKey::Vote(proposal_id, voter.clone());
    if env.storage().persistent().has(&vote_key) {
        panic_with_error!(env, DaoError::AlreadyVoted);
    }
    let weight = storage::token(env).balance(voter);
    if weight <= 0 {
        panic_with_error!(env, DaoError::NoVotingPower);
    }

    if support {
        tally.for_votes = storage::checked_add(env, tally.for_votes, weight);
    } else {
        tally.against_votes = storage::checked_add(env, tally.against_votes, weight);
    }
    storage::persistent_set(env, &vote_key, &Vote { support, weight });
    storage::persistent_set(env, &DataKey::Tally(proposal_id), &tally);

    VoteCast {
        proposal_id,
        voter: voter.clone(),
        support,
        weight,
    }
    .publish(env);
    weight
}

fn passes(env: &Env, tally: &VoteTally) -> bool {
    let params = storage::governance_params(env);
    let oracle: Address = storage::instance_get(env, &DataKey::SupplyOracle);
    let total_supply = SupplyOracleClient::new(env, &oracle).total_supply();
    outcome_passes(
        tally.for_votes,
        tally.against_votes,
        total_supply,
        params.quorum_bps,
        params.majority_bps,
    )
    .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow))
}

fn require_closed(env: &Env, tally: &VoteTally, now: u64) {
    if now <= tally.end {
        panic_with_error!(env, DaoError::VotingInProgress);
    }
}

/// Settles a closed vote. On a pass the proposal is approved and the first
/// milestone's funds go to the proposer; otherwise the call fails and
/// nothing changes.
pub fn execute(env: &Env, executor: &Address, proposal_id: u64, now: u64) {
    let proposal = registry::get(env, proposal_id);
    let tally = get_tally(env, proposal_id);
    require_closed(env, &tally, now);
    if proposal.status != ProposalStatus::Active {
        panic_with_error!(env, DaoError::NotActive);
    }
    if !passes(env, &tally) {
        panic_with_error!(env, DaoError::ProposalDidNotPass);
    }

    let proposal = registry::approve(env, executor, proposal_id);
    let first_tranche = registry::initial_milestone_funds(env, proposal_id);
    if first_tranche > 0 {
        treasury::release(env, proposal_id, 0, &proposal.proposer, first_tranche, now);
    }

    ProposalExecuted {
        proposal_id,
        executor: executor.clone(),
        for_votes: tally.for_votes,
        against_votes: tally.against_votes,
    }
    .publish(env);
}

/// Rejects a proposal whose closed vote did not pass and returns its stake.
pub fn reject(env: &Env, admin: &Address, proposal_id: u64, now: u64) {
    let tally = get_tally(env, proposal_id);
    require_closed(env, &tally, now);
    if passes(env, &tally) {
        panic_with_error!(env, DaoError::ProposalPassed);
    }
    registry::reject(env, admin, proposal_id);
}

pub fn voting_state(env: &Env, proposal_id: u64, now: u64) -> VotingState {
    let tally: Option<VoteTally> = env
        .storage()
        .persistent()
        .get(&DataKey::Tally(proposal_id));
    match tally {
        None => VotingState::NoVoting,
        Some(tally) if now <= tally.end => VotingState::Open,
        Some(tally) => {
            if passes(env, &tally) {
                VotingState::Passed
            } else {
                VotingState::Failed
            }
        }
    }
}

pub fn validate_params(env: &Env, params: &GovernanceParams) {
    if params.quorum_bps > BPS_DENOMINATOR
        || params.majority_bps > BPS_DENOMINATOR
        || params.voting_duration < DAY_IN_SECONDS
    {
        panic_with_error!(env, DaoError::InvalidParameter);
    }
}

pub fn set_params(env: &Env, params: &GovernanceParams) {
    validate_params(env, params);
    env.storage().instance().set(&DataKey::GovernanceParams, params);
}

#[cfg(test)]
mod tests {
    use super::outcome_passes;

    #[test]
    fn test_no_votes_never_pass() {
        assert_eq!(outcome_passes(0, 0, 0, 0, 0), Some(false));
        assert_eq!(outcome_passes(0, 0, 1_000, 0, 5_000), Some(false));
    }

    #[test]
    fn test_quorum_boundary() {
        // 10% of 10_000 supply is exactly 1_000.
        assert_eq!(outcome_passes(1_000, 0, 10_000, 1_000, 5_000), Some(true));
        assert_eq!(outcome_passes(999, 0, 10_000, 1_000, 5_000), Some(false));
    }

    #[test]
    fn test_majority_boundary() {
        // 60% majority of 1_000 cast votes is exactly 600 for.
        assert_eq!(outcome_passes(600, 400, 1_000, 0, 6_000), Some(true));
        assert_eq!(outcome_passes(599, 401, 1_000, 0, 6_000), Some(false));
    }

    #[test]
    fn test_tie_with_half_majority_passes() {
        assert_eq!(outcome_passes(500, 500, 1_000, 5_000, 5_000), Some(true));
    }

    #[test]
    fn test_quorum_counts_against_votes() {
        assert_eq!(outcome_passes(300, 700, 2_000, 5_000, 2_000), Some(true));
        assert_eq!(outcome_passes(300, 0, 2_000, 5_000, 2_000), Some(false));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(outcome_passes(i128::MAX, 0, 1, 0, 0), None);
    }
}
