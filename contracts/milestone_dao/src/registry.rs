//! Proposal registry: proposal and milestone records, their state machine,
//! and custody of proposer stakes.
//!
//! ```text
//! Pending ──► Active ──► Approved ──► Completed
//!               │            └──────► Failed
//!               └──► Rejected
//! ```
//!
//! A stake leaves custody exactly once: back to the proposer on Completed or
//! Rejected, into the treasury on Failed.

use soroban_sdk::{log, panic_with_error, Address, Env, String, Vec};

use crate::errors::DaoError;
use crate::events::{
    MilestoneCompleted, ProposalApproved, ProposalCompleted, ProposalFailed, ProposalRejected,
    ProposalSubmitted,
};
use crate::types::{DataKey, Milestone, Proposal, ProposalStatus, RegistryParams};
use crate::{governance, reputation, storage, treasury};

#[allow(clippy::too_many_arguments)]
pub fn submit(
    env: &Env,
    proposer: &Address,
    description: String,
    total_budget: i128,
    titles: Vec<String>,
    descriptions: Vec<String>,
    funds: Vec<i128>,
    now: u64,
) -> u64 {
    let milestones = build_milestones(env, total_budget, titles, descriptions, funds);
    let params = storage::registry_params(env);

    // Check the proposer can post the stake and has standing
    let token = storage::token(env);
    if token.balance(proposer) < params.min_stake {
        panic_with_error!(env, DaoError::InsufficientStake);
    }
    if reputation::query(env, proposer, now) < params.min_reputation {
        panic_with_error!(env, DaoError::InsufficientReputation);
    }

    let id = storage::next_id(env, &DataKey::ProposalCount);
    let milestone_count = milestones.len();
    let mut proposal = Proposal {
        id,
        proposer: proposer.clone(),
        description,
        total_budget,
        stake: params.min_stake,
        current_milestone: 0,
        status: ProposalStatus::Pending,
        milestones,
        created_at: now,
    };

    governance::open_voting(env, id, now);
    proposal.status = ProposalStatus::Active;
    save(env, &proposal);

    if params.min_stake > 0 {
        token.transfer(proposer, &env.current_contract_address(), &params.min_stake);
    }

    log!(env, "proposal submitted", id, total_budget);
    ProposalSubmitted {
        proposal_id: id,
        proposer: proposer.clone(),
        total_budget,
        stake: params.min_stake,
        milestone_count,
    }
    .publish(env);

    id
}

fn build_milestones(
    env: &Env,
    total_budget: i128,
    titles: Vec<String>,
    descriptions: Vec<String>,
    funds: Vec<i128>,
) -> Vec<Milestone> {
    if titles.is_empty() || titles.len() != descriptions.len() || titles.len() != funds.len() {
        panic_with_error!(env, DaoError::MalformedMilestones);
    }
    if total_budget <= 0 {
        panic_with_error!(env, DaoError::MalformedMilestones);
    }

    let mut milestones = Vec::new(env);
    let mut sum: i128 = 0;
    for i in 0..titles.len() {
        let funds_required = funds.get_unchecked(i);
        if funds_required < 0 {
            panic_with_error!(env, DaoError::MalformedMilestones);
        }
        sum = sum
            .checked_add(funds_required)
            .unwrap_or_else(|| panic_with_error!(env, DaoError::MalformedMilestones));
        milestones.push_back(Milestone {
            title: titles.get_unchecked(i),
            description: descriptions.get_unchecked(i),
            funds_required,
            completed: false,
        });
    }

    if sum != total_budget {
        panic_with_error!(env, DaoError::MalformedMilestones);
    }
    milestones
}

pub fn get(env: &Env, proposal_id: u64) -> Proposal {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id))
        .unwrap_or_else(|| panic_with_error!(env, DaoError::ProposalNotFound))
}

pub fn count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0u64)
}

pub fn get_milestone(env: &Env, proposal_id: u64, milestone_index: u32) -> Milestone {
    let proposal = get(env, proposal_id);
    proposal
        .milestones
        .get(milestone_index)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::InvalidMilestone))
}

pub fn initial_milestone_funds(env: &Env, proposal_id: u64) -> i128 {
    get_milestone(env, proposal_id, 0).funds_required
}

fn save(env: &Env, proposal: &Proposal) {
    storage::persistent_set(env, &DataKey::Proposal(proposal.id), proposal);
}

fn require_status(env: &Env, proposal: &Proposal, status: ProposalStatus, error: DaoError) {
    if proposal.status != status {
        panic_with_error!(env, error);
    }
}

pub fn approve(env: &Env, executor: &Address, proposal_id: u64) -> Proposal {
    let mut proposal = get(env, proposal_id);
    require_status(env, &proposal, ProposalStatus::Active, DaoError::NotActive);

    proposal.status = ProposalStatus::Approved;
    save(env, &proposal);

    ProposalApproved {
        proposal_id,
        executor: executor.clone(),
    }
    .publish(env);
    proposal
}

pub fn reject(env: &Env, admin: &Address, proposal_id: u64) {
    let mut proposal = get(env, proposal_id);
    require_status(env, &proposal, ProposalStatus::Active, DaoError::NotActive);

    proposal.status = ProposalStatus::Rejected;
    save(env, &proposal);
    return_stake(env, &proposal);

    ProposalRejected {
        proposal_id,
        admin: admin.clone(),
        stake_returned: proposal.stake,
    }
    .publish(env);
}

/// Confirms the milestone at `current_milestone`. A non-final confirmation
/// releases the following milestone's tranche; the final one completes the
/// proposal, returns the stake and rewards the proposer.
pub fn mark_milestone_complete(
    env: &Env,
    verifier: &Address,
    proposal_id: u64,
    milestone_index: u32,
    now: u64,
) {
    let mut proposal = get(env, proposal_id);
    require_status(env, &proposal, ProposalStatus::Approved, DaoError::NotApproved);

    // Validate the milestone index and its order
    let mut milestone = proposal
        .milestones
        .get(milestone_index)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::InvalidMilestone));
    if milestone.completed {
        panic_with_error!(env, DaoError::MilestoneAlreadyCompleted);
    }
    if milestone_index != proposal.current_milestone {
        panic_with_error!(env, DaoError::NotCurrentMilestone);
    }

    milestone.completed = true;
    proposal.milestones.set(milestone_index, milestone);
    proposal.current_milestone += 1;

    let finished = proposal.current_milestone == proposal.milestones.len();
    if finished {
        proposal.status = ProposalStatus::Completed;
    }
    save(env, &proposal);

    MilestoneCompleted {
        proposal_id,
        milestone_index,
        verifier: verifier.clone(),
    }
    .publish(env);

    if finished {
        return_stake(env, &proposal);
        let reward = storage::registry_params(env).success_reward;
        reputation::credit(env, verifier, &proposal.proposer, reward, now);
        ProposalCompleted {
            proposal_id,
            stake_returned: proposal.stake,
            reputation_reward: reward,
        }
        .publish(env);
        return;
    }

    // Pay the tranche of the milestone that is now current
    let next_index = proposal.current_milestone;
    let next = proposal.milestones.get_unchecked(next_index);
    if next.funds_required > 0 {
        treasury::release(
            env,
            proposal_id,
            next_index,
            &proposal.proposer,
            next.funds_required,
            now,
        );
    }
}

/// Slashes an approved proposal: the stake goes to the treasury and the
/// proposer loses reputation.
pub fn fail(env: &Env, verifier: &Address, proposal_id: u64, now: u64) {
    let mut proposal = get(env, proposal_id);
    require_status(env, &proposal, ProposalStatus::Approved, DaoError::NotApproved);

    proposal.status = ProposalStatus::Failed;
    save(env, &proposal);
    treasury::absorb(env, proposal.stake);

    let penalty = storage::registry_params(env).failure_penalty;
    reputation::penalize(env, verifier, &proposal.proposer, penalty, now);

    log!(env, "proposal slashed", proposal_id, proposal.stake);
    ProposalFailed {
        proposal_id,
        verifier: verifier.clone(),
        stake_slashed: proposal.stake,
        reputation_penalty: penalty,
    }
    .publish(env);
}

fn return_stake(env: &Env, proposal: &Proposal) {
    if proposal.stake > 0 {
        storage::token(env).transfer(
            &env.current_contract_address(),
            &proposal.proposer,
            &proposal.stake,
        );
    }
}

pub fn validate_params(env: &Env, params: &RegistryParams) {
    if params.min_stake < 0 {
        panic_with_error!(env, DaoError::InvalidParameter);
    }
}

pub fn set_params(env: &Env, params: &RegistryParams) {
    validate_params(env, params);
    env.storage().instance().set(&DataKey::RegistryParams, params);
}
