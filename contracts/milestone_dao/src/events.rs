//! Audit events. Each state-changing entry point publishes the records below
//! after its mutations are written; a failed invocation publishes nothing.

use soroban_sdk::{contractevent, Address};

use crate::types::{DecayParams, GovernanceParams, RegistryParams, Role, TreasuryParams};

#[contractevent]
pub struct ProposalSubmitted {
    #[topic]
    pub proposal_id: u64,
    #[topic]
    pub proposer: Address,
    pub total_budget: i128,
    pub stake: i128,
    pub milestone_count: u32,
}

#[contractevent]
pub struct VotingOpened {
    #[topic]
    pub proposal_id: u64,
    pub start: u64,
    pub end: u64,
}

#[contractevent]
pub struct VoteCast {
    #[topic]
    pub proposal_id: u64,
    #[topic]
    pub voter: Address,
    pub support: bool,
    pub weight: i128,
}

#[contractevent]
pub struct ProposalExecuted {
    #[topic]
    pub proposal_id: u64,
    pub executor: Address,
    pub for_votes: i128,
    pub against_votes: i128,
}

#[contractevent]
pub struct ProposalApproved {
    #[topic]
    pub proposal_id: u64,
    pub executor: Address,
}

#[contractevent]
pub struct ProposalRejected {
    #[topic]
    pub proposal_id: u64,
    pub admin: Address,
    pub stake_returned: i128,
}

#[contractevent]
pub struct MilestoneCompleted {
    #[topic]
    pub proposal_id: u64,
    pub milestone_index: u32,
    pub verifier: Address,
}

#[contractevent]
pub struct ProposalCompleted {
    #[topic]
    pub proposal_id: u64,
    pub stake_returned: i128,
    pub reputation_reward: u64,
}

#[contractevent]
pub struct ProposalFailed {
    #[topic]
    pub proposal_id: u64,
    pub verifier: Address,
    pub stake_slashed: i128,
    pub reputation_penalty: u64,
}

/// A milestone tranche committed by the treasury, either paid out or queued.
#[contractevent]
pub struct RewardAllocated {
    #[topic]
    pub proposal_id: u64,
    pub milestone_index: u32,
    pub recipient: Address,
    pub amount: i128,
    pub timelocked: bool,
}

#[contractevent]
pub struct TimelockCreated {
    #[topic]
    pub transfer_id: u64,
    pub proposal_id: u64,
    pub milestone_index: u32,
    pub recipient: Address,
    pub amount: i128,
    pub release_time: u64,
}

#[contractevent]
pub struct TimelockExecuted {
    #[topic]
    pub transfer_id: u64,
    pub executor: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contractevent]
pub struct TimelockCancelled {
    #[topic]
    pub transfer_id: u64,
    pub admin: Address,
    pub amount: i128,
    /// Free treasury balance after the reservation came back.
    pub balance: i128,
}

#[contractevent]
pub struct ReputationUpdated {
    #[topic]
    pub account: Address,
    /// The manager, verifier or admin whose call changed the score.
    pub actor: Address,
    pub delta: i128,
    pub score: u64,
}

#[contractevent]
pub struct TreasuryFunded {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub balance: i128,
}

#[contractevent]
pub struct RoleGranted {
    #[topic]
    pub role: Role,
    pub admin: Address,
    pub account: Address,
}

#[contractevent]
pub struct RoleRevoked {
    #[topic]
    pub role: Role,
    pub admin: Address,
    pub account: Address,
}

#[contractevent]
pub struct PauseChanged {
    pub admin: Address,
    pub paused: bool,
}

#[contractevent]
pub struct RegistryParamsUpdated {
    pub admin: Address,
    pub params: RegistryParams,
}

#[contractevent]
pub struct GovernanceParamsUpdated {
    pub admin: Address,
    pub params: GovernanceParams,
}

#[contractevent]
pub struct TreasuryParamsUpdated {
    pub admin: Address,
    pub params: TreasuryParams,
}

#[contractevent]
pub struct DecayParamsUpdated {
    pub admin: Address,
    pub params: DecayParams,
}
