use soroban_sdk::{contracttype, Address, String, Vec};

pub const BPS_DENOMINATOR: u32 = 10_000;
pub const DAY_IN_SECONDS: u64 = 86_400;

/// Roughly 30 days of ledgers at 5s each.
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = 259_200;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    SupplyOracle,
    Paused,
    RegistryParams,
    GovernanceParams,
    TreasuryParams,
    DecayParams,
    Verifier(Address),
    Manager(Address),
    ProposalCount,
    Proposal(u64),
    Tally(u64),
    Vote(u64, Address),
    TreasuryBalance,
    Released(u64, u32),
    ReleasedTotal(u64),
    TimelockCount,
    Timelock(u64),
    Reputation(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Pending,
    Active,
    Approved,
    Rejected,
    Completed,
    Failed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub title: String,
    pub description: String,
    pub funds_required: i128,
    pub completed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub description: String,
    pub total_budget: i128,
    pub stake: i128,
    /// Index of the next milestone to confirm; equals the milestone count once all are done.
    pub current_milestone: u32,
    pub status: ProposalStatus,
    pub milestones: Vec<Milestone>,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub support: bool,
    pub weight: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteTally {
    pub for_votes: i128,
    pub against_votes: i128,
    pub start: u64,
    pub end: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VotingState {
    NoVoting,
    Open,
    Passed,
    Failed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelockTransfer {
    pub id: u64,
    pub proposal_id: u64,
    pub milestone_index: u32,
    pub recipient: Address,
    pub amount: i128,
    pub release_time: u64,
    pub executed: bool,
    pub cancelled: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReputationRecord {
    pub score: u64,
    pub last_update: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Verifier,
    Manager,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryParams {
    pub min_stake: i128,
    pub min_reputation: u64,
    pub success_reward: u64,
    pub failure_penalty: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceParams {
    pub voting_duration: u64,
    pub quorum_bps: u32,
    pub majority_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryParams {
    /// Releases at or above this amount go through the timelock.
    pub timelock_threshold: i128,
    pub timelock_duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecayParams {
    pub decay_period: u64,
    pub decay_bps: u32,
}
