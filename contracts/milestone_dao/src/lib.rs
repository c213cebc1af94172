//! Milestone DAO
//!
//! A treasury-funded grant process run as one Soroban contract:
//!
//! 1. A proposer stakes tokens and submits a proposal split into milestones.
//! 2. Token holders vote during a fixed window, weighted by their balance.
//! 3. `execute` approves a proposal that reached quorum and majority and pays
//!    the first milestone's tranche.
//! 4. Verifiers confirm milestones in order; each confirmation pays the next
//!    tranche and the last one returns the stake and rewards the proposer.
//! 5. A verifier may fail an approved proposal instead, slashing the stake
//!    into the treasury and penalizing the proposer's reputation.
//!
//! Tranches at or above the timelock threshold are queued and can be
//! executed by anyone, claimed by the recipient, or cancelled by the admin.
#![no_std]

mod dao;
mod errors;
mod events;
mod governance;
mod oracle;
mod registry;
mod reputation;
mod storage;
mod treasury;
mod types;


pub use dao::{MilestoneDao, MilestoneDaoClient};
pub use errors::DaoError;
pub use oracle::{SupplyOracle, SupplyOracleClient};
pub use types::{
    DecayParams, GovernanceParams, Milestone, Proposal, ProposalStatus,
    RegistryParams, ReputationRecord, Role, TimelockTransfer, TreasuryParams, Vote, VoteTally,
    VotingState,
};
