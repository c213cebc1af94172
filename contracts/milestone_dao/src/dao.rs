use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, String, Vec};

use crate::errors::DaoError;
use crate::events::{
    DecayParamsUpdated, GovernanceParamsUpdated, PauseChanged, RegistryParamsUpdated, RoleGranted,
    RoleRevoked, TreasuryParamsUpdated,
};
use crate::types::{
    DataKey, DecayParams, GovernanceParams, Milestone, Proposal, RegistryParams,
    ReputationRecord, Role, TimelockTransfer, TreasuryParams, Vote, VoteTally, VotingState,
};
use crate::{governance, registry, reputation, storage, treasury};

#[contract]
pub struct MilestoneDao;

#[contractimpl]
impl MilestoneDao {
    pub fn init(
        env: Env,
        admin: Address,
        token: Address,
        supply_oracle: Address,
        registry_params: RegistryParams,
        governance_params: GovernanceParams,
        treasury_params: TreasuryParams,
        decay_params: DecayParams,
    ) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic_with_error!(&env, DaoError::AlreadyInitialized);
        }
        admin.require_auth();

        registry::validate_params(&env, &registry_params);
        governance::validate_params(&env, &governance_params);
        treasury::validate_params(&env, &treasury_params);
        reputation::validate_decay_params(&env, &decay_params);

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::SupplyOracle, &supply_oracle);
        env.storage().instance().set(&DataKey::Paused, &false);
        env.storage().instance().set(&DataKey::RegistryParams, &registry_params);
        env.storage().instance().set(&DataKey::GovernanceParams, &governance_params);
        env.storage().instance().set(&DataKey::TreasuryParams, &treasury_params);
        env.storage().instance().set(&DataKey::DecayParams, &decay_params);
        env.storage().instance().set(&DataKey::TreasuryBalance, &0i128);
    }

    // Administration

    pub fn admin(env: Env) -> Address {
        storage::admin(&env)
    }

    pub fn token(env: Env) -> Address {
        storage::instance_get(&env, &DataKey::Token)
    }

    pub fn pause(env: Env) {
        Self::set_paused(&env, true);
    }

    pub fn unpause(env: Env) {
        Self::set_paused(&env, false);
    }

    pub fn is_paused(env: Env) -> bool {
        storage::require_initialized(&env);
        storage::is_paused(&env)
    }

    fn set_paused(env: &Env, paused: bool) {
        let admin = storage::require_admin(env);
        env.storage().instance().set(&DataKey::Paused, &paused);
        PauseChanged { admin, paused }.publish(env);
    }

    pub fn add_verifier(env: Env, account: Address) {
        Self::grant(&env, Role::Verifier, account);
    }

    pub fn remove_verifier(env: Env, account: Address) {
        Self::revoke(&env, Role::Verifier, account);
    }

    pub fn is_verifier(env: Env, account: Address) -> bool {
        storage::require_initialized(&env);
        storage::has_role(&env, Role::Verifier, &account)
    }

    pub fn add_manager(env: Env, account: Address) {
        Self::grant(&env, Role::Manager, account);
    }

    pub fn remove_manager(env: Env, account: Address) {
        Self::revoke(&env, Role::Manager, account);
    }

    pub fn is_manager(env: Env, account: Address) -> bool {
        storage::require_initialized(&env);
        storage::has_role(&env, Role::Manager, &account)
    }

    fn grant(env: &Env, role: Role, account: Address) {
        let admin = storage::require_admin(env);
        storage::set_role(env, role, &account, true);
        RoleGranted {
            role,
            admin,
            account,
        }
        .publish(env);
    }

    fn revoke(env: &Env, role: Role, account: Address) {
        let admin = storage::require_admin(env);
        storage::set_role(env, role, &account, false);
        RoleRevoked {
            role,
            admin,
            account,
        }
        .publish(env);
    }

    pub fn set_registry_params(env: Env, params: RegistryParams) {
        let admin = storage::require_admin(&env);
        registry::set_params(&env, &params);
        RegistryParamsUpdated { admin, params }.publish(&env);
    }

    pub fn set_governance_params(env: Env, params: GovernanceParams) {
        let admin = storage::require_admin(&env);
        governance::set_params(&env, &params);
        GovernanceParamsUpdated { admin, params }.publish(&env);
    }

    pub fn set_treasury_params(env: Env, params: TreasuryParams) {
        let admin = storage::require_admin(&env);
        treasury::set_params(&env, &params);
        TreasuryParamsUpdated { admin, params }.publish(&env);
    }

    pub fn set_decay_params(env: Env, params: DecayParams) {
        let admin = storage::require_admin(&env);
        reputation::set_decay_params(&env, &params);
        DecayParamsUpdated { admin, params }.publish(&env);
    }

    pub fn registry_params(env: Env) -> RegistryParams {
        storage::registry_params(&env)
    }

    pub fn governance_params(env: Env) -> GovernanceParams {
        storage::governance_params(&env)
    }

    pub fn treasury_params(env: Env) -> TreasuryParams {
        storage::treasury_params(&env)
    }

    pub fn decay_params(env: Env) -> DecayParams {
        storage::decay_params(&env)
    }

    // Proposals

    pub fn submit(
        env: Env,
        proposer: Address,
        description: String,
        total_budget: i128,
        titles: Vec<String>,
        descriptions: Vec<String>,
        funds: Vec<i128>,
    ) -> u64 {
        storage::require_not_paused(&env);
        proposer.require_auth();
        let now = env.ledger().timestamp();
        registry::submit(
            &env,
            &proposer,
            description,
            total_budget,
            titles,
            descriptions,
            funds,
            now,
        )
    }

    pub fn mark_milestone_complete(
        env: Env,
        verifier: Address,
        proposal_id: u64,
        milestone_index: u32,
    ) {
        storage::require_not_paused(&env);
        storage::require_role(&env, Role::Verifier, &verifier);
        let now = env.ledger().timestamp();
        registry::mark_milestone_complete(&env, &verifier, proposal_id, milestone_index, now);
    }

    pub fn fail_proposal(env: Env, verifier: Address, proposal_id: u64) {
        storage::require_not_paused(&env);
        storage::require_role(&env, Role::Verifier, &verifier);
        let now = env.ledger().timestamp();
        registry::fail(&env, &verifier, proposal_id, now);
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Proposal {
        storage::require_initialized(&env);
        registry::get(&env, proposal_id)
    }

    pub fn get_milestone(env: Env, proposal_id: u64, milestone_index: u32) -> Milestone {
        storage::require_initialized(&env);
        registry::get_milestone(&env, proposal_id, milestone_index)
    }

    pub fn get_initial_milestone_funds(env: Env, proposal_id: u64) -> i128 {
        storage::require_initialized(&env);
        registry::initial_milestone_funds(&env, proposal_id)
    }

    pub fn proposal_count(env: Env) -> u64 {
        storage::require_initialized(&env);
        registry::count(&env)
    }

    // Voting

    pub fn vote(env: Env, voter: Address, proposal_id: u64, support: bool) -> i128 {
        storage::require_not_paused(&env);
        voter.require_auth();
        let now = env.ledger().timestamp();
        governance::vote(&env, &voter, proposal_id, support, now)
    }

    pub fn execute(env: Env, executor: Address, proposal_id: u64) {
        storage::require_not_paused(&env);
        executor.require_auth();
        let now = env.ledger().timestamp();
        governance::execute(&env, &executor, proposal_id, now);
    }

    pub fn reject_proposal(env: Env, proposal_id: u64) {
        storage::require_not_paused(&env);
        let admin = storage::require_admin(&env);
        let now = env.ledger().timestamp();
        governance::reject(&env, &admin, proposal_id, now);
    }

    pub fn get_vote(env: Env, proposal_id: u64, voter: Address) -> Option<Vote> {
        storage::require_initialized(&env);
        governance::get_vote(&env, proposal_id, &voter)
    }

    pub fn has_voted(env: Env, proposal_id: u64, voter: Address) -> bool {
        storage::require_initialized(&env);
        governance::get_vote(&env, proposal_id, &voter).is_some()
    }

    pub fn get_tally(env: Env, proposal_id: u64) -> VoteTally {
        storage::require_initialized(&env);
        governance::get_tally(&env, proposal_id)
    }

    pub fn voting_state(env: Env, proposal_id: u64) -> VotingState {
        storage::require_initialized(&env);
        governance::voting_state(&env, proposal_id, env.ledger().timestamp())
    }

    // Treasury

    pub fn fund(env: Env, from: Address, amount: i128) -> i128 {
        storage::require_not_paused(&env);
        from.require_auth();
        treasury::fund(&env, &from, amount)
    }

    pub fn execute_timelock(env: Env, executor: Address, transfer_id: u64) {
        storage::require_not_paused(&env);
        executor.require_auth();
        let now = env.ledger().timestamp();
        treasury::execute_timelock(&env, &executor, transfer_id, now);
    }

    pub fn claim(env: Env, recipient: Address, transfer_id: u64) {
        storage::require_not_paused(&env);
        recipient.require_auth();
        let now = env.ledger().timestamp();
        treasury::claim(&env, &recipient, transfer_id, now);
    }

    pub fn cancel_timelock(env: Env, transfer_id: u64) {
        storage::require_initialized(&env);
        let admin = storage::require_admin(&env);
        treasury::cancel(&env, &admin, transfer_id);
    }

    pub fn treasury_balance(env: Env) -> i128 {
        storage::require_initialized(&env);
        treasury::balance(&env)
    }

    pub fn is_released(env: Env, proposal_id: u64, milestone_index: u32) -> bool {
        storage::require_initialized(&env);
        treasury::is_released(&env, proposal_id, milestone_index)
    }

    pub fn released_total(env: Env, proposal_id: u64) -> i128 {
        storage::require_initialized(&env);
        treasury::released_total(&env, proposal_id)
    }

    pub fn get_timelock(env: Env, transfer_id: u64) -> TimelockTransfer {
        storage::require_initialized(&env);
        treasury::get_timelock(&env, transfer_id)
    }

    pub fn timelock_count(env: Env) -> u64 {
        storage::require_initialized(&env);
        treasury::timelock_count(&env)
    }

    // Reputation

    pub fn credit(env: Env, manager: Address, account: Address, amount: u64) -> u64 {
        storage::require_not_paused(&env);
        storage::require_role(&env, Role::Manager, &manager);
        reputation::credit(&env, &manager, &account, amount, env.ledger().timestamp())
    }

    pub fn penalize(env: Env, manager: Address, account: Address, amount: u64) -> u64 {
        storage::require_not_paused(&env);
        storage::require_role(&env, Role::Manager, &manager);
        reputation::penalize(&env, &manager, &account, amount, env.ledger().timestamp())
    }

    pub fn set_reputation(env: Env, account: Address, score: u64) {
        storage::require_initialized(&env);
        let admin = storage::require_admin(&env);
        reputation::set_absolute(&env, &admin, &account, score, env.ledger().timestamp());
    }

    pub fn reputation(env: Env, account: Address) -> u64 {
        storage::require_initialized(&env);
        reputation::query(&env, &account, env.ledger().timestamp())
    }

    pub fn get_reputation_record(env: Env, account: Address) -> ReputationRecord {
        storage::require_initialized(&env);
        reputation::record(&env, &account)
    }
}
