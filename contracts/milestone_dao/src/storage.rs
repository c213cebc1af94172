//! Shared storage access: configuration in instance storage, per-record data
//! in persistent storage, and the role and pause guards every entry point runs.

use soroban_sdk::{panic_with_error, token::TokenClient, Address, Env, IntoVal, TryFromVal, Val};

use crate::errors::DaoError;
use crate::types::{
    DataKey, DecayParams, GovernanceParams, RegistryParams, Role, TreasuryParams,
    PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_THRESHOLD,
};

pub fn require_initialized(env: &Env) {
    if !env.storage().instance().has(&DataKey::Admin) {
        panic_with_error!(env, DaoError::NotInitialized);
    }
}

/// Guard for every state-changing non-admin entry point. Also extends the
/// instance TTL so configuration lives as long as the records it governs.
pub fn require_not_paused(env: &Env) {
    require_initialized(env);
    if is_paused(env) {
        panic_with_error!(env, DaoError::ContractPaused);
    }
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn admin(env: &Env) -> Address {
    instance_get(env, &DataKey::Admin)
}

/// Loads the stored admin and requires its authorization for this invocation.
pub fn require_admin(env: &Env) -> Address {
    let admin = admin(env);
    admin.require_auth();
    admin
}

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    if *account == admin(env) {
        return true;
    }
    env.storage().persistent().has(&role_key(role, account))
}

/// Authenticates `caller` and checks it belongs to `role` (the admin always does).
pub fn require_role(env: &Env, role: Role, caller: &Address) {
    require_initialized(env);
    caller.require_auth();
    if !has_role(env, role, caller) {
        panic_with_error!(env, DaoError::Unauthorized);
    }
}

pub fn set_role(env: &Env, role: Role, account: &Address, granted: bool) {
    let key = role_key(role, account);
    if granted {
        persistent_set(env, &key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

fn role_key(role: Role, account: &Address) -> DataKey {
    match role {
        Role::Verifier => DataKey::Verifier(account.clone()),
        Role::Manager => DataKey::Manager(account.clone()),
    }
}

pub fn token(env: &Env) -> TokenClient<'_> {
    let address: Address = instance_get(env, &DataKey::Token);
    TokenClient::new(env, &address)
}

pub fn registry_params(env: &Env) -> RegistryParams {
    instance_get(env, &DataKey::RegistryParams)
}

pub fn governance_params(env: &Env) -> GovernanceParams {
    instance_get(env, &DataKey::GovernanceParams)
}

pub fn treasury_params(env: &Env) -> TreasuryParams {
    instance_get(env, &DataKey::TreasuryParams)
}

pub fn decay_params(env: &Env) -> DecayParams {
    instance_get(env, &DataKey::DecayParams)
}

/// Reads a configuration entry; a missing entry means `init` never ran.
pub fn instance_get<V>(env: &Env, key: &DataKey) -> V
where
    V: TryFromVal<Env, Val>,
{
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::NotInitialized))
}

/// Next value of a monotonically increasing ID counter; the first ID is 1.
pub fn next_id(env: &Env, key: &DataKey) -> u64 {
    let current: u64 = env.storage().instance().get(key).unwrap_or(0u64);
    let next = current
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow));
    env.storage().instance().set(key, &next);
    next
}

pub fn persistent_set<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}

pub fn checked_add(env: &Env, a: i128, b: i128) -> i128 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow))
}

pub fn checked_sub(env: &Env, a: i128, b: i128) -> i128 {
    a.checked_sub(b)
        .unwrap_or_else(|| panic_with_error!(env, DaoError::Overflow))
}
