use soroban_sdk::{contractclient, Env};

/// Source of the voting token's total supply, used as the quorum base.
/// A token contract that exposes `total_supply` can act as its own oracle.
#[contractclient(name = "SupplyOracleClient")]
pub trait SupplyOracle {
    fn total_supply(env: Env) -> i128;
}
