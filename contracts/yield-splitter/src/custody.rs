use soroban_sdk::{token, Address, Env};

use crate::errors::Error;

/// Custody of underlying assets held by the contract.
///
/// Pulls use the allowance model: the owner approves this contract as spender
/// and the contract moves funds with `transfer_from`. Balances and allowances
/// are checked up front so shortfalls surface as contract errors rather than
/// token-contract traps.
pub struct Custody;

impl Custody {
    /// Pull `amount` of `asset` from `from` into the contract.
    pub fn transfer_in(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), Error> {
        let client = token::Client::new(env, asset);
        let this = env.current_contract_address();

        if client.balance(from) < amount {
            return Err(Error::InsufficientBalance);
        }
        if client.allowance(from, &this) < amount {
            return Err(Error::InsufficientAllowance);
        }
        client.transfer_from(&this, from, &this, &amount);
        Ok(())
    }

    /// Send `amount` of `asset` from the contract to `to`.
    pub fn transfer_out(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        let client = token::Client::new(env, asset);
        let this = env.current_contract_address();
        if client.balance(&this) < amount {
            return Err(Error::InsufficientBalance);
        }
        client.transfer(&this, to, &amount);
        Ok(())
    }
}
