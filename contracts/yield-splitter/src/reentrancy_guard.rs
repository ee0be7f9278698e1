use soroban_sdk::Env;

use crate::errors::Error;
use crate::storage::DataKey;

/// Global cross-function reentrancy guard.
///
/// Every state-changing entrypoint takes the lock on entry and releases it on
/// successful exit. If the entrypoint fails, the host rolls the lock write
/// back together with everything else the call touched.
pub struct ReentrancyGuard;

impl ReentrancyGuard {
    /// Returns true if the lock is currently held.
    pub fn is_locked(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Lock)
            .unwrap_or(false)
    }

    /// Takes the lock, failing with `ReentrantCall` if it is already held.
    pub fn enter(env: &Env) -> Result<(), Error> {
        if Self::is_locked(env) {
            return Err(Error::ReentrantCall);
        }
        env.storage().instance().set(&DataKey::Lock, &true);
        Ok(())
    }

    pub fn exit(env: &Env) {
        env.storage().instance().set(&DataKey::Lock, &false);
    }

    /// Runs `f` with the lock held.
    pub fn guarded<T, F>(env: &Env, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        Self::enter(env)?;
        let result = f()?;
        Self::exit(env);
        Ok(result)
    }
}
