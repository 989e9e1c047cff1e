//! Reusable preconditions, composed at the top of each entry point.

use soroban_sdk::{Address, Env};

use crate::types::{Project, Stream};
use crate::{storage, Error};

pub fn require_positive(amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// `caller` signed the invocation and owns the project.
pub fn require_owner(project: &Project, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if &project.owner != caller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// The stream's investor signed the invocation.
pub fn require_investor(stream: &Stream) {
    stream.investor.require_auth();
}

/// Run `f` while holding the per-project mutation lock.
///
/// A nested attempt on the same project fails with `Reentrant`. On error the
/// whole invocation is rolled back, lock included.
pub fn with_project_lock<T>(
    env: &Env,
    project_id: u64,
    f: impl FnOnce() -> Result<T, Error>,
) -> Result<T, Error> {
    if storage::is_locked(env, project_id) {
        return Err(Error::Reentrant);
    }
    storage::set_lock(env, project_id);
    let out = f()?;
    storage::clear_lock(env, project_id);
    Ok(out)
}
