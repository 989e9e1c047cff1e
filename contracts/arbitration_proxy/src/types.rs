use soroban_sdk::{contracttype, Address, Bytes};

/// Proxy configuration, written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub bridge: Address,
    /// The StreamFund contract this proxy answers to.
    pub home: Address,
    pub arbitrator: Address,
    /// Opaque arbitrator parameters (court, juror count, ...).
    pub extra_data: Bytes,
    /// Asset the arbitrator is paid in.
    pub fee_asset: Address,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RequestStatus {
    /// Fee collected, waiting for the home contract to answer.
    Requested = 0,
    Disputed = 1,
    Ruled = 2,
}

/// A project's request for arbitration, funded by `payer`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeRequest {
    pub project_id: u64,
    pub payer: Address,
    /// Fee asset held for this request.
    pub deposit: i128,
    pub status: RequestStatus,
    pub dispute_id: Option<u64>,
}

impl DisputeRequest {
    /// `true` while the request still blocks a new one for the same project.
    pub fn is_open(&self) -> bool {
        self.status != RequestStatus::Ruled
    }
}
