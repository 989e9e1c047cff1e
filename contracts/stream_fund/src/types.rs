//! # Types
//!
//! Data structures shared by every module of the StreamFund contract.
//!
//! ## Config / State split
//!
//! A [`Project`] is stored as two ledger entries, exactly like every other
//! write-heavy record here:
//!
//! - [`ProjectConfig`]: written once at creation, never mutated.
//! - [`ProjectState`]: rewritten on every join, exit and withdrawal.
//!
//! The public API returns the reconstructed [`Project`].
//!
//! ## Two legs
//!
//! The project escrows the **sell** asset; investors contribute the **fund**
//! asset. Field names follow the protocol's historical naming:
//!
//! | Field                        | Asset | Meaning                                  |
//! |------------------------------|-------|------------------------------------------|
//! | `Stream.invest_sell_deposit` | fund  | amount the investor put in               |
//! | `Stream.invest_fund_deposit` | sell  | what that buys at the project's ratio    |
//! | `Stream.rate_per_second_sell`| fund  | flows investor → project                 |
//! | `Stream.rate_per_second_fund`| sell  | flows project → investor                 |
//!
//! ## Arbitration lifecycle
//!
//! ```text
//! (absent) ─► Reclaimed ─► RequestReceived ─► Disputed ─► Resolved
//!                │  ▲  └─► RequestRejected ──┘   │
//!                │  └────────────────────────────┘ (failure / rejection)
//!                └──────────────► Resolved          (response timeout)
//! ```

use soroban_sdk::{contracttype, Address};

/// Contract configuration, written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Cross-chain transport contract; the only caller allowed into
    /// `receive_message`.
    pub bridge: Address,
    /// Paired arbitration proxy on the remote side.
    pub remote: Address,
}

/// Immutable project terms, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub owner: Address,
    pub sell_asset: Address,
    pub fund_asset: Address,
    pub sell_deposit: i128,
    pub fund_deposit: i128,
    pub start_time: u64,
    pub stop_time: u64,
    pub lock_period: u64,
}

/// Mutable project totals, updated on every join, exit and withdrawal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub actual_sell_deposit: i128,
    pub actual_fund_deposit: i128,
    pub withdrawal_amount: i128,
    pub refunded: bool,
}

/// Full on-chain view of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Monotonic identifier, never reused.
    pub id: u64,
    /// Fundraiser; receives the fund asset and any refund.
    pub owner: Address,
    /// Asset escrowed by the project and streamed to investors.
    pub sell_asset: Address,
    /// Asset contributed by investors and streamed to the project.
    pub fund_asset: Address,
    /// Sell-asset amount escrowed at creation.
    pub sell_deposit: i128,
    /// Cap on fund-asset contributions.
    pub fund_deposit: i128,
    /// Sell-asset amount matched against current contributions.
    pub actual_sell_deposit: i128,
    /// Fund-asset amount currently committed by investors.
    pub actual_fund_deposit: i128,
    /// Fund asset already withdrawn by the owner.
    pub withdrawal_amount: i128,
    pub start_time: u64,
    pub stop_time: u64,
    /// Seconds after `stop_time` before unsold inventory can be refunded.
    pub lock_period: u64,
    pub refunded: bool,
}

impl Project {
    pub fn from_parts(config: ProjectConfig, state: ProjectState) -> Self {
        Project {
            id: config.id,
            owner: config.owner,
            sell_asset: config.sell_asset,
            fund_asset: config.fund_asset,
            sell_deposit: config.sell_deposit,
            fund_deposit: config.fund_deposit,
            actual_sell_deposit: state.actual_sell_deposit,
            actual_fund_deposit: state.actual_fund_deposit,
            withdrawal_amount: state.withdrawal_amount,
            start_time: config.start_time,
            stop_time: config.stop_time,
            lock_period: config.lock_period,
            refunded: state.refunded,
        }
    }

    pub fn state(&self) -> ProjectState {
        ProjectState {
            actual_sell_deposit: self.actual_sell_deposit,
            actual_fund_deposit: self.actual_fund_deposit,
            withdrawal_amount: self.withdrawal_amount,
            refunded: self.refunded,
        }
    }

    /// Sell-asset amount matching `fund` at the project's declared ratio.
    pub fn sell_equivalent(&self, fund: i128) -> i128 {
        fund * self.sell_deposit / self.fund_deposit
    }

    /// Fund-asset amount matching `sell` at the ratio of current
    /// contributions, the one the balance formula converts with.
    pub fn fund_equivalent(&self, sell: i128) -> Option<i128> {
        if self.actual_sell_deposit <= 0 {
            return None;
        }
        Some(self.actual_fund_deposit * sell / self.actual_sell_deposit)
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamStatus {
    Active = 0,
    /// Tombstone: fields are zeroed, the id stays reserved.
    Canceled = 1,
}

/// One investor position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stream {
    pub id: u64,
    pub project_id: u64,
    pub investor: Address,
    pub invest_sell_deposit: i128,
    pub invest_fund_deposit: i128,
    pub rate_per_second_sell: i128,
    pub rate_per_second_fund: i128,
    pub start_time: u64,
    pub stop_time: u64,
    /// Sell asset already withdrawn by the investor.
    pub withdrawal_amount: i128,
    pub status: StreamStatus,
}

impl Stream {
    /// Tombstoned copy: every amount zeroed, identity kept.
    pub fn tombstone(&self) -> Self {
        Stream {
            id: self.id,
            project_id: self.project_id,
            investor: self.investor.clone(),
            invest_sell_deposit: 0,
            invest_fund_deposit: 0,
            rate_per_second_sell: 0,
            rate_per_second_fund: 0,
            start_time: 0,
            stop_time: 0,
            withdrawal_amount: 0,
            status: StreamStatus::Canceled,
        }
    }
}

/// Per-project rate sums behind the O(1) balance formula.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AggregateBalance {
    /// Σ `rate_per_second_fund` over active streams.
    pub sum_rate_fund: i128,
    /// Σ `(join - start) * rate_per_second_fund` over late joiners.
    pub sum_calibration: i128,
    /// Σ accrued sell asset of streams that left before the end.
    pub sum_exited: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitMode {
    Normal = 0,
    ExitedByArbitration = 1,
}

/// Per-project exit bookkeeping. Snapshots are written once, by settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancellationState {
    pub exit_stop_time: u64,
    pub exit_sell_balance_snapshot: i128,
    pub exit_fund_balance_snapshot: i128,
    /// Σ `invest_sell_deposit` over active streams.
    pub active_invested_total: i128,
    /// `active_invested_total` at the moment of settlement.
    pub exit_invested_total: i128,
    /// Fund asset held for investors at settlement, drawn down by each
    /// arbitration payout.
    pub exit_fund_remaining: i128,
    pub exit_mode: ExitMode,
    pub last_reclaim_at: u64,
}

impl CancellationState {
    pub fn new(stop_time: u64) -> Self {
        CancellationState {
            exit_stop_time: stop_time,
            exit_sell_balance_snapshot: 0,
            exit_fund_balance_snapshot: 0,
            active_invested_total: 0,
            exit_invested_total: 0,
            exit_fund_remaining: 0,
            exit_mode: ExitMode::Normal,
            last_reclaim_at: 0,
        }
    }

    pub fn is_exited(&self) -> bool {
        self.exit_mode == ExitMode::ExitedByArbitration
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArbitrationState {
    Reclaimed = 1,
    RequestReceived = 2,
    RequestRejected = 3,
    Disputed = 4,
    Resolved = 5,
}

/// The single dispute slot of a project. An absent slot is the initial state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Arbitration {
    /// Investor who asked for the reclaim; `None` for a slot opened only to
    /// reject an unsolicited remote request.
    pub investor_requester: Option<Address>,
    pub project_owner: Address,
    pub state: ArbitrationState,
    /// Start of the response window; `0` when no reclaim is pending.
    pub reclaimed_at: u64,
}

/// A `(sell, fund)` balance pair.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Balance {
    pub sell: i128,
    pub fund: i128,
}

/// Why a stream is leaving its project.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitReason {
    InvestorInitiated,
    ArbitrationExit,
}
