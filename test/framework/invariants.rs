//! # System Invariants
//!
//! Invariants checked against `SystemSnapshot`s after every action an
//! explorer executes. Snapshot invariants look at one state; transition
//! invariants compare a state with its successor.
//!
//! Each check is linear in the number of live contributions and claims.

extern crate std;

use std::boxed::Box;
use std::string::{String, ToString};
use std::vec::Vec;

use super::SystemSnapshot;

// ── Invariant Trait ──────────────────────────────────────────────────────────

pub trait Invariant {
    /// Human-readable name for violation reports.
    fn name(&self) -> &str;

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String>;
}

// ── Pool Invariants ──────────────────────────────────────────────────────────

/// **Aggregate Consistency**: `pool.total_value == Σ(live contributions)`.
///
/// Broken by a submit that adds without recording the contribution, or a
/// remove that subtracts the wrong value.
pub struct PoolTotalMatchesContributions;

impl Invariant for PoolTotalMatchesContributions {
    fn name(&self) -> &str {
        "pool.total_value == sum(contributions)"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        for pool in &snapshot.pools {
            let sum = pool.sum_contributions();
            if pool.total_value as u128 != sum {
                return Err(std::format!(
                    "Pool {} total_value ({}) != sum of contributions ({})",
                    pool.pool_id,
                    pool.total_value,
                    sum
                ));
            }
        }
        Ok(())
    }
}

/// **Count Consistency**: `pool.entry_count == |live contributions|`.
pub struct PoolCountMatchesContributions;

impl Invariant for PoolCountMatchesContributions {
    fn name(&self) -> &str {
        "pool.entry_count == count(contributions)"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        for pool in &snapshot.pools {
            if pool.entry_count as usize != pool.contributions.len() {
                return Err(std::format!(
                    "Pool {} entry_count ({}) != live contributions ({})",
                    pool.pool_id,
                    pool.entry_count,
                    pool.contributions.len()
                ));
            }
        }
        Ok(())
    }
}

/// Every live contribution lies inside its pool's value range.
pub struct ContributionsWithinRange;

impl Invariant for ContributionsWithinRange {
    fn name(&self) -> &str {
        "min_value <= contribution <= max_value"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        for pool in &snapshot.pools {
            for c in &pool.contributions {
                if c.value < pool.min_value || c.value > pool.max_value {
                    return Err(std::format!(
                        "Pool {} holds {} from owner #{} entry {}, outside [{}, {}]",
                        pool.pool_id,
                        c.value,
                        c.owner_index,
                        c.entry_index,
                        pool.min_value,
                        pool.max_value
                    ));
                }
            }
        }
        Ok(())
    }
}

// ── Ledger Invariants ────────────────────────────────────────────────────────

/// **Funds Conservation**: `Σ(inbound) == balance + Σ(outbound)`.
///
/// A violation means the ledger created or lost spendable balance.
pub struct RewardFundsConserved;

impl Invariant for RewardFundsConserved {
    fn name(&self) -> &str {
        "inbound == reward_balance + outbound"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        if snapshot.total_inbound != snapshot.reward_balance + snapshot.total_outbound {
            return Err(std::format!(
                "Inbound ({}) != balance ({}) + outbound ({})",
                snapshot.total_inbound,
                snapshot.reward_balance,
                snapshot.total_outbound
            ));
        }
        Ok(())
    }
}

/// `total_rewards` equals both the sum of claim records and the outbound log.
pub struct ClaimsMatchTotalRewards;

impl Invariant for ClaimsMatchTotalRewards {
    fn name(&self) -> &str {
        "sum(claims) == total_rewards == outbound"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        let claimed = snapshot.sum_claims();
        if claimed != snapshot.total_rewards || claimed != snapshot.total_outbound {
            return Err(std::format!(
                "Claims sum to {}, total_rewards is {}, outbound is {}",
                claimed,
                snapshot.total_rewards,
                snapshot.total_outbound
            ));
        }
        Ok(())
    }
}

/// The tracked balance is fully backed by tokens the ledger actually holds.
pub struct LedgerBalanceBacked;

impl Invariant for LedgerBalanceBacked {
    fn name(&self) -> &str {
        "token.balance(ledger) == reward_balance"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        if snapshot.ledger_token_balance != snapshot.reward_balance {
            return Err(std::format!(
                "Ledger holds {} tokens but tracks a balance of {}",
                snapshot.ledger_token_balance,
                snapshot.reward_balance
            ));
        }
        Ok(())
    }
}

pub struct NonNegativeBalance;

impl Invariant for NonNegativeBalance {
    fn name(&self) -> &str {
        "reward_balance >= 0"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        if snapshot.reward_balance < 0 {
            return Err(std::format!(
                "Reward balance is negative: {}",
                snapshot.reward_balance
            ));
        }
        Ok(())
    }
}

pub struct RewardRateInBounds;

impl Invariant for RewardRateInBounds {
    fn name(&self) -> &str {
        "1 <= reward_rate <= 100"
    }

    fn check(&self, snapshot: &SystemSnapshot) -> Result<(), String> {
        if snapshot.reward_rate == 0 || snapshot.reward_rate > 100 {
            return Err(std::format!(
                "Reward rate out of bounds: {}",
                snapshot.reward_rate
            ));
        }
        Ok(())
    }
}

// ── Invariant Set ────────────────────────────────────────────────────────────

/// A composable set of invariants checked together.
pub struct InvariantSet {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    /// All built-in pool and ledger invariants.
    pub fn system_defaults() -> Self {
        let mut set = Self::new();
        set.add(Box::new(PoolTotalMatchesContributions));
        set.add(Box::new(PoolCountMatchesContributions));
        set.add(Box::new(ContributionsWithinRange));
        set.add(Box::new(RewardFundsConserved));
        set.add(Box::new(ClaimsMatchTotalRewards));
        set.add(Box::new(LedgerBalanceBacked));
        set.add(Box::new(NonNegativeBalance));
        set.add(Box::new(RewardRateInBounds));
        set
    }

    pub fn add(&mut self, invariant: Box<dyn Invariant>) {
        self.invariants.push(invariant);
    }

    /// `(invariant name, violation message)` for every failing invariant.
    pub fn check_all(&self, snapshot: &SystemSnapshot) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(snapshot) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }

    /// Panic with a report listing every violation.
    pub fn assert_all(&self, snapshot: &SystemSnapshot) {
        let violations = self.check_all(snapshot);
        if !violations.is_empty() {
            let mut report = String::from("Invariant violations detected:\n");
            for (name, msg) in &violations {
                report.push_str(&std::format!("  [{}]: {}\n", name, msg));
            }
            panic!("{}", report);
        }
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

impl Default for InvariantSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Transition Invariants ────────────────────────────────────────────────────

pub trait TransitionInvariant {
    fn name(&self) -> &str;
    fn check(&self, before: &SystemSnapshot, after: &SystemSnapshot) -> Result<(), String>;
}

/// **At-Most-Once**: a claim, once recorded, never changes or disappears.
pub struct ClaimsAreImmutable;

impl TransitionInvariant for ClaimsAreImmutable {
    fn name(&self) -> &str {
        "recorded claims are never altered"
    }

    fn check(&self, before: &SystemSnapshot, after: &SystemSnapshot) -> Result<(), String> {
        for claim in &before.claims {
            if !after.claims.contains(claim) {
                return Err(std::format!(
                    "Claim for owner #{} pool {} entry {} ({}) changed or vanished",
                    claim.owner_index,
                    claim.pool_id,
                    claim.entry_index,
                    claim.amount
                ));
            }
        }
        Ok(())
    }
}

pub struct TotalRewardsMonotonic;

impl TransitionInvariant for TotalRewardsMonotonic {
    fn name(&self) -> &str {
        "total_rewards never decreases"
    }

    fn check(&self, before: &SystemSnapshot, after: &SystemSnapshot) -> Result<(), String> {
        if after.total_rewards < before.total_rewards {
            return Err(std::format!(
                "total_rewards went backwards: {} -> {}",
                before.total_rewards,
                after.total_rewards
            ));
        }
        Ok(())
    }
}

/// On a successful submit of `value` to `pool_id`, the total grows by
/// exactly `value` and the count by one.
pub struct SubmitConservation {
    pub pool_id: u32,
    pub value: u64,
}

impl TransitionInvariant for SubmitConservation {
    fn name(&self) -> &str {
        "submit adds exactly its value to the pool"
    }

    fn check(&self, before: &SystemSnapshot, after: &SystemSnapshot) -> Result<(), String> {
        let (Some(b), Some(a)) = (before.pool(self.pool_id), after.pool(self.pool_id)) else {
            return Err(std::format!("Pool {} missing from snapshot", self.pool_id));
        };
        if a.total_value as u128 != b.total_value as u128 + self.value as u128
            || a.entry_count != b.entry_count + 1
        {
            return Err(std::format!(
                "Submitting {}: ({}, {}) -> ({}, {})",
                self.value,
                b.total_value,
                b.entry_count,
                a.total_value,
                a.entry_count
            ));
        }
        Ok(())
    }
}

/// On a successful remove of a contribution worth `value`, the total shrinks
/// by exactly `value` and the count by one.
pub struct RemoveConservation {
    pub pool_id: u32,
    pub value: u64,
}

impl TransitionInvariant for RemoveConservation {
    fn name(&self) -> &str {
        "remove subtracts exactly the stored value"
    }

    fn check(&self, before: &SystemSnapshot, after: &SystemSnapshot) -> Result<(), String> {
        let (Some(b), Some(a)) = (before.pool(self.pool_id), after.pool(self.pool_id)) else {
            return Err(std::format!("Pool {} missing from snapshot", self.pool_id));
        };
        if b.total_value < self.value
            || a.total_value != b.total_value - self.value
            || a.entry_count + 1 != b.entry_count
        {
            return Err(std::format!(
                "Removing {}: ({}, {}) -> ({}, {})",
                self.value,
                b.total_value,
                b.entry_count,
                a.total_value,
                a.entry_count
            ));
        }
        Ok(())
    }
}

pub struct TransitionInvariantSet {
    invariants: Vec<Box<dyn TransitionInvariant>>,
}

impl TransitionInvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    /// Transition invariants that hold for every action.
    pub fn system_defaults() -> Self {
        let mut set = Self::new();
        set.add(Box::new(ClaimsAreImmutable));
        set.add(Box::new(TotalRewardsMonotonic));
        set
    }

    pub fn add(&mut self, invariant: Box<dyn TransitionInvariant>) {
        self.invariants.push(invariant);
    }

    pub fn check_all(
        &self,
        before: &SystemSnapshot,
        after: &SystemSnapshot,
    ) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(before, after) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }
}

impl Default for TransitionInvariantSet {
    fn default() -> Self {
        Self::new()
    }
}
