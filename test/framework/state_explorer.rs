//! # State Explorer
//!
//! Executes `PoolAction` sequences against a `VitalShareHarness` and checks
//! every snapshot and transition invariant after each step.
//!
//! Rejected actions are normal: the contracts are expected to refuse many
//! randomly generated steps. Only invariant violations and host errors the
//! contracts did not report count as failures.

extern crate std;

use soroban_sdk::Address;
use std::boxed::Box;
use std::vec::Vec;

use super::generators::PoolAction;
use super::invariants::{
    InvariantSet, RemoveConservation, SubmitConservation, TransitionInvariant,
    TransitionInvariantSet,
};
use super::{ActionOutcome, SystemSnapshot, TestRunSummary, VitalShareHarness};

/// Every entry point the explorer can reach.
pub const ENTRY_POINTS: &[&str] = &[
    "register_data",
    "update_consent",
    "anonymize_and_submit",
    "remove_from_pool",
    "delete_entry",
    "fund_reward_pool",
    "claim_reward",
    "set_reward_rate",
];

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub max_steps: usize,
    /// Stop at the first violation.
    pub fail_fast: bool,
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<SystemSnapshot>,
    pub action_log: Vec<(PoolAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of actions that completed successfully.
    pub fn accepted(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| *o == ActionOutcome::Ok)
            .count()
    }
}

pub struct StateExplorer<'a> {
    harness: &'a VitalShareHarness,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    owners: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    pub fn new(
        harness: &'a VitalShareHarness,
        invariants: InvariantSet,
        config: ExplorerConfig,
        owners: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions: TransitionInvariantSet::system_defaults(),
            config,
            owners,
        }
    }

    /// Default config with the built-in invariant sets.
    pub fn with_defaults(harness: &'a VitalShareHarness, owners: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::system_defaults(),
            ExplorerConfig::default(),
            owners,
        )
    }

    pub fn explore(&mut self, actions: &[PoolAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut before = self.harness.snapshot(&self.owners);
        if self.config.record_snapshots {
            snapshots.push(before.clone());
        }

        for action in actions.iter().take(self.config.max_steps) {
            let (outcome, extra) = self.execute_action(action);
            summary.actions_executed += 1;
            if let Some(entry_point) = action_entry_point(action) {
                summary.entry_points_hit.insert(entry_point.into());
            }
            if let ActionOutcome::UnexpectedError(_) = outcome {
                summary.unexpected_errors += 1;
            }
            action_log.push((action.clone(), outcome));

            let after = self.harness.snapshot(&self.owners);
            summary.invariant_checks += 1;

            let mut violations = self.invariants.check_all(&after);
            violations.extend(self.transitions.check_all(&before, &after));
            if let Some(inv) = extra {
                if let Err(msg) = inv.check(&before, &after) {
                    violations.push((inv.name().into(), msg));
                }
            }

            let failed = !violations.is_empty();
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(after.clone());
            }
            before = after;

            if failed && self.config.fail_fast {
                break;
            }
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn owner(&self, user_index: usize) -> &Address {
        &self.owners[user_index % self.owners.len()]
    }

    /// Map a generated index onto the owner's entries or the index just past
    /// them, which is where a deleted trailing entry lived.
    fn entry(&self, owner: &Address, entry_index: u32) -> u32 {
        entry_index % (self.harness.wallet.get_entry_count(owner) + 1)
    }

    /// Run one action. Successful submits and removes also return the
    /// transition invariant specific to that step.
    fn execute_action(
        &self,
        action: &PoolAction,
    ) -> (ActionOutcome, Option<Box<dyn TransitionInvariant>>) {
        let h = self.harness;
        let pool_id = h.pool_id;
        match action {
            PoolAction::RegisterEntry {
                user_index,
                matching,
                consent,
            } => {
                let owner = self.owner(*user_index);
                let input = if *matching {
                    h.entry_input("fitness", "activity")
                } else {
                    h.entry_input("sleep", "rest")
                };
                let outcome = match h.wallet.try_register_data(owner, &input) {
                    Ok(Ok(index)) if *consent => {
                        match h.wallet.try_update_consent(owner, &index, &true) {
                            Ok(_) => ActionOutcome::Ok,
                            Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                            Err(Err(e)) => unexpected(e),
                        }
                    }
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::SetConsent {
                user_index,
                entry_index,
                consent,
            } => {
                let owner = self.owner(*user_index);
                let index = self.entry(owner, *entry_index);
                let outcome = match h.wallet.try_update_consent(owner, &index, consent) {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::Submit {
                user_index,
                entry_index,
                value,
            } => {
                let owner = self.owner(*user_index);
                let index = self.entry(owner, *entry_index);
                match h.pool.try_anonymize_and_submit(
                    owner,
                    &index,
                    &pool_id,
                    &h.anon_hash(),
                    value,
                ) {
                    Ok(_) => {
                        h.track_submission(owner, index);
                        (
                            ActionOutcome::Ok,
                            Some(Box::new(SubmitConservation {
                                pool_id,
                                value: *value,
                            })),
                        )
                    }
                    Err(Ok(e)) => (ActionOutcome::ExpectedError(e as u32), None),
                    Err(Err(e)) => (unexpected(e), None),
                }
            }
            PoolAction::Remove {
                user_index,
                entry_index,
            } => {
                let owner = self.owner(*user_index);
                let index = self.entry(owner, *entry_index);
                let stored = h.pool.get_contribution(owner, &pool_id, &index);
                match h.pool.try_remove_from_pool(owner, &pool_id, &index) {
                    Ok(_) => (
                        ActionOutcome::Ok,
                        stored.map(|value| {
                            Box::new(RemoveConservation { pool_id, value })
                                as Box<dyn TransitionInvariant>
                        }),
                    ),
                    Err(Ok(e)) => (ActionOutcome::ExpectedError(e as u32), None),
                    Err(Err(e)) => (unexpected(e), None),
                }
            }
            PoolAction::DeleteEntry { user_index } => {
                let owner = self.owner(*user_index);
                let index = h.wallet.get_entry_count(owner).saturating_sub(1);
                let outcome = match h.wallet.try_delete_entry(owner, &index) {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::Fund { amount } => {
                h.env.mint_tokens(&h.token, &h.funder, *amount);
                let outcome = match h.ledger.try_fund_reward_pool(&h.funder, amount) {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::Claim {
                user_index,
                entry_index,
            } => {
                let owner = self.owner(*user_index);
                let index = self.entry(owner, *entry_index);
                let outcome = match h.ledger.try_claim_reward(owner, &pool_id, &index) {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::SetRewardRate { rate } => {
                let outcome = match h.ledger.try_set_reward_rate(rate) {
                    Ok(_) => ActionOutcome::Ok,
                    Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
                    Err(Err(e)) => unexpected(e),
                };
                (outcome, None)
            }
            PoolAction::AdvanceTime { delta } => {
                h.env.advance_time(*delta);
                (ActionOutcome::Ok, None)
            }
        }
    }
}

fn unexpected<E: core::fmt::Debug>(e: E) -> ActionOutcome {
    ActionOutcome::UnexpectedError(std::format!("{:?}", e))
}

fn action_entry_point(action: &PoolAction) -> Option<&'static str> {
    match action {
        PoolAction::RegisterEntry { .. } => Some("register_data"),
        PoolAction::SetConsent { .. } => Some("update_consent"),
        PoolAction::Submit { .. } => Some("anonymize_and_submit"),
        PoolAction::Remove { .. } => Some("remove_from_pool"),
        PoolAction::DeleteEntry { .. } => Some("delete_entry"),
        PoolAction::Fund { .. } => Some("fund_reward_pool"),
        PoolAction::Claim { .. } => Some("claim_reward"),
        PoolAction::SetRewardRate { .. } => Some("set_reward_rate"),
        PoolAction::AdvanceTime { .. } => None,
    }
}
