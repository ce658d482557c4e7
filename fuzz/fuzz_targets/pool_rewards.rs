#![no_main]

use std::collections::BTreeMap;

use anonymization::{AnonymizationContract, AnonymizationContractClient};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_distribution::{RewardDistributionContract, RewardDistributionContractClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Bytes, Env, String, Symbol,
};
use user_wallet::{DataEntryInput, UserWalletContract, UserWalletContractClient};

/// Submission, withdrawal and reward actions across a few owners.
///
/// Values are drawn from the full `u64` range so that out-of-range
/// aggregates and overflow paths are reached as well.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { owner: u8, consent: bool },
    Submit { owner: u8, entry: u8, value: u64 },
    Remove { owner: u8, entry: u8 },
    Fund { amount: u32 },
    Claim { owner: u8, entry: u8 },
    SetRate { rate: u8 },
}

const OWNERS: usize = 3;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let authority = Address::generate(&env);

    let wallet_id = env.register(UserWalletContract, ());
    let wallet = UserWalletContractClient::new(&env, &wallet_id);

    let pool_addr = env.register(AnonymizationContract, ());
    let pool = AnonymizationContractClient::new(&env, &pool_addr);
    pool.set_authority_contract(&authority);
    pool.set_wallet_contract(&wallet_id);
    let pool_id = pool.create_pool(
        &authority,
        &String::from_str(&env, "activity"),
        &Symbol::new(&env, "fitness"),
        &0,
        &u64::MAX,
    );

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let ledger = RewardDistributionContractClient::new(
        &env,
        &env.register(RewardDistributionContract, ()),
    );
    ledger.set_authority_contract(&authority);
    ledger.set_token_contract(&token.address());
    ledger.set_wallet_contract(&wallet_id);
    ledger.set_pool_contract(&pool_addr);

    let funder = Address::generate(&env);
    let owners: Vec<Address> = (0..OWNERS)
        .map(|_| {
            let o = Address::generate(&env);
            wallet.initialize_wallet(&o);
            o
        })
        .collect();

    // Model of live contributions: (owner, entry) -> value.
    let mut live: BTreeMap<(usize, u32), u64> = BTreeMap::new();
    let mut funded: i128 = 0;

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Register { owner, consent } => {
                let o = &owners[owner as usize % OWNERS];
                let input = DataEntryInput {
                    data_hash: Bytes::from_array(&env, &[7u8; 32]),
                    source: String::from_str(&env, "Oura"),
                    data_type: Symbol::new(&env, "fitness"),
                    description: String::from_str(&env, ""),
                    encryption_key: None,
                    category: String::from_str(&env, "activity"),
                    value_range_min: 0,
                    value_range_max: 1,
                    access_level: 0,
                };
                if let Ok(Ok(index)) = wallet.try_register_data(o, &input) {
                    if consent {
                        wallet.update_consent(o, &index, &true);
                    }
                }
            }
            FuzzAction::Submit { owner, entry, value } => {
                let idx = owner as usize % OWNERS;
                let entry = entry as u32 % 4;
                let hash = Bytes::from_array(&env, &[1u8; 32]);
                if let Ok(Ok(())) =
                    pool.try_anonymize_and_submit(&owners[idx], &entry, &pool_id, &hash, &value)
                {
                    assert!(live.insert((idx, entry), value).is_none());
                }
            }
            FuzzAction::Remove { owner, entry } => {
                let idx = owner as usize % OWNERS;
                let entry = entry as u32 % 4;
                let removed = pool.try_remove_from_pool(&owners[idx], &pool_id, &entry).is_ok();
                assert_eq!(removed, live.remove(&(idx, entry)).is_some());
            }
            FuzzAction::Fund { amount } => {
                let amount = amount as i128;
                StellarAssetClient::new(&env, &token.address()).mint(&funder, &amount.max(1));
                if ledger.try_fund_reward_pool(&funder, &amount).is_ok() {
                    funded += amount;
                }
            }
            FuzzAction::Claim { owner, entry } => {
                let idx = owner as usize % OWNERS;
                let entry = entry as u32 % 4;
                let _ = ledger.try_claim_reward(&owners[idx], &pool_id, &entry);
            }
            FuzzAction::SetRate { rate } => {
                let _ = ledger.try_set_reward_rate(&(rate as u32));
            }
        }

        // ── Invariant: pool aggregates equal the model ──
        let p = pool.get_pool(&pool_id);
        let sum: u128 = live.values().map(|v| *v as u128).sum();
        assert_eq!(p.entry_count as usize, live.len());
        assert_eq!(p.total_value as u128, sum);

        // ── Invariant: funding is either paid out or still held ──
        let balance = ledger.get_reward_balance();
        assert!(balance >= 0);
        assert_eq!(funded, balance + ledger.get_total_rewards());
        assert_eq!(
            TokenClient::new(&env, &token.address()).balance(&ledger.address),
            balance
        );
    }
});
