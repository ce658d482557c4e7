#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env, String, Symbol};
use user_wallet::{DataEntryInput, UserWalletContract, UserWalletContractClient};

/// Raw entry fields. Lengths are left unbounded so the validators see
/// oversized and empty inputs alike.
#[derive(Arbitrary, Debug)]
pub struct FuzzEntry {
    hash: Vec<u8>,
    source: std::string::String,
    data_type: u8,
    description: std::string::String,
    key: Option<Vec<u8>>,
    category: std::string::String,
    min: u64,
    max: u64,
    access_level: u32,
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register(FuzzEntry),
    Consent { index: u8, consent: bool },
    LogAccess { index: u8, purpose: std::string::String, granted: bool },
    Delete { index: u8 },
}

const DATA_TYPES: [&str; 4] = ["fitness", "vitals", "sleep", "diet"];

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let client = UserWalletContractClient::new(&env, &env.register(UserWalletContract, ()));
    let owner = Address::generate(&env);
    let accessor = Address::generate(&env);
    client.initialize_wallet(&owner);

    let mut expected_count = 0u32;

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Register(e) => {
                let input = DataEntryInput {
                    data_hash: Bytes::from_slice(&env, &e.hash),
                    source: String::from_str(&env, &e.source),
                    data_type: Symbol::new(&env, DATA_TYPES[e.data_type as usize % 4]),
                    description: String::from_str(&env, &e.description),
                    encryption_key: e.key.map(|k| Bytes::from_slice(&env, &k)),
                    category: String::from_str(&env, &e.category),
                    value_range_min: e.min,
                    value_range_max: e.max,
                    access_level: e.access_level,
                };
                if let Ok(Ok(index)) = client.try_register_data(&owner, &input) {
                    assert_eq!(index, expected_count);
                    expected_count += 1;

                    // Accepted entries satisfy every field constraint.
                    let entry = client.get_entry(&owner, &index);
                    assert!(entry.value_range_min <= entry.value_range_max);
                    assert!(entry.access_level <= 3);
                    assert!(!entry.consent);
                }
            }
            FuzzAction::Consent { index, consent } => {
                let _ = client.try_update_consent(&owner, &(index as u32), &consent);
            }
            FuzzAction::LogAccess {
                index,
                purpose,
                granted,
            } => {
                let purpose = String::from_str(&env, &purpose);
                let _ = client.try_log_access(&owner, &(index as u32), &accessor, &purpose, &granted);
            }
            FuzzAction::Delete { index } => {
                if client.try_delete_entry(&owner, &(index as u32)).is_ok() {
                    expected_count -= 1;
                }
            }
        }

        // ── Invariant: wallet metadata tracks the entry list exactly ──
        assert_eq!(client.get_entry_count(&owner), expected_count);
        assert_eq!(client.get_wallet(&owner).entry_count, expected_count);
    }
});
