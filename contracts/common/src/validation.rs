use soroban_sdk::String;

/// Maximum category length accepted by both the wallet and the pools.
pub const MAX_CATEGORY_LEN: u32 = 30;

/// Returns true when the byte length of `value` lies in `min..=max`.
pub fn len_within(value: &String, min: u32, max: u32) -> bool {
    (min..=max).contains(&value.len())
}

pub fn is_valid_category(category: &String) -> bool {
    len_within(category, 0, MAX_CATEGORY_LEN)
}
