use soroban_sdk::BytesN;
use vitalshare_common::{is_valid_category, len_within, DataType};

use crate::types::{DataEntry, DataEntryInput};
use crate::WalletError;

const MIN_SOURCE_LEN: u32 = 1;
const MAX_SOURCE_LEN: u32 = 50;
const MAX_DESCRIPTION_LEN: u32 = 200;
const MAX_ACCESS_LEVEL: u32 = 3;

/// Turns raw input into a storable entry.
///
/// Checks run in a fixed order because each one maps to its own error code:
/// hash, source, data type, description, key, category, range, access level.
pub fn validate_entry(input: DataEntryInput, timestamp: u64) -> Result<DataEntry, WalletError> {
    let data_hash =
        BytesN::<32>::try_from(input.data_hash).map_err(|_| WalletError::InvalidHash)?;

    if !len_within(&input.source, MIN_SOURCE_LEN, MAX_SOURCE_LEN) {
        return Err(WalletError::InvalidSource);
    }

    let data_type =
        DataType::from_symbol(&input.data_type).ok_or(WalletError::InvalidDataType)?;

    if !len_within(&input.description, 0, MAX_DESCRIPTION_LEN) {
        return Err(WalletError::InvalidDescription);
    }

    let encryption_key = match input.encryption_key {
        Some(key) => Some(BytesN::<64>::try_from(key).map_err(|_| WalletError::InvalidKey)?),
        None => None,
    };

    if !is_valid_category(&input.category) {
        return Err(WalletError::InvalidCategory);
    }

    if input.value_range_min > input.value_range_max {
        return Err(WalletError::InvalidRange);
    }

    if input.access_level > MAX_ACCESS_LEVEL {
        return Err(WalletError::InvalidAccessLevel);
    }

    Ok(DataEntry {
        data_hash,
        timestamp,
        source: input.source,
        data_type,
        description: input.description,
        consent: false,
        encryption_key,
        category: input.category,
        value_range_min: input.value_range_min,
        value_range_max: input.value_range_max,
        access_level: input.access_level,
    })
}
