use crate::error::{Error, Result};
use crate::events::decoder::decode;
use crate::types::entry::Entry;
use crate::types::partition::partition_for_post_code;

/// Decodes a payload and picks the partition its postal code belongs to.
///
/// Fails with `Error::Decode` for payloads the workers would drop, and with
/// `Error::Unpartitionable` when the postal code has no leading digit.
pub fn route(payload: &[u8], partitions: i32) -> Result<(Entry, i32)> {
    let entry = decode(payload)?;

    let partition = partition_for_post_code(&entry.post_code, partitions)
        .ok_or_else(|| Error::Unpartitionable(entry.post_code.clone()))?;

    Ok((entry, partition))
}
