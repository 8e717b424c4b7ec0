use anchor_lang::prelude::*;

/// Block number used by the mining engine: the current slot.
pub fn current_block_number() -> Result<u64> {
    Ok(Clock::get()?.slot)
}

/// Wall-clock time used by cooldowns.
pub fn current_timestamp() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}
