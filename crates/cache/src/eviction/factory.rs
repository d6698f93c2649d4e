//! Factory for creating haunting strategies from configuration

use hauntfs_core::Result;

use super::policies::{LruPolicy, ReaperPolicy};
use crate::config::HaunterConfig;
use crate::haunter::{new_lru_haunter_strategy, new_reaper_haunter_strategy, Haunter};

/// Build the haunting strategy described by `config`
pub fn create_haunter(config: &HaunterConfig) -> Result<Box<dyn Haunter>> {
    config.validate()?;

    match config {
        HaunterConfig::Reaper(reaper) => Ok(new_reaper_haunter_strategy(ReaperPolicy::new(
            reaper.expiry(),
            reaper.period(),
        ))),
        HaunterConfig::Lru(lru) => Ok(new_lru_haunter_strategy(LruPolicy::new(
            lru.max_items,
            lru.max_size,
            lru.period(),
        ))),
    }
}
