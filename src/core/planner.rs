use anyhow::Result;

/// Ordered block numbers fetched together and committed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch(Vec<u64>);

impl Batch {
    pub fn new(blocks: Vec<u64>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[u64] {
        &self.0
    }

    pub fn first(&self) -> Option<u64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<u64> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ascending block range for the reward pipeline, walked in fixed strides.
///
/// Every stride is fetched whole, so the last batch may reach past `to`
/// when the range length is not a multiple of the stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardRange {
    from: u64,
    to: u64,
    stride: usize,
}

impl RewardRange {
    pub fn new(from: u64, to: u64, stride: usize) -> Result<Self> {
        if from > to {
            anyhow::bail!("Invalid block range: from ({from}) is greater than to ({to})");
        }
        if stride == 0 {
            anyhow::bail!("Batch size must be greater than zero");
        }
        Ok(Self { from, to, stride })
    }

    pub fn from(&self) -> u64 {
        self.from
    }

    pub fn to(&self) -> u64 {
        self.to
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Lazily yields the batches; call again to restart from `from`.
    pub fn batches(&self) -> impl Iterator<Item = Batch> + Clone + use<> {
        let stride = self.stride;
        (self.from..=self.to).step_by(stride).map(move |start| {
            let end = start.saturating_add(stride as u64);
            Batch::new((start..end).collect())
        })
    }

    /// Last block that will be fetched, including the stride overshoot.
    pub fn last_fetched(&self) -> u64 {
        let span = self.to - self.from;
        let stride = self.stride as u64;
        let last_start = self.from + span / stride * stride;
        last_start.saturating_add(stride - 1)
    }
}

/// The `count` blocks preceding `block_number`, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashRange {
    block_number: u64,
    count: u64,
}

impl HashRange {
    pub fn new(block_number: u64, count: u64) -> Result<Self> {
        if count > block_number {
            anyhow::bail!(
                "Cannot collect {count} hashes before block {block_number}: range would go below genesis"
            );
        }
        Ok(Self {
            block_number,
            count,
        })
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn blocks(&self) -> impl Iterator<Item = u64> + Clone + use<> {
        let block_number = self.block_number;
        (1..=self.count).map(move |offset| block_number - offset)
    }

    /// The whole range as a single batch.
    pub fn batch(&self) -> Batch {
        Batch::new(self.blocks().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(range: &RewardRange) -> Vec<Vec<u64>> {
        range.batches().map(|b| b.blocks().to_vec()).collect()
    }

    #[test]
    fn test_reward_range_exact_multiple() -> Result<()> {
        let range = RewardRange::new(100, 109, 5)?;
        assert_eq!(
            collect(&range),
            vec![vec![100, 101, 102, 103, 104], vec![105, 106, 107, 108, 109]]
        );
        assert_eq!(range.last_fetched(), 109);
        Ok(())
    }

    #[test]
    fn test_reward_range_overshoots_to_batch_boundary() -> Result<()> {
        let range = RewardRange::new(100, 106, 5)?;
        let batches = collect(&range);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1], vec![105, 106, 107, 108, 109]);
        assert_eq!(range.last_fetched(), 109);
        Ok(())
    }

    #[test]
    fn test_reward_range_single_block() -> Result<()> {
        let range = RewardRange::new(42, 42, 5)?;
        assert_eq!(collect(&range), vec![vec![42, 43, 44, 45, 46]]);
        Ok(())
    }

    #[test]
    fn test_reward_range_no_gaps_or_duplicates() -> Result<()> {
        let range = RewardRange::new(7, 61, 5)?;
        let flat: Vec<u64> = range.batches().flat_map(|b| b.blocks().to_vec()).collect();
        let expected: Vec<u64> = (7..=range.last_fetched()).collect();
        assert_eq!(flat, expected);
        assert!(flat.contains(&61));
        Ok(())
    }

    #[test]
    fn test_reward_range_is_restartable() -> Result<()> {
        let range = RewardRange::new(0, 14, 5)?;
        let first_pass = collect(&range);
        let second_pass = collect(&range);
        assert_eq!(first_pass, second_pass);

        let iter = range.batches();
        assert_eq!(iter.clone().count(), 3);
        assert_eq!(iter.count(), 3);
        Ok(())
    }

    #[test]
    fn test_reward_range_rejects_invalid_input() {
        assert!(RewardRange::new(10, 9, 5).is_err());
        assert!(RewardRange::new(10, 20, 0).is_err());
    }

    #[test]
    fn test_hash_range_descends_from_previous_block() -> Result<()> {
        let range = HashRange::new(7840001, 3)?;
        assert_eq!(
            range.blocks().collect::<Vec<_>>(),
            vec![7840000, 7839999, 7839998]
        );
        assert_eq!(range.batch().len(), 3);
        Ok(())
    }

    #[test]
    fn test_hash_range_empty_and_bounds() -> Result<()> {
        assert!(HashRange::new(10, 0)?.batch().is_empty());
        assert_eq!(HashRange::new(3, 3)?.blocks().last(), Some(0));
        assert!(HashRange::new(3, 4).is_err());
        Ok(())
    }
}
