// crates/gc_fields/src/accretion.rs

//! 吸积屏蔽
//!
//! 吸积记录每行给出 (sink ID, 被吸积气体 ID)。标记为 1 的气体粒子
//! 是最终被 sink 吸积的物质，屏蔽后的分子场只保留这部分气体。

use std::collections::HashSet;
use tracing::{debug, info};

/// 一条吸积记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccretionRecord {
    /// sink 粒子 ID
    pub sink_id: u64,
    /// 被吸积的气体粒子 ID
    pub gas_id: u64,
}

/// 吸积记录表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccretionLog {
    records: Vec<AccretionRecord>,
}

impl AccretionLog {
    /// 由记录构造
    pub fn from_records(records: Vec<AccretionRecord>) -> Self {
        Self { records }
    }

    /// 全部记录
    pub fn records(&self) -> &[AccretionRecord] {
        &self.records
    }

    /// 记录数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 所有被吸积气体 ID
    pub fn accreted_ids(&self) -> HashSet<u64> {
        self.records.iter().map(|r| r.gas_id).collect()
    }

    /// 所属 sink 仍存在的被吸积气体 ID
    pub fn accreted_ids_for(&self, sink_ids: &[u64]) -> HashSet<u64> {
        let sinks: HashSet<u64> = sink_ids.iter().copied().collect();
        let accreted: HashSet<u64> = self
            .records
            .iter()
            .filter(|r| sinks.contains(&r.sink_id))
            .map(|r| r.gas_id)
            .collect();
        debug!(
            rows = self.records.len(),
            sinks = sinks.len(),
            accreted = accreted.len(),
            "筛选现存 sink 的吸积记录"
        );
        accreted
    }

    /// 被吸积标记：gas_ids 出现在任一记录中为 1，否则为 0
    pub fn accreted_mask(&self, gas_ids: &[u64]) -> Vec<f64> {
        let accreted = self.accreted_ids();
        let mask = flag(gas_ids, &accreted);
        info!(
            rows = self.records.len(),
            flagged = count_nonzero(&mask),
            "吸积标记"
        );
        mask
    }

    /// 丰度屏蔽：只考虑 sink 仍存在的记录，被吸积粒子为 1，其余为 0
    pub fn existing_sink_mask(&self, gas_ids: &[u64], sink_ids: &[u64]) -> Vec<f64> {
        let accreted = self.accreted_ids_for(sink_ids);
        let mask = flag(gas_ids, &accreted);
        info!(
            rows = self.records.len(),
            flagged = count_nonzero(&mask),
            "丰度屏蔽"
        );
        mask
    }
}

fn flag(ids: &[u64], set: &HashSet<u64>) -> Vec<f64> {
    ids.iter()
        .map(|id| if set.contains(id) { 1.0 } else { 0.0 })
        .collect()
}

fn count_nonzero(values: &[f64]) -> usize {
    values.iter().filter(|&&v| v != 0.0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> AccretionLog {
        AccretionLog::from_records(vec![
            AccretionRecord { sink_id: 100, gas_id: 2 },
            AccretionRecord { sink_id: 100, gas_id: 4 },
            AccretionRecord { sink_id: 200, gas_id: 5 },
        ])
    }

    #[test]
    fn test_accreted_mask() {
        let mask = log().accreted_mask(&[1, 2, 3, 4, 5]);
        assert_eq!(mask, vec![0.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_existing_sink_mask() {
        // sink 200 已不在快照中，其记录不参与屏蔽
        let mask = log().existing_sink_mask(&[1, 2, 3, 4, 5], &[100]);
        assert_eq!(mask, vec![0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_no_sinks_flags_nothing() {
        let mask = log().existing_sink_mask(&[2, 4, 5], &[]);
        assert_eq!(mask, vec![0.0, 0.0, 0.0]);
    }
}
