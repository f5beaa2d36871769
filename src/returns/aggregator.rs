//! 加權投資組合彙總

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::error::{PortfolioError, PortfolioResult};
use crate::domain_types::{PortfolioSeries, PortfolioWeight, ReturnObservation, ReturnSeries};

/// 成分序列日期不一致時的對齊方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// 所有成分的日期集合必須完全相同，否則回報 `MisalignedSeries`
    #[default]
    Strict,
    /// 取所有日期的聯集，缺少的日期以 0 計入
    UnionZeroFill,
}

impl AlignmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentPolicy::Strict => "strict",
            AlignmentPolicy::UnionZeroFill => "union_zero_fill",
        }
    }
}

/// 附帶權重的成分序列
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSeries {
    pub weight: PortfolioWeight,
    pub series: ReturnSeries,
}

impl WeightedSeries {
    pub fn new(weight: PortfolioWeight, series: ReturnSeries) -> Self {
        Self { weight, series }
    }
}

/// 投資組合彙總器
///
/// 每個成分的所有數值欄位先乘上權重，再依日期逐欄加總。
/// 加總依成分的呼叫順序進行，不做正規化、再平衡或複利。
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioAggregator {
    policy: AlignmentPolicy,
}

impl PortfolioAggregator {
    pub fn new(policy: AlignmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AlignmentPolicy {
        self.policy
    }

    pub fn aggregate(&self, constituents: &[WeightedSeries]) -> PortfolioResult<PortfolioSeries> {
        let weights: Vec<PortfolioWeight> = constituents.iter().map(|c| c.weight.clone()).collect();
        let dates = self.aligned_dates(constituents)?;

        let mut totals: BTreeMap<NaiveDate, ReturnObservation> = BTreeMap::new();
        for constituent in constituents {
            let weight = constituent.weight.weight;
            for &date in &dates {
                let contribution = constituent
                    .series
                    .get(date)
                    .map(|row| row.scaled(weight))
                    .unwrap_or_else(|| ReturnObservation::zero(date));

                match totals.entry(date) {
                    Entry::Vacant(slot) => {
                        slot.insert(contribution);
                    }
                    Entry::Occupied(mut slot) => slot.get_mut().accumulate(&contribution),
                }
            }
            debug!("已計入成分 {} (權重 {})", constituent.weight.ticker, weight);
        }

        info!(
            "投資組合彙總完成: {} 個成分，{} 筆，對齊方式 {}",
            constituents.len(),
            totals.len(),
            self.policy.as_str()
        );
        Ok(PortfolioSeries::new(weights, ReturnSeries::from_indexed(totals)))
    }

    /// 依對齊方式決定輸出的日期集合
    fn aligned_dates(&self, constituents: &[WeightedSeries]) -> PortfolioResult<BTreeSet<NaiveDate>> {
        let Some(reference) = constituents.first() else {
            return Ok(BTreeSet::new());
        };

        match self.policy {
            AlignmentPolicy::Strict => {
                let dates: BTreeSet<NaiveDate> = reference.series.dates().into_iter().collect();
                for other in &constituents[1..] {
                    if other.series.len() != dates.len() || other.series.iter().any(|row| !dates.contains(&row.date)) {
                        return Err(PortfolioError::MisalignedSeries {
                            ticker: other.weight.ticker.clone(),
                            reference: reference.weight.ticker.clone(),
                            expected_rows: dates.len(),
                            actual_rows: other.series.len(),
                        });
                    }
                }
                Ok(dates)
            }
            AlignmentPolicy::UnionZeroFill => Ok(constituents
                .iter()
                .flat_map(|c| c.series.iter().map(|row| row.date))
                .collect()),
        }
    }
}
