// ==========================================
// 轨道几何检测分析系统 - 符合性引擎
// ==========================================
// 依据: 轨检数据接入设计文档 - 阶段 4: 符合性评定
// ==========================================
// 职责: 按所选等级限值表评定每条记录的 status/delta
// 红线: (记录, 规则) 的纯函数,记录间无顺序依赖;
//       delta ≥ 0 恒成立,delta > 0 当且仅当 OUT_OF_LIMIT
// ==========================================

use crate::config::tolerance::{ToleranceRule, ToleranceTable};
use crate::domain::measurement::MeasurementRecord;
use crate::domain::types::{ConformityStatus, LimitMode};

// ==========================================
// ConformityEngine - 符合性引擎
// ==========================================
pub struct ConformityEngine;

impl ConformityEngine {
    /// 单值判定（纯函数）
    ///
    /// # 判定规则
    /// - MAX: v > max 判超,delta = v - max
    /// - MIN: v < min 判超,delta = min - v
    /// - ABS_MAX: |v| > max 判超,delta = |v| - max
    /// - 其余情形: COMPLIANT,delta = 0
    pub fn judge(value: f64, rule: &ToleranceRule) -> (ConformityStatus, f64) {
        let exceedance = match rule.mode {
            LimitMode::Max => value - rule.max,
            LimitMode::Min => rule.min - value,
            LimitMode::AbsMax => value.abs() - rule.max,
        };

        if exceedance > 0.0 {
            (ConformityStatus::OutOfLimit, exceedance)
        } else {
            (ConformityStatus::Compliant, 0.0)
        }
    }

    /// 评定单条记录,回填 status/delta
    ///
    /// 参数无对应规则 → NOT_APPLICABLE,delta = 0
    pub fn evaluate_record(&self, record: &mut MeasurementRecord, table: &ToleranceTable) {
        match table.lookup(&record.parameter) {
            Some(rule) => {
                let (status, delta) = Self::judge(record.value, rule);
                record.status = status;
                record.delta = delta;
            }
            None => {
                record.status = ConformityStatus::NotApplicable;
                record.delta = 0.0;
            }
        }
    }

    /// 批量评定（每条记录独立,幂等）
    pub fn evaluate(&self, records: &mut [MeasurementRecord], table: &ToleranceTable) {
        for record in records.iter_mut() {
            self.evaluate_record(record, table);
        }

        tracing::debug!(
            "符合性评定完成: {} 条记录,等级 {}",
            records.len(),
            table.class
        );
    }
}
