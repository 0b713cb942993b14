// ==========================================
// 轨道几何检测分析系统 - 行分类清洗器
// ==========================================
// 依据: 轨检数据接入设计文档 - 阶段 3: 行分类与清洗
// ==========================================
// 职责: 剔除元数据标记行 / 数值强转 / 位置键派生
// 红线: 过滤顺序不可调换（诊断计数相对前序阶段报告）;
//       行级数值强转失败静默丢弃但计数,不作为错误传播
// ==========================================

use crate::config::tolerance::IgnoredParameterSet;
use crate::domain::measurement::{
    format_location, CleaningDiagnostics, MeasurementRecord, RawMeasurementRow,
};
use crate::domain::types::ConformityStatus;
use crate::importer::column_reconciler::parse_decimal;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;

/// 位置字段整数强转
///
/// 宽松解析后向零截断; 解析失败或负值 → 0（位置失效但不丢行）。
fn coerce_position(raw: &str) -> u32 {
    match parse_decimal(raw) {
        Some(v) if v > 0.0 => v.trunc() as u32,
        _ => 0,
    }
}

// ==========================================
// RowCleaner - 行分类清洗器
// ==========================================
pub struct RowCleaner;

impl RowCleaner {
    /// 对归并后的行执行顺序过滤,产出规范记录 + 清洗诊断
    ///
    /// # 过滤顺序（不可调换）
    /// 1. 剔除参数名为空的行
    /// 2. 参数名 TRIM; 剔除元数据标记行（线路资产/文本标记）
    /// 3. 记录候选测量行数（数值过滤前口径）
    /// 4. 权威值为 None 的行丢弃（静默计数）
    /// 5. km/meter 整数强转,失败默认 0（不丢行）
    /// 6. 派生位置键 "{km}+{meter:03}"
    ///
    /// # 返回
    /// - Ok((records, diagnostics)): 清洗结果与行损失诊断
    /// - Err(NoValidMeasurements): 全部行被丢弃（携带诊断）
    pub fn clean(
        &self,
        rows: Vec<RawMeasurementRow>,
        ignored: &IgnoredParameterSet,
    ) -> ImportResult<(Vec<MeasurementRecord>, CleaningDiagnostics)> {
        // 步骤 1-2: 参数名过滤
        let mut raw_parameters: BTreeSet<String> = BTreeSet::new();
        let mut candidates: Vec<(String, RawMeasurementRow)> = Vec::new();

        for row in rows {
            let parameter = row.parameter.trim().to_string();
            if parameter.is_empty() {
                continue;
            }

            // 过滤前口径: 元数据标记也计入去重参数名集合
            raw_parameters.insert(parameter.clone());

            if ignored.contains(&parameter) {
                continue;
            }

            candidates.push((parameter, row));
        }

        // 步骤 3: 候选测量行数
        let candidate_rows = candidates.len();

        // 步骤 4-6: 数值过滤与位置派生
        let mut records: Vec<MeasurementRecord> = Vec::new();
        for (parameter, row) in candidates {
            let value = match row.value {
                Some(v) => v,
                None => {
                    tracing::trace!("丢弃非数值行 {} ({})", row.row_number, parameter);
                    continue;
                }
            };

            let km = coerce_position(&row.km);
            let meter = coerce_position(&row.meter);

            records.push(MeasurementRecord {
                km,
                meter,
                location: format_location(km, meter),
                parameter,
                value,
                length: row.length,
                speed: row.speed.as_deref().and_then(parse_decimal),
                tsc: row.tsc.as_deref().and_then(parse_decimal),
                track: row.track,
                peak_lat_long: row.peak_lat_long,
                status: ConformityStatus::NotApplicable,
                delta: 0.0,
            });
        }

        let diagnostics = CleaningDiagnostics {
            candidate_rows,
            kept_rows: records.len(),
            raw_parameters,
        };

        if records.is_empty() {
            return Err(ImportError::NoValidMeasurements {
                candidate_rows: diagnostics.candidate_rows,
                raw_parameters: diagnostics.raw_parameters.into_iter().collect(),
            });
        }

        tracing::debug!(
            "清洗完成: 候选 {} 行,保留 {} 行,数值丢弃 {} 行",
            diagnostics.candidate_rows,
            diagnostics.kept_rows,
            diagnostics.dropped_non_numeric()
        );

        Ok((records, diagnostics))
    }
}
