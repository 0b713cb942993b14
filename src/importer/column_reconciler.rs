// ==========================================
// 轨道几何检测分析系统 - 列归并器
// ==========================================
// 依据: 轨检数据接入设计文档 - 阶段 2: 列归并
// ==========================================
// 职责: Simplified 布局: 峰值坐标两列合一;
//       Complex 布局: 候选值列 first-valid-of-N 归并
// ==========================================

use crate::domain::measurement::RawMeasurementRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::layout_detector::{
    ComplexTable, SimplifiedTable, KM_POSITION, LENGTH_POSITION, METER_POSITION,
    PARAMETER_POSITION, PEAK_LAT_LONG_POSITION, SPEED_POSITION, TRACK_POSITION, TSC_POSITION,
    VALUE_CANDIDATE_POSITIONS,
};

/// 宽松十进制解析
///
/// 剥除全部空白,逗号小数点统一为句点,再按 f64 解析;
/// 不可解析或非有限值 → None。
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized.is_empty() {
        return None;
    }

    normalized
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 空字符串标准化为 None
fn normalize_null(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 按列位取单元格,行宽不足时为空串（CSV 行长度允许不一致）
fn cell(row: &[String], position: usize) -> &str {
    row.get(position).map(|s| s.as_str()).unwrap_or("")
}

// ==========================================
// ColumnReconciler - 列归并器
// ==========================================
pub struct ColumnReconciler;

impl ColumnReconciler {
    /// Simplified 布局归并
    ///
    /// Value 列宽松解析为权威值; "Peak Lat" + "Peak Long" 两列
    /// 拼接为 "{lat},{long}" 复合字段（字符串拼接,非数值计算）,
    /// 源坐标列不再保留。
    pub fn reconcile_simplified(
        &self,
        table: SimplifiedTable,
    ) -> ImportResult<Vec<RawMeasurementRow>> {
        if table.rows.is_empty() {
            return Err(ImportError::EmptyDataset);
        }

        // 必需列位已由布局探测保证存在
        let col = |name: &str| -> usize { table.columns[name] };
        let km_idx = col("KM");
        let meter_idx = col("M");
        let parameter_idx = col("Parameter");
        let value_idx = col("Value");
        let peak_lat_idx = col("Peak Lat");
        let peak_long_idx = col("Peak Long");

        // 可选携带列
        let length_idx = table.columns.get("Length").copied();
        let speed_idx = table.columns.get("Speed").copied();
        let tsc_idx = table.columns.get("TSC").copied();
        let track_idx = table.columns.get("Track").copied();

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let lat = cell(row, peak_lat_idx);
                let long = cell(row, peak_long_idx);
                let peak = if lat.is_empty() && long.is_empty() {
                    None
                } else {
                    Some(format!("{},{}", lat, long))
                };

                RawMeasurementRow {
                    km: cell(row, km_idx).to_string(),
                    meter: cell(row, meter_idx).to_string(),
                    parameter: cell(row, parameter_idx).to_string(),
                    value: parse_decimal(cell(row, value_idx)),
                    length: length_idx.and_then(|idx| normalize_null(cell(row, idx))),
                    speed: speed_idx.and_then(|idx| normalize_null(cell(row, idx))),
                    tsc: tsc_idx.and_then(|idx| normalize_null(cell(row, idx))),
                    track: track_idx.and_then(|idx| normalize_null(cell(row, idx))),
                    peak_lat_long: peak,
                    row_number: i + 1,
                }
            })
            .collect();

        Ok(rows)
    }

    /// Complex 布局归并
    ///
    /// 权威值 = 候选列位中按注册顺序首个可解析者（first-valid-of-N,
    /// 对上游导出列漂移的容错,不是业务规则）; 全部不可解析 → None。
    pub fn reconcile_complex(&self, table: ComplexTable) -> ImportResult<Vec<RawMeasurementRow>> {
        if table.rows.is_empty() {
            return Err(ImportError::EmptyDataset);
        }

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let value = VALUE_CANDIDATE_POSITIONS
                    .iter()
                    .find_map(|&pos| parse_decimal(cell(row, pos)));

                RawMeasurementRow {
                    km: cell(row, KM_POSITION).to_string(),
                    meter: cell(row, METER_POSITION).to_string(),
                    parameter: cell(row, PARAMETER_POSITION).to_string(),
                    value,
                    length: normalize_null(cell(row, LENGTH_POSITION)),
                    speed: normalize_null(cell(row, SPEED_POSITION)),
                    tsc: normalize_null(cell(row, TSC_POSITION)),
                    track: normalize_null(cell(row, TRACK_POSITION)),
                    peak_lat_long: normalize_null(cell(row, PEAK_LAT_LONG_POSITION)),
                    row_number: i + 1,
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::layout_detector::COMPLEX_MIN_COLUMNS;
    use std::collections::HashMap;

    fn complex_row() -> Vec<String> {
        let mut row = vec![String::new(); COMPLEX_MIN_COLUMNS];
        row[KM_POSITION] = "12".to_string();
        row[METER_POSITION] = "340".to_string();
        row[PARAMETER_POSITION] = "Gage Wide".to_string();
        row
    }

    #[test]
    fn test_parse_decimal_comma_separator() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal("1612.5"), Some(1612.5));
        assert_eq!(parse_decimal(" 16 40 "), Some(1640.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_complex_value_coalesce_first_valid_wins() {
        // 候选 [26: 空, 27: "12,5", 28: "99"] → 12.5
        let mut row = complex_row();
        row[VALUE_CANDIDATE_POSITIONS[1]] = "12,5".to_string();
        row[VALUE_CANDIDATE_POSITIONS[2]] = "99".to_string();

        let table = ComplexTable { rows: vec![row] };
        let rows = ColumnReconciler.reconcile_complex(table).unwrap();

        assert_eq!(rows[0].value, Some(12.5));
    }

    #[test]
    fn test_complex_value_all_candidates_unparseable() {
        let mut row = complex_row();
        row[VALUE_CANDIDATE_POSITIONS[0]] = "n/a".to_string();

        let table = ComplexTable { rows: vec![row] };
        let rows = ColumnReconciler.reconcile_complex(table).unwrap();

        assert_eq!(rows[0].value, None);
        assert_eq!(rows[0].parameter, "Gage Wide");
    }

    #[test]
    fn test_complex_empty_dataset() {
        let table = ComplexTable { rows: Vec::new() };
        let result = ColumnReconciler.reconcile_complex(table);
        assert!(matches!(result, Err(ImportError::EmptyDataset)));
    }

    fn simplified_table(rows: Vec<Vec<&str>>) -> SimplifiedTable {
        let names = [
            "KM", "M", "Parameter", "Value", "Peak Lat", "Peak Long", "TSC",
        ];
        let columns: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect();
        SimplifiedTable {
            columns,
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn test_simplified_peak_merge() {
        let table = simplified_table(vec![vec![
            "12", "340", "Gage Wide", "1612.5", "-22.90", "-43.21", "3",
        ]]);
        let rows = ColumnReconciler.reconcile_simplified(table).unwrap();

        assert_eq!(rows[0].peak_lat_long.as_deref(), Some("-22.90,-43.21"));
        assert_eq!(rows[0].value, Some(1612.5));
        assert_eq!(rows[0].tsc.as_deref(), Some("3"));
    }

    #[test]
    fn test_simplified_peak_both_empty_is_none() {
        let table = simplified_table(vec![vec!["12", "340", "Crosslevel", "4", "", "", ""]]);
        let rows = ColumnReconciler.reconcile_simplified(table).unwrap();

        assert_eq!(rows[0].peak_lat_long, None);
    }

    #[test]
    fn test_simplified_empty_dataset() {
        let table = simplified_table(Vec::new());
        let result = ColumnReconciler.reconcile_simplified(table);
        assert!(matches!(result, Err(ImportError::EmptyDataset)));
    }
}
