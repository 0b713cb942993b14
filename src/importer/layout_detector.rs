// ==========================================
// 轨道几何检测分析系统 - 布局识别器
// ==========================================
// 依据: 轨检数据接入设计文档 - 阶段 1: 布局识别
// ==========================================
// 职责: 判定报告采用 Simplified(首行表头,按名取列)
//       还是 Complex(第5行表头,按列位取列)布局
// 红线: 显式两阶段探测协议,返回带标签的结果,
//       每个阶段的失败原因都是可检视的值,不做异常吞没
// ==========================================

use crate::importer::file_parser::RawGrid;
use std::collections::HashMap;

// ==========================================
// Simplified 布局: 必需列名
// ==========================================
// 列序无关,按（裁剪后的）列名判定; Value 列唯一,
// 峰值坐标拆成两列是 Simplified 布局的区分特征
pub const SIMPLIFIED_REQUIRED_COLUMNS: [&str; 6] =
    ["KM", "M", "Parameter", "Value", "Peak Lat", "Peak Long"];

/// Simplified 布局可选携带列（缺失时对应字段为空）
pub const SIMPLIFIED_OPTIONAL_COLUMNS: [&str; 4] = ["Length", "Speed", "TSC", "Track"];

// ==========================================
// Complex 布局: 位置声明模式
// ==========================================
// 表头名在该布局下不稳定,列序稳定,按零基列位取列。
// 模式在探测时一次性校验,错位文件立即以精确诊断失败。

/// Complex 布局表头所在行（零基,即第 5 行）
pub const COMPLEX_HEADER_ROW_INDEX: usize = 4;

pub const KM_POSITION: usize = 0;
pub const METER_POSITION: usize = 3;
pub const PARAMETER_POSITION: usize = 8;

/// 权威值候选列位,按注册顺序左→右取首个可解析者。
/// 上游导出历史上出现过整列右移 1-2 位的漂移,27/28 为容错回退;
/// 候选集合与顺序取自源导出的实测漂移,是否覆盖全部导出变体
/// 待领域专家确认。
pub const VALUE_CANDIDATE_POSITIONS: [usize; 3] = [26, 27, 28];

pub const LENGTH_POSITION: usize = 31;
pub const SPEED_POSITION: usize = 39;
pub const TSC_POSITION: usize = 44;
pub const TRACK_POSITION: usize = 55;
pub const PEAK_LAT_LONG_POSITION: usize = 62;

/// Complex 布局表头最小列数（最右声明列位 + 1）
pub const COMPLEX_MIN_COLUMNS: usize = PEAK_LAT_LONG_POSITION + 1;

// ==========================================
// 识别结果
// ==========================================

/// Simplified 布局表: 列名 → 列位索引 + 数据行
#[derive(Debug)]
pub struct SimplifiedTable {
    pub columns: HashMap<String, usize>,
    pub rows: Vec<Vec<String>>,
}

/// Complex 布局表: 数据行（列位取自声明模式）
#[derive(Debug)]
pub struct ComplexTable {
    pub rows: Vec<Vec<String>>,
}

/// 布局识别结果（带标签,Unrecognized 保留两个阶段各自的失败原因）
#[derive(Debug)]
pub enum LayoutDetection {
    Simplified(SimplifiedTable),
    Complex(ComplexTable),
    Unrecognized {
        simplified_reason: String,
        complex_reason: String,
    },
}

// ==========================================
// LayoutDetector - 布局识别器
// ==========================================
pub struct LayoutDetector;

impl LayoutDetector {
    /// 对原始网格执行两阶段布局探测
    ///
    /// Simplified 假设优先: 两种假设同时成立时判为 Simplified。
    /// 两种假设都在同一份内存网格上探测,无需回卷源。
    pub fn detect(&self, grid: RawGrid) -> LayoutDetection {
        // 阶段 1: Simplified 假设（首行表头）
        let simplified_reason = match Self::probe_simplified(&grid) {
            Ok(columns) => {
                let rows = grid.into_iter().skip(1).collect();
                return LayoutDetection::Simplified(SimplifiedTable { columns, rows });
            }
            Err(reason) => reason,
        };

        // 阶段 2: Complex 假设（第 5 行表头,位置模式）
        let complex_reason = match Self::probe_complex(&grid) {
            Ok(()) => {
                let rows = grid
                    .into_iter()
                    .skip(COMPLEX_HEADER_ROW_INDEX + 1)
                    .collect();
                return LayoutDetection::Complex(ComplexTable { rows });
            }
            Err(reason) => reason,
        };

        LayoutDetection::Unrecognized {
            simplified_reason,
            complex_reason,
        }
    }

    /// Simplified 探测: 首行必须覆盖全部必需列名
    fn probe_simplified(grid: &RawGrid) -> Result<HashMap<String, usize>, String> {
        let header = match grid.first() {
            Some(h) => h,
            None => return Err("文件无任何数据行".to_string()),
        };

        // 列名 → 列位（重名列取首个）
        let mut columns: HashMap<String, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            columns.entry(name.trim().to_string()).or_insert(idx);
        }

        let missing: Vec<&str> = SIMPLIFIED_REQUIRED_COLUMNS
            .iter()
            .filter(|name| !columns.contains_key(**name))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(format!("首行表头缺少必需列: {}", missing.join(", ")));
        }

        Ok(columns)
    }

    /// Complex 探测: 第 5 行存在且宽度覆盖全部声明列位
    fn probe_complex(grid: &RawGrid) -> Result<(), String> {
        if grid.len() <= COMPLEX_HEADER_ROW_INDEX {
            return Err(format!(
                "行数不足: 表头应在第 {} 行,实际仅 {} 行",
                COMPLEX_HEADER_ROW_INDEX + 1,
                grid.len()
            ));
        }

        let header_width = grid[COMPLEX_HEADER_ROW_INDEX].len();
        if header_width < COMPLEX_MIN_COLUMNS {
            return Err(format!(
                "表头列数不足: 声明模式需要至少 {} 列,实际 {} 列",
                COMPLEX_MIN_COLUMNS, header_width
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simplified_grid() -> RawGrid {
        vec![
            vec![
                "KM", "M", "Parameter", "Value", "Peak Lat", "Peak Long",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            vec!["12", "340", "Gage Wide", "1612.5", "-22.9", "-43.2"]
                .into_iter()
                .map(String::from)
                .collect(),
        ]
    }

    fn complex_grid(data_rows: usize) -> RawGrid {
        let mut grid: RawGrid = Vec::new();
        // 4 行元数据前导
        for i in 0..4 {
            grid.push(vec![format!("meta{}", i)]);
        }
        // 第 5 行表头: 63 列
        grid.push((0..COMPLEX_MIN_COLUMNS).map(|i| format!("col{}", i)).collect());
        // 数据行
        for r in 0..data_rows {
            let mut row = vec![String::new(); COMPLEX_MIN_COLUMNS];
            row[KM_POSITION] = "12".to_string();
            row[METER_POSITION] = "340".to_string();
            row[PARAMETER_POSITION] = "Gage Wide".to_string();
            row[VALUE_CANDIDATE_POSITIONS[0]] = format!("16{:02}", r);
            grid.push(row);
        }
        grid
    }

    #[test]
    fn test_detect_simplified() {
        let detection = LayoutDetector.detect(simplified_grid());
        match detection {
            LayoutDetection::Simplified(table) => {
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.columns["Parameter"], 2);
            }
            other => panic!("期望 Simplified,实际 {:?}", other),
        }
    }

    #[test]
    fn test_detect_complex() {
        let detection = LayoutDetector.detect(complex_grid(3));
        match detection {
            LayoutDetection::Complex(table) => assert_eq!(table.rows.len(), 3),
            other => panic!("期望 Complex,实际 {:?}", other),
        }
    }

    #[test]
    fn test_simplified_wins_when_both_valid() {
        // 首行同时满足 Simplified 必需列,且网格也可按 Complex 解析
        let mut grid = complex_grid(3);
        let mut header: Vec<String> = (0..COMPLEX_MIN_COLUMNS).map(|i| format!("c{}", i)).collect();
        header[0] = "KM".to_string();
        header[1] = "M".to_string();
        header[2] = "Parameter".to_string();
        header[3] = "Value".to_string();
        header[4] = "Peak Lat".to_string();
        header[5] = "Peak Long".to_string();
        grid.insert(0, header);

        let detection = LayoutDetector.detect(grid);
        assert!(matches!(detection, LayoutDetection::Simplified(_)));
    }

    #[test]
    fn test_unrecognized_carries_both_reasons() {
        // 首行缺必需列,且总行数不足以放下第 5 行表头
        let grid: RawGrid = vec![vec!["foo".to_string(), "bar".to_string()]];
        let detection = LayoutDetector.detect(grid);
        match detection {
            LayoutDetection::Unrecognized {
                simplified_reason,
                complex_reason,
            } => {
                assert!(simplified_reason.contains("缺少必需列"));
                assert!(complex_reason.contains("行数不足"));
            }
            other => panic!("期望 Unrecognized,实际 {:?}", other),
        }
    }

    #[test]
    fn test_complex_narrow_header_fails_with_diagnostic() {
        // 第 5 行存在但列数不足: 错位文件快速失败,给出精确诊断
        let mut grid: RawGrid = Vec::new();
        for i in 0..5 {
            grid.push(vec![format!("r{}", i), "x".to_string()]);
        }
        grid.push(vec!["data".to_string()]);

        let detection = LayoutDetector.detect(grid);
        match detection {
            LayoutDetection::Unrecognized { complex_reason, .. } => {
                assert!(complex_reason.contains("表头列数不足"));
            }
            other => panic!("期望 Unrecognized,实际 {:?}", other),
        }
    }

    #[test]
    fn test_empty_grid_unrecognized() {
        let detection = LayoutDetector.detect(Vec::new());
        assert!(matches!(detection, LayoutDetection::Unrecognized { .. }));
    }
}
