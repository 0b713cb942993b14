// ==========================================
// 轨道几何检测分析系统 - 测试辅助工具
// ==========================================
// 职责: 构造两种布局的检测报告 CSV 固定样本
// ==========================================

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// Complex 布局声明模式的最小列数
pub const COMPLEX_WIDTH: usize = 63;

/// 将文本行写入带 .csv 后缀的临时文件
pub fn write_csv_file(lines: &[String]) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时 CSV 失败");
    for line in lines {
        writeln!(file, "{}", line).expect("写入临时 CSV 失败");
    }
    file.flush().expect("刷新临时 CSV 失败");
    file
}

/// Complex 布局: 4 行元数据前导（测量车导出报告头）
pub fn complex_preamble() -> Vec<String> {
    vec![
        "Track Geometry Inspection Report".to_string(),
        "Vehicle: EM-120".to_string(),
        "Line: Central,Direction: Down".to_string(),
        "Survey Date: 2026-08-01".to_string(),
    ]
}

/// Complex 布局: 第 5 行表头（63 列,列名不稳定,仅列位有意义）
pub fn complex_header() -> String {
    let mut cells = vec![String::new(); COMPLEX_WIDTH];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = format!("H{}", i);
    }
    cells[0] = "Km".to_string();
    cells[3] = "M".to_string();
    cells[8] = "Parameter".to_string();
    cells[26] = "Value".to_string();
    cells.join(",")
}

/// Complex 布局数据行: 值候选列 26/27/28 逐一可控
pub fn complex_data_row(
    km: &str,
    meter: &str,
    parameter: &str,
    v26: &str,
    v27: &str,
    v28: &str,
) -> String {
    let mut cells = vec![String::new(); COMPLEX_WIDTH];
    cells[0] = km.to_string();
    cells[3] = meter.to_string();
    cells[8] = parameter.to_string();
    cells[26] = v26.to_string();
    cells[27] = v27.to_string();
    cells[28] = v28.to_string();
    cells[31] = "2.5".to_string();
    cells[39] = "62".to_string();
    cells[44] = "3".to_string();
    cells[55] = "T1".to_string();
    cells[62] = "-22.90/-43.21".to_string();
    cells.join(",")
}

/// 常规 Complex 数据行（权威值位于列 26）
pub fn complex_measurement(km: &str, meter: &str, parameter: &str, value: &str) -> String {
    complex_data_row(km, meter, parameter, value, "", "")
}

/// 完整 Complex 布局文件: 前导 + 表头 + 数据行
pub fn complex_csv_file(data_rows: &[String]) -> NamedTempFile {
    let mut lines = complex_preamble();
    lines.push(complex_header());
    lines.extend_from_slice(data_rows);
    write_csv_file(&lines)
}

/// Simplified 布局表头（首行,按名取列）
pub fn simplified_header() -> String {
    "KM,M,Parameter,Value,Length,Speed,TSC,Track,Peak Lat,Peak Long".to_string()
}

/// Simplified 布局数据行
pub fn simplified_data_row(
    km: &str,
    meter: &str,
    parameter: &str,
    value: &str,
    peak_lat: &str,
    peak_long: &str,
) -> String {
    format!(
        "{},{},{},{},2.5,62,3,T1,{},{}",
        km, meter, parameter, value, peak_lat, peak_long
    )
}

/// 完整 Simplified 布局文件: 表头 + 数据行
pub fn simplified_csv_file(data_rows: &[String]) -> NamedTempFile {
    let mut lines = vec![simplified_header()];
    lines.extend_from_slice(data_rows);
    write_csv_file(&lines)
}
