// ==========================================
// 轨道几何检测分析系统 - 分析结果导出
// ==========================================
// 依据: 轨检数据接入设计文档 - 对外接口: 平面文本导出
// ==========================================
// 职责: 将已评定数据集导出为 UTF-8 CSV（首行表头,每记录一行）
// ==========================================

use crate::domain::measurement::AnalyzedDataset;
use crate::importer::error::{ImportError, ImportResult};
use std::io::Write;
use std::path::Path;

/// 导出列头（与 MeasurementRecord 字段一一对应,含 status/delta）
pub const EXPORT_HEADER: [&str; 12] = [
    "km",
    "meter",
    "location",
    "parameter",
    "value",
    "length",
    "speed",
    "tsc",
    "track",
    "peak_lat_long",
    "status",
    "delta",
];

// ==========================================
// CsvExporter - CSV 导出器
// ==========================================
pub struct CsvExporter;

impl CsvExporter {
    /// 导出到任意写入器
    pub fn write_to<W: Write>(&self, dataset: &AnalyzedDataset, writer: W) -> ImportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(EXPORT_HEADER)?;

        for record in &dataset.records {
            csv_writer.write_record([
                record.km.to_string(),
                record.meter.to_string(),
                record.location.clone(),
                record.parameter.clone(),
                record.value.to_string(),
                record.length.clone().unwrap_or_default(),
                record.speed.map(|v| v.to_string()).unwrap_or_default(),
                record.tsc.map(|v| v.to_string()).unwrap_or_default(),
                record.track.clone().unwrap_or_default(),
                record.peak_lat_long.clone().unwrap_or_default(),
                record.status.to_string(),
                record.delta.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// 导出为字符串（下载/预览用）
    pub fn to_csv_string(&self, dataset: &AnalyzedDataset) -> ImportResult<String> {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_to(dataset, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ImportError::InternalError(format!("导出编码错误: {}", e)))
    }

    /// 导出到文件
    pub fn export_to_path<P: AsRef<Path>>(
        &self,
        dataset: &AnalyzedDataset,
        path: P,
    ) -> ImportResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(dataset, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::{format_location, CleaningDiagnostics, MeasurementRecord};
    use crate::domain::types::{ConformityStatus, SourceLayout, TrackClass};
    use chrono::Utc;

    fn sample_dataset() -> AnalyzedDataset {
        AnalyzedDataset {
            records: vec![MeasurementRecord {
                km: 3,
                meter: 7,
                location: format_location(3, 7),
                parameter: "Gage Wide".to_string(),
                value: 1640.0,
                length: Some("2.5".to_string()),
                speed: Some(62.0),
                tsc: None,
                track: Some("T1".to_string()),
                peak_lat_long: Some("-22.90,-43.21".to_string()),
                status: ConformityStatus::OutOfLimit,
                delta: 15.0,
            }],
            layout: SourceLayout::Complex,
            track_class: TrackClass::Classe4,
            diagnostics: CleaningDiagnostics::default(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_header_first() {
        let csv_text = CsvExporter.to_csv_string(&sample_dataset()).unwrap();
        let first_line = csv_text.lines().next().unwrap();
        assert_eq!(first_line, EXPORT_HEADER.join(","));
    }

    #[test]
    fn test_export_row_content() {
        let csv_text = CsvExporter.to_csv_string(&sample_dataset()).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines.len(), 2);
        // 峰值坐标含逗号,CSV 写入器负责加引号
        assert!(lines[1].contains("\"-22.90,-43.21\""));
        assert!(lines[1].contains("OUT_OF_LIMIT"));
        assert!(lines[1].contains("3+007"));
    }

    #[test]
    fn test_export_empty_optional_fields() {
        let mut dataset = sample_dataset();
        dataset.records[0].tsc = None;
        dataset.records[0].track = None;

        let csv_text = CsvExporter.to_csv_string(&dataset).unwrap();
        // 可为空字段导出为空单元格,不是字面 "None"
        assert!(!csv_text.contains("None"));
    }
}
