// ==========================================
// 轨道几何检测分析系统 - 文件解析器实现
// ==========================================
// 依据: 轨检数据接入设计文档 - 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================
// 说明: 整个文件一次性缓冲进内存后再解析,两种布局假设
// 在同一份原始网格上探测,源不支持回卷也不需要二次读取。
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{Reader, Xlsx};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

/// 原始网格: 裁剪后的单元格文本,按源文件行列排布
///
/// 空白行已剔除（与上游报表导出工具的行为一致）,
/// 行位置按剔除后的顺序计数。
pub type RawGrid = Vec<Vec<String>>;

// ==========================================
// GridParser Trait
// ==========================================
// 用途: 容器格式解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait GridParser: Send + Sync {
    /// 将已缓冲的文件字节解析为原始网格
    ///
    /// # 参数
    /// - bytes: 完整文件内容
    /// - max_rows: 原始行数读取上限,达到即提前停读（非错误）
    ///
    /// # 返回
    /// - Ok(RawGrid): 原始网格（空白行已剔除,行数 ≤ max_rows）
    /// - Err: 容器格式解析错误
    fn parse_grid(&self, bytes: &[u8], max_rows: usize) -> ImportResult<RawGrid>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl GridParser for CsvParser {
    fn parse_grid(&self, bytes: &[u8], max_rows: usize) -> ImportResult<RawGrid> {
        // 无表头模式: 表头行的位置由布局探测阶段决定
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut grid: RawGrid = Vec::new();
        for result in reader.records() {
            if grid.len() >= max_rows {
                // 上限之后是已知的汇总/图表段,直接停读
                tracing::debug!("已达行数上限 {},停止读取", max_rows);
                break;
            }

            let record = result?;
            let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳过完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl GridParser for ExcelParser {
    fn parse_grid(&self, bytes: &[u8], max_rows: usize) -> ImportResult<RawGrid> {
        // 从内存缓冲打开工作簿
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut grid: RawGrid = Vec::new();
        for data_row in range.rows() {
            if grid.len() >= max_rows {
                tracing::debug!("已达行数上限 {},停止读取", max_rows);
                break;
            }

            let row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            // 跳过完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 从文件路径读取并解析为原始网格
    ///
    /// 文件内容一次性读入内存（见模块头说明）。
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, max_rows: usize) -> ImportResult<RawGrid> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes, &ext, max_rows)
    }

    /// 从已缓冲的字节解析为原始网格
    ///
    /// # 参数
    /// - ext: 声明的文件扩展名（小写,不含点）
    pub fn parse_bytes(&self, bytes: &[u8], ext: &str, max_rows: usize) -> ImportResult<RawGrid> {
        match ext {
            "csv" => CsvParser.parse_grid(bytes, max_rows),
            "xlsx" | "xls" => ExcelParser.parse_grid(bytes, max_rows),
            _ => Err(ImportError::UnsupportedFormat(ext.to_string())),
        }
    }
}
