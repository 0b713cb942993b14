// ==========================================
// 轨道几何检测分析系统 - 导入层
// ==========================================
// 依据: 轨检数据接入设计文档 - 1.1 接入主流程
// ==========================================
// 职责: 外部检测报告接入,生成内部规范记录
// 流程: 文件解析 → 布局识别 → 列归并 → 行清洗
// ==========================================

// 模块声明
pub mod column_reconciler;
pub mod error;
pub mod file_parser;
pub mod layout_detector;
pub mod row_cleaner;

// 重导出核心类型
pub use column_reconciler::{parse_decimal, ColumnReconciler};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, GridParser, RawGrid, UniversalFileParser};
pub use layout_detector::{ComplexTable, LayoutDetection, LayoutDetector, SimplifiedTable};
pub use row_cleaner::RowCleaner;
