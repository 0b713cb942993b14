// ==========================================
// 轨道几何检测分析系统 - 引擎层
// ==========================================
// 依据: 轨检数据接入设计文档 - 1.2 模块拆分
// ==========================================
// 职责: 业务规则实现与管道编排
// 红线: 符合性评定为纯函数,所有失败必须输出可检视原因
// ==========================================

pub mod analyzer;
pub mod conformity;
pub mod export;

// 重导出核心引擎
pub use analyzer::AnalysisPipeline;
pub use conformity::ConformityEngine;
pub use export::{CsvExporter, EXPORT_HEADER};
