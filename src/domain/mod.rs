// ==========================================
// 轨道几何检测分析系统 - 领域层
// ==========================================
// 职责: 领域实体与类型,无 I/O,无业务规则实现
// ==========================================

pub mod measurement;
pub mod types;

// 重导出核心类型
pub use measurement::{
    format_location, AnalyzedDataset, CleaningDiagnostics, MeasurementRecord, RawMeasurementRow,
};
pub use types::{ConformityStatus, LimitMode, SourceLayout, TrackClass};
