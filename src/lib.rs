// ==========================================
// 轨道几何检测分析系统 - 核心库
// ==========================================
// 依据: 轨检数据接入设计文档 - 系统总览
// 技术栈: Rust + calamine/csv
// 系统定位: 决策支持系统 (检测员最终判断权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ConformityStatus, LimitMode, SourceLayout, TrackClass};

// 领域实体
pub use domain::{
    AnalyzedDataset, CleaningDiagnostics, MeasurementRecord, RawMeasurementRow,
};

// 配置
pub use config::{
    AnalyzerConfig, IgnoredParameterSet, ToleranceLibrary, ToleranceRule, ToleranceTable,
};

// 引擎
pub use engine::{AnalysisPipeline, ConformityEngine, CsvExporter};

// 导入层
pub use importer::{ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "轨道几何检测分析系统";
