// ==========================================
// 轨道几何检测分析系统 - 配置层
// ==========================================
// 职责: 运行配置 + 运维限值表 + 标记参数集
// 红线: 配置为显式不可变结构,按引用传入引擎,无全局可变状态
// ==========================================

pub mod analyzer_config;
pub mod tolerance;

// 重导出核心类型
pub use analyzer_config::{AnalyzerConfig, DEFAULT_MAX_ROWS_TO_READ};
pub use tolerance::{IgnoredParameterSet, ToleranceLibrary, ToleranceRule, ToleranceTable};
