// ==========================================
// 轨道几何检测分析系统 - 分析配置
// ==========================================
// 依据: 轨检数据接入设计文档 - 配置项全集
// ==========================================
// 职责: 调用方提供的运行配置（不来自检测报告文件）
// ==========================================

use crate::domain::types::TrackClass;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 原始行数读取上限默认值
///
/// 报告文件数据区之后有汇总/图表段,超过上限的行永远不进入后续阶段。
pub const DEFAULT_MAX_ROWS_TO_READ: usize = 50_000;

// ==========================================
// AnalyzerConfig - 分析配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// 从源文件读取的最大原始行数（运维上限,达到即提前停读,非错误）
    pub max_rows_to_read: usize,

    /// 默认线路等级（调用方未显式指定时使用）
    pub default_track_class: TrackClass,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_rows_to_read: DEFAULT_MAX_ROWS_TO_READ,
            default_track_class: TrackClass::Classe3,
        }
    }
}

impl AnalyzerConfig {
    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(AnalyzerConfig): 加载成功
    /// - Err: 文件读取或反序列化失败
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: AnalyzerConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.max_rows_to_read, DEFAULT_MAX_ROWS_TO_READ);
        assert_eq!(config.default_track_class, TrackClass::Classe3);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AnalyzerConfig {
            max_rows_to_read: 1000,
            default_track_class: TrackClass::Classe4,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.max_rows_to_read, 1000);
        assert_eq!(parsed.default_track_class, TrackClass::Classe4);
    }
}
