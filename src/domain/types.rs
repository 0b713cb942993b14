// ==========================================
// 轨道几何检测分析系统 - 领域类型定义
// ==========================================
// 依据: 轨检数据接入设计文档 - 0.2 限值判定体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 符合性状态 (Conformity Status)
// ==========================================
// 红线: 枚举制,不是自由文本
// 序列化格式: SCREAMING_SNAKE_CASE (与导出文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConformityStatus {
    NotApplicable, // 无对应限值规则
    Compliant,     // 限值内
    OutOfLimit,    // 超限
}

impl Default for ConformityStatus {
    fn default() -> Self {
        ConformityStatus::NotApplicable
    }
}

impl fmt::Display for ConformityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConformityStatus::NotApplicable => write!(f, "NOT_APPLICABLE"),
            ConformityStatus::Compliant => write!(f, "COMPLIANT"),
            ConformityStatus::OutOfLimit => write!(f, "OUT_OF_LIMIT"),
        }
    }
}

// ==========================================
// 限值判定模式 (Limit Mode)
// ==========================================
// Max: 超上限判超; Min: 低于下限判超; AbsMax: 绝对值超上限判超
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitMode {
    Max,
    Min,
    AbsMax,
}

impl fmt::Display for LimitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitMode::Max => write!(f, "MAX"),
            LimitMode::Min => write!(f, "MIN"),
            LimitMode::AbsMax => write!(f, "ABS_MAX"),
        }
    }
}

// ==========================================
// 线路等级 (Track Class)
// ==========================================
// 依据: 轨检数据接入设计文档 - 限值表按线路运营速度等级切换
// 封闭集合: 不接受自由文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackClass {
    Classe2, // 0-45 km/h
    Classe3, // 45-96 km/h
    Classe4, // 96-129 km/h
}

impl TrackClass {
    /// 全部等级（用于配置界面枚举与限值表构建）
    pub fn all() -> [TrackClass; 3] {
        [TrackClass::Classe2, TrackClass::Classe3, TrackClass::Classe4]
    }

    /// 人类可读标签（含速度区间）
    pub fn label(&self) -> &'static str {
        match self {
            TrackClass::Classe2 => "Classe 2 (0-45 km/h)",
            TrackClass::Classe3 => "Classe 3 (45-96 km/h)",
            TrackClass::Classe4 => "Classe 4 (96-129 km/h)",
        }
    }
}

impl fmt::Display for TrackClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TrackClass {
    type Err = String;

    /// 解析等级标识（接受 "2" / "classe2" / "Classe 2" 等写法）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        match normalized.as_str() {
            "2" | "classe2" | "class2" => Ok(TrackClass::Classe2),
            "3" | "classe3" | "class3" => Ok(TrackClass::Classe3),
            "4" | "classe4" | "class4" => Ok(TrackClass::Classe4),
            _ => Err(format!("未知线路等级: {}", s)),
        }
    }
}

// ==========================================
// 来源布局 (Source Layout)
// ==========================================
// 检测报告的两种已知表格布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceLayout {
    Simplified, // 首行表头,按列名取列
    Complex,    // 表头固定在第5行,按列位取列
}

impl fmt::Display for SourceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLayout::Simplified => write!(f, "SIMPLIFIED"),
            SourceLayout::Complex => write!(f, "COMPLEX"),
        }
    }
}
