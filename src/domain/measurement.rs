// ==========================================
// 轨道几何检测分析系统 - 测量领域模型
// ==========================================
// 依据: 轨检数据接入设计文档 - 数据与状态体系
// 依据: 轨检报告字段映射规范 - 规范记录字段表
// ==========================================

use crate::domain::types::{ConformityStatus, SourceLayout, TrackClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// RawMeasurementRow - 列归并中间结构体
// ==========================================
// 用途: 导入管道中间产物（布局识别 → 列归并 → 此结构 → 行清洗）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default)]
pub struct RawMeasurementRow {
    // 位置字段（字符串原样,清洗阶段再做整数强转）
    pub km: String,
    pub meter: String,

    // 测量参数名（未裁剪,清洗阶段统一 TRIM）
    pub parameter: String,

    // 权威测量值（列归并产物,None = 全部候选列不可解析）
    pub value: Option<f64>,

    // 随行描述字段（原样携带,可为空）
    pub length: Option<String>,
    pub speed: Option<String>,
    pub tsc: Option<String>,
    pub track: Option<String>,
    pub peak_lat_long: Option<String>,

    // 元信息
    pub row_number: usize, // 数据区内行号（用于诊断日志）
}

// ==========================================
// MeasurementRecord - 规范测量记录
// ==========================================
// 红线: value 必为有限数值,parameter 必非空,status 为枚举而非自由文本
// 用途: 清洗层写入,符合性引擎只读评定后回填 status/delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    // ===== 位置 =====
    pub km: u32,          // 公里标（强转失败默认 0,不丢行）
    pub meter: u32,       // 公里内米标（强转失败默认 0）
    pub location: String, // 派生位置键 "{km}+{meter:03}"（非唯一）

    // ===== 测量 =====
    pub parameter: String, // 几何参数名（已 TRIM）
    pub value: f64,        // 测量值（有限数值,清洗层保证）

    // ===== 随行描述字段 =====
    pub length: Option<String>,        // 超限段长度（原样字符串）
    pub speed: Option<f64>,            // 检测速度
    pub tsc: Option<f64>,              // 轨道支承状态码
    pub track: Option<String>,         // 线路标识
    pub peak_lat_long: Option<String>, // 峰值点坐标 "lat,long"

    // ===== 符合性评定（Conformity Engine 输出）=====
    pub status: ConformityStatus, // 评定前默认 NOT_APPLICABLE
    pub delta: f64,               // 超限幅度（≥0; >0 当且仅当 OUT_OF_LIMIT）
}

/// 派生位置键: 米标补零到 3 位
///
/// # 示例
/// - km=3, meter=7 → "3+007"
pub fn format_location(km: u32, meter: u32) -> String {
    format!("{}+{:03}", km, meter)
}

// ==========================================
// CleaningDiagnostics - 清洗诊断
// ==========================================
// 用途: 向调用方解释行损失（表头/格式错配排查）
// 红线: 属于可观测契约,不是内部统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningDiagnostics {
    /// 数值过滤前的候选测量行数（已剔除空参数与元数据标记行）
    pub candidate_rows: usize,

    /// 清洗后保留的记录数
    pub kept_rows: usize,

    /// 过滤前见到的全部去重参数名（含元数据标记,已 TRIM）
    pub raw_parameters: BTreeSet<String>,
}

impl CleaningDiagnostics {
    /// 因数值不可强转而被丢弃的行数
    pub fn dropped_non_numeric(&self) -> usize {
        self.candidate_rows.saturating_sub(self.kept_rows)
    }
}

// ==========================================
// AnalyzedDataset - 分析结果数据集
// ==========================================
// 用途: 管道输出,外部展示层（表格/图表/导出）的唯一输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedDataset {
    /// 全部存活测量记录（已评定 status/delta）
    pub records: Vec<MeasurementRecord>,

    /// 识别出的来源布局
    pub layout: SourceLayout,

    /// 评定所用线路等级
    pub track_class: TrackClass,

    /// 清洗诊断（可观测契约）
    pub diagnostics: CleaningDiagnostics,

    /// 分析时间
    pub analyzed_at: DateTime<Utc>,
}

impl AnalyzedDataset {
    /// 数据集中出现过的参数名（去重,升序）
    pub fn parameters(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.parameter.as_str()).collect();
        set.into_iter().collect()
    }

    /// 超限记录数
    pub fn out_of_limit_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == ConformityStatus::OutOfLimit)
            .count()
    }

    /// 单参数 Top N 最严重偏差（按测量值降序）
    pub fn top_by_value(&self, parameter: &str, limit: usize) -> Vec<&MeasurementRecord> {
        let mut rows: Vec<&MeasurementRecord> = self
            .records
            .iter()
            .filter(|r| r.parameter == parameter)
            .collect();
        rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(limit);
        rows
    }

    /// 全参数 Top N 超限幅度（按 delta 降序,仅超限记录）
    pub fn top_exceedances(&self, limit: usize) -> Vec<&MeasurementRecord> {
        let mut rows: Vec<&MeasurementRecord> = self
            .records
            .iter()
            .filter(|r| r.status == ConformityStatus::OutOfLimit)
            .collect();
        rows.sort_by(|a, b| b.delta.partial_cmp(&a.delta).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(limit);
        rows
    }
}
