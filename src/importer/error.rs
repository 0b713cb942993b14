// ==========================================
// 轨道几何检测分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 管道边界只返回带标签的结果,不向外抛非结构化错误
// ==========================================

use thiserror::Error;

/// 导入/分析管道错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 布局识别错误 =====
    // 两种布局假设均失败,携带各自的失败原因
    #[error("无法识别报告布局: Simplified: {simplified}; Complex: {complex}")]
    IngestionFailure { simplified: String, complex: String },

    // ===== 数据集退化情形 =====
    // 解析成功但表头下无数据行: 调用方应呈现"无数据",不是崩溃
    #[error("数据集为空: 列选取后无任何数据行")]
    EmptyDataset,

    // 清洗后全部行被丢弃: 携带行损失诊断,辅助排查表头/格式错配
    #[error("无有效测量: 候选 {candidate_rows} 行全部在清洗中被丢弃")]
    NoValidMeasurements {
        candidate_rows: usize,
        raw_parameters: Vec<String>,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
