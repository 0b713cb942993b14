// ==========================================
// 轨道几何检测分析系统 - 分析管道编排器
// ==========================================
// 依据: 轨检数据接入设计文档 - 1.1 接入主流程
// ==========================================
// 职责: 串联 布局识别 → 列归并 → 行清洗 → 符合性评定,
//       对外暴露管道边界 evaluate(file, class)
// 缓存: 按 (文件内容指纹, 线路等级) 记忆化,键不匹配即重算,
//       输入一经上传不可变,无需其他失效策略
// ==========================================

use crate::config::analyzer_config::AnalyzerConfig;
use crate::config::tolerance::{IgnoredParameterSet, ToleranceLibrary};
use crate::domain::measurement::AnalyzedDataset;
use crate::domain::types::{SourceLayout, TrackClass};
use crate::engine::conformity::ConformityEngine;
use crate::importer::column_reconciler::ColumnReconciler;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::layout_detector::{LayoutDetection, LayoutDetector};
use crate::importer::row_cleaner::RowCleaner;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 支持的容器格式扩展名
const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

// ==========================================
// AnalysisPipeline - 分析管道
// ==========================================
// 单文件单遍同步处理; 多文件并发时各管道运行完全独立,
// 限值库为只读共享数据,评定期间不被修改,无需加锁
pub struct AnalysisPipeline {
    config: AnalyzerConfig,
    tolerances: ToleranceLibrary,
    ignored: IgnoredParameterSet,
    cache: Mutex<HashMap<(String, TrackClass), Arc<AnalyzedDataset>>>,
}

impl AnalysisPipeline {
    /// 以给定运行配置与内置限值库构建管道
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            tolerances: ToleranceLibrary::builtin(),
            ignored: IgnoredParameterSet::builtin(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// 默认配置管道
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 管道边界: 分析检测报告文件
    ///
    /// # 参数
    /// - file_path: 报告文件路径（.csv/.xlsx/.xls）
    /// - track_class: 评定用线路等级
    ///
    /// # 返回
    /// - Ok(Arc<AnalyzedDataset>): 已评定数据集（命中缓存时为共享实例）
    /// - Err(ImportError): 带标签的失败原因,调用方按变体分别呈现
    pub fn evaluate<P: AsRef<Path>>(
        &self,
        file_path: P,
        track_class: TrackClass,
    ) -> ImportResult<Arc<AnalyzedDataset>> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 扩展名检查: 不支持的格式立即失败,不做任何解析
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 整个文件一次性缓冲（源可能是一次性流,不可回卷）
        let bytes = std::fs::read(path)?;
        let fingerprint = Self::fingerprint(&bytes);

        // 缓存查询
        if let Some(cached) = self.cache_get(&fingerprint, track_class)? {
            tracing::debug!("缓存命中: {} ({})", path.display(), track_class);
            return Ok(cached);
        }

        tracing::info!("开始分析: {} (等级 {})", path.display(), track_class);
        let dataset = Arc::new(self.run(&bytes, &ext, track_class)?);

        // 写入缓存
        self.cache_put(fingerprint, track_class, Arc::clone(&dataset))?;

        tracing::info!(
            "分析完成: {} 条记录,{} 条超限,布局 {}",
            dataset.records.len(),
            dataset.out_of_limit_count(),
            dataset.layout
        );

        Ok(dataset)
    }

    /// 管道主体（无缓存,供 evaluate 与测试使用）
    ///
    /// # 阶段
    /// 1. 容器解析 → 原始网格（行数受配置上限约束）
    /// 2. 布局识别（Simplified 优先,两假设共用同一网格）
    /// 3. 列归并（候选值列 coalesce / 峰值坐标合一）
    /// 4. 行清洗（元数据剔除 / 数值强转 / 位置派生）
    /// 5. 符合性评定（按所选等级限值表）
    pub fn run(
        &self,
        bytes: &[u8],
        ext: &str,
        track_class: TrackClass,
    ) -> ImportResult<AnalyzedDataset> {
        // 阶段 1: 容器解析
        let grid = UniversalFileParser.parse_bytes(bytes, ext, self.config.max_rows_to_read)?;
        tracing::debug!("容器解析完成: {} 行原始网格", grid.len());

        // 阶段 2-3: 布局识别与列归并
        let (layout, raw_rows) = match LayoutDetector.detect(grid) {
            LayoutDetection::Simplified(table) => (
                SourceLayout::Simplified,
                ColumnReconciler.reconcile_simplified(table)?,
            ),
            LayoutDetection::Complex(table) => (
                SourceLayout::Complex,
                ColumnReconciler.reconcile_complex(table)?,
            ),
            LayoutDetection::Unrecognized {
                simplified_reason,
                complex_reason,
            } => {
                return Err(ImportError::IngestionFailure {
                    simplified: simplified_reason,
                    complex: complex_reason,
                })
            }
        };
        tracing::debug!("布局识别: {},归并 {} 行", layout, raw_rows.len());

        // 阶段 4: 行清洗
        let (mut records, diagnostics) = RowCleaner.clean(raw_rows, &self.ignored)?;

        // 阶段 5: 符合性评定
        let table = self.tolerances.table(track_class);
        ConformityEngine.evaluate(&mut records, table);

        Ok(AnalyzedDataset {
            records,
            layout,
            track_class,
            diagnostics,
            analyzed_at: Utc::now(),
        })
    }

    /// SHA-256 内容指纹（十六进制）
    fn fingerprint(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    fn cache_get(
        &self,
        fingerprint: &str,
        track_class: TrackClass,
    ) -> ImportResult<Option<Arc<AnalyzedDataset>>> {
        let cache = self
            .cache
            .lock()
            .map_err(|e| ImportError::InternalError(format!("缓存锁获取失败: {}", e)))?;
        Ok(cache.get(&(fingerprint.to_string(), track_class)).cloned())
    }

    fn cache_put(
        &self,
        fingerprint: String,
        track_class: TrackClass,
        dataset: Arc<AnalyzedDataset>,
    ) -> ImportResult<()> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|e| ImportError::InternalError(format!("缓存锁获取失败: {}", e)))?;
        cache.insert((fingerprint, track_class), dataset);
        Ok(())
    }
}
