// ==========================================
// 轨道几何检测分析系统 - 控制台入口
// ==========================================
// 依据: 轨检数据接入设计文档
// 系统定位: 决策支持系统 (检测员最终判断权)
// ==========================================
// 用法:
//   track-geometry-analyzer <report.csv|report.xlsx> [线路等级] [导出路径.csv]
//
// 线路等级接受 "2" / "3" / "4" / "Classe 3" 等写法,缺省用配置默认值。
// ==========================================

use track_geometry_analyzer::{
    logging, AnalysisPipeline, AnalyzerConfig, CsvExporter, ImportError, TrackClass,
};

fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", track_geometry_analyzer::APP_NAME);
    tracing::info!("系统版本: {}", track_geometry_analyzer::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);

    let file_path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!(
                "用法: track-geometry-analyzer <report.csv|report.xlsx> [线路等级] [导出路径.csv]"
            );
            std::process::exit(2);
        }
    };

    let config = AnalyzerConfig::default();
    let track_class = match args.next() {
        Some(raw) => match raw.parse::<TrackClass>() {
            Ok(class) => class,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => config.default_track_class,
    };
    let export_path = args.next();

    let pipeline = AnalysisPipeline::new(config);

    match pipeline.evaluate(&file_path, track_class) {
        Ok(dataset) => {
            let diag = &dataset.diagnostics;
            println!("文件: {}", file_path);
            println!("布局: {}  等级: {}", dataset.layout, track_class);
            println!(
                "记录: {} 条保留 / {} 条候选（数值丢弃 {} 条）",
                diag.kept_rows,
                diag.candidate_rows,
                diag.dropped_non_numeric()
            );
            println!("超限: {} 条", dataset.out_of_limit_count());
            println!();

            // 最严重超限 Top 20
            let top = dataset.top_exceedances(20);
            if top.is_empty() {
                println!("无超限记录。");
            } else {
                println!("{:<12} {:<16} {:>10} {:>8}", "位置", "参数", "测量值", "超限量");
                for record in top {
                    println!(
                        "{:<12} {:<16} {:>10.1} {:>8.1}",
                        record.location, record.parameter, record.value, record.delta
                    );
                }
            }

            if let Some(path) = export_path {
                if let Err(e) = CsvExporter.export_to_path(&dataset, &path) {
                    tracing::error!("导出失败: {}", e);
                    std::process::exit(1);
                }
                println!();
                println!("已导出: {}", path);
            }
        }

        // 空数据集: 呈现"无数据",不是崩溃
        Err(ImportError::EmptyDataset) => {
            println!("文件解析成功,但列选取后无任何数据行（无数据）。");
        }

        // 全部行被清洗丢弃: 呈现行损失诊断,辅助排查表头/格式错配
        Err(ImportError::NoValidMeasurements {
            candidate_rows,
            raw_parameters,
        }) => {
            println!("无有效测量: 候选 {} 行全部被丢弃。", candidate_rows);
            println!("文件中出现过的参数名: {}", raw_parameters.join(", "));
            println!("请确认表头位置与列布局是否符合预期。");
            std::process::exit(1);
        }

        Err(e) => {
            tracing::error!("分析失败: {}", e);
            std::process::exit(1);
        }
    }
}
