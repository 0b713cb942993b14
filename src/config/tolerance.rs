// ==========================================
// 轨道几何检测分析系统 - 限值配置
// ==========================================
// 依据: 轨检数据接入设计文档 - 限值表全集
// ==========================================
// 职责: 按线路等级维护工程限值表 + 元数据标记参数集
// 红线: 进程启动时构建一次,运行期只读共享,不可变
// ==========================================

use crate::domain::types::{LimitMode, TrackClass};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ==========================================
// ToleranceRule - 单参数限值规则
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceRule {
    pub parameter: String, // 参数名（与报告中的参数名精确匹配）
    pub min: f64,          // 下限（MIN 模式使用; ABS_MAX 模式下为 -max）
    pub max: f64,          // 上限（MAX/ABS_MAX 模式使用）
    pub mode: LimitMode,   // 判定模式
}

impl ToleranceRule {
    pub fn new(parameter: &str, min: f64, max: f64, mode: LimitMode) -> Self {
        Self {
            parameter: parameter.to_string(),
            min,
            max,
            mode,
        }
    }
}

// ==========================================
// ToleranceTable - 单等级限值表
// ==========================================
// 按参数名索引,评定时只读查询
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceTable {
    pub class: TrackClass,
    rules: HashMap<String, ToleranceRule>,
}

impl ToleranceTable {
    pub fn new(class: TrackClass, rules: Vec<ToleranceRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| (r.parameter.clone(), r))
            .collect();
        Self { class, rules }
    }

    /// 按参数名查询规则（无规则 → 该参数不评定）
    pub fn lookup(&self, parameter: &str) -> Option<&ToleranceRule> {
        self.rules.get(parameter)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

// ==========================================
// ToleranceLibrary - 全等级限值库
// ==========================================
// 进程启动时构建一次,之后按引用传入符合性引擎
#[derive(Debug, Clone)]
pub struct ToleranceLibrary {
    tables: HashMap<TrackClass, ToleranceTable>,
}

impl ToleranceLibrary {
    /// 内置限值库
    ///
    /// 标称轨距 1600mm,等级（运营速度）越高限值越严。
    /// 数值为运维方维护的编译期配置,不来自输入文件。
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();

        for class in TrackClass::all() {
            tables.insert(class, Self::build_table(class));
        }

        Self { tables }
    }

    fn build_table(class: TrackClass) -> ToleranceTable {
        use LimitMode::{AbsMax, Max, Min};

        // (宽轨上限, 窄轨下限, 水平, 三角坑3m, 三角坑10m, 轨向20m, 高低20m)
        let (gage_wide, gage_narrow, crosslevel, twist_3m, twist_10m, align_20m, surface_20m) =
            match class {
                TrackClass::Classe2 => (1640.0, 1585.0, 50.0, 25.0, 40.0, 50.0, 55.0),
                TrackClass::Classe3 => (1630.0, 1588.0, 44.0, 20.0, 33.0, 44.0, 50.0),
                TrackClass::Classe4 => (1625.0, 1590.0, 32.0, 16.0, 27.0, 38.0, 40.0),
            };

        ToleranceTable::new(
            class,
            vec![
                ToleranceRule::new("Gage Wide", 1600.0, gage_wide, Max),
                ToleranceRule::new("Gage Narrow", gage_narrow, 1600.0, Min),
                ToleranceRule::new("Crosslevel", -crosslevel, crosslevel, AbsMax),
                ToleranceRule::new("Twist 3m", -twist_3m, twist_3m, AbsMax),
                ToleranceRule::new("Twist 10m", -twist_10m, twist_10m, AbsMax),
                ToleranceRule::new("Align 20m", -align_20m, align_20m, AbsMax),
                ToleranceRule::new("Surface 20m", -surface_20m, surface_20m, AbsMax),
            ],
        )
    }

    /// 取指定等级的限值表
    pub fn table(&self, class: TrackClass) -> &ToleranceTable {
        // builtin() 为每个等级都构建了表,封闭枚举保证必命中
        self.tables
            .get(&class)
            .expect("限值库必须覆盖全部线路等级")
    }
}

// ==========================================
// IgnoredParameterSet - 元数据标记参数集
// ==========================================
// 报告数据区混有线路资产/文本标记行（非测量）,清洗层据此剔除
#[derive(Debug, Clone)]
pub struct IgnoredParameterSet {
    names: HashSet<String>,
}

impl IgnoredParameterSet {
    /// 内置标记参数集（运维方维护）
    pub fn builtin() -> Self {
        let names = [
            "Tunnel Start",
            "Tunnel End",
            "Bridge Start",
            "Bridge End",
            "Switch/Frog",
            "Level Crossing",
            "Platform Start",
            "Platform End",
            "Curve Mark",
            "Text Marker",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self { names }
    }

    /// 判断（已 TRIM 的）参数名是否为元数据标记
    pub fn contains(&self, parameter: &str) -> bool {
        self.names.contains(parameter)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_covers_all_classes() {
        let lib = ToleranceLibrary::builtin();
        for class in TrackClass::all() {
            assert!(lib.table(class).rule_count() >= 7);
        }
    }

    #[test]
    fn test_classe4_gage_wide_limit() {
        // 验收锚点: Classe 4 宽轨上限 1625
        let lib = ToleranceLibrary::builtin();
        let rule = lib.table(TrackClass::Classe4).lookup("Gage Wide").unwrap();
        assert_eq!(rule.max, 1625.0);
        assert_eq!(rule.mode, LimitMode::Max);
    }

    #[test]
    fn test_limits_tighten_with_class() {
        let lib = ToleranceLibrary::builtin();
        let c2 = lib.table(TrackClass::Classe2).lookup("Gage Wide").unwrap().max;
        let c3 = lib.table(TrackClass::Classe3).lookup("Gage Wide").unwrap().max;
        let c4 = lib.table(TrackClass::Classe4).lookup("Gage Wide").unwrap().max;
        assert!(c2 > c3 && c3 > c4);
    }

    #[test]
    fn test_lookup_unknown_parameter() {
        let lib = ToleranceLibrary::builtin();
        assert!(lib.table(TrackClass::Classe3).lookup("Unknown Param").is_none());
    }

    #[test]
    fn test_ignored_parameter_set() {
        let ignored = IgnoredParameterSet::builtin();
        assert!(ignored.contains("Switch/Frog"));
        assert!(ignored.contains("Tunnel Start"));
        assert!(!ignored.contains("Gage Wide"));
    }
}
