//! 心情记录聚合模块
//!
//! 把存储返回的记录列表（以及用户的自定义参数表）转换为：
//! - 汇总统计：平均心情、平均睡眠、记录总数
//! - 图表序列：按时间升序的数据点，自定义参数缺失处为空档（gap）
//!
//! 存储通常按 `-date` 降序返回列表，而图表假定最旧的点在最左侧，
//! 因此序列构建时检测来源顺序并在需要时反转。

use crate::date::{self, Timestamp};
use crate::MoodRecord;
use std::collections::BTreeMap;

// =========================================================
// 汇总统计
// =========================================================

/// 汇总统计，均值保留一位小数，空列表时全为 0
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoodSummary {
    pub average_mood: f64,
    pub average_sleep: f64,
    pub total_records: usize,
}

/// 计算汇总统计
pub fn summarize(records: &[MoodRecord]) -> MoodSummary {
    if records.is_empty() {
        return MoodSummary::default();
    }

    let count = records.len() as f64;
    let total_mood: f64 = records.iter().map(|r| r.entry.mood_level as f64).sum();
    let total_sleep: f64 = records.iter().map(|r| r.entry.sleep_quality).sum();

    MoodSummary {
        average_mood: round1(total_mood / count),
        average_sleep: round1(total_sleep / count),
        total_records: records.len(),
    }
}

/// 四舍五入到一位小数
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =========================================================
// 图表序列
// =========================================================

/// 图表序列中的一个数据点
///
/// `custom` 对每个已知参数名都有一个键；值为 None 表示该记录
/// 没有记录这个参数（空档，而不是 0）。
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// 展示格式的日期（dd/mm/yyyy），解析失败时为原始字符串
    pub date: String,
    pub mood_level: u8,
    pub sleep_quality: f64,
    pub custom: BTreeMap<String, Option<u8>>,
}

/// 构建图表序列
///
/// 输出始终按时间升序，与来源列表的排序方向无关。
/// 同一天的多条记录不合并，各自保留为一个点。
pub fn chart_series(records: &[MoodRecord], parameter_names: &[String]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = records
        .iter()
        .map(|record| {
            let custom = parameter_names
                .iter()
                .map(|name| {
                    let value = record.entry.custom_parameters_data.get(name).copied();
                    (name.clone(), value)
                })
                .collect();
            ChartPoint {
                date: display_date(record),
                mood_level: record.entry.mood_level,
                sleep_quality: record.entry.sleep_quality,
                custom,
            }
        })
        .collect();

    if is_descending(records) {
        points.reverse();
    }
    points
}

fn display_date(record: &MoodRecord) -> String {
    match record.timestamp() {
        Some(ts) => date::format_display(ts),
        None => record.entry.date.clone(),
    }
}

/// 来源列表是否按时间降序
///
/// 比较首尾两条可解析的记录；不足两条或无法解析时保持原顺序。
fn is_descending(records: &[MoodRecord]) -> bool {
    let first = records.iter().find_map(parse_ts);
    let last = records.iter().rev().find_map(parse_ts);
    match (first, last) {
        (Some(first), Some(last)) => first > last,
        _ => false,
    }
}

fn parse_ts(record: &MoodRecord) -> Option<Timestamp> {
    record.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewMoodRecord;

    fn record(id: &str, date: &str, mood: u8, sleep: f64) -> MoodRecord {
        MoodRecord {
            id: id.to_string(),
            entry: NewMoodRecord {
                user: "u1".to_string(),
                date: date.to_string(),
                mood_level: mood,
                positive_emotions: vec![],
                negative_emotions: vec![],
                sleep_quality: sleep,
                thoughts: String::new(),
                custom_parameters_data: BTreeMap::new(),
            },
        }
    }

    fn with_custom(mut r: MoodRecord, name: &str, value: u8) -> MoodRecord {
        r.entry.custom_parameters_data.insert(name.to_string(), value);
        r
    }

    // ---------------- 汇总统计 ----------------

    #[test]
    fn test_empty_records_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.average_mood, 0.0);
        assert_eq!(summary.average_sleep, 0.0);
        assert_eq!(summary.total_records, 0);
    }

    #[test]
    fn test_average_mood_is_rounded_mean() {
        // (4 + 8) / 2 = 6.0
        let records = vec![
            record("a", "2025-03-02T00:00:00Z", 8, 8.0),
            record("b", "2025-03-01T00:00:00Z", 4, 6.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.average_mood, 6.0);
        assert_eq!(summary.average_sleep, 7.0);
        assert_eq!(summary.total_records, 2);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        // (7 + 7 + 6) / 3 = 6.666... -> 6.7
        let records = vec![
            record("a", "2025-03-01T00:00:00Z", 7, 8.0),
            record("b", "2025-03-02T00:00:00Z", 7, 8.5),
            record("c", "2025-03-03T00:00:00Z", 6, 7.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.average_mood, 6.7);
        assert_eq!(summary.average_sleep, 7.8);
    }

    // ---------------- 序列顺序 ----------------

    #[test]
    fn test_descending_source_is_reversed() {
        // 存储按 -date 返回：最新在前
        let records = vec![
            record("new", "2025-03-02T00:00:00Z", 8, 8.0),
            record("old", "2025-03-01T00:00:00Z", 4, 6.0),
        ];
        let series = chart_series(&records, &[]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "01/03/2025");
        assert_eq!(series[0].mood_level, 4);
        assert_eq!(series[1].date, "02/03/2025");
        assert_eq!(series[1].mood_level, 8);
    }

    #[test]
    fn test_ascending_source_stays_ascending() {
        let records = vec![
            record("old", "2025-03-01T00:00:00Z", 4, 6.0),
            record("new", "2025-03-02T00:00:00Z", 8, 8.0),
        ];
        let series = chart_series(&records, &[]);
        assert_eq!(series[0].mood_level, 4);
        assert_eq!(series[1].mood_level, 8);
    }

    #[test]
    fn test_duplicate_dates_are_not_merged() {
        let records = vec![
            record("a", "2025-03-01T09:00:00Z", 4, 6.0),
            record("b", "2025-03-01T21:00:00Z", 8, 8.0),
        ];
        let series = chart_series(&records, &[]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, series[1].date);
    }

    #[test]
    fn test_empty_records_empty_series() {
        assert!(chart_series(&[], &["Ejercicio".to_string()]).is_empty());
    }

    // ---------------- 自定义参数空档 ----------------

    #[test]
    fn test_missing_parameter_yields_gap_not_zero() {
        let params = vec!["Ejercicio".to_string()];
        let records = vec![
            with_custom(record("a", "2025-03-01T00:00:00Z", 5, 7.0), "Ejercicio", 6),
            record("b", "2025-03-02T00:00:00Z", 5, 7.0),
        ];
        let series = chart_series(&records, &params);
        assert_eq!(series[0].custom["Ejercicio"], Some(6));
        // 缺失是空档 None，绝不是 Some(0)
        assert_eq!(series[1].custom["Ejercicio"], None);
    }

    #[test]
    fn test_unknown_keys_in_record_are_ignored() {
        // 记录里残留的、参数已被删除的键不进入序列
        let params = vec!["Ejercicio".to_string()];
        let records = vec![with_custom(
            record("a", "2025-03-01T00:00:00Z", 5, 7.0),
            "Lectura",
            3,
        )];
        let series = chart_series(&records, &params);
        assert_eq!(series[0].custom.len(), 1);
        assert_eq!(series[0].custom["Ejercicio"], None);
    }

    #[test]
    fn test_unparseable_date_keeps_raw_string_and_order() {
        let records = vec![
            record("a", "cuando sea", 4, 6.0),
            record("b", "2025-03-01T00:00:00Z", 8, 8.0),
        ];
        let series = chart_series(&records, &[]);
        assert_eq!(series[0].date, "cuando sea");
        assert_eq!(series[0].mood_level, 4);
    }
}
