//! 时间类型模块
//!
//! 提供：
//! - `Timestamp`: 可序列化的毫秒时间戳，用于排序和传输
//! - `parse_timestamp()`: 解析存储侧的日期字符串
//! - `format_display()`: 图表横轴使用的展示格式

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 创建新的时间戳
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 获取毫秒值
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 获取秒值
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

// =========================================================
// 解析与格式化
// =========================================================

/// 解析存储侧的日期字符串
///
/// 接受三种形态：
/// - RFC 3339: `2025-03-01T08:30:00.000Z`
/// - 存储的默认形态（空格分隔）: `2025-03-01 08:30:00.000Z`
/// - 纯日期: `2025-03-01`（按 UTC 零点处理）
///
/// 返回 None 如果解析失败
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp(dt.timestamp_millis()));
    }

    // 存储返回 "YYYY-MM-DD hh:mm:ss.fffZ"，替换空格后即为 RFC 3339
    if let Some((day, time)) = s.split_once(' ') {
        let normalized = format!("{}T{}", day, time);
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
    }

    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    Some(Timestamp(midnight.and_utc().timestamp_millis()))
}

/// 格式化为图表/列表展示的日期（dd/mm/yyyy）
pub fn format_display(ts: Timestamp) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ts.as_millis()) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2025-03-01T08:30:00.000Z").unwrap();
        assert_eq!(ts.as_secs(), 1740817800);
    }

    #[test]
    fn test_parse_store_format_matches_rfc3339() {
        let a = parse_timestamp("2025-03-01 08:30:00.000Z").unwrap();
        let b = parse_timestamp("2025-03-01T08:30:00.000Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_bare_date() {
        let ts = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(format_display(ts), "01/03/2025");
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_display_format() {
        let ts = parse_timestamp("2025-12-24T00:00:00Z").unwrap();
        assert_eq!(format_display(ts), "24/12/2025");
    }

    #[test]
    fn test_ordering() {
        let earlier = parse_timestamp("2025-03-01T00:00:00Z").unwrap();
        let later = parse_timestamp("2025-03-02T00:00:00Z").unwrap();
        assert!(earlier < later);
    }
}
