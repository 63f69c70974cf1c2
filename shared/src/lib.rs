use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod aggregate;
pub mod date;
pub mod session;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 心情记录集合名
pub const COLLECTION_MOOD_RECORDS: &str = "mood_records";
/// 自定义参数集合名
pub const COLLECTION_CUSTOM_PARAMETERS: &str = "user_custom_parameters";
/// 用户（认证）集合名
pub const COLLECTION_USERS: &str = "users";

/// LocalStorage 中缓存会话的键
pub const STORAGE_AUTH_KEY: &str = "sanamente_auth";

/// 心情等级的取值范围 (1-10)
pub const MOOD_LEVEL_MIN: u8 = 1;
pub const MOOD_LEVEL_MAX: u8 = 10;
/// 睡眠时长的取值范围（小时）
pub const SLEEP_HOURS_MAX: f64 = 12.0;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 认证服务拥有的用户记录，客户端只持有只读缓存副本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// 显示名，可能为空
    #[serde(default)]
    pub name: String,
}

impl User {
    /// UI 展示用的名称，空时回退到通用称呼
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Usuario"
        } else {
            &self.name
        }
    }
}

/// 创建自定义参数的请求体
///
/// `name` 在同一用户下唯一：客户端在创建前校验，
/// 存储侧的冲突以 ValidationError 形式返回。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomParameter {
    /// 所属用户 id
    pub user: String,
    pub name: String,
}

/// 存储返回的自定义参数记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomParameter {
    pub id: String,
    #[serde(flatten)]
    pub base: NewCustomParameter,
}

/// 创建心情记录的请求体
///
/// 记录一旦创建不可变：只有 create 和 list，没有更新路径。
/// `custom_parameters_data` 是稀疏映射，键缺失表示该参数当天未记录，
/// 聚合时产生空档（gap）而不是 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMoodRecord {
    /// 所属用户 id
    pub user: String,
    /// 记录时间，存储侧的日期字符串（RFC 3339 或 "YYYY-MM-DD hh:mm:ss.fffZ"）
    pub date: String,
    /// 心情等级 1-10
    pub mood_level: u8,
    #[serde(default)]
    pub positive_emotions: Vec<String>,
    #[serde(default)]
    pub negative_emotions: Vec<String>,
    /// 睡眠时长（小时，0-12）
    pub sleep_quality: f64,
    #[serde(default)]
    pub thoughts: String,
    /// 参数名 -> 1-10 的稀疏映射
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_parameters_data: BTreeMap<String, u8>,
}

/// 存储返回的心情记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: String,
    #[serde(flatten)]
    pub entry: NewMoodRecord,
}

impl MoodRecord {
    /// 解析记录时间；解析失败返回 None
    pub fn timestamp(&self) -> Option<Timestamp> {
        date::parse_timestamp(&self.entry.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_record_deserializes_store_shape() {
        // 存储返回的记录带有未建模的系统字段，应被忽略
        let json = r#"{
            "id": "rec1",
            "collectionId": "abc",
            "user": "u1",
            "date": "2025-03-01 08:30:00.000Z",
            "mood_level": 7,
            "positive_emotions": ["Feliz"],
            "negative_emotions": [],
            "sleep_quality": 7.5,
            "thoughts": "",
            "custom_parameters_data": {"Ejercicio": 4}
        }"#;
        let record: MoodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "rec1");
        assert_eq!(record.entry.mood_level, 7);
        assert_eq!(
            record.entry.custom_parameters_data.get("Ejercicio"),
            Some(&4)
        );
        assert!(record.timestamp().is_some());
    }

    #[test]
    fn test_mood_record_missing_custom_data_defaults_empty() {
        let json = r#"{
            "id": "rec2",
            "user": "u1",
            "date": "2025-03-02 08:30:00.000Z",
            "mood_level": 5,
            "sleep_quality": 8
        }"#;
        let record: MoodRecord = serde_json::from_str(json).unwrap();
        assert!(record.entry.custom_parameters_data.is_empty());
        assert!(record.entry.positive_emotions.is_empty());
    }

    #[test]
    fn test_new_mood_record_skips_empty_custom_data() {
        let entry = NewMoodRecord {
            user: "u1".to_string(),
            date: "2025-03-01T08:30:00Z".to_string(),
            mood_level: 5,
            positive_emotions: vec![],
            negative_emotions: vec![],
            sleep_quality: 8.0,
            thoughts: String::new(),
            custom_parameters_data: BTreeMap::new(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("custom_parameters_data"));
    }

    #[test]
    fn test_user_display_name_fallback() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: String::new(),
        };
        assert_eq!(user.display_name(), "Usuario");
    }
}
