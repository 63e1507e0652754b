//! 日期时间序列化/反序列化工具
//!
//! - 序列化: `DateTime<Utc>` -> RFC3339 字符串
//! - 反序列化: RFC3339 字符串 或 Unix 时间戳 -> `DateTime<Utc>`

use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    String(String),
    I64(i64),
}

impl Timestamp {
    fn into_datetime<E: Error>(self) -> Result<DateTime<Utc>, E> {
        match self {
            Self::String(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| E::custom(format!("Invalid RFC3339 timestamp: {e}"))),
            Self::I64(ts) => {
                parse_unix_timestamp(ts).ok_or_else(|| E::custom("Invalid Unix timestamp"))
            }
        }
    }
}

/// 序列化 `DateTime<Utc>` 为 RFC3339 字符串
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// 反序列化：支持 RFC3339 字符串或 Unix 时间戳（秒/毫秒自动识别）
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Timestamp::deserialize(deserializer)?.into_datetime()
}

/// `Option<DateTime<Utc>>` 版本
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Timestamp>::deserialize(deserializer)?
            .map(Timestamp::into_datetime)
            .transpose()
    }
}

/// 解析 Unix 时间戳（自动判断秒/毫秒）
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // 大于 10^11 视为毫秒
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
