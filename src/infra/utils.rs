use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 / RFC 3339 时间戳，UTC、毫秒精度、`Z` 结尾
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_timestamp() -> String {
    iso_timestamp(Utc::now())
}
