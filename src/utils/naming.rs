// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::utils::validators::strip_query;

/// 目标文件命名器
///
/// 生成 `img_<毫秒时间戳>.<扩展名>` 形式的名称。时间戳取自单调递增的计数，
/// 同一毫秒内的多次调用会依次加一，因此同一进程内不会重复。
#[derive(Debug, Default)]
pub struct Namer {
    last_millis: AtomicI64,
}

impl Namer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据源 URL 和当前时间生成目标名称
    pub fn name_for(&self, url: &str, now: DateTime<Utc>) -> String {
        let millis = self.next_millis(now.timestamp_millis());
        format!("img_{}.{}", millis, extension_of(url))
    }

    fn next_millis(&self, now: i64) -> i64 {
        let mut last = self.last_millis.load(Ordering::Relaxed);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match self.last_millis.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// 提取 URL 的扩展名：去掉查询字符串后取最后一个 `.` 之后的部分
pub fn extension_of(url: &str) -> &str {
    let path = strip_query(url);
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(path)
}
