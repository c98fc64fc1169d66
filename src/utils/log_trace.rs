//! 時系列トレースログシステム
//! カート操作とエラーを記録し、後から確認できるようにする

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::utils::storage::{browser_storage, KeyValueStore};

pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "@RocketShoes:log_trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "cart", "cart-cache", "catalog", ...
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
    storage: Rc<dyn KeyValueStore>,
}

impl LogTrace {
    pub fn new(storage: Rc<dyn KeyValueStore>, capacity: usize) -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(capacity.min(DEFAULT_MAX_LOG_ENTRIES)),
            capacity: capacity.max(1),
            storage,
        };
        trace.load_from_storage();
        trace
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: now_iso(),
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        write_console(&entry);

        self.logs.push_back(entry);
        self.trim();
        self.save_to_storage();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn trim(&mut self) {
        while self.logs.len() > self.capacity {
            self.logs.pop_front();
        }
    }

    fn load_from_storage(&mut self) {
        if let Ok(Some(json_str)) = self.storage.get_item(STORAGE_KEY) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json_str) {
                self.logs = logs.into_iter().collect();
                self.trim();
            }
        }
    }

    fn save_to_storage(&self) {
        let json_str = serde_json::to_string(&self.logs).unwrap_or_else(|_| "[]".to_string());
        // ログ保存の失敗は無視（容量超過時など）
        let _ = self.storage.set_item(STORAGE_KEY, &json_str);
    }
}

#[cfg(target_arch = "wasm32")]
fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_iso() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{}.{:03}", d.as_secs(), d.subsec_millis()))
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn write_console(entry: &LogEntry) {
    let line = format!("[{}] {}", entry.category, entry.message);
    match entry.level {
        LogLevel::Error => web_sys::console::error_1(&line.into()),
        LogLevel::Warn => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_entry: &LogEntry) {}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: RefCell<LogTrace> =
        RefCell::new(LogTrace::new(browser_storage(), DEFAULT_MAX_LOG_ENTRIES));
}

pub fn set_capacity(capacity: usize) {
    LOG_TRACE.with(|trace| trace.borrow_mut().set_capacity(capacity));
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Info, category, message, None);
    });
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Info, category, message, Some(data));
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Warn, category, message, None);
    });
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Error, category, message, None);
    });
}

pub fn log_error_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Error, category, message, Some(data));
    });
}

pub fn get_logs() -> Vec<LogEntry> {
    LOG_TRACE.with(|trace| trace.borrow().get_logs())
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().clear();
    });
}
