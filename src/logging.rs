use std::{cmp::Ordering, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Destination for formatted log lines.
pub trait LogSink {
    fn write(&self, level: LogLevel, line: &str);
}

/// Browser console on wasm32, stdout/stderr elsewhere.
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    #[cfg(target_arch = "wasm32")]
    fn write(&self, level: LogLevel, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::log_1(&line),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Warn => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    sink: Rc<dyn LogSink>,
}

impl Logger {
    pub fn new(level: LogLevel, sink: Rc<dyn LogSink>) -> Self {
        Self { level, sink }
    }

    pub fn console(level: LogLevel) -> Self {
        Self::new(level, Rc::new(ConsoleSink))
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if level < self.level {
            return;
        }

        let line = format_event(now_unix_millis(), level, event, fields);
        self.sink.write(level, &line);
    }
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

// SystemTime::now() panics on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}
