use std::time::Instant;

use json::JsonValue;
use log::Level;

/// Per-call logging context. Messages are prefixed with the caller,
/// request id and method; the call duration is logged on drop.
pub struct CallContext {
    client_ip: String,
    request_id: JsonValue,
    rpc_function: String,
    start_time: Instant,
}

impl Default for CallContext {
    fn default() -> CallContext {
        CallContext {
            client_ip: String::new(),
            request_id: JsonValue::Null,
            rpc_function: String::new(),
            start_time: Instant::now(),
        }
    }
}

impl CallContext {
    pub fn new(client_ip: &str, request_id: &JsonValue, rpc_function: &str) -> Self {
        let context = CallContext {
            client_ip: client_ip.to_string(),
            request_id: request_id.clone(),
            rpc_function: rpc_function.to_string(),
            start_time: Instant::now(),
        };

        context.log(Level::Info, "->", None);
        context
    }

    fn is_anonymous(&self) -> bool {
        self.client_ip.is_empty() && self.request_id.is_null() && self.rpc_function.is_empty()
    }

    pub fn log(&self, level: Level, prefix: &str, suffix: Option<&str>) {
        let suffix_str = suffix.unwrap_or_default();

        if self.is_anonymous() {
            log::log!(level, "{}", suffix_str.trim_start());
            return;
        }

        log::log!(
            level,
            "{} [{:?}] [{}] [{}] [{}]{}",
            prefix,
            std::thread::current().id(),
            self.client_ip,
            self.request_id,
            self.rpc_function,
            suffix_str
        );
    }

    pub fn log_message(&self, message: &str) {
        self.log(Level::Info, "  ", Some(&format!(" {message}")));
    }

    /// Low severity notices, e.g. skipped input lines.
    pub fn log_debug(&self, message: &str) {
        self.log(Level::Debug, "  ", Some(&format!(" {message}")));
    }

    pub fn log_warning(&self, message: &str) {
        self.log(Level::Warn, "  ", Some(&format!(" {message}")));
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        if self.is_anonymous() {
            return;
        }
        let call_duration = self.start_time.elapsed().as_millis();
        self.log(Level::Info, "<-", Some(&format!(" (took {call_duration} ms)")));
    }
}
