// SPDX-License-Identifier: MIT OR Apache-2.0
//! Log setup and forwarding of events to host callbacks.

use crate::config::BindingConfig;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Receiver for formatted log lines of one client
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

static HOST_LOGGERS: Mutex<BTreeMap<u32, LogSink>> = parking_lot::const_mutex(BTreeMap::new());

/// Route events tagged with `client_id` to `sink`, or stop routing with `None`
pub fn set_host_logger(client_id: u32, sink: Option<LogSink>) {
    let mut loggers = HOST_LOGGERS.lock();
    match sink {
        Some(sink) => {
            loggers.insert(client_id, sink);
        }
        None => {
            loggers.remove(&client_id);
        }
    }
}

/// Forget every registered host logger
pub fn clear_host_loggers() {
    HOST_LOGGERS.lock().clear();
}

fn host_logger(client_id: u32) -> Option<LogSink> {
    HOST_LOGGERS.lock().get(&client_id).cloned()
}

/// A `tracing_subscriber::Layer` that formats events carrying a `client_id`
/// field and hands them to that client's registered sink.
#[derive(Debug, Default)]
pub struct HostLogBridge;

impl<S> tracing_subscriber::Layer<S> for HostLogBridge
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let Some(client_id) = visitor.client_id else {
            return;
        };
        // The lock is released before the sink runs; sinks may log again.
        let Some(sink) = host_logger(client_id) else {
            return;
        };

        let line = format!("{} {}", event.metadata().level(), visitor.line());
        sink(&line);
    }
}

/// Visitor that extracts `message` and `client_id` from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<String>,
    client_id: Option<u32>,
}

impl EventVisitor {
    /// Message followed by the remaining fields
    fn line(&self) -> String {
        if self.fields.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() {
            self.fields.join(", ")
        } else {
            format!("{}; {}", self.message, self.fields.join(", "))
        }
    }
}

impl tracing::field::Visit for EventVisitor {
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        if field.name() == "client_id" {
            self.client_id = u32::try_from(value).ok();
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        if field.name() == "client_id" {
            self.client_id = u32::try_from(value).ok();
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{} = {}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{} = {:?}", field.name(), value));
        }
    }
}

/// Install the global subscriber: env filter, optional stderr output and the
/// host bridge.
///
/// `RUST_LOG` overrides `config.log_filter`. Returns false when a global
/// subscriber was already installed, which is not an error for a library
/// loaded into a host that sets up its own.
pub fn init_logging(config: &BindingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("shadebind=info"));

    let stderr = config
        .log_to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(HostLogBridge)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(client_id: u32) -> Arc<Mutex<Vec<String>>> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink_lines = Arc::clone(&lines);
        set_host_logger(
            client_id,
            Some(Arc::new(move |line: &str| sink_lines.lock().push(line.to_string()))),
        );
        lines
    }

    #[test]
    fn test_events_reach_their_client() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        let first = capture(101);
        let second = capture(102);
        let subscriber = tracing_subscriber::registry().with(HostLogBridge);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(client_id = 101u32, "first");
            tracing::warn!(client_id = 102u32, shader_id = 4u32, "second");
            tracing::info!("untagged");
        });

        assert_eq!(*first.lock(), vec!["INFO first".to_string()]);
        assert_eq!(*second.lock(), vec!["WARN second; shader_id = 4".to_string()]);

        set_host_logger(101, None);
        set_host_logger(102, None);
    }

    #[test]
    fn test_unregistered_client_is_dropped() {
        let _lock = crate::GLOBAL_STATE_LOCK.lock();
        let lines = capture(103);
        set_host_logger(103, None);
        let subscriber = tracing_subscriber::registry().with(HostLogBridge);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(client_id = 103u32, "gone");
        });

        assert!(lines.lock().is_empty());
    }
}
