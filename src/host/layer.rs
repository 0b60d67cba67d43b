use super::level::HostLevel;
use crate::pipeline::SharedPipeline;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Forwards `tracing` events into a shared pipeline as logger-sourced records.
///
/// The event target becomes the tag and the tracing level is mapped onto the
/// host scale. Events from this crate are skipped, and a pipeline that is
/// already locked (for example while it logs its own status) drops the event
/// instead of re-entering.
#[derive(Clone)]
pub struct SyslogLayer {
    pipeline: SharedPipeline,
}

impl SyslogLayer {
    pub fn new(pipeline: SharedPipeline) -> Self {
        Self { pipeline }
    }
}

impl<S> Layer<S> for SyslogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let Some(mut pipeline) = self.pipeline.try_lock() else {
            return;
        };
        let level = HostLevel::from(*metadata.level());
        pipeline.on_tracing_event(level.as_u8(), metadata.target(), &visitor.finish());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ForwardingPipeline, PipelineConfig};
    use crate::store::MemoryFilterStore;
    use crate::testing::RecordingFactory;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_forwards_foreign_targets_only() {
        let factory = RecordingFactory::new();
        let records = factory.records();
        let mut pipeline = ForwardingPipeline::new(
            PipelineConfig::default(),
            Box::new(factory),
            Box::new(MemoryFilterStore::new()),
        );
        pipeline.setup();
        records.lock().clear();

        let shared = Arc::new(Mutex::new(pipeline));
        let subscriber = tracing_subscriber::registry().with(SyslogLayer::new(shared.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "wifi", ssid = "home", "Connected");
            tracing::info!(target: "rask_syslog_forwarder::pipeline", "own event");
        });

        let sent = records.lock().clone();
        assert_eq!(sent.len(), 1);
        let record = String::from_utf8_lossy(&sent[0]).to_string();
        assert!(record.starts_with("<6>1 - "));
        assert!(record.contains(" wifi - - - "));
        assert!(record.ends_with(" wifi - - - \u{feff}Connected ssid=home"));
    }
}
