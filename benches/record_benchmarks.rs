use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rask_syslog_forwarder::domain::LogSource;
use rask_syslog_forwarder::filter::{FilterMode, FilterSet};
use rask_syslog_forwarder::host::parse_line;
use rask_syslog_forwarder::pipeline::{ForwardingPipeline, PipelineConfig};
use rask_syslog_forwarder::store::MemoryFilterStore;
use rask_syslog_forwarder::syslog::RecordFormatter;
use rask_syslog_forwarder::testing::RecordingFactory;
use std::hint::black_box;

const COLORED_LINE: &str = "\x1b[0;32m[I][wifi:102]: Connected to access point 'home' (ch 6)\x1b[0m";

fn benchmark_record_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_formatting");
    group.throughput(Throughput::Bytes(COLORED_LINE.len() as u64));

    group.bench_function("format_stripped", |b| {
        let formatter = RecordFormatter::new(true);
        b.iter(|| formatter.format(6, "living_room", "wifi", black_box(COLORED_LINE)));
    });

    group.bench_function("format_verbatim", |b| {
        let formatter = RecordFormatter::new(false);
        b.iter(|| formatter.format(6, "living_room", "wifi", black_box(COLORED_LINE)));
    });

    group.bench_function("parse_host_line", |b| {
        b.iter(|| parse_line(black_box(COLORED_LINE)));
    });

    group.finish();
}

fn benchmark_filtering(c: &mut Criterion) {
    let filters = FilterSet::parse("wifi, api, sensor, ota, mqtt", FilterMode::Exclude);

    c.bench_function("should_pass", |b| {
        b.iter(|| {
            for tag in ["wifi:scan", "logger", "sensor:temp", "component"] {
                black_box(filters.should_pass(black_box(tag)));
            }
        });
    });
}

fn benchmark_pipeline_log(c: &mut Criterion) {
    let factory = RecordingFactory::new();
    let records = factory.records();
    let mut pipeline = ForwardingPipeline::new(
        PipelineConfig {
            logger_prefix: "esp".to_string(),
            ..PipelineConfig::default()
        },
        Box::new(factory),
        Box::new(MemoryFilterStore::new()),
    );
    pipeline.setup();

    c.bench_function("pipeline_log_logger_line", |b| {
        b.iter(|| {
            pipeline.log(3, "wifi:102", black_box(COLORED_LINE), LogSource::Logger);
            records.lock().clear();
        });
    });
}

criterion_group!(
    benches,
    benchmark_record_formatting,
    benchmark_filtering,
    benchmark_pipeline_log
);
criterion_main!(benches);
