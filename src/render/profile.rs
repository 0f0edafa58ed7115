//! Profile JSON for the Firefox Profiler ("processed profile" layout).
//!
//! The trace fills `meta.startTime`, `meta.categories`, `meta.markerSchema`
//! and a single "Live Log" thread with a columnar marker table and its string
//! array. Everything else is the profiler's empty-profile skeleton (no
//! samples, no stacks, no libraries) so the importer accepts the document
//! without running its upgraders on missing fields.

use crate::trace::{Category, LiveLogPayload, TraceDocument};
use crate::trace::document::LIVE_LOG_MARKER;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Instant marker phase in the profiler's marker table.
const INSTANT_PHASE: u8 = 0;

/// Gecko profile format version the skeleton corresponds to.
const GECKO_PROFILE_VERSION: u32 = 27;

/// Processed profile format version; per-thread string arrays are still
/// valid at this version.
const PROCESSED_PROFILE_VERSION: u32 = 47;

/// Sampling interval in ms. Nothing is sampled, but the importer requires it.
const INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Profile<'a> {
    meta: Meta<'a>,
    libs: Vec<Value>,
    pages: Vec<Value>,
    counters: Vec<Value>,
    threads: Vec<Thread<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Meta<'a> {
    interval: f64,
    start_time: f64,
    process_type: u32,
    product: &'static str,
    stackwalk: u32,
    version: u32,
    preprocessed_profile_version: u32,
    symbolicated: bool,
    abi: &'static str,
    misc: &'static str,
    oscpu: &'static str,
    platform: &'static str,
    toolkit: &'static str,
    #[serde(rename = "appBuildID")]
    app_build_id: &'static str,
    #[serde(rename = "sourceURL")]
    source_url: &'static str,
    #[serde(rename = "physicalCPUs")]
    physical_cpus: u32,
    #[serde(rename = "logicalCPUs")]
    logical_cpus: u32,
    extensions: Value,
    categories: &'a [Category],
    marker_schema: Vec<MarkerSchema>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerSchema {
    name: &'static str,
    tooltip_label: &'static str,
    table_label: &'static str,
    chart_label: &'static str,
    display: &'static [&'static str],
    data: &'static [SchemaField],
}

#[derive(Debug, Serialize)]
struct SchemaField {
    key: &'static str,
    label: &'static str,
    format: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    searchable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Thread<'a> {
    process_type: &'static str,
    process_startup_time: f64,
    process_shutdown_time: Option<f64>,
    register_time: f64,
    unregister_time: Option<f64>,
    paused_ranges: Vec<Value>,
    name: &'static str,
    is_main_thread: bool,
    pid: &'static str,
    tid: u32,
    samples: Value,
    markers: MarkerTable<'a>,
    stack_table: Value,
    frame_table: Value,
    func_table: Value,
    resource_table: Value,
    native_symbols: Value,
    string_array: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerTable<'a> {
    data: Vec<&'a LiveLogPayload>,
    name: Vec<usize>,
    start_time: Vec<f64>,
    end_time: Vec<Option<f64>>,
    phase: Vec<u8>,
    category: Vec<usize>,
    length: usize,
}

const LIVE_LOG_FIELDS: &[SchemaField] = &[
    SchemaField {
        key: "startTime",
        label: "Start time",
        format: "string",
        searchable: false,
    },
    SchemaField {
        key: "message",
        label: "Log Message",
        format: "string",
        searchable: true,
    },
    SchemaField {
        key: "hour",
        label: "Hour",
        format: "string",
        searchable: false,
    },
    SchemaField {
        key: "date",
        label: "Date",
        format: "string",
        searchable: false,
    },
    SchemaField {
        key: "time",
        label: "Time",
        format: "time",
        searchable: false,
    },
    SchemaField {
        key: "taskGroupURL",
        label: "Task Group URL",
        format: "url",
        searchable: false,
    },
    SchemaField {
        key: "taskGroupProfile",
        label: "Task Group Profile",
        format: "url",
        searchable: false,
    },
];

/// An empty columnar table: every column an empty array, `length` 0.
fn empty_table(columns: &[&str]) -> Value {
    let mut table: Map<String, Value> = columns
        .iter()
        .map(|column| (column.to_string(), json!([])))
        .collect();
    table.insert("length".to_string(), json!(0));
    Value::Object(table)
}

fn empty_samples() -> Value {
    let mut samples = empty_table(&["stack", "time"]);
    if let Value::Object(map) = &mut samples {
        map.insert("weightType".to_string(), json!("samples"));
        map.insert("weight".to_string(), Value::Null);
    }
    samples
}

fn live_log_schema() -> MarkerSchema {
    MarkerSchema {
        name: LIVE_LOG_MARKER,
        tooltip_label: "{marker.data.message}",
        table_label: "{marker.data.message}",
        chart_label: "{marker.data.message}",
        display: &["marker-chart", "marker-table", "timeline-overview"],
        data: LIVE_LOG_FIELDS,
    }
}

/// Render a trace document as profile JSON.
pub fn render_profile(doc: &TraceDocument) -> anyhow::Result<String> {
    let markers = MarkerTable {
        data: doc.events.iter().map(|e| &e.data).collect(),
        name: doc.events.iter().map(|e| e.name).collect(),
        start_time: doc.events.iter().map(|e| e.start).collect(),
        end_time: vec![None; doc.events.len()],
        phase: vec![INSTANT_PHASE; doc.events.len()],
        category: doc.events.iter().map(|e| e.category).collect(),
        length: doc.events.len(),
    };

    let profile = Profile {
        meta: Meta {
            interval: INTERVAL_MS,
            start_time: doc.start_time,
            process_type: 0,
            product: "Taskcluster",
            stackwalk: 0,
            version: GECKO_PROFILE_VERSION,
            preprocessed_profile_version: PROCESSED_PROFILE_VERSION,
            symbolicated: true,
            abi: "",
            misc: "",
            oscpu: "",
            platform: "",
            toolkit: "",
            app_build_id: "",
            source_url: "",
            physical_cpus: 0,
            logical_cpus: 0,
            extensions: empty_table(&["baseURL", "id", "name"]),
            categories: &doc.categories,
            marker_schema: vec![live_log_schema()],
        },
        libs: Vec::new(),
        pages: Vec::new(),
        counters: Vec::new(),
        threads: vec![Thread {
            process_type: "default",
            process_startup_time: 0.0,
            process_shutdown_time: None,
            register_time: 0.0,
            unregister_time: None,
            paused_ranges: Vec::new(),
            name: "Live Log",
            is_main_thread: true,
            pid: "0",
            tid: 0,
            samples: empty_samples(),
            markers,
            stack_table: empty_table(&["frame", "prefix", "category", "subcategory"]),
            frame_table: empty_table(&[
                "address",
                "inlineDepth",
                "category",
                "subcategory",
                "func",
                "nativeSymbol",
                "innerWindowID",
                "implementation",
                "line",
                "column",
            ]),
            func_table: empty_table(&[
                "isJS",
                "relevantForJS",
                "name",
                "resource",
                "fileName",
                "lineNumber",
                "columnNumber",
            ]),
            resource_table: empty_table(&["lib", "name", "host", "type"]),
            native_symbols: empty_table(&["libIndex", "address", "name", "functionSize"]),
            string_array: doc.string_table.as_slice(),
        }],
    };

    Ok(serde_json::to_string(&profile)?)
}
