use clap::{Parser, Subcommand};
use taskgraph_profiler::Result;
use taskgraph_profiler::config::{
    AnchorPolicy, ConsolidateOptions, DEFAULT_PROFILE_TOOL_URL, DEFAULT_SERVER, TraceConfig,
};
use taskgraph_profiler::{graph, log, render, source, trace};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "taskgraph-profile")]
#[command(about = "Task graph consolidation and task log profiling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate one or more task-group listings into a graph report.
    Graph {
        /// Task-group listing JSON (queue `task-group/<id>/list`). Repeatable.
        #[arg(long = "group", required = true)]
        groups: Vec<String>,

        /// Collapse `name-i/N` chunks into one node per name.
        #[arg(long)]
        merge_chunks: bool,

        /// Collapse every task labelled `<TYPE>-...` into one node. Repeatable.
        #[arg(long = "merge-task-type", value_name = "TYPE")]
        merge_task_types: Vec<String>,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Build a profile from a task's live log.
    Trace {
        #[arg(long)]
        log: String,

        /// Task definition JSON (queue `task/<id>`).
        #[arg(long)]
        task: String,

        #[arg(long, env = "TASKCLUSTER_ROOT_URL", default_value = DEFAULT_SERVER)]
        server: String,

        #[arg(long, env = "TASKGRAPH_PROFILE_TOOL_URL", default_value = DEFAULT_PROFILE_TOOL_URL)]
        profile_tool_url: String,

        #[arg(long, value_enum, default_value_t = AnchorPolicy::First)]
        anchor: AnchorPolicy,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn init_tracing() {
    // RUST_LOG overrides; ignore invalid/huge filters.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Graph {
            groups,
            merge_chunks,
            merge_task_types,
            out,
        } => {
            // 1) Load every group before touching the graph.
            let nodes = source::load_task_groups(&groups)?;

            // 2) Consolidate.
            let options = ConsolidateOptions::new(merge_chunks, merge_task_types);
            let nodes = graph::consolidate(nodes, &options);

            // 3) Render.
            let json = render::render_graph_report(&nodes)?;
            write_output(out.as_deref(), &json)?;
        }
        Commands::Trace {
            log: log_path,
            task: task_path,
            server,
            profile_tool_url,
            anchor,
            out,
        } => {
            let task = source::load_task_definition(&task_path)?;

            let mut rows = log::parse_log_file(&log_path)?;
            log::fixup_log_rows(&mut rows);

            let config = TraceConfig::new(&server, &profile_tool_url, anchor);
            let doc = trace::build_trace(&rows, &task, &config);

            let json = render::render_profile(&doc)?;
            write_output(out.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn write_output(out: Option<&str>, contents: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, contents)?;
            println!("Wrote {}", path);
        }
        None => println!("{}", contents),
    }
    Ok(())
}
