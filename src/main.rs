use aqua_ai::assessment::{
    assessment_router, export, AssessmentRecord, AssessmentService, ParameterSet,
    PotabilityArtifacts, TREATMENT_GUIDE,
};
use aqua_ai::config::AppConfig;
use aqua_ai::error::AppError;
use aqua_ai::telemetry;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Water Potability Assessor",
    about = "Assess drinking-water potability from physicochemical measurements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a single sample from the command line
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct AssessArgs {
    /// pH level (0-14)
    #[arg(long)]
    ph: Option<f64>,
    /// Hardness in mg/L
    #[arg(long)]
    hardness: Option<f64>,
    /// Total dissolved solids in ppm
    #[arg(long)]
    solids: Option<f64>,
    /// Chloramines in ppm
    #[arg(long)]
    chloramines: Option<f64>,
    /// Sulfate in mg/L
    #[arg(long)]
    sulfate: Option<f64>,
    /// Conductivity in uS/cm
    #[arg(long)]
    conductivity: Option<f64>,
    /// Organic carbon in ppm
    #[arg(long)]
    organic_carbon: Option<f64>,
    /// Trihalomethanes in ug/L
    #[arg(long)]
    trihalomethanes: Option<f64>,
    /// Turbidity in NTU
    #[arg(long)]
    turbidity: Option<f64>,
    /// Append the export row to this CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,
    /// Load an artifact bundle instead of the bundled model
    #[arg(long)]
    model: Option<PathBuf>,
    /// Include the treatment technology guide in the output
    #[arg(long)]
    treatments: bool,
}

impl AssessArgs {
    fn parameter_set(&self) -> ParameterSet {
        ParameterSet {
            ph: self.ph,
            hardness: self.hardness,
            solids: self.solids,
            chloramines: self.chloramines,
            sulfate: self.sulfate,
            conductivity: self.conductivity,
            organic_carbon: self.organic_carbon,
            trihalomethanes: self.trihalomethanes,
            turbidity: self.turbidity,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

fn load_artifacts(path: Option<&PathBuf>) -> Result<PotabilityArtifacts, AppError> {
    match path {
        Some(path) => Ok(PotabilityArtifacts::from_path(path)?),
        None => Ok(PotabilityArtifacts::bundled()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // A broken artifact bundle must stop the process here; serving stub
    // predictions is not an option.
    let artifacts = load_artifacts(config.model.artifact_path.as_ref())?;
    let service = Arc::new(AssessmentService::new(Arc::new(artifacts)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "potability assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let artifacts = load_artifacts(args.model.as_ref())?;
    let service = AssessmentService::new(Arc::new(artifacts));

    let parameters = args.parameter_set();
    let record = service.assess(parameters)?;

    render_assessment(&record, &service);

    if args.treatments {
        render_treatment_guide();
    }

    if let Some(path) = &args.export_csv {
        export::append_to_path(path, &record.export_row())?;
        println!("\nExport row appended to {}", path.display());
    }

    Ok(())
}

fn render_assessment(record: &AssessmentRecord, service: &AssessmentService) {
    println!("Water potability assessment");
    println!("Generated: {}", record.generated_at.format("%Y-%m-%d %H:%M:%S"));

    println!("\nParameters");
    for entry in record.radar_series() {
        let unit = entry.parameter.unit();
        if unit.is_empty() {
            println!("- {}: {:.2}", entry.label, entry.observed);
        } else {
            println!("- {}: {:.2} {}", entry.label, entry.observed, unit);
        }
    }
    let missing = record.parameters.missing();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|parameter| parameter.label()).collect();
        println!("- Not reported (imputed for prediction): {}", labels.join(", "));
    }

    println!(
        "\nPrediction: {} ({} confidence)",
        record.prediction.label.display(),
        record.confidence_display()
    );

    if record.risk_factors.is_empty() {
        println!("\nRisk factors: none identified against standard guidelines");
    } else {
        println!("\nRisk factors");
        for (index, factor) in record.risk_factors.iter().enumerate() {
            println!("{}. {}", index + 1, factor.message());
        }
    }

    println!("\nRecommendations");
    for (index, recommendation) in record.recommendations.iter().enumerate() {
        println!("{}. {}", index + 1, recommendation.text);
    }

    let ranking = service.importance_ranking();
    if !ranking.is_empty() {
        println!("\nFeature importance");
        for entry in &ranking {
            println!("- {}: {:.3}", entry.feature, entry.weight);
        }
    }

    if let Some(metadata) = service.model_metadata() {
        println!(
            "\nModel: accuracy {:.0}%, precision {:.0}%, recall {:.0}% ({} training records)",
            metadata.accuracy * 100.0,
            metadata.precision * 100.0,
            metadata.recall * 100.0,
            metadata.training_records
        );
    }
}

fn render_treatment_guide() {
    println!("\nTreatment technology guide");
    for option in TREATMENT_GUIDE {
        println!(
            "- {}: {} (alternative: {}, approx. {})",
            option.contaminant, option.primary, option.alternative, option.cost_range
        );
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
