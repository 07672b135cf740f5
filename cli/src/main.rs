//! CLI entrypoint for course-agents
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use course_application::{
    GatewayError, LlmGateway, NoProgress, NoTraceSink, ProgressNotifier, RunCalibrationInput,
    RunCalibrationUseCase, RunChatUseCase, RunLoginInput, RunLoginUseCase, RunVerifyInput,
    RunVerifyUseCase, TraceSink,
};
use course_infrastructure::{
    ConfigLoader, FileConfig, FsPageArchive, HtmlLoginPortal, HttpCalibrationHub,
    JsonVerifyChannel, JsonlTraceSink, OpenAiGateway, build_client,
};
use course_presentation::cli::commands::{CalibrateArgs, LoginArgs, ServeArgs, VerifyArgs};
use course_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, SimpleProgress, StepReporter, build_router,
    ctrl_c, serve,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the daily log files
const LOG_FILE_NAME: &str = "course-agents.log";

/// Trace records of the CLI exercises, next to the log files
const TRACE_FILE_NAME: &str = "course-agents.traces.jsonl";

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    config.validate()?;

    if let Some(dir) = &cli.log_dir {
        config.logging.dir = dir.clone();
    }
    let _log_guard = init_logging(cli.verbose, &config)?;

    let Some(command) = cli.command.clone() else {
        bail!("No exercise given. Run with --help to list them.");
    };
    info!("Starting course-agents {:?}", command);

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(
        OpenAiGateway::new(
            config.openai.resolve_api_key()?,
            &config.openai.base_url,
            config.openai.timeout(),
        )
        .context("Failed to create the completion gateway")?,
    );

    let progress: Box<dyn ProgressNotifier> = if cli.quiet || cli.output == OutputFormat::Json {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(StepReporter::new())
    } else {
        // Not a terminal: plain lines instead of spinners
        Box::new(SimpleProgress)
    };

    let result = match command {
        Command::Login(args) => {
            run_login(&mut config, args, gateway, progress.as_ref(), cli.output).await
        }
        Command::Verify(args) => {
            run_verify(&mut config, args, gateway, progress.as_ref(), cli.output).await
        }
        Command::Calibrate(args) => {
            run_calibrate(&mut config, args, gateway, progress.as_ref(), cli.output).await
        }
        Command::Serve(args) => run_serve(&mut config, args, gateway).await,
    };

    if let Err(e) = &result
        && rejected_credentials(e)
    {
        eprintln!("hint: the API key was rejected; check OPENAI_API_KEY or [openai].api_key");
    }
    result
}

/// Whether any error in the chain is the completion API refusing the key
fn rejected_credentials(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<GatewayError>())
        .any(GatewayError::is_unauthorized)
}

/// Console directive for a `-v` count
fn console_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// The log file never records less than `info`
fn file_level(verbose: u8) -> &'static str {
    if verbose <= 1 { "info" } else { console_level(verbose) }
}

/// Console output plus, when enabled, a daily log file.
///
/// `RUST_LOG` overrides the level chosen by `-v`. The file always records
/// at least `info`.
fn init_logging(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level(verbose)));
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    if !config.logging.file {
        tracing_subscriber::registry().with(console).init();
        return Ok(None);
    }

    std::fs::create_dir_all(&config.logging.dir).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.logging.dir.display()
        )
    })?;
    let appender = tracing_appender::rolling::daily(&config.logging.dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(EnvFilter::new(file_level(verbose)));

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(Some(guard))
}

/// JSONL trace sink for the CLI exercises, or a no-op when file logging is off.
fn exercise_trace_sink(config: &FileConfig) -> Arc<dyn TraceSink> {
    if !config.logging.file {
        return Arc::new(NoTraceSink);
    }
    let path = config.logging.dir.join(TRACE_FILE_NAME);
    open_trace_sink(&path).unwrap_or_else(|e| {
        warn!("Could not open trace file {}: {}", path.display(), e);
        Arc::new(NoTraceSink)
    })
}

fn open_trace_sink(path: &Path) -> std::io::Result<Arc<dyn TraceSink>> {
    Ok(Arc::new(JsonlTraceSink::open(path)?))
}

fn print_outcome<T: serde::Serialize>(
    outcome: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) {
    println!("{}", ConsoleFormatter::render(outcome, format, text));
}

async fn run_login(
    config: &mut FileConfig,
    args: LoginArgs,
    gateway: Arc<dyn LlmGateway>,
    progress: &dyn ProgressNotifier,
    format: OutputFormat,
) -> Result<()> {
    if args.url.is_some() {
        config.login.url = args.url;
    }
    if args.username.is_some() {
        config.login.username = args.username;
    }
    if args.model.is_some() {
        config.login.model = args.model;
    }

    let url = config.login.resolve_url()?;
    let credentials = config.login.resolve_credentials()?;
    let client = build_client(config.http.timeout())?;

    let use_case = RunLoginUseCase::new(
        gateway,
        Arc::new(HtmlLoginPortal::new(client, url)),
        Arc::new(FsPageArchive::new(&config.login.page_dir)),
    )
    .with_trace_sink(exercise_trace_sink(config));

    let input = RunLoginInput::new(credentials).with_params(config.login.llm_params());
    let outcome = use_case
        .execute(input, progress)
        .await
        .context("Login exercise failed")?;

    print_outcome(&outcome, format, ConsoleFormatter::format_login);
    Ok(())
}

async fn run_verify(
    config: &mut FileConfig,
    args: VerifyArgs,
    gateway: Arc<dyn LlmGateway>,
    progress: &dyn ProgressNotifier,
    format: OutputFormat,
) -> Result<()> {
    if args.endpoint.is_some() {
        config.verify.endpoint = args.endpoint;
    }
    if args.model.is_some() {
        config.verify.model = args.model;
    }

    let endpoint = config.verify.resolve_endpoint()?;
    let client = build_client(config.http.timeout())?;

    let use_case = RunVerifyUseCase::new(gateway, Arc::new(JsonVerifyChannel::new(client, endpoint)))
        .with_trace_sink(exercise_trace_sink(config));

    let input = RunVerifyInput::default().with_params(config.verify.llm_params());
    let outcome = use_case
        .execute(input, progress)
        .await
        .context("Verification exercise failed")?;

    print_outcome(&outcome, format, ConsoleFormatter::format_verify);
    Ok(())
}

async fn run_calibrate(
    config: &mut FileConfig,
    args: CalibrateArgs,
    gateway: Arc<dyn LlmGateway>,
    progress: &dyn ProgressNotifier,
    format: OutputFormat,
) -> Result<()> {
    if args.hub_url.is_some() {
        config.calibration.hub_url = args.hub_url;
    }
    if args.model.is_some() {
        config.calibration.model = args.model;
    }

    let hub_url = config.calibration.resolve_hub_url()?;
    let api_key = config.calibration.resolve_api_key()?;
    let client = build_client(config.http.timeout())?;

    let mut hub = HttpCalibrationHub::new(client, hub_url)
        .with_download_dir(&config.calibration.download_dir);
    if let Some(report_url) = config.calibration.resolve_report_url() {
        hub = hub.with_report_url(report_url);
    }

    let use_case = RunCalibrationUseCase::new(gateway, Arc::new(hub))
        .with_trace_sink(exercise_trace_sink(config));

    let input = RunCalibrationInput::new(api_key).with_params(config.calibration.llm_params());
    let outcome = use_case
        .execute(input, progress)
        .await
        .context("Calibration exercise failed")?;

    print_outcome(&outcome, format, ConsoleFormatter::format_calibration);
    Ok(())
}

async fn run_serve(
    config: &mut FileConfig,
    args: ServeArgs,
    gateway: Arc<dyn LlmGateway>,
) -> Result<()> {
    if let Some(bind) = args.bind {
        config.chat.bind = bind;
    }
    if args.model.is_some() {
        config.chat.model = args.model;
    }

    let trace_sink = open_trace_sink(&config.chat.trace_file).with_context(|| {
        format!(
            "Failed to open trace file {}",
            config.chat.trace_file.display()
        )
    })?;

    let mut chat = RunChatUseCase::new(gateway)
        .with_trace_sink(trace_sink)
        .with_params(config.chat.llm_params());
    if let Some(prompt) = &config.chat.system_prompt {
        chat = chat.with_system_prompt(prompt.clone());
    }

    let listener = tokio::net::TcpListener::bind(&config.chat.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.chat.bind))?;
    println!("Chat service listening on http://{}", config.chat.bind);

    serve(listener, build_router(Arc::new(chat)), ctrl_c())
        .await
        .context("Chat service failed")?;
    Ok(())
}
