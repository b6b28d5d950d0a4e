//! whisper-transcribe: upload one audio file and print the endpoint's raw response.
//!
//! Usage:
//!   whisper-transcribe <audio-file> [--language <code>] [--format <fmt>]
//!                      [--model <id>] [--config <yaml>] [--timeout <secs>]

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;
use whisper_client::{
    CallContext, ClientConfig, TranscriptionClientBuilder, TranscriptionRequest, FORMAT_TEXT,
    LANGUAGE_ENGLISH,
};

struct Args {
    file: PathBuf,
    language: String,
    format: String,
    model: Option<String>,
    config: Option<PathBuf>,
    timeout: Option<u64>,
}

fn print_usage() {
    println!(
        r#"whisper-transcribe — send an audio file to a transcription endpoint

USAGE:
    whisper-transcribe <AUDIO_FILE> [OPTIONS]

OPTIONS:
    --language <code>     Language of the audio (default: en)
    --format <fmt>        Response format: json, text, srt, verbose_json, vtt (default: text)
    --model <id>          Model identifier (default: whisper-1)
    --config <yaml>       Client configuration file
    --timeout <secs>      Give up after this many seconds
    -h, --help            Show this help message

ENVIRONMENT:
    OPENAI_API_KEY        Bearer key
    WHISPER_MODEL         Model identifier
    WHISPER_BASE_URL      Endpoint base URL
    WHISPER_TIMEOUT_SECS  Transport timeout
    RUST_LOG              Log filter (e.g. whisper_client=debug)"#
    );
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Args>> {
    let mut file = None;
    let mut language = LANGUAGE_ENGLISH.to_string();
    let mut format = FORMAT_TEXT.to_string();
    let mut model = None;
    let mut config = None;
    let mut timeout = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--language" => language = value("--language")?,
            "--format" => format = value("--format")?,
            "--model" => model = Some(value("--model")?),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--timeout" => {
                let raw = value("--timeout")?;
                timeout = Some(raw.parse::<u64>().with_context(|| format!("invalid --timeout: {raw}"))?);
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => {
                if file.is_some() {
                    bail!("only one audio file may be given");
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    let file = file.context("missing audio file")?;
    Ok(Some(Args {
        file,
        language,
        format,
        model,
        config,
        timeout,
    }))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    let mut builder = TranscriptionClientBuilder::from_config(config);
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let client = builder.build()?;

    let audio = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("opening {}", args.file.display()))?;

    let ctx = match args.timeout {
        Some(secs) => CallContext::with_timeout(Duration::from_secs(secs)),
        None => CallContext::background(),
    };
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let request =
        TranscriptionRequest::new(file_name(&args.file), args.language, args.format, audio);
    let response = client.transcribe_audio(&ctx, request).await?;

    if response.is_success() {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(response.body()).await?;
        stdout.flush().await?;
        Ok(())
    } else {
        eprintln!("HTTP {}", response.status());
        eprintln!("{}", response.text());
        std::process::exit(1);
    }
}
