use anyhow::Context;
use cd_core::AnalysisRequest;
use cd_inference::{Config, ImageAnalyzer, DEFAULT_BASE_URL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MODEL_NAME};
use cd_web::AppState;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let seconds = match c {
                    's' => Some(num),
                    'm' => num.checked_mul(60),
                    'h' => num.checked_mul(3600),
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = seconds
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration is too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // bare number means seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration is too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Crowd and departure-board analysis over a vision model", long_about = None)]
pub struct Cli {
    #[arg(long, env = "CD_MODEL", default_value = "gemini", help = "Model to use for inference. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-call timeout for the model provider (e.g. 60s, 2m)
    #[arg(long, env = "CD_TIMEOUT", default_value = "60s")]
    timeout: HumanDuration,
    #[arg(long, env = "CD_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "CD_HOST", default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, env = "CD_PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Analyze a local image and print the JSON result
    Analyze {
        path: PathBuf,
        /// Override the MIME type guessed from the file extension
        #[arg(long)]
        mime_type: Option<String>,
        /// Print the model's reply without shaping it
        #[arg(long)]
        raw: bool,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            model_name: self.model_name.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout.0,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

async fn analyze_file(analyzer: &ImageAnalyzer, path: &Path, mime_type: Option<String>, raw: bool) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mime_type = mime_type.unwrap_or_else(|| guess_mime_type(path));
    let mut request = AnalysisRequest::new(bytes, mime_type);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        request = request.with_file_name(name);
    }

    if raw {
        println!("{}", analyzer.generate_raw(&request).await?);
    } else {
        let result = analyzer.analyze(&request).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = cli.config();
    info!("⚙️ Starting with {:?}", config);
    // the credential is checked here, before anything is served
    let model = cd_inference::create_model(&config)?;
    let analyzer = ImageAnalyzer::new(model, &config);

    match cli.command {
        Commands::Serve { host, port } => {
            cd_web::run_server(AppState::new(analyzer), SocketAddr::new(host, port)).await?;
        }
        Commands::Analyze { path, mime_type, raw } => {
            analyze_file(&analyzer, &path, mime_type, raw).await?;
        }
    }

    Ok(())
}
