use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use nyayasetu::service::types::{ComplaintQuery, ExportFormat, LawyerQuery, LoginCredentials, OtpLogin};
use nyayasetu::{ApiClient, ApiConfig, ApiError, ApiResponse, ApiService, FileSessionStore, LogNavigator, ProgressFn, UploadFile};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "nyayasetu", about = "NyayaSetu citizen-services API CLI")]
struct Cli {
    /// Overrides `NYAYASETU_API_BASE_URL` / `VITE_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "NYAYASETU_SESSION_FILE", default_value = ".nyayasetu/session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NYAYASETU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    LoginOtp {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    SendOtp {
        phone: String,
    },
    Logout,
    Profile,
    Complaints(ComplaintsCommand),
    Lawyers(LawyersCommand),
    Notifications(NotificationsCommand),
    Upload {
        path: PathBuf,
        #[arg(long)]
        folder: Option<String>,
    },
    ExportReport {
        report_id: String,
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ComplaintsCommand {
    #[command(subcommand)]
    command: ComplaintsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ComplaintsSubcommand {
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Get {
        id: String,
    },
    Track {
        tracking_id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Stats,
}

#[derive(Args, Debug)]
struct LawyersCommand {
    #[command(subcommand)]
    command: LawyersSubcommand,
}

#[derive(Subcommand, Debug)]
enum LawyersSubcommand {
    List {
        #[arg(long)]
        speciality: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        availability: Option<String>,
        #[arg(long)]
        pro_bono: Option<bool>,
    },
    Get {
        id: String,
    },
}

#[derive(Args, Debug)]
struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotificationsSubcommand {
    List,
    Read { id: String },
    ReadAll,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Api(error)) => {
            let info = nyayasetu::handle_api_error(&error);
            eprintln!("{}", serde_json::to_string_pretty(&info).unwrap_or_else(|_| info.message.clone()));
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match cli.base_url {
        Some(base_url) => {
            let mut config = ApiConfig::from_env();
            config.base_url = ApiConfig::new(base_url).base_url;
            config
        }
        None => ApiConfig::from_env(),
    };
    let client = ApiClient::builder(config)
        .session(Arc::new(FileSessionStore::new(cli.session_file)))
        .navigator(Arc::new(LogNavigator))
        .build()?;
    let api = ApiService::new(client);

    match cli.command {
        Command::Login { email, password } => {
            let resp = api.auth().login(&LoginCredentials { email, password }).await?;
            print_response(&resp)
        }
        Command::LoginOtp { phone, otp } => {
            let resp = api.auth().login_with_otp(&OtpLogin { phone, otp }).await?;
            print_response(&resp)
        }
        Command::SendOtp { phone } => print_response(&api.auth().send_otp(&phone).await?),
        Command::Logout => print_response(&api.auth().logout().await?),
        Command::Profile => print_response(&api.user().profile().await?),
        Command::Complaints(complaints) => run_complaints(&api, complaints).await,
        Command::Lawyers(lawyers) => run_lawyers(&api, lawyers).await,
        Command::Notifications(notifications) => run_notifications(&api, notifications).await,
        Command::Upload { path, folder } => {
            let file = UploadFile::from_path(&path).await?;
            let progress: ProgressFn = Arc::new(|pct| {
                eprint!("\rupload: {pct:>3}%");
                if pct == 100 {
                    eprintln!();
                }
            });
            let file_name = file.file_name.clone();
            let resp = api.files().upload(file, folder.as_deref(), Some(progress)).await?;
            tracing::info!(file = %file_name, status = resp.status, "upload complete");
            print_response(&resp)
        }
        Command::ExportReport { report_id, format, out } => {
            let resp = api.admin().export_report(&report_id, format).await?;
            tokio::fs::write(&out, resp.bytes())
                .await
                .map_err(|source| CliError::Write { path: out.clone(), source })?;
            tracing::info!(report_id = %report_id, bytes = resp.bytes().len(), path = %out.display(), "report exported");
            Ok(())
        }
    }
}

async fn run_complaints(api: &ApiService, complaints: ComplaintsCommand) -> Result<(), CliError> {
    let resp = match complaints.command {
        ComplaintsSubcommand::List { page, limit, category, status } => {
            api.complaints()
                .list(&ComplaintQuery { page, limit, category, status })
                .await?
        }
        ComplaintsSubcommand::Get { id } => api.complaints().get(&id).await?,
        ComplaintsSubcommand::Track { tracking_id } => api.complaints().track(&tracking_id).await?,
        ComplaintsSubcommand::Create { data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            api.complaints().create(&body).await?
        }
        ComplaintsSubcommand::Stats => api.complaints().stats().await?,
    };
    print_response(&resp)
}

async fn run_lawyers(api: &ApiService, lawyers: LawyersCommand) -> Result<(), CliError> {
    let resp = match lawyers.command {
        LawyersSubcommand::List { speciality, location, availability, pro_bono } => {
            api.legal()
                .lawyers(&LawyerQuery { speciality, location, availability, pro_bono })
                .await?
        }
        LawyersSubcommand::Get { id } => api.legal().lawyer(&id).await?,
    };
    print_response(&resp)
}

async fn run_notifications(api: &ApiService, notifications: NotificationsCommand) -> Result<(), CliError> {
    let resp = match notifications.command {
        NotificationsSubcommand::List => api.notifications().list().await?,
        NotificationsSubcommand::Read { id } => api.notifications().mark_read(&id).await?,
        NotificationsSubcommand::ReadAll => api.notifications().mark_all_read().await?,
    };
    print_response(&resp)
}

fn print_response(resp: &ApiResponse) -> Result<(), CliError> {
    match resp.json_value() {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None if resp.body.is_empty() => {}
        None => write_raw(&mut std::io::stdout().lock(), resp)?,
    }
    Ok(())
}

fn write_raw(out: &mut impl Write, resp: &ApiResponse) -> Result<(), CliError> {
    out.write_all(resp.bytes()).map_err(CliError::Stdout)?;
    out.flush().map_err(CliError::Stdout)
}
