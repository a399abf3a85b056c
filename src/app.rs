use crate::{
    cli::{self, Command},
    commands, context, rest,
    storage::{SqliteStudentRepository, StudentRepository},
};
use anyhow::{Context as AnyhowContext, Result};
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// Decoupled from CLI parsing so tests can inject their own repository.
pub struct App<R = SqliteStudentRepository> {
    config: context::Context,
    repo: R,
    shutdown: CancellationToken,
}

impl App {
    /// Build the App from CLI arguments: log file, storage directory and
    /// schema are all set up here.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = cli::parse();

        crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new))
            .context("opening log file")?;

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let repo = init_storage(&ctx)?;
        Ok((App::new(ctx, repo), cli))
    }
}

impl<R: StudentRepository + Clone + Send + Sync + 'static> App<R> {
    fn new(config: context::Context, repo: R) -> Self {
        Self {
            config,
            repo,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn run_command(&self, cmd: &Command, out: &mut impl Write) -> Result<()> {
        commands::run(cmd, self.repo.clone(), out)
    }

    /// Serve the REST API until Ctrl-C or until the server stops by itself.
    pub async fn run_server(&self) -> Result<()> {
        let (mut rest_handle, _) = self.spawn_rest_server().await?;
        self.wait_for_shutdown(&mut rest_handle).await
    }

    /// Bind the configured address, then serve from a background task.
    /// Returns the address actually bound, which differs from the
    /// configured one when port 0 is requested.
    async fn spawn_rest_server(&self) -> Result<(JoinHandle<Result<()>>, SocketAddr)> {
        let listener = TcpListener::bind(self.config.api_listen)
            .await
            .with_context(|| format!("binding REST listener on {}", self.config.api_listen))?;
        let addr = listener.local_addr()?;
        let repo = self.repo.clone();
        let token = self.shutdown.clone();

        let handle = tokio::spawn(async move { rest::serve(listener, repo, token).await });
        Ok((handle, addr))
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<Result<()>>) -> Result<()> {
        let exited_early = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("🧨 Ctrl-C received, shutting down...");
                None
            }
            res = &mut *rest_task => Some(res),
        };

        self.shutdown.cancel();

        let outcome = match exited_early {
            Some(res) => {
                log::error!("REST task exited unexpectedly");
                res.context("REST task panicked")?
            }
            None => rest_task.await.context("REST task panicked")?,
        };

        log::info!("✅ Shutdown complete");
        outcome
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting sms");
    log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
    log::info!("🗄️ Database: {}", ctx.db_path().to_string_lossy());
    if let Some(path) = ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path.to_string_lossy());
    }
}

fn init_storage(ctx: &context::Context) -> Result<SqliteStudentRepository> {
    std::fs::create_dir_all(&ctx.data_dir)
        .with_context(|| format!("creating data dir {}", ctx.data_dir.display()))?;

    let repo = SqliteStudentRepository::open(ctx.store_config());
    if ctx.reset {
        repo.provider().reset_all().context("resetting storage")?;
    }
    repo.provider().init().context("initializing storage")?;
    log::debug!("Student store ready at {}", repo.provider().path().display());

    Ok(repo)
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    match cli.cmd.unwrap_or(Command::List) {
        Command::Serve { .. } => app.run_server().await,
        cmd => app.run_command(&cmd, &mut std::io::stdout().lock()),
    }
}
