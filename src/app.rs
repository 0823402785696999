use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::LogBuffer;
use crate::session::{FileStorage, SessionStore};
use crate::state::State;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    api_url: String,
    session: Arc<SessionStore>,
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log: LogBuffer) -> AppResult<()> {
        info!("Starting application against {}...", config.api_url);
        let storage = FileStorage::new(&config.session_path()?);
        debug!("Using session file {}", storage.file_path().display());
        let session = Arc::new(SessionStore::open(storage));

        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let app = App {
            api_url: config.api_url.clone(),
            state: Arc::new(Mutex::new(State::new(tx, Arc::clone(&session), log))),
            session,
        };
        app.start_network(rx);
        app.state.lock().await.start();
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let session = Arc::clone(&self.session);
        let api_url = self.api_url.to_owned();
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("{}", AppError::RuntimeCreation(e.to_string()));
                    return;
                }
            };
            runtime.block_on(async {
                let hook_state = Arc::clone(&cloned_state);
                let api = match ApiClient::new(&api_url, session) {
                    Ok(api) => api.on_session_expired(move || {
                        let state = Arc::clone(&hook_state);
                        async move {
                            warn!("Session rejected by the API; signing out.");
                            state.lock().await.session_expired();
                        }
                    }),
                    Err(e) => {
                        error!("Failed to create API client: {}", e);
                        return;
                    }
                };
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &api);
                while let Ok(network_event) = net_receiver.recv() {
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even when the
    /// loop fails.
    ///
    async fn start_ui(&self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let result = self.run_ui(stdout).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;

        result
    }

    async fn run_ui(&self, stdout: io::Stdout) -> AppResult<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        terminal.hide_cursor()?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        terminal.show_cursor()?;
        Ok(())
    }
}
