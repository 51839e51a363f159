use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::analysis::report;
use crate::analysis::synthesizer::AnalysisResult;
use crate::auth;
use crate::error::WizardError;
use crate::protocol::{ClientCommand, Route, ServerMessage};
use crate::session::{SessionContext, ANALYSIS_KEY};
use crate::wizard::machine::{ReviewWizard, TickOutcome};
use crate::wizard::processing::{ProcessingTicker, TICK_INTERVAL};

/// Channel for sending serialized frames to the connected client.
type FrameTx = mpsc::UnboundedSender<Vec<u8>>;

/// Everything that can wake a session's event loop. Commands and timer
/// ticks arrive on the same channel, so they are applied strictly in
/// the order they occurred.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Command(ClientCommand),
    ProcessingTick,
    Disconnected,
}

/// One client's WebSocket session.
///
/// Each accepted connection gets its own `ClientConnection` with its own
/// session context and wizard; nothing is shared across clients. A read
/// task decodes inbound frames into events, a write task drains outbound
/// frames, and the event loop in `run` applies one event at a time.
pub struct ClientConnection {
    addr: SocketAddr,
    /// Sender half; `send` serializes and forwards bytes through this
    /// channel to the write task.
    frame_tx: Option<FrameTx>,
    /// Kept so the processing ticker can be pointed at our own loop.
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    session: SessionContext,
    wizard: Option<ReviewWizard>,
    ticker: Option<ProcessingTicker>,
}

impl ClientConnection {
    fn new(
        addr: SocketAddr,
        frame_tx: FrameTx,
        events_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            addr,
            frame_tx: Some(frame_tx),
            events_tx,
            session: SessionContext::new(),
            wizard: None,
            ticker: None,
        }
    }

    /// Drive one client connection to completion: WebSocket handshake,
    /// then the session event loop until the client goes away.
    pub async fn run(stream: TcpStream, addr: SocketAddr) {
        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                warn!("WebSocket handshake failed for {}: {}", addr, e);
                return;
            }
        };
        info!("Client connected from {}", addr);

        let (mut ws_write, mut ws_read) = ws_stream.split();

        // Session loop -> write task -> WebSocket
        let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        // Read task and ticker -> session loop
        let (events_tx, mut events_rx) = mpsc::unbounded_channel::<SessionEvent>();

        // ── Write task ──────────────────────────────────────────────
        tokio::spawn(async move {
            while let Some(bytes) = frame_rx.recv().await {
                if let Err(e) = ws_write.send(Message::Binary(bytes.into())).await {
                    error!("Failed to send WebSocket message: {}", e);
                    break;
                }
            }
            debug!("Write task shutting down");
        });

        // ── Read task ───────────────────────────────────────────────
        let read_events = events_tx.clone();
        tokio::spawn(async move {
            while let Some(result) = ws_read.next().await {
                match result {
                    Ok(msg) => {
                        if msg.is_binary() {
                            let data = msg.into_data();
                            match rmp_serde::from_slice::<ClientCommand>(&data) {
                                Ok(command) => {
                                    if read_events.send(SessionEvent::Command(command)).is_err() {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    warn!("Failed to decode ClientCommand: {}", e);
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!("WebSocket read error: {}", e);
                        break;
                    }
                }
            }
            let _ = read_events.send(SessionEvent::Disconnected);
            debug!("Read task shutting down");
        });

        // ── Event loop ──────────────────────────────────────────────
        let mut connection = Self::new(addr, frame_tx, events_tx);
        while let Some(event) = events_rx.recv().await {
            match event {
                SessionEvent::Command(command) => connection.handle_command(command),
                SessionEvent::ProcessingTick => connection.handle_tick(),
                SessionEvent::Disconnected => break,
            }
        }

        // Dropping the connection aborts any live ticker
        info!("Session ended for {}", connection.addr);
    }

    // ── Command dispatch ────────────────────────────────────────────

    fn handle_command(&mut self, command: ClientCommand) {
        match command {
            ClientCommand::Login { email, password } => self.handle_login(&email, &password),
            ClientCommand::Register {
                name,
                email,
                password,
            } => self.handle_register(name.as_deref(), &email, &password),
            ClientCommand::StartAnalysis => self.handle_start_analysis(),
            ClientCommand::SelectGenre { genre } => {
                self.handle_wizard_edit(|wizard| wizard.select_genre(&genre));
            }
            ClientCommand::SetReviewText { text } => {
                self.handle_wizard_edit(|wizard| wizard.set_review_text(text));
            }
            ClientCommand::SubmitReview => {
                self.handle_wizard_transition(ReviewWizard::submit_review);
            }
            ClientCommand::AnswerAspect {
                question_id,
                answer,
            } => {
                self.handle_wizard_transition(|wizard| wizard.answer_aspect(question_id, answer));
            }
            ClientCommand::SubmitAspects => self.handle_submit_aspects(),
            ClientCommand::GoBackToReview => {
                self.handle_wizard_transition(ReviewWizard::go_back_to_review);
            }
            ClientCommand::OpenResults => self.handle_open_results(),
            ClientCommand::GoToDashboard => self.handle_go_to_dashboard(),
        }
    }

    // ── Auth ────────────────────────────────────────────────────────

    fn handle_login(&mut self, email: &str, password: &str) {
        match auth::login(email, password) {
            Ok(user) => {
                self.session.user = Some(user.clone());
                self.send(&ServerMessage::Authenticated { user });
                self.send(&ServerMessage::Navigate {
                    route: Route::Dashboard,
                });
            }
            Err(e) => self.send(&ServerMessage::AuthFailed {
                message: e.to_string(),
            }),
        }
    }

    fn handle_register(&mut self, name: Option<&str>, email: &str, password: &str) {
        match auth::register(email, password, name) {
            Ok(user) => {
                self.session.user = Some(user.clone());
                self.send(&ServerMessage::Authenticated { user });
                self.send(&ServerMessage::Navigate {
                    route: Route::Dashboard,
                });
            }
            Err(e) => self.send(&ServerMessage::AuthFailed {
                message: e.to_string(),
            }),
        }
    }

    /// Guard for everything behind the login wall. Sends the client back
    /// to the login route when there is no authenticated user.
    fn require_auth(&mut self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        warn!("Unauthenticated command from {}", self.addr);
        self.send(&ServerMessage::Navigate {
            route: Route::Login,
        });
        false
    }

    // ── Wizard lifecycle ────────────────────────────────────────────

    fn handle_start_analysis(&mut self) {
        if !self.require_auth() {
            return;
        }
        // A previous run's timer must not outlive its wizard
        self.cancel_ticker();
        let wizard = ReviewWizard::new();
        let snapshot = wizard.snapshot();
        self.wizard = Some(wizard);
        info!("Wizard started for {}", self.addr);

        self.send(&ServerMessage::Navigate {
            route: Route::Analysis,
        });
        self.send(&ServerMessage::Wizard { snapshot });
    }

    fn handle_go_to_dashboard(&mut self) {
        if !self.require_auth() {
            return;
        }
        self.teardown_wizard();
        self.send(&ServerMessage::Navigate {
            route: Route::Dashboard,
        });
    }

    fn teardown_wizard(&mut self) {
        if self.wizard.take().is_some() {
            info!("Wizard torn down for {}", self.addr);
        }
        self.cancel_ticker();
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    // ── Wizard commands ─────────────────────────────────────────────

    /// Apply an infallible wizard edit and send the refreshed snapshot.
    fn handle_wizard_edit(&mut self, edit: impl FnOnce(&mut ReviewWizard)) {
        if !self.require_auth() {
            return;
        }
        let Some(wizard) = self.wizard.as_mut() else {
            warn!("Wizard command from {} with no active wizard", self.addr);
            return;
        };
        edit(wizard);
        let snapshot = wizard.snapshot();
        self.send(&ServerMessage::Wizard { snapshot });
    }

    /// Apply a guarded wizard transition: on success the client gets the
    /// new snapshot, on a blocked guard it gets the reason instead.
    fn handle_wizard_transition(
        &mut self,
        transition: impl FnOnce(&mut ReviewWizard) -> Result<(), WizardError>,
    ) {
        if !self.require_auth() {
            return;
        }
        let Some(wizard) = self.wizard.as_mut() else {
            warn!("Wizard command from {} with no active wizard", self.addr);
            return;
        };
        match transition(wizard) {
            Ok(()) => {
                let snapshot = wizard.snapshot();
                self.send(&ServerMessage::Wizard { snapshot });
            }
            Err(e) => {
                debug!("Blocked wizard transition for {}: {}", self.addr, e);
                self.send(&ServerMessage::ValidationFailed {
                    message: e.to_string(),
                });
            }
        }
    }

    fn handle_submit_aspects(&mut self) {
        if !self.require_auth() {
            return;
        }
        let Some(wizard) = self.wizard.as_mut() else {
            warn!("Wizard command from {} with no active wizard", self.addr);
            return;
        };
        match wizard.submit_aspects() {
            Ok(()) => {
                let snapshot = wizard.snapshot();
                // Replacing the handle aborts any previous timer, so at
                // most one is ever live per session
                self.ticker = Some(ProcessingTicker::spawn(
                    TICK_INTERVAL,
                    self.events_tx.clone(),
                    SessionEvent::ProcessingTick,
                ));
                self.send(&ServerMessage::Wizard { snapshot });
            }
            Err(e) => {
                debug!("Blocked wizard transition for {}: {}", self.addr, e);
                self.send(&ServerMessage::ValidationFailed {
                    message: e.to_string(),
                });
            }
        }
    }

    // ── Processing ticks ────────────────────────────────────────────

    fn handle_tick(&mut self) {
        let Some(wizard) = self.wizard.as_mut() else {
            // Tick raced a teardown; nothing to advance
            return;
        };
        match wizard.tick() {
            TickOutcome::Ignored => {}
            TickOutcome::Status {
                message,
                progress_percent,
            } => {
                self.send(&ServerMessage::ProcessingStatus {
                    message: message.to_string(),
                    progress_percent,
                });
            }
            TickOutcome::Complete(result) => {
                if let Err(e) = self.session.store.put(ANALYSIS_KEY, &result) {
                    error!("Failed to store analysis result: {}", e);
                }
                self.send(&ServerMessage::Navigate {
                    route: Route::Visualizations,
                });
                // The run is over; the result lives in the store now
                self.teardown_wizard();
            }
        }
    }

    // ── Results ─────────────────────────────────────────────────────

    fn handle_open_results(&mut self) {
        if !self.require_auth() {
            return;
        }
        match self.session.store.get::<AnalysisResult>(ANALYSIS_KEY) {
            Ok(Some(result)) => {
                let view = report::results_view(&result);
                self.send(&ServerMessage::Results { view });
            }
            Ok(None) => {
                // Nothing analyzed yet; the page redirects to the wizard
                self.send(&ServerMessage::Navigate {
                    route: Route::Analysis,
                });
            }
            Err(e) => {
                error!("Failed to read stored analysis: {}", e);
                self.send(&ServerMessage::Navigate {
                    route: Route::Analysis,
                });
            }
        }
    }

    // ── Outbound ────────────────────────────────────────────────────

    /// Serialize a message via msgpack and hand it to the write task.
    /// If the client is gone (or the channel was dropped), this is a
    /// no-op.
    fn send(&mut self, msg: &ServerMessage) {
        if let Some(tx) = &self.frame_tx {
            match rmp_serde::to_vec_named(msg) {
                Ok(bytes) => {
                    if tx.send(bytes).is_err() {
                        warn!("Client {} gone, stopping sends", self.addr);
                        self.frame_tx = None;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize ServerMessage: {}", e);
                }
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::questions::{AspectAnswer, ASPECT_QUESTIONS};
    use crate::wizard::step::WizardStep;

    fn connection() -> (
        ClientConnection,
        mpsc::UnboundedReceiver<Vec<u8>>,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let addr = "127.0.0.1:9999".parse().unwrap();
        (
            ClientConnection::new(addr, frame_tx, events_tx),
            frame_rx,
            events_rx,
        )
    }

    fn next_message(frames: &mut mpsc::UnboundedReceiver<Vec<u8>>) -> ServerMessage {
        let bytes = frames.try_recv().expect("expected an outbound frame");
        rmp_serde::from_slice(&bytes).expect("outbound frame should decode")
    }

    fn login(conn: &mut ClientConnection, frames: &mut mpsc::UnboundedReceiver<Vec<u8>>) {
        conn.handle_command(ClientCommand::Login {
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
        });
        let _authenticated = next_message(frames);
        let _navigate = next_message(frames);
    }

    fn start_wizard(conn: &mut ClientConnection, frames: &mut mpsc::UnboundedReceiver<Vec<u8>>) {
        login(conn, frames);
        conn.handle_command(ClientCommand::StartAnalysis);
        let _navigate = next_message(frames);
        let _snapshot = next_message(frames);
    }

    fn answer_everything(
        conn: &mut ClientConnection,
        frames: &mut mpsc::UnboundedReceiver<Vec<u8>>,
    ) {
        for question in ASPECT_QUESTIONS {
            conn.handle_command(ClientCommand::AnswerAspect {
                question_id: question.id,
                answer: AspectAnswer::Yes,
            });
            let _snapshot = next_message(frames);
        }
    }

    fn drive_to_processing(
        conn: &mut ClientConnection,
        frames: &mut mpsc::UnboundedReceiver<Vec<u8>>,
    ) {
        conn.handle_command(ClientCommand::SetReviewText {
            text: "Fine".to_string(),
        });
        let _snapshot = next_message(frames);
        conn.handle_command(ClientCommand::SubmitReview);
        let _snapshot = next_message(frames);
        answer_everything(conn, frames);
        conn.handle_command(ClientCommand::SubmitAspects);
        let _snapshot = next_message(frames);
    }

    #[test]
    fn empty_credentials_fail_with_the_form_message() {
        let (mut conn, mut frames, _events) = connection();
        conn.handle_command(ClientCommand::Login {
            email: String::new(),
            password: "pw".to_string(),
        });
        match next_message(&mut frames) {
            ServerMessage::AuthFailed { message } => {
                assert_eq!(message, "Please enter both email and password");
            }
            other => panic!("expected AuthFailed, got {:?}", other),
        }
        assert!(!conn.session.is_authenticated());
    }

    #[test]
    fn login_authenticates_and_navigates_to_dashboard() {
        let (mut conn, mut frames, _events) = connection();
        conn.handle_command(ClientCommand::Login {
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
        });

        match next_message(&mut frames) {
            ServerMessage::Authenticated { user } => assert_eq!(user.name, "sam"),
            other => panic!("expected Authenticated, got {:?}", other),
        }
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Dashboard),
            other => panic!("expected Navigate, got {:?}", other),
        }
    }

    #[test]
    fn guarded_commands_redirect_unauthenticated_clients_to_login() {
        let (mut conn, mut frames, _events) = connection();
        for command in [
            ClientCommand::StartAnalysis,
            ClientCommand::SubmitReview,
            ClientCommand::OpenResults,
            ClientCommand::GoToDashboard,
        ] {
            conn.handle_command(command);
            match next_message(&mut frames) {
                ServerMessage::Navigate { route } => assert_eq!(route, Route::Login),
                other => panic!("expected Navigate, got {:?}", other),
            }
        }
        assert!(conn.wizard.is_none());
    }

    #[test]
    fn start_analysis_opens_a_fresh_wizard() {
        let (mut conn, mut frames, _events) = connection();
        login(&mut conn, &mut frames);

        conn.handle_command(ClientCommand::StartAnalysis);
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Analysis),
            other => panic!("expected Navigate, got {:?}", other),
        }
        match next_message(&mut frames) {
            ServerMessage::Wizard { snapshot } => {
                assert_eq!(snapshot.step_number, 1);
                assert_eq!(snapshot.genre, "Drama");
                assert!(snapshot.review_text.is_empty());
            }
            other => panic!("expected Wizard, got {:?}", other),
        }
    }

    #[test]
    fn empty_review_submit_reports_the_guard_reason() {
        let (mut conn, mut frames, _events) = connection();
        start_wizard(&mut conn, &mut frames);

        conn.handle_command(ClientCommand::SubmitReview);
        match next_message(&mut frames) {
            ServerMessage::ValidationFailed { message } => assert_eq!(message, "empty review"),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn incomplete_answers_report_the_guard_reason() {
        let (mut conn, mut frames, _events) = connection();
        start_wizard(&mut conn, &mut frames);
        conn.handle_command(ClientCommand::SetReviewText {
            text: "Stunning".to_string(),
        });
        let _snapshot = next_message(&mut frames);
        conn.handle_command(ClientCommand::SubmitReview);
        let _snapshot = next_message(&mut frames);

        conn.handle_command(ClientCommand::SubmitAspects);
        match next_message(&mut frames) {
            ServerMessage::ValidationFailed { message } => {
                assert_eq!(message, "incomplete answers");
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
        assert!(conn.ticker.is_none());
    }

    #[tokio::test]
    async fn the_full_wizard_flow_reaches_the_results_view() {
        let (mut conn, mut frames, _events) = connection();
        start_wizard(&mut conn, &mut frames);

        conn.handle_command(ClientCommand::SetReviewText {
            text: "A stunning, boring mess that I somehow loved".to_string(),
        });
        let _snapshot = next_message(&mut frames);

        conn.handle_command(ClientCommand::SubmitReview);
        match next_message(&mut frames) {
            ServerMessage::Wizard { snapshot } => assert_eq!(snapshot.step_number, 2),
            other => panic!("expected Wizard, got {:?}", other),
        }

        answer_everything(&mut conn, &mut frames);
        conn.handle_command(ClientCommand::SubmitAspects);
        match next_message(&mut frames) {
            ServerMessage::Wizard { snapshot } => {
                assert_eq!(snapshot.step, WizardStep::Processing);
            }
            other => panic!("expected Wizard, got {:?}", other),
        }
        assert!(conn.ticker.is_some());

        // Drive the playback directly instead of waiting on the timer
        for tick in 0..6 {
            conn.handle_tick();
            match next_message(&mut frames) {
                ServerMessage::ProcessingStatus {
                    progress_percent, ..
                } => {
                    assert!(progress_percent > tick as f64 / 6.0 * 100.0);
                }
                other => panic!("expected ProcessingStatus, got {:?}", other),
            }
        }

        conn.handle_tick();
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Visualizations),
            other => panic!("expected Navigate, got {:?}", other),
        }
        assert!(conn.ticker.is_none());
        assert!(conn.wizard.is_none()); // completed runs are discarded

        conn.handle_command(ClientCommand::OpenResults);
        match next_message(&mut frames) {
            ServerMessage::Results { view } => {
                assert_eq!(view.genre, "Drama");
                assert_eq!(view.aspect_scores.len(), 5);
                assert!(!view.review_segments.is_empty());
            }
            other => panic!("expected Results, got {:?}", other),
        }
    }

    #[test]
    fn open_results_without_a_result_redirects_to_analysis() {
        let (mut conn, mut frames, _events) = connection();
        login(&mut conn, &mut frames);

        conn.handle_command(ClientCommand::OpenResults);
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Analysis),
            other => panic!("expected Navigate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn start_analysis_mid_processing_restarts_from_step_one() {
        let (mut conn, mut frames, _events) = connection();
        start_wizard(&mut conn, &mut frames);
        drive_to_processing(&mut conn, &mut frames);
        assert!(conn.ticker.is_some());

        conn.handle_command(ClientCommand::StartAnalysis);
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Analysis),
            other => panic!("expected Navigate, got {:?}", other),
        }
        match next_message(&mut frames) {
            ServerMessage::Wizard { snapshot } => {
                assert_eq!(snapshot.step_number, 1);
                assert!(snapshot.review_text.is_empty());
            }
            other => panic!("expected Wizard, got {:?}", other),
        }
        assert!(conn.ticker.is_none()); // the old run's timer went with it

        // A tick queued before the restart lands on the fresh wizard
        conn.handle_tick();
        assert!(frames.try_recv().is_err()); // dropped, no frames
    }

    #[tokio::test]
    async fn go_to_dashboard_tears_the_wizard_down() {
        let (mut conn, mut frames, _events) = connection();
        start_wizard(&mut conn, &mut frames);
        drive_to_processing(&mut conn, &mut frames);
        assert!(conn.ticker.is_some());

        conn.handle_command(ClientCommand::GoToDashboard);
        match next_message(&mut frames) {
            ServerMessage::Navigate { route } => assert_eq!(route, Route::Dashboard),
            other => panic!("expected Navigate, got {:?}", other),
        }
        assert!(conn.wizard.is_none());
        assert!(conn.ticker.is_none());

        // A tick that was already queued when the wizard died is dropped
        conn.handle_tick();
        assert!(frames.try_recv().is_err()); // no further frames
    }

    #[test]
    fn wizard_commands_without_a_wizard_are_ignored() {
        let (mut conn, mut frames, _events) = connection();
        login(&mut conn, &mut frames);

        conn.handle_command(ClientCommand::SubmitReview);
        assert!(frames.try_recv().is_err()); // nothing sent, nothing broken
    }
}
