use anyhow::{anyhow, Context};
use studysphere::config::AppConfig;
use studysphere::gateway::GatewayPipeline;
use studysphere::session::{ConversationState, SessionController};
use studysphere::speech::CapturePipeline;
use studysphere::ui::StudyApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studysphere=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting StudySphere study partner");

    let config = AppConfig::default();
    config
        .validate()
        .map_err(|e| anyhow!(e))
        .context("invalid configuration")?;

    // Gateway worker for the remote QA service
    let gateway = GatewayPipeline::new(config.gateway.clone());
    let gateway_tx = gateway.command_sender();
    let gateway_rx = gateway.event_receiver();
    gateway.start_worker()?;

    // Voice capture. No speech recognizer is bundled for this target, so
    // the pipeline reports unsupported and the voice button stays
    // disabled; a platform recognizer plugs in through `SpeechRecognizer`.
    let capture = CapturePipeline::new(None);
    let capture_controls = capture.controls();
    let capture_rx = capture.event_receiver();
    capture.start_worker()?;

    let mut controller = SessionController::new(ConversationState::new());
    controller.attach_gateway(gateway_tx, gateway_rx);
    controller.attach_capture(capture_rx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 560.0])
            .with_title("StudySphere"),
        ..Default::default()
    };

    eframe::run_native(
        "StudySphere",
        options,
        Box::new(move |cc| Ok(Box::new(StudyApp::new(cc, controller, capture_controls)))),
    )
    .map_err(|e| anyhow!("failed to start UI: {e}"))
}
