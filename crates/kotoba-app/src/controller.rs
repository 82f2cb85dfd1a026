use kanal::{AsyncReceiver, AsyncSender};
use kotoba_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::service::VocabService;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Presentation-side handle: send requests, read replies and notifications
#[derive(Clone)]
pub struct AppClient {
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
}

impl AppClient {
    pub async fn send(&self, event: AppEvent) -> anyhow::Result<()> {
        self.tx.send(event).await?;
        Ok(())
    }

    pub async fn recv(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv().await?)
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(channel_capacity.max(1)),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, service: VocabService) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop, sole owner of the service
        tasks.spawn(event_loop(
            service,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn client(&self) -> AppClient {
        AppClient {
            tx: self.channels.ui_to_app.0.clone(),
            rx: self.channels.app_to_ui.1.clone(),
        }
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
