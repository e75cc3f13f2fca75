//! The aggregator's single event loop: one cooperative `tokio::select!` over
//! the Control, Stream, and Mailbox inboxes plus a periodic tick
//! (`spec.md` §4.5).

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::bus::{BusClient, ControlMessage, MailboxReply, MailboxRequest, StreamMessage};
use crate::config::Config;
use crate::counters::CounterEngine;
use crate::error::AppError;
use crate::mailbox::{AtomicMetrics, BoundedMailbox, BoundedMailboxSender, MailboxReceiver};
use crate::metrics_sink::MetricSink;
use crate::publisher::MetricPublisher;
use crate::resync::ResyncController;
use crate::state::{AlertStore, AssetStore};

const CONTROL_CAPACITY: usize = 16;
const STREAM_CAPACITY: usize = 1024;
const MAILBOX_CAPACITY: usize = 256;

const ASSET_AGENT: &str = "asset-agent";
const ALERT_LIST_AGENT: &str = "fty-alert-list";
const ASSETS_IN_CONTAINER_SUBJECT: &str = "ASSETS_IN_CONTAINER";
const ASSET_DETAIL_SUBJECT: &str = "ASSET_DETAIL";
const ALERT_LIST_SUBJECT: &str = "rfc-alerts-list";
const REPUBLISH_SUBJECT: &str = "REPUBLISH";

/// Monotonic and wall-clock seconds from a single process-local origin.
///
/// `AlertCount.lastSent` and published-metric timestamps use wall seconds;
/// tick deadlines and the resync watchdog use monotonic seconds so a system
/// clock step can't itself wedge or unwedge the resync state machine.
struct Clock {
    start: Instant,
}

impl Clock {
    fn new() -> Self {
        Self { start: Instant::now() }
    }

    fn monotonic_secs(&self) -> i64 {
        self.start.elapsed().as_secs() as i64
    }

    fn wall_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Sending halves of the three inboxes, handed back from [`AggregatorActor::new`]
/// so the bus glue and any control timers can feed the actor.
pub struct ActorHandles {
    pub control: BoundedMailboxSender<ControlMessage, AtomicMetrics>,
    pub stream: BoundedMailboxSender<StreamMessage, AtomicMetrics>,
    pub mailbox: BoundedMailboxSender<MailboxReply, AtomicMetrics>,
}

/// Owns all mutable state and drives the event loop described in
/// `spec.md` §4.5. Generic over the bus client and metric sink so tests can
/// substitute in-memory implementations without touching the dispatch
/// logic.
pub struct AggregatorActor<B: BusClient, S: MetricSink> {
    assets: AssetStore,
    alerts: AlertStore,
    counters: CounterEngine,
    resync: ResyncController,
    publisher: MetricPublisher,
    sink: S,
    bus: B,
    config: Config,
    clock: Clock,
    last_tick_mono: i64,
    should_terminate: bool,
    control: BoundedMailbox<ControlMessage, AtomicMetrics>,
    stream: BoundedMailbox<StreamMessage, AtomicMetrics>,
    mailbox: BoundedMailbox<MailboxReply, AtomicMetrics>,
}

impl<B: BusClient, S: MetricSink> AggregatorActor<B, S> {
    /// Registers with the bus and builds the actor plus its inbox senders.
    /// Registration failure is fatal per `spec.md` §7: the caller should
    /// treat an `Err` here as an init failure and exit non-zero.
    pub async fn new(config: Config, mut bus: B, sink: S) -> Result<(Self, ActorHandles), AppError> {
        bus.register()
            .await
            .map_err(|err| AppError::BusRegistration(err.to_string()))?;

        let (control, control_tx) = BoundedMailbox::new(CONTROL_CAPACITY);
        let (stream, stream_tx) = BoundedMailbox::new(STREAM_CAPACITY);
        let (mailbox, mailbox_tx) = BoundedMailbox::new(MAILBOX_CAPACITY);

        let actor = Self {
            assets: AssetStore::new(),
            alerts: AlertStore::new(),
            counters: CounterEngine::new(),
            resync: ResyncController::new(),
            publisher: MetricPublisher::new(config.metric_ttl_secs),
            sink,
            bus,
            config,
            clock: Clock::new(),
            last_tick_mono: 0,
            should_terminate: false,
            control,
            stream,
            mailbox,
        };

        Ok((
            actor,
            ActorHandles {
                control: control_tx,
                stream: stream_tx,
                mailbox: mailbox_tx,
            },
        ))
    }

    /// Runs until a `$TERM` control message is received.
    pub async fn run(mut self) {
        loop {
            let now_mono = self.clock.monotonic_secs();
            let deadline = self.last_tick_mono + self.config.poller_timeout_secs;
            let wait_secs = (deadline - now_mono).max(0) as u64;

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(wait_secs)) => {
                    self.tick().await;
                }
                envelope = self.control.recv() => {
                    if let Some(envelope) = envelope {
                        self.handle_pipe(envelope.payload).await;
                    }
                }
                envelope = self.stream.recv() => {
                    if let Some(envelope) = envelope {
                        self.handle_stream(envelope.payload);
                    }
                }
                envelope = self.mailbox.recv() => {
                    if let Some(envelope) = envelope {
                        self.handle_mailbox(envelope.payload).await;
                    }
                }
            }

            if self.should_terminate {
                break;
            }
        }
    }

    /// Drains whatever `CounterEngine` queued during the last mutation and
    /// writes it to the sink, subject to the publisher's gates.
    fn flush_publishes(&mut self, now_wall_secs: i64) {
        let ready = self.resync.is_ready();
        for request in self.counters.take_pending() {
            self.publisher.publish(
                &request.asset,
                request.recursive,
                ready,
                &self.assets,
                &mut self.counters,
                &self.sink,
                now_wall_secs,
            );
        }
    }

    async fn handle_pipe(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Term => self.should_terminate = true,
            ControlMessage::Resync => self.begin_resync().await,
        }
    }

    fn handle_stream(&mut self, message: StreamMessage) {
        match message {
            StreamMessage::Asset(event) => {
                self.assets.process_asset(event, &self.alerts, &mut self.counters);
            }
            StreamMessage::Alert(alert) => {
                self.alerts.process_alert(alert, &self.assets, &mut self.counters);
            }
        }
        self.flush_publishes(self.clock.wall_secs());
    }

    async fn handle_mailbox(&mut self, reply: MailboxReply) {
        match reply {
            MailboxReply::RepublishQuery { correlation, from } => {
                self.handle_republish_query(correlation, from).await;
            }
            MailboxReply::AlertsList { alerts } => self.handle_alerts_list(alerts),
            MailboxReply::AssetsInContainer { names } => self.handle_assets_in_container(names).await,
            MailboxReply::AssetDetail { event } => self.handle_asset_detail(event).await,
        }
    }

    async fn handle_republish_query(&mut self, correlation: crate::util::CorrelationId, from: String) {
        let ready = self.resync.is_ready();
        if ready {
            self.become_ready();
        }
        let response = MailboxRequest::RepublishResponse { correlation, ready };
        if let Err(err) = self.bus.send_mailbox(&from, REPUBLISH_SUBJECT, response).await {
            warn!(%err, "failed to send REPUBLISH response");
        }
    }

    fn handle_alerts_list(&mut self, alerts: Vec<crate::domain::Alert>) {
        for alert in alerts {
            self.alerts.process_alert(alert, &self.assets, &mut self.counters);
        }
        self.flush_publishes(self.clock.wall_secs());
        if self.resync.on_alerts_loaded() {
            self.become_ready();
        }
    }

    async fn handle_assets_in_container(&mut self, names: Vec<String>) {
        self.resync.queries.reset_outstanding();
        self.resync.queries.enqueue_all(names);
        self.drain_asset_queries().await;
    }

    async fn handle_asset_detail(&mut self, event: crate::domain::AssetEvent) {
        self.assets.process_asset(event, &self.alerts, &mut self.counters);
        self.flush_publishes(self.clock.wall_secs());
        self.resync.queries.on_reply();
        self.drain_asset_queries().await;
    }

    async fn drain_asset_queries(&mut self) {
        let names = self.resync.queries.drain_queries();
        for name in names {
            let request = MailboxRequest::AssetDetail { name };
            if let Err(err) = self.bus.send_mailbox(ASSET_AGENT, ASSET_DETAIL_SUBJECT, request).await {
                warn!(%err, "failed to send ASSET_DETAIL query");
                self.resync.queries.mark_send_failed();
            }
        }
        if self.resync.queries.is_drained() && self.resync.on_assets_drained() {
            self.become_ready();
        }
    }

    async fn begin_resync(&mut self) {
        info!("resync starting, clearing asset and alert state");
        self.assets.clear();
        self.alerts.clear();
        self.counters.clear();
        self.resync.begin_resync(self.clock.monotonic_secs());

        if let Err(err) = self
            .bus
            .send_mailbox(ASSET_AGENT, ASSETS_IN_CONTAINER_SUBJECT, MailboxRequest::AssetsInContainer)
            .await
        {
            warn!(%err, "failed to request asset inventory");
        }
        if let Err(err) = self
            .bus
            .send_mailbox(ALERT_LIST_AGENT, ALERT_LIST_SUBJECT, MailboxRequest::AlertsList)
            .await
        {
            warn!(%err, "failed to request alert list");
        }
    }

    fn become_ready(&mut self) {
        debug!(assets = self.assets.len(), alerts = self.alerts.len(), "recomputing all counters before going ready");
        self.counters.recompute_all(&self.assets, &self.alerts);
        self.flush_publishes(self.clock.wall_secs());
        info!("counters rebuilt, ready to publish");
    }

    async fn tick(&mut self) {
        let now_mono = self.clock.monotonic_secs();
        self.alerts
            .purge_expired_alerts(now_mono, &self.assets, &mut self.counters);
        self.flush_publishes(self.clock.wall_secs());

        if self.resync.watchdog_check(now_mono, self.config.poller_timeout_secs) {
            warn!("resync watchdog forced readiness after a timeout");
            self.become_ready();
        }

        let now_wall = self.clock.wall_secs();
        let half_ttl = self.config.metric_ttl_secs / 2;
        let ready = self.resync.is_ready();
        for asset in self.counters.stale_buckets(now_wall, half_ttl) {
            self.publisher.publish(
                &asset,
                false,
                ready,
                &self.assets,
                &mut self.counters,
                &self.sink,
                now_wall,
            );
        }

        self.last_tick_mono = now_mono;
    }
}
