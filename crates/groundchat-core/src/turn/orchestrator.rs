//! The turn state machine.
//!
//! `INIT -> SCRAPING? -> SEARCHING? -> ASSEMBLING -> INFERRING -> EMITTING -> DONE`,
//! with `ERROR` reachable from any state. The direct path skips the machine
//! entirely and emits no events.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use groundchat_types::chat::{ChatRequest, Conversation};
use groundchat_types::config::TurnConfig;
use groundchat_types::llm::{LlmError, RawInferenceResponse};

use super::channel::{EventSink, EventStream, event_channel};
use super::plan::TurnPlan;
use super::state::TurnState;
use crate::browser::{BrowserAutomation, PageScraperClient, WebSearchClient};
use crate::context::assemble_context;
use crate::inference::InferenceProvider;
use crate::payload::{PayloadOptions, build_payload};
use crate::prompt;

/// Buffered events per turn before the writer waits on the reader.
const EVENT_BUFFER: usize = 16;

/// Result of starting a turn.
pub enum TurnOutcome {
    /// Nothing to gather: the upstream reply, or why there is none.
    Direct(Result<RawInferenceResponse, LlmError>),
    /// Gathering started in the background; events arrive on the stream,
    /// which always ends with `Done`.
    Streaming(EventStream),
}

/// Drives one chat turn from parsed request to response.
pub struct TurnOrchestrator<I, B> {
    inference: Arc<I>,
    scraper: PageScraperClient<B>,
    searcher: WebSearchClient<B>,
    config: Arc<TurnConfig>,
}

impl<I, B> Clone for TurnOrchestrator<I, B> {
    fn clone(&self) -> Self {
        Self {
            inference: Arc::clone(&self.inference),
            scraper: self.scraper.clone(),
            searcher: self.searcher.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<I: InferenceProvider, B: BrowserAutomation> TurnOrchestrator<I, B> {
    /// `browser` is `None` when no automation capability is configured;
    /// gathering then degrades to inline unavailability text.
    pub fn new(inference: Arc<I>, browser: Option<Arc<B>>, config: TurnConfig) -> Self {
        let scraper = PageScraperClient::new(
            browser.clone(),
            Duration::from_secs(config.scrape_timeout_secs),
        );
        let searcher =
            WebSearchClient::new(browser, Duration::from_secs(config.search_timeout_secs));
        Self {
            inference,
            scraper,
            searcher,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    /// Start a turn against `model`.
    ///
    /// Returns once the response mode is decided. On the streaming path the
    /// remaining work runs on a spawned task that owns the event sink.
    pub async fn start(&self, request: ChatRequest, model: &str) -> TurnOutcome {
        let turn_id = Uuid::now_v7();
        let span = tracing::info_span!("turn", %turn_id, model);

        let mut conversation = request.messages;
        if conversation.ensure_system_prompt(&self.config.system_prompt) {
            tracing::trace!(parent: &span, "injected default system prompt");
        }

        let plan = TurnPlan::analyze(&conversation, self.config.search_query_chars);
        tracing::debug!(
            parent: &span,
            state = %TurnState::Init,
            locale = %plan.locale,
            urls = plan.urls.len(),
            needs_search = plan.needs_search,
            "turn classified"
        );

        if !plan.needs_gathering() {
            let result = self
                .run_direct(&conversation, model)
                .instrument(span)
                .await;
            return TurnOutcome::Direct(result);
        }

        let (sink, stream) = event_channel(EVENT_BUFFER);
        let this = self.clone();
        let model = model.to_string();
        tokio::spawn(
            async move { this.run_streaming(conversation, plan, model, sink).await }
                .instrument(span),
        );
        TurnOutcome::Streaming(stream)
    }

    async fn run_direct(
        &self,
        conversation: &Conversation,
        model: &str,
    ) -> Result<RawInferenceResponse, LlmError> {
        let payload = build_payload(conversation, model, &PayloadOptions::direct(&self.config));
        tracing::debug!(state = %TurnState::Inferring, family = %payload.family(), "direct inference");
        let result = self.inference.run_raw(model, &payload).await;
        match &result {
            Ok(raw) => tracing::info!(status = raw.status, "direct turn answered"),
            Err(e) => tracing::error!(state = %TurnState::Error, error = %e, "direct inference failed"),
        }
        result
    }

    /// Owns `sink` for the whole turn and closes it exactly once.
    async fn run_streaming(
        self,
        conversation: Conversation,
        plan: TurnPlan,
        model: String,
        sink: EventSink,
    ) {
        let outcome = AssertUnwindSafe(self.drive(conversation, &plan, &model, &sink))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => tracing::debug!(state = %TurnState::Done, "turn complete"),
            Ok(Err(e)) => {
                tracing::error!(state = %TurnState::Error, error = %e, "streaming inference failed");
                sink.error(e.to_string()).await;
            }
            Err(_) => {
                tracing::error!(state = %TurnState::Error, "turn task panicked");
                sink.error("internal error while processing the turn").await;
            }
        }
        sink.close().await;
    }

    async fn drive(
        &self,
        mut conversation: Conversation,
        plan: &TurnPlan,
        model: &str,
        sink: &EventSink,
    ) -> Result<(), LlmError> {
        let blocks = if self.config.parallel_gathering {
            self.gather_parallel(plan, sink).await
        } else {
            self.gather_sequential(plan, sink).await
        };

        tracing::debug!(state = %TurnState::Assembling, blocks = blocks.len(), "assembling context");
        sink.status(prompt::status_processing(plan.locale)).await;
        assemble_context(&mut conversation, &blocks, plan.locale);

        let payload = build_payload(&conversation, model, &PayloadOptions::streaming(&self.config));
        tracing::debug!(state = %TurnState::Inferring, family = %payload.family(), "streaming inference");
        let output = self.inference.run(model, &payload).await?;

        tracing::debug!(state = %TurnState::Emitting, chars = output.response.len(), "emitting response");
        sink.content(output.response).await;
        Ok(())
    }

    /// One external call at a time, in discovery order.
    async fn gather_sequential(&self, plan: &TurnPlan, sink: &EventSink) -> Vec<String> {
        let mut blocks = Vec::with_capacity(plan.urls.len() + 1);

        if !plan.urls.is_empty() {
            tracing::debug!(state = %TurnState::Scraping, urls = plan.urls.len(), "scraping pages");
            sink.status(prompt::status_scraping(plan.locale)).await;
            for url in &plan.urls {
                blocks.push(self.scraper.scrape(url).await);
            }
        }

        if plan.needs_search {
            tracing::debug!(state = %TurnState::Searching, "searching the web");
            sink.status(prompt::status_searching(plan.locale)).await;
            blocks.push(self.searcher.search(&plan.search_query, plan.locale).await);
        }

        blocks
    }

    /// Scrapes and the search run concurrently. Both statuses are emitted
    /// before any work starts, and results keep discovery order with
    /// scrapes before the search.
    async fn gather_parallel(&self, plan: &TurnPlan, sink: &EventSink) -> Vec<String> {
        if !plan.urls.is_empty() {
            tracing::debug!(state = %TurnState::Scraping, urls = plan.urls.len(), "scraping pages");
            sink.status(prompt::status_scraping(plan.locale)).await;
        }
        if plan.needs_search {
            tracing::debug!(state = %TurnState::Searching, "searching the web");
            sink.status(prompt::status_searching(plan.locale)).await;
        }

        let scrapes = join_all(plan.urls.iter().map(|url| self.scraper.scrape(url)));
        let search = async {
            if plan.needs_search {
                Some(self.searcher.search(&plan.search_query, plan.locale).await)
            } else {
                None
            }
        };
        let (mut blocks, found) = tokio::join!(scrapes, search);
        blocks.extend(found);
        blocks
    }
}
