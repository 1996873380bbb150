use carfinder_core::catalog::{Car, CatalogService, FilterOptions};
use carfinder_core::chat::{
    ASSISTANT_APOLOGY, AssistantService, ChatHistory, ChatMessage, ChatMode,
};
use carfinder_core::error::{CarfinderError, Result};
use carfinder_core::filter::{Facet, FilterState, Query};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of one catalog search issued by the session.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The response replaced the displayed result set.
    Applied { count: usize },
    /// A newer search had already been applied; the response was dropped.
    Stale,
    /// The request failed; the result set is unchanged.
    Failed(CarfinderError),
}

/// Result of one chat submission.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Nothing happened: the input was blank or a turn was already in flight.
    Skipped,
    /// The assistant replied.
    Answered {
        /// Whether the reply replaced the filters (and triggered a search).
        filters_applied: bool,
        /// Match count reported by the assistant, if any.
        cars_found: Option<u64>,
        /// Outcome of the search triggered by the new filters.
        search: Option<SearchOutcome>,
    },
    /// The request failed; the apology message was appended.
    Failed(CarfinderError),
}

/// Mutable session state, guarded by the session lock.
#[derive(Debug, Default)]
struct SessionState {
    filters: FilterState,
    filter_options: FilterOptions,
    cars: Vec<Car>,
    history: ChatHistory,
    chat_input: String,
    chat_mode: ChatMode,
    /// Searches issued but not yet settled.
    pending_searches: usize,
    /// Generation of the most recently issued search.
    issued_generation: u64,
    /// Generation whose response currently populates `cars`.
    applied_generation: u64,
}

/// Filter state and request orchestration for one search screen.
///
/// `SearchSession` is responsible for:
/// - Holding the canonical filter state, the displayed cars and the filter options
/// - Translating the filters into catalog queries
/// - Running the chat transcript and its single-flight assistant turn
/// - Replacing the filters from a successful assistant turn and searching again
///
/// Every failure is recovered here: it is logged and leaves the session usable.
/// The state lock is never held across a network call, so a session can be
/// shared between tasks behind an `Arc`.
pub struct SearchSession {
    catalog: Arc<dyn CatalogService>,
    assistant: Arc<dyn AssistantService>,
    state: RwLock<SessionState>,
}

impl SearchSession {
    /// Creates a session with every facet empty and an empty transcript.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Source of filter options and search results
    /// * `assistant` - AI service interpreting free-text requests
    pub fn new(catalog: Arc<dyn CatalogService>, assistant: Arc<dyn AssistantService>) -> Self {
        Self {
            catalog,
            assistant,
            state: RwLock::new(SessionState::default()),
        }
    }

    // ============================================================================
    // Startup
    // ============================================================================

    /// Issues the two startup fetches concurrently: filter options and the
    /// initial (unfiltered) search.
    pub async fn initialize(&self) -> (bool, SearchOutcome) {
        tokio::join!(self.load_filter_options(), self.apply_filters())
    }

    /// Fetches the selectable facet values.
    ///
    /// Returns `false` when the fetch failed; the previous options are kept.
    pub async fn load_filter_options(&self) -> bool {
        match self.catalog.fetch_filter_options().await {
            Ok(options) => {
                tracing::info!(
                    makes = options.makes.len(),
                    models = options.models.len(),
                    "Filter options loaded"
                );
                self.state.write().await.filter_options = options;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching filter options");
                false
            }
        }
    }

    // ============================================================================
    // Filter edits
    // ============================================================================

    /// Replaces one facet value. Does not search.
    pub async fn set_facet(&self, facet: Facet, value: impl Into<String>) {
        self.state.write().await.filters.set(facet, value);
    }

    /// Replaces the value of the facet with the given UI name. Does not search.
    ///
    /// # Errors
    ///
    /// Returns `CarfinderError::UnknownFacet` if `name` is not a facet.
    pub async fn set_facet_by_name(&self, name: &str, value: impl Into<String>) -> Result<()> {
        self.state.write().await.filters.set_by_name(name, value)
    }

    /// Resets every facet to empty. Does not search.
    pub async fn clear_filters(&self) {
        self.state.write().await.filters.clear();
        tracing::debug!("Filters cleared");
    }

    /// Total replacement of the filter state. The caller decides whether to search.
    pub async fn replace_filters(&self, filters: FilterState) {
        self.state.write().await.filters.replace_all(filters);
    }

    /// Searches the catalog with the current filters.
    ///
    /// Each call is tagged with a new generation. A response is applied only
    /// if no newer search has been applied before it arrives, so a slow,
    /// superseded search never overwrites a fresher result set. The loading
    /// indicator stays on while any search is outstanding.
    pub async fn apply_filters(&self) -> SearchOutcome {
        let (generation, query) = {
            let mut state = self.state.write().await;
            state.issued_generation += 1;
            state.pending_searches += 1;
            (state.issued_generation, Query::from(&state.filters))
        };

        tracing::info!(generation, params = ?query.pairs(), "Searching catalog");
        let result = self.catalog.search_cars(&query).await;

        let mut state = self.state.write().await;
        state.pending_searches = state.pending_searches.saturating_sub(1);
        match result {
            Ok(cars) if generation > state.applied_generation => {
                let count = cars.len();
                state.cars = cars;
                state.applied_generation = generation;
                tracing::info!(generation, count, "Search results applied");
                SearchOutcome::Applied { count }
            }
            Ok(_) => {
                tracing::debug!(
                    generation,
                    applied = state.applied_generation,
                    "Discarding stale search response"
                );
                SearchOutcome::Stale
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Error fetching cars");
                SearchOutcome::Failed(e)
            }
        }
    }

    // ============================================================================
    // Chat
    // ============================================================================

    /// Updates the chat input box.
    ///
    /// The input is disabled while a turn is in flight; returns `false` and
    /// leaves the input unchanged in that case.
    pub async fn set_chat_input(&self, text: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        if state.chat_mode.is_submitting() {
            return false;
        }
        state.chat_input = text.into();
        true
    }

    /// Whether the submit affordance is enabled.
    pub async fn can_submit(&self) -> bool {
        let state = self.state.read().await;
        state.chat_mode.accepts(&state.chat_input)
    }

    /// Convenience for `set_chat_input` followed by `submit_chat`.
    pub async fn submit_message(&self, text: impl Into<String>) -> TurnOutcome {
        if !self.set_chat_input(text).await {
            tracing::debug!("Chat submission skipped: a turn is already in flight");
            return TurnOutcome::Skipped;
        }
        self.submit_chat().await
    }

    /// Submits the current chat input as one assistant turn.
    ///
    /// `Idle -> Submitting`: appends the trimmed input as a user message,
    /// clears the input, and sends it to the assistant.
    ///
    /// `Submitting -> Idle`: on success appends the reply and, when the reply
    /// carries filters, replaces the whole filter state with them and searches
    /// again. On failure appends the fixed apology and leaves the filters alone.
    ///
    /// A submission with blank input, or while a turn is in flight, is a no-op.
    pub async fn submit_chat(&self) -> TurnOutcome {
        let message = {
            let mut state = self.state.write().await;
            if !state.chat_mode.accepts(&state.chat_input) {
                tracing::debug!(
                    submitting = state.chat_mode.is_submitting(),
                    "Chat submission skipped"
                );
                return TurnOutcome::Skipped;
            }
            let message = state.chat_input.trim().to_string();
            state.history.append_user(message.clone());
            state.chat_input.clear();
            state.chat_mode = ChatMode::Submitting;
            message
        };

        tracing::info!(message = %message, "Submitting chat turn");
        match self.assistant.ask(&message).await {
            Ok(reply) => {
                let filters_applied = {
                    let mut state = self.state.write().await;
                    state.history.append_assistant(reply.message);
                    let applied = match reply.filters {
                        Some(filters) => {
                            tracing::info!(
                                active = filters.active().count(),
                                "Replacing filters from assistant reply"
                            );
                            state.filters.replace_all(filters);
                            true
                        }
                        None => false,
                    };
                    state.chat_mode = ChatMode::Idle;
                    applied
                };

                let search = if filters_applied {
                    Some(self.apply_filters().await)
                } else {
                    None
                };
                TurnOutcome::Answered {
                    filters_applied,
                    cars_found: reply.cars_found,
                    search,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error calling AI endpoint");
                let mut state = self.state.write().await;
                state.history.append_assistant(ASSISTANT_APOLOGY);
                state.chat_mode = ChatMode::Idle;
                TurnOutcome::Failed(e)
            }
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub async fn filters(&self) -> FilterState {
        self.state.read().await.filters.clone()
    }

    /// Query the next search would send.
    pub async fn current_query(&self) -> Query {
        Query::from(&self.state.read().await.filters)
    }

    pub async fn filter_options(&self) -> FilterOptions {
        self.state.read().await.filter_options.clone()
    }

    pub async fn cars(&self) -> Vec<Car> {
        self.state.read().await.cars.clone()
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.state.read().await.history.messages().to_vec()
    }

    pub async fn chat_input(&self) -> String {
        self.state.read().await.chat_input.clone()
    }

    pub async fn chat_mode(&self) -> ChatMode {
        self.state.read().await.chat_mode
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.pending_searches > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carfinder_core::chat::{AssistantReply, MessageRole};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::{Notify, oneshot};

    fn car(id: &str, make: &str) -> Car {
        Car {
            id: id.to_string(),
            make: make.to_string(),
            model: "Model".to_string(),
            year: 2020,
            price: 10000,
            mileage: 1000,
            color: "Red".to_string(),
            bodytype: "SUV".to_string(),
        }
    }

    // Mock CatalogService that records every query
    struct RecordingCatalog {
        cars: Vec<Car>,
        fail: Mutex<bool>,
        queries: Mutex<Vec<Query>>,
    }

    impl RecordingCatalog {
        fn new(cars: Vec<Car>) -> Self {
            Self {
                cars,
                fail: Mutex::new(false),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            let catalog = Self::new(Vec::new());
            catalog.set_failing(true);
            catalog
        }

        fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn is_failing(&self) -> bool {
            *self.fail.lock().unwrap()
        }

        fn queries(&self) -> Vec<Query> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogService for RecordingCatalog {
        async fn fetch_filter_options(&self) -> Result<FilterOptions> {
            if self.is_failing() {
                return Err(CarfinderError::http(Some(500), "down"));
            }
            Ok(FilterOptions {
                makes: vec!["Honda".into()],
                ..Default::default()
            })
        }

        async fn search_cars(&self, query: &Query) -> Result<Vec<Car>> {
            self.queries.lock().unwrap().push(query.clone());
            if self.is_failing() {
                return Err(CarfinderError::http(None, "connection refused"));
            }
            Ok(self.cars.clone())
        }
    }

    // Mock AssistantService replaying scripted replies
    struct ScriptedAssistant {
        replies: Mutex<VecDeque<Result<AssistantReply>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedAssistant {
        fn new(replies: Vec<Result<AssistantReply>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AssistantService for ScriptedAssistant {
        async fn ask(&self, message: &str) -> Result<AssistantReply> {
            self.calls.lock().unwrap().push(message.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CarfinderError::internal("no scripted reply")))
        }
    }

    fn reply(message: &str, filters: Option<FilterState>) -> Result<AssistantReply> {
        Ok(AssistantReply {
            message: message.to_string(),
            filters,
            cars_found: None,
        })
    }

    fn session(
        catalog: Arc<RecordingCatalog>,
        assistant: Arc<ScriptedAssistant>,
    ) -> SearchSession {
        SearchSession::new(catalog, assistant)
    }

    #[tokio::test]
    async fn test_initialize_loads_options_and_searches_once() {
        let catalog = Arc::new(RecordingCatalog::new(vec![car("1", "Honda")]));
        let session = session(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        let (options_loaded, outcome) = session.initialize().await;

        assert!(options_loaded);
        assert!(matches!(outcome, SearchOutcome::Applied { count: 1 }));
        assert_eq!(session.filter_options().await.makes, vec!["Honda"]);
        assert_eq!(catalog.queries(), vec![Query::new()]);
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_failures_keep_previous_state() {
        let catalog = Arc::new(RecordingCatalog::failing());
        let session = session(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        let (options_loaded, outcome) = session.initialize().await;

        assert!(!options_loaded);
        assert!(matches!(outcome, SearchOutcome::Failed(_)));
        assert!(session.filter_options().await.is_empty());
        assert!(session.cars().await.is_empty());
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_results_and_options() {
        let catalog = Arc::new(RecordingCatalog::new(vec![car("1", "Honda")]));
        let session = session(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));
        session.initialize().await;

        catalog.set_failing(true);
        session.set_facet(Facet::Make, "Toyota").await;
        let outcome = session.apply_filters().await;
        let options_loaded = session.load_filter_options().await;

        assert!(matches!(outcome, SearchOutcome::Failed(_)));
        assert!(!options_loaded);
        let cars = session.cars().await;
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, "1");
        assert_eq!(session.filter_options().await.makes, vec!["Honda"]);
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_edits_do_not_search() {
        let catalog = Arc::new(RecordingCatalog::new(vec![]));
        let session = session(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        session.set_facet(Facet::Make, "Honda").await;
        session.set_facet_by_name("minPrice", "10000").await.unwrap();
        session.clear_filters().await;
        session.set_facet(Facet::Color, "red").await;

        assert!(catalog.queries().is_empty());
        assert_eq!(session.filters().await.get(Facet::Color), "red");
        assert_eq!(session.filters().await.get(Facet::Make), "");
    }

    #[tokio::test]
    async fn test_set_facet_by_unknown_name_fails() {
        let session = session(
            Arc::new(RecordingCatalog::new(vec![])),
            Arc::new(ScriptedAssistant::new(vec![])),
        );
        let err = session.set_facet_by_name("price", "1").await.unwrap_err();
        assert!(matches!(err, CarfinderError::UnknownFacet(_)));
    }

    #[tokio::test]
    async fn test_apply_sends_translated_query() {
        let catalog = Arc::new(RecordingCatalog::new(vec![car("1", "Honda")]));
        let session = session(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        session.set_facet(Facet::Make, "Honda").await;
        session.set_facet(Facet::MinPrice, "10000").await;
        session.set_facet(Facet::MaxPrice, "abc").await;
        session.apply_filters().await;

        let expected: Query = [("make", "Honda"), ("min_price", "10000")].into_iter().collect();
        assert_eq!(catalog.queries(), vec![expected]);
    }

    #[tokio::test]
    async fn test_successful_turn_replaces_filters_and_searches() {
        let catalog = Arc::new(RecordingCatalog::new(vec![car("1", "Honda")]));
        let assistant = Arc::new(ScriptedAssistant::new(vec![reply(
            "Here are some options",
            Some(FilterState::from_values([
                (Facet::Color, "red"),
                (Facet::Bodytype, "SUV"),
                (Facet::MaxPrice, "20000"),
            ])),
        )]));
        let session = session(catalog.clone(), assistant.clone());
        session.set_facet(Facet::Make, "Honda").await;

        let outcome = session.submit_message("  red SUV under 20000 ").await;

        assert!(matches!(
            outcome,
            TurnOutcome::Answered { filters_applied: true, .. }
        ));
        assert_eq!(assistant.calls(), vec!["red SUV under 20000"]);

        let filters = session.filters().await;
        assert_eq!(filters.get(Facet::Make), "");
        assert_eq!(filters.get(Facet::MaxPrice), "20000");

        let expected: Query = [("bodytype", "SUV"), ("color", "red"), ("max_price", "20000")]
            .into_iter()
            .collect();
        assert_eq!(catalog.queries(), vec![expected]);

        let history = session.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "red SUV under 20000");
        assert_eq!(history[1].text, "Here are some options");
        assert_eq!(session.chat_input().await, "");
        assert_eq!(session.chat_mode().await, ChatMode::Idle);
    }

    #[tokio::test]
    async fn test_turn_reports_failed_follow_up_search() {
        let catalog = Arc::new(RecordingCatalog::failing());
        let assistant = Arc::new(ScriptedAssistant::new(vec![reply(
            "Looking for Mazdas",
            Some(FilterState::from_values([(Facet::Make, "Mazda")])),
        )]));
        let session = session(catalog.clone(), assistant);

        let outcome = session.submit_message("any mazda").await;

        assert!(matches!(
            outcome,
            TurnOutcome::Answered {
                filters_applied: true,
                search: Some(SearchOutcome::Failed(_)),
                ..
            }
        ));
        assert_eq!(session.filters().await.get(Facet::Make), "Mazda");
        assert!(session.cars().await.is_empty());
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_reply_without_filters_keeps_state_and_does_not_search() {
        let catalog = Arc::new(RecordingCatalog::new(vec![]));
        let assistant = Arc::new(ScriptedAssistant::new(vec![reply("Which make?", None)]));
        let session = session(catalog.clone(), assistant);
        session.set_facet(Facet::Make, "Honda").await;

        let outcome = session.submit_message("a car").await;

        assert!(matches!(
            outcome,
            TurnOutcome::Answered {
                filters_applied: false,
                search: None,
                ..
            }
        ));
        assert_eq!(session.filters().await.get(Facet::Make), "Honda");
        assert!(catalog.queries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_turn_appends_apology_and_keeps_filters() {
        let catalog = Arc::new(RecordingCatalog::new(vec![]));
        let assistant = Arc::new(ScriptedAssistant::new(vec![Err(CarfinderError::http(
            None,
            "network down",
        ))]));
        let session = session(catalog.clone(), assistant);
        session.set_facet(Facet::Model, "Civic").await;
        let before = session.filters().await;

        let outcome = session.submit_message("something cheap").await;

        assert!(matches!(outcome, TurnOutcome::Failed(_)));
        let history = session.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].text, ASSISTANT_APOLOGY);
        assert_eq!(session.filters().await, before);
        assert!(catalog.queries().is_empty());
        assert_eq!(session.chat_mode().await, ChatMode::Idle);
    }

    #[tokio::test]
    async fn test_blank_input_is_skipped() {
        let assistant = Arc::new(ScriptedAssistant::new(vec![]));
        let session = session(Arc::new(RecordingCatalog::new(vec![])), assistant.clone());

        assert!(!session.can_submit().await);
        assert!(matches!(session.submit_message("   ").await, TurnOutcome::Skipped));
        assert!(session.history().await.is_empty());
        assert!(assistant.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sequential_turns_alternate_in_order() {
        let assistant = Arc::new(ScriptedAssistant::new(vec![
            reply("one", None),
            reply("two", None),
            reply("three", None),
        ]));
        let session = session(Arc::new(RecordingCatalog::new(vec![])), assistant);

        for text in ["first", "second", "third"] {
            session.submit_message(text).await;
        }

        let history = session.history().await;
        assert_eq!(history.len(), 6);
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "one", "second", "two", "third", "three"]);
        for (index, message) in history.iter().enumerate() {
            let expected = if index % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(message.role, expected);
        }
        assert!(history.windows(2).all(|w| w[0].id < w[1].id));
    }

    // Assistant that blocks until released
    struct GatedAssistant {
        release: Notify,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl AssistantService for GatedAssistant {
        async fn ask(&self, _message: &str) -> Result<AssistantReply> {
            *self.calls.lock().unwrap() += 1;
            self.release.notified().await;
            Ok(AssistantReply {
                message: "done".to_string(),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_second_submission_while_submitting_is_noop() {
        let assistant = Arc::new(GatedAssistant {
            release: Notify::new(),
            calls: Mutex::new(0),
        });
        let session = SearchSession::new(
            Arc::new(RecordingCatalog::new(vec![])),
            assistant.clone(),
        );

        let first = session.submit_message("first");
        let second = async {
            while !session.chat_mode().await.is_submitting() {
                tokio::task::yield_now().await;
            }
            assert!(!session.can_submit().await);
            assert!(!session.set_chat_input("typed meanwhile").await);
            let outcome = session.submit_message("second").await;
            assistant.release.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, TurnOutcome::Answered { .. }));
        assert!(matches!(second, TurnOutcome::Skipped));
        assert_eq!(*assistant.calls.lock().unwrap(), 1);

        let history = session.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "first");
        assert_eq!(session.chat_mode().await, ChatMode::Idle);
    }

    // Catalog whose responses are released by the test, in any order
    struct GatedCatalog {
        pending: Mutex<VecDeque<oneshot::Receiver<Vec<Car>>>>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CatalogService for GatedCatalog {
        async fn fetch_filter_options(&self) -> Result<FilterOptions> {
            Ok(FilterOptions::default())
        }

        async fn search_cars(&self, _query: &Query) -> Result<Vec<Car>> {
            let receiver = self.pending.lock().unwrap().pop_front();
            *self.calls.lock().unwrap() += 1;
            match receiver {
                Some(receiver) => receiver
                    .await
                    .map_err(|_| CarfinderError::internal("response dropped")),
                None => Err(CarfinderError::internal("unexpected search")),
            }
        }
    }

    #[tokio::test]
    async fn test_stale_search_response_is_discarded() {
        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel();
        let catalog = Arc::new(GatedCatalog {
            pending: Mutex::new(VecDeque::from([older_rx, newer_rx])),
            calls: Mutex::new(0),
        });
        let session =
            SearchSession::new(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        let older = session.apply_filters();
        let newer = session.apply_filters();
        let driver = async {
            while *catalog.calls.lock().unwrap() < 2 {
                tokio::task::yield_now().await;
            }
            assert!(session.is_loading().await);
            newer_tx.send(vec![car("new", "Toyota")]).unwrap();
            while session.cars().await.is_empty() {
                tokio::task::yield_now().await;
            }
            assert!(session.is_loading().await);
            older_tx.send(vec![car("old", "Honda")]).unwrap();
        };
        let (older, newer, ()) = tokio::join!(older, newer, driver);

        assert!(matches!(older, SearchOutcome::Stale));
        assert!(matches!(newer, SearchOutcome::Applied { count: 1 }));
        let cars = session.cars().await;
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, "new");
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_failed_newer_search_lets_older_response_land() {
        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel::<Vec<Car>>();
        let catalog = Arc::new(GatedCatalog {
            pending: Mutex::new(VecDeque::from([older_rx, newer_rx])),
            calls: Mutex::new(0),
        });
        let session =
            SearchSession::new(catalog.clone(), Arc::new(ScriptedAssistant::new(vec![])));

        let older = session.apply_filters();
        let newer = session.apply_filters();
        let driver = async {
            while *catalog.calls.lock().unwrap() < 2 {
                tokio::task::yield_now().await;
            }
            // Dropping the sender fails the newer search
            drop(newer_tx);
            older_tx.send(vec![car("old", "Honda")]).unwrap();
        };
        let (older, newer, ()) = tokio::join!(older, newer, driver);

        assert!(matches!(newer, SearchOutcome::Failed(_)));
        assert!(matches!(older, SearchOutcome::Applied { count: 1 }));
        let cars = session.cars().await;
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, "old");
        assert!(!session.is_loading().await);
    }
}
