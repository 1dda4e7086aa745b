//! Debounced query submission and search responses

use std::sync::Arc;
use std::time::Instant;

use super::{AppController, AppEvent};

impl AppController {
    /// Record a text change in the search box.
    pub(crate) fn query_changed(&mut self, now: Instant) {
        self.debouncer
            .push(self.model.search_query().to_string(), now);
    }

    /// Submit the pending query once the user stopped typing.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.submit_query(query);
        }
    }

    fn submit_query(&mut self, query: String) {
        if query.is_empty() {
            tracing::debug!("Empty query, clearing results");
            self.model.clear_results();
            return;
        }

        self.playback.stop();
        let generation = self.model.begin_search();
        tracing::info!(query = %query, generation, "Searching");

        let search = Arc::clone(&self.search);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = search.search(&query).await;
            if events
                .send(AppEvent::SearchFinished { generation, result })
                .is_err()
            {
                tracing::debug!(generation, "Event loop gone, dropping search response");
            }
        });
    }

    pub fn handle_app_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::SearchFinished { generation, result } => {
                match &result {
                    Ok(response) => tracing::info!(
                        generation,
                        results = response.results.len(),
                        result_count = response.result_count,
                        "Search completed"
                    ),
                    Err(e) => tracing::warn!(generation, error = %e, "Search failed"),
                }
                self.model.apply_search_result(generation, result, now);
            }
        }
    }
}
