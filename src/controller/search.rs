//! Query input, debounce and category switching

use crate::model::{CatalogEvent, Category, CategorySwitch, QueryChange, SearchDispatch};

use super::CatalogController;

impl CatalogController {
    /// Stores the query text. Short queries clear the results right away,
    /// re-entering the current query changes nothing, and anything else
    /// (re)starts the debounce timer.
    pub async fn set_query(&self, text: &str) {
        let mut model = self.model.lock().await;
        let was_loading = model.search.is_loading();

        match model.search.set_query(text) {
            QueryChange::Cleared => {
                tracing::debug!(query = text, "Query too short, clearing results");
                model.invalidate_result_set();
                if was_loading {
                    model.notify(CatalogEvent::LoadingChanged(false));
                }
            }
            QueryChange::Unchanged => {
                tracing::trace!(query = text, "Query unchanged, keeping results");
            }
            QueryChange::Debounce { token, delay } => {
                drop(model);
                let controller = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    controller.debounce_elapsed(token).await;
                });
            }
        }
    }

    /// Switches tab. Results and everything tied to them are dropped; an
    /// active query is searched again immediately in the new category.
    pub async fn switch_category(&self, category: Category) {
        let mut model = self.model.lock().await;
        let was_loading = model.search.is_loading();

        let CategorySwitch::Switched(redispatch) = model.search.switch_category(category) else {
            return;
        };

        tracing::info!(%category, "Switched category");
        model.notify(CatalogEvent::CategoryChanged(category));
        model.invalidate_result_set();

        match redispatch {
            Some(dispatch) => {
                model.notify(CatalogEvent::LoadingChanged(true));
                drop(model);
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.run_search(dispatch).await;
                });
            }
            None if was_loading => model.notify(CatalogEvent::LoadingChanged(false)),
            None => {}
        }
    }

    async fn debounce_elapsed(&self, token: u64) {
        let mut model = self.model.lock().await;
        let Some(dispatch) = model.search.debounce_elapsed(token) else {
            tracing::trace!(token, "Superseded debounce timer fired");
            return;
        };
        model.notify(CatalogEvent::LoadingChanged(true));
        drop(model);

        self.run_search(dispatch).await;
    }

    /// Issues one search and publishes its results unless a newer search
    /// was dispatched while it was in flight. Failures become an empty list.
    async fn run_search(&self, dispatch: SearchDispatch) {
        crate::log_channel_request!(
            "search",
            seq = dispatch.seq,
            category = %dispatch.category,
            query = %dispatch.query
        );

        let result = self.channel.search(dispatch.category, &dispatch.query).await;
        crate::log_channel_result!("search", result);

        let results = result.unwrap_or_default();
        let count = results.len();

        let mut model = self.model.lock().await;
        if !model.search.complete(dispatch.seq, results) {
            tracing::debug!(
                seq = dispatch.seq,
                current = model.search.sequence(),
                "Discarding stale search response"
            );
            return;
        }

        tracing::info!(
            query = %dispatch.query,
            category = %dispatch.category,
            results = count,
            "Search completed"
        );
        model.invalidate_result_set();
        model.notify(CatalogEvent::LoadingChanged(false));
    }
}
