//! Search box store.
//!
//! Search responses arrive asynchronously and can overtake each other, so
//! every query change mints a new generation number and a response is only
//! applied if it still carries the current generation. A blanked query
//! clears the results locally without issuing a request at all.

use loftwood_core::Product;

use crate::api::{ApiClient, ApiError};

/// State of the search box.
#[derive(Debug, Default)]
pub struct SearchStore {
    query: String,
    results: Vec<Product>,
    searching: bool,
    generation: u64,
}

impl SearchStore {
    /// Create an empty search store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results for the current query.
    #[must_use]
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// Whether a request minted by [`Self::set_query`] is still
    /// unanswered.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    /// Update the query.
    ///
    /// Returns the generation to pass to [`Self::apply`] with the
    /// response, or `None` when the query was blank and the results were
    /// cleared locally instead.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<u64> {
        self.query = query.into();
        self.generation += 1;

        if self.query.trim().is_empty() {
            self.results.clear();
            self.searching = false;
            return None;
        }

        self.searching = true;
        Some(self.generation)
    }

    /// Apply a response for the given generation.
    ///
    /// A response from a superseded generation is dropped; the return
    /// value says whether the results were taken.
    pub fn apply(&mut self, generation: u64, results: Vec<Product>) -> bool {
        if generation != self.generation {
            return false;
        }

        self.results = results;
        self.searching = false;
        true
    }

    /// Record a failed request for the given generation. Stale failures
    /// are dropped like stale results.
    pub fn apply_error(&mut self, generation: u64, error: &ApiError) {
        if generation != self.generation {
            return;
        }

        tracing::warn!(query = %self.query, %error, "search request failed");
        self.results.clear();
        self.searching = false;
    }

    /// Set the query and run the search in one step.
    ///
    /// Useful when calls cannot overlap; concurrent UIs drive
    /// [`Self::set_query`] and [`Self::apply`] themselves.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure.
    pub async fn search(
        &mut self,
        api: &ApiClient,
        query: impl Into<String>,
    ) -> Result<(), ApiError> {
        let Some(generation) = self.set_query(query) else {
            return Ok(());
        };

        match api.search(&self.query).await {
            Ok(results) => {
                self.apply(generation, results);
                Ok(())
            }
            Err(e) => {
                self.apply_error(generation, &e);
                Err(e)
            }
        }
    }
}
