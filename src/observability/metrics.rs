//! Run counters.
//!
//! # Metrics
//! - `autochat_auth_total` (counter): authentications by outcome
//! - `autochat_chat_attempts_total` (counter): chat attempts by outcome
//! - `autochat_reauth_total` (counter): api key refreshes after a 401
//! - `autochat_interactions_total` (counter): interactions by outcome
//!
//! No exporter is installed here; an embedder may install any `metrics`
//! recorder to collect these.

use metrics::counter;

pub fn record_auth(outcome: &'static str) {
    counter!("autochat_auth_total", "outcome" => outcome).increment(1);
}

pub fn record_chat_attempt(outcome: &'static str) {
    counter!("autochat_chat_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_reauth() {
    counter!("autochat_reauth_total").increment(1);
}

pub fn record_interaction(outcome: &'static str) {
    counter!("autochat_interactions_total", "outcome" => outcome).increment(1);
}
