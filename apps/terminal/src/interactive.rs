use std::sync::Arc;

use client_core::{AnalysisClient, Form, FormError, SubmissionOutcome, Transport, UiSurface};
use tokio::task::JoinSet;
use tracing::warn;

#[derive(Debug)]
pub enum LineAction {
    Skipped,
    Reset,
    Rejected(FormError),
    Dispatched,
}

pub async fn handle_line<T, S>(
    client: &Arc<AnalysisClient<T, S>>,
    line: &str,
    in_flight: &mut JoinSet<SubmissionOutcome>,
) -> LineAction
where
    T: Transport + 'static,
    S: UiSurface + Send + 'static,
{
    let line = line.trim();
    if line.is_empty() {
        return LineAction::Skipped;
    }
    if line == "reset" {
        client.reset().await;
        return LineAction::Reset;
    }

    let form = match Form::parse_fields(line.split_whitespace()) {
        Ok(form) => form,
        Err(err) => {
            warn!("ignoring submission: {err}");
            return LineAction::Rejected(err);
        }
    };

    // Earlier submissions keep running; nothing waits on them here.
    let client = client.clone();
    in_flight.spawn(async move { client.submit(&form).await });
    LineAction::Dispatched
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use client_core::{Element, MemorySurface, SubmitError, UiState};
    use serde_json::json;
    use shared::protocol::{FormPayload, ResponsePayload};
    use tokio::sync::{oneshot, Mutex};

    use super::*;

    type Reply = Result<ResponsePayload, SubmitError>;

    struct HeldTransport {
        replies: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    #[async_trait]
    impl Transport for HeldTransport {
        async fn submit(&self, payload: FormPayload) -> Reply {
            let ticker = payload.get("ticker").unwrap_or_default().to_string();
            let reply = self.replies.lock().await.remove(&ticker);
            match reply {
                Some(reply) => reply
                    .await
                    .unwrap_or_else(|_| Err(SubmitError::Network("reply dropped".into()))),
                None => Err(SubmitError::Network(format!("no reply for {ticker}"))),
            }
        }
    }

    fn held_client(
        tickers: &[&str],
    ) -> (
        Arc<AnalysisClient<HeldTransport, MemorySurface>>,
        HashMap<String, oneshot::Sender<Reply>>,
    ) {
        let mut senders = HashMap::new();
        let mut replies = HashMap::new();
        for ticker in tickers {
            let (tx, rx) = oneshot::channel();
            senders.insert(ticker.to_string(), tx);
            replies.insert(ticker.to_string(), rx);
        }
        let transport = HeldTransport {
            replies: Mutex::new(replies),
        };
        (
            Arc::new(AnalysisClient::new(transport, MemorySurface::new())),
            senders,
        )
    }

    fn success(ticker: &str) -> Reply {
        Ok(serde_json::from_value(json!({
            "status": "success",
            "data": {"ticker": ticker, "advice": "HOLD", "fundamental_ratios": {}}
        }))
        .expect("response payload"))
    }

    #[tokio::test]
    async fn blank_and_malformed_lines_dispatch_nothing() {
        let (client, _senders) = held_client(&[]);
        let mut in_flight = JoinSet::new();

        let blank = handle_line(&client, "   ", &mut in_flight).await;
        let malformed = handle_line(&client, "ticker=AAPL oops", &mut in_flight).await;

        assert!(matches!(blank, LineAction::Skipped));
        assert!(matches!(
            malformed,
            LineAction::Rejected(FormError::MalformedField(_))
        ));
        assert!(in_flight.is_empty());
        assert_eq!(client.state().await, UiState::Idle);
    }

    #[tokio::test]
    async fn reset_line_returns_the_page_to_idle() {
        let (client, mut senders) = held_client(&["AAPL"]);
        let mut in_flight = JoinSet::new();
        handle_line(&client, "ticker=AAPL", &mut in_flight).await;
        senders
            .remove("AAPL")
            .expect("sender")
            .send(success("AAPL"))
            .expect("send reply");
        let outcome = in_flight
            .join_next()
            .await
            .expect("task")
            .expect("joined");
        assert!(outcome.is_success());

        let action = handle_line(&client, " reset ", &mut in_flight).await;

        assert!(matches!(action, LineAction::Reset));
        assert_eq!(client.state().await, UiState::Idle);
        client
            .with_surface(|surface| assert!(!surface.is_visible(Element::ResultsContainer)))
            .await;
    }

    #[tokio::test]
    async fn later_lines_are_dispatched_while_earlier_ones_are_pending() {
        let (client, mut senders) = held_client(&["AAPL", "MSFT"]);
        let mut in_flight = JoinSet::new();

        let first = handle_line(&client, "ticker=AAPL", &mut in_flight).await;
        let second = handle_line(&client, "ticker=MSFT", &mut in_flight).await;
        assert!(matches!(first, LineAction::Dispatched));
        assert!(matches!(second, LineAction::Dispatched));
        assert_eq!(in_flight.len(), 2);

        senders
            .remove("MSFT")
            .expect("sender")
            .send(success("MSFT"))
            .expect("send reply");
        let outcome = in_flight
            .join_next()
            .await
            .expect("task")
            .expect("joined");
        assert!(outcome.is_success());
        client
            .with_surface(|surface| assert_eq!(surface.text(Element::TickerOutput), Some("MSFT")))
            .await;

        senders
            .remove("AAPL")
            .expect("sender")
            .send(success("AAPL"))
            .expect("send reply");
        let outcome = in_flight
            .join_next()
            .await
            .expect("task")
            .expect("joined");
        assert!(outcome.is_success());

        client
            .with_surface(|surface| assert_eq!(surface.text(Element::TickerOutput), Some("AAPL")))
            .await;
    }
}
