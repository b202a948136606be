use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::client::ContactClient;
use crate::page::{Effect, Page, UiEvent};

/// Drive a page in real time until the event channel closes, every in-flight
/// delivery has replied and no simulated submission is still waiting.
/// Returns the page in its final state.
///
/// The page clock starts at zero when this is called and follows tokio's
/// clock, so a paused runtime drives it deterministically. Without a client,
/// deliveries fail immediately.
pub async fn run(
    mut page: Page,
    mut events: mpsc::Receiver<UiEvent>,
    client: Option<ContactClient>,
) -> Page {
    let origin = Instant::now();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<Result<String, String>>();
    let mut events_open = true;
    let mut in_flight = 0usize;

    info!("Page driver started");

    loop {
        if !events_open && in_flight == 0 && !page.contact().has_pending() {
            break;
        }

        let deadline = page
            .next_deadline()
            .map(|at| origin + Duration::from_millis(at));

        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    page.advance_to(elapsed_ms(origin));
                    for effect in page.dispatch(event) {
                        match effect {
                            Effect::Deliver(message) => {
                                in_flight += 1;
                                let tx = reply_tx.clone();
                                let client = client.clone();
                                tokio::spawn(async move {
                                    let reply = match client {
                                        Some(client) => client.send(&message).await.map_err(|e| e.reason()),
                                        None => Err("No contact endpoint configured".to_string()),
                                    };
                                    let _ = tx.send(reply);
                                });
                            }
                            Effect::ScrollTo(y) => debug!("Scroll to {}", y),
                        }
                    }
                }
                None => events_open = false,
            },
            Some(reply) = reply_rx.recv() => {
                in_flight -= 1;
                if let Err(reason) = &reply {
                    warn!("Contact delivery failed: {}", reason);
                }
                page.advance_to(elapsed_ms(origin));
                page.dispatch(UiEvent::ServerReplied(reply));
            }
            _ = sleep_until(deadline) => {
                page.advance_to(elapsed_ms(origin));
            }
        }
    }

    info!("Page driver stopped at {}ms", page.now());
    page
}

fn elapsed_ms(origin: Instant) -> u64 {
    origin.elapsed().as_millis() as u64
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{SubmissionMode, SubmitState};
    use crate::page::{Field, PageConfig};
    use crate::theme::MemoryPreferences;
    use folio_types::{ContactForm, Severity};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn page(mode: SubmissionMode) -> Page {
        Page::new(
            PageConfig { mode, ..PageConfig::default() },
            Box::new(MemoryPreferences::default()),
            &mut StdRng::seed_from_u64(3),
        )
    }

    async fn fill_and_submit(tx: &mpsc::Sender<UiEvent>) {
        for (field, value) in [
            (Field::Name, "Alice"),
            (Field::Email, "alice@example.com"),
            (Field::Subject, "Hi"),
            (Field::Message, "Hello"),
        ] {
            tx.send(UiEvent::Input { field, value: value.into() }).await.unwrap();
        }
        tx.send(UiEvent::Submit).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submission_in_real_time() {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run(page(SubmissionMode::Simulated), rx, None));

        fill_and_submit(&tx).await;
        tokio::time::sleep(Duration::from_millis(2100)).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert_eq!(page.contact().state(), SubmitState::Idle);
        assert_eq!(page.contact().fields, ContactForm::default());
        assert_eq!(page.toast().unwrap().message, "Message sent successfully! 🎉");
    }

    #[tokio::test(start_paused = true)]
    async fn closing_events_still_finishes_simulated_submission() {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run(page(SubmissionMode::Simulated), rx, None));

        fill_and_submit(&tx).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert!(page.now() >= 2000);
        assert_eq!(page.contact().state(), SubmitState::Idle);
        assert_eq!(page.contact().fields, ContactForm::default());
        assert_eq!(page.toast().unwrap().severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_lets_the_driver_stop_early() {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run(page(SubmissionMode::Simulated), rx, None));

        fill_and_submit(&tx).await;
        tx.send(UiEvent::Leave).await.unwrap();
        drop(tx);

        let page = handle.await.unwrap();
        assert!(page.now() < 2000);
        assert_eq!(page.contact().state(), SubmitState::Idle);
        assert_eq!(page.contact().fields.name, "Alice");
        assert!(page.toast().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn remote_without_client_fails_and_keeps_fields() {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run(page(SubmissionMode::Remote), rx, None));

        fill_and_submit(&tx).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert_eq!(page.contact().state(), SubmitState::Idle);
        assert_eq!(page.contact().fields.name, "Alice");
        let toast = page.toast().unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.message, "No contact endpoint configured");
    }
}
