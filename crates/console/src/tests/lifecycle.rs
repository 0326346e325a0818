use assert_matches::assert_matches;
use types::{errors::ConsoleError, participant::ParticipantStatus};
use wallet::mock::{FailStage, MockBackend};

use super::{console_with, console_with_ready, quick_config};
use crate::Console;

#[tokio::test]
async fn start_reaches_ready_with_address_and_balance() {
    let console = console_with(MockBackend::new().with_balance(42_000));

    console.start_participant(0).await.unwrap();

    let participant = console.participant(0).await.unwrap();
    assert_eq!(participant.status, ParticipantStatus::Ready);
    assert!(participant.address.unwrap().starts_with("mock1"));
    assert_eq!(participant.balance, Some(42_000));
    assert!(participant.error.is_none());
    assert!(console.has_live_connection(0).await);
}

#[tokio::test]
async fn start_failing_mid_sync_registers_no_connection() {
    let console = console_with(MockBackend::new().with_fail(FailStage::Sync));

    let err = console.start_participant(0).await.unwrap_err();
    assert_matches!(err, ConsoleError::Connection(_));

    let participant = console.participant(0).await.unwrap();
    assert_eq!(participant.status, ParticipantStatus::Error);
    assert!(participant.error.unwrap().contains("syncing"));
    assert!(participant.balance.is_none());
    assert!(!console.has_live_connection(0).await);
}

#[tokio::test]
async fn start_refused_by_session_reports_error() {
    let console = console_with(MockBackend::new().with_fail(FailStage::Start));

    let err = console.start_participant(0).await.unwrap_err();
    assert_matches!(err, ConsoleError::Connection(_));
    assert_eq!(
        console.participant(0).await.unwrap().status,
        ParticipantStatus::Error
    );
    assert!(!console.has_live_connection(0).await);
}

#[tokio::test]
async fn start_is_rejected_while_ready() {
    let console = console_with_ready(1).await;

    let err = console.start_participant(0).await.unwrap_err();
    assert_matches!(
        err,
        ConsoleError::InvalidStatus {
            id: 0,
            status: ParticipantStatus::Ready
        }
    );
}

#[tokio::test]
async fn restart_after_error_is_accepted() {
    let console = console_with(MockBackend::new().with_fail(FailStage::Sync));

    let first = console.start_participant(0).await.unwrap_err();
    assert_matches!(first, ConsoleError::Connection(_));

    // A second attempt is allowed from the error status; with the same
    // failing backend it fails the same way rather than being rejected
    // up front.
    let second = console.start_participant(0).await.unwrap_err();
    assert_matches!(second, ConsoleError::Connection(_));
}

#[tokio::test]
async fn sync_timeout_parks_participant_in_error() {
    let mut config = quick_config();
    config.sync_timeout_secs = 1;
    let backend = MockBackend::new().with_ready_after(10_000);
    let console = Console::new(config, Box::new(backend)).unwrap();

    let err = console.start_participant(0).await.unwrap_err();
    assert_matches!(err, ConsoleError::SyncTimeout(1));

    let participant = console.participant(0).await.unwrap();
    assert_eq!(participant.status, ParticipantStatus::Error);
    assert!(!console.has_live_connection(0).await);
}

#[tokio::test]
async fn overlapping_start_for_one_participant_is_rejected() {
    let console = console_with(MockBackend::new().with_ready_after(3));

    let (a, b) = tokio::join!(
        console.start_participant(0),
        console.start_participant(0)
    );

    let errors: Vec<ConsoleError> = [a, b].into_iter().filter_map(Result::err).collect();
    assert_eq!(errors.len(), 1);
    assert_matches!(errors[0], ConsoleError::OperationInFlight(0));

    // The winning call still completed normally.
    assert_eq!(
        console.participant(0).await.unwrap().status,
        ParticipantStatus::Ready
    );
}

#[tokio::test]
async fn independent_participants_start_concurrently() {
    let console = console_with(MockBackend::new().with_ready_after(2));

    let (a, b) = tokio::join!(
        console.start_participant(0),
        console.start_participant(1)
    );
    a.unwrap();
    b.unwrap();

    assert!(console.participant(0).await.unwrap().is_ready());
    assert!(console.participant(1).await.unwrap().is_ready());
}

#[tokio::test]
async fn stop_without_connection_is_a_noop() {
    let console = console_with(MockBackend::new());

    console.stop_participant(0).await.unwrap();
    assert_eq!(
        console.participant(0).await.unwrap().status,
        ParticipantStatus::Idle
    );
}

#[tokio::test]
async fn stop_returns_ready_participant_to_idle() {
    let console = console_with_ready(1).await;

    console.stop_participant(0).await.unwrap();

    let participant = console.participant(0).await.unwrap();
    assert_eq!(participant.status, ParticipantStatus::Idle);
    assert!(participant.address.is_none());
    assert!(participant.balance.is_none());
    assert!(!console.has_live_connection(0).await);
}

#[tokio::test]
async fn refresh_balance_requires_ready() {
    let console = console_with(MockBackend::new());

    let err = console.refresh_balance(0).await.unwrap_err();
    assert_matches!(err, ConsoleError::NotReady(0));
}

#[tokio::test]
async fn refresh_balance_updates_stored_value() {
    let console = console_with_ready(1).await;

    let balance = console.refresh_balance(0).await.unwrap();
    assert_eq!(balance, 100_000);
    assert_eq!(
        console.participant(0).await.unwrap().balance,
        Some(100_000)
    );
}

#[tokio::test]
async fn unknown_participant_is_rejected_everywhere() {
    let console = console_with(MockBackend::new());

    assert_matches!(
        console.start_participant(99).await.unwrap_err(),
        ConsoleError::UnknownParticipant(99)
    );
    assert_matches!(
        console.stop_participant(99).await.unwrap_err(),
        ConsoleError::UnknownParticipant(99)
    );
    assert_matches!(
        console.refresh_balance(99).await.unwrap_err(),
        ConsoleError::UnknownParticipant(99)
    );
    assert_matches!(
        console.toggle_signer(99).await.unwrap_err(),
        ConsoleError::UnknownParticipant(99)
    );
}
