use types::config::ConsoleConfig;
use wallet::mock::MockBackend;

use crate::Console;

mod lifecycle;

/// Starter 2-of-5 roster with test-friendly poll/timeout bounds.
fn quick_config() -> ConsoleConfig {
    let mut config = ConsoleConfig::starter();
    config.poll_interval_ms = 5;
    config.sync_timeout_secs = 5;
    config
}

fn console_with(backend: MockBackend) -> Console {
    Console::new(quick_config(), Box::new(backend)).unwrap()
}

async fn console_with_ready(count: u32) -> Console {
    let console = console_with(MockBackend::new());
    for id in 0..count {
        console.start_participant(id).await.unwrap();
    }
    console
}
