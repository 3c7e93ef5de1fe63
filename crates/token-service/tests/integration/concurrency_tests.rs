//! Concurrent use of a shared service
//!
//! The service holds no mutable state, so many threads can issue and
//! validate through one instance without coordination.

use std::sync::Arc;
use std::thread;
use token_service::TokenService;
use token_test_utils::*;
use uuid::Uuid;

const THREADS: u128 = 16;
const TOKENS_PER_THREAD: u128 = 50;

fn subject(worker: u128, n: u128) -> String {
    Uuid::from_u128(worker * 1_000 + n).to_string()
}

#[test]
fn test_scoped_threads_share_one_service() -> Result<(), anyhow::Error> {
    let service = test_service()?;

    thread::scope(|scope| {
        for t in 0..THREADS {
            let service = &service;
            scope.spawn(move || {
                for n in 0..TOKENS_PER_THREAD {
                    let id = subject(t, n);
                    let token = service.issue(&id, "worker@example.com");
                    let claims = token.and_then(|token| service.validate(&token));
                    assert_eq!(claims.map(|c| c.subject_id), Ok(id));
                }
            });
        }
    });
    Ok(())
}

#[test]
fn test_arc_shared_service_cross_validates() -> Result<(), anyhow::Error> {
    let service: Arc<TokenService> = Arc::new(test_service()?);

    // Each thread issues tokens; the main thread validates them all.
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..TOKENS_PER_THREAD)
                    .map(|n| {
                        let id = subject(t, n);
                        service.issue(&id, "").map(|token| (id, token))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    let mut seen = 0;
    for handle in handles {
        let issued = handle
            .join()
            .map_err(|_| anyhow::anyhow!("issuing thread panicked"))??;
        for (id, token) in issued {
            assert_eq!(service.validate(&token)?.subject_id, id);
            seen += 1;
        }
    }

    assert_eq!(seen, THREADS * TOKENS_PER_THREAD);
    Ok(())
}

#[test]
fn test_cloned_services_are_interchangeable() -> Result<(), anyhow::Error> {
    let original = test_service()?;
    let clone = original.clone();

    let token = thread::spawn(move || clone.issue(TEST_SUBJECT_ALICE_ID, TEST_SUBJECT_ALICE_LABEL))
        .join()
        .map_err(|_| anyhow::anyhow!("issuing thread panicked"))??;

    assert_eq!(original.validate(&token)?.subject_id, TEST_SUBJECT_ALICE_ID);
    Ok(())
}
