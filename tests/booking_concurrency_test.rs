//! Concurrent commits for one slot: exactly one wins.

mod common;

use std::sync::Arc;

use common::*;
use fadeflow::errors::AppError;
use fadeflow::services::{AvailabilityService, BookingService};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_concurrent_commits_one_succeeds() {
    let uow = persistence();
    let manager = Arc::new(manager(uow.clone()));

    let a = tokio::spawn({
        let manager = manager.clone();
        async move { manager.commit_reservation(request("09:00")).await }
    });
    let b = tokio::spawn({
        let manager = manager.clone();
        async move { manager.commit_reservation(request("09:00")).await }
    });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let taken = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::SlotTaken)))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(taken, 1);

    let open = resolver(uow).open_slots(1, today()).await.unwrap();
    assert_eq!(open, vec![t("09:30")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_commits_one_per_slot() {
    let uow = persistence();
    let manager = Arc::new(manager(uow.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = manager.clone();
            let time = if i % 2 == 0 { "09:00" } else { "09:30" };
            tokio::spawn(async move { manager.commit_reservation(request(time)).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::SlotTaken) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 2);
    assert_eq!(manager.list_reservations(None).await.unwrap().len(), 2);
}
