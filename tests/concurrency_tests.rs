use std::sync::{Arc, Barrier};
use std::thread;

use parking_lot::Mutex;
use urlmap::router::SharedRouter;
use urlmap::{HttpMethod, Router, VarType};

fn numbered_router(generation: i64) -> Router<Vec<i64>> {
    let mut router = Router::default();
    router
        .get(
            "item",
            "/items/{id}",
            move |m, seen: &mut Vec<i64>| {
                seen.push(generation * 1000 + m.variable::<i64>("id")?);
                Ok(())
            },
            &[VarType::Long],
        )
        .unwrap();
    router
}

#[test]
fn test_concurrent_matches_are_independent() {
    let router = Arc::new(numbered_router(0));

    thread::scope(|s| {
        for worker in 0..8_i64 {
            let router = Arc::clone(&router);
            s.spawn(move || {
                for i in 0..200_i64 {
                    let id = worker * 1000 + i;
                    let m = router.match_path("GET", format!("/items/{id}").as_str()).unwrap();
                    assert!(m.is("item"));
                    assert_eq!(m.variable::<i64>("id").unwrap(), id);
                }
            });
        }
    });
}

#[test]
fn test_concurrent_dispatch_uses_caller_arguments() {
    let router = numbered_router(0);
    let collected = Mutex::new(Vec::new());

    thread::scope(|s| {
        for worker in 0..4_i64 {
            let router = &router;
            let collected = &collected;
            s.spawn(move || {
                let mut seen = Vec::new();
                for i in 0..50_i64 {
                    router
                        .dispatch_method(HttpMethod::Get, format!("/items/{}", worker * 100 + i).as_str(), &mut seen)
                        .unwrap();
                }
                assert_eq!(seen.len(), 50);
                assert!(seen.iter().all(|v| v / 100 == worker));
                collected.lock().extend(seen);
            });
        }
    });

    let mut all = collected.into_inner();
    all.sort_unstable();
    assert_eq!(all.len(), 200);
    all.dedup();
    assert_eq!(all.len(), 200);
}

#[test]
fn test_shared_router_swap_under_load() {
    let shared = SharedRouter::new(numbered_router(1));

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..500 {
                    let mut seen = Vec::new();
                    let m = shared.dispatch("GET", "/items/7", &mut seen).unwrap();
                    assert!(m.is("item"));
                    // either generation, never a torn table
                    assert!(seen == [1007] || seen == [2007], "{seen:?}");
                }
            });
        }
        s.spawn(|| {
            shared.store(numbered_router(2));
        });
    });

    let mut seen = Vec::new();
    shared.dispatch("GET", "/items/7", &mut seen).unwrap();
    assert_eq!(seen, [2007]);
}

#[test]
fn test_snapshot_outlives_store() {
    let shared = SharedRouter::new(numbered_router(1));
    let snapshot = shared.load();
    shared.store(Router::default());

    assert!(shared.match_path("GET", "/items/1").unwrap().is_not_found());
    assert!(snapshot.match_path("GET", "/items/1").unwrap().is("item"));
}

#[test]
fn test_store_completes_while_handler_runs() {
    let barrier = Arc::new(Barrier::new(2));
    let in_handler = Arc::clone(&barrier);
    let mut slow = Router::default();
    slow.get(
        "slow",
        "/items/{id}",
        move |m, seen: &mut Vec<i64>| {
            // entered, then hold until released
            in_handler.wait();
            in_handler.wait();
            seen.push(m.variable::<i64>("id")?);
            Ok(())
        },
        &[VarType::Long],
    )
    .unwrap();
    let shared = SharedRouter::new(slow);

    thread::scope(|s| {
        let running = s.spawn(|| {
            let mut seen = Vec::new();
            let m = shared.dispatch("GET", "/items/5", &mut seen).unwrap();
            (m.name().to_string(), seen)
        });
        barrier.wait();
        shared.store(numbered_router(3));
        let mut seen = Vec::new();
        assert!(shared.dispatch("GET", "/items/5", &mut seen).unwrap().is("item"));
        assert_eq!(seen, [3005]);
        barrier.wait();

        let (name, seen) = running.join().unwrap();
        assert_eq!(name, "slow");
        assert_eq!(seen, [5]);
    });
}
