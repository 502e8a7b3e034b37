use rediscan_core::store::InMemoryStore;

/// Number of entries in the demo `demo:metrics` list, above the default
/// preload threshold so demo mode shows single-element paging too.
const METRICS_LEN: usize = 1_200;

/// Seeds the demo store with a mix of lists and non-list keys.
pub async fn seed_demo_lists(store: &InMemoryStore) {
    store
        .push_list(
            "demo:events",
            [
                r#"{"event":"signup","user":{"id":1,"name":"Alice"},"plan":"free"}"#,
                r#"{"event":"upgrade","user":{"id":1,"name":"Alice"},"plan":"pro"}"#,
                r#"{"event":"signup","user":{"id":2,"name":"Bob"},"plan":"free"}"#,
                r#"{"event":"login","user":{"id":2,"name":"Bob"},"tags":["web","mobile"]}"#,
            ],
        )
        .await;

    store
        .push_list(
            "demo:logs",
            [
                "2024-01-01T09:00:00Z INFO server started",
                "2024-01-01T09:00:05Z WARN cache miss ratio above 50%",
                "2024-01-01T09:01:00Z ERROR upstream timed out",
            ],
        )
        .await;

    store
        .push_list(
            "demo:metrics",
            (0..METRICS_LEN).map(|i| format!(r#"{{"sample":{i},"latency_ms":{}}}"#, 20 + i % 37)),
        )
        .await;

    store.set_typed("demo:config", "string").await;
    store.set_typed("demo:session", "hash").await;
}
