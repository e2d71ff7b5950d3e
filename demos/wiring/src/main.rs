//! Demonstrates the intended wiring pattern: parameters at startup, singleton
//! services composed through factories, and a per-call factory service.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use spool_locator::{Container, DynError};
use tracing_subscriber::EnvFilter;

struct DbConnection {
    url: String,
    pool_size: u32,
}

struct UserRepository {
    db: Arc<DbConnection>,
}

impl UserRepository {
    fn describe(&self) -> String {
        format!(
            "user repository on {} (pool of {})",
            self.db.url, self.db.pool_size
        )
    }
}

/// Hands out a fresh id on every resolution - the factory-mode case.
struct RequestId(u64);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let container = Container::new();

    // Configuration parameters, registered before any service resolves.
    container
        .add_parameter("db.url", "postgres://localhost/app".to_string())
        .unwrap();
    container.add_parameter("db.pool_size", 8_u32).unwrap();

    container
        .register("db", false, |c: &Container| {
            let url = c.get_parameter_as::<String>("db.url")?;
            let pool_size = c.get_parameter_as::<u32>("db.pool_size")?;
            Ok(DbConnection {
                url: url.as_ref().clone(),
                pool_size: *pool_size,
            })
        })
        .unwrap();

    container
        .register("user-repository", false, |c: &Container| {
            Ok(UserRepository {
                db: c.make_as::<DbConnection>("db")?,
            })
        })
        .unwrap();

    let next_id = Arc::new(AtomicU64::new(1));
    container
        .register("request-id", true, move |_| {
            Ok::<_, DynError>(RequestId(next_id.fetch_add(1, Ordering::SeqCst)))
        })
        .unwrap();

    let repository = match container.make_as::<UserRepository>("user-repository") {
        Ok(repository) => repository,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    println!("{}", repository.describe());

    // Both resolutions share the cached connection.
    let db = container.make_as::<DbConnection>("db").unwrap();
    assert!(Arc::ptr_eq(&db, &repository.db));

    for _ in 0..3 {
        let request_id = container.make_as::<RequestId>("request-id").unwrap();
        println!("handled request {}", request_id.0);
    }

    println!("{container:?}");
}
