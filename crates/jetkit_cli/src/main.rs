//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `jetkit_core` wiring end to end.
//! - Keep output deterministic apart from generated ids.

use jetkit_core::{
    compute_stats, init_logging, partition_by_status, AsyncResult, Book, CoreConfig, Database,
    NoteService, ReadingStats,
};
use log::info;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("jetkit_core ping={}", jetkit_core::ping());
    println!("jetkit_core version={}", jetkit_core::core_version());

    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let db = match &config.db_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    info!(
        "event=cli_start module=cli status=ok persistent={}",
        config.db_path.is_some()
    );

    let notes = NoteService::new(&db);
    notes.add_note("smoke", "cli probe", 0).await?;
    let mut subscription = notes.notes().subscribe();
    if let Some(AsyncResult::Success(all)) = subscription.next().await {
        println!("notes count={}", all.len());
    }

    let books = jetkit_core::ObservableCollection::open(Arc::new(db.books()));
    books.insert(Book::new("Dune", "Frank Herbert")).await?;
    let started = Book {
        started_reading: Some(1),
        ..Book::new("Emma", "Jane Austen")
    };
    books.insert(started).await?;

    let mut subscription = books.subscribe();
    while let Some(snapshot) = subscription.next().await {
        let AsyncResult::Success(all) = snapshot else {
            continue;
        };
        if all.len() < 2 {
            continue;
        }
        let buckets = partition_by_status(&all, 0);
        let ReadingStats {
            reading_count,
            finished_count,
        } = compute_stats(&all);
        println!(
            "books unstarted={} reading={} finished={}",
            buckets.unstarted.len(),
            reading_count,
            finished_count
        );
        break;
    }
    Ok(())
}
