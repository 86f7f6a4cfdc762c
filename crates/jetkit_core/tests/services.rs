use jetkit_core::model::query::{SearchQuery, WeatherQuery};
use jetkit_core::{
    producer_fn, AsyncResult, BookVolume, Database, EntityStore, Favorite, FetchError,
    FetchErrorKind, NoteService, Question, ReadingService, ReadingStats, TriviaService,
    UnitSetting, UnitSystem, WeatherReport, WeatherService,
};

fn report(query: &WeatherQuery) -> WeatherReport {
    WeatherReport {
        city: query.city.clone(),
        country: "US".to_string(),
        units: query.units,
        temp: 52.0,
        humidity: 81,
        description: "light rain".to_string(),
        observed_at: 1_700_000_000,
    }
}

fn weather_service(db: &Database) -> WeatherService {
    WeatherService::new(
        db,
        producer_fn(|query: WeatherQuery| async move {
            if query.city == "Atlantis" {
                return Err(FetchError::network("city not found"));
            }
            Ok(report(&query))
        }),
    )
}

fn volume(id: &str, title: &str) -> BookVolume {
    BookVolume {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Ann Author".to_string(), "Bo Writer".to_string()],
        description: None,
        page_count: Some(320),
    }
}

fn reading_service(db: &Database) -> ReadingService {
    ReadingService::new(
        db,
        producer_fn(|query: SearchQuery| async move {
            Ok::<_, FetchError>(vec![volume("v-1", query.as_str())])
        }),
        producer_fn(|id: String| async move {
            if id == "missing" {
                return Err(FetchError::decode("empty volume payload"));
            }
            Ok(volume(&id, "Details"))
        }),
    )
}

#[tokio::test]
async fn weather_fetch_succeeds_for_known_city() {
    let db = Database::open_in_memory().unwrap();
    let service = weather_service(&db);

    let ticket = service.fetch_weather("Seattle, US").await.unwrap();
    assert!(ticket.accepted);

    let settled = service.weather().settled().await;
    let weather = settled.value().unwrap();
    assert_eq!(weather.city, "Seattle");
    assert_eq!(weather.units, UnitSystem::Imperial);
}

#[tokio::test]
async fn seattle_fetch_publishes_loading_then_report() {
    let db = Database::open_in_memory().unwrap();
    let service = WeatherService::new(
        &db,
        producer_fn(|query: WeatherQuery| async move {
            Ok::<_, FetchError>(WeatherReport {
                temp: 72.0,
                ..report(&query)
            })
        }),
    );

    service.fetch_weather("Seattle").await.unwrap();
    assert!(service.weather().current().is_loading());

    let settled = service.weather().settled().await;
    let weather = settled.value().unwrap();
    assert_eq!(weather.city, "Seattle");
    assert_eq!(weather.temp, 72.0);
    assert!(settled.error().is_none());
}

#[tokio::test]
async fn stored_unit_is_used_by_the_first_fetch() {
    let db = Database::open_in_memory().unwrap();
    db.units()
        .insert(&UnitSetting::new(UnitSystem::Metric))
        .unwrap();
    let service = weather_service(&db);

    service.fetch_weather("Lyon").await.unwrap();
    assert_eq!(
        service.weather().current_key(),
        WeatherQuery::new("Lyon", UnitSystem::Metric)
    );
    let settled = service.weather().settled().await;
    assert_eq!(settled.value().map(|w| w.units), Some(UnitSystem::Metric));
}

#[tokio::test]
async fn weather_fetch_failure_carries_cause() {
    let db = Database::open_in_memory().unwrap();
    let service = weather_service(&db);

    service.fetch_weather("Atlantis").await.unwrap();
    let settled = service.weather().settled().await;
    assert!(settled.value().is_none());
    assert_eq!(
        settled.error().map(FetchError::kind),
        Some(FetchErrorKind::Network)
    );
    assert!(service.fetch_weather("   ").await.is_none());
}

#[tokio::test]
async fn favorites_membership_follows_the_live_collection() {
    let db = Database::open_in_memory().unwrap();
    let service = weather_service(&db);

    service
        .add_favorite(Favorite::new("Paris", "FR"))
        .await
        .unwrap();
    assert_eq!(service.is_favorite("Paris"), AsyncResult::success(true));
    assert_eq!(service.is_favorite("Lyon"), AsyncResult::success(false));
    assert_eq!(service.is_favorite("paris"), AsyncResult::success(false));

    service.remove_favorite("Paris").await.unwrap();
    assert_eq!(service.is_favorite("Paris"), AsyncResult::success(false));

    let err = service.remove_favorite("Paris").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unit_setting_drives_weather_queries() {
    let db = Database::open_in_memory().unwrap();
    let service = weather_service(&db);

    service.set_unit(UnitSystem::Metric).await.unwrap();
    service.set_unit(UnitSystem::Metric).await.unwrap();
    assert_eq!(service.preferred_unit(), UnitSystem::Metric);
    assert_eq!(service.units().current().value().map(Vec::len), Some(1));

    service.fetch_weather("Lyon").await.unwrap();
    assert_eq!(
        service.weather().current_key(),
        WeatherQuery::new("Lyon", UnitSystem::Metric)
    );
    let settled = service.weather().settled().await;
    assert_eq!(settled.value().map(|w| w.units), Some(UnitSystem::Metric));
}

#[tokio::test]
async fn clear_favorites_reports_count() {
    let db = Database::open_in_memory().unwrap();
    let service = weather_service(&db);
    service
        .add_favorite(Favorite::new("Paris", "FR"))
        .await
        .unwrap();
    service
        .add_favorite(Favorite::new("Lyon", "FR"))
        .await
        .unwrap();

    assert_eq!(service.clear_favorites().await.unwrap(), 2);
    assert_eq!(service.favorites().current(), AsyncResult::success(vec![]));
}

#[tokio::test]
async fn note_service_crud() {
    let db = Database::open_in_memory().unwrap();
    let service = NoteService::new(&db);

    let mut note = service.add_note("groceries", "milk", 20).await.unwrap();
    service.add_note("todo", "", 10).await.unwrap();
    let titles: Vec<String> = service
        .notes()
        .current()
        .value()
        .unwrap()
        .iter()
        .map(|note| note.title.clone())
        .collect();
    assert_eq!(titles, vec!["groceries", "todo"]);

    note.description = "milk, eggs".to_string();
    service.update_note(note.clone()).await.unwrap();
    assert!(service
        .notes()
        .current()
        .value()
        .unwrap()
        .contains(&note));

    service.remove_note(note.id).await.unwrap();
    assert_eq!(service.clear().await.unwrap(), 1);
    assert_eq!(service.notes().current(), AsyncResult::success(vec![]));

    let err = service.add_note("  ", "blank title", 0).await.unwrap_err();
    assert_eq!(err.operation(), "insert");
}

#[tokio::test]
async fn book_search_ignores_blank_text() {
    let db = Database::open_in_memory().unwrap();
    let service = reading_service(&db);

    assert!(service.search(" \n ").is_none());
    service.search("  rust   async ").unwrap();
    let results = service.search_results().settled().await;
    assert_eq!(
        results.value().map(|volumes| volumes[0].title.as_str()),
        Some("rust async")
    );
}

#[tokio::test]
async fn book_details_failure_is_captured() {
    let db = Database::open_in_memory().unwrap();
    let service = reading_service(&db);

    service.load_details("missing").unwrap();
    let details = service.details().settled().await;
    assert_eq!(
        details.error().map(FetchError::kind),
        Some(FetchErrorKind::Decode)
    );
    assert!(service.load_details("").is_none());
}

#[tokio::test]
async fn reading_lifecycle_updates_buckets_and_stats() {
    let db = Database::open_in_memory().unwrap();
    let service = reading_service(&db);

    let dune = service
        .save_volume(&volume("v-1", "Dune"), Some("u-1"))
        .await
        .unwrap();
    let emma = service
        .save_volume(&volume("v-2", "Emma"), Some("u-1"))
        .await
        .unwrap();
    let ulysses = service
        .save_volume(&volume("v-3", "Ulysses"), Some("u-1"))
        .await
        .unwrap();

    service.mark_started(emma, 100).await.unwrap();
    service.mark_started(ulysses, 100).await.unwrap();
    let finished = service.mark_finished(ulysses, 200).await.unwrap();
    assert_eq!(finished.finished_reading, Some(200));

    let again = service.mark_started(emma, 999).await.unwrap();
    assert_eq!(again.started_reading, Some(100));

    let buckets = service.buckets(Some("u-1"), 300);
    let buckets = buckets.value().unwrap();
    assert_eq!(buckets.as_of, 300);
    assert_eq!(buckets.unstarted[0].id, Some(dune));
    assert_eq!(buckets.in_progress[0].id, Some(emma));
    assert_eq!(buckets.finished[0].id, Some(ulysses));

    assert_eq!(
        service.stats(Some("u-1")),
        AsyncResult::success(ReadingStats {
            reading_count: 1,
            finished_count: 1,
        })
    );
    assert_eq!(
        service.stats(Some("someone-else")),
        AsyncResult::success(ReadingStats::default())
    );
}

#[tokio::test]
async fn starting_a_finished_book_caps_start_at_finish() {
    let db = Database::open_in_memory().unwrap();
    let service = reading_service(&db);

    let id = service
        .save_volume(&volume("v-1", "Dune"), None)
        .await
        .unwrap();
    service.mark_finished(id, 200).await.unwrap();

    let book = service.mark_started(id, 500).await.unwrap();
    assert_eq!(book.started_reading, Some(200));
    assert_eq!(book.finished_reading, Some(200));
    assert!(book.validate().is_ok());
}

#[tokio::test]
async fn review_update_and_missing_book() {
    let db = Database::open_in_memory().unwrap();
    let service = reading_service(&db);

    let id = service
        .save_volume(&volume("v-1", "Dune"), None)
        .await
        .unwrap();
    let book = service
        .update_review(id, Some(5), Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(book.rating, Some(5));
    assert_eq!(book.notes, None);

    let err = service
        .update_review(id, Some(9), None)
        .await
        .unwrap_err();
    assert_eq!(err.operation(), "update_review");

    service.remove_book(id).await.unwrap();
    let err = service.mark_finished(id, 10).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn trivia_quiz_starts_after_questions_load() {
    let service = TriviaService::new(producer_fn(|()| async move {
        Ok::<_, FetchError>(vec![
            Question {
                question: "2 + 2?".to_string(),
                answer: "4".to_string(),
                category: "math".to_string(),
                choices: vec!["3".to_string(), "4".to_string()],
            },
            Question {
                question: "Capital of France?".to_string(),
                answer: "Paris".to_string(),
                category: "geography".to_string(),
                choices: vec!["Lyon".to_string(), "Paris".to_string()],
            },
        ])
    }));
    assert!(service.start_quiz().is_none());

    service.load();
    service.questions().settled().await;
    assert_eq!(service.question_count(), AsyncResult::success(2));

    let mut quiz = service.start_quiz().unwrap();
    quiz.answer(1);
    assert!(quiz.advance());
    quiz.answer(0);
    assert!(quiz.is_complete());
    assert_eq!(quiz.score(), 1);
}
