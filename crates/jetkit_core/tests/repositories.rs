use jetkit_core::db::open_db_in_memory;
use jetkit_core::repo::book_repo::{BookRepository, SqliteBookRepository};
use jetkit_core::repo::favorite_repo::{
    FavoriteRepository, SqliteFavoriteRepository, SqliteUnitRepository, UnitRepository,
};
use jetkit_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use jetkit_core::{Book, Favorite, Note, RepoError, UnitSetting, UnitSystem, ValidationError};
use uuid::Uuid;

#[test]
fn favorite_insert_is_an_upsert_on_city() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFavoriteRepository::new(&conn);

    assert_eq!(repo.insert_favorite(&Favorite::new("Paris", "FR")).unwrap(), "Paris");
    repo.insert_favorite(&Favorite::new("Paris", "France")).unwrap();

    let favorites = repo.list_favorites().unwrap();
    assert_eq!(favorites, vec![Favorite::new("Paris", "France")]);
}

#[test]
fn favorite_lookup_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFavoriteRepository::new(&conn);
    repo.insert_favorite(&Favorite::new("Lyon", "FR")).unwrap();

    assert!(repo.get_favorite("Lyon").unwrap().is_some());
    assert!(repo.get_favorite("lyon").unwrap().is_none());
}

#[test]
fn favorite_update_and_delete_of_missing_city_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFavoriteRepository::new(&conn);

    let err = repo
        .update_favorite(&Favorite::new("Atlantis", "??"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(city) if city == "Atlantis"));
    assert!(matches!(
        repo.delete_favorite("Atlantis").unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn blank_favorite_city_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFavoriteRepository::new(&conn);

    let err = repo.insert_favorite(&Favorite::new("  ", "FR")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankField("city"))
    ));
}

#[test]
fn delete_all_favorites_reports_removed_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFavoriteRepository::new(&conn);
    repo.insert_favorite(&Favorite::new("Paris", "FR")).unwrap();
    repo.insert_favorite(&Favorite::new("Lyon", "FR")).unwrap();

    assert_eq!(repo.delete_all_favorites().unwrap(), 2);
    assert!(repo.list_favorites().unwrap().is_empty());
    assert_eq!(repo.delete_all_favorites().unwrap(), 0);
}

#[test]
fn units_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUnitRepository::new(&conn);

    repo.insert_unit(&UnitSetting::new(UnitSystem::Metric)).unwrap();
    repo.insert_unit(&UnitSetting::new(UnitSystem::Imperial))
        .unwrap();

    let units = repo.list_units().unwrap();
    assert_eq!(
        units,
        vec![
            UnitSetting::new(UnitSystem::Metric),
            UnitSetting::new(UnitSystem::Imperial),
        ]
    );

    repo.delete_unit("metric").unwrap();
    assert_eq!(repo.list_units().unwrap().len(), 1);
    assert_eq!(repo.delete_all_units().unwrap(), 1);
}

#[test]
fn notes_are_listed_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let older = Note::new("older", "", 1_000);
    let newer = Note::new("newer", "body", 2_000);
    repo.insert_note(&older).unwrap();
    repo.insert_note(&newer).unwrap();

    let titles: Vec<String> = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["newer", "older"]);
}

#[test]
fn note_update_roundtrip_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let mut note = Note::new("draft", "", 10);
    let id = repo.insert_note(&note).unwrap();
    assert_eq!(id, note.id);

    note.title = "final".to_string();
    note.description = "done".to_string();
    repo.update_note(&note).unwrap();
    assert_eq!(repo.get_note(id).unwrap(), Some(note));

    repo.delete_note(id).unwrap();
    assert_eq!(repo.get_note(id).unwrap(), None);
    assert!(matches!(
        repo.delete_note(id).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn book_insert_assigns_id_when_missing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let book = Book::new("Dune", "Frank Herbert");
    let id = repo.insert_book(&book).unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded, book.clone().with_id(id));
}

#[test]
fn book_insert_keeps_explicit_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let id = Uuid::new_v4();
    let book = Book::new("Emma", "Jane Austen").with_id(id);
    assert_eq!(repo.insert_book(&book).unwrap(), id);
}

#[test]
fn book_update_persists_timestamps_and_review() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let id = repo.insert_book(&Book::new("Dune", "Frank Herbert")).unwrap();
    let mut book = repo.get_book(id).unwrap().unwrap();
    book.started_reading = Some(100);
    book.finished_reading = Some(200);
    book.rating = Some(5);
    book.notes = Some("spice".to_string());
    repo.update_book(&book).unwrap();

    assert_eq!(repo.get_book(id).unwrap(), Some(book));
}

#[test]
fn book_update_requires_id_and_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let unsaved = Book::new("Dune", "Frank Herbert");
    assert!(matches!(
        repo.update_book(&unsaved).unwrap_err(),
        RepoError::InvalidData(_)
    ));

    let missing = unsaved.with_id(Uuid::new_v4());
    assert!(matches!(
        repo.update_book(&missing).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn book_validation_runs_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let mut book = Book::new("Dune", "Frank Herbert");
    book.rating = Some(7);
    assert!(matches!(
        repo.insert_book(&book).unwrap_err(),
        RepoError::Validation(ValidationError::RatingOutOfRange(7))
    ));
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn corrupted_book_id_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (id, title) VALUES ('not-a-uuid', 'Dune');",
        [],
    )
    .unwrap();

    let repo = SqliteBookRepository::new(&conn);
    assert!(matches!(
        repo.list_books().unwrap_err(),
        RepoError::InvalidData(_)
    ));
}
