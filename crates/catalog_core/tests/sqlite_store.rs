use catalog_core::{AuthorDraft, AuthorStore, BookStore, RepoError, SqliteCatalogStore};
use chrono::NaiveDate;
use uuid::Uuid;

fn draft(first_name: &str, family_name: &str) -> AuthorDraft {
    AuthorDraft {
        first_name: first_name.to_string(),
        family_name: family_name.to_string(),
        ..AuthorDraft::default()
    }
}

#[tokio::test]
async fn create_and_find_roundtrip() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    let mut input = draft("Jane", "Austen");
    input.date_of_birth = NaiveDate::from_ymd_opt(1775, 12, 16);

    let created = store.create_author(&input).await.unwrap();
    assert!(!created.id.is_nil());

    let loaded = store.find_author(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
    assert_eq!(loaded.date_of_death, None);
}

#[tokio::test]
async fn find_missing_author_returns_none() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    assert!(store.find_author(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_orders_by_family_name_case_sensitively() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    for (first, family) in [("Mary", "Shelley"), ("Jane", "Austen"), ("Ann", "bronte"), ("Leo", "Tolstoy")] {
        store.create_author(&draft(first, family)).await.unwrap();
    }

    let families: Vec<_> = store
        .list_authors()
        .await
        .unwrap()
        .into_iter()
        .map(|author| author.family_name)
        .collect();
    assert_eq!(families, ["Austen", "Shelley", "Tolstoy", "bronte"]);
}

#[tokio::test]
async fn update_replaces_all_mutable_fields() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    let mut input = draft("Jane", "Austen");
    input.date_of_birth = NaiveDate::from_ymd_opt(1775, 12, 16);
    let mut author = store.create_author(&input).await.unwrap();

    author.first_name = "Mary".to_string();
    author.family_name = "Shelley".to_string();
    author.date_of_birth = None;
    author.date_of_death = NaiveDate::from_ymd_opt(1851, 2, 1);
    let updated = store.update_author(&author).await.unwrap();

    assert_eq!(updated, author);
    assert_eq!(store.find_author(author.id).await.unwrap(), Some(author));
}

#[tokio::test]
async fn update_missing_author_returns_not_found() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    let ghost = catalog_core::Author::from_draft(Uuid::new_v4(), draft("Nobody", "Here"));

    let err = store.update_author(&ghost).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id));
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    let author = store.create_author(&draft("Jane", "Austen")).await.unwrap();

    assert!(store.delete_author(author.id).await.unwrap());
    assert!(!store.delete_author(author.id).await.unwrap());
    assert!(store.find_author(author.id).await.unwrap().is_none());
}

#[tokio::test]
async fn books_are_filtered_by_author() {
    let store = SqliteCatalogStore::open_in_memory().unwrap();
    let austen = store.create_author(&draft("Jane", "Austen")).await.unwrap();
    let shelley = store.create_author(&draft("Mary", "Shelley")).await.unwrap();
    store
        .create_book("Persuasion", "Anne Elliot", austen.id)
        .await
        .unwrap();
    store
        .create_book("Emma", "A matchmaker", austen.id)
        .await
        .unwrap();
    store
        .create_book("Frankenstein", "A creature", shelley.id)
        .await
        .unwrap();

    let books = store.list_books_by_author(austen.id).await.unwrap();
    let titles: Vec<_> = books.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, ["Emma", "Persuasion"]);
    assert!(books.iter().all(|book| book.author == austen.id));

    let summaries = store.list_book_summaries_by_author(austen.id).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "Emma");
    assert_eq!(summaries[0].summary, "A matchmaker");
    assert_eq!(summaries[0].id, books[0].id);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let store = SqliteCatalogStore::open(&path).unwrap();
    let author = store.create_author(&draft("Jane", "Austen")).await.unwrap();
    store.close().unwrap();

    let reopened = SqliteCatalogStore::open(&path).unwrap();
    assert_eq!(reopened.find_author(author.id).await.unwrap(), Some(author));
}
