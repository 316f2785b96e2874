use chrono::DateTime;
use store::{LessonStore, NewLesson, NewQuiz, Question, QuizStore, SqliteStore};
use tutor_utils::{
    error::Error,
    lms::{SyncKind, sync_to_lms},
};

async fn temp_store(dir: &tempfile::TempDir) -> SqliteStore {
    let url = format!("sqlite://{}", dir.path().join("sync.db").display());
    SqliteStore::connect(&url).await.unwrap()
}

/// Sync a lesson, check the file holds the lesson fields plus a valid `synced_at`
#[tokio::test]
async fn lesson_sync_writes_record_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;
    let mut session = store.session().await.unwrap();

    let id = session
        .create_lesson(NewLesson {
            title: "Introduction to Rust".to_string(),
            topic: "rust".to_string(),
            content: "Ownership and borrowing".to_string(),
            created_by: Some(4),
        })
        .await
        .unwrap();
    let lesson = session.get_lesson(id).await.unwrap().unwrap();

    let path = sync_to_lms(&mut session, SyncKind::Lesson, id, "Canvas", dir.path())
        .await
        .unwrap();

    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("lms_sync_Canvas_"));
    assert!(file_name.ends_with("Z.json"));

    let synced: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(DateTime::parse_from_rfc3339(synced["synced_at"].as_str().unwrap()).is_ok());
    assert_eq!(synced["id"], id);
    assert_eq!(synced["title"], lesson.title);
    assert_eq!(synced["topic"], lesson.topic);
    assert_eq!(synced["content"], lesson.content);
    assert_eq!(synced["created_by"], 4);
    assert_eq!(
        synced["created_at"],
        serde_json::to_value(lesson.created_at).unwrap()
    );
}

#[tokio::test]
async fn quiz_sync_includes_structured_questions() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;
    let mut session = store.session().await.unwrap();

    let id = session
        .create_quiz(NewQuiz {
            title: "Rust basics".to_string(),
            lesson_id: None,
            questions: vec![Question {
                prompt: "Is Rust memory safe?".to_string(),
                choices: vec!["Yes".to_string(), "No".to_string()],
                answer: 0,
            }],
        })
        .await
        .unwrap();

    let path = sync_to_lms(&mut session, SyncKind::Quiz, id, "MockLMS", dir.path())
        .await
        .unwrap();

    let synced: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(synced["title"], "Rust basics");
    assert_eq!(synced["lesson_id"], serde_json::Value::Null);
    assert_eq!(
        synced["questions"],
        serde_json::json!([{"q": "Is Rust memory safe?", "choices": ["Yes", "No"], "answer": 0}])
    );
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;
    let mut session = store.session().await.unwrap();

    let err = sync_to_lms(&mut session, SyncKind::Quiz, 42, "MockLMS", dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.to_string(), "quiz 42 not found");
}
