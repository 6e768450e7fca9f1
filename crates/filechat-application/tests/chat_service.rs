use async_trait::async_trait;
use filechat_application::{ChatError, ChatService};
use filechat_core::payload::WireRole;
use filechat_core::{
    ApiError, ChatBackend, ExtractionError, FileKind, MessageRole, RequestPayload, SchemaError,
    Session, UploadedFile,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Backend that answers with a fixed result and records every payload.
struct ScriptedBackend {
    reply: fn() -> Result<String, ApiError>,
    payloads: Mutex<Vec<RequestPayload>>,
}

impl ScriptedBackend {
    fn new(reply: fn() -> Result<String, ApiError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            payloads: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<RequestPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, payload: &RequestPayload) -> Result<String, ApiError> {
        self.payloads.lock().unwrap().push(payload.clone());
        (self.reply)()
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn service(backend: &Arc<ScriptedBackend>) -> ChatService {
    ChatService::new(Arc::clone(backend) as Arc<dyn ChatBackend>)
}

#[tokio::test]
async fn test_successful_submission_appends_both_turns() {
    let backend = ScriptedBackend::new(|| Ok("Hello".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();

    let reply = chat.submit_prompt(&mut session, "Hi").await.unwrap();

    assert_eq!(reply, "Hello");
    let roles: Vec<MessageRole> = session.log.all().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    assert_eq!(session.log.last().unwrap().content, "Hello");
}

#[tokio::test]
async fn test_http_failure_leaves_user_turn_unanswered() {
    let backend = ScriptedBackend::new(|| Err(ApiError::http(500, "oops")));
    let chat = service(&backend);
    let mut session = Session::new();

    let err = chat.submit_prompt(&mut session, "Hi").await.unwrap_err();

    assert!(matches!(err, ChatError::Api(ApiError::Http { status: 500, .. })));
    assert!(err.to_string().contains("500"));
    let last = session.log.last().unwrap();
    assert_eq!(last.role, MessageRole::User);
    assert_eq!(last.content, "Hi");
    assert_eq!(session.log.len(), 1);
}

#[tokio::test]
async fn test_failed_submission_does_not_block_the_next_one() {
    let failing = ScriptedBackend::new(|| {
        Err(ApiError::from(SchemaError::NoCandidates {
            body: "{}".to_string(),
        }))
    });
    let mut session = Session::new();

    assert!(service(&failing).submit_prompt(&mut session, "first").await.is_err());

    let working = ScriptedBackend::new(|| Ok("answer".to_string()));
    service(&working)
        .submit_prompt(&mut session, "second")
        .await
        .unwrap();

    let contents: Vec<&str> = session.log.all().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "answer"]);

    // Both unanswered and answered prompts are resent as history.
    let sent = working.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].contents.len(), 2);
    assert!(sent[0].contents.iter().all(|c| c.role == WireRole::User));
}

#[tokio::test]
async fn test_submission_merges_context_into_first_turn() {
    let backend = ScriptedBackend::new(|| Ok("ok".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    chat.upload_files(&mut session, &[UploadedFile::text("a.txt", "Alpha")])
        .unwrap();

    chat.submit_prompt(&mut session, "Hi").await.unwrap();
    chat.submit_prompt(&mut session, "Bye").await.unwrap();

    let sent = backend.sent();
    let second = &sent[1];
    assert_eq!(second.contents.len(), 3);
    assert_eq!(
        second.contents[0].parts[0].text,
        "You are a helpful assistant. Use the following file content as context for the conversation:\n\n=== File: a.txt ===\nAlpha\n\n\nUser: Hi"
    );
    assert_eq!(second.contents[1].role, WireRole::Model);
    assert_eq!(second.contents[2].parts[0].text, "Bye");
}

#[tokio::test]
async fn test_failed_batch_keeps_previous_context() {
    let backend = ScriptedBackend::new(|| Ok("ok".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    chat.upload_files(&mut session, &[UploadedFile::text("old.txt", "old context")])
        .unwrap();
    let before = session.context.text().to_string();

    let batch = vec![
        UploadedFile::text("one.txt", "1"),
        UploadedFile::new("two.txt", FileKind::PlainText, vec![0xc3, 0x28]),
        UploadedFile::text("three.txt", "3"),
    ];
    let err = chat.upload_files(&mut session, &batch).unwrap_err();

    assert!(matches!(err, ExtractionError::InvalidUtf8 { .. }));
    assert_eq!(session.context.text(), before);
    assert_eq!(session.context.file_names(), ["old.txt".to_string()]);
}

#[tokio::test]
async fn test_successful_batch_replaces_context() {
    let backend = ScriptedBackend::new(|| Ok("ok".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    chat.upload_files(&mut session, &[UploadedFile::text("old.txt", "old")])
        .unwrap();

    let summary = chat
        .upload_files(
            &mut session,
            &[UploadedFile::text("b.txt", "B"), UploadedFile::text("a.txt", "A")],
        )
        .unwrap();

    assert_eq!(summary.file_count(), 2);
    assert_eq!(summary.to_string(), "2 file(s) loaded successfully!");
    assert_eq!(
        session.context.text(),
        "=== File: b.txt ===\nB\n\n=== File: a.txt ===\nA\n"
    );
    assert!(!session.context.text().contains("old"));
}

#[tokio::test]
async fn test_clear_keeps_context() {
    let backend = ScriptedBackend::new(|| Ok("Hello".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    chat.upload_files(&mut session, &[UploadedFile::text("a.txt", "A")])
        .unwrap();
    chat.submit_prompt(&mut session, "Hi").await.unwrap();
    let before = session.context.clone();

    chat.clear_conversation(&mut session);

    assert!(session.log.is_empty());
    assert_eq!(session.context, before);
}

#[tokio::test]
async fn test_upload_paths_reads_from_disk() {
    let backend = ScriptedBackend::new(|| Ok("ok".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    tokio::fs::write(&path, "from disk").await.unwrap();

    let summary = chat.upload_paths(&mut session, &[&path]).await.unwrap();

    assert_eq!(summary.file_names, vec!["notes.txt".to_string()]);
    assert_eq!(session.context.text(), "=== File: notes.txt ===\nfrom disk\n");
}

#[tokio::test]
async fn test_upload_paths_rejects_unsupported_kind_without_touching_context() {
    let backend = ScriptedBackend::new(|| Ok("ok".to_string()));
    let chat = service(&backend);
    let mut session = Session::new();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("photo.jpg");
    tokio::fs::write(&path, [0xffu8, 0xd8, 0xff]).await.unwrap();

    let err = chat.upload_paths(&mut session, &[&path]).await.unwrap_err();

    assert!(matches!(err, ExtractionError::UnsupportedKind { .. }));
    assert!(session.context.is_empty());
}
