//! Integration tests for the resume intake pipeline

use resume_intake::config::Config;
use resume_intake::error::{IntakeError, Result};
use resume_intake::form::session::{FormPhase, FormSession, LoggingSink};
use resume_intake::input::manager::UploadManager;
use resume_intake::input::text_extractor::extract_from_bytes;
use resume_intake::llm::client::{CompletionService, GeminiClient};
use resume_intake::vector::embeddings::{Embedder, OpenAiEmbedder};
use resume_intake::vector::store::{
    EmbeddingStore, ResumeMetadata, ResumeVectorRecord, SupabaseTable, VectorTable,
};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct ScriptedCompletion {
    responses: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCompletion {
    fn new(responses: &[&str]) -> Self {
        let mut responses: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
        responses.reverse();
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }
}

impl CompletionService for ScriptedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| IntakeError::Network("no scripted response left".to_string()))
    }
}

#[derive(Clone)]
struct FailingEmbedder {
    calls: Arc<AtomicUsize>,
}

impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(IntakeError::Embedding("missing credential".to_string()))
    }
}

#[derive(Clone)]
struct FixedEmbedder;

impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.5; 8])
    }
}

#[derive(Clone, Default)]
struct RecordingTable {
    rows: Arc<Mutex<Vec<ResumeVectorRecord>>>,
}

impl VectorTable for RecordingTable {
    async fn insert(&self, record: ResumeVectorRecord) -> Result<()> {
        self.rows.lock().unwrap().push(record);
        Ok(())
    }

    async fn similarity_search(
        &self,
        _query_embedding: Vec<f32>,
        _match_threshold: f32,
        match_count: usize,
    ) -> Result<Vec<ResumeVectorRecord>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().take(match_count).cloned().collect())
    }
}

/// Assemble a minimal PDF with one `Tj`-drawn text line per page. Offsets in
/// the cross-reference table are computed, so the payload is well-formed.
fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let font_id = 3 + 2 * page_count;
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + 2 * i))
        .collect();

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content_id = 3 + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
            font_id, content_id
        ));
        let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        xref_offset
    ));
    pdf.into_bytes()
}

#[test]
fn test_multi_page_extraction_joins_pages_in_order() {
    let payload = minimal_pdf(&["First page alpha beta", "Second page gamma"]);

    let text = extract_from_bytes(&payload).unwrap();
    assert_eq!(text, "First page alpha beta Second page gamma");
}

#[tokio::test]
async fn test_extraction_from_pdf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, minimal_pdf(&["Ada Lovelace, analyst engine programmer"])).unwrap();

    let text = UploadManager::new().extract_text(&path).await.unwrap();
    assert_eq!(text, "Ada Lovelace, analyst engine programmer");
}

#[test]
fn test_session_accepts_the_live_client_stack() {
    let config = Config::default();
    let client = GeminiClient::new(&config.completion, "test-key".to_string());
    let embedder = OpenAiEmbedder::new(&config.embedding, None);
    let table = SupabaseTable::new(
        &config.vector_store,
        "https://project.supabase.co".to_string(),
        "anon-key".to_string(),
    );
    let store = EmbeddingStore::new(embedder, table, &config.vector_store);

    let mut session = FormSession::new(client, Some(store), LoggingSink);
    session.set_name("Ada Lovelace");
    assert_eq!(session.phase(), FormPhase::Idle);
    assert_eq!(session.state().name, "Ada Lovelace");
}

#[tokio::test]
async fn test_extraction_rejects_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, "not a pdf").unwrap();

    let result = UploadManager::new().extract_text(&path).await;
    assert!(matches!(result, Err(IntakeError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_extraction_rejects_nonexistent_file() {
    let result = UploadManager::new()
        .extract_text(Path::new("tests/fixtures/nonexistent.pdf"))
        .await;
    assert!(matches!(result, Err(IntakeError::InvalidInput(_))));
}

#[tokio::test]
async fn test_extraction_rejects_malformed_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"garbage bytes, not a pdf").unwrap();

    let result = UploadManager::new().extract_text(&path).await;
    assert!(matches!(result, Err(IntakeError::PdfExtraction(_))));
}

#[tokio::test]
async fn test_full_intake_lifecycle() {
    let completion = ScriptedCompletion::new(&[
        "Summary: Seasoned engineer\n\nSkills: Rust, SQL\n\nExperience: - Led platform team\n\nEducation: - MS CS\n\nScore: 88\n\nFeedback: Strong profile",
        "Match Score: 71\n\nFeedback: Good overlap\n\nMissing Skills: Kubernetes, Go",
    ]);
    let table = RecordingTable::default();
    let store = EmbeddingStore::new(
        FixedEmbedder,
        table.clone(),
        &Config::default().vector_store,
    );

    let mut session = FormSession::new(completion, Some(store), LoggingSink);
    session.set_name("Ada Lovelace");
    session.set_email("ada@example.com");
    session.set_linkedin_url("https://linkedin.com/in/ada");
    session.add_skill("SQL");

    let report = session
        .analyze_resume_text("Seasoned engineer resume".to_string())
        .await
        .unwrap();
    assert!(report.analyzed);
    assert!(report.stored);

    let profile = session.profile().unwrap();
    assert_eq!(profile.score, 88);
    assert_eq!(session.state().skills.as_slice(), ["SQL", "Rust"]);

    let stored = table.rows.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].metadata.name, "Ada Lovelace");
    assert_eq!(stored[0].metadata.skills, ["SQL", "Rust"]);

    assert!(session.match_job("Platform engineer role").await.unwrap());
    let job_match = session.job_match().unwrap();
    assert_eq!(job_match.match_score, 71);
    assert_eq!(job_match.missing_skills, ["Kubernetes", "Go"]);

    session.submit().await.unwrap();
    assert!(session.state().name.is_empty());
    assert!(session.state().resume_text.is_empty());
    assert!(session.profile().is_none());
    assert!(session.job_match().is_none());
}

#[tokio::test]
async fn test_store_never_inserts_after_embedding_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let table = RecordingTable::default();
    let store = EmbeddingStore::new(
        FailingEmbedder {
            calls: calls.clone(),
        },
        table.clone(),
        &Config::default().vector_store,
    );

    let metadata = ResumeMetadata {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        skills: vec!["Rust".to_string()],
    };

    let err = store.store("resume body", metadata).await.unwrap_err();
    assert!(matches!(err, IntakeError::Embedding(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(table.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_uses_default_limit() {
    let table = RecordingTable::default();
    for i in 0..7 {
        table
            .insert(ResumeVectorRecord {
                content: format!("resume {}", i),
                embedding: vec![0.5; 8],
                metadata: ResumeMetadata {
                    name: format!("Candidate {}", i),
                    email: format!("c{}@example.com", i),
                    skills: vec![],
                },
            })
            .await
            .unwrap();
    }

    let store = EmbeddingStore::new(FixedEmbedder, table, &Config::default().vector_store);
    let results = store.search("platform engineer", None).await.unwrap();
    assert_eq!(results.len(), 5);

    // explicit limit overrides the default
    let table = RecordingTable::default();
    table
        .insert(ResumeVectorRecord {
            content: "resume".to_string(),
            embedding: vec![0.5; 8],
            metadata: ResumeMetadata {
                name: "Candidate".to_string(),
                email: "c@example.com".to_string(),
                skills: vec![],
            },
        })
        .await
        .unwrap();
    let store = EmbeddingStore::new(FixedEmbedder, table, &Config::default().vector_store);
    let results = store.search("platform engineer", Some(3)).await.unwrap();
    assert_eq!(results.len(), 1);
}
