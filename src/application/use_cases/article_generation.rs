// ============================================================
// CONTENT GENERATION PIPELINE
// ============================================================
// Turns keyword records into article drafts, one at a time, with progress
// reporting and a cooperative cancellation point between items.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::domain::article::ArticleDraft;
use crate::domain::author::AuthorProfile;
use crate::domain::error::{AppError, Result};
use crate::domain::keyword::{KeywordRecord, KeywordType};
use crate::infrastructure::content_producer::ContentProducer;

/// Progress callback: (1-based completed count, total).
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Cooperative cancellation flag, checked between items, never mid-item.
/// Atomic so the contract survives callers that cancel from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Picks a title template index for a keyword. The ambient RNG of the
/// original tool is replaced by this seam so tests stay deterministic;
/// callers wanting variety inject their own selector.
pub trait TitleSelector: Send + Sync {
    fn pick(&self, keyword: &KeywordRecord, template_count: usize) -> usize;
}

/// Default selector: stable index derived from the child keyword, so one
/// keyword always gets the same title while a batch still varies.
#[derive(Debug, Default, Clone)]
pub struct StableTitleSelector;

impl TitleSelector for StableTitleSelector {
    fn pick(&self, keyword: &KeywordRecord, template_count: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        keyword.child_keyword.hash(&mut hasher);
        (hasher.finish() % template_count as u64) as usize
    }
}

// Title templates per keyword category. `{keyword}` is replaced by the
// child keyword.
static TITLE_TEMPLATES: Lazy<HashMap<KeywordType, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        KeywordType::Decision,
        vec![
            "{keyword}を徹底解説|導入前に知っておきたいポイント",
            "【最新版】{keyword}のすべて|失敗しない進め方",
            "{keyword}で後悔しないために|実例つきガイド",
        ],
    );
    m.insert(
        KeywordType::Comparison,
        vec![
            "{keyword}|主要サービスを項目別に比較",
            "{keyword}を整理|あなたに合う選び方",
            "【比較表あり】{keyword}の結論と根拠",
        ],
    );
    m.insert(
        KeywordType::Interest,
        vec![
            "{keyword}入門|今日から試せる基本",
            "{keyword}がわかる|つまずきやすい点もフォロー",
            "はじめての{keyword}|要点だけ先取り",
        ],
    );
    m.insert(
        KeywordType::Latent,
        vec![
            "{keyword}とは|基礎からやさしく解説",
            "{keyword}の考え方|課題に気づいたら読む記事",
            "いまさら聞けない{keyword}|全体像をつかむ",
        ],
    );
    m
});

pub struct ArticleGenerationUseCase {
    producer: Arc<dyn ContentProducer>,
    title_selector: Arc<dyn TitleSelector>,
}

impl ArticleGenerationUseCase {
    pub fn new(producer: Arc<dyn ContentProducer>) -> Self {
        Self {
            producer,
            title_selector: Arc::new(StableTitleSelector),
        }
    }

    pub fn with_title_selector(mut self, selector: Arc<dyn TitleSelector>) -> Self {
        self.title_selector = selector;
        self
    }

    /// Generate one draft from a keyword record, optionally shaped by an
    /// author profile.
    pub async fn generate_one(
        &self,
        keyword: &KeywordRecord,
        author: Option<&AuthorProfile>,
    ) -> Result<ArticleDraft> {
        let title = self.build_title(keyword);

        let mut body = String::new();
        body.push_str(&build_intro(keyword, author));
        body.push_str("\n\n");

        for heading in &keyword.h2_structure {
            let section = self.producer.produce(keyword, heading).await?;
            body.push_str(&format!("## {}\n\n{}\n\n", heading, section));
        }

        body.push_str(&build_summary(keyword));

        if let Some(author) = author {
            body = apply_author_style(&body, author);
        }

        Ok(ArticleDraft::new(
            keyword.id.clone(),
            title,
            body,
            author.map(|a| a.id.clone()),
        ))
    }

    /// Generate drafts for a list of keywords, strictly one at a time.
    ///
    /// After each completed item `on_progress(completed, total)` fires with
    /// a 1-based count, so the sequence a caller sees is exactly 1..=N.
    /// The cancel flag is checked before starting each item; once observed,
    /// no further items start and no further progress calls happen — the
    /// drafts completed so far are returned as a partial batch.
    ///
    /// A single-item failure aborts the whole batch with `GenerationFailed`
    /// carrying the failing keyword id and the completed count; retries are
    /// a caller concern.
    pub async fn generate_many(
        &self,
        keywords: &[KeywordRecord],
        author: Option<&AuthorProfile>,
        on_progress: Option<&ProgressFn>,
        cancel: &CancelFlag,
    ) -> Result<Vec<ArticleDraft>> {
        let total = keywords.len();
        let mut drafts = Vec::with_capacity(total);

        info!(total, "Starting draft generation batch");

        for keyword in keywords {
            if cancel.is_cancelled() {
                warn!(
                    completed = drafts.len(),
                    total, "Batch generation cancelled"
                );
                break;
            }

            match self.generate_one(keyword, author).await {
                Ok(draft) => {
                    drafts.push(draft);
                    if let Some(progress) = on_progress {
                        progress(drafts.len(), total);
                    }
                }
                Err(err) => {
                    return Err(AppError::GenerationFailed {
                        keyword_id: keyword.id.clone(),
                        completed: drafts.len(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(drafts)
    }

    fn build_title(&self, keyword: &KeywordRecord) -> String {
        let templates = &TITLE_TEMPLATES[&keyword.keyword_type];
        let index = self.title_selector.pick(keyword, templates.len());
        templates[index.min(templates.len() - 1)].replace("{keyword}", &keyword.child_keyword)
    }
}

fn build_intro(keyword: &KeywordRecord, author: Option<&AuthorProfile>) -> String {
    let mut intro = format!(
        "この記事は、{}に向けて「{}」という疑問に答えるものです。",
        keyword.target, keyword.search_intent
    );
    if let Some(author) = author {
        intro.push_str(&format!(
            "執筆は{}({})が担当します。",
            author.name, author.role
        ));
    }
    intro
}

fn build_summary(keyword: &KeywordRecord) -> String {
    format!(
        "## まとめ\n\n「{}」について、{}が押さえるべきポイントを整理しました。\
         まずは自社の状況に近いところから着手してみてください。",
        keyword.child_keyword, keyword.target
    )
}

/// Author style pass: elevate the register to polite form when the speech
/// characteristics ask for it, then strip every NG word verbatim.
fn apply_author_style(body: &str, author: &AuthorProfile) -> String {
    let mut styled = body.to_string();

    if author.prefers_polite_register() {
        for (plain, polite) in [
            ("である。", "です。"),
            ("だ。", "です。"),
            ("する。", "します。"),
            ("できる。", "できます。"),
            ("しよう。", "しましょう。"),
        ] {
            styled = styled.replace(plain, polite);
        }
    }

    for ng_word in &author.ng_words {
        if ng_word.is_empty() {
            continue;
        }
        styled = styled.replace(ng_word.as_str(), "");
    }

    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::ArticleType;
    use crate::infrastructure::content_producer::TemplateContentProducer;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn keyword(child: &str) -> KeywordRecord {
        KeywordRecord::new(
            "タスクフロー".to_string(),
            child.to_string(),
            KeywordType::Decision,
            "中小企業の経営者".to_string(),
            "導入の具体的な進め方を知りたい".to_string(),
            ArticleType::HowTo,
            vec![
                "導入のステップ".to_string(),
                "注意点".to_string(),
                "よくある質問".to_string(),
            ],
        )
    }

    fn use_case() -> ArticleGenerationUseCase {
        ArticleGenerationUseCase::new(Arc::new(TemplateContentProducer::new()))
    }

    fn author() -> AuthorProfile {
        let mut a = AuthorProfile::new(
            "山田太郎".to_string(),
            "SEOコンサルタント".to_string(),
            "BtoB SaaS".to_string(),
        );
        a.speech_characteristics = "丁寧な敬語".to_string();
        a.ng_words = vec!["絶対".to_string()];
        a
    }

    #[tokio::test]
    async fn test_generate_one_assembles_all_sections() {
        let kw = keyword("タスクフロー 導入 手順");
        let draft = use_case().generate_one(&kw, None).await.unwrap();

        assert_eq!(draft.keyword_id, kw.id);
        assert!(draft.title.contains("タスクフロー 導入 手順"));
        for heading in &kw.h2_structure {
            assert!(draft.content.contains(&format!("## {}", heading)));
        }
        assert!(draft.content.contains("## まとめ"));
        assert!(draft.content.contains(&kw.target));
        assert!(draft.author_id.is_none());
    }

    #[tokio::test]
    async fn test_author_appears_in_intro() {
        let kw = keyword("タスクフロー 評判");
        let author = author();
        let draft = use_case().generate_one(&kw, Some(&author)).await.unwrap();
        assert!(draft.content.contains("山田太郎"));
        assert!(draft.content.contains("SEOコンサルタント"));
        assert_eq!(draft.author_id.as_deref(), Some(author.id.as_str()));
    }

    #[tokio::test]
    async fn test_ng_words_are_stripped_from_body() {
        // Producer that plants an NG word inside the section prose.
        struct NgProducer;
        #[async_trait]
        impl ContentProducer for NgProducer {
            async fn produce(&self, _: &KeywordRecord, heading: &str) -> Result<String> {
                Ok(format!("{}は絶対に安心です。", heading))
            }
        }

        let use_case = ArticleGenerationUseCase::new(Arc::new(NgProducer));
        let draft = use_case
            .generate_one(&keyword("タスクフロー 評判"), Some(&author()))
            .await
            .unwrap();
        assert!(!draft.content.contains("絶対"));
        assert!(draft.content.contains("に安心です。"));
    }

    #[tokio::test]
    async fn test_polite_register_rewrites_plain_endings() {
        struct PlainFormProducer;
        #[async_trait]
        impl ContentProducer for PlainFormProducer {
            async fn produce(&self, _: &KeywordRecord, _: &str) -> Result<String> {
                Ok("導入は簡単だ。すぐに運用できる。".to_string())
            }
        }

        let use_case = ArticleGenerationUseCase::new(Arc::new(PlainFormProducer));
        let draft = use_case
            .generate_one(&keyword("タスクフロー 使い方"), Some(&author()))
            .await
            .unwrap();
        assert!(draft.content.contains("簡単です。"));
        assert!(draft.content.contains("運用できます。"));
        assert!(!draft.content.contains("簡単だ。"));
    }

    #[tokio::test]
    async fn test_title_is_stable_per_keyword() {
        let kw = keyword("タスクフロー 料金");
        let use_case = use_case();
        let a = use_case.generate_one(&kw, None).await.unwrap();
        let b = use_case.generate_one(&kw, None).await.unwrap();
        assert_eq!(a.title, b.title);
    }

    #[tokio::test]
    async fn test_progress_counts_are_one_to_n() {
        let keywords: Vec<_> = (0..4)
            .map(|i| keyword(&format!("タスクフロー キーワード{}", i)))
            .collect();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_cb = Arc::clone(&seen);
        let on_progress = move |completed: usize, total: usize| {
            assert_eq!(total, 4);
            seen_in_cb.lock().unwrap().push(completed);
        };

        let drafts = use_case()
            .generate_many(&keywords, None, Some(&on_progress), &CancelFlag::new())
            .await
            .unwrap();

        assert_eq!(drafts.len(), 4);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_cancellation_stops_between_items() {
        let keywords: Vec<_> = (0..5)
            .map(|i| keyword(&format!("タスクフロー キーワード{}", i)))
            .collect();
        let cancel = CancelFlag::new();
        let calls = Arc::new(Mutex::new(0usize));

        // Cancel from inside the first progress callback; the flag is only
        // observed at the between-items check.
        let cancel_in_cb = cancel.clone();
        let calls_in_cb = Arc::clone(&calls);
        let on_progress = move |_: usize, _: usize| {
            *calls_in_cb.lock().unwrap() += 1;
            cancel_in_cb.cancel();
        };

        let drafts = use_case()
            .generate_many(&keywords, None, Some(&on_progress), &cancel)
            .await
            .unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_already_cancelled_batch_produces_nothing() {
        let keywords = vec![keyword("タスクフロー 料金")];
        let cancel = CancelFlag::new();
        cancel.cancel();

        let called = Arc::new(Mutex::new(false));
        let called_in_cb = Arc::clone(&called);
        let on_progress = move |_: usize, _: usize| {
            *called_in_cb.lock().unwrap() = true;
        };

        let drafts = use_case()
            .generate_many(&keywords, None, Some(&on_progress), &cancel)
            .await
            .unwrap();
        assert!(drafts.is_empty());
        assert!(!*called.lock().unwrap());
    }

    #[tokio::test]
    async fn test_item_failure_aborts_batch_with_context() {
        struct FlakyProducer;
        #[async_trait]
        impl ContentProducer for FlakyProducer {
            async fn produce(&self, keyword: &KeywordRecord, heading: &str) -> Result<String> {
                if keyword.child_keyword.ends_with("2") {
                    return Err(AppError::Internal("producer unreachable".to_string()));
                }
                Ok(format!("{}の本文", heading))
            }
        }

        let keywords: Vec<_> = (0..4)
            .map(|i| keyword(&format!("タスクフロー キーワード{}", i)))
            .collect();
        let failing_id = keywords[2].id.clone();

        let use_case = ArticleGenerationUseCase::new(Arc::new(FlakyProducer));
        let err = use_case
            .generate_many(&keywords, None, None, &CancelFlag::new())
            .await
            .unwrap_err();

        match err {
            AppError::GenerationFailed {
                keyword_id,
                completed,
                ..
            } => {
                assert_eq!(keyword_id, failing_id);
                assert_eq!(completed, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
