use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::keyword::KeywordRecord;

/// Capability that turns a section heading + keyword into prose.
///
/// This is the seam where a real AI client would sit; implementations are
/// allowed to be slow and non-deterministic. Everything around this call in
/// the pipeline stays deterministic.
#[async_trait]
pub trait ContentProducer: Send + Sync {
    async fn produce(&self, keyword: &KeywordRecord, heading: &str) -> Result<String>;
}

/// Section-generation strategy, selected by pattern-matching the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Steps,
    Comparison,
    Benefits,
    Caution,
    CaseStudy,
    Faq,
    Generic,
}

impl SectionKind {
    fn detect(heading: &str) -> Self {
        if heading.contains("手順") || heading.contains("ステップ") || heading.contains("流れ") {
            SectionKind::Steps
        } else if heading.contains("比較") || heading.contains("違い") {
            SectionKind::Comparison
        } else if heading.contains("メリット") || heading.contains("効果") {
            SectionKind::Benefits
        } else if heading.contains("注意") || heading.contains("デメリット") || heading.contains("リスク") {
            SectionKind::Caution
        } else if heading.contains("事例") || heading.contains("利用企業") {
            SectionKind::CaseStudy
        } else if heading.contains("FAQ") || heading.contains("よくある質問") {
            SectionKind::Faq
        } else {
            SectionKind::Generic
        }
    }
}

/// Rule-based producer used in place of an external AI service. Fully
/// deterministic, which the pipeline tests rely on.
#[derive(Debug, Default, Clone)]
pub struct TemplateContentProducer;

impl TemplateContentProducer {
    pub fn new() -> Self {
        Self
    }

    fn render(keyword: &KeywordRecord, heading: &str) -> String {
        let product = &keyword.parent_keyword;
        let phrase = &keyword.child_keyword;
        let target = &keyword.target;

        match SectionKind::detect(heading) {
            SectionKind::Steps => format!(
                "{heading}を段階ごとに整理します。\
                 まず現状を棚卸しし、次に{product}で実現したい状態を決め、\
                 最後に担当と期限を割り当てて着手します。\
                 「{phrase}」で調べている段階なら、小さく始めて広げるのが近道です。"
            ),
            SectionKind::Comparison => format!(
                "{heading}では、評価軸を先に固定してから各候補を見るのがコツです。\
                 料金だけでなく、{target}の運用に乗るかどうかを軸に\
                 {product}と代替手段を並べて検討します。"
            ),
            SectionKind::Benefits => format!(
                "{heading}として大きいのは、日々の作業が目に見えて減ることです。\
                 {target}の現場では、{product}の導入によって\
                 報告や確認のやり取りが大幅に短縮された例が目立ちます。"
            ),
            SectionKind::Caution => format!(
                "{heading}も押さえておきましょう。\
                 導入直後は運用ルールが定まらず混乱しがちです。\
                 {product}に限らず、最初の1か月は対象範囲を絞り、\
                 定着を確認してから広げることをおすすめします。"
            ),
            SectionKind::CaseStudy => format!(
                "{heading}を紹介します。\
                 ある{target}では「{phrase}」と同じ課題意識から{product}を導入し、\
                 3か月で運用が定着しました。\
                 成功の共通点は、最初に目的を一つに絞ったことです。"
            ),
            SectionKind::Faq => format!(
                "{heading}をまとめました。\
                 Q. 導入にどのくらい時間がかかりますか? \
                 A. {product}の場合、小規模なら数日で使い始められます。\
                 Q. 既存のやり方と併用できますか? \
                 A. 移行期間中の併用を前提に設計されています。"
            ),
            SectionKind::Generic => format!(
                "{heading}について解説します。\
                 「{phrase}」と検索する{target}が知りたいのは、{intent}という点です。\
                 この章ではその疑問に答える形で要点を整理します。",
                intent = keyword.search_intent
            ),
        }
    }
}

#[async_trait]
impl ContentProducer for TemplateContentProducer {
    async fn produce(&self, keyword: &KeywordRecord, heading: &str) -> Result<String> {
        Ok(Self::render(keyword, heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::{ArticleType, KeywordType};

    fn keyword() -> KeywordRecord {
        KeywordRecord::new(
            "タスクフロー".to_string(),
            "タスクフロー 導入 手順".to_string(),
            KeywordType::Decision,
            "中小企業の経営者".to_string(),
            "導入の具体的な進め方を知りたい".to_string(),
            ArticleType::HowTo,
            vec![],
        )
    }

    #[test]
    fn test_strategy_selection_by_heading() {
        assert_eq!(SectionKind::detect("導入のステップ"), SectionKind::Steps);
        assert_eq!(SectionKind::detect("主要サービスの比較表"), SectionKind::Comparison);
        assert_eq!(SectionKind::detect("導入のメリット"), SectionKind::Benefits);
        assert_eq!(SectionKind::detect("注意点"), SectionKind::Caution);
        assert_eq!(SectionKind::detect("導入事例"), SectionKind::CaseStudy);
        assert_eq!(SectionKind::detect("よくある質問"), SectionKind::Faq);
        assert_eq!(SectionKind::detect("まとめ"), SectionKind::Generic);
    }

    #[tokio::test]
    async fn test_producer_is_deterministic() {
        let producer = TemplateContentProducer::new();
        let kw = keyword();
        let a = producer.produce(&kw, "導入のステップ").await.unwrap();
        let b = producer.produce(&kw, "導入のステップ").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("タスクフロー"));
    }

    #[tokio::test]
    async fn test_generic_section_mentions_search_intent() {
        let producer = TemplateContentProducer::new();
        let kw = keyword();
        let text = producer.produce(&kw, "まとめ").await.unwrap();
        assert!(text.contains(&kw.search_intent));
    }
}
