// ============================================================
// KEYWORD TAXONOMY GENERATOR
// ============================================================
// Expands a (product, target) pair into a fixed set of keyword records
// spanning all four intent categories. Content is deterministic for
// identical inputs; only ids and timestamps differ between calls.

use tracing::debug;
use validator::Validate;

use crate::domain::error::Result;
use crate::domain::keyword::{ArticleType, KeywordRecord, KeywordType};
use crate::domain::product::{ProductSummary, TargetProfile};

struct KeywordBlueprint {
    child_keyword: String,
    keyword_type: KeywordType,
    search_intent: String,
    article_type: ArticleType,
    h2_structure: Vec<String>,
}

/// Generate the standard 10-record taxonomy for one product and target:
/// 3 decision, 3 comparison, 2 interest, 2 latent keywords, each with a
/// category-appropriate article type and a 3-4 section outline.
pub fn generate_keywords(
    product: &ProductSummary,
    target: &TargetProfile,
) -> Result<Vec<KeywordRecord>> {
    product.validate()?;
    target.validate()?;

    let records: Vec<KeywordRecord> = blueprints(product, target)
        .into_iter()
        .map(|bp| {
            KeywordRecord::new(
                product.name.clone(),
                bp.child_keyword,
                bp.keyword_type,
                target.label.clone(),
                bp.search_intent,
                bp.article_type,
                bp.h2_structure,
            )
        })
        .collect();

    debug!(
        product = %product.name,
        target = %target.label,
        count = records.len(),
        "Generated keyword taxonomy"
    );

    Ok(records)
}

fn blueprints(product: &ProductSummary, target: &TargetProfile) -> Vec<KeywordBlueprint> {
    let name = &product.name;
    let label = &target.label;
    // Fall back to the display name/label when descriptive fields are
    // absent, never to empty text.
    let topic = product.category.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or(name);
    let pain = target.pain_point_or_label();
    let strengths = product.strengths_or_name();

    vec![
        // 今すぐ (decision)
        KeywordBlueprint {
            child_keyword: format!("{} 料金", name),
            keyword_type: KeywordType::Decision,
            search_intent: format!("{}が{}の導入費用を具体的に把握したい", label, name),
            article_type: ArticleType::UsefulInfo,
            h2_structure: vec![
                format!("{}の料金プラン", name),
                "プラン別の機能と選び方".to_string(),
                "費用対効果の考え方".to_string(),
                "申し込みまでの流れ".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} 導入 手順", name),
            keyword_type: KeywordType::Decision,
            search_intent: format!("導入を決めた{}が具体的な進め方を知りたい", label),
            article_type: ArticleType::HowTo,
            h2_structure: vec![
                "導入前に準備すること".to_string(),
                format!("{}導入のステップ", name),
                "つまずきやすいポイントと注意点".to_string(),
                "まとめ".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} 評判", name),
            keyword_type: KeywordType::Decision,
            search_intent: format!("{}が導入前に実際の利用者の評価を確かめたい", label),
            article_type: ArticleType::CaseStudy,
            h2_structure: vec![
                format!("{}の導入事例", name),
                "利用企業の声".to_string(),
                "導入効果のデータ".to_string(),
                "まとめ".to_string(),
            ],
        },
        // 比較検討 (comparison)
        KeywordBlueprint {
            child_keyword: format!("{} 比較", name),
            keyword_type: KeywordType::Comparison,
            search_intent: format!("{}が候補サービスを並べて検討したい", label),
            article_type: ArticleType::ComparisonArticle,
            h2_structure: vec![
                "比較のポイント".to_string(),
                format!("{}と主要サービスの比較表", name),
                format!("{}におすすめの選び方", label),
                "まとめ".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} 他社 違い", name),
            keyword_type: KeywordType::Comparison,
            search_intent: format!("{}と他社サービスの差分を知って絞り込みたい", name),
            article_type: ArticleType::ComparisonArticle,
            h2_structure: vec![
                format!("{}の強み: {}", name, strengths),
                "他社サービスとの違い".to_string(),
                "乗り換え時の注意点".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} デメリット", name),
            keyword_type: KeywordType::Comparison,
            search_intent: format!("{}が導入前に弱点や向き不向きを確認したい", label),
            article_type: ArticleType::ComparisonArticle,
            h2_structure: vec![
                format!("{}のメリット", name),
                format!("{}のデメリット", name),
                "デメリットへの対処法".to_string(),
                "まとめ".to_string(),
            ],
        },
        // 興味関心 (interest)
        KeywordBlueprint {
            child_keyword: format!("{} 使い方", name),
            keyword_type: KeywordType::Interest,
            search_intent: format!("{}で何ができるのか具体的なイメージを掴みたい", name),
            article_type: ArticleType::HowTo,
            h2_structure: vec![
                format!("{}でできること", name),
                "基本的な使い方のステップ".to_string(),
                "よくある質問".to_string(),
                "まとめ".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} 効率化", topic),
            keyword_type: KeywordType::Interest,
            search_intent: format!("{}を効率化する方法を広く探している", pain),
            article_type: ArticleType::UsefulInfo,
            h2_structure: vec![
                format!("{}が非効率になる原因", pain),
                "効率化で得られるメリット".to_string(),
                format!("{}を使った解決策", name),
            ],
        },
        // 潜在 (latent)
        KeywordBlueprint {
            child_keyword: format!("{} とは", topic),
            keyword_type: KeywordType::Latent,
            search_intent: format!("{}の基本を初めて調べている", topic),
            article_type: ArticleType::Glossary,
            h2_structure: vec![
                format!("{}とは", topic),
                "押さえておきたい基本用語".to_string(),
                format!("{}にとっての活用シーン", label),
                "まとめ".to_string(),
            ],
        },
        KeywordBlueprint {
            child_keyword: format!("{} 課題 解決", topic),
            keyword_type: KeywordType::Latent,
            search_intent: format!("{}をどう解決すべきか手がかりを探している", pain),
            article_type: ArticleType::UsefulInfo,
            h2_structure: vec![
                format!("{}が抱えやすい課題", label),
                "課題を放置するリスク".to_string(),
                "解決に向けたアプローチ".to_string(),
                format!("{}という選択肢", name),
            ],
        },
    ]
}
