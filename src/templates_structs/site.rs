use askama::Template;

use crate::models::document::UNCATEGORIZED;
use crate::models::{Document, DocumentCategory, InstitutionalContent, Project};

/// Documents sharing one category bucket, in display order.
pub struct DocumentGroup {
    pub label: String,
    pub documents: Vec<Document>,
}

/// Known categories first, then anything else alphabetically, uncategorized last.
pub fn group_documents(documents: Vec<Document>) -> Vec<DocumentGroup> {
    let mut order: Vec<String> = DocumentCategory::labels().into_iter().map(String::from).collect();
    let mut extra: Vec<String> = documents
        .iter()
        .map(|d| d.category_bucket().to_string())
        .filter(|label| !order.contains(label) && label != UNCATEGORIZED)
        .collect();
    extra.sort();
    extra.dedup();
    order.extend(extra);
    order.push(UNCATEGORIZED.to_string());

    order
        .into_iter()
        .map(|label| {
            let documents: Vec<Document> =
                documents.iter().filter(|d| d.category_bucket() == label).cloned().collect();
            DocumentGroup { label, documents }
        })
        .filter(|group| !group.documents.is_empty())
        .collect()
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub org_name: String,
    pub pix_key: String,
    pub content: InstitutionalContent,
    pub projects: Vec<Project>,
    pub document_groups: Vec<DocumentGroup>,
    /// Some section could not be loaded from the store.
    pub load_failed: bool,
}
