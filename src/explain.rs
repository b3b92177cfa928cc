//! Execution-stats summary extracted from a `find` explain document.

use mongodb::bson::{Bson, Document};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplainSummary {
    pub execution_time_ms: Option<u64>,
    pub docs_examined: Option<u64>,
    pub n_returned: Option<u64>,
    /// First index found in the execution stage tree; `None` means a collection scan.
    pub index_name: Option<String>,
}

impl ExplainSummary {
    pub fn from_document(explain_doc: &Document) -> Self {
        let mut summary = ExplainSummary::default();
        if let Ok(execution_stats) = explain_doc.get_document("executionStats") {
            summary.execution_time_ms = read_u64(execution_stats, "executionTimeMillis");
            summary.docs_examined = read_u64(execution_stats, "totalDocsExamined");
            summary.n_returned = read_u64(execution_stats, "nReturned");
            if let Ok(stages) = execution_stats.get_document("executionStages") {
                summary.index_name = find_index_name(stages);
            }
        }
        if summary.index_name.is_none()
            && let Ok(planner) = explain_doc.get_document("queryPlanner")
            && let Ok(winning_plan) = planner.get_document("winningPlan")
        {
            summary.index_name = find_index_name(winning_plan);
        }
        summary
    }

    pub fn index_label(&self) -> &str {
        self.index_name.as_deref().unwrap_or("No index (collection scan)")
    }
}

/// Depth-first search for `indexName` through `inputStage`/`inputStages`.
///
/// Newer servers wrap the classic tree in `queryPlan`, so that is followed too.
fn find_index_name(stage: &Document) -> Option<String> {
    if let Ok(name) = stage.get_str("indexName") {
        return Some(name.to_string());
    }
    if let Ok(query_plan) = stage.get_document("queryPlan")
        && let Some(name) = find_index_name(query_plan)
    {
        return Some(name);
    }
    if let Ok(child) = stage.get_document("inputStage")
        && let Some(name) = find_index_name(child)
    {
        return Some(name);
    }
    if let Ok(children) = stage.get_array("inputStages") {
        return children.iter().filter_map(Bson::as_document).find_map(find_index_name);
    }
    None
}

fn read_u64(doc: &Document, key: &str) -> Option<u64> {
    let value = doc.get(key)?;
    match value {
        Bson::Int32(v) if *v >= 0 => Some(*v as u64),
        Bson::Int64(v) if *v >= 0 => Some(*v as u64),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}
