//! Attribute search controller.
//!
//! Orchestrates the expression builder, layer inspection, and the host's
//! query execution. All legality checks run before the query is submitted,
//! so execution-layer errors are reserved for true grammar failures.

use tracing::{debug, warn};

use crate::error::{Result, SearchError};
use crate::expression::{self, Comparator, JoinPolicy, MatchMode};
use crate::host::{Feature, FeatureId, MapView, MessageSink, QueryError, VectorLayer};
use crate::layer::{describe_fields, FieldKind};
use crate::message::Severity;

// ---------------------------------------------------------------------------
// Request and outcome types
// ---------------------------------------------------------------------------

/// One search invocation's inputs, assembled fresh per call.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub free_text: String,
    pub join: JoinPolicy,
    pub refinement: Option<Refinement>,
}

/// The optional second condition, in either of the two refinement shapes
/// the dialog offers.
#[derive(Debug, Clone)]
pub enum Refinement {
    /// Free-text refinement ORed across every string field.
    AcrossFields { term: String, mode: MatchMode },
    /// Typed comparison against one named field.
    TypedField {
        field: String,
        term: String,
        comparator: Comparator,
    },
}

/// Result of a successful search. An empty feature list is a valid outcome,
/// distinct from every error.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub features: Vec<Feature>,
}

impl SearchOutcome {
    pub fn matched_ids(&self) -> Vec<FeatureId> {
        self.features.iter().map(|f| f.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Runs the full search protocol against a layer handle.
///
/// Performs every legality check, builds and combines the clauses, and
/// submits the expression. Does not touch selection, the map view, or the
/// message sink — [`run_search`] layers those on top.
pub fn execute(layer: Option<&dyn VectorLayer>, request: &SearchRequest) -> Result<SearchOutcome> {
    let layer = layer.ok_or(SearchError::NoLayerSelected)?;
    if layer.geometry().is_none() {
        return Err(SearchError::UnsupportedLayerType);
    }

    let free = request.free_text.trim();
    let refine_term = match &request.refinement {
        Some(Refinement::AcrossFields { term, .. }) => term.trim(),
        Some(Refinement::TypedField { term, .. }) => term.trim(),
        None => "",
    };
    if free.is_empty() && refine_term.is_empty() {
        return Err(SearchError::NoSearchCriteria);
    }

    let fields = describe_fields(layer);
    let has_string_field = fields.iter().any(|f| f.kind == FieldKind::String);

    // Both the free-word clause and the across-fields refinement need at
    // least one string field.
    let wants_string_fields = !free.is_empty()
        || matches!(
            &request.refinement,
            Some(Refinement::AcrossFields { term, .. }) if !term.trim().is_empty()
        );
    if wants_string_fields && !has_string_field {
        return Err(SearchError::NoSearchableFields);
    }

    let free_clause = expression::build_contains_over_fields(&fields, free);

    let refine_clause = match &request.refinement {
        None => None,
        Some(Refinement::AcrossFields { term, mode }) => {
            expression::build_refinement(&fields, term, *mode)
        }
        Some(Refinement::TypedField {
            field,
            term,
            comparator,
        }) => {
            // Blank term or field means the refinement is simply off.
            if term.trim().is_empty() || field.trim().is_empty() {
                None
            } else {
                let descriptor = fields
                    .iter()
                    .find(|f| f.name == *field)
                    .ok_or_else(|| SearchError::UnknownField(field.clone()))?;
                Some(expression::build_typed_comparison(
                    descriptor,
                    term,
                    *comparator,
                )?)
            }
        }
    };

    let Some(filter) = expression::combine(free_clause, refine_clause, request.join) else {
        return Err(SearchError::NoUsableExpression);
    };
    debug!(expression = filter.as_str(), "running attribute search");

    let features = layer.query(&filter).map_err(|err| match err {
        QueryError::Parse(message) => SearchError::ExpressionSyntax(message),
        QueryError::Execution(message) => SearchError::Query(message),
    })?;

    Ok(SearchOutcome { features })
}

/// Runs a search and applies its outcome to the host: selection, zoom, and
/// exactly one notification per invocation.
///
/// Zero matches clears the prior selection and reports info; any error is
/// surfaced as a single warning/critical message and yields `None`.
pub fn run_search(
    layer: Option<&dyn VectorLayer>,
    request: &SearchRequest,
    view: &dyn MapView,
    messages: &dyn MessageSink,
) -> Option<SearchOutcome> {
    match execute(layer, request) {
        Ok(outcome) => {
            let layer = layer?;
            if outcome.is_empty() {
                layer.clear_selection();
                messages.notify(Severity::Info, "search", "no matching features");
            } else {
                let ids = outcome.matched_ids();
                layer.select(&ids);
                view.zoom_to_selected(layer);
                messages.notify(
                    Severity::Success,
                    "search",
                    &format!("{} features matched", ids.len()),
                );
            }
            Some(outcome)
        }
        Err(err) => {
            warn!(error = %err, "attribute search rejected");
            messages.notify(err.severity(), "search", &err.to_string());
            None
        }
    }
}

/// Re-selects a single feature and zooms to it (result-row double-click).
pub fn zoom_to_feature(layer: &dyn VectorLayer, id: FeatureId, view: &dyn MapView) {
    layer.select(&[id]);
    view.zoom_to_selected(layer);
}
