use sensei_core::types::{Facet, ReviewRequest};

const BASELINE_FACETS: &[&str] = &[
    "naming conventions and identifier clarity",
    "function length and single-responsibility design",
    "comments and documentation style",
    "error handling and exceptions",
    "duplication and code smells",
];

const HTTP_FACET: &str = "HTTP API design, status codes, and error responses";
const HTTP_MARKERS: &[&str] = &["http", "route", "router", "endpoint", "@app.route", "fastapi", "express", "flask"];
const API_CONTEXT_MARKERS: &[&str] = &["rest", "api"];

const PYTHON_LANGUAGES: &[&str] = &["python", "py"];
const PYTHON_FACET: &str = "Python naming and import organization";
const JS_LANGUAGES: &[&str] = &["javascript", "typescript", "js", "ts"];
const JS_FACET: &str = "JavaScript/TypeScript async patterns and error handling for promises";

/// Derives the review aspects to query for. Deterministic and side-effect free.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetPlanner;

impl FacetPlanner {
    pub fn plan(&self, language: &str, code: &str, context: Option<&str>) -> Vec<Facet> {
        let language = language.trim().to_lowercase();
        let code = code.to_lowercase();
        let context = context.unwrap_or_default().to_lowercase();

        let mut facets: Vec<Facet> = BASELINE_FACETS.iter().map(|f| Facet::new(*f)).collect();

        let http_in_source = HTTP_MARKERS.iter().any(|m| code.contains(m) || context.contains(m));
        if http_in_source || API_CONTEXT_MARKERS.iter().any(|m| context.contains(m)) {
            facets.push(Facet::new(HTTP_FACET));
        }

        if PYTHON_LANGUAGES.contains(&language.as_str()) {
            facets.push(Facet::new(PYTHON_FACET));
        } else if JS_LANGUAGES.contains(&language.as_str()) {
            facets.push(Facet::new(JS_FACET));
        }
        facets
    }

    pub fn plan_for(&self, request: &ReviewRequest) -> Vec<Facet> {
        self.plan(&request.language, &request.code, request.context.as_deref())
    }
}
