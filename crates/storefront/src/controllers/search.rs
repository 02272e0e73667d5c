//! Search form controller.

use super::{ControllerContext, FormController, FormData, FormId, FormOutcome, fields};
use crate::controllers::navigation::Navigation;
use crate::error::SiteError;

/// Results page URL for `query`, with the trimmed query percent-encoded.
#[must_use]
pub fn results_url(search_page: &str, query: &str) -> String {
    format!("{search_page}?q={}", urlencoding::encode(query.trim()))
}

/// Handles `search-form`. No validation; every submission navigates.
#[derive(Debug, Default)]
pub struct SearchController;

impl FormController for SearchController {
    fn form(&self) -> FormId {
        FormId::Search
    }

    fn handle(&self, ctx: &ControllerContext<'_>, form: &FormData) -> Result<FormOutcome, SiteError> {
        let url = results_url(&ctx.config.search_page, form.get(fields::QUERY));
        Ok(FormOutcome::navigate(Navigation::Immediate(url)))
    }
}
