use crate::error::AppError;
use crate::links::LinkExtractor;
use crate::models::{Analysis, FetchedPage, LinkStatus};
use crate::scan::{count_headings, has_login_form, page_title, page_version};
use crate::traits::HttpClient;

/// Runs every feature scan plus link verification over a fetched page.
///
/// A failing feature, link extraction included, is logged and falls back to
/// its empty value. Only an unprocessable page fails the whole analysis.
#[derive(Clone)]
pub struct Analyser<H: HttpClient> {
    links: LinkExtractor<H>,
}

impl<H: HttpClient> Analyser<H> {
    pub fn new(client: H) -> Self {
        Self {
            links: LinkExtractor::new(client),
        }
    }

    pub async fn analyse(&self, page: &FetchedPage) -> Result<Analysis, AppError> {
        let content = match &page.content {
            Some(content) if page.is_processable() => content,
            _ => {
                return Err(AppError::PageNotProcessable {
                    status: page.status_text.clone(),
                });
            }
        };
        let html = String::from_utf8_lossy(content);

        let page_version = page_version(&html).unwrap_or_else(|e| {
            tracing::warn!(url = %page.url, error = %e, "Unable to determine page version");
            String::new()
        });

        let title = page_title(&html).unwrap_or_else(|e| {
            tracing::warn!(url = %page.url, error = %e, "Unable to read page title");
            String::new()
        });

        let headings = count_headings(&html);
        let has_login_form = has_login_form(&html);

        let links = match self.links.extract_links(&page.url, &html).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(url = %page.url, error = %e, "Link extraction failed");
                Vec::new()
            }
        };

        let internal_link_count = links.iter().filter(|l| l.is_internal).count();
        let active_link_count = links
            .iter()
            .filter(|l| l.status == LinkStatus::Active)
            .count();

        tracing::info!(
            url = %page.url,
            links = links.len(),
            active = active_link_count,
            "Page analysed"
        );

        Ok(Analysis {
            page: page.clone(),
            internal_link_count,
            external_link_count: links.len() - internal_link_count,
            active_link_count,
            inactive_link_count: links.len() - active_link_count,
            links,
            title,
            headings,
            page_version,
            has_login_form,
        })
    }
}
