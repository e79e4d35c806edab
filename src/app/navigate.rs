use anyhow::Context as _;

/// Request to show a book's preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
}

pub trait Navigator {
    fn navigate(&self, request: &NavigationRequest) -> anyhow::Result<()>;
}

/// Opens the preview with the system's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, request: &NavigationRequest) -> anyhow::Result<()> {
        tracing::info!(url = %request.url, "open preview");
        open::that(&request.url).with_context(|| format!("open preview: {}", request.url))
    }
}
