use savecast_sdk::SavedItem;

pub const DEFAULT_TEMPLATE: &str = "New Pocket save: {title} - {url}";
/// Default status length limit of a Mastodon instance.
pub const MAX_STATUS_CHARS: usize = 500;
const UNTITLED: &str = "Untitled";
const ELLIPSIS: char = '…';

/// Text template for a status, with `{title}` and `{url}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTemplate(String);

impl Default for StatusTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}

impl StatusTemplate {
    /// A template must reference `{url}`; a post without its link is useless.
    pub fn new(template: impl Into<String>) -> Result<Self, String> {
        let template = template.into();
        if !template.contains("{url}") {
            return Err("template must contain the {url} placeholder".to_string());
        }
        Ok(Self(template))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the status for a save. Blank titles become `Untitled`. When
    /// the text would exceed [`MAX_STATUS_CHARS`], the title is shortened and
    /// the URL is left intact.
    #[must_use]
    pub fn render(&self, item: &SavedItem) -> String {
        let title = match item.title.trim() {
            "" => UNTITLED,
            title => title,
        };

        let text = self.fill(title, &item.url);
        let overflow = text.chars().count().saturating_sub(MAX_STATUS_CHARS);
        let slots = self.0.matches("{title}").count();
        if overflow == 0 || slots == 0 {
            return text;
        }

        // Each title slot gives up its share of the overflow plus room for
        // the ellipsis.
        let cut = overflow.div_ceil(slots) + 1;
        let keep = title.chars().count().saturating_sub(cut);
        let mut short: String = title.chars().take(keep).collect();
        short.truncate(short.trim_end().len());
        short.push(ELLIPSIS);

        self.fill(&short, &item.url)
    }

    /// Substitute placeholders in a single pass so that placeholder-like
    /// text inside a title is never expanded.
    fn fill(&self, title: &str, url: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + title.len() + url.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{title}") {
                out.push_str(title);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{url}") {
                out.push_str(url);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}
