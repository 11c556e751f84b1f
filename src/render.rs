use crate::{CardLabels, PreviewState};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Renders the card markup for `state`.
///
/// While loading only the loader is emitted; otherwise the optional image and
/// the content block. The two views never appear together.
pub fn render_card(state: &PreviewState, labels: &CardLabels) -> String {
    let mut html = format!(
        r#"<div class="preview" style="--theme: {}" part="preview">"#,
        attr(&state.theme_color)
    );

    if state.is_loading {
        html.push_str(r#"<div class="loader" part="loader"></div>"#);
    } else {
        if !state.image_url.is_empty() {
            html.push_str(&format!(
                r#"<img src="{}" alt="" part="image" />"#,
                attr(&state.image_url)
            ));
        }
        html.push_str(&format!(
            concat!(
                r#"<div class="content" part="content">"#,
                r#"<h2 class="title" part="title">{title}</h2>"#,
                r#"<details part="details">"#,
                r#"<summary part="summary">{summary}</summary>"#,
                r#"<p class="desc" part="desc">{desc}</p>"#,
                r#"</details>"#,
                r#"<a href="{link}" target="_blank" class="url" part="url">{link_label}</a>"#,
                r#"</div>"#,
            ),
            title = text(&state.title),
            summary = text(&labels.summary),
            desc = text(&state.description),
            link = attr(&state.canonical_link),
            link_label = text(&labels.link),
        ));
    }

    html.push_str("</div>");
    html
}
