use crate::designs;
use crate::models::state::PortfolioState;
use crate::resolve::{resolve, EffectiveConfig};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Keep only characters safe inside a CSS value. Fonts and colors need
/// letters, digits, spaces and a little punctuation; anything that could
/// close the style block or the surrounding attribute is dropped.
pub fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || " #,-.()%_".contains(*c))
        .collect()
}

/// Build the CSS custom properties for the effective configuration.
pub fn build_css_variables(config: &EffectiveConfig) -> String {
    format!(
        r#":root {{
    --font-primary: {font};
    --font-size-body: {size}px;
    --color-primary: {primary};
    --color-accent: {accent};
    --color-text: {text};
    --color-bg: {bg};
}}"#,
        font = css_value(&config.font),
        size = config.font_size,
        primary = css_value(&config.primary_color),
        accent = css_value(&config.accent_color),
        text = css_value(&config.text_color),
        bg = css_value(&config.background_color),
    )
}

/// Render the full preview document. Stateless: the effective configuration
/// is re-derived and every section re-rendered on each call, which is cheap
/// at portfolio scale (tens of items at most).
pub fn render_page(state: &PortfolioState) -> String {
    let config = resolve(state.selected_template.as_ref(), &state.settings);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "    <title>{} — Portfolio</title>\n",
        html_escape(&state.profile.name)
    ));
    html.push_str("    <style>\n");
    html.push_str(&build_css_variables(&config));
    html.push_str(
        "\nbody { margin: 0; font-family: var(--font-primary); \
         font-size: var(--font-size-body); color: var(--color-text); \
         background: var(--color-bg); }\n\
         section { padding: 48px 24px; }\n\
         .skill-bar { background: #e9ecef; border-radius: 4px; height: 12px; }\n\
         .skill-bar-fill { background: var(--color-primary); border-radius: 4px; height: 12px; }\n",
    );
    html.push_str("    </style>\n</head>\n");
    html.push_str(&format!("<body data-theme=\"{}\">\n", config.theme.key()));

    for kind in &config.section_order {
        html.push_str(&designs::render_section(*kind, state, &config));
        html.push('\n');
    }

    html.push_str(&format!(
        "<footer><p>&copy; {} {}</p></footer>\n</body>\n</html>\n",
        chrono::Utc::now().format("%Y"),
        html_escape(&state.profile.name)
    ));
    html
}
