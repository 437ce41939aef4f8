//! Section renderers for the preview page.
//!
//! Each renderer is pure: (section data, effective style) in, HTML fragment
//! out. List sections render an explicit placeholder when empty so the
//! preview never shows a blank region during onboarding.

use crate::models::profile::Profile;
use crate::models::section::SectionKind;
use crate::models::state::PortfolioState;
use crate::render::{css_value, html_escape};
use crate::resolve::{section_style_attr, EffectiveConfig};

/// Dispatch one section to its renderer. The match is exhaustive over
/// `SectionKind`, so a new section variant fails compilation until it gets
/// a renderer.
pub fn render_section(kind: SectionKind, state: &PortfolioState, config: &EffectiveConfig) -> String {
    match kind {
        SectionKind::Hero => hero(state, config),
        SectionKind::About => about(state, config),
        SectionKind::Projects => projects(state, config),
        SectionKind::Skills => skills(state, config),
        SectionKind::Testimonials => testimonials(state, config),
        SectionKind::Contact => contact(state, config),
    }
}

fn social_links(profile: &Profile) -> String {
    let mut html = String::new();
    for (label, url) in [
        ("LinkedIn", &profile.social.linkedin),
        ("GitHub", &profile.social.github),
        ("Twitter", &profile.social.twitter),
    ] {
        if !url.is_empty() {
            html.push_str(&format!(
                "<a class=\"social-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> ",
                html_escape(url),
                label
            ));
        }
    }
    html
}

fn hero(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let name = if state.profile.name.is_empty() {
        "Your Name"
    } else {
        &state.profile.name
    };
    let profession = if state.profile.profession.is_empty() {
        "Your Profession"
    } else {
        &state.profile.profession
    };

    let mut html = format!(
        "<section id=\"hero\" class=\"preview-hero\" \
         style=\"background:linear-gradient(135deg, {} 0%, {} 100%)\">",
        css_value(&config.primary_color),
        css_value(&config.background_color)
    );
    html.push_str(&format!("<h1>{}</h1>", html_escape(name)));
    html.push_str(&format!("<p class=\"lead\">{}</p>", html_escape(profession)));
    if !state.sections.hero.body.is_empty() {
        html.push_str(&format!(
            "<p class=\"tagline\">{}</p>",
            html_escape(&state.sections.hero.body)
        ));
    }
    if !state.profile.photo.is_empty() {
        html.push_str(&format!(
            "<img class=\"profile-photo\" src=\"{}\" alt=\"{}\">",
            html_escape(&state.profile.photo),
            html_escape(name)
        ));
    }
    let links = social_links(&state.profile);
    if !links.is_empty() {
        html.push_str(&format!("<div class=\"social-links\">{}</div>", links));
    }
    html.push_str("</section>");
    html
}

fn about(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let title = if state.sections.about.title.is_empty() {
        "About Me"
    } else {
        &state.sections.about.title
    };
    // Section body wins over the profile bio; fall back to a nudge.
    let body = if !state.sections.about.body.is_empty() {
        state.sections.about.body.as_str()
    } else if !state.profile.bio.is_empty() {
        state.profile.bio.as_str()
    } else {
        "Your biography goes here. Tell your story and highlight your journey."
    };

    format!(
        "<section id=\"about\" class=\"preview-about\"{}><h2>{}</h2><p>{}</p></section>",
        section_style_attr(config, SectionKind::About),
        html_escape(title),
        html_escape(body)
    )
}

fn projects(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let section = &state.sections.projects;
    let title = if section.title.is_empty() {
        "Projects"
    } else {
        &section.title
    };

    let mut html = format!(
        "<section id=\"projects\" class=\"preview-projects\"{}><h2>{}</h2>",
        section_style_attr(config, SectionKind::Projects),
        html_escape(title)
    );

    if section.items.is_empty() {
        html.push_str("<p class=\"empty-note\">No projects yet.</p>");
    } else {
        html.push_str("<div class=\"card-grid\">");
        for project in &section.items {
            html.push_str("<div class=\"project-card\">");
            if !project.image.is_empty() {
                html.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    html_escape(&project.image),
                    html_escape(&project.title)
                ));
            }
            html.push_str(&format!(
                "<h5>{}</h5><p>{}</p></div>",
                html_escape(&project.title),
                html_escape(&project.description)
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
    html
}

fn skills(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let section = &state.sections.skills;
    let title = if section.title.is_empty() {
        "Skills"
    } else {
        &section.title
    };

    let mut html = format!(
        "<section id=\"skills\" class=\"preview-skills\"{}><h2>{}</h2>",
        section_style_attr(config, SectionKind::Skills),
        html_escape(title)
    );

    if section.items.is_empty() {
        html.push_str("<p class=\"empty-note\">No skills added yet.</p>");
    } else {
        for skill in &section.items {
            let label = if skill.category.is_empty() {
                html_escape(&skill.name)
            } else {
                format!(
                    "{} <small>({})</small>",
                    html_escape(&skill.name),
                    html_escape(&skill.category)
                )
            };
            html.push_str(&format!(
                "<div class=\"skill-item\"><h5>{}</h5>\
                 <div class=\"skill-bar\"><div class=\"skill-bar-fill\" style=\"width:{}%\"></div></div>\
                 </div>",
                label,
                skill.level.min(100)
            ));
        }
    }
    html.push_str("</section>");
    html
}

fn testimonials(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let section = &state.sections.testimonials;
    let title = if section.title.is_empty() {
        "Testimonials"
    } else {
        &section.title
    };

    let mut html = format!(
        "<section id=\"testimonials\" class=\"preview-testimonials\"{}><h2>{}</h2>",
        section_style_attr(config, SectionKind::Testimonials),
        html_escape(title)
    );

    if section.items.is_empty() {
        html.push_str("<p class=\"empty-note\">No testimonials yet.</p>");
    } else {
        html.push_str("<div class=\"card-grid\">");
        for item in &section.items {
            html.push_str("<div class=\"testimonial-card\">");
            if !item.image.is_empty() {
                html.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    html_escape(&item.image),
                    html_escape(&item.author)
                ));
            }
            html.push_str(&format!(
                "<p>&quot;{}&quot;</p><small>- {}</small></div>",
                html_escape(&item.message),
                html_escape(&item.author)
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
    html
}

fn contact(state: &PortfolioState, config: &EffectiveConfig) -> String {
    let section = &state.sections.contact;
    let title = if section.title.is_empty() {
        "Contact"
    } else {
        &section.title
    };

    let mut html = format!(
        "<section id=\"contact\" class=\"preview-contact\"{}><h2>{}</h2>",
        section_style_attr(config, SectionKind::Contact),
        html_escape(title)
    );
    if !section.body.is_empty() {
        html.push_str(&format!("<p>{}</p>", html_escape(&section.body)));
    }
    if !state.profile.email.is_empty() {
        html.push_str(&format!(
            "<p><a href=\"mailto:{0}\">{0}</a></p>",
            html_escape(&state.profile.email)
        ));
    }
    if !state.profile.phone.is_empty() {
        html.push_str(&format!("<p>{}</p>", html_escape(&state.profile.phone)));
    }
    let links = social_links(&state.profile);
    if !links.is_empty() {
        html.push_str(&format!(
            "<h5>Follow Me</h5><div class=\"social-links\">{}</div>",
            links
        ));
    }
    html.push_str("</section>");
    html
}
