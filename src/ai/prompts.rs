use crate::models::section::SectionKind;

/// Bio prompt: improve an existing bio or generate one from scratch.
pub fn bio(profession: &str, current_bio: &str) -> String {
    if current_bio.trim().is_empty() {
        format!(
            "Generate a short, professional bio for a {}. Provide 3 variations.",
            profession
        )
    } else {
        format!(
            "Improve and professionalize this bio for a {}: \"{}\". Generate 3 variations.",
            profession, current_bio
        )
    }
}

/// Project description prompt.
pub fn project_description(title: &str, current_description: &str) -> String {
    if current_description.trim().is_empty() {
        format!(
            "Generate a project description for a project titled \"{}\". Provide 3 variations.",
            title
        )
    } else {
        format!(
            "Improve this project description for a project titled \"{}\": \"{}\". \
             Generate 3 improved variations.",
            title, current_description
        )
    }
}

/// Portfolio structure prompt. The response is expected to be a
/// comma-separated list of section names.
pub fn structure(profession: &str) -> String {
    format!(
        "Based on the profession \"{}\", suggest an optimal portfolio structure. \
         Provide a comma-separated list of sections such as \
         \"About, Projects, Skills, Experience, Education\".",
        profession
    )
}

/// Generic content prompt for one section of the portfolio.
pub fn section_content(kind: SectionKind, current: &str) -> String {
    format!(
        "Suggest content for the {} section of a portfolio site. Current content: {}",
        kind.key(),
        current
    )
}
