//! Hard-coded fallback suggestions, used when no API key is configured or
//! the remote endpoint fails. One line per section.

use crate::models::section::SectionKind;

pub fn for_section(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Hero => {
            "Welcome to my portfolio. I'm a creative developer with a passion \
             for cutting-edge technologies."
        }
        SectionKind::About => {
            "Tell your story: where you started, what drives you, and the kind \
             of work you want to do next."
        }
        SectionKind::Projects => {
            "Showcase your best work. Each project should tell a story and \
             highlight your unique skills."
        }
        SectionKind::Skills => {
            "Highlight your core competencies and technical expertise, along \
             with proficiency levels."
        }
        SectionKind::Testimonials => {
            "Let your satisfied clients speak for you with heartfelt \
             testimonials that build trust."
        }
        SectionKind::Contact => {
            "Make it easy to connect with you. Provide clear contact details \
             and a friendly call-to-action."
        }
    }
}
