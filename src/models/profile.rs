use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
}

/// The site owner's identity. A singleton owned by the state store; only an
/// explicit reset restores it to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub photo: String,
    pub social: SocialLinks,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "John Doe".to_string(),
            profession: "Full-Stack Developer".to_string(),
            bio: String::new(),
            email: String::new(),
            phone: String::new(),
            photo: String::new(),
            social: SocialLinks::default(),
        }
    }
}

impl Profile {
    /// Shallow-merge a partial field map. Unknown fields and non-string
    /// values are ignored; social links nest under `social`.
    pub fn merge(&mut self, data: &Map<String, Value>) {
        for (key, value) in data {
            match key.as_str() {
                "name" => set(&mut self.name, value),
                "profession" => set(&mut self.profession, value),
                "bio" => set(&mut self.bio, value),
                "email" => set(&mut self.email, value),
                "phone" => set(&mut self.phone, value),
                "photo" => set(&mut self.photo, value),
                "social" => {
                    if let Some(links) = value.as_object() {
                        if let Some(v) = links.get("linkedin") {
                            set(&mut self.social.linkedin, v);
                        }
                        if let Some(v) = links.get("github") {
                            set(&mut self.social.github, v);
                        }
                        if let Some(v) = links.get("twitter") {
                            set(&mut self.social.twitter, v);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn set(target: &mut String, value: &Value) {
    if let Some(s) = value.as_str() {
        *target = s.to_string();
    }
}
