//! Prompt templates for the assistant call sites.

use pawtrack_types::fields::Profile;

/// System instruction for the conversational cat assistant.
pub fn cat_assistant_system(profile: &Profile) -> String {
    format!(
        "You are an expert cat assistant for a cat named {name} (nickname {nickname}). \
         She was born on {birth}. \
         You are helpful, friendly, and knowledgeable about cat health, behavior, and care. \
         Keep answers concise and suitable for a mobile chat interface. \
         If asked about medical emergencies, always advise consulting a real vet.",
        name = profile.name,
        nickname = profile.nickname,
        birth = profile.birth_date,
    )
}

/// One-shot prompt asking for a warmer rewrite of a diary memory.
/// The model must return only the new description text.
pub fn rewrite_memory(title: &str, description: &str) -> String {
    format!(
        "Rewrite the following memory about a cat to make it more moving, sweet, and \
         narrative, while keeping the facts true. \
         Current title: \"{title}\". \
         Current description: \"{description}\". \
         Return only the text of the new description, without quotes and without a title."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn system_prompt_mentions_the_cat() {
        let profile = Profile {
            name: "Tiki".into(),
            nickname: "Pi".into(),
            bio: String::new(),
            birth_date: NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(),
            image: None,
        };
        let prompt = cat_assistant_system(&profile);
        assert!(prompt.contains("Tiki"));
        assert!(prompt.contains("Pi"));
        assert!(prompt.contains("2024-04-25"));
    }

    #[test]
    fn rewrite_prompt_embeds_both_parts() {
        let prompt = rewrite_memory("First day", "She hid under the sofa.");
        assert!(prompt.contains("First day"));
        assert!(prompt.contains("under the sofa"));
    }
}
