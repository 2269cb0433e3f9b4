//! Canned answers used when the remote model cannot be reached or trusted.
//!
//! Keyword matching on the lower-cased latest user text. Deterministic, no
//! state, no I/O.

const ENERGY_REPLY: &str = "🔋 For an energy boost, I recommend:\n\n\
• **Complex carbs**: Oatmeal with berries\n\
• **Protein**: Greek yogurt with nuts\n\
• **Iron-rich foods**: Spinach salad\n\
• **B-vitamins**: Whole grain toast\n\n\
These foods provide sustained energy without crashes. Would you like a specific recipe?";

const STRESS_REPLY: &str = "🧘 To help manage stress, try these calming foods:\n\n\
• **Magnesium-rich**: Dark chocolate, almonds\n\
• **Omega-3s**: Salmon, walnuts\n\
• **Herbal teas**: Chamomile, green tea\n\
• **Complex carbs**: Sweet potatoes\n\n\
These nutrients support your nervous system and promote relaxation.";

const MOOD_REPLY: &str = "😊 Mood-boosting foods that increase serotonin:\n\n\
• **Tryptophan**: Turkey, eggs, cheese\n\
• **Folate**: Leafy greens, legumes\n\
• **Vitamin D**: Fatty fish, fortified foods\n\
• **Antioxidants**: Berries, dark chocolate\n\n\
These help your brain produce feel-good chemicals naturally!";

const GENERAL_REPLY: &str = "I understand you're looking for nutrition and mood guidance. I can help with:\n\n\
🍽️ **Food recommendations** based on your mood\n\
📈 **Mood pattern analysis** from your data\n\
🥗 **Personalized recipes** for your goals\n\
🧠 **Nutritional insights** for mental wellness\n\n\
What specific area would you like to explore?";

/// Which canned answer a text maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    Energy,
    Stress,
    Mood,
    General,
}

impl FallbackTopic {
    /// Classify text by keyword. Earlier topics win when several match.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("energy") || lower.contains("tired") {
            FallbackTopic::Energy
        } else if lower.contains("stress") || lower.contains("anxious") {
            FallbackTopic::Stress
        } else if lower.contains("happy") || lower.contains("mood") {
            FallbackTopic::Mood
        } else {
            FallbackTopic::General
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            FallbackTopic::Energy => ENERGY_REPLY,
            FallbackTopic::Stress => STRESS_REPLY,
            FallbackTopic::Mood => MOOD_REPLY,
            FallbackTopic::General => GENERAL_REPLY,
        }
    }
}

/// Stateless responder for offline and failure paths.
pub struct FallbackResponder;

impl FallbackResponder {
    /// Canned answer for the given user text.
    pub fn respond(text: &str) -> &'static str {
        FallbackTopic::classify(text).reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_keywords() {
        assert_eq!(FallbackTopic::classify("I'm so TIRED today"), FallbackTopic::Energy);
        assert_eq!(FallbackTopic::classify("need more energy"), FallbackTopic::Energy);
        assert!(FallbackResponder::respond("tired").contains("energy boost"));
    }

    #[test]
    fn test_stress_keywords() {
        assert_eq!(FallbackTopic::classify("feeling anxious"), FallbackTopic::Stress);
        assert!(FallbackResponder::respond("so much stress").contains("calming foods"));
    }

    #[test]
    fn test_mood_keywords() {
        assert_eq!(FallbackTopic::classify("my mood is low"), FallbackTopic::Mood);
        assert!(FallbackResponder::respond("how to be happy").contains("serotonin"));
    }

    #[test]
    fn test_energy_wins_over_mood() {
        assert_eq!(
            FallbackTopic::classify("tired and in a bad mood"),
            FallbackTopic::Energy
        );
    }

    #[test]
    fn test_catch_all() {
        let reply = FallbackResponder::respond("what is a carrot?");
        assert!(reply.contains("I understand you"));
        assert!(reply.contains("nutrition and mood guidance"));
    }

    #[test]
    fn test_deterministic() {
        let a = FallbackResponder::respond("Stress at work");
        let b = FallbackResponder::respond("Stress at work");
        assert_eq!(a, b);
    }
}
