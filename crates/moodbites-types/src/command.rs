//! Slash command types.
//!
//! A `CommandInvocation` is derived from a single user turn and never
//! stored. Parsing lives in `moodbites-core::command::parser`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The recognised slash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    Recipe,
    Summary,
    Fact,
    Motivate,
    Remember,
    Preferences,
}

impl CommandName {
    pub const ALL: [CommandName; 6] = [
        CommandName::Recipe,
        CommandName::Summary,
        CommandName::Fact,
        CommandName::Motivate,
        CommandName::Remember,
        CommandName::Preferences,
    ];

    /// One-line usage string shown in the help listing.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandName::Recipe => "/recipe <ingredients, comma-separated> [, dietary tag]",
            CommandName::Summary => "/summary",
            CommandName::Fact => "/fact",
            CommandName::Motivate => "/motivate",
            CommandName::Remember => "/remember <something about you>",
            CommandName::Preferences => "/preferences",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandName::Recipe => "Generate a healthy recipe from your ingredients",
            CommandName::Summary => "Summarize your logged mood and food trends",
            CommandName::Fact => "Get a fun nutrition fact",
            CommandName::Motivate => "Get a motivational tip for healthy eating",
            CommandName::Remember => "Save a preference for future answers",
            CommandName::Preferences => "List your saved preferences",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandName::Recipe => write!(f, "/recipe"),
            CommandName::Summary => write!(f, "/summary"),
            CommandName::Fact => write!(f, "/fact"),
            CommandName::Motivate => write!(f, "/motivate"),
            CommandName::Remember => write!(f, "/remember"),
            CommandName::Preferences => write!(f, "/preferences"),
        }
    }
}

impl FromStr for CommandName {
    type Err = String;

    /// Parse a command token, with or without the leading slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        match lowered.strip_prefix('/').unwrap_or(&lowered) {
            "recipe" => Ok(CommandName::Recipe),
            "summary" => Ok(CommandName::Summary),
            "fact" => Ok(CommandName::Fact),
            "motivate" => Ok(CommandName::Motivate),
            "remember" => Ok(CommandName::Remember),
            "preferences" => Ok(CommandName::Preferences),
            other => Err(format!("unknown command: '/{other}'")),
        }
    }
}

/// Which command a slash-prefixed turn names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Known(CommandName),
    /// The raw token as typed, e.g. `/frobnicate`.
    Unknown(String),
}

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub kind: CommandKind,
    /// Raw remainder after the command token, trimmed.
    pub argument_text: String,
}

/// Dietary constraints recognised inside `/recipe` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietaryTag::Vegan => write!(f, "vegan"),
            DietaryTag::Vegetarian => write!(f, "vegetarian"),
            DietaryTag::GlutenFree => write!(f, "gluten-free"),
            DietaryTag::DairyFree => write!(f, "dairy-free"),
            DietaryTag::Keto => write!(f, "keto"),
            DietaryTag::Paleo => write!(f, "paleo"),
        }
    }
}

impl FromStr for DietaryTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegan" => Ok(DietaryTag::Vegan),
            "vegetarian" => Ok(DietaryTag::Vegetarian),
            "gluten-free" => Ok(DietaryTag::GlutenFree),
            "dairy-free" => Ok(DietaryTag::DairyFree),
            "keto" => Ok(DietaryTag::Keto),
            "paleo" => Ok(DietaryTag::Paleo),
            other => Err(format!("invalid dietary tag: '{other}'")),
        }
    }
}

/// Parsed `/recipe` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeArgs {
    pub ingredients: Vec<String>,
    pub dietary: Option<DietaryTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name_roundtrip() {
        for name in CommandName::ALL {
            let s = name.to_string();
            let parsed: CommandName = s.parse().unwrap();
            assert_eq!(name, parsed);
        }
    }

    #[test]
    fn test_command_name_case_insensitive() {
        assert_eq!("/RECIPE".parse::<CommandName>(), Ok(CommandName::Recipe));
        assert_eq!("Preferences".parse::<CommandName>(), Ok(CommandName::Preferences));
    }

    #[test]
    fn test_unknown_command_name() {
        assert!("/frobnicate".parse::<CommandName>().is_err());
    }

    #[test]
    fn test_dietary_tag_roundtrip() {
        for tag in [
            DietaryTag::Vegan,
            DietaryTag::Vegetarian,
            DietaryTag::GlutenFree,
            DietaryTag::DairyFree,
            DietaryTag::Keto,
            DietaryTag::Paleo,
        ] {
            let parsed: DietaryTag = tag.to_string().parse().unwrap();
            assert_eq!(tag, parsed);
        }
    }

    #[test]
    fn test_dietary_tag_serde() {
        let json = serde_json::to_string(&DietaryTag::GlutenFree).unwrap();
        assert_eq!(json, "\"gluten-free\"");
    }

    #[test]
    fn test_every_command_has_usage() {
        for name in CommandName::ALL {
            assert!(name.usage().starts_with(&name.to_string()));
            assert!(!name.description().is_empty());
        }
    }
}
