//! Pure parsing of slash commands and their arguments.

use moodbites_types::command::{CommandInvocation, CommandKind, CommandName, DietaryTag, RecipeArgs};

/// Classify a raw user turn.
///
/// Returns `None` when the trimmed text does not start with `/`. Otherwise
/// the first whitespace-delimited token names the command (case-insensitive)
/// and the trimmed remainder becomes `argument_text`.
pub fn parse_invocation(text: &str) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (token, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (trimmed, ""),
    };

    let kind = match token.parse::<CommandName>() {
        Ok(name) => CommandKind::Known(name),
        Err(_) => CommandKind::Unknown(token.to_string()),
    };

    Some(CommandInvocation {
        kind,
        argument_text: rest.to_string(),
    })
}

/// Split `/recipe` arguments into ingredients and an optional dietary tag.
///
/// The remainder is split on commas, tokens are trimmed and empties dropped.
/// The first token naming a dietary tag becomes the constraint, and every
/// token naming that same tag is removed from the ingredients.
pub fn parse_recipe_args(argument_text: &str) -> RecipeArgs {
    let tokens: Vec<&str> = argument_text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let dietary = tokens.iter().find_map(|t| t.parse::<DietaryTag>().ok());

    let ingredients = tokens
        .into_iter()
        .filter(|t| match dietary {
            Some(tag) => t.parse::<DietaryTag>().ok() != Some(tag),
            None => true,
        })
        .map(str::to_string)
        .collect();

    RecipeArgs {
        ingredients,
        dietary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(parse_invocation("what should I eat?").is_none());
        assert!(parse_invocation("a/b").is_none());
        assert!(parse_invocation("").is_none());
    }

    #[test]
    fn test_known_command_with_args() {
        let inv = parse_invocation("/remember I am vegetarian").unwrap();
        assert_eq!(inv.kind, CommandKind::Known(CommandName::Remember));
        assert_eq!(inv.argument_text, "I am vegetarian");
    }

    #[test]
    fn test_command_is_case_insensitive() {
        let inv = parse_invocation("  /FACT  ").unwrap();
        assert_eq!(inv.kind, CommandKind::Known(CommandName::Fact));
        assert_eq!(inv.argument_text, "");
    }

    #[test]
    fn test_first_token_must_match_exactly() {
        let inv = parse_invocation("/recipes tofu").unwrap();
        assert_eq!(inv.kind, CommandKind::Unknown("/recipes".to_string()));
    }

    #[test]
    fn test_unknown_command() {
        let inv = parse_invocation("/frobnicate now").unwrap();
        assert_eq!(inv.kind, CommandKind::Unknown("/frobnicate".to_string()));
        assert_eq!(inv.argument_text, "now");
    }

    #[test]
    fn test_tab_separates_arguments() {
        let inv = parse_invocation("/remember\tno nuts").unwrap();
        assert_eq!(inv.kind, CommandKind::Known(CommandName::Remember));
        assert_eq!(inv.argument_text, "no nuts");
    }

    #[test]
    fn test_recipe_args_with_dietary_tag() {
        let args = parse_recipe_args("tofu, broccoli, vegan");
        assert_eq!(args.ingredients, vec!["tofu", "broccoli"]);
        assert_eq!(args.dietary, Some(DietaryTag::Vegan));
    }

    #[test]
    fn test_recipe_args_without_tag() {
        let args = parse_recipe_args(" rice ,, beans ,");
        assert_eq!(args.ingredients, vec!["rice", "beans"]);
        assert_eq!(args.dietary, None);
    }

    #[test]
    fn test_recipe_args_first_tag_wins() {
        let args = parse_recipe_args("keto, eggs, paleo, Keto");
        assert_eq!(args.dietary, Some(DietaryTag::Keto));
        assert_eq!(args.ingredients, vec!["eggs", "paleo"]);
    }

    #[test]
    fn test_recipe_args_dairy_free() {
        let args = parse_recipe_args("oats, dairy-free");
        assert_eq!(args.dietary, Some(DietaryTag::DairyFree));
        assert_eq!(args.ingredients, vec!["oats"]);
    }

    #[test]
    fn test_recipe_args_empty() {
        let args = parse_recipe_args("");
        assert!(args.ingredients.is_empty());
        assert_eq!(args.dietary, None);

        let only_tag = parse_recipe_args("vegan");
        assert!(only_tag.ingredients.is_empty());
        assert_eq!(only_tag.dietary, Some(DietaryTag::Vegan));
    }
}
