use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

/// Single-choice picker over `options` with `current` pre-highlighted.
/// Returns `None` when the user cancels the selection.
pub fn pick(prompt: &str, options: &[String], current: &str) -> Result<Option<String>> {
    let chosen = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(options)
        .default(default_index(options, current))
        .interact_opt()?;
    Ok(chosen.map(|index| options[index].clone()))
}

fn default_index(options: &[String], current: &str) -> usize {
    options.iter().position(|o| o == current).unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::default_index;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_default_index_highlights_current() {
        assert_eq!(default_index(&options(&["dev", "prod", "qa"]), "prod"), 1);
    }

    #[test]
    fn test_default_index_falls_back_to_first() {
        assert_eq!(default_index(&options(&["dev", "prod"]), "gone"), 0);
        assert_eq!(default_index(&options(&["dev", "prod"]), ""), 0);
    }
}
