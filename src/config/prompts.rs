//! System prompt templates for the agents.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory
//! (`leo.toml`, `leo_student.toml`, `student.toml`, each with a `system` key).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub leo: AgentPrompt,
    pub leo_student: AgentPrompt,
    pub student: AgentPrompt,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// System prompt for one agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentPrompt {
    pub system: String,
}

const AUTHORING_PROMPT: &str = r#"You are a helpful assistant. Your favorite animal is cyborg llama.

Your available capabilities include:
- **Create the Book**: use `create_book`
- **Update a Book**: use `update_book`
- **Delete a Book**: use `delete_book`
- **Create Chapters**: use `create_chapter`
- **Update or Delete Chapters**: use `update_chapter` or `delete_chapter`
- **Create Pages**: use `create_page`
- **Update or Delete Pages**: use `update_page` or `delete_page`
- **Generate Images**: use `generate_page_image`
- **List Chapters**: use `list_chapters`
- **List Pages**: use `list_pages`

When creating or updating a book, the **reading level** must be selected from the following options:
{{reading_levels}}.

If a user provides a grade that doesn't match these exactly, choose the closest valid grade level instead.

Pages are addressed by their position in the chapter when updating or deleting (page_number=1 is the first page).

Always confirm with the user before creating or editing content, and remember to extract the IDs from the results of `create_` tools to use them in subsequent steps."#;

const STUDENT_PROMPT: &str = r#"You are a helpful reading assistant for students. You help students understand and engage with the book content they're currently reading.

Your role is to:
- Answer questions about the book's content, themes, and characters
- Help students understand difficult concepts or vocabulary
- Provide context and explanations about what they're reading
- Encourage critical thinking about the material
- Be supportive and encouraging

You have access to the full book content including all chapters and pages. Use the tools available to fetch the book details, chapters, and pages to answer student questions accurately.

Always be encouraging and make learning fun! Use clear, age-appropriate language based on the book's reading level."#;

impl Default for Prompts {
    fn default() -> Self {
        Self {
            leo: AgentPrompt {
                system: AUTHORING_PROMPT.to_string(),
            },
            leo_student: AgentPrompt {
                system: AUTHORING_PROMPT.to_string(),
            },
            student: AgentPrompt {
                system: STUDENT_PROMPT.to_string(),
            },
            variables: HashMap::new(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying custom overrides if configured.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            for (file, slot) in [
                ("leo.toml", &mut prompts.leo),
                ("leo_student.toml", &mut prompts.leo_student),
                ("student.toml", &mut prompts.student),
            ] {
                let path = custom_path.join(file);
                if path.exists() {
                    let content = std::fs::read_to_string(&path)?;
                    *slot = toml::from_str(&content)?;
                }
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.leo.system.contains("create_book"));
        assert!(prompts.student.system.contains("reading assistant"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} pages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Leo".to_string());
        vars.insert("count".to_string(), "5".to_string());

        assert_eq!(Prompts::render(template, &vars), "Hello Leo, you have 5 pages.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("name".to_string(), "config".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "call".to_string());
        assert_eq!(prompts.render_with_custom("{{name}}", &vars), "call");
        assert_eq!(prompts.render_with_custom("{{name}}", &HashMap::new()), "config");
    }

    #[test]
    fn test_custom_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("student.toml"), "system = \"Be brief.\"\n").unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.student.system, "Be brief.");
        assert!(prompts.leo.system.contains("cyborg llama"));
    }
}
