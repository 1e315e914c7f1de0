//! Message template rendering.
//!
//! A template is a message skeleton with `{{name}}` placeholders filled in
//! from a parameter map at render time. A placeholder with no matching
//! parameter is a hard error; extra parameters are ignored. Rendering is
//! pure — the same template and parameters always produce the same output.

use std::collections::HashMap;

use regex::Regex;

use crate::error::RenderError;

/// Substitutes `{{name}}` placeholders in message templates.
pub struct Renderer {
    placeholder: Regex,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            // Placeholder names are [A-Za-z0-9_]+; anything else between
            // braces is left literal.
            placeholder: Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap(),
        }
    }

    /// Render a template against a parameter map.
    pub fn render(
        &self,
        template: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, RenderError> {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for caps in self.placeholder.captures_iter(template) {
            let whole = caps.get(0).unwrap();
            let name = &caps[1];
            let value = params.get(name).ok_or_else(|| RenderError::MissingPlaceholder {
                name: name.to_string(),
            })?;
            output.push_str(&template[last..whole.start()]);
            output.push_str(value);
            last = whole.end();
        }
        output.push_str(&template[last..]);

        Ok(output)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_all_placeholders() {
        let renderer = Renderer::new();
        let rendered = renderer
            .render(
                "Urgent: {{event}} at {{time}} for {{team}}",
                &params(&[("event", "Meeting"), ("time", "10 AM tomorrow"), ("team", "DevOps")]),
            )
            .unwrap();
        assert_eq!(rendered, "Urgent: Meeting at 10 AM tomorrow for DevOps");
    }

    #[test]
    fn rendering_is_idempotent() {
        let renderer = Renderer::new();
        let p = params(&[("event", "Deploy"), ("time", "tonight"), ("team", "Support")]);
        let template = "{{event}} scheduled {{time}}, ping {{team}}";
        let first = renderer.render(template, &p).unwrap();
        let second = renderer.render(template, &p).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_parameter_is_an_error() {
        let renderer = Renderer::new();
        let result = renderer.render("Hello {{name}}", &params(&[]));
        match result {
            Err(RenderError::MissingPlaceholder { name }) => assert_eq!(name, "name"),
            other => panic!("Expected MissingPlaceholder, got {:?}", other),
        }
    }

    #[test]
    fn repeated_placeholder_substituted_everywhere() {
        let renderer = Renderer::new();
        let rendered = renderer
            .render("{{team}} meeting — {{team}} only", &params(&[("team", "QA")]))
            .unwrap();
        assert_eq!(rendered, "QA meeting — QA only");
    }

    #[test]
    fn extra_parameters_are_ignored() {
        let renderer = Renderer::new();
        let rendered = renderer
            .render("Just {{event}}", &params(&[("event", "Release"), ("time", "unused")]))
            .unwrap();
        assert_eq!(rendered, "Just Release");
    }

    #[test]
    fn non_identifier_braces_left_literal() {
        let renderer = Renderer::new();
        let rendered = renderer
            .render("{{ event }} and {{event}}", &params(&[("event", "Outage")]))
            .unwrap();
        assert_eq!(rendered, "{{ event }} and Outage");
    }

    #[test]
    fn template_without_placeholders_passes_through() {
        let renderer = Renderer::new();
        let rendered = renderer.render("static text", &params(&[])).unwrap();
        assert_eq!(rendered, "static text");
    }
}
