//! Parsed, executable templates.

use std::fmt;

use serde_json::Value;

use crate::error::TemplateError;
use crate::exec;
use crate::parse::{self, Node};

/// A parsed template, ready to be executed any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    root: Vec<Node>,
}

impl Template {
    /// Parses `text` under the given name. The name only appears in errors.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, TemplateError> {
        let name = name.into();
        match parse::parse(text) {
            Ok(root) => Ok(Self { name, root }),
            Err(e) => Err(TemplateError::Parse {
                name,
                line: e.line,
                message: e.message,
            }),
        }
    }

    /// Returns the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executes the template against `data`, writing into `out`.
    ///
    /// Output produced before an execution error stays in `out`.
    pub fn execute<W: fmt::Write>(&self, out: &mut W, data: &Value) -> Result<(), TemplateError> {
        exec::execute(&self.name, &self.root, out, data)
    }

    /// Executes the template against `data` and returns the output.
    pub fn render(&self, data: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.execute(&mut out, data)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(text: &str, data: Value) -> String {
        Template::parse("test", text).unwrap().render(&data).unwrap()
    }

    #[test]
    fn renders_fields() {
        let data = json!({"Name": "Ben", "Page": {"title": "Home"}});
        assert_eq!(
            render("Hello {{ .Name }} on {{ .Page.title }}!", data),
            "Hello Ben on Home!"
        );
    }

    #[test]
    fn escapes_output() {
        let data = json!({"Bio": "<b>x</b>"});
        assert_eq!(render("{{ .Bio }}", data), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn literal_text_is_not_escaped() {
        assert_eq!(render("<p>{{ .A }}</p>", json!({"A": 1})), "<p>1</p>");
    }

    #[test]
    fn missing_key_renders_empty() {
        assert_eq!(render("[{{ .Nope }}]", json!({})), "[]");
    }

    #[test]
    fn conditionals() {
        let text = "{{if .Admin}}admin{{else if .Editor}}editor{{else}}guest{{end}}";
        assert_eq!(render(text, json!({"Admin": true})), "admin");
        assert_eq!(render(text, json!({"Editor": 1})), "editor");
        assert_eq!(render(text, json!({"Admin": false, "Editor": ""})), "guest");
    }

    #[test]
    fn if_without_else() {
        assert_eq!(render("a{{if .X}}b{{end}}c", json!({"X": false})), "ac");
        assert_eq!(render("a{{if .X}}b{{end}}c", json!({"X": [1]})), "abc");
    }

    #[test]
    fn nested_conditionals() {
        let text = "{{if .A}}{{if .B}}ab{{else}}a{{end}}{{else}}none{{end}}";
        assert_eq!(render(text, json!({"A": true, "B": true})), "ab");
        assert_eq!(render(text, json!({"A": true})), "a");
        assert_eq!(render(text, json!({})), "none");
    }

    #[test]
    fn functions_in_conditions() {
        let text = r#"{{if eq .Role "admin"}}A{{else if and .Active (not .Banned)}}U{{else}}-{{end}}"#;
        assert_eq!(render(text, json!({"Role": "admin"})), "A");
        assert_eq!(
            render(text, json!({"Role": "user", "Active": true, "Banned": false})),
            "U"
        );
        assert_eq!(
            render(text, json!({"Role": "user", "Active": true, "Banned": true})),
            "-"
        );
    }

    #[test]
    fn long_else_if_chain_picks_first_true_branch() {
        let mut text = String::from("{{if .A}}a");
        for i in 0..3000 {
            text.push_str(&format!("{{{{else if eq .N {i}}}}}{i}"));
        }
        text.push_str("{{else}}none{{end}}");

        let template = Template::parse("chain", &text).unwrap();
        assert_eq!(template.render(&json!({"N": 2999})).unwrap(), "2999");
        assert_eq!(template.render(&json!({"A": true, "N": 7})).unwrap(), "a");
        assert_eq!(template.render(&json!({"N": -1})).unwrap(), "none");
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let nested = |depth: usize| "{{if .A}}".repeat(depth) + "x" + &"{{end}}".repeat(depth);
        assert_eq!(render(&nested(100), json!({"A": true})), "x");

        let err = Template::parse("deep", &nested(5000)).unwrap_err();
        match err {
            TemplateError::Parse { name, message, .. } => {
                assert_eq!(name, "deep");
                assert!(message.contains("exceeded maximum template depth"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn root_and_dot() {
        assert_eq!(render("{{ . }}", json!("x")), "x");
        assert_eq!(render("{{ $.A }}", json!({"A": 5})), "5");
        assert_eq!(render("{{ len . }}", json!([1, 2])), "2");
    }

    #[test]
    fn trim_markers_and_comments() {
        let text = "<ul>\n  {{- if .A }}\n  <li>a</li>\n  {{- end }}\n</ul>{{/* gone */}}";
        assert_eq!(render(text, json!({"A": true})), "<ul>\n  <li>a</li>\n</ul>");
    }

    #[test]
    fn parse_error_carries_name_and_line() {
        let err = Template::parse("views/home", "ok\n{{ if .A }}").unwrap_err();
        match err {
            TemplateError::Parse { name, line, .. } => {
                assert_eq!(name, "views/home");
                assert_eq!(line, 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn exec_error_for_field_of_string() {
        let template = Template::parse("t", "{{ .Name.first }}").unwrap();
        let err = template.render(&json!({"Name": "Ben"})).unwrap_err();
        assert!(matches!(err, TemplateError::Exec { line: 1, .. }));
        assert!(err.to_string().contains("can't evaluate field first"));
    }

    #[test]
    fn execute_keeps_partial_output() {
        let template = Template::parse("t", "before {{ .A.b }} after").unwrap();
        let mut out = String::new();
        assert!(template.execute(&mut out, &json!({"A": 1})).is_err());
        assert_eq!(out, "before ");
    }

    #[test]
    fn template_is_reusable() {
        let template = Template::parse("t", "{{ .N }}").unwrap();
        assert_eq!(template.name(), "t");
        assert_eq!(template.render(&json!({"N": 1})).unwrap(), "1");
        assert_eq!(template.render(&json!({"N": 2})).unwrap(), "2");
    }
}
