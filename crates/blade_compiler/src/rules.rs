//! The Blade directives understood by the translator.
//!
//! Each function builds one [`RewriteRule`]. [`standard_rules`] returns them in
//! the order the [`Pipeline`](crate::Pipeline) must apply them:
//!
//! | # | Blade | Output |
//! |---|-------|--------|
//! | 1 | `{{-- note --}}` | *(removed)* |
//! | 2 | `{{ $Page.title }}` | `{{ .Page.title }}` |
//! | 3 | `{!! $Content !!}` | `{{ .Content }}` |
//! | 4 | `@if($IsAdmin)` | `{{if .IsAdmin}}` |
//! | 5 | `@elseif(EXPR)` | `{{else if EXPR}}` |
//! | 6 | `@else` | `{{else}}` |
//! | 7 | `@endif` | `{{end}}` |
//!
//! Comments go first so that directives inside them never reach later rules.
//! `@elseif` must run before `@else`.

use regex::Regex;

use crate::rule::RewriteRule;

/// Compiles one of the literal patterns below.
fn rule(name: &'static str, pattern: &str, replacement: &'static str) -> RewriteRule {
    let pattern = Regex::new(pattern)
        .unwrap_or_else(|e| panic!("built-in `{name}` rule has an invalid pattern: {e}"));
    RewriteRule::new(name, pattern, replacement)
}

/// Removes `{{-- ... --}}` comments, content included, across lines.
pub fn comments() -> RewriteRule {
    rule("comments", r"(?s)\{\{--.*?--\}\}", "")
}

/// Rewrites `{{ $path }}` into a field access.
///
/// The variable reference may be a dotted path and is copied as-is.
pub fn escaped_echo() -> RewriteRule {
    rule("escaped-echo", r"\{\{\s*\$(.+?)\s*\}\}", "{{ .${1} }}")
}

/// Rewrites `{!! $path !!}` into a field access.
///
/// Escaping is whatever the downstream engine does for field output.
pub fn raw_echo() -> RewriteRule {
    rule("raw-echo", r"\{!!\s*\$(.+?)\s*!!\}", "{{ .${1} }}")
}

/// Rewrites `@if($name)` into a conditional open. Only a bare variable is
/// accepted as the condition.
pub fn if_open() -> RewriteRule {
    rule(
        "if",
        r"@if\s*\(\s*\$([A-Za-z_][A-Za-z0-9_]*)\s*\)",
        "{{if .${1}}}",
    )
}

/// Rewrites `@elseif(EXPR)`, copying `EXPR` verbatim.
pub fn else_if() -> RewriteRule {
    rule("elseif", r"@elseif\s*\((.+?)\)", "{{else if ${1}}}")
}

/// Rewrites a bare `@else`.
pub fn else_branch() -> RewriteRule {
    rule("else", r"@else\b", "{{else}}")
}

/// Rewrites `@endif` into a block close.
pub fn end_if() -> RewriteRule {
    rule("endif", r"@endif\b", "{{end}}")
}

/// All rules in application order.
pub fn standard_rules() -> Vec<RewriteRule> {
    vec![
        comments(),
        escaped_echo(),
        raw_echo(),
        if_open(),
        else_if(),
        else_branch(),
        end_if(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_are_removed_with_content() {
        let rule = comments();
        assert_eq!(rule.apply("a{{-- note --}}b"), "ab");
        assert_eq!(rule.apply("a {{-- one --}} b {{-- two --}} c"), "a  b  c");
    }

    #[test]
    fn comments_span_lines_and_may_be_empty() {
        let rule = comments();
        assert_eq!(rule.apply("x{{--\n  @if($A)\n--}}y"), "xy");
        assert_eq!(rule.apply("x{{----}}y"), "xy");
    }

    #[test]
    fn comments_are_non_greedy() {
        let rule = comments();
        assert_eq!(rule.apply("{{-- a --}}keep{{-- b --}}"), "keep");
    }

    #[test]
    fn escaped_echo_bare_name() {
        assert_eq!(escaped_echo().apply("Hi {{ $Name }}!"), "Hi {{ .Name }}!");
    }

    #[test]
    fn escaped_echo_trims_whitespace() {
        let rule = escaped_echo();
        assert_eq!(rule.apply("{{$Name}}"), "{{ .Name }}");
        assert_eq!(rule.apply("{{   $Name   }}"), "{{ .Name }}");
        assert_eq!(rule.apply("{{\t$Name\n}}"), "{{ .Name }}");
    }

    #[test]
    fn escaped_echo_dotted_path() {
        assert_eq!(
            escaped_echo().apply("<h1>{{ $Page.title }}</h1>"),
            "<h1>{{ .Page.title }}</h1>"
        );
    }

    #[test]
    fn escaped_echo_several_on_one_line() {
        assert_eq!(
            escaped_echo().apply("{{ $A }} and {{ $B.c }}"),
            "{{ .A }} and {{ .B.c }}"
        );
    }

    #[test]
    fn escaped_echo_ignores_non_variables() {
        let rule = escaped_echo();
        assert!(!rule.matches("{{ .Already }}"));
        assert!(!rule.matches("{{ Name }}"));
    }

    #[test]
    fn raw_echo_rewrites_to_field_access() {
        let rule = raw_echo();
        assert_eq!(rule.apply("{!! $Bio !!}"), "{{ .Bio }}");
        assert_eq!(rule.apply("{!!$Post.body!!}"), "{{ .Post.body }}");
    }

    #[test]
    fn if_open_bare_variable() {
        let rule = if_open();
        assert_eq!(rule.apply("@if($IsAdmin)"), "{{if .IsAdmin}}");
        assert_eq!(rule.apply("@if ( $is_admin )"), "{{if .is_admin}}");
    }

    #[test]
    fn if_open_rejects_compound_conditions() {
        let rule = if_open();
        assert!(!rule.matches("@if($User.admin)"));
        assert!(!rule.matches("@if($A && $B)"));
        assert!(!rule.matches("@if(IsAdmin)"));
    }

    #[test]
    fn else_if_copies_expression_verbatim() {
        let rule = else_if();
        assert_eq!(rule.apply("@elseif(.IsGuest)"), "{{else if .IsGuest}}");
        assert_eq!(
            rule.apply(r#"@elseif (eq .Role "editor")"#),
            r#"{{else if eq .Role "editor"}}"#
        );
        assert_eq!(rule.apply("@elseif($IsGuest)"), "{{else if $IsGuest}}");
    }

    #[test]
    fn else_branch_is_fixed() {
        let rule = else_branch();
        assert_eq!(rule.apply("a@else b"), "a{{else}} b");
        assert_eq!(rule.apply("@else\n"), "{{else}}\n");
    }

    #[test]
    fn else_branch_does_not_eat_longer_words() {
        let rule = else_branch();
        assert!(!rule.matches("@elseif(x)"));
        assert!(!rule.matches("@elsewhere"));
    }

    #[test]
    fn end_if_is_fixed() {
        let rule = end_if();
        assert_eq!(rule.apply("x@endif y"), "x{{end}} y");
        assert!(!rule.matches("@endifx"));
    }

    #[test]
    fn standard_order() {
        let names: Vec<&str> = standard_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "comments",
                "escaped-echo",
                "raw-echo",
                "if",
                "elseif",
                "else",
                "endif"
            ]
        );
    }
}
