// Copyright (C) Brian G. Milnes 2025

//! Tests for the invert-if executor

mod common;

use common::{expect_invert_if, expect_no_invert_if, project_with_file, project_with_settings};
use nestless::{apply_fix, execute, Executor, FormatSettings, InvertIf, QuoteStyle};

/// Content of the fix of the only diagnostic for `code`
fn single_fix(code: &str) -> String {
    let (_, diagnostic) = expect_invert_if(code, None);
    diagnostic.fix.expect("fix").content
}

#[test]
fn test_suggests_inverting_simple_if() {
    let (project, diagnostic) = expect_invert_if(
        r#"
      function main() {
        const a = Math.random();

        if (a > 0.5) {
          console.log('Yes');
        }
      }
    "#,
        Some((5, 67, 69)),
    );

    let fix = diagnostic.fix.as_ref().expect("simple if should be fixable");
    assert_eq!(fix.start, 23);
    assert_eq!(fix.end, 129);
    assert_eq!(
        fix.content,
        "{\n        const a = Math.random();\n\n        if (a <= 0.5) {\n          return;\n        }\n\n        console.log(\"Yes\");\n      }"
    );

    assert_eq!(
        apply_fix(&project, &diagnostic).unwrap(),
        r#"
      function main() {
        const a = Math.random();

        if (a <= 0.5) {
          return;
        }

        console.log("Yes");
      }
    "#
    );
}

#[test]
fn test_suggests_inverting_nested_ifs_independently() {
    let project = project_with_file(
        r#"
      function main() {
        const a = Math.random();

        if (a > 0.5) {
          const b = Math.random();

          if (b > 0.5) {
            console.log('Yes');
          }
        }
      }
    "#,
    );

    let results = nestless::review(&project);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].code, "invert-if");
    assert_eq!(results[1].code, "invert-if");
    assert!(results[0].start < results[1].start, "outer if comes first");

    assert_eq!(
        apply_fix(&project, &results[0]).unwrap(),
        r#"
      function main() {
        const a = Math.random();

        if (a <= 0.5) {
          return;
        }

        const b = Math.random();

        if (b > 0.5) {
          console.log("Yes");
        }
      }
    "#
    );

    assert_eq!(
        apply_fix(&project, &results[1]).unwrap(),
        r#"
      function main() {
        const a = Math.random();

        if (a > 0.5) {
          const b = Math.random();

          if (b <= 0.5) {
            return;
          }

          console.log("Yes");
        }
      }
    "#
    );
}

#[test]
fn test_suggests_outer_if_when_inner_is_followed_by_statement() {
    expect_invert_if(
        r#"
      function main() {
        const a = Math.random();

        if (a > 0.5) {
          const b = Math.random()

          if (b > 0.5) {
            console.log('Yes')
          }

          console.log('No')
        }
      }
    "#,
        Some((5, 67, 69)),
    );
}

#[test]
fn test_suggests_inverting_if_with_following_return() {
    let (project, diagnostic) = expect_invert_if(
        r#"
      function main() {
        const a = Math.random()

        if (a > 0.5) {
          console.log('Yes')

          return true
        }

        return false
      }
    "#,
        None,
    );

    assert_eq!(
        apply_fix(&project, &diagnostic).unwrap(),
        r#"
      function main() {
        const a = Math.random()

        if (a <= 0.5) {
          return false;
        }

        console.log("Yes")

        return true
      }
    "#
    );
}

#[test]
fn test_suggests_inverting_if_with_following_return_and_longer_body() {
    expect_invert_if(
        r#"
      function main() {
        const a = Math.random()

        if (a > 0.5) {
          console.log('Yes')
          console.log('Yes')

          return true
        }

        return false
      }
    "#,
        None,
    );
}

#[test]
fn test_following_return_is_kept_when_body_falls_through() {
    let fix = single_fix("function main() {\n  if (ready) {\n    go();\n  }\n  return done;\n}\n");
    assert_eq!(
        fix,
        "{\n  if (!ready) {\n    return done;\n  }\n\n  go();\n  return done;\n}"
    );
}

#[test]
fn test_does_not_suggest_when_followed_by_statement() {
    expect_no_invert_if(
        r#"
      function main() {
        const a = Math.random()

        if (a > 0.5) {
          console.log('Yes')
        }

        console.log('No')
      }
    "#,
    );
}

#[test]
fn test_does_not_suggest_with_else() {
    expect_no_invert_if(
        r#"
      function main() {
        const a = Math.random()

        if (a > 0.5) {
          console.log('Yes')
        }
        else {
          console.log('No')
        }
      }
    "#,
    );
}

#[test]
fn test_does_not_suggest_when_followed_by_statement_and_return() {
    expect_no_invert_if(
        r#"
      function main() {
        const a = Math.random()

        if (a > 0.5) {
          console.log('Yes')

          return true
        }

        console.log('No')

        return false
      }
    "#,
    );
}

#[test]
fn test_else_blocks_nested_candidates_too() {
    expect_no_invert_if(
        "function main() {\n  if (a) {\n    if (b) {\n      x();\n    } else {\n      y();\n    }\n  } else {\n    z();\n  }\n}\n",
    );
}

#[test]
fn test_if_followed_by_statement_on_one_line() {
    expect_no_invert_if("function main() { if (a > 0.5) { log('Yes') } log('No') }");
}

#[test]
fn test_inner_if_of_non_tail_if_is_not_suggested() {
    expect_no_invert_if(
        "function main() {\n  if (a) {\n    if (b) {\n      x();\n    }\n  }\n  log();\n}\n",
    );
}

#[test]
fn test_inner_if_of_if_followed_by_return_is_not_suggested() {
    let (_, diagnostic) = expect_invert_if(
        "function main() {\n  if (a) {\n    if (b) {\n      x();\n    }\n  }\n  return 1;\n}\n",
        None,
    );
    assert_eq!(diagnostic.line, 2);
}

#[test]
fn test_qualifies_regardless_of_preceding_statements() {
    expect_invert_if("function main() {\n  if (a) {\n    x();\n  }\n}\n", Some((2, 20, 22)));
    expect_invert_if(
        "function main() {\n  one();\n  two();\n  three();\n  if (a) {\n    x();\n  }\n}\n",
        Some((5, 49, 51)),
    );
}

#[test]
fn test_top_level_and_loop_ifs_are_not_suggested() {
    expect_no_invert_if("if (a) {\n  x();\n}\n");
    expect_no_invert_if("function main() {\n  for (const x of xs) {\n    if (x) {\n      use(x);\n    }\n  }\n}\n");
}

#[test]
fn test_function_like_bodies() {
    expect_invert_if("const f = () => {\n  if (a) {\n    x();\n  }\n};\n", None);
    expect_invert_if("const f = function () {\n  if (a) {\n    x();\n  }\n};\n", None);
    expect_invert_if("class C {\n  run() {\n    if (a) {\n      x();\n    }\n  }\n}\n", None);
    expect_invert_if("function* gen() {\n  if (a) {\n    yield 1;\n  }\n}\n", None);
}

#[test]
fn test_trailing_comment_does_not_block_inversion() {
    expect_invert_if("function main() {\n  if (a) {\n    x();\n  }\n  // done\n}\n", None);
}

#[test]
fn test_comparison_operators_are_complemented() {
    let cases = [
        ("a < b", "a >= b"),
        ("a <= b", "a > b"),
        ("a >= b", "a < b"),
        ("a == b", "a != b"),
        ("a != b", "a == b"),
        ("x === null", "x !== null"),
        ("x !== undefined", "x === undefined"),
    ];

    for (condition, negated) in cases {
        let code = format!("function main() {{\n  if ({condition}) {{\n    x();\n  }}\n}}\n");
        let fix = single_fix(&code);
        assert!(
            fix.contains(&format!("if ({negated}) {{")),
            "{condition} should negate to {negated}, got:\n{fix}"
        );
    }
}

#[test]
fn test_other_conditions_are_wrapped_in_not() {
    let cases = [
        ("ready", "!ready"),
        ("check()", "!check()"),
        ("user.active", "!user.active"),
        ("!done", "!!done"),
        ("a && b", "!(a && b)"),
        ("a + b", "!(a + b)"),
        ("x instanceof Y", "!(x instanceof Y)"),
    ];

    for (condition, negated) in cases {
        let code = format!("function main() {{\n  if ({condition}) {{\n    x();\n  }}\n}}\n");
        let fix = single_fix(&code);
        assert!(
            fix.contains(&format!("if ({negated}) {{")),
            "{condition} should negate to {negated}, got:\n{fix}"
        );
    }
}

#[test]
fn test_single_statement_consequence() {
    let fix = single_fix("function f() {\n  if (x) y();\n}\n");
    assert_eq!(fix, "{\n  if (!x) {\n    return;\n  }\n\n  y();\n}");
}

#[test]
fn test_fix_uses_desired_tab_size() {
    let code = "function main() {\n  setup();\n  if (ready) {\n    for (const x of xs) {\n      use(x);\n    }\n  }\n}\n";
    let project = project_with_settings(code, FormatSettings::fixed(2, 4));
    let results = nestless::review(&project);

    assert_eq!(results.len(), 1);
    assert_eq!(
        apply_fix(&project, &results[0]).unwrap(),
        "function main() {\n    setup();\n    if (!ready) {\n        return;\n    }\n\n    for (const x of xs) {\n        use(x);\n    }\n}\n"
    );
}

#[test]
fn test_quote_style_preserve_keeps_literals() {
    let project = project_with_file("function main() {\n  if (a) {\n    log('Yes');\n  }\n}\n");
    let executors: Vec<Box<dyn Executor>> =
        vec![Box::new(InvertIf::new().with_quote_style(QuoteStyle::Preserve))];
    let results = execute(&project, &executors);

    let fix = results[0].fix.as_ref().expect("fix");
    assert!(fix.content.contains("log('Yes');"));
}

#[test]
fn test_multiline_template_is_reported_without_fix() {
    let (_, diagnostic) = expect_invert_if(
        "function main() {\n  if (a) {\n    log(`first\nsecond`);\n  }\n}\n",
        None,
    );
    assert!(diagnostic.fix.is_none());
}

#[test]
fn test_without_fixes_reports_only() {
    let project = project_with_file("function main() {\n  if (a) {\n    x();\n  }\n}\n");
    let executors: Vec<Box<dyn Executor>> = vec![Box::new(InvertIf::without_fixes())];
    let results = execute(&project, &executors);

    assert_eq!(results.len(), 1);
    assert!(!results[0].has_fix());
}

#[test]
fn test_unparsable_file_reports_nothing() {
    expect_no_invert_if("function main( {\n  if (a) {\n    x();\n  }\n}\n");
}

#[test]
fn test_doc_comments_do_not_shrink_detected_width() {
    let (project, diagnostic) = expect_invert_if(
        "/**\n * Upper bound.\n */\nconst MAX = 3;\n\n/**\n * Does the work.\n */\nfunction go() {\n  work();\n}\n\n/**\n * Entry point.\n */\nexport function run(a) {\n  if (a > MAX) {\n    go();\n  }\n}\n",
        None,
    );

    let fixed = apply_fix(&project, &diagnostic).unwrap();
    assert!(
        fixed.ends_with("export function run(a) {\n  if (a <= MAX) {\n    return;\n  }\n\n  go();\n}\n"),
        "unexpected fix:\n{fixed}"
    );
}

#[test]
fn test_tab_indented_file_gets_tabs() {
    let (project, diagnostic) = expect_invert_if(
        "function main() {\n\tsetup();\n\tif (a) {\n\t\tfor (const x of xs) {\n\t\t\tuse(x);\n\t\t}\n\t}\n}\n",
        None,
    );

    assert_eq!(
        apply_fix(&project, &diagnostic).unwrap(),
        "function main() {\n\tsetup();\n\tif (!a) {\n\t\treturn;\n\t}\n\n\tfor (const x of xs) {\n\t\tuse(x);\n\t}\n}\n"
    );
}

#[test]
fn test_configured_tabs_without_detection() {
    let project = project_with_settings(
        "class C {\n\trun() {\n\t\tif (a) {\n\t\t\tx();\n\t\t}\n\t}\n}\n",
        FormatSettings::tabs(),
    );
    let results = nestless::review(&project);

    assert_eq!(
        results[0].fix.as_ref().unwrap().content,
        "{\n\t\tif (!a) {\n\t\t\treturn;\n\t\t}\n\n\t\tx();\n\t}"
    );
}

#[test]
fn test_line_continued_string_is_reported_without_fix() {
    let (_, diagnostic) = expect_invert_if(
        "function main() {\n  if (a) {\n    const s = 'abc\\\n      def';\n    use(s);\n  }\n}\n",
        None,
    );
    assert!(diagnostic.fix.is_none());
}

#[test]
fn test_single_line_regex_is_lifted() {
    let fix = single_fix("function main() {\n  if (a) {\n    const r = /ab+c/g;\n  }\n}\n");
    assert!(fix.contains("const r = /ab+c/g;"));
}

#[test]
fn test_lifted_statements_keep_alignment() {
    let code = "function main() {\n  /**\n   * Start.\n   */\n  start(alpha,\n        beta);\n  if (a) {\n    x();\n  }\n}\n";
    let fix = single_fix(code);
    assert_eq!(
        fix,
        "{\n  /**\n   * Start.\n   */\n  start(alpha,\n        beta);\n  if (!a) {\n    return;\n  }\n\n  x();\n}"
    );
}

#[test]
fn test_crlf_file_keeps_crlf() {
    let (project, diagnostic) = expect_invert_if(
        "function main() {\r\n  setup();\r\n  if (a) {\r\n    x();\r\n  }\r\n}\r\n",
        None,
    );

    assert_eq!(
        apply_fix(&project, &diagnostic).unwrap(),
        "function main() {\r\n  setup();\r\n  if (!a) {\r\n    return;\r\n  }\r\n\r\n  x();\r\n}\r\n"
    );
}

#[test]
fn test_jsx_in_plain_javascript_file() {
    let mut project = nestless::Project::new(common::PROJECT_ROOT, FormatSettings::default());
    project.add_source_file("App.js", "function App() {\n  if (ready) {\n    return <div>hi</div>;\n  }\n}\n");
    let results = nestless::review(&project);

    assert!(project.units()[0].parse_error().is_none());
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].fix.as_ref().unwrap().content,
        "{\n  if (!ready) {\n    return;\n  }\n\n  return <div>hi</div>;\n}"
    );
}
